//! 조정기 -- 라이브 컨테이너 테이블과 선언된 토폴로지를 컴포넌트 ID로 조인합니다.
//!
//! # 연산
//!
//! - [`Reconciler::reconcile`]: 컴포넌트별 실행 상태와 집계 상태
//! - [`Reconciler::check_safe_to_start`]: 데이터베이스가 모두 떠 있는지 확인
//! - [`Reconciler::check_safe_to_stop`]: 실행 중인 백엔드가 없는지 확인
//!
//! 각 호출은 `docker ps -a` 와 토폴로지 문서를 처음부터 다시 읽습니다.
//!
//! # 부재 처리
//!
//! 라이브 테이블에 없는 컴포넌트는 `reconcile` 에서는 `Error`,
//! 시작 게이트에서는 `Stopped` 와 동일하게 취급합니다.

use std::collections::{BTreeMap, BTreeSet};

use shipyard_command::{CommandRunner, Lifecycle};
use shipyard_core::types::{
    AggregateStatus, ContainerRecord, ReconciliationResult, RunState, SafetyVerdict,
};
use tracing::{debug, info};

use crate::error::ReconcilerError;
use crate::ps::{parse_container_records, parse_container_states};
use crate::topology::{ResolvedTopology, TopologySource, resolve};

/// 시작 차단 메시지 접미사
pub const START_BLOCKED_SUFFIX: &str = " not running; start the database containers first";
/// 중지 차단 메시지 접미사
pub const STOP_BLOCKED_SUFFIX: &str = " still running; stop the backend containers first";

/// 컴포넌트별 실행 상태를 계산합니다.
///
/// 집계 상태는 하나라도 `Running` 이면 `Run`, 컴포넌트가 없으면 `Stop` 입니다.
pub fn reconcile_states(
    topology: &ResolvedTopology,
    live: &BTreeMap<String, RunState>,
) -> ReconciliationResult {
    let states: BTreeMap<String, RunState> = topology
        .component_ids()
        .into_iter()
        .map(|id| (id.to_owned(), live.get(id).copied().unwrap_or(RunState::Error)))
        .collect();

    let all_running = if states.values().any(|s| s.is_running()) {
        AggregateStatus::Run
    } else {
        AggregateStatus::Stop
    };

    ReconciliationResult {
        project_id: topology.project_id.clone(),
        states,
        all_running,
    }
}

/// 시작 게이트: 없거나 종료된 데이터베이스의 종류를 차단 요인으로 기록합니다.
pub fn start_verdict(topology: &ResolvedTopology, live: &BTreeMap<String, RunState>) -> SafetyVerdict {
    let blockers: BTreeSet<_> = topology
        .databases()
        .filter(|(id, _)| matches!(live.get(*id), None | Some(RunState::Stopped)))
        .map(|(_, kind)| kind)
        .collect();
    verdict(blockers.iter().map(|k| k.label()), START_BLOCKED_SUFFIX)
}

/// 중지 게이트: 실행 중인 백엔드의 종류를 차단 요인으로 기록합니다.
pub fn stop_verdict(topology: &ResolvedTopology, live: &BTreeMap<String, RunState>) -> SafetyVerdict {
    let blockers: BTreeSet<_> = topology
        .backends()
        .filter(|(id, _)| live.get(*id).is_some_and(|s| s.is_running()))
        .map(|(_, kind)| kind)
        .collect();
    verdict(blockers.iter().map(|k| k.label()), STOP_BLOCKED_SUFFIX)
}

/// 차단 라벨은 종류별로 한 번씩, 고정된 카테고리 순서로 나열됩니다.
fn verdict<'a>(labels: impl Iterator<Item = &'a str>, suffix: &str) -> SafetyVerdict {
    let blockers: Vec<String> = labels.map(str::to_owned).collect();
    if blockers.is_empty() {
        return SafetyVerdict::Pass;
    }
    let message = format!("{}{suffix}", blockers.join(", "));
    SafetyVerdict::Fail { blockers, message }
}

/// 조정기
pub struct Reconciler<R: CommandRunner, T: TopologySource> {
    lifecycle: Lifecycle<R>,
    topology: T,
}

impl<R: CommandRunner, T: TopologySource> Reconciler<R, T> {
    pub fn new(lifecycle: Lifecycle<R>, topology: T) -> Self {
        Self { lifecycle, topology }
    }

    pub fn lifecycle(&self) -> &Lifecycle<R> {
        &self.lifecycle
    }

    /// 라이브 `docker ps -a` 를 `이름 -> 상태` 맵으로 반환합니다.
    pub fn list_container_states(&self) -> Result<BTreeMap<String, RunState>, ReconcilerError> {
        let raw = self.lifecycle.list_containers()?;
        parse_container_states(&raw)
    }

    /// 라이브 `docker ps -a` 를 전체 레코드로 반환합니다.
    pub fn list_container_records(&self) -> Result<Vec<ContainerRecord>, ReconcilerError> {
        let raw = self.lifecycle.list_containers()?;
        parse_container_records(&raw)
    }

    fn snapshot(
        &self,
        project_id: &str,
    ) -> Result<(ResolvedTopology, BTreeMap<String, RunState>), ReconcilerError> {
        let topology = resolve(&self.topology.load(project_id)?)?;
        let live = self.list_container_states()?;
        debug!(
            project_id,
            components = topology.components.len(),
            live_containers = live.len(),
            "joined topology with live containers"
        );
        Ok((topology, live))
    }

    /// 프로젝트 실행 상태를 계산합니다.
    pub fn reconcile(&self, project_id: &str) -> Result<ReconciliationResult, ReconcilerError> {
        let (topology, live) = self.snapshot(project_id)?;
        let result = reconcile_states(&topology, &live);
        info!(project_id, status = %result.all_running, "project reconciled");
        Ok(result)
    }

    /// 프로젝트 시작 전 데이터베이스 상태를 확인합니다.
    pub fn check_safe_to_start(&self, project_id: &str) -> Result<SafetyVerdict, ReconcilerError> {
        let (topology, live) = self.snapshot(project_id)?;
        let verdict = start_verdict(&topology, &live);
        info!(project_id, verdict = %verdict, "start gate evaluated");
        Ok(verdict)
    }

    /// 프로젝트 중지 전 백엔드 상태를 확인합니다.
    pub fn check_safe_to_stop(&self, project_id: &str) -> Result<SafetyVerdict, ReconcilerError> {
        let (topology, live) = self.snapshot(project_id)?;
        let verdict = stop_verdict(&topology, &live);
        info!(project_id, verdict = %verdict, "stop gate evaluated");
        Ok(verdict)
    }
}

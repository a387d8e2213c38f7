//! `docker ps -a` 테이블 파서
//!
//! 첫 줄(헤더)은 버리고, 나머지 각 줄을 두 칸 이상의 공백으로 분리합니다.
//! 필드 수가 7이면 PORTS 컬럼이 있고, 6이면 공개 포트가 없는 컨테이너입니다.
//!
//! 구조가 맞지 않는 줄이 하나라도 있으면 호출 전체가 실패합니다.
//!
//! # 사용 예시
//! ```
//! use shipyard_core::types::RunState;
//! use shipyard_reconciler::ps::parse_container_states;
//!
//! let table = "\
//! CONTAINER ID   IMAGE     COMMAND                  CREATED       STATUS         PORTS                  NAMES
//! 3f2a1b9c8d7e   nginx     \"/docker-entrypoint.…\"   2 hours ago   Up 2 hours     0.0.0.0:80->80/tcp     web
//! 9e8d7c6b5a4f   mysql:8   \"docker-entrypoint.s…\"   2 hours ago   Exited (0) 5 minutes ago                db
//! ";
//! let states = parse_container_states(table).unwrap();
//! assert_eq!(states["web"], RunState::Running);
//! assert_eq!(states["db"], RunState::Stopped);
//! ```

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use shipyard_core::types::{ContainerRecord, PortMapping, PortRange, RunState};

use crate::error::ReconcilerError;

/// 컬럼 구분자: 두 칸 이상의 공백
static COLUMN_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s{2,}").expect("column separator pattern is valid"));

const FIELDS_WITH_PORTS: usize = 7;
const FIELDS_WITHOUT_PORTS: usize = 6;

/// 상태 셀을 실행 상태로 분류합니다.
///
/// `Up` → Running, `Exited` → Stopped, `Created` → Created. 그 외는 에러입니다.
pub fn classify_status(status: &str, container: &str) -> Result<RunState, ReconcilerError> {
    if status.contains("Up") {
        Ok(RunState::Running)
    } else if status.contains("Exited") {
        Ok(RunState::Stopped)
    } else if status.contains("Created") {
        Ok(RunState::Created)
    } else {
        Err(ReconcilerError::UnknownStatus {
            status: status.to_owned(),
            container: container.to_owned(),
        })
    }
}

/// 포트 셀을 파싱합니다.
///
/// - `host:outer->inner/proto` → outer, inner
/// - `inner/proto` → inner (호스트에 공개되지 않음)
///
/// 각 포트는 단일 포트(`80`) 또는 범위(`8000-8001`)입니다.
/// 여러 바인딩(`a, b`)이 있으면 첫 번째만 사용합니다.
pub fn parse_port_mapping(cell: &str) -> Result<PortMapping, ReconcilerError> {
    let invalid = |reason: &str| ReconcilerError::PortNumber {
        value: cell.to_owned(),
        reason: reason.to_owned(),
    };

    let binding = cell.split(',').next().unwrap_or_default().trim();

    if let Some((host, container)) = binding.split_once("->") {
        let (_, outer) = host
            .rsplit_once(':')
            .ok_or_else(|| invalid("missing ':' before outer port"))?;
        let inner = container.split('/').next().unwrap_or_default();
        Ok(PortMapping {
            inner_port: port_range(inner).ok_or_else(|| invalid("inner port is not a port or port range"))?,
            outer_port: Some(
                port_range(outer).ok_or_else(|| invalid("outer port is not a port or port range"))?,
            ),
        })
    } else if let Some((inner, _proto)) = binding.split_once('/') {
        Ok(PortMapping {
            inner_port: port_range(inner).ok_or_else(|| invalid("inner port is not a port or port range"))?,
            outer_port: None,
        })
    } else {
        Err(invalid("neither '->' nor '/' present"))
    }
}

fn port_range(text: &str) -> Option<PortRange> {
    text.trim().parse().ok()
}

/// 테이블 전체를 [`ContainerRecord`] 목록으로 파싱합니다.
///
/// # Errors
///
/// - `LineParts`: 6 또는 7개 필드로 분리되지 않는 줄
/// - `UnknownStatus`: 인식할 수 없는 상태 셀
/// - `PortNumber`: 포트 셀 형식 오류
pub fn parse_container_records(raw: &str) -> Result<Vec<ContainerRecord>, ReconcilerError> {
    raw.lines()
        .enumerate()
        .skip(1)
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| parse_line(idx + 1, line.trim()))
        .collect()
}

fn parse_line(line_no: usize, line: &str) -> Result<ContainerRecord, ReconcilerError> {
    let fields: Vec<&str> = COLUMN_SEPARATOR.split(line).collect();

    let (ports, name) = match fields.len() {
        FIELDS_WITH_PORTS => (Some(parse_port_mapping(fields[5])?), fields[6]),
        FIELDS_WITHOUT_PORTS => (None, fields[5]),
        n => {
            return Err(ReconcilerError::LineParts {
                line: line_no,
                fields: n,
                content: line.to_owned(),
            });
        }
    };

    let status = fields[4];
    Ok(ContainerRecord {
        id: fields[0].to_owned(),
        image: fields[1].to_owned(),
        command: fields[2].to_owned(),
        created: fields[3].to_owned(),
        status: status.to_owned(),
        state: classify_status(status, name)?,
        ports,
        name: name.to_owned(),
    })
}

/// 테이블을 `컨테이너 이름 -> 실행 상태` 맵으로 파싱합니다.
pub fn parse_container_states(raw: &str) -> Result<BTreeMap<String, RunState>, ReconcilerError> {
    Ok(parse_container_records(raw)?
        .into_iter()
        .map(|record| (record.name, record.state))
        .collect())
}

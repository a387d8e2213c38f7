//! 도메인 타입 — 시스템 전역에서 사용되는 공통 타입
//!
//! 컨테이너 테이블 레코드, 프로젝트 토폴로지 스냅샷, 조정(reconciliation) 결과 등
//! 모든 크레이트가 공유하는 데이터 구조를 정의합니다.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// 컨테이너 실행 상태
///
/// `Error`는 토폴로지에는 선언되어 있지만 라이브 컨테이너 목록에 없는
/// 컴포넌트를 나타냅니다. 생성 후 종료된 컨테이너(`Stopped`)와 구분됩니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RunState {
    /// 실행 중 (`Up ...`)
    Running,
    /// 종료됨 (`Exited ...`)
    Stopped,
    /// 생성만 됨 (`Created`)
    Created,
    /// 컨테이너가 존재하지 않음
    Error,
}

impl RunState {
    /// 실행 중 여부
    pub fn is_running(self) -> bool {
        self == Self::Running
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Running => write!(f, "Running"),
            Self::Stopped => write!(f, "Stopped"),
            Self::Created => write!(f, "Created"),
            Self::Error => write!(f, "Error"),
        }
    }
}

/// 포트 또는 포트 범위
///
/// docker는 연속된 포트를 `8000-8001`처럼 범위로 표시합니다.
/// 단일 포트는 `start == end`입니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PortRange {
    pub start: u16,
    pub end: u16,
}

impl PortRange {
    pub fn single(port: u16) -> Self {
        Self {
            start: port,
            end: port,
        }
    }

    /// # Errors
    ///
    /// `start > end`이면 `ParseError::PortNumber`를 반환합니다.
    pub fn new(start: u16, end: u16) -> Result<Self, ParseError> {
        if start > end {
            return Err(ParseError::PortNumber {
                value: format!("{start}-{end}"),
                reason: "range start is greater than its end".to_owned(),
            });
        }
        Ok(Self { start, end })
    }

    pub fn is_single(&self) -> bool {
        self.start == self.end
    }
}

impl From<u16> for PortRange {
    fn from(port: u16) -> Self {
        Self::single(port)
    }
}

impl FromStr for PortRange {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let number = |text: &str| {
            text.trim().parse::<u16>().map_err(|_| ParseError::PortNumber {
                value: s.to_owned(),
                reason: "not a port number or port range".to_owned(),
            })
        };
        match s.split_once('-') {
            Some((start, end)) => Self::new(number(start)?, number(end)?),
            None => number(s).map(Self::single),
        }
    }
}

impl TryFrom<String> for PortRange {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PortRange> for String {
    fn from(range: PortRange) -> Self {
        range.to_string()
    }
}

impl fmt::Display for PortRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_single() {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

/// 컨테이너 포트 매핑
///
/// `0.0.0.0:8080->80/tcp` 형식에서는 `outer_port = 8080`, `inner_port = 80`.
/// 호스트에 공개되지 않은 `80/tcp` 형식은 `outer_port`가 `None`입니다.
/// 범위 형식(`0.0.0.0:8000-8001->8000-8001/tcp`)도 그대로 보존됩니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortMapping {
    /// 컨테이너 내부 포트
    pub inner_port: PortRange,
    /// 호스트 공개 포트
    pub outer_port: Option<PortRange>,
}

impl fmt::Display for PortMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.outer_port {
            Some(outer) => write!(f, "{outer}->{}", self.inner_port),
            None => write!(f, "{}", self.inner_port),
        }
    }
}

/// `docker ps -a` 테이블의 한 행
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerRecord {
    /// 컨테이너 ID (short form)
    pub id: String,
    /// 이미지 이름
    pub image: String,
    /// 실행 명령
    pub command: String,
    /// 생성 시점 (상대 시간 텍스트)
    pub created: String,
    /// 원본 상태 텍스트
    pub status: String,
    /// 공개 포트 (없을 수 있음)
    pub ports: Option<PortMapping>,
    /// 컨테이너 이름 — 논리 컴포넌트 ID와의 조인 키
    pub name: String,
    /// 상태 텍스트에서 파생된 실행 상태
    pub state: RunState,
}

impl fmt::Display for ContainerRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}) image={} state={}", self.name, self.id, self.image, self.state)
    }
}

/// 프로젝트 토폴로지 스냅샷
///
/// 외부 프로젝트 디스크립터에서 디코딩됩니다. 세 그룹 모두 `null`이거나
/// 생략될 수 있으며, 이 경우 아무 컴포넌트도 기여하지 않습니다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectTopology {
    /// 프로젝트 ID (디스크립터 저장소의 키로 채워질 수 있음)
    #[serde(default)]
    pub project_id: String,
    /// 프로젝트 이름 (체크아웃 디렉토리 이름)
    pub project_name: String,
    /// 백엔드 컴포넌트 (componentId -> 정의)
    #[serde(default)]
    pub backend_map: Option<BTreeMap<String, BackendComponent>>,
    /// 프론트엔드 컴포넌트
    #[serde(default)]
    pub frontend: Option<FrontendComponent>,
    /// 데이터베이스 컴포넌트 (componentId -> 정의)
    #[serde(default)]
    pub database_map: Option<BTreeMap<String, DatabaseComponent>>,
}

/// 백엔드 컴포넌트 정의
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackendComponent {
    /// 프로젝트 체크아웃 기준 상대 경로
    pub path: String,
    /// 프레임워크 라벨 (예: `SpringBoot(gradle)`)
    pub framework: String,
}

/// 프론트엔드 컴포넌트 정의
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrontendComponent {
    /// 컴포넌트 ID (= 컨테이너 이름)
    pub service_id: String,
    /// 프로젝트 체크아웃 기준 상대 경로
    pub path: String,
    /// 프레임워크 라벨 (예: `React`)
    pub framework: String,
}

/// 데이터베이스 컴포넌트 정의
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseComponent {
    /// 데이터베이스 종류 라벨 (예: `Mysql`)
    pub database_type: String,
}

/// 안전 게이트에 참여하는 백엔드 종류
///
/// 선언 순서가 차단 메시지의 나열 순서입니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BackendKind {
    SpringBootGradle,
    SpringBootMaven,
    Django,
}

impl BackendKind {
    /// 모든 종류 (고정 순서)
    pub const ALL: [Self; 3] = [Self::SpringBootGradle, Self::SpringBootMaven, Self::Django];

    /// 디스크립터 라벨
    pub fn label(self) -> &'static str {
        match self {
            Self::SpringBootGradle => "SpringBoot(gradle)",
            Self::SpringBootMaven => "SpringBoot(maven)",
            Self::Django => "Django",
        }
    }

    /// 디스크립터 라벨에서 종류를 찾습니다. 알 수 없는 라벨은 `None`.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.label() == label)
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 안전 게이트에 참여하는 데이터베이스 종류
///
/// 선언 순서가 차단 메시지의 나열 순서입니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DatabaseKind {
    Mysql,
    Redis,
    Mongodb,
}

impl DatabaseKind {
    /// 모든 종류 (고정 순서)
    pub const ALL: [Self; 3] = [Self::Mysql, Self::Redis, Self::Mongodb];

    /// 디스크립터 라벨
    pub fn label(self) -> &'static str {
        match self {
            Self::Mysql => "Mysql",
            Self::Redis => "Redis",
            Self::Mongodb => "Mongodb",
        }
    }

    /// 디스크립터 라벨에서 종류를 찾습니다. 알 수 없는 라벨은 `None`.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.label() == label)
    }
}

impl fmt::Display for DatabaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 프로젝트 전체 실행 상태 집계
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AggregateStatus {
    Run,
    Stop,
}

impl fmt::Display for AggregateStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Run => write!(f, "Run"),
            Self::Stop => write!(f, "Stop"),
        }
    }
}

/// 프로젝트 조정 결과
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciliationResult {
    /// 대상 프로젝트 ID
    pub project_id: String,
    /// 컴포넌트별 실행 상태
    pub states: BTreeMap<String, RunState>,
    /// 집계 상태
    pub all_running: AggregateStatus,
}

/// 시작/중지 안전 게이트 판정
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum SafetyVerdict {
    /// 전이 허용
    Pass,
    /// 전이 차단
    Fail {
        /// 차단 요인 라벨 (고정 카테고리 순서)
        blockers: Vec<String>,
        /// 사람이 읽을 수 있는 메시지
        message: String,
    },
}

impl SafetyVerdict {
    /// 전이가 허용되는지 여부
    pub fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }
}

impl fmt::Display for SafetyVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pass => write!(f, "pass"),
            Self::Fail { message, .. } => f.write_str(message),
        }
    }
}

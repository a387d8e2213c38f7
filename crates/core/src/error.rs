//! 에러 타입 — 도메인별 에러 정의
//!
//! 각 라이브러리 크레이트는 자체 에러 enum을 가지며,
//! `From<...> for ShipyardError` 변환을 통해 상위 레이어로 전파됩니다.

/// Shipyard 최상위 에러 타입
#[derive(Debug, thiserror::Error)]
pub enum ShipyardError {
    /// 설정 관련 에러
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// 외부 명령 실행 에러
    #[error("command error: {0}")]
    Command(#[from] CommandFailure),

    /// Dockerfile 생성 / 빌드 사전조건 에러
    #[error("build error: {0}")]
    Build(#[from] BuildError),

    /// 컨테이너 테이블 파싱 에러
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// 프로젝트 토폴로지 해석 에러
    #[error("topology error: {0}")]
    Topology(String),

    /// I/O 에러
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// 설정 관련 에러
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// 설정 파일을 찾을 수 없음
    #[error("config file not found: {path}")]
    FileNotFound { path: String },

    /// 설정 파싱 실패
    #[error("failed to parse config: {reason}")]
    ParseFailed { reason: String },

    /// 유효하지 않은 설정 값
    #[error("invalid config value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

/// 외부 명령 실패
///
/// 진단을 위해 실패 시점까지 캡처된 출력을 함께 보관합니다.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct CommandFailure {
    /// 사람이 읽을 수 있는 실패 사유
    pub message: String,
    /// 캡처된 프로세스 출력
    pub output: String,
}

/// 빌드 사전조건 / Dockerfile 생성 에러
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// 프레임워크가 요구하는 빌드 디스크립터가 없음
    #[error("{descriptor} not found in {path}")]
    DescriptorNotFound { descriptor: String, path: String },

    /// 대상 디렉토리를 나열할 수 없음
    #[error("path does not exist: {path}")]
    PathNotExist { path: String },

    /// 백엔드/프론트엔드 Dockerfile 생성 실패
    #[error("{stage} build failed: {reason}")]
    Failed { stage: String, reason: String },
}

/// 파싱 에러
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// 포트 컬럼 형식 오류
    #[error("invalid port mapping '{value}': {reason}")]
    PortNumber { value: String, reason: String },

    /// 라인 구조 오류
    #[error("line {line}: {reason}")]
    LineParts { line: usize, reason: String },

    /// 알 수 없는 상태 문자열
    #[error("unrecognized container status '{status}'")]
    UnknownStatus { status: String },
}

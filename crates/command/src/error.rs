//! 명령 실행 에러 타입
//!
//! [`CommandError`]는 외부 프로세스 실행과 라이프사이클 명령에서 발생하는 모든 에러를 표현합니다.
//! 비정상 종료 시에는 캡처된 출력이 항상 함께 전달됩니다.

use shipyard_core::error::{CommandFailure, ShipyardError};

use crate::lifecycle::LifecycleOp;

/// 명령 실행 도메인 에러
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// 프로세스를 시작할 수 없음 (실행 파일 없음, 권한 없음 등)
    #[error("failed to spawn '{program}': {source}")]
    Spawn {
        /// 실행 파일
        program: String,
        /// 원인 I/O 에러
        #[source]
        source: std::io::Error,
    },

    /// 프로세스가 0이 아닌 코드로 종료됨
    #[error("`{command}` failed ({})", describe_exit(.code))]
    Failed {
        /// 표시용 명령 문자열 (비밀 인자는 가려짐)
        command: String,
        /// 종료 코드 (시그널 종료 시 `None`)
        code: Option<i32>,
        /// 캡처된 출력 (stdout 다음 stderr)
        output: String,
    },

    /// 작업 디렉토리가 존재하지 않음
    #[error("working directory does not exist: {0}")]
    WorkingDir(String),

    /// 잘못된 인자
    #[error("invalid {field}: {reason}")]
    InvalidArgument {
        /// 인자 이름
        field: String,
        /// 거부 사유
        reason: String,
    },

    /// 라이프사이클 명령 실패
    #[error("{operation} failed: {source}")]
    Operation {
        /// 실패한 라이프사이클 단계
        operation: LifecycleOp,
        /// 원인 에러
        #[source]
        source: Box<CommandError>,
    },
}

impl CommandError {
    /// 실패 시점까지 캡처된 출력을 반환합니다.
    pub fn output(&self) -> Option<&str> {
        match self {
            Self::Failed { output, .. } => Some(output),
            Self::Operation { source, .. } => source.output(),
            _ => None,
        }
    }

    /// 라이프사이클 단계 정보를 덧붙입니다.
    pub fn during(self, operation: LifecycleOp) -> Self {
        Self::Operation {
            operation,
            source: Box::new(self),
        }
    }
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => "terminated by signal".to_owned(),
    }
}

impl From<CommandError> for ShipyardError {
    fn from(err: CommandError) -> Self {
        let output = err.output().unwrap_or_default().to_owned();
        ShipyardError::Command(CommandFailure {
            message: err.to_string(),
            output,
        })
    }
}

//! 조정기 에러 타입
//!
//! [`ReconcilerError`]는 컨테이너 테이블 파싱, 토폴로지 해석, 명령 실행에서 발생하는 에러를 표현합니다.
//! `From<ReconcilerError> for ShipyardError` 변환이 구현되어 있어
//! 상위 레이어에서 `?` 연산자로 자연스럽게 전파할 수 있습니다.

use shipyard_command::CommandError;
use shipyard_core::error::{ConfigError, ParseError, ShipyardError};

/// 조정기 도메인 에러
///
/// 파싱 에러는 배치 전체에 대해 치명적입니다. 부분적으로 채워진 결과는 반환되지 않습니다.
#[derive(Debug, thiserror::Error)]
pub enum ReconcilerError {
    /// 포트 컬럼 형식 오류
    #[error("invalid port mapping '{value}': {reason}")]
    PortNumber {
        /// 원본 포트 셀
        value: String,
        /// 실패 사유
        reason: String,
    },

    /// 라인을 기대한 컬럼 구조로 분해할 수 없음
    #[error("line {line}: expected 6 or 7 columns, found {fields}: '{content}'")]
    LineParts {
        /// 1부터 시작하는 라인 번호 (헤더 포함)
        line: usize,
        /// 분리된 필드 수
        fields: usize,
        /// 원본 라인
        content: String,
    },

    /// 알 수 없는 상태 문자열
    #[error("unrecognized status '{status}' for container '{container}'")]
    UnknownStatus {
        /// 원본 상태 셀
        status: String,
        /// 컨테이너 이름
        container: String,
    },

    /// 프로젝트 토폴로지를 읽거나 해석할 수 없음
    #[error("cannot resolve topology of project '{project_id}': {reason}")]
    TopologyResolution {
        /// 대상 프로젝트 ID
        project_id: String,
        /// 실패 사유
        reason: String,
    },

    /// 외부 명령 실패
    #[error(transparent)]
    Command(#[from] CommandError),

    /// 설정 에러
    #[error("config error: {field}: {reason}")]
    Config {
        /// 설정 필드명
        field: String,
        /// 에러 사유
        reason: String,
    },
}

impl ReconcilerError {
    pub(crate) fn topology(project_id: &str, reason: impl Into<String>) -> Self {
        Self::TopologyResolution {
            project_id: project_id.to_owned(),
            reason: reason.into(),
        }
    }
}

impl From<ReconcilerError> for ShipyardError {
    fn from(err: ReconcilerError) -> Self {
        let message = err.to_string();
        match err {
            ReconcilerError::PortNumber { value, reason } => {
                ShipyardError::Parse(ParseError::PortNumber { value, reason })
            }
            ReconcilerError::LineParts { line, .. } => ShipyardError::Parse(ParseError::LineParts {
                line,
                reason: message,
            }),
            ReconcilerError::UnknownStatus { status, .. } => {
                ShipyardError::Parse(ParseError::UnknownStatus { status })
            }
            ReconcilerError::TopologyResolution { .. } => ShipyardError::Topology(message),
            ReconcilerError::Command(e) => e.into(),
            ReconcilerError::Config { field, reason } => {
                ShipyardError::Config(ConfigError::InvalidValue { field, reason })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_parts_display_includes_content() {
        let err = ReconcilerError::LineParts {
            line: 3,
            fields: 4,
            content: "abc  nginx  x  y".to_owned(),
        };
        let msg = err.to_string();
        assert!(msg.starts_with("line 3"));
        assert!(msg.contains("found 4"));
    }

    #[test]
    fn parse_errors_map_to_parse_kind() {
        let err: ShipyardError = ReconcilerError::UnknownStatus {
            status: "Paused".to_owned(),
            container: "web".to_owned(),
        }
        .into();
        assert!(matches!(
            err,
            ShipyardError::Parse(ParseError::UnknownStatus { ref status }) if status == "Paused"
        ));

        let err: ShipyardError = ReconcilerError::PortNumber {
            value: "abc".to_owned(),
            reason: "no separator".to_owned(),
        }
        .into();
        assert!(matches!(err, ShipyardError::Parse(ParseError::PortNumber { .. })));
    }

    #[test]
    fn topology_maps_to_topology_kind() {
        let err: ShipyardError = ReconcilerError::topology("p1", "project not found").into();
        match err {
            ShipyardError::Topology(msg) => {
                assert!(msg.contains("p1"));
                assert!(msg.contains("project not found"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn command_failure_keeps_output() {
        let err: ShipyardError = ReconcilerError::from(CommandError::Failed {
            command: "docker ps -a".to_owned(),
            code: Some(1),
            output: "Cannot connect to the Docker daemon".to_owned(),
        })
        .into();
        match err {
            ShipyardError::Command(failure) => {
                assert!(failure.output.contains("Docker daemon"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}

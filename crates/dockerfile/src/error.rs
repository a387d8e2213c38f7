//! Dockerfile 생성 에러 타입
//!
//! [`DockerfileError`]는 사전조건 검사, 템플릿 생성, 파일 쓰기에서 발생하는 에러를 나타냅니다.
//! `From<DockerfileError> for ShipyardError` 구현을 통해 `?` 연산자로 상위 에러 타입으로 전파됩니다.
//!
//! # 에러 카테고리
//!
//! - **사전조건**: `DescriptorNotFound`, `PathNotExist`
//! - **템플릿 입력**: `MissingOption`, `InvalidVersion`, `UnknownFramework`
//! - **파일 쓰기**: `BuildFailed`
//! - **설정**: `Config`

use shipyard_core::error::{BuildError, ConfigError, ShipyardError};

use crate::framework::{BuildStage, Framework};

/// Dockerfile 생성 도메인 에러
#[derive(Debug, thiserror::Error)]
pub enum DockerfileError {
    /// 프레임워크가 요구하는 빌드 디스크립터가 대상 디렉토리에 없음
    #[error("{descriptor} not found in {path} (required by {framework})")]
    DescriptorNotFound {
        /// 대상 프레임워크
        framework: Framework,
        /// 필요한 파일 이름
        descriptor: &'static str,
        /// 검사한 디렉토리
        path: String,
    },

    /// 대상 디렉토리를 나열할 수 없음 (없음 또는 디렉토리 아님)
    #[error("path does not exist or is not a directory: {path}")]
    PathNotExist {
        /// 검사한 경로
        path: String,
    },

    /// 템플릿에 필요한 옵션이 없음
    #[error("{framework} requires the '{option}' option")]
    MissingOption {
        /// 대상 프레임워크
        framework: Framework,
        /// 누락된 옵션 이름
        option: &'static str,
    },

    /// 베이스 이미지 태그로 사용할 수 없는 버전 문자열
    #[error("invalid image version '{version}'")]
    InvalidVersion {
        /// 입력된 버전
        version: String,
    },

    /// 지원하지 않는 프레임워크 태그
    #[error("unknown framework '{0}'")]
    UnknownFramework(String),

    /// Dockerfile 쓰기 실패
    #[error("{stage} build failed: {reason}")]
    BuildFailed {
        /// 백엔드 / 프론트엔드
        stage: BuildStage,
        /// 실패 사유
        reason: String,
    },

    /// 설정 에러
    #[error("config error: {field}: {reason}")]
    Config {
        /// 설정 필드명
        field: String,
        /// 에러 사유
        reason: String,
    },
}

impl From<DockerfileError> for ShipyardError {
    fn from(err: DockerfileError) -> Self {
        let message = err.to_string();
        match err {
            DockerfileError::DescriptorNotFound {
                descriptor, path, ..
            } => ShipyardError::Build(BuildError::DescriptorNotFound {
                descriptor: descriptor.to_owned(),
                path,
            }),
            DockerfileError::PathNotExist { path } => {
                ShipyardError::Build(BuildError::PathNotExist { path })
            }
            DockerfileError::BuildFailed { stage, reason } => {
                ShipyardError::Build(BuildError::Failed {
                    stage: stage.to_string(),
                    reason,
                })
            }
            DockerfileError::MissingOption { framework, .. } => {
                ShipyardError::Build(BuildError::Failed {
                    stage: framework.stage().to_string(),
                    reason: message,
                })
            }
            DockerfileError::InvalidVersion { version } => {
                ShipyardError::Config(ConfigError::InvalidValue {
                    field: "version".to_owned(),
                    reason: format!("'{version}' cannot be used as an image tag"),
                })
            }
            DockerfileError::UnknownFramework(tag) => {
                ShipyardError::Config(ConfigError::InvalidValue {
                    field: "framework".to_owned(),
                    reason: format!("unknown framework '{tag}'"),
                })
            }
            DockerfileError::Config { field, reason } => {
                ShipyardError::Config(ConfigError::InvalidValue { field, reason })
            }
        }
    }
}

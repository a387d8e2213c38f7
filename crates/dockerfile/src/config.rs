//! Dockerfile 생성기 설정
//!
//! [`DockerfileConfig`]는 core의 [`CommandConfig`](shipyard_core::config::CommandConfig)에서
//! 프로젝트 체크아웃 루트를 가져옵니다.

use std::path::{Path, PathBuf};

use shipyard_core::config::ShipyardConfig;

use crate::error::DockerfileError;

/// 기본 Dockerfile 이름
pub const DEFAULT_FILE_NAME: &str = "Dockerfile";

/// Dockerfile 생성기 설정
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DockerfileConfig {
    /// 프로젝트 체크아웃이 위치하는 루트 디렉토리
    pub workspace_root: PathBuf,
    /// 생성할 파일 이름
    pub file_name: String,
}

impl Default for DockerfileConfig {
    fn default() -> Self {
        Self::from_core(&ShipyardConfig::default())
    }
}

impl DockerfileConfig {
    /// core 설정에서 생성기 설정을 생성합니다.
    pub fn from_core(core: &ShipyardConfig) -> Self {
        Self {
            workspace_root: PathBuf::from(&core.command.workspace_root),
            file_name: DEFAULT_FILE_NAME.to_owned(),
        }
    }

    /// 설정값의 유효성을 검증합니다.
    pub fn validate(&self) -> Result<(), DockerfileError> {
        if self.workspace_root.as_os_str().is_empty() {
            return Err(DockerfileError::Config {
                field: "workspace_root".to_owned(),
                reason: "must not be empty".to_owned(),
            });
        }
        if self.file_name.is_empty() || self.file_name.contains('/') {
            return Err(DockerfileError::Config {
                field: "file_name".to_owned(),
                reason: format!("'{}' is not a plain file name", self.file_name),
            });
        }
        Ok(())
    }

    /// `<workspace_root>/<project_name>/<service_path>` 를 반환합니다.
    ///
    /// 디스크립터의 서비스 경로는 `/api` 처럼 선행 슬래시를 가질 수 있습니다.
    pub fn service_dir(&self, project_name: &str, service_path: &str) -> PathBuf {
        let relative = Path::new(service_path.trim_start_matches('/'));
        self.workspace_root.join(project_name).join(relative)
    }
}

/// 생성기 설정 빌더
#[derive(Default)]
pub struct DockerfileConfigBuilder {
    config: DockerfileConfig,
}

impl DockerfileConfigBuilder {
    /// 새 빌더를 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 체크아웃 루트를 설정합니다.
    pub fn workspace_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.config.workspace_root = root.into();
        self
    }

    /// 파일 이름을 설정합니다.
    pub fn file_name(mut self, name: impl Into<String>) -> Self {
        self.config.file_name = name.into();
        self
    }

    /// 설정을 검증하고 빌드합니다.
    pub fn build(self) -> Result<DockerfileConfig, DockerfileError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_core_uses_workspace_root() {
        let mut core = ShipyardConfig::default();
        core.command.workspace_root = "/srv/projects".to_owned();
        let config = DockerfileConfig::from_core(&core);
        assert_eq!(config.workspace_root, PathBuf::from("/srv/projects"));
        assert_eq!(config.file_name, "Dockerfile");
    }

    #[test]
    fn service_dir_strips_leading_slash() {
        let config = DockerfileConfigBuilder::new()
            .workspace_root("/srv/projects")
            .build()
            .unwrap();
        assert_eq!(
            config.service_dir("shop", "/backend/api"),
            PathBuf::from("/srv/projects/shop/backend/api")
        );
        assert_eq!(
            config.service_dir("shop", "frontend"),
            PathBuf::from("/srv/projects/shop/frontend")
        );
    }

    #[test]
    fn rejects_nested_file_name() {
        let err = DockerfileConfigBuilder::new()
            .file_name("docker/Dockerfile")
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("file_name"));
    }

    #[test]
    fn rejects_empty_root() {
        assert!(DockerfileConfigBuilder::new().workspace_root("").build().is_err());
    }
}

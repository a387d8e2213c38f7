//! 조정기 설정
//!
//! [`ReconcilerConfig`]는 core의 [`TopologyConfig`](shipyard_core::config::TopologyConfig)를
//! 기반으로 토폴로지 공급원을 결정합니다.
//!
//! # 사용 예시
//! ```ignore
//! use shipyard_core::config::ShipyardConfig;
//! use shipyard_reconciler::config::ReconcilerConfig;
//!
//! let core_config = ShipyardConfig::default();
//! let config = ReconcilerConfig::from_core(&core_config);
//! ```

use std::fmt;
use std::str::FromStr;

use shipyard_command::{CommandRunner, Lifecycle};
use shipyard_core::config::ShipyardConfig;

use crate::error::ReconcilerError;
use crate::topology::{ContainerTopologySource, FileTopologySource, TopologySource};

/// 프로젝트 저장소 문서 위치
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// 로컬 파일
    File,
    /// 컨테이너 내부 파일 (`docker exec ... cat`)
    Container,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File => write!(f, "file"),
            Self::Container => write!(f, "container"),
        }
    }
}

impl FromStr for SourceKind {
    type Err = ReconcilerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "file" => Ok(Self::File),
            "container" => Ok(Self::Container),
            other => Err(ReconcilerError::Config {
                field: "source".to_owned(),
                reason: format!("unknown topology source '{other}' (expected file or container)"),
            }),
        }
    }
}

/// 조정기 설정
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcilerConfig {
    /// 저장소 문서 위치
    pub source: SourceKind,
    /// 저장소 문서 경로 (호스트 또는 컨테이너 내부)
    pub descriptor_path: String,
    /// `source = container` 일 때 문서를 읽을 컨테이너
    pub descriptor_container: String,
}

impl Default for ReconcilerConfig {
    fn default() -> Self {
        Self {
            source: SourceKind::File,
            descriptor_path: "/var/lib/shipyard/projects.json".to_owned(),
            descriptor_container: String::new(),
        }
    }
}

impl ReconcilerConfig {
    /// core 설정에서 조정기 설정을 생성합니다.
    ///
    /// core 설정은 이미 검증되었다고 가정하며, 알 수 없는 공급원은 에러입니다.
    pub fn from_core(core: &ShipyardConfig) -> Result<Self, ReconcilerError> {
        let config = Self {
            source: core.topology.source.parse()?,
            descriptor_path: core.topology.descriptor_path.clone(),
            descriptor_container: core.topology.descriptor_container.clone(),
        };
        config.validate()?;
        Ok(config)
    }

    /// 설정값의 유효성을 검증합니다.
    pub fn validate(&self) -> Result<(), ReconcilerError> {
        if self.descriptor_path.trim().is_empty() {
            return Err(ReconcilerError::Config {
                field: "descriptor_path".to_owned(),
                reason: "must not be empty".to_owned(),
            });
        }
        if self.source == SourceKind::Container && self.descriptor_container.trim().is_empty() {
            return Err(ReconcilerError::Config {
                field: "descriptor_container".to_owned(),
                reason: "must be set when source is container".to_owned(),
            });
        }
        Ok(())
    }

    /// 설정에 맞는 토폴로지 공급원을 생성합니다.
    pub fn topology_source<R>(&self, lifecycle: Lifecycle<R>) -> Box<dyn TopologySource>
    where
        R: CommandRunner + 'static,
    {
        match self.source {
            SourceKind::File => Box::new(FileTopologySource::new(&self.descriptor_path)),
            SourceKind::Container => Box::new(ContainerTopologySource::new(
                lifecycle,
                &self.descriptor_container,
                &self.descriptor_path,
            )),
        }
    }
}

/// 조정기 설정 빌더
#[derive(Default)]
pub struct ReconcilerConfigBuilder {
    config: ReconcilerConfig,
}

impl ReconcilerConfigBuilder {
    /// 새 빌더를 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 저장소 문서 위치를 설정합니다.
    pub fn source(mut self, source: SourceKind) -> Self {
        self.config.source = source;
        self
    }

    /// 저장소 문서 경로를 설정합니다.
    pub fn descriptor_path(mut self, path: impl Into<String>) -> Self {
        self.config.descriptor_path = path.into();
        self
    }

    /// 문서를 읽을 컨테이너를 설정합니다.
    pub fn descriptor_container(mut self, container: impl Into<String>) -> Self {
        self.config.descriptor_container = container.into();
        self
    }

    /// 설정을 검증하고 빌드합니다.
    pub fn build(self) -> Result<ReconcilerConfig, ReconcilerError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

//! 프로젝트 토폴로지 해석
//!
//! 프로젝트 저장소 문서는 프로젝트 ID를 키로 하는 JSON 객체입니다.
//! 각 값은 [`ProjectTopology`] 스냅샷이며 매 호출마다 새로 읽습니다.
//!
//! ```text
//! {
//!   "42": {
//!     "projectName": "shop",
//!     "backendMap":  { "api": { "path": "/api", "framework": "SpringBoot(gradle)" } },
//!     "frontend":    { "serviceId": "web", "path": "/web", "framework": "React" },
//!     "databaseMap": { "db": { "databaseType": "Mysql" } }
//!   }
//! }
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use shipyard_command::{CommandRunner, Lifecycle};
use shipyard_core::types::{BackendKind, DatabaseKind, ProjectTopology};
use tracing::{debug, warn};

use crate::error::ReconcilerError;

/// 게이트에 참여하지 않지만 알려진 백엔드 라벨
const KNOWN_UNGATED_BACKENDS: &[&str] = &["FastAPI"];

/// 프로젝트 디스크립터 공급원
pub trait TopologySource: Send + Sync {
    /// 프로젝트 토폴로지를 새로 읽어 디코딩합니다.
    fn load(&self, project_id: &str) -> Result<ProjectTopology, ReconcilerError>;
}

impl<T: TopologySource + ?Sized> TopologySource for Box<T> {
    fn load(&self, project_id: &str) -> Result<ProjectTopology, ReconcilerError> {
        (**self).load(project_id)
    }
}

impl<T: TopologySource + ?Sized> TopologySource for std::sync::Arc<T> {
    fn load(&self, project_id: &str) -> Result<ProjectTopology, ReconcilerError> {
        (**self).load(project_id)
    }
}

/// 저장소 문서에서 한 프로젝트를 꺼내 디코딩합니다.
///
/// 다른 프로젝트 항목의 형식 오류는 영향을 주지 않습니다.
pub fn decode_project(document: &str, project_id: &str) -> Result<ProjectTopology, ReconcilerError> {
    let mut store: Map<String, Value> = serde_json::from_str(document)
        .map_err(|e| ReconcilerError::topology(project_id, format!("invalid store document: {e}")))?;

    let entry = store
        .remove(project_id)
        .ok_or_else(|| ReconcilerError::topology(project_id, "project not found"))?;

    let mut topology: ProjectTopology = serde_json::from_value(entry)
        .map_err(|e| ReconcilerError::topology(project_id, format!("invalid descriptor: {e}")))?;
    topology.project_id = project_id.to_owned();
    Ok(topology)
}

/// 로컬 파일에서 저장소 문서를 읽습니다.
#[derive(Debug, Clone)]
pub struct FileTopologySource {
    path: PathBuf,
}

impl FileTopologySource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TopologySource for FileTopologySource {
    fn load(&self, project_id: &str) -> Result<ProjectTopology, ReconcilerError> {
        let document = std::fs::read_to_string(&self.path).map_err(|e| {
            ReconcilerError::topology(
                project_id,
                format!("cannot read {}: {e}", self.path.display()),
            )
        })?;
        debug!(path = %self.path.display(), project_id, "loaded project store");
        decode_project(&document, project_id)
    }
}

/// 컨테이너 안의 파일을 `docker exec <container> cat <path>` 로 읽습니다.
pub struct ContainerTopologySource<R: CommandRunner> {
    lifecycle: Lifecycle<R>,
    container: String,
    path: String,
}

impl<R: CommandRunner> ContainerTopologySource<R> {
    pub fn new(lifecycle: Lifecycle<R>, container: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            lifecycle,
            container: container.into(),
            path: path.into(),
        }
    }
}

impl<R: CommandRunner> TopologySource for ContainerTopologySource<R> {
    fn load(&self, project_id: &str) -> Result<ProjectTopology, ReconcilerError> {
        let document = self
            .lifecycle
            .read_file_in_container(&self.container, &self.path)
            .map_err(|e| ReconcilerError::topology(project_id, e.to_string()))?;
        debug!(container = %self.container, path = %self.path, project_id, "loaded project store");
        decode_project(&document, project_id)
    }
}

/// 컴포넌트 그룹
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ComponentRole {
    Backend,
    Frontend,
    Database,
}

/// 해석된 컴포넌트 (ID = 기대 컨테이너 이름)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    pub id: String,
    pub role: ComponentRole,
    /// 프레임워크 또는 데이터베이스 종류 라벨
    pub label: String,
}

/// 평탄화된 프로젝트 토폴로지
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedTopology {
    pub project_id: String,
    /// 백엔드, 프론트엔드, 데이터베이스 순서
    pub components: Vec<Component>,
}

impl ResolvedTopology {
    /// 전체 컴포넌트 ID 집합
    pub fn component_ids(&self) -> BTreeSet<&str> {
        self.components.iter().map(|c| c.id.as_str()).collect()
    }

    /// `componentId -> 라벨` 맵
    pub fn labels(&self) -> BTreeMap<&str, &str> {
        self.components
            .iter()
            .map(|c| (c.id.as_str(), c.label.as_str()))
            .collect()
    }

    pub fn label_of(&self, id: &str) -> Option<&str> {
        self.components
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.label.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// 게이트에 참여하는 데이터베이스 컴포넌트
    pub fn databases(&self) -> impl Iterator<Item = (&str, DatabaseKind)> {
        self.components
            .iter()
            .filter(|c| c.role == ComponentRole::Database)
            .filter_map(|c| DatabaseKind::from_label(&c.label).map(|k| (c.id.as_str(), k)))
    }

    /// 게이트에 참여하는 백엔드 컴포넌트
    pub fn backends(&self) -> impl Iterator<Item = (&str, BackendKind)> {
        self.components
            .iter()
            .filter(|c| c.role == ComponentRole::Backend)
            .filter_map(|c| BackendKind::from_label(&c.label).map(|k| (c.id.as_str(), k)))
    }
}

/// 토폴로지를 하나의 컴포넌트 목록으로 평탄화합니다.
///
/// `null` 그룹은 아무것도 기여하지 않습니다.
///
/// # Errors
///
/// - 빈 컴포넌트 ID 또는 빈 라벨
/// - 그룹 간 중복 컴포넌트 ID
pub fn resolve(topology: &ProjectTopology) -> Result<ResolvedTopology, ReconcilerError> {
    let project_id = topology.project_id.as_str();
    let mut components = Vec::new();

    for (id, backend) in topology.backend_map.iter().flatten() {
        if BackendKind::from_label(&backend.framework).is_none()
            && !KNOWN_UNGATED_BACKENDS.contains(&backend.framework.as_str())
        {
            warn!(project_id, component = %id, label = %backend.framework, "unknown backend framework, ignored by safety gates");
        }
        components.push(Component {
            id: id.clone(),
            role: ComponentRole::Backend,
            label: backend.framework.clone(),
        });
    }

    if let Some(frontend) = &topology.frontend {
        components.push(Component {
            id: frontend.service_id.clone(),
            role: ComponentRole::Frontend,
            label: frontend.framework.clone(),
        });
    }

    for (id, database) in topology.database_map.iter().flatten() {
        if DatabaseKind::from_label(&database.database_type).is_none() {
            warn!(project_id, component = %id, label = %database.database_type, "unknown database type, ignored by safety gates");
        }
        components.push(Component {
            id: id.clone(),
            role: ComponentRole::Database,
            label: database.database_type.clone(),
        });
    }

    let mut seen = BTreeSet::new();
    for component in &components {
        if component.id.trim().is_empty() {
            return Err(ReconcilerError::topology(
                project_id,
                format!("{:?} component with empty id", component.role),
            ));
        }
        if component.label.trim().is_empty() {
            return Err(ReconcilerError::topology(
                project_id,
                format!("component '{}' has no framework or database type", component.id),
            ));
        }
        if !seen.insert(component.id.as_str()) {
            return Err(ReconcilerError::topology(
                project_id,
                format!("component id '{}' is declared more than once", component.id),
            ));
        }
    }

    Ok(ResolvedTopology {
        project_id: project_id.to_owned(),
        components,
    })
}

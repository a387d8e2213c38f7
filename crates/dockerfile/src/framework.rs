//! 프레임워크 태그와 템플릿 옵션
//!
//! 각 [`Framework`]는 빌드 디스크립터 파일, 빌드 단계(백엔드/프론트엔드),
//! 기존 Dockerfile 선삭제 여부를 결정합니다.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DockerfileError;

/// 지원하는 프레임워크
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Framework {
    /// Spring Boot + Gradle wrapper
    GradleBackend,
    /// Spring Boot + Maven
    MavenBackend,
    /// React (npm)
    ReactFrontend,
    /// Vue (npm)
    VueFrontend,
    /// FastAPI (pip)
    FastapiBackend,
    /// Django (pip)
    DjangoBackend,
}

impl Framework {
    /// 모든 프레임워크
    pub const ALL: [Self; 6] = [
        Self::GradleBackend,
        Self::MavenBackend,
        Self::ReactFrontend,
        Self::VueFrontend,
        Self::FastapiBackend,
        Self::DjangoBackend,
    ];

    /// 프레임워크 태그
    pub fn tag(self) -> &'static str {
        match self {
            Self::GradleBackend => "gradle-backend",
            Self::MavenBackend => "maven-backend",
            Self::ReactFrontend => "react-frontend",
            Self::VueFrontend => "vue-frontend",
            Self::FastapiBackend => "fastapi-backend",
            Self::DjangoBackend => "django-backend",
        }
    }

    /// 대상 디렉토리에 있어야 하는 빌드 디스크립터.
    ///
    /// Django는 디스크립터를 요구하지 않습니다.
    pub fn descriptor(self) -> Option<&'static str> {
        match self {
            Self::GradleBackend => Some("build.gradle"),
            Self::MavenBackend => Some("pom.xml"),
            Self::ReactFrontend | Self::VueFrontend => Some("package.json"),
            Self::FastapiBackend => Some("requirements.txt"),
            Self::DjangoBackend => None,
        }
    }

    /// 빌드 단계
    pub fn stage(self) -> BuildStage {
        match self {
            Self::ReactFrontend | Self::VueFrontend => BuildStage::Frontend,
            _ => BuildStage::Backend,
        }
    }

    /// 쓰기 전에 기존 Dockerfile을 삭제하는지 여부.
    ///
    /// fastapi/django 경로는 삭제하지 않습니다.
    pub fn deletes_existing(self) -> bool {
        !matches!(self, Self::FastapiBackend | Self::DjangoBackend)
    }
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Framework {
    type Err = DockerfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|fw| fw.tag() == s)
            .ok_or_else(|| DockerfileError::UnknownFramework(s.to_owned()))
    }
}

/// 빌드 단계 (에러 분류용)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildStage {
    Backend,
    Frontend,
}

impl fmt::Display for BuildStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Backend => write!(f, "backend"),
            Self::Frontend => write!(f, "frontend"),
        }
    }
}

/// 템플릿 옵션
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DockerfileOptions {
    /// React: Nginx 서빙 스테이지 사용 여부
    pub use_nginx: bool,
    /// Vue: http-server 포트 (필수), Django: 노출/바인딩 포트 (필수)
    pub port: Option<u16>,
}

impl DockerfileOptions {
    pub fn with_nginx(mut self, use_nginx: bool) -> Self {
        self.use_nginx = use_nginx;
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_round_trip_through_from_str() {
        for fw in Framework::ALL {
            assert_eq!(fw.tag().parse::<Framework>().unwrap(), fw);
        }
    }

    #[test]
    fn unknown_tag_is_rejected() {
        let err = "rails-backend".parse::<Framework>().unwrap_err();
        assert!(matches!(err, DockerfileError::UnknownFramework(tag) if tag == "rails-backend"));
        assert!("Gradle-Backend".parse::<Framework>().is_err());
    }

    #[test]
    fn descriptors() {
        assert_eq!(Framework::GradleBackend.descriptor(), Some("build.gradle"));
        assert_eq!(Framework::MavenBackend.descriptor(), Some("pom.xml"));
        assert_eq!(Framework::ReactFrontend.descriptor(), Some("package.json"));
        assert_eq!(Framework::VueFrontend.descriptor(), Some("package.json"));
        assert_eq!(Framework::FastapiBackend.descriptor(), Some("requirements.txt"));
        assert_eq!(Framework::DjangoBackend.descriptor(), None);
    }

    #[test]
    fn pre_delete_applies_to_jvm_and_node_only() {
        let deleting: Vec<_> = Framework::ALL
            .into_iter()
            .filter(|fw| fw.deletes_existing())
            .collect();
        assert_eq!(
            deleting,
            [
                Framework::GradleBackend,
                Framework::MavenBackend,
                Framework::ReactFrontend,
                Framework::VueFrontend
            ]
        );
    }

    #[test]
    fn stages() {
        assert_eq!(Framework::ReactFrontend.stage(), BuildStage::Frontend);
        assert_eq!(Framework::DjangoBackend.stage(), BuildStage::Backend);
    }
}

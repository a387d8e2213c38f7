//! Dockerfile 생성기 -- 템플릿, 사전조건 검사, 파일 쓰기를 묶는 오케스트레이터
//!
//! # 처리 순서
//!
//! 1. 템플릿 렌더링 (입력 검증 포함)
//! 2. 빌드 디스크립터 사전조건 검사
//! 3. 기존 Dockerfile 삭제 (gradle/maven/react/vue 만)
//! 4. 파일 쓰기. 실패는 단계별 `BuildFailed` 로 보고됩니다.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::DockerfileConfig;
use crate::error::DockerfileError;
use crate::framework::{DockerfileOptions, Framework};
use crate::prerequisite::check_prerequisite;
use crate::template::generate;
use crate::writer::{FileWriter, FsFileWriter};

/// 생성 결과
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedDockerfile {
    /// 쓴 파일 경로
    pub path: PathBuf,
    /// 기존 Dockerfile을 삭제하고 다시 썼는지 여부
    pub replaced_existing: bool,
}

/// Dockerfile 생성기
pub struct DockerfileGenerator<W: FileWriter = FsFileWriter> {
    writer: W,
    config: DockerfileConfig,
}

impl DockerfileGenerator<FsFileWriter> {
    /// 실제 파일시스템에 쓰는 생성기를 만듭니다.
    pub fn with_fs(config: DockerfileConfig) -> Self {
        Self::new(FsFileWriter, config)
    }
}

impl<W: FileWriter> DockerfileGenerator<W> {
    pub fn new(writer: W, config: DockerfileConfig) -> Self {
        Self { writer, config }
    }

    pub fn config(&self) -> &DockerfileConfig {
        &self.config
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    /// `path` 디렉토리에 Dockerfile을 생성합니다.
    ///
    /// # Errors
    ///
    /// - `DescriptorNotFound` / `PathNotExist`: 사전조건 실패 (파일은 건드리지 않음)
    /// - `MissingOption` / `InvalidVersion`: 템플릿 입력 오류
    /// - `BuildFailed`: 기존 파일 삭제 또는 쓰기 실패
    pub fn generate_dockerfile(
        &self,
        framework: Framework,
        version: &str,
        path: &Path,
        options: &DockerfileOptions,
    ) -> Result<GeneratedDockerfile, DockerfileError> {
        let text = generate(framework, version, options)?;
        check_prerequisite(framework, path)?;

        let name = self.config.file_name.as_str();
        let build_failed = |e: std::io::Error| DockerfileError::BuildFailed {
            stage: framework.stage(),
            reason: format!("{}: {e}", path.join(name).display()),
        };

        let replaced_existing = if framework.deletes_existing() {
            let removed = self
                .writer
                .remove_if_exists(path, name)
                .map_err(build_failed)?;
            if removed {
                debug!(framework = %framework, path = %path.display(), "removed existing Dockerfile");
            }
            removed
        } else {
            false
        };

        self.writer.write(path, name, &text).map_err(build_failed)?;

        info!(
            framework = %framework,
            version = version,
            path = %path.display(),
            replaced_existing,
            "Dockerfile generated"
        );
        Ok(GeneratedDockerfile {
            path: path.join(name),
            replaced_existing,
        })
    }

    /// 프로젝트 체크아웃 안의 서비스 디렉토리에 Dockerfile을 생성합니다.
    pub fn generate_for_service(
        &self,
        project_name: &str,
        service_path: &str,
        framework: Framework,
        version: &str,
        options: &DockerfileOptions,
    ) -> Result<GeneratedDockerfile, DockerfileError> {
        let dir = self.config.service_dir(project_name, service_path);
        self.generate_dockerfile(framework, version, &dir, options)
    }
}

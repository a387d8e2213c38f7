//! 빌드 디스크립터 사전조건 검사

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::DockerfileError;
use crate::framework::Framework;

/// 대상 디렉토리의 직속 자식 중 프레임워크가 요구하는 디스크립터가 있는지 확인합니다.
///
/// 파일 이름은 대소문자를 구분해 정확히 일치해야 합니다 (`Build.gradle` 불가).
/// 디렉토리를 나열할 수 없으면 `PathNotExist` 입니다. 디스크립터가 없는 프레임워크도
/// 디렉토리는 나열 가능해야 합니다.
pub fn check_prerequisite(framework: Framework, path: &Path) -> Result<(), DockerfileError> {
    let entries = fs::read_dir(path).map_err(|e| {
        debug!(path = %path.display(), error = %e, "cannot list target directory");
        DockerfileError::PathNotExist {
            path: path.display().to_string(),
        }
    })?;

    let Some(descriptor) = framework.descriptor() else {
        return Ok(());
    };

    let found = entries
        .filter_map(Result::ok)
        .any(|entry| entry.file_name() == descriptor);

    if found {
        Ok(())
    } else {
        Err(DockerfileError::DescriptorNotFound {
            framework,
            descriptor,
            path: path.display().to_string(),
        })
    }
}

//! Dockerfile 파일 쓰기
//!
//! [`FileWriter`] trait는 생성기와 파일시스템 사이의 경계입니다.
//! 테스트에서는 호출을 기록하는 구현으로 교체합니다.

use std::fs;
use std::io;
use std::path::Path;

/// 대상 디렉토리에 이름 있는 파일을 쓰는 저장소
pub trait FileWriter: Send + Sync {
    /// `dir/name` 에 `contents` 를 씁니다. 기존 파일은 덮어씁니다.
    fn write(&self, dir: &Path, name: &str, contents: &str) -> io::Result<()>;

    /// `dir/name` 이 있으면 삭제하고, 삭제했는지 여부를 반환합니다.
    fn remove_if_exists(&self, dir: &Path, name: &str) -> io::Result<bool>;
}

/// 실제 파일시스템 구현
#[derive(Debug, Clone, Copy, Default)]
pub struct FsFileWriter;

impl FileWriter for FsFileWriter {
    fn write(&self, dir: &Path, name: &str, contents: &str) -> io::Result<()> {
        fs::write(dir.join(name), contents)
    }

    fn remove_if_exists(&self, dir: &Path, name: &str) -> io::Result<bool> {
        match fs::remove_file(dir.join(name)) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e),
        }
    }
}

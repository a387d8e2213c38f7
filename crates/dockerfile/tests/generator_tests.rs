//! 통합 테스트 -- 실제 파일시스템에 Dockerfile 생성
//!
//! 사전조건 검사 → 기존 파일 처리 → 쓰기 흐름을 임시 디렉토리에서 검증합니다.

use std::fs;
use std::path::Path;

use shipyard_core::error::{BuildError, ShipyardError};
use shipyard_dockerfile::{
    DockerfileConfig, DockerfileError, DockerfileGenerator, DockerfileOptions, Framework,
};

fn checkout(files: &[&str]) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    for name in files {
        fs::write(dir.path().join(name), "").unwrap();
    }
    dir
}

fn generator() -> DockerfileGenerator {
    DockerfileGenerator::with_fs(DockerfileConfig::default())
}

#[test]
fn regeneration_replaces_stale_dockerfile() {
    let dir = checkout(&["build.gradle"]);
    fs::write(dir.path().join("Dockerfile"), "FROM stale\n").unwrap();

    let written = generator()
        .generate_dockerfile(
            Framework::GradleBackend,
            "17",
            dir.path(),
            &DockerfileOptions::default(),
        )
        .unwrap();
    assert!(written.replaced_existing);

    let text = fs::read_to_string(&written.path).unwrap();
    assert!(text.starts_with("FROM openjdk:17-slim\n"));
    assert!(!text.contains("stale"));
}

#[test]
fn regeneration_is_byte_identical() {
    let dir = checkout(&["package.json"]);
    let options = DockerfileOptions::default().with_port(5173);
    let generator = generator();

    let generated = generator
        .generate_dockerfile(Framework::VueFrontend, "20.11.0", dir.path(), &options)
        .unwrap();
    assert!(!generated.replaced_existing);
    let path = generated.path;
    let first = fs::read(&path).unwrap();
    let second = generator
        .generate_dockerfile(Framework::VueFrontend, "20.11.0", dir.path(), &options)
        .unwrap();
    assert!(second.replaced_existing);
    assert_eq!(fs::read(&path).unwrap(), first);
}

#[test]
fn every_framework_writes_into_a_prepared_checkout() {
    let dir = checkout(&["build.gradle", "pom.xml", "package.json", "requirements.txt"]);
    let options = DockerfileOptions::default().with_port(8080);
    for fw in Framework::ALL {
        let path = generator()
            .generate_dockerfile(fw, "1", dir.path(), &options)
            .unwrap()
            .path;
        assert_eq!(path, dir.path().join("Dockerfile"));
        assert!(fs::read_to_string(&path).unwrap().starts_with("FROM "));
    }
}

#[test]
fn wrong_case_descriptor_leaves_directory_untouched() {
    let dir = checkout(&["POM.xml"]);
    let err = generator()
        .generate_dockerfile(
            Framework::MavenBackend,
            "17",
            dir.path(),
            &DockerfileOptions::default(),
        )
        .unwrap_err();
    assert!(matches!(err, DockerfileError::DescriptorNotFound { .. }));
    assert!(!dir.path().join("Dockerfile").exists());
}

fn build_in(path: &Path) -> Result<(), ShipyardError> {
    generator().generate_dockerfile(
        Framework::ReactFrontend,
        "18",
        path,
        &DockerfileOptions::default(),
    )?;
    Ok(())
}

#[test]
fn errors_propagate_as_shipyard_build_errors() {
    let err = build_in(Path::new("/nonexistent/shipyard/frontend")).unwrap_err();
    assert!(matches!(
        err,
        ShipyardError::Build(BuildError::PathNotExist { .. })
    ));

    let dir = checkout(&[]);
    let err = build_in(dir.path()).unwrap_err();
    match err {
        ShipyardError::Build(BuildError::DescriptorNotFound { descriptor, .. }) => {
            assert_eq!(descriptor, "package.json");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

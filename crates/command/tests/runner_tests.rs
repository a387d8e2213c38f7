//! 통합 테스트 -- 실제 프로세스 실행 검증
//!
//! `sh` 와 임시 스크립트를 사용해 종료 코드, 출력 캡처, 작업 디렉토리,
//! 라이프사이클 명령의 인자 전달을 확인합니다.
#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use shipyard_command::{
    CommandError, CommandRunner, CommandSpec, Lifecycle, LifecycleConfigBuilder, LifecycleOp,
    SystemCommandRunner,
};

fn sh(script: &str) -> CommandSpec {
    CommandSpec::new("sh").arg("-c").arg(script)
}

/// Writes an executable script that prints each of its arguments on one line.
fn echo_args_script(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, "#!/bin/sh\nfor a in \"$@\"; do echo \"$a\"; done\n").unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

#[test]
fn captures_stdout_and_stderr_separately() {
    let output = SystemCommandRunner::new()
        .output(&sh("echo out; echo err >&2"))
        .unwrap();
    assert!(output.exit_ok);
    assert_eq!(output.stdout, "out\n");
    assert_eq!(output.stderr, "err\n");
    assert_eq!(output.combined(), "out\nerr");
}

#[test]
fn non_zero_exit_is_reported_with_output() {
    let runner = SystemCommandRunner::new();

    let output = runner.output(&sh("echo partial; exit 3")).unwrap();
    assert!(!output.exit_ok);
    assert_eq!(output.code, Some(3));

    let err = runner.execute(&sh("echo partial; echo broken >&2; exit 3")).unwrap_err();
    match err {
        CommandError::Failed { code, output, .. } => {
            assert_eq!(code, Some(3));
            assert_eq!(output, "partial\nbroken");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn runs_inside_working_directory() {
    let dir = tempfile::tempdir().unwrap();
    let output = SystemCommandRunner::new()
        .execute(&sh("pwd").current_dir(dir.path()))
        .unwrap();
    let reported = fs::canonicalize(output.stdout.trim()).unwrap();
    assert_eq!(reported, fs::canonicalize(dir.path()).unwrap());
}

#[test]
fn arguments_with_spaces_are_not_resplit() {
    let output = SystemCommandRunner::new()
        .execute(&CommandSpec::new("printf").arg("%s|").arg("a b").arg("c;d"))
        .unwrap();
    assert_eq!(output.stdout, "a b|c;d|");
}

#[test]
fn concurrent_runs_do_not_share_output() {
    let runner = SystemCommandRunner::new();
    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let runner = &runner;
                scope.spawn(move || {
                    runner
                        .execute(&sh(&format!("echo run-{i}")))
                        .unwrap()
                        .combined()
                })
            })
            .collect();
        for (i, handle) in handles.into_iter().enumerate() {
            assert_eq!(handle.join().unwrap(), format!("run-{i}"));
        }
    });
}

#[test]
fn compose_up_passes_compose_file_path_as_one_argument() {
    let bin_dir = tempfile::tempdir().unwrap();
    let docker = echo_args_script(bin_dir.path(), "docker");
    let config = LifecycleConfigBuilder::new()
        .docker_bin(docker.display().to_string())
        .build()
        .unwrap();
    let lifecycle = Lifecycle::new(SystemCommandRunner::new(), config);

    let out = lifecycle.compose_up(Path::new("/srv/my shop")).unwrap();
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(
        lines,
        [
            "compose",
            "-f",
            "/srv/my shop/docker-compose.yml",
            "up",
            "--build",
            "-d"
        ]
    );
}

#[test]
fn failing_lifecycle_step_is_tagged() {
    let bin_dir = tempfile::tempdir().unwrap();
    let docker = bin_dir.path().join("docker");
    fs::write(&docker, "#!/bin/sh\necho \"Error: No such container: $2\" >&2\nexit 1\n").unwrap();
    fs::set_permissions(&docker, fs::Permissions::from_mode(0o755)).unwrap();

    let config = LifecycleConfigBuilder::new()
        .docker_bin(docker.display().to_string())
        .build()
        .unwrap();
    let lifecycle = Lifecycle::new(SystemCommandRunner::new(), config);

    let err = lifecycle.restart_container("ghost").unwrap_err();
    assert!(matches!(
        err,
        CommandError::Operation {
            operation: LifecycleOp::ContainerRestart,
            ..
        }
    ));
    assert_eq!(err.output(), Some("Error: No such container: ghost"));
}

#[test]
fn missing_binary_is_spawn_error() {
    let config = LifecycleConfigBuilder::new()
        .git_bin("/nonexistent/shipyard/git")
        .build()
        .unwrap();
    let lifecycle = Lifecycle::new(SystemCommandRunner::new(), config);
    let err = lifecycle.git_pull(Path::new("/tmp")).unwrap_err();
    match err {
        CommandError::Operation { source, .. } => {
            assert!(matches!(*source, CommandError::Spawn { .. }));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

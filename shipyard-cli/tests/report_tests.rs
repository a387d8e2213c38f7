//! Integration tests for the report-building command handlers.
//!
//! Drives `status`, `check` and `ps` through a scripted docker runner and a
//! file-backed descriptor store, then renders the reports in both formats.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use shipyard_cli::cli::{CheckAction, OutputFormat};
use shipyard_cli::commands::check::build_check_report;
use shipyard_cli::commands::ps::{PsReport, build_ps_report};
use shipyard_cli::commands::status::build_status_report;
use shipyard_cli::error::CliError;
use shipyard_cli::output::OutputWriter;
use shipyard_command::{CommandError, CommandOutput, CommandRunner, CommandSpec, Lifecycle, LifecycleConfig};
use shipyard_core::error::ShipyardError;
use shipyard_core::types::{AggregateStatus, PortRange, RunState};
use shipyard_reconciler::{FileTopologySource, Reconciler};
use tempfile::TempDir;

#[derive(Default)]
struct ScriptedRunner {
    replies: Mutex<HashMap<String, String>>,
}

impl ScriptedRunner {
    fn reply(&self, args: &str, stdout: &str) {
        self.replies
            .lock()
            .unwrap()
            .insert(args.to_owned(), stdout.to_owned());
    }
}

impl CommandRunner for ScriptedRunner {
    fn output(&self, spec: &CommandSpec) -> Result<CommandOutput, CommandError> {
        let key = spec.arguments().join(" ");
        match self.replies.lock().unwrap().get(&key) {
            Some(stdout) => Ok(CommandOutput::success(stdout.clone())),
            None => Ok(CommandOutput {
                stdout: String::new(),
                stderr: format!("Error response from daemon: {key}"),
                exit_ok: false,
                code: Some(1),
            }),
        }
    }
}

const STORE: &str = r#"{
    "7": {
        "projectName": "blog",
        "backendMap": {"blog-api": {"path": "/api", "framework": "SpringBoot(gradle)"}},
        "frontend": {"serviceId": "blog-web", "path": "/web", "framework": "React"},
        "databaseMap": {"blog-db": {"databaseType": "Mysql"}}
    }
}"#;

const PS: &str = "\
CONTAINER ID   IMAGE       COMMAND                  CREATED       STATUS                   PORTS                    NAMES
0000000000a1   blog-api    \"java -jar app.jar\"      1 hour ago    Up 1 hour                0.0.0.0:8080->8080/tcp   blog-api
0000000000a2   mysql:8     \"docker-entrypoint.s…\"   1 hour ago    Exited (0) 5 minutes ago                          blog-db
";

fn setup() -> (TempDir, Reconciler<Arc<ScriptedRunner>, FileTopologySource>) {
    let dir = TempDir::new().expect("should create temp dir");
    let store = dir.path().join("projects.json");
    std::fs::write(&store, STORE).expect("should write store");

    let runner = Arc::new(ScriptedRunner::default());
    runner.reply("ps -a", PS);
    let reconciler = Reconciler::new(
        Lifecycle::new(runner, LifecycleConfig::default()),
        FileTopologySource::new(&store),
    );
    (dir, reconciler)
}

fn render_json<T: shipyard_cli::output::Render + serde::Serialize>(payload: &T) -> serde_json::Value {
    let mut buffer = Vec::new();
    OutputWriter::new(OutputFormat::Json)
        .render_to(&mut buffer, payload)
        .expect("json rendering should succeed");
    serde_json::from_slice(&buffer).expect("valid JSON")
}

#[test]
fn status_report_joins_topology_with_live_table() {
    let (_dir, reconciler) = setup();
    let report = build_status_report(&reconciler, "7").expect("status should succeed");

    assert_eq!(report.all_running, AggregateStatus::Run);
    assert_eq!(report.states["blog-api"], RunState::Running);
    assert_eq!(report.states["blog-db"], RunState::Stopped);
    assert_eq!(report.states["blog-web"], RunState::Error);

    let json = render_json(&report);
    assert_eq!(json["states"]["blog-web"], "Error");
}

#[test]
fn check_start_is_refused_by_stopped_database() {
    let (_dir, reconciler) = setup();
    let report = build_check_report(
        &reconciler,
        &CheckAction::Start {
            project_id: "7".to_owned(),
        },
    )
    .expect("gate should evaluate");

    let json = render_json(&report);
    assert_eq!(json["verdict"], "fail");
    assert_eq!(json["blockers"][0], "Mysql");

    let err = report.into_result().expect_err("start should be refused");
    assert_eq!(err.exit_code(), 4);
}

#[test]
fn check_stop_is_refused_by_running_backend() {
    let (_dir, reconciler) = setup();
    let report = build_check_report(
        &reconciler,
        &CheckAction::Stop {
            project_id: "7".to_owned(),
        },
    )
    .expect("gate should evaluate");
    let err = report.into_result().expect_err("stop should be refused");
    assert!(err.to_string().contains("SpringBoot(gradle)"));
}

#[test]
fn unknown_project_fails_with_general_exit_code() {
    let (_dir, reconciler) = setup();
    let err = build_status_report(&reconciler, "99").expect_err("unknown project");
    assert_eq!(err.exit_code(), 1);
}

#[test]
fn ps_records_include_ports() {
    let (_dir, reconciler) = setup();
    match build_ps_report(&reconciler, true).expect("ps should succeed") {
        PsReport::Records { records } => {
            assert_eq!(records.len(), 2);
            let api = records.iter().find(|r| r.name == "blog-api").expect("api row");
            assert_eq!(
                api.ports.and_then(|p| p.outer_port),
                Some(PortRange::single(8080))
            );
        }
        PsReport::States { .. } => panic!("expected records"),
    }
}

#[test]
fn ps_states_json() {
    let (_dir, reconciler) = setup();
    let report = build_ps_report(&reconciler, false).expect("ps should succeed");
    let json = render_json(&report);
    assert_eq!(json["states"]["blog-db"], "Stopped");
    assert!(json.get("records").is_none());
}

#[test]
fn docker_failure_is_command_error() {
    let dir = TempDir::new().expect("should create temp dir");
    let reconciler = Reconciler::new(
        Lifecycle::new(Arc::new(ScriptedRunner::default()), LifecycleConfig::default()),
        FileTopologySource::new(dir.path().join("projects.json")),
    );
    let err = build_ps_report(&reconciler, false).expect_err("docker should fail");
    assert_eq!(err.exit_code(), 1);
    match err {
        CliError::Core(ShipyardError::Command(failure)) => {
            assert!(failure.message.contains("ps -a"));
            assert!(failure.output.contains("Error response from daemon"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

//! `shipyard status` command handler

use std::collections::BTreeMap;
use std::io::Write;

use colored::{ColoredString, Colorize};
use serde::Serialize;
use tracing::debug;

use shipyard_command::CommandRunner;
use shipyard_core::config::ShipyardConfig;
use shipyard_core::types::{AggregateStatus, ReconciliationResult, RunState};
use shipyard_reconciler::{Reconciler, TopologySource};

use crate::cli::StatusArgs;
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `status` command.
pub async fn execute(
    args: StatusArgs,
    config: &ShipyardConfig,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let reconciler = super::reconciler(config)?;
    let project_id = args.project_id;
    let report = super::blocking(move || build_status_report(&reconciler, &project_id)).await?;
    writer.render(&report)
}

/// Reconcile one project and shape the result for output.
pub fn build_status_report<R, T>(
    reconciler: &Reconciler<R, T>,
    project_id: &str,
) -> Result<StatusReport, CliError>
where
    R: CommandRunner,
    T: TopologySource,
{
    let result = reconciler.reconcile(project_id)?;
    debug!(project_id, components = result.states.len(), "status report built");
    Ok(StatusReport::from(result))
}

/// Project status report.
#[derive(Debug, Serialize)]
pub struct StatusReport {
    pub project_id: String,
    pub all_running: AggregateStatus,
    pub states: BTreeMap<String, RunState>,
}

impl From<ReconciliationResult> for StatusReport {
    fn from(result: ReconciliationResult) -> Self {
        Self {
            project_id: result.project_id,
            all_running: result.all_running,
            states: result.states,
        }
    }
}

impl Render for StatusReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        let aggregate = match self.all_running {
            AggregateStatus::Run => "RUN".green().bold(),
            AggregateStatus::Stop => "STOP".yellow().bold(),
        };
        writeln!(w, "Project {}: {}", self.project_id.bold(), aggregate)?;

        if self.states.is_empty() {
            writeln!(w, "  (no components)")?;
            return Ok(());
        }

        let width = self.states.keys().map(String::len).max().unwrap_or(0);
        for (id, state) in &self.states {
            writeln!(w, "  {id:<width$}  {}", paint_state(*state))?;
        }
        Ok(())
    }
}

/// Color a run state for terminal output.
pub(crate) fn paint_state(state: RunState) -> ColoredString {
    let text = state.to_string();
    match state {
        RunState::Running => text.green(),
        RunState::Stopped => text.yellow(),
        RunState::Created => text.cyan(),
        RunState::Error => text.red(),
    }
}

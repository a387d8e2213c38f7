//! `shipyard check` command handler
//!
//! Runs the start/stop safety gates. A refused transition is rendered like a
//! passing one and then surfaces as [`CliError::Refused`] (exit code 4).

use std::fmt;
use std::io::Write;

use colored::Colorize;
use serde::Serialize;

use shipyard_command::CommandRunner;
use shipyard_core::config::ShipyardConfig;
use shipyard_core::types::SafetyVerdict;
use shipyard_reconciler::{Reconciler, TopologySource};

use crate::cli::{CheckAction, CheckArgs};
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `check` command.
pub async fn execute(
    args: CheckArgs,
    config: &ShipyardConfig,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let reconciler = super::reconciler(config)?;
    let action = args.action;
    let report = super::blocking(move || build_check_report(&reconciler, &action)).await?;
    writer.render(&report)?;
    report.into_result()
}

/// Evaluate the requested gate for one project.
pub fn build_check_report<R, T>(
    reconciler: &Reconciler<R, T>,
    action: &CheckAction,
) -> Result<CheckReport, CliError>
where
    R: CommandRunner,
    T: TopologySource,
{
    let (transition, project_id, verdict) = match action {
        CheckAction::Start { project_id } => (
            Transition::Start,
            project_id,
            reconciler.check_safe_to_start(project_id)?,
        ),
        CheckAction::Stop { project_id } => (
            Transition::Stop,
            project_id,
            reconciler.check_safe_to_stop(project_id)?,
        ),
    };
    Ok(CheckReport {
        project_id: project_id.clone(),
        transition,
        verdict,
    })
}

/// Gated lifecycle transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Transition {
    Start,
    Stop,
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => write!(f, "start"),
            Self::Stop => write!(f, "stop"),
        }
    }
}

/// Gate evaluation report.
#[derive(Debug, Serialize)]
pub struct CheckReport {
    pub project_id: String,
    pub transition: Transition,
    #[serde(flatten)]
    pub verdict: SafetyVerdict,
}

impl CheckReport {
    /// `Ok` on pass, `Refused` carrying the gate message on fail.
    pub fn into_result(self) -> Result<(), CliError> {
        match self.verdict {
            SafetyVerdict::Pass => Ok(()),
            SafetyVerdict::Fail { message, .. } => Err(CliError::Refused(message)),
        }
    }
}

impl Render for CheckReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        match &self.verdict {
            SafetyVerdict::Pass => writeln!(
                w,
                "{} project {}: {}",
                self.transition,
                self.project_id.bold(),
                "PASS".green().bold()
            ),
            SafetyVerdict::Fail { blockers, message } => {
                writeln!(
                    w,
                    "{} project {}: {}",
                    self.transition,
                    self.project_id.bold(),
                    "REFUSED".red().bold()
                )?;
                writeln!(w, "  Blockers: {}", blockers.join(", "))?;
                writeln!(w, "  {}", message.red())
            }
        }
    }
}

//! `shipyard logs` command handler

use std::io::Write;

use serde::Serialize;

use shipyard_command::{CommandRunner, Lifecycle};
use shipyard_core::config::ShipyardConfig;

use crate::cli::LogsArgs;
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `logs` command.
pub async fn execute(
    args: LogsArgs,
    config: &ShipyardConfig,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let lifecycle = super::lifecycle(config)?;
    let report = super::blocking(move || build_logs_report(&lifecycle, args.container, args.tail))
        .await?;
    writer.render(&report)
}

/// Fetch cleaned log text and split it into lines.
pub fn build_logs_report<R: CommandRunner>(
    lifecycle: &Lifecycle<R>,
    container: String,
    tail: Option<usize>,
) -> Result<LogsReport, CliError> {
    let text = lifecycle.container_logs(&container, tail)?;
    Ok(LogsReport {
        container,
        tail,
        lines: text.lines().map(str::to_owned).collect(),
    })
}

/// Container log report.
#[derive(Debug, Serialize)]
pub struct LogsReport {
    pub container: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tail: Option<usize>,
    pub lines: Vec<String>,
}

impl Render for LogsReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        for line in &self.lines {
            writeln!(w, "{line}")?;
        }
        Ok(())
    }
}

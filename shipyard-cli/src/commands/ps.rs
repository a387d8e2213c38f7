//! `shipyard ps` command handler

use std::collections::BTreeMap;
use std::io::Write;

use colored::Colorize;
use serde::Serialize;

use shipyard_command::CommandRunner;
use shipyard_core::config::ShipyardConfig;
use shipyard_core::types::{ContainerRecord, RunState};
use shipyard_reconciler::{Reconciler, TopologySource};

use crate::cli::PsArgs;
use crate::commands::status::paint_state;
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `ps` command.
pub async fn execute(
    args: PsArgs,
    config: &ShipyardConfig,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let reconciler = super::reconciler(config)?;
    let records = args.records;
    let report = super::blocking(move || build_ps_report(&reconciler, records)).await?;
    writer.render(&report)
}

/// Read the live container table once.
pub fn build_ps_report<R, T>(reconciler: &Reconciler<R, T>, records: bool) -> Result<PsReport, CliError>
where
    R: CommandRunner,
    T: TopologySource,
{
    if records {
        Ok(PsReport::Records {
            records: reconciler.list_container_records()?,
        })
    } else {
        Ok(PsReport::States {
            states: reconciler.list_container_states()?,
        })
    }
}

/// Live container table report.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum PsReport {
    States { states: BTreeMap<String, RunState> },
    Records { records: Vec<ContainerRecord> },
}

impl Render for PsReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        match self {
            Self::States { states } => {
                if states.is_empty() {
                    return writeln!(w, "No containers");
                }
                let width = states.keys().map(String::len).max().unwrap_or(0).max(4);
                writeln!(w, "{:<width$}  {}", "NAME".bold(), "STATE".bold())?;
                for (name, state) in states {
                    writeln!(w, "{name:<width$}  {}", paint_state(*state))?;
                }
                Ok(())
            }
            Self::Records { records } => {
                if records.is_empty() {
                    return writeln!(w, "No containers");
                }
                writeln!(
                    w,
                    "{:<20} {:<12} {:<30} {:<14} {}",
                    "NAME".bold(),
                    "ID".bold(),
                    "IMAGE".bold(),
                    "PORTS".bold(),
                    "STATE".bold()
                )?;
                for record in records {
                    let ports = record
                        .ports
                        .map(|p| p.to_string())
                        .unwrap_or_else(|| "-".to_owned());
                    writeln!(
                        w,
                        "{:<20} {:<12} {:<30} {:<14} {}",
                        record.name,
                        record.id,
                        record.image,
                        ports,
                        paint_state(record.state)
                    )?;
                }
                Ok(())
            }
        }
    }
}

//! `shipyard config` command handler

use std::io::Write;
use std::path::Path;

use colored::Colorize;
use serde::Serialize;
use tracing::info;

use shipyard_core::config::ShipyardConfig;

use crate::cli::{ConfigAction, ConfigArgs};
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Sections accepted by `config show --section`.
pub const SECTIONS: [&str; 4] = ["general", "command", "topology", "certbot"];

/// Dispatch `config validate` / `config show`.
pub async fn execute(
    args: ConfigArgs,
    config_path: &Path,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    match args.action {
        ConfigAction::Validate => execute_validate(config_path, writer).await,
        ConfigAction::Show { section } => execute_show(config_path, section, writer).await,
    }
}

/// Load the file strictly (a missing file is an error here) and report problems.
///
/// # Errors
///
/// Returns `CliError::Config` if the file is missing, malformed or invalid.
async fn execute_validate(config_path: &Path, writer: &OutputWriter) -> Result<(), CliError> {
    info!(path = %config_path.display(), "checking configuration file");

    let errors = match ShipyardConfig::load(config_path).await {
        Ok(_) => Vec::new(),
        Err(e) => vec![e.to_string()],
    };
    let report = ConfigValidationReport {
        source: config_path.display().to_string(),
        valid: errors.is_empty(),
        errors,
    };
    writer.render(&report)?;

    if report.valid {
        Ok(())
    } else {
        Err(CliError::Config(format!("{} is invalid", report.source)))
    }
}

/// Display the effective configuration (file + env overrides + defaults).
async fn execute_show(
    config_path: &Path,
    section: Option<String>,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    info!(path = %config_path.display(), section = ?section, "showing effective configuration");

    let config = super::load_config(config_path, None).await?;
    let report = build_config_report(&config, config_path, section.as_deref())?;
    writer.render(&report)
}

/// Serialize the whole configuration or one section to TOML.
pub fn build_config_report(
    config: &ShipyardConfig,
    config_path: &Path,
    section: Option<&str>,
) -> Result<ConfigReport, CliError> {
    let config_toml = match section {
        None => toml::to_string_pretty(config)?,
        Some("general") => toml::to_string_pretty(&config.general)?,
        Some("command") => toml::to_string_pretty(&config.command)?,
        Some("topology") => toml::to_string_pretty(&config.topology)?,
        Some("certbot") => toml::to_string_pretty(&config.certbot)?,
        Some(other) => {
            return Err(CliError::Command(format!(
                "unknown section: {other} (expected: {})",
                SECTIONS.join(", ")
            )));
        }
    };

    Ok(ConfigReport {
        source: config_path.display().to_string(),
        section: section.map(str::to_owned),
        config_toml,
    })
}

/// Effective configuration, whole or one section.
///
/// JSON output carries only the metadata; the TOML body is for text mode.
#[derive(Serialize)]
pub struct ConfigReport {
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    #[serde(skip)]
    pub config_toml: String,
}

impl Render for ConfigReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        match &self.section {
            Some(section) => writeln!(w, "# {} [{section}]", self.source)?,
            None => writeln!(w, "# {}", self.source)?,
        }
        w.write_all(self.config_toml.as_bytes())
    }
}

/// Outcome of a strict configuration load.
#[derive(Serialize)]
pub struct ConfigValidationReport {
    pub source: String,
    pub valid: bool,
    /// Load or validation failures, empty when `valid`
    pub errors: Vec<String>,
}

impl Render for ConfigValidationReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        if self.valid {
            return writeln!(w, "{}: {}", self.source.bold(), "ok".green().bold());
        }
        writeln!(w, "{}: {}", self.source.bold(), "invalid".red().bold())?;
        for err in &self.errors {
            writeln!(w, "  - {}", err.red())?;
        }
        Ok(())
    }
}

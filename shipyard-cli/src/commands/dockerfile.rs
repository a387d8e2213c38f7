//! `shipyard dockerfile` command handler

use std::io::Write;
use std::path::{Path, PathBuf};

use colored::Colorize;
use serde::Serialize;
use tracing::info;

use shipyard_core::config::ShipyardConfig;
use shipyard_dockerfile::{
    DockerfileConfig, DockerfileGenerator, DockerfileOptions, FileWriter, Framework,
    check_prerequisite,
};

use crate::cli::{DockerfileAction, DockerfileArgs};
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `dockerfile` command.
pub async fn execute(
    args: DockerfileArgs,
    config: &ShipyardConfig,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    match args.action {
        DockerfileAction::Generate {
            framework,
            version,
            path,
            nginx,
            port,
        } => {
            let framework: Framework = framework.parse()?;
            let mut options = DockerfileOptions::default().with_nginx(nginx);
            if let Some(port) = port {
                options = options.with_port(port);
            }

            let dockerfile_config = DockerfileConfig::from_core(config);
            dockerfile_config.validate()?;
            let generator = DockerfileGenerator::with_fs(dockerfile_config);

            let report = super::blocking(move || {
                run_generate(&generator, framework, &version, &path, &options)
            })
            .await?;
            writer.render(&report)
        }
        DockerfileAction::Check { framework, path } => {
            let framework: Framework = framework.parse()?;
            execute_check(framework, &path, writer)
        }
    }
}

/// Generate one Dockerfile and describe what was written.
pub fn run_generate<W: FileWriter>(
    generator: &DockerfileGenerator<W>,
    framework: Framework,
    version: &str,
    path: &Path,
    options: &DockerfileOptions,
) -> Result<GenerateReport, CliError> {
    let generated = generator.generate_dockerfile(framework, version, path, options)?;
    Ok(GenerateReport {
        framework: framework.tag().to_owned(),
        version: version.to_owned(),
        path: generated.path,
        replaced_existing: generated.replaced_existing,
    })
}

/// Run the prerequisite check, render the outcome, then fail if not ready.
fn execute_check(framework: Framework, path: &Path, writer: &OutputWriter) -> Result<(), CliError> {
    info!(framework = %framework, path = %path.display(), "checking build prerequisites");

    let result = check_prerequisite(framework, path);
    let report = CheckReport {
        framework: framework.tag().to_owned(),
        path: path.to_path_buf(),
        descriptor: framework.descriptor(),
        ready: result.is_ok(),
        error: result.as_ref().err().map(ToString::to_string),
    };
    writer.render(&report)?;
    result.map_err(CliError::from)
}

/// Dockerfile generation report.
#[derive(Debug, Serialize)]
pub struct GenerateReport {
    pub framework: String,
    pub version: String,
    pub path: PathBuf,
    /// Whether an existing Dockerfile was removed before writing.
    pub replaced_existing: bool,
}

impl Render for GenerateReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        writeln!(
            w,
            "{} {} ({} {})",
            "Generated".green().bold(),
            self.path.display(),
            self.framework,
            self.version
        )
    }
}

/// Build prerequisite report.
#[derive(Debug, Serialize)]
pub struct CheckReport {
    pub framework: String,
    pub path: PathBuf,
    pub descriptor: Option<&'static str>,
    pub ready: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Render for CheckReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        writeln!(w, "Prerequisites: {} ({})", self.path.display(), self.framework.bold())?;
        match self.descriptor {
            Some(descriptor) => writeln!(w, "  Descriptor: {descriptor}")?,
            None => writeln!(w, "  Descriptor: (none required)")?,
        }
        if self.ready {
            writeln!(w, "  Result: {}", "READY".green().bold())?;
        } else {
            writeln!(w, "  Result: {}", "NOT READY".red().bold())?;
            if let Some(error) = &self.error {
                writeln!(w, "  Error: {}", error.red())?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_report_not_ready_text() {
        colored::control::set_override(false);
        let report = CheckReport {
            framework: "maven-backend".to_owned(),
            path: PathBuf::from("/srv/shop/api"),
            descriptor: Some("pom.xml"),
            ready: false,
            error: Some("pom.xml not found in /srv/shop/api".to_owned()),
        };
        let mut buffer = Vec::new();
        report.render_text(&mut buffer).unwrap();
        let output = String::from_utf8(buffer).unwrap();
        assert!(output.contains("Descriptor: pom.xml"));
        assert!(output.contains("NOT READY"));
        assert!(output.contains("Error: pom.xml not found"));
    }

    #[test]
    fn check_report_json_omits_error_when_ready() {
        let report = CheckReport {
            framework: "django-backend".to_owned(),
            path: PathBuf::from("/srv/blog/api"),
            descriptor: None,
            ready: true,
            error: None,
        };
        let parsed = serde_json::to_value(report).unwrap();
        assert_eq!(parsed["ready"], true);
        assert!(parsed["descriptor"].is_null());
        assert!(parsed.get("error").is_none());
    }

    #[test]
    fn generate_writes_into_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("package.json"), "{}").unwrap();

        let config = DockerfileConfig::default();
        let generator = DockerfileGenerator::with_fs(config);
        let options = DockerfileOptions::default().with_nginx(true);
        let report = run_generate(
            &generator,
            Framework::ReactFrontend,
            "20",
            dir.path(),
            &options,
        )
        .unwrap();

        assert_eq!(report.path, dir.path().join("Dockerfile"));
        assert!(!report.replaced_existing, "no Dockerfile existed yet");
        let text = std::fs::read_to_string(&report.path).unwrap();
        assert!(text.contains("nginx"));

        let again = run_generate(
            &generator,
            Framework::ReactFrontend,
            "20",
            dir.path(),
            &options,
        )
        .unwrap();
        assert!(again.replaced_existing);
    }

    #[test]
    fn generate_missing_descriptor_is_build_error() {
        let dir = tempfile::tempdir().unwrap();
        let generator = DockerfileGenerator::with_fs(DockerfileConfig::default());
        let err = run_generate(
            &generator,
            Framework::GradleBackend,
            "17",
            dir.path(),
            &DockerfileOptions::default(),
        )
        .unwrap_err();
        assert_eq!(err.exit_code(), 1);
        assert!(err.to_string().contains("build.gradle"));
        assert!(!dir.path().join("Dockerfile").exists());
    }
}

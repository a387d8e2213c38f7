//! CLI argument parsing using clap derive API
//!
//! Purely declarative: no I/O happens here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Shipyard -- project container reconciliation and Dockerfile generation.
///
/// Use `shipyard <COMMAND> --help` for subcommand details.
#[derive(Parser, Debug)]
#[command(name = "shipyard", version, about, long_about = None)]
pub struct Cli {
    /// Path to the shipyard.toml configuration file.
    #[arg(short, long, default_value = "shipyard.toml")]
    pub config: PathBuf,

    /// Override log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Output format.
    #[arg(long, global = true, default_value = "text")]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table / text output.
    Text,
    /// Machine-readable JSON.
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Reconcile a project's components against the live container table.
    Status(StatusArgs),

    /// Check whether a project may be started or stopped.
    Check(CheckArgs),

    /// List containers known to docker.
    Ps(PsArgs),

    /// Generate or pre-check Dockerfiles.
    Dockerfile(DockerfileArgs),

    /// Show cleaned container logs.
    Logs(LogsArgs),

    /// Manage configuration.
    Config(ConfigArgs),
}

// ---- status ----

#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Project identifier in the descriptor store.
    pub project_id: String,
}

// ---- check ----

#[derive(Args, Debug)]
pub struct CheckArgs {
    #[command(subcommand)]
    pub action: CheckAction,
}

#[derive(Subcommand, Debug, Clone)]
pub enum CheckAction {
    /// Refuse when a required database container is absent or stopped.
    Start {
        /// Project identifier in the descriptor store.
        project_id: String,
    },
    /// Refuse while a backend container is still running.
    Stop {
        /// Project identifier in the descriptor store.
        project_id: String,
    },
}

// ---- ps ----

#[derive(Args, Debug)]
pub struct PsArgs {
    /// Show full rows (image, status text, ports) instead of name/state pairs.
    #[arg(long)]
    pub records: bool,
}

// ---- dockerfile ----

#[derive(Args, Debug)]
pub struct DockerfileArgs {
    #[command(subcommand)]
    pub action: DockerfileAction,
}

#[derive(Subcommand, Debug)]
pub enum DockerfileAction {
    /// Write a Dockerfile into a service directory.
    Generate {
        /// Framework tag (gradle-backend, maven-backend, react-frontend,
        /// vue-frontend, fastapi-backend, django-backend).
        #[arg(long)]
        framework: String,
        /// Base image version (JDK, Node or Python tag).
        #[arg(long)]
        version: String,
        /// Service directory.
        #[arg(long)]
        path: PathBuf,
        /// React: serve the build output with nginx.
        #[arg(long)]
        nginx: bool,
        /// Vue / Django: port to serve on.
        #[arg(long)]
        port: Option<u16>,
    },
    /// Check that a service directory holds the framework's build descriptor.
    Check {
        /// Framework tag.
        #[arg(long)]
        framework: String,
        /// Service directory.
        #[arg(long)]
        path: PathBuf,
    },
}

// ---- logs ----

#[derive(Args, Debug)]
pub struct LogsArgs {
    /// Container name.
    pub container: String,

    /// Only show the last N lines.
    #[arg(long)]
    pub tail: Option<usize>,
}

// ---- config ----

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Validate the configuration file and report errors.
    Validate,
    /// Show the effective configuration (file + env overrides + defaults).
    Show {
        /// Show only a specific section (general, command, topology, certbot).
        #[arg(long)]
        section: Option<String>,
    },
}

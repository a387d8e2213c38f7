//! CLI-specific error types and exit code mapping

use shipyard_command::CommandError;
use shipyard_core::error::ShipyardError;
use shipyard_dockerfile::DockerfileError;
use shipyard_reconciler::ReconcilerError;

/// CLI-specific error type.
///
/// The `exit_code()` method maps errors to process exit codes.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration loading or validation failure.
    #[error("configuration error: {0}")]
    Config(String),

    /// A subcommand-specific operation failed.
    #[error("{0}")]
    Command(String),

    /// A start/stop gate refused the transition.
    #[error("refused: {0}")]
    Refused(String),

    /// JSON serialisation failed during output rendering.
    #[error("json output error: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    /// IO error (stdout write, etc.).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Wrapped domain error.
    #[error("{0}")]
    Core(#[from] ShipyardError),
}

impl CliError {
    /// Map the error to a process exit code.
    ///
    /// | Code | Meaning                          |
    /// |------|----------------------------------|
    /// | 0    | Success                          |
    /// | 1    | General / command error          |
    /// | 2    | Configuration error              |
    /// | 4    | Start/stop gate refused          |
    /// | 10   | IO error                         |
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::Core(ShipyardError::Config(_)) => 2,
            Self::Refused(_) => 4,
            Self::Io(_) | Self::Core(ShipyardError::Io(_)) => 10,
            Self::JsonSerialize(_) | Self::Command(_) | Self::Core(_) => 1,
        }
    }
}

impl From<CommandError> for CliError {
    fn from(e: CommandError) -> Self {
        Self::Core(e.into())
    }
}

impl From<DockerfileError> for CliError {
    fn from(e: DockerfileError) -> Self {
        Self::Core(e.into())
    }
}

impl From<ReconcilerError> for CliError {
    fn from(e: ReconcilerError) -> Self {
        Self::Core(e.into())
    }
}

impl From<tokio::task::JoinError> for CliError {
    fn from(e: tokio::task::JoinError) -> Self {
        Self::Command(format!("background task failed: {e}"))
    }
}

impl From<toml::ser::Error> for CliError {
    fn from(e: toml::ser::Error) -> Self {
        Self::Command(format!("toml output error: {e}"))
    }
}

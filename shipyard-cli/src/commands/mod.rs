//! Command handlers -- one module per subcommand
//!
//! Shared plumbing lives here: configuration loading and construction of the
//! process-backed lifecycle and reconciler. Docker and git calls block, so
//! handlers run them through [`blocking`].

pub mod check;
pub mod config;
pub mod dockerfile;
pub mod logs;
pub mod ps;
pub mod status;

use std::path::Path;

use shipyard_command::{Lifecycle, LifecycleConfig, SystemCommandRunner};
use shipyard_core::config::ShipyardConfig;
use shipyard_core::error::{ConfigError, ShipyardError};
use shipyard_reconciler::{Reconciler, ReconcilerConfig, TopologySource};

use crate::error::CliError;

/// Reconciler wired to real `docker` processes and the configured descriptor store.
pub type SystemReconciler = Reconciler<SystemCommandRunner, Box<dyn TopologySource>>;

/// Load the effective configuration.
///
/// A missing file falls back to defaults; env overrides and the CLI log level
/// are applied on top, then the result is validated.
pub async fn load_config(path: &Path, log_level: Option<&str>) -> Result<ShipyardConfig, CliError> {
    let mut config = match ShipyardConfig::from_file(path).await {
        Ok(config) => config,
        Err(ShipyardError::Config(ConfigError::FileNotFound { .. })) => ShipyardConfig::default(),
        Err(e) => return Err(e.into()),
    };
    config.apply_env_overrides();
    if let Some(level) = log_level {
        config.general.log_level = level.to_owned();
    }
    config.validate()?;
    Ok(config)
}

/// Build a lifecycle backed by real child processes.
pub fn lifecycle(config: &ShipyardConfig) -> Result<Lifecycle<SystemCommandRunner>, CliError> {
    let lifecycle_config = LifecycleConfig::from_core(config);
    lifecycle_config.validate()?;
    Ok(Lifecycle::new(SystemCommandRunner::new(), lifecycle_config))
}

/// Build a reconciler whose topology source follows `[topology]`.
pub fn reconciler(config: &ShipyardConfig) -> Result<SystemReconciler, CliError> {
    let reconciler_config = ReconcilerConfig::from_core(config)?;
    let source = reconciler_config.topology_source(lifecycle(config)?);
    Ok(Reconciler::new(lifecycle(config)?, source))
}

/// Run blocking work on the tokio blocking pool.
pub async fn blocking<T, F>(work: F) -> Result<T, CliError>
where
    F: FnOnce() -> Result<T, CliError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work).await?
}

//! Lifecycle commands: git checkouts, compose stacks, single containers, certificates.
//!
//! [`Lifecycle`] wraps a [`CommandRunner`] and builds each command as an
//! explicit argument vector. Every failure is tagged with the
//! [`LifecycleOp`] that produced it and keeps the captured output.
//!
//! # Examples
//!
//! ```no_run
//! use shipyard_command::{Lifecycle, LifecycleConfig, SystemCommandRunner};
//!
//! let lifecycle = Lifecycle::new(SystemCommandRunner::new(), LifecycleConfig::default());
//! lifecycle.git_pull("/var/lib/shipyard/projects/shop".as_ref())?;
//! lifecycle.compose_up("/var/lib/shipyard/projects/shop".as_ref())?;
//! # Ok::<(), shipyard_command::CommandError>(())
//! ```

use std::fmt;
use std::path::Path;

use tracing::info;

use crate::config::LifecycleConfig;
use crate::error::CommandError;
use crate::output::clean_log_text;
use crate::runner::{CommandRunner, CommandSpec};

const COMPOSE_FILE: &str = "docker-compose.yml";
const HTTPS_PREFIX: &str = "https://";

/// Lifecycle step names, used to tag failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleOp {
    GitClone,
    GitCheckout,
    GitPull,
    ComposeUp,
    ComposeDown,
    ContainerStart,
    ContainerStop,
    ContainerRestart,
    ContainerList,
    ContainerLogs,
    ContainerExec,
    CertificateRequest,
}

impl fmt::Display for LifecycleOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::GitClone => "git-clone",
            Self::GitCheckout => "git-checkout",
            Self::GitPull => "git-pull",
            Self::ComposeUp => "compose-up",
            Self::ComposeDown => "compose-down",
            Self::ContainerStart => "container-start",
            Self::ContainerStop => "container-stop",
            Self::ContainerRestart => "container-restart",
            Self::ContainerList => "container-list",
            Self::ContainerLogs => "container-logs",
            Self::ContainerExec => "container-exec",
            Self::CertificateRequest => "certificate-request",
        };
        f.write_str(name)
    }
}

/// Validates a container name before it is passed to docker.
///
/// Names must start with an ASCII alphanumeric character and contain only
/// `[a-zA-Z0-9_.-]`, which also rules out option injection (`--rm`).
pub fn validate_container_name(name: &str) -> Result<(), CommandError> {
    let mut chars = name.chars();
    let valid_first = chars.next().is_some_and(|c| c.is_ascii_alphanumeric());
    let valid_rest = chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'));
    if valid_first && valid_rest {
        Ok(())
    } else {
        Err(CommandError::InvalidArgument {
            field: "container name".to_owned(),
            reason: format!("'{name}' is not a valid container name"),
        })
    }
}

fn validate_plain_arg(field: &str, value: &str) -> Result<(), CommandError> {
    if value.is_empty() || value.starts_with('-') {
        return Err(CommandError::InvalidArgument {
            field: field.to_owned(),
            reason: format!("'{value}' must be non-empty and must not start with '-'"),
        });
    }
    Ok(())
}

/// Builds the clone URL with an OAuth access token embedded.
///
/// Only `https://` repositories are supported.
pub fn authenticated_clone_url(repository_url: &str, access_token: &str) -> Result<String, CommandError> {
    let rest = repository_url
        .strip_prefix(HTTPS_PREFIX)
        .ok_or_else(|| CommandError::InvalidArgument {
            field: "repository url".to_owned(),
            reason: "only https:// repositories can be cloned with a token".to_owned(),
        })?;
    Ok(format!("{HTTPS_PREFIX}oauth2:{access_token}@{rest}"))
}

/// Returns `true` when a checkout directory already exists at `path`.
pub fn is_cloned(path: &Path) -> bool {
    path.exists()
}

/// Lifecycle command facade over a [`CommandRunner`].
pub struct Lifecycle<R: CommandRunner> {
    runner: R,
    config: LifecycleConfig,
}

impl<R: CommandRunner> Lifecycle<R> {
    pub fn new(runner: R, config: LifecycleConfig) -> Self {
        Self { runner, config }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    fn docker(&self) -> CommandSpec {
        CommandSpec::new(&self.config.docker_bin)
    }

    fn git(&self) -> CommandSpec {
        CommandSpec::new(&self.config.git_bin)
    }

    fn run(&self, op: LifecycleOp, spec: CommandSpec) -> Result<String, CommandError> {
        let output = self.runner.execute(&spec).map_err(|e| e.during(op))?;
        info!(operation = %op, command = %spec, "lifecycle command succeeded");
        Ok(output.combined())
    }

    /// `git clone <url-with-token>` executed inside `parent_dir`.
    pub fn git_clone(
        &self,
        repository_url: &str,
        access_token: &str,
        parent_dir: &Path,
    ) -> Result<String, CommandError> {
        let url = authenticated_clone_url(repository_url, access_token)
            .map_err(|e| e.during(LifecycleOp::GitClone))?;
        let spec = self
            .git()
            .arg("clone")
            .secret_arg(url)
            .current_dir(parent_dir);
        self.run(LifecycleOp::GitClone, spec)
    }

    /// `git -C <checkout> checkout <branch>`
    pub fn git_checkout(&self, checkout: &Path, branch: &str) -> Result<String, CommandError> {
        validate_plain_arg("branch", branch).map_err(|e| e.during(LifecycleOp::GitCheckout))?;
        let spec = self
            .git()
            .arg("-C")
            .arg(checkout.display().to_string())
            .arg("checkout")
            .arg(branch);
        self.run(LifecycleOp::GitCheckout, spec)
    }

    /// `git -C <checkout> pull`
    pub fn git_pull(&self, checkout: &Path) -> Result<String, CommandError> {
        let spec = self
            .git()
            .arg("-C")
            .arg(checkout.display().to_string())
            .arg("pull");
        self.run(LifecycleOp::GitPull, spec)
    }

    /// `docker compose -f <dir>/docker-compose.yml up --build -d`
    pub fn compose_up(&self, project_dir: &Path) -> Result<String, CommandError> {
        let spec = self
            .docker()
            .args(["compose", "-f"])
            .arg(project_dir.join(COMPOSE_FILE).display().to_string())
            .args(["up", "--build", "-d"]);
        self.run(LifecycleOp::ComposeUp, spec)
    }

    /// `docker compose -f <dir>/docker-compose.yml down --rmi all`
    pub fn compose_down(&self, project_dir: &Path) -> Result<String, CommandError> {
        let spec = self
            .docker()
            .args(["compose", "-f"])
            .arg(project_dir.join(COMPOSE_FILE).display().to_string())
            .args(["down", "--rmi", "all"]);
        self.run(LifecycleOp::ComposeDown, spec)
    }

    pub fn start_container(&self, name: &str) -> Result<String, CommandError> {
        self.container_action(LifecycleOp::ContainerStart, "start", name)
    }

    pub fn stop_container(&self, name: &str) -> Result<String, CommandError> {
        self.container_action(LifecycleOp::ContainerStop, "stop", name)
    }

    pub fn restart_container(&self, name: &str) -> Result<String, CommandError> {
        self.container_action(LifecycleOp::ContainerRestart, "restart", name)
    }

    fn container_action(
        &self,
        op: LifecycleOp,
        verb: &str,
        name: &str,
    ) -> Result<String, CommandError> {
        validate_container_name(name).map_err(|e| e.during(op))?;
        self.run(op, self.docker().arg(verb).arg(name))
    }

    /// Raw `docker ps -a` table, header included.
    pub fn list_containers(&self) -> Result<String, CommandError> {
        let output = self
            .runner
            .execute(&self.docker().args(["ps", "-a"]))
            .map_err(|e| e.during(LifecycleOp::ContainerList))?;
        Ok(output.stdout)
    }

    /// `docker logs [--tail N] <name>` with escape sequences and backspaces resolved.
    pub fn container_logs(&self, name: &str, tail: Option<usize>) -> Result<String, CommandError> {
        validate_container_name(name).map_err(|e| e.during(LifecycleOp::ContainerLogs))?;
        let mut spec = self.docker().arg("logs");
        if let Some(lines) = tail {
            spec = spec.arg("--tail").arg(lines.to_string());
        }
        let output = self
            .runner
            .execute(&spec.arg(name))
            .map_err(|e| e.during(LifecycleOp::ContainerLogs))?;
        // docker logs replays the container's stdout and stderr on the matching streams
        Ok(clean_log_text(&output.combined()))
    }

    /// `docker exec <container> cat <path>`
    pub fn read_file_in_container(&self, container: &str, path: &str) -> Result<String, CommandError> {
        validate_container_name(container).map_err(|e| e.during(LifecycleOp::ContainerExec))?;
        validate_plain_arg("path", path).map_err(|e| e.during(LifecycleOp::ContainerExec))?;
        let spec = self.docker().arg("exec").arg(container).arg("cat").arg(path);
        let output = self
            .runner
            .execute(&spec)
            .map_err(|e| e.during(LifecycleOp::ContainerExec))?;
        Ok(output.stdout)
    }

    /// `certbot certonly --standalone ... -d <domain>`
    pub fn request_certificate(&self, domain: &str) -> Result<String, CommandError> {
        validate_plain_arg("domain", domain)
            .map_err(|e| e.during(LifecycleOp::CertificateRequest))?;
        let mut spec = CommandSpec::new(&self.config.certbot_bin)
            .args(["certonly", "--standalone", "--email"])
            .arg(&self.config.certbot_email)
            .args(["--agree-tos", "--no-eff-email", "--keep-until-expiring"]);
        if self.config.certbot_staging {
            spec = spec.arg("--staging");
        }
        self.run(LifecycleOp::CertificateRequest, spec.arg("-d").arg(domain))
    }
}

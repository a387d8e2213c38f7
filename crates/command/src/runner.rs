//! Process execution gateway.
//!
//! The [`CommandRunner`] trait is the single I/O boundary between shipyard and
//! the host's docker/git/certbot installation. Production code uses
//! [`SystemCommandRunner`]; tests substitute hand-written runners that return
//! canned output.
//!
//! Commands are described by a [`CommandSpec`]: a program plus an ordered
//! argument vector, passed to the OS as-is. No shell is involved, so paths with
//! spaces or shell metacharacters are never re-split.
//!
//! # Examples
//!
//! ```no_run
//! use shipyard_command::{CommandRunner, CommandSpec, SystemCommandRunner};
//!
//! let runner = SystemCommandRunner::new();
//! let spec = CommandSpec::new("git")
//!     .arg("-C")
//!     .arg("/srv/projects/shop")
//!     .arg("pull");
//! let output = runner.execute(&spec)?;
//! println!("{}", output.combined());
//! # Ok::<(), shipyard_command::CommandError>(())
//! ```

use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::{debug, warn};

use crate::error::CommandError;

const REDACTED: &str = "***";

/// An external command: program, ordered arguments and optional working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    program: String,
    args: Vec<String>,
    current_dir: Option<PathBuf>,
    /// Indices into `args` that must never appear in logs or error messages.
    secret_args: Vec<usize>,
}

impl CommandSpec {
    /// Creates a spec for `program` with no arguments.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            current_dir: None,
            secret_args: Vec::new(),
        }
    }

    /// Appends one argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Appends an argument that is masked in `Display` output.
    pub fn secret_arg(mut self, arg: impl Into<String>) -> Self {
        self.secret_args.push(self.args.len());
        self.args.push(arg.into());
        self
    }

    /// Appends several arguments in order.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Runs the command inside `dir` instead of the caller's working directory.
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn arguments(&self) -> &[String] {
        &self.args
    }

    pub fn working_dir(&self) -> Option<&Path> {
        self.current_dir.as_deref()
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for (idx, arg) in self.args.iter().enumerate() {
            if self.secret_args.contains(&idx) {
                write!(f, " {REDACTED}")?;
            } else if arg.is_empty() || arg.contains(char::is_whitespace) {
                write!(f, " {arg:?}")?;
            } else {
                write!(f, " {arg}")?;
            }
        }
        Ok(())
    }
}

/// Output captured from one finished process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    /// `true` when the process exited with status 0.
    pub exit_ok: bool,
    /// Exit code, `None` when terminated by a signal.
    pub code: Option<i32>,
}

impl CommandOutput {
    /// Builds a successful output from stdout text (used by test runners).
    pub fn success(stdout: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: String::new(),
            exit_ok: true,
            code: Some(0),
        }
    }

    /// stdout followed by stderr, trimmed.
    ///
    /// The two streams are captured separately, so the merge order is always
    /// stdout first regardless of how the process interleaved its writes.
    pub fn combined(&self) -> String {
        let stdout = self.stdout.trim();
        let stderr = self.stderr.trim();
        match (stdout.is_empty(), stderr.is_empty()) {
            (_, true) => stdout.to_owned(),
            (true, false) => stderr.to_owned(),
            (false, false) => format!("{stdout}\n{stderr}"),
        }
    }
}

/// Runs external commands synchronously.
///
/// Implementations must be stateless per call: every invocation allocates its
/// own output buffers and returns them. No retries are performed.
pub trait CommandRunner: Send + Sync {
    /// Spawns the process, waits for it and returns whatever it printed.
    ///
    /// A non-zero exit is **not** an error here; only spawn failures are.
    ///
    /// # Errors
    ///
    /// - `CommandError::Spawn`: the program could not be started
    /// - `CommandError::WorkingDir`: the requested working directory is missing
    fn output(&self, spec: &CommandSpec) -> Result<CommandOutput, CommandError>;

    /// Like [`output`](Self::output), but a non-zero exit becomes
    /// `CommandError::Failed` carrying the captured output.
    fn execute(&self, spec: &CommandSpec) -> Result<CommandOutput, CommandError> {
        let output = self.output(spec)?;
        if output.exit_ok {
            return Ok(output);
        }
        warn!(command = %spec, code = ?output.code, "command exited unsuccessfully");
        Err(CommandError::Failed {
            command: spec.to_string(),
            code: output.code,
            output: output.combined(),
        })
    }
}

impl<R: CommandRunner + ?Sized> CommandRunner for &R {
    fn output(&self, spec: &CommandSpec) -> Result<CommandOutput, CommandError> {
        (**self).output(spec)
    }
}

impl<R: CommandRunner + ?Sized> CommandRunner for std::sync::Arc<R> {
    fn output(&self, spec: &CommandSpec) -> Result<CommandOutput, CommandError> {
        (**self).output(spec)
    }
}

/// Runs commands as real child processes via `std::process::Command`.
///
/// stdin is closed; stdout and stderr are captured in full. The call blocks
/// until the child exits. There is no timeout.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemCommandRunner;

impl SystemCommandRunner {
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for SystemCommandRunner {
    fn output(&self, spec: &CommandSpec) -> Result<CommandOutput, CommandError> {
        let mut command = Command::new(spec.program());
        command
            .args(spec.arguments())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        if let Some(dir) = spec.working_dir() {
            if !dir.is_dir() {
                return Err(CommandError::WorkingDir(dir.display().to_string()));
            }
            command.current_dir(dir);
        }

        debug!(command = %spec, cwd = ?spec.working_dir(), "spawning process");

        let output = command.output().map_err(|source| CommandError::Spawn {
            program: spec.program().to_owned(),
            source,
        })?;

        let result = CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            exit_ok: output.status.success(),
            code: output.status.code(),
        };

        debug!(
            command = %spec,
            code = ?result.code,
            stdout_bytes = result.stdout.len(),
            stderr_bytes = result.stderr.len(),
            "process exited"
        );

        Ok(result)
    }
}

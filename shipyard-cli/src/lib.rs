#![doc = include_str!("../README.md")]
//!
//! The `shipyard` binary is a thin wrapper around these modules.
//!
//! # Module Structure
//!
//! - [`cli`]: Argument parsing (clap derive)
//! - [`commands`]: One handler module per subcommand
//! - [`output`]: Text / JSON rendering (`OutputWriter`, `Render`)
//! - [`logging`]: tracing subscriber setup
//! - [`error`]: `CliError` and exit code mapping

pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;
pub mod output;

#![doc = include_str!("../README.md")]
//!
//! # Module Structure
//!
//! - [`runner`]: Process gateway (`CommandRunner` trait, `SystemCommandRunner`, `CommandSpec`)
//! - [`lifecycle`]: git/compose/container/certbot commands (`Lifecycle`, `LifecycleOp`)
//! - [`output`]: Log text cleanup (ANSI escapes, backspaces)
//! - [`config`]: Binary locations and certbot settings (`LifecycleConfig`, builder)
//! - [`error`]: Domain error types (`CommandError`)

pub mod config;
pub mod error;
pub mod lifecycle;
pub mod output;
pub mod runner;

// --- Public API Re-exports ---

// Process gateway
pub use runner::{CommandOutput, CommandRunner, CommandSpec, SystemCommandRunner};

// Lifecycle
pub use lifecycle::{
    Lifecycle, LifecycleOp, authenticated_clone_url, is_cloned, validate_container_name,
};

// Configuration
pub use config::{LifecycleConfig, LifecycleConfigBuilder};

// Error
pub use error::CommandError;

// Output cleanup
pub use output::{clean_log_text, collapse_backspaces, strip_ansi_escapes};

#![doc = include_str!("../README.md")]
//!
//! # Module Structure
//!
//! - [`framework`]: Framework tags and template options (`Framework`, `DockerfileOptions`)
//! - [`template`]: Pure Dockerfile text generation (`generate`)
//! - [`prerequisite`]: Build descriptor check (`check_prerequisite`)
//! - [`writer`]: File writer seam (`FileWriter` trait, `FsFileWriter`)
//! - [`generator`]: Orchestrator (`DockerfileGenerator`)
//! - [`config`]: Generator configuration (`DockerfileConfig`, builder)
//! - [`error`]: Domain error types (`DockerfileError`)
//!
//! # Flow
//!
//! ```text
//! (framework, version, options) --> generate() --> text
//!                         path --> check_prerequisite()
//!                                        |
//!                      remove existing (gradle/maven/react/vue)
//!                                        |
//!                              FileWriter.write(Dockerfile)
//! ```

pub mod config;
pub mod error;
pub mod framework;
pub mod generator;
pub mod prerequisite;
pub mod template;
pub mod writer;

// --- Public API Re-exports ---

// Generator (main orchestrator)
pub use generator::{DockerfileGenerator, GeneratedDockerfile};

// Configuration
pub use config::{DockerfileConfig, DockerfileConfigBuilder};

// Error
pub use error::DockerfileError;

// Framework
pub use framework::{BuildStage, DockerfileOptions, Framework};

// Operations
pub use prerequisite::check_prerequisite;
pub use template::generate;
pub use writer::{FileWriter, FsFileWriter};

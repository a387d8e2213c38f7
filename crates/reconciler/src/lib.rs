#![doc = include_str!("../README.md")]
//!
//! # Module Structure
//!
//! - [`ps`]: `docker ps -a` table parser (`parse_container_states`, `parse_container_records`)
//! - [`topology`]: Project store decoding and flattening (`TopologySource` trait, `resolve`)
//! - [`reconcile`]: Run status and safety gates (`Reconciler`)
//! - [`config`]: Topology source configuration (`ReconcilerConfig`, builder)
//! - [`error`]: Domain error types (`ReconcilerError`)
//!
//! # Architecture
//!
//! ```text
//! Lifecycle.list_containers() --> ps::parse_container_states() --+
//!                                                                 |-- join by component id
//! TopologySource.load() ------> topology::resolve() -------------+
//!                                                                 |
//!                                   reconcile / check_safe_to_start / check_safe_to_stop
//! ```

pub mod config;
pub mod error;
pub mod ps;
pub mod reconcile;
pub mod topology;

// --- Public API Re-exports ---

// Reconciler (main orchestrator)
pub use reconcile::{Reconciler, reconcile_states, start_verdict, stop_verdict};

// Configuration
pub use config::{ReconcilerConfig, ReconcilerConfigBuilder, SourceKind};

// Error
pub use error::ReconcilerError;

// Process table
pub use ps::{classify_status, parse_container_records, parse_container_states, parse_port_mapping};

// Topology
pub use topology::{
    Component, ComponentRole, ContainerTopologySource, FileTopologySource, ResolvedTopology,
    TopologySource, decode_project, resolve,
};

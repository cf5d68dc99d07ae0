//! Item Board e2e Harness
//!
//! Drives the item board against a live REST API from declarative spec
//! files and writes JUnit reports plus failure snapshots.

pub mod config;
pub mod discover;
pub mod error;
pub mod report;
pub mod runner;
pub mod snapshot;
pub mod spec;

pub use config::{HarnessConfig, Reporter, ReporterOptions};
pub use error::{HarnessError, Result};
pub use runner::{RunSummary, Runner};

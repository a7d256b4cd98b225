//! Pod resource report library
//!
//! This crate provides the pieces of a single-shot namespace report:
//! - Credential loading for a named kubeconfig context
//! - Declared requests/limits per container from the pod API
//! - Live usage from `kubectl top` or the metrics API
//! - Joining the two views and writing JSON artifacts

pub mod config;
pub mod credentials;
pub mod error;
pub mod merge;
pub mod models;
pub mod observability;
pub mod pipeline;
pub mod pods;
pub mod usage;
pub mod writer;

pub use config::{ReportConfig, UsageStrategy};
pub use error::{ReportError, Result};
pub use models::*;
pub use observability::RunLogger;
pub use pipeline::{ReportPipeline, ReportSummary, RunOutcome};

//! Structured run events
//!
//! Every event carries the context and namespace of the run so logs from
//! several invocations can be told apart when collected together.

use std::path::Path;
use tracing::{error, info, warn};

/// Structured logger for one report run
#[derive(Debug, Clone)]
pub struct RunLogger {
    context: String,
    namespace: String,
}

impl RunLogger {
    pub fn new(context: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            context: context.into(),
            namespace: namespace.into(),
        }
    }

    /// Log successful credential loading
    pub fn log_config_loaded(&self, kubeconfig: Option<&Path>) {
        info!(
            event = "config_loaded",
            context = %self.context,
            namespace = %self.namespace,
            kubeconfig = ?kubeconfig,
            "Loaded Kubernetes configuration"
        );
    }

    pub fn log_pods_fetched(&self, pods: usize, containers: usize) {
        info!(
            event = "pods_fetched",
            context = %self.context,
            namespace = %self.namespace,
            pods = pods,
            containers = containers,
            "Fetched pod resource specs"
        );
    }

    /// Log a pod listing failure that is being treated as an empty namespace
    pub fn log_pods_unavailable(&self, reason: &str) {
        error!(
            event = "pods_unavailable",
            context = %self.context,
            namespace = %self.namespace,
            reason = %reason,
            "Failed to fetch pod data"
        );
    }

    pub fn log_no_pods(&self) {
        warn!(
            event = "no_pods",
            context = %self.context,
            namespace = %self.namespace,
            "No pods found, skipping usage and report"
        );
    }

    pub fn log_usage_fetched(&self, source: &str, pods: usize, containers: usize) {
        info!(
            event = "usage_fetched",
            context = %self.context,
            namespace = %self.namespace,
            source = %source,
            pods = pods,
            containers = containers,
            "Fetched container usage"
        );
    }

    /// Log a usage failure; usage fields degrade to N/A
    pub fn log_usage_unavailable(&self, source: &str, reason: &str) {
        warn!(
            event = "usage_unavailable",
            context = %self.context,
            namespace = %self.namespace,
            source = %source,
            reason = %reason,
            "Usage unavailable, reporting N/A"
        );
    }

    pub fn log_snapshot_written(&self, path: &Path) {
        info!(
            event = "snapshot_written",
            context = %self.context,
            namespace = %self.namespace,
            path = %path.display(),
            "Wrote intermediate snapshot"
        );
    }

    pub fn log_report_written(&self, path: &Path, pods: usize, containers: usize) {
        info!(
            event = "report_written",
            context = %self.context,
            namespace = %self.namespace,
            path = %path.display(),
            pods = pods,
            containers = containers,
            "Report saved"
        );
    }
}

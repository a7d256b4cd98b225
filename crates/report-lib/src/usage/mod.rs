//! Live usage fetching
//!
//! Two interchangeable strategies produce the same possibly-partial
//! [`UsageSample`]: parsing `kubectl top` output, or reading the
//! `metrics.k8s.io` API. Only one runs per report, selected by
//! [`UsageStrategy`].

mod kubectl;
mod metrics_api;

#[cfg(test)]
mod tests;

pub use kubectl::{parse_top_output, KubectlTopSource};
pub use metrics_api::{usage_from_metrics, ContainerMetrics, MetricsApiSource, PodMetrics};

use crate::config::{ReportConfig, UsageStrategy};
use crate::error::Result;
use crate::models::UsageSample;
use async_trait::async_trait;
use kube::Client;

/// Fetch per-container usage for a namespace
#[async_trait]
pub trait UsageSource: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    async fn fetch_usage(&self, namespace: &str) -> Result<UsageSample>;
}

/// Create the usage source selected by the configuration
pub fn create_usage_source(config: &ReportConfig, client: Client) -> Box<dyn UsageSource> {
    match config.usage_source {
        UsageStrategy::Cli => {
            tracing::debug!(program = %config.kubectl, "Using kubectl top for usage");
            Box::new(KubectlTopSource::from_config(config))
        }
        UsageStrategy::Api => {
            tracing::debug!("Using metrics.k8s.io API for usage");
            Box::new(MetricsApiSource::new(client))
        }
    }
}

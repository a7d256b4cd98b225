//! Usage from the `metrics.k8s.io/v1beta1` aggregation API

use super::UsageSource;
use crate::error::Result;
use crate::models::{ContainerUsage, ResourceQuantity, UsageSample};
use async_trait::async_trait;
use k8s_openapi::apimachinery::pkg::api::resource::Quantity;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use kube::api::{Api, ListParams};
use kube::Client;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContainerMetrics {
    pub name: String,
    #[serde(default)]
    pub usage: BTreeMap<String, Quantity>,
}

/// A `PodMetrics` object as served by metrics-server
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PodMetrics {
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub containers: Vec<ContainerMetrics>,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub window: Option<String>,
}

// The metrics API has no generated type in k8s-openapi
impl k8s_openapi::Resource for PodMetrics {
    const API_VERSION: &'static str = "metrics.k8s.io/v1beta1";
    const GROUP: &'static str = "metrics.k8s.io";
    const KIND: &'static str = "PodMetrics";
    const VERSION: &'static str = "v1beta1";
    const URL_PATH_SEGMENT: &'static str = "pods";
    type Scope = k8s_openapi::NamespaceResourceScope;
}

impl k8s_openapi::Metadata for PodMetrics {
    type Ty = ObjectMeta;

    fn metadata(&self) -> &Self::Ty {
        &self.metadata
    }

    fn metadata_mut(&mut self) -> &mut Self::Ty {
        &mut self.metadata
    }
}

/// Reads pod metrics through the typed kube API
pub struct MetricsApiSource {
    client: Client,
}

impl MetricsApiSource {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl UsageSource for MetricsApiSource {
    fn name(&self) -> &'static str {
        "metrics-api"
    }

    async fn fetch_usage(&self, namespace: &str) -> Result<UsageSample> {
        let api: Api<PodMetrics> = Api::namespaced(self.client.clone(), namespace);
        let list = api.list(&ListParams::default()).await?;
        debug!(namespace = %namespace, count = list.items.len(), "Fetched pod metrics");
        Ok(usage_from_metrics(&list.items))
    }
}

/// Flatten pod metrics into a usage sample
pub fn usage_from_metrics(items: &[PodMetrics]) -> UsageSample {
    let mut usage = UsageSample::new();

    for pod in items {
        let pod_name = pod.metadata.name.clone().unwrap_or_default();
        for container in &pod.containers {
            let lookup = |key: &str| -> ResourceQuantity {
                container
                    .usage
                    .get(key)
                    .map(|q| ResourceQuantity::new(q.0.clone()))
                    .unwrap_or_default()
            };
            usage.insert(
                pod_name.clone(),
                container.name.clone(),
                ContainerUsage {
                    cpu_usage: lookup("cpu"),
                    memory_usage: lookup("memory"),
                },
            );
        }
    }

    usage
}

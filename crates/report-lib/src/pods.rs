//! Pod spec fetching: declared requests and limits per container

use crate::error::Result;
use crate::models::{ContainerResources, PodResources, ResourcePair, ResourceQuantity};
use async_trait::async_trait;
use k8s_openapi::api::core::v1::{Container, Pod};
use k8s_openapi::apimachinery::pkg::api::resource::Quantity;
use kube::api::{Api, ListParams};
use kube::Client;
use std::collections::BTreeMap;
use tracing::debug;

const PAGE_SIZE: u32 = 500;

/// Source of declared container resources for a namespace
#[async_trait]
pub trait SpecSource: Send + Sync {
    async fn fetch_pods(&self, namespace: &str) -> Result<Vec<PodResources>>;
}

/// Lists pods through the core/v1 API
pub struct ClusterSpecSource {
    client: Client,
}

impl ClusterSpecSource {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SpecSource for ClusterSpecSource {
    async fn fetch_pods(&self, namespace: &str) -> Result<Vec<PodResources>> {
        let pods: Api<Pod> = Api::namespaced(self.client.clone(), namespace);
        let mut params = ListParams::default().limit(PAGE_SIZE);
        let mut results = Vec::new();

        loop {
            let page = pods.list(&params).await?;
            debug!(namespace = %namespace, count = page.items.len(), "Fetched pod page");
            results.extend(page.items.iter().map(pod_resources));

            match page.metadata.continue_ {
                Some(token) if !token.is_empty() => {
                    params = params.continue_token(&token);
                }
                _ => break,
            }
        }

        Ok(results)
    }
}

/// Extract declared resources from a pod object
///
/// Every dimension is present in the result; unset ones are `Unavailable`.
pub fn pod_resources(pod: &Pod) -> PodResources {
    let containers = pod
        .spec
        .as_ref()
        .map(|spec| spec.containers.iter().map(container_resources).collect())
        .unwrap_or_default();

    PodResources {
        pod_name: pod.metadata.name.clone().unwrap_or_default(),
        namespace: pod.metadata.namespace.clone().unwrap_or_default(),
        containers,
    }
}

fn container_resources(container: &Container) -> ContainerResources {
    let resources = container.resources.as_ref();

    ContainerResources {
        container_name: container.name.clone(),
        requests: resource_pair(resources.and_then(|r| r.requests.as_ref())),
        limits: resource_pair(resources.and_then(|r| r.limits.as_ref())),
    }
}

fn resource_pair(values: Option<&BTreeMap<String, Quantity>>) -> ResourcePair {
    let lookup = |key: &str| -> ResourceQuantity {
        values
            .and_then(|v| v.get(key))
            .map(|q| ResourceQuantity::new(q.0.clone()))
            .unwrap_or_default()
    };

    ResourcePair {
        cpu: lookup("cpu"),
        memory: lookup("memory"),
    }
}

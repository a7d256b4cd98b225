//! Core data models for the resource report

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Marker written wherever a quantity is unset or could not be observed
pub const NOT_AVAILABLE: &str = "N/A";

/// A resource quantity as reported by the cluster ("500m", "256Mi", ...)
///
/// Quantities are kept verbatim; no unit normalisation is applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ResourceQuantity {
    Value(String),
    #[default]
    Unavailable,
}

impl ResourceQuantity {
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        if value == NOT_AVAILABLE {
            Self::Unavailable
        } else {
            Self::Value(value)
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Self::Value(_))
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Value(v) => v,
            Self::Unavailable => NOT_AVAILABLE,
        }
    }
}

impl From<Option<String>> for ResourceQuantity {
    fn from(value: Option<String>) -> Self {
        value.map(Self::new).unwrap_or_default()
    }
}

impl From<&str> for ResourceQuantity {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for ResourceQuantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ResourceQuantity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ResourceQuantity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.into())
    }
}

/// CPU and memory pair, used for both requests and limits
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourcePair {
    #[serde(default)]
    pub cpu: ResourceQuantity,
    #[serde(default)]
    pub memory: ResourceQuantity,
}

/// Declared resources of a single container
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerResources {
    pub container_name: String,
    pub requests: ResourcePair,
    pub limits: ResourcePair,
}

/// Declared resources of every container in a pod, in spec order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PodResources {
    pub pod_name: String,
    pub namespace: String,
    pub containers: Vec<ContainerResources>,
}

/// Observed usage of a single container
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerUsage {
    #[serde(default)]
    pub cpu_usage: ResourceQuantity,
    #[serde(default)]
    pub memory_usage: ResourceQuantity,
}

/// Live usage keyed by pod name, then container name
///
/// Possibly partial: a missing entry only means no sample was observed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UsageSample(BTreeMap<String, BTreeMap<String, ContainerUsage>>);

impl UsageSample {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record usage for a container; a later sample for the same key wins
    pub fn insert(
        &mut self,
        pod_name: impl Into<String>,
        container_name: impl Into<String>,
        usage: ContainerUsage,
    ) {
        self.0
            .entry(pod_name.into())
            .or_default()
            .insert(container_name.into(), usage);
    }

    pub fn get(&self, pod_name: &str, container_name: &str) -> Option<&ContainerUsage> {
        self.0.get(pod_name)?.get(container_name)
    }

    pub fn pod(&self, pod_name: &str) -> Option<&BTreeMap<String, ContainerUsage>> {
        self.0.get(pod_name)
    }

    /// Number of pods with at least one sample
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of container samples across all pods
    pub fn container_count(&self) -> usize {
        self.0.values().map(BTreeMap::len).sum()
    }
}

/// Container entry of the merged report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergedContainer {
    #[serde(flatten)]
    pub resources: ContainerResources,
    pub cpu_usage: ResourceQuantity,
    pub memory_usage: ResourceQuantity,
}

/// Pod entry of the merged report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergedPod {
    pub pod_name: String,
    pub namespace: String,
    pub containers: Vec<MergedContainer>,
}

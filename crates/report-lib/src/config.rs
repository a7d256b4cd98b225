//! Run configuration passed explicitly into every component

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Where live usage numbers come from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UsageStrategy {
    /// Parse `kubectl top pods --containers`
    #[default]
    Cli,
    /// Query `metrics.k8s.io/v1beta1` directly
    Api,
}

impl fmt::Display for UsageStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cli => f.write_str("cli"),
            Self::Api => f.write_str("api"),
        }
    }
}

impl FromStr for UsageStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "cli" | "kubectl" => Ok(Self::Cli),
            "api" | "metrics-api" => Ok(Self::Api),
            other => Err(format!("unknown usage source '{}' (expected cli or api)", other)),
        }
    }
}

/// Resolved configuration for one report run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Kubeconfig context to report on
    pub context: String,
    /// Namespace to report on
    pub namespace: String,
    /// Explicit kubeconfig path; the default lookup applies when unset
    #[serde(default)]
    pub kubeconfig: Option<PathBuf>,
    /// Directory receiving the JSON artifacts
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default)]
    pub usage_source: UsageStrategy,
    /// Program invoked by the CLI usage strategy
    #[serde(default = "default_kubectl")]
    pub kubectl: String,
}

pub fn default_output_dir() -> PathBuf {
    PathBuf::from("output")
}

pub fn default_kubectl() -> String {
    "kubectl".to_string()
}

impl ReportConfig {
    pub fn new(context: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            context: context.into(),
            namespace: namespace.into(),
            kubeconfig: None,
            output_dir: default_output_dir(),
            usage_source: UsageStrategy::default(),
            kubectl: default_kubectl(),
        }
    }
}

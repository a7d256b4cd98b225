//! Usage from `kubectl top pods --containers`

use super::UsageSource;
use crate::config::ReportConfig;
use crate::error::{ReportError, Result};
use crate::models::{ContainerUsage, ResourceQuantity, UsageSample};
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::process::Command;
use tracing::{debug, trace};

/// Runs the metrics CLI and parses its tabular output
#[derive(Debug, Clone)]
pub struct KubectlTopSource {
    program: String,
    context: Option<String>,
    kubeconfig: Option<PathBuf>,
}

impl KubectlTopSource {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            context: None,
            kubeconfig: None,
        }
    }

    /// Pin the command to the same context and kubeconfig as the API client
    pub fn from_config(config: &ReportConfig) -> Self {
        Self {
            program: config.kubectl.clone(),
            context: Some(config.context.clone()),
            kubeconfig: config.kubeconfig.clone(),
        }
    }

    pub fn args(&self, namespace: &str) -> Vec<String> {
        let mut args: Vec<String> = ["top", "pods", "-n", namespace, "--containers", "--no-headers"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        if let Some(context) = &self.context {
            args.push("--context".to_string());
            args.push(context.clone());
        }
        if let Some(path) = &self.kubeconfig {
            args.push("--kubeconfig".to_string());
            args.push(path.display().to_string());
        }

        args
    }
}

#[async_trait]
impl UsageSource for KubectlTopSource {
    fn name(&self) -> &'static str {
        "kubectl-top"
    }

    async fn fetch_usage(&self, namespace: &str) -> Result<UsageSample> {
        let args = self.args(namespace);
        debug!(program = %self.program, args = ?args, "Running metrics command");

        let output = Command::new(&self.program)
            .args(&args)
            .output()
            .await
            .map_err(|source| ReportError::CommandSpawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(ReportError::CommandFailed {
                program: self.program.clone(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(parse_top_output(&String::from_utf8_lossy(&output.stdout)))
    }
}

/// Parse `kubectl top pods --containers` rows
///
/// Each row is `POD CONTAINER CPU MEMORY`. Rows with fewer than four
/// whitespace-separated fields are skipped, as is a column header row.
pub fn parse_top_output(output: &str) -> UsageSample {
    let mut usage = UsageSample::new();

    for line in output.lines() {
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() < 4 {
            if !parts.is_empty() {
                trace!(line = %line, "Skipping malformed metrics row");
            }
            continue;
        }
        if is_header(&parts) {
            continue;
        }

        usage.insert(
            parts[0],
            parts[1],
            ContainerUsage {
                cpu_usage: ResourceQuantity::new(parts[2]),
                memory_usage: ResourceQuantity::new(parts[3]),
            },
        );
    }

    usage
}

fn is_header(parts: &[&str]) -> bool {
    parts[0] == "POD" && parts[1] == "NAME" && parts[2].starts_with("CPU")
}

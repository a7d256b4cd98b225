//! Error type shared by the report components

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ReportError>;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Failed to read kubeconfig: {0}")]
    Kubeconfig(#[from] kube::config::KubeconfigError),

    #[error("Context '{context}' not found in kubeconfig (available: {})", .available.join(", "))]
    ContextNotFound {
        context: String,
        available: Vec<String>,
    },

    #[error("Failed to create Kubernetes client: {0}")]
    Client(#[source] kube::Error),

    #[error("Kubernetes API request failed: {0}")]
    Api(#[from] kube::Error),

    #[error("Failed to run '{program}': {source}")]
    CommandSpawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("'{program}' exited with {status}: {stderr}")]
    CommandFailed {
        program: String,
        status: std::process::ExitStatus,
        stderr: String,
    },

    #[error("Failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize report data: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl ReportError {
    /// Whether the error came from loading credentials rather than from a fetch
    pub fn is_credential_error(&self) -> bool {
        matches!(
            self,
            Self::Kubeconfig(_) | Self::ContextNotFound { .. } | Self::Client(_)
        )
    }
}

//! Credential loading: resolves a kubeconfig context into a live client

use crate::config::ReportConfig;
use crate::error::{ReportError, Result};
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::{Client, Config};
use std::path::Path;
use tracing::debug;

/// Read the kubeconfig, either from an explicit path or the default lookup
/// (`KUBECONFIG`, then `~/.kube/config`)
pub fn read_kubeconfig(path: Option<&Path>) -> Result<Kubeconfig> {
    let kubeconfig = match path {
        Some(path) => Kubeconfig::read_from(path)?,
        None => Kubeconfig::read()?,
    };
    Ok(kubeconfig)
}

/// Names of every context declared in the kubeconfig
pub fn context_names(kubeconfig: &Kubeconfig) -> Vec<String> {
    kubeconfig.contexts.iter().map(|c| c.name.clone()).collect()
}

/// Fail with the list of known contexts when `context` is not declared
pub fn ensure_context(kubeconfig: &Kubeconfig, context: &str) -> Result<()> {
    let available = context_names(kubeconfig);
    if available.iter().any(|name| name == context) {
        Ok(())
    } else {
        Err(ReportError::ContextNotFound {
            context: context.to_string(),
            available,
        })
    }
}

/// Build a client scoped to the configured context
///
/// Configuration errors are not transient, so nothing here retries.
pub async fn load_client(config: &ReportConfig) -> Result<Client> {
    let kubeconfig = read_kubeconfig(config.kubeconfig.as_deref())?;
    ensure_context(&kubeconfig, &config.context)?;

    let options = KubeConfigOptions {
        context: Some(config.context.clone()),
        ..Default::default()
    };
    let client_config = Config::from_custom_kubeconfig(kubeconfig, &options).await?;
    debug!(
        context = %config.context,
        cluster_url = %client_config.cluster_url,
        "Resolved cluster configuration"
    );

    Client::try_from(client_config).map_err(ReportError::Client)
}

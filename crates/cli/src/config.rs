//! Configuration management for the CLI
//!
//! Precedence, highest first: command-line flags, `PODRES_*` environment
//! variables, the config file, built-in defaults.

use anyhow::{Context, Result};
use report_lib::{ReportConfig, UsageStrategy};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Settings read from the config file and environment
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Settings {
    /// Directory receiving the JSON artifacts
    pub output_dir: Option<PathBuf>,
    /// Usage strategy (cli or api)
    pub usage_source: Option<UsageStrategy>,
    /// Program used by the cli usage strategy
    pub kubectl: Option<String>,
    /// Kubeconfig file to read instead of the default lookup
    pub kubeconfig: Option<PathBuf>,
}

/// Values given on the command line; `None` defers to lower layers
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub output_dir: Option<PathBuf>,
    pub usage_source: Option<UsageStrategy>,
    pub kubectl: Option<String>,
    pub kubeconfig: Option<PathBuf>,
}

impl Settings {
    /// Load settings from the given file (or the default location) plus
    /// `PODRES_*` environment variables
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(path, None)
    }

    /// Like `load`, reading `PODRES_*` variables from `env` instead of the
    /// process environment when given
    fn load_with_env(path: Option<&Path>, env: Option<config::Map<String, String>>) -> Result<Self> {
        let path = match path {
            Some(path) => Some(path.to_path_buf()),
            None => Self::config_path(),
        };

        let mut builder = config::Config::builder();
        if let Some(path) = &path {
            builder = builder.add_source(
                config::File::from(path.as_path())
                    .format(config::FileFormat::Json)
                    .required(false),
            );
        }
        builder = builder.add_source(config::Environment::with_prefix("PODRES").source(env));

        builder
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Failed to parse configuration")
    }

    /// Default configuration file path
    fn config_path() -> Option<PathBuf> {
        dirs_next::home_dir().map(|home| home.join(".config").join("podres").join("config.json"))
    }

    /// Combine with command-line overrides into the run configuration
    pub fn resolve(self, context: &str, namespace: &str, overrides: Overrides) -> ReportConfig {
        let mut config = ReportConfig::new(context, namespace);

        if let Some(dir) = overrides.output_dir.or(self.output_dir) {
            config.output_dir = dir;
        }
        if let Some(source) = overrides.usage_source.or(self.usage_source) {
            config.usage_source = source;
        }
        if let Some(kubectl) = overrides.kubectl.or(self.kubectl) {
            config.kubectl = kubectl;
        }
        config.kubeconfig = overrides.kubeconfig.or(self.kubeconfig);

        config
    }
}

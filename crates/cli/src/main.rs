//! Pod resource report CLI
//!
//! Collects declared requests/limits and live usage for every container in
//! a namespace and writes a timestamped JSON report.

mod commands;
mod config;
mod output;

use anyhow::Result;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use report_lib::UsageStrategy;
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Pod resource report
#[derive(Parser)]
#[command(name = "podres")]
#[command(
    author,
    version,
    about = "Pod resource report: requests, limits and live usage per container",
    long_about = None
)]
pub struct Cli {
    /// Kubeconfig context to report on
    pub context: String,

    /// Namespace to report on
    pub namespace: String,

    /// Path to kubeconfig file (uses KUBECONFIG or ~/.kube/config if not specified)
    #[arg(long)]
    pub kubeconfig: Option<PathBuf>,

    /// Directory for the JSON artifacts [default: output]
    #[arg(long, short, env = "PODRES_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Usage source: cli (kubectl top) or api (metrics.k8s.io) [default: cli]
    #[arg(long, env = "PODRES_USAGE_SOURCE")]
    pub usage_source: Option<UsageStrategy>,

    /// kubectl binary used by the cli usage source [default: kubectl]
    #[arg(long, env = "PODRES_KUBECTL")]
    pub kubectl: Option<String>,

    /// Configuration file [default: ~/.config/podres/config.json]
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print a summary of the report in this format
    #[arg(long, short)]
    pub format: Option<output::OutputFormat>,

    /// Enable verbose logging
    #[arg(long, short)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long)]
    pub log_json: bool,
}

impl Cli {
    fn overrides(&self) -> config::Overrides {
        config::Overrides {
            output_dir: self.output_dir.clone(),
            usage_source: self.usage_source,
            kubectl: self.kubectl.clone(),
            kubeconfig: self.kubeconfig.clone(),
        }
    }
}

/// Parse arguments; missing positionals print the usage line to stdout and exit 1
fn parse_args() -> Cli {
    match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if err.kind() == ErrorKind::MissingRequiredArgument => {
            println!("{}", Cli::command().render_usage());
            std::process::exit(1);
        }
        Err(err) => err.exit(),
    }
}

/// Logs go to stderr so stdout only carries progress lines
fn init_logging(verbose: bool, json: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = parse_args();
    init_logging(cli.verbose, cli.log_json);

    let settings = config::Settings::load(cli.config.as_deref())?;
    let report_config = settings.resolve(&cli.context, &cli.namespace, cli.overrides());
    tracing::debug!(config = ?report_config, "Resolved configuration");

    commands::report::generate_report(&report_config, cli.format).await
}

//! The report command: load credentials, fetch, merge, write

use anyhow::{Context, Result};
use chrono::Local;
use colored::Colorize;
use report_lib::{ReportConfig, ReportPipeline, RunOutcome};

use crate::output::{
    print_error, print_info, print_report, print_success, print_warning, OutputFormat,
};

/// Generate the report for one context and namespace
///
/// Credential failures are reported on stdout and exit 1; write failures are
/// returned. Fetch failures are reported on stdout and degrade the report.
pub async fn generate_report(config: &ReportConfig, format: Option<OutputFormat>) -> Result<()> {
    let pipeline = match ReportPipeline::connect(config).await {
        Ok(pipeline) => pipeline,
        Err(err) => {
            print_error(&format!(
                "Error loading kubeconfig with context '{}': {}",
                config.context, err
            ));
            std::process::exit(1);
        }
    };
    print_success(&format!(
        "Loaded Kubernetes config with context: {}",
        config.context.cyan()
    ));
    print_info(&format!("Collecting usage via {}", pipeline.usage_source_name()));

    let outcome = pipeline
        .run(Local::now().naive_local())
        .await
        .context("Failed to write report")?;

    match outcome {
        RunOutcome::NoPods { fetch_error, .. } => {
            if let Some(err) = fetch_error {
                print_error(&format!("Error fetching pod data: {}", err));
            }
            print_warning(&format!("No pods found in namespace '{}'.", config.namespace));
        }
        RunOutcome::Written(summary) => {
            if let Some(err) = &summary.usage_error {
                print_warning(&format!(
                    "Could not fetch usage ({}); usage reported as N/A",
                    err
                ));
            }
            print_success(&format!("Report saved to {}", summary.report_path.display()));

            if let Some(format) = format {
                println!();
                print_report(&summary.report, format)?;
            }
        }
    }

    Ok(())
}

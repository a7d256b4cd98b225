//! Output formatting utilities

use clap::ValueEnum;
use colored::Colorize;
use report_lib::{MergedPod, ResourceQuantity};
use tabled::{settings::Style, Table, Tabled};

/// Format for the optional report summary on stdout
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Table format (default)
    #[default]
    Table,
    /// JSON format
    Json,
}

/// One container of the merged report
#[derive(Tabled)]
struct ReportRow {
    #[tabled(rename = "Pod")]
    pod: String,
    #[tabled(rename = "Container")]
    container: String,
    #[tabled(rename = "CPU Req")]
    cpu_request: String,
    #[tabled(rename = "CPU Lim")]
    cpu_limit: String,
    #[tabled(rename = "CPU Used")]
    cpu_usage: String,
    #[tabled(rename = "Mem Req")]
    memory_request: String,
    #[tabled(rename = "Mem Lim")]
    memory_limit: String,
    #[tabled(rename = "Mem Used")]
    memory_usage: String,
}

/// Print the merged report in the requested format
pub fn print_report(report: &[MergedPod], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(report)?);
        }
        OutputFormat::Table => {
            let rows: Vec<ReportRow> = report
                .iter()
                .flat_map(|pod| {
                    pod.containers.iter().map(move |c| ReportRow {
                        pod: pod.pod_name.clone(),
                        container: c.resources.container_name.clone(),
                        cpu_request: color_quantity(&c.resources.requests.cpu),
                        cpu_limit: color_quantity(&c.resources.limits.cpu),
                        cpu_usage: color_quantity(&c.cpu_usage),
                        memory_request: color_quantity(&c.resources.requests.memory),
                        memory_limit: color_quantity(&c.resources.limits.memory),
                        memory_usage: color_quantity(&c.memory_usage),
                    })
                })
                .collect();

            if rows.is_empty() {
                println!("{}", "No containers found".yellow());
                return Ok(());
            }

            let table = Table::new(&rows).with(Style::rounded()).to_string();
            println!("{}", table);
            println!("\nTotal: {} containers in {} pods", rows.len(), report.len());
        }
    }

    Ok(())
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message);
}

/// Print an error message
pub fn print_error(message: &str) {
    println!("{} {}", "✗".red().bold(), message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
    println!("{} {}", "⚠".yellow().bold(), message);
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}

/// Unavailable quantities are dimmed
fn color_quantity(quantity: &ResourceQuantity) -> String {
    if quantity.is_available() {
        quantity.to_string()
    } else {
        quantity.as_str().dimmed().to_string()
    }
}

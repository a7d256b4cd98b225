//! Report orchestration: specs, usage, merge, write
//!
//! Runs strictly in sequence. Fetch failures degrade to empty results;
//! write failures are returned to the caller.

use crate::config::ReportConfig;
use crate::credentials::load_client;
use crate::error::{ReportError, Result};
use crate::merge::merge;
use crate::models::{MergedPod, UsageSample};
use crate::observability::RunLogger;
use crate::pods::{ClusterSpecSource, SpecSource};
use crate::usage::{create_usage_source, UsageSource};
use crate::writer::ReportWriter;
use chrono::NaiveDateTime;
use std::path::PathBuf;

/// What a successful run produced
#[derive(Debug)]
pub enum RunOutcome {
    /// Nothing to report; only the pod snapshot was written
    NoPods {
        pod_data: PathBuf,
        /// Set when the listing failed rather than the namespace being empty
        fetch_error: Option<ReportError>,
    },
    Written(ReportSummary),
}

#[derive(Debug)]
pub struct ReportSummary {
    pub pod_data: PathBuf,
    pub usage_data: PathBuf,
    pub report_path: PathBuf,
    pub report: Vec<MergedPod>,
    /// Set when usage could not be fetched and every usage field is N/A
    pub usage_error: Option<ReportError>,
}

impl ReportSummary {
    pub fn container_count(&self) -> usize {
        self.report.iter().map(|p| p.containers.len()).sum()
    }
}

pub struct ReportPipeline {
    context: String,
    namespace: String,
    specs: Box<dyn SpecSource>,
    usage: Box<dyn UsageSource>,
    writer: ReportWriter,
    logger: RunLogger,
}

impl ReportPipeline {
    pub fn new(
        config: &ReportConfig,
        specs: Box<dyn SpecSource>,
        usage: Box<dyn UsageSource>,
    ) -> Self {
        Self {
            context: config.context.clone(),
            namespace: config.namespace.clone(),
            specs,
            usage,
            writer: ReportWriter::new(config.output_dir.clone()),
            logger: RunLogger::new(&config.context, &config.namespace),
        }
    }

    /// Load credentials for the configured context and wire the cluster sources
    pub async fn connect(config: &ReportConfig) -> Result<Self> {
        let client = load_client(config).await?;
        RunLogger::new(&config.context, &config.namespace)
            .log_config_loaded(config.kubeconfig.as_deref());

        let usage = create_usage_source(config, client.clone());
        let specs = Box::new(ClusterSpecSource::new(client));
        Ok(Self::new(config, specs, usage))
    }

    pub fn usage_source_name(&self) -> &'static str {
        self.usage.name()
    }

    /// Run once; `now` stamps the report file name
    pub async fn run(&self, now: NaiveDateTime) -> Result<RunOutcome> {
        let (pods, fetch_error) = match self.specs.fetch_pods(&self.namespace).await {
            Ok(pods) => (pods, None),
            Err(err) => {
                self.logger.log_pods_unavailable(&err.to_string());
                (Vec::new(), Some(err))
            }
        };
        let containers: usize = pods.iter().map(|p| p.containers.len()).sum();
        self.logger.log_pods_fetched(pods.len(), containers);

        let pod_data = self.writer.write_pod_data(&pods)?;
        self.logger.log_snapshot_written(&pod_data);

        if pods.is_empty() {
            self.logger.log_no_pods();
            return Ok(RunOutcome::NoPods {
                pod_data,
                fetch_error,
            });
        }

        let source = self.usage.name();
        let (usage, usage_error) = match self.usage.fetch_usage(&self.namespace).await {
            Ok(usage) => {
                self.logger
                    .log_usage_fetched(source, usage.len(), usage.container_count());
                (usage, None)
            }
            Err(err) => {
                self.logger.log_usage_unavailable(source, &err.to_string());
                (UsageSample::new(), Some(err))
            }
        };

        let usage_data = self.writer.write_usage_data(&usage)?;
        self.logger.log_snapshot_written(&usage_data);

        let report = merge(&pods, &usage);
        let report_path = self
            .writer
            .write_report(&report, &self.context, &self.namespace, now)?;
        let index = self.writer.write_index()?;
        self.logger.log_snapshot_written(&index);

        let summary = ReportSummary {
            pod_data,
            usage_data,
            report_path,
            report,
            usage_error,
        };
        self.logger.log_report_written(
            &summary.report_path,
            summary.report.len(),
            summary.container_count(),
        );

        Ok(RunOutcome::Written(summary))
    }
}

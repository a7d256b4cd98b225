//! JSON artifacts written under the output directory

use crate::error::{ReportError, Result};
use crate::models::{MergedPod, PodResources, UsageSample};
use chrono::NaiveDateTime;
use serde::Serialize;
use std::path::PathBuf;

pub const POD_DATA_FILE: &str = "pod_data.json";
pub const USAGE_DATA_FILE: &str = "usage_data.json";
/// Report file names for the bundled viewer, newest first
pub const INDEX_FILE: &str = "index_data.json";

/// File name of the merged report for a context/namespace pair
///
/// Minute resolution: two runs against the same target within one minute
/// write to the same file.
pub fn report_file_name(context: &str, namespace: &str, at: NaiveDateTime) -> String {
    format!(
        "report-{}-{}-{}.json",
        context,
        namespace,
        at.format("%Y%m%d-%H%M")
    )
}

fn is_report_file(name: &str) -> bool {
    name.starts_with("report-") && name.ends_with(".json")
}

/// Trailing `YYYYMMDD-HHMM` of a report file name
fn report_stamp(name: &str) -> &str {
    let stem = name.strip_suffix(".json").unwrap_or(name);
    let split = stem.len().saturating_sub("YYYYMMDD-HHMM".len());
    stem.get(split..).unwrap_or(stem)
}

/// Writes pretty-printed JSON (2-space indent) into one directory
#[derive(Debug, Clone)]
pub struct ReportWriter {
    output_dir: PathBuf,
}

impl ReportWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Snapshot of the declared pod resources
    pub fn write_pod_data(&self, pods: &[PodResources]) -> Result<PathBuf> {
        self.write_json(POD_DATA_FILE, pods)
    }

    /// Snapshot of the raw usage sample
    pub fn write_usage_data(&self, usage: &UsageSample) -> Result<PathBuf> {
        self.write_json(USAGE_DATA_FILE, usage)
    }

    /// The final merged report
    pub fn write_report(
        &self,
        report: &[MergedPod],
        context: &str,
        namespace: &str,
        at: NaiveDateTime,
    ) -> Result<PathBuf> {
        self.write_json(&report_file_name(context, namespace, at), report)
    }

    /// Rewrite the index of every report file in the output directory
    ///
    /// Names sort by the `YYYYMMDD-HHMM` stamp, newest first, so reports for
    /// different contexts interleave by time.
    pub fn write_index(&self) -> Result<PathBuf> {
        let entries = std::fs::read_dir(&self.output_dir).map_err(|source| ReportError::Io {
            path: self.output_dir.clone(),
            source,
        })?;

        let mut reports = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| ReportError::Io {
                path: self.output_dir.clone(),
                source,
            })?;
            if let Some(name) = entry.file_name().to_str() {
                if is_report_file(name) {
                    reports.push(name.to_string());
                }
            }
        }
        reports.sort_by(|a, b| {
            report_stamp(b)
                .cmp(report_stamp(a))
                .then_with(|| a.cmp(b))
        });

        self.write_json(INDEX_FILE, &reports)
    }

    fn write_json<T: Serialize + ?Sized>(&self, file_name: &str, value: &T) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.output_dir).map_err(|source| ReportError::Io {
            path: self.output_dir.clone(),
            source,
        })?;

        let path = self.output_dir.join(file_name);
        let json = serde_json::to_string_pretty(value)?;
        std::fs::write(&path, json).map_err(|source| ReportError::Io {
            path: path.clone(),
            source,
        })?;

        Ok(path)
    }
}

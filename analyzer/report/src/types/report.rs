use crate::error::ReportError;
use serde::Serialize;
use std::path::Path;

/// Reports that can be written next to the rendered charts as `*.json`.
pub trait JsonReport: Serialize {
    fn dump_to_json(&self, path: &Path) -> Result<(), ReportError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let report_json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, report_json)?;
        Ok(())
    }
}

impl JsonReport for super::throughput_report::ThroughputReport {}
impl JsonReport for super::throughput_report::PartitionThroughputReport {}
impl JsonReport for super::latency_report::LatencyCdfReport {}
impl JsonReport for super::latency_report::BlockIntervalReport {}
impl JsonReport for super::micro_report::MicroReport {}
impl JsonReport for super::comparison_report::ComparisonReport {}

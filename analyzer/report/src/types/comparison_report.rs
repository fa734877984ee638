use derive_new::new;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, new)]
pub struct ComparisonEntry {
    /// Axis label, usually the number of shards
    pub label: String,

    /// Transactions per second of the measured run
    pub rate: f64,

    /// Transactions per second of the 0% cross-shard run with the same shard count
    pub baseline_rate: Option<f64>,
}

/// Whole-run throughput for several shard counts.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct ComparisonReport {
    pub cross_shard_percent: u32,
    pub entries: Vec<ComparisonEntry>,
}

impl ComparisonReport {
    pub fn has_baseline(&self) -> bool {
        self.entries.iter().any(|e| e.baseline_rate.is_some())
    }
}

use crate::{
    comparison_report::ComparisonReport,
    latency_report::{BlockIntervalReport, LatencyCdfReport},
    plotting::chart_kind::ChartKind,
    throughput_report::{PartitionThroughputReport, ThroughputReport},
};

impl ThroughputReport {
    pub fn title(&self, kind: ChartKind) -> String {
        match self.partitions.len() {
            1 => format!("{} - Partition {}", kind, self.partitions[0]),
            count => format!("{} - {} Partitions", kind, count),
        }
    }
}

impl PartitionThroughputReport {
    pub fn title(&self) -> String {
        format!("{} - Partition {}", ChartKind::PartitionThroughput, self.partition)
    }
}

impl BlockIntervalReport {
    pub fn title(&self) -> String {
        format!("{} - {}", ChartKind::BlockInterval, self.source)
    }
}

impl LatencyCdfReport {
    pub fn title(&self) -> String {
        format!("{} - {}", ChartKind::LatencyCdf, self.source)
    }
}

impl ComparisonReport {
    pub fn title(&self) -> String {
        format!(
            "{} - {}% Cross-Shard",
            ChartKind::Comparison,
            self.cross_shard_percent
        )
    }
}

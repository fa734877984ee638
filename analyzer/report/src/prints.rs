use colored::{Color, Colorize};
use tracing::info;

use crate::{
    comparison_report::ComparisonReport,
    latency_report::{BlockIntervalReport, LatencyCdfReport},
    micro_report::MicroReport,
    throughput_report::{PartitionThroughputReport, ThroughputReport},
};

impl ThroughputReport {
    pub fn print_summary(&self) {
        let color = if self.is_empty() {
            Color::Red
        } else {
            Color::Green
        };
        let window = self
            .window
            .map(|w| format!("{:.2} s", w.duration_s()))
            .unwrap_or_else(|| "none".to_owned());
        let summary = format!(
            "Throughput results: partitions: {:?}, window: {}, buckets: {}, total transactions: {}, relocated: {}, average: {:.2} tx/s, peak bucket: {:.2} tx/s",
            self.partitions,
            window,
            self.aggregate.len(),
            self.total_events,
            self.relocated_events,
            self.average_rate(),
            self.peak_rate(),
        )
        .color(color);

        info!("{}", summary);
    }
}

impl PartitionThroughputReport {
    pub fn print_summary(&self) {
        let summary = format!(
            "Partition {} results: blocks: {}, rate points: {}, relocated: {}, negative deltas: {}",
            self.partition,
            self.samples,
            self.rates.len(),
            self.relocated_events,
            self.negative_deltas,
        );
        let summary = if self.negative_deltas > 0 {
            summary.yellow()
        } else {
            summary.green()
        };

        info!("{}", summary);
    }
}

impl BlockIntervalReport {
    pub fn print_summary(&self) {
        info!(
            "{}",
            format!(
                "Average block interval: {:.3} s over {} blocks",
                self.average_interval_s,
                self.intervals.len()
            )
            .blue()
        );
        for block in &self.slow_blocks {
            info!(
                "{}",
                format!(
                    "Slow block #{}: {:.3} s, proposer: {}",
                    block.index,
                    block.interval_s,
                    block.validator.as_deref().unwrap_or("unknown")
                )
                .yellow()
            );
        }
    }
}

impl LatencyCdfReport {
    pub fn print_summary(&self) {
        let p = &self.percentiles;
        let summary = format!(
            "Latency results ({}): samples: {}, kept: {}, average: {:.3} s, p50: {:.3} s, p90: {:.3} s, p99: {:.3} s, max: {:.3} s",
            self.source, self.samples, self.trimmed_samples, p.avg_s, p.p50_s, p.p90_s, p.p99_s, p.max_s,
        )
        .green();

        info!("{}", summary);
    }
}

impl MicroReport {
    pub fn print_summary(&self) {
        for (name, points) in [("Storage proof", &self.proofs), ("Header", &self.headers)] {
            let sizes = points
                .iter()
                .map(|p| format!("{}: {:.2} kb", p.x, p.size_kb))
                .collect::<Vec<_>>()
                .join(", ");
            info!("{}", format!("{name} sizes: {sizes}").blue());
        }
    }
}

impl ComparisonReport {
    pub fn print_summary(&self) {
        for entry in &self.entries {
            let baseline = entry
                .baseline_rate
                .map(|b| format!(", 0% cross-shard: {:.2} tx/s", b))
                .unwrap_or_default();
            info!(
                "{}",
                format!(
                    "{} shards: {:.2} tx/s{}",
                    entry.label, entry.rate, baseline
                )
                .green()
            );
        }
    }
}

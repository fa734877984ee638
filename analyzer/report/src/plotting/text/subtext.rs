use crate::{
    comparison_report::ComparisonReport,
    latency_report::{BlockIntervalReport, LatencyCdfReport},
    micro_report::MicroReport,
    throughput_report::{PartitionThroughputReport, ThroughputReport},
};
use human_repr::HumanCount;

impl ThroughputReport {
    pub fn subtext(&self) -> String {
        let window = match self.window {
            Some(window) => format!("Window: {:.1} s", window.duration_s()),
            None => "Window: partitions never overlap".to_owned(),
        };
        let events = (self.total_events.max(0) as u64).human_count_bare();
        let relocated = (self.relocated_events.max(0) as u64).human_count_bare();
        let smoothing = if self.moving_average_window > 1 {
            format!("  •  SMA window: {}", self.moving_average_window)
        } else {
            String::new()
        };

        format!(
            "{window}  •  Bucket: {} s{smoothing}  •  {events} Transactions  •  {relocated} Relocated\nAvg: {:.2} tx/s  •  Peak bucket: {:.2} tx/s",
            self.bucket_width_secs,
            self.average_rate(),
            self.peak_rate(),
        )
    }
}

impl PartitionThroughputReport {
    pub fn subtext(&self) -> String {
        let mut text = format!(
            "{} Blocks  •  {} Relocated",
            (self.samples as u64).human_count_bare(),
            (self.relocated_events.max(0) as u64).human_count_bare()
        );
        if self.negative_deltas > 0 {
            text.push_str(&format!(
                "  •  {} negative deltas after relocation correction",
                self.negative_deltas
            ));
        }
        text
    }
}

impl BlockIntervalReport {
    pub fn subtext(&self) -> String {
        format!(
            "{} Blocks  •  Avg interval: {:.3} s  •  {} above {} s",
            (self.intervals.len() as u64).human_count_bare(),
            self.average_interval_s,
            self.slow_blocks.len(),
            self.slow_threshold_s
        )
    }
}

impl LatencyCdfReport {
    pub fn subtext(&self) -> String {
        format!(
            "{} of {} Samples kept ({:.0}%-{:.0}%)\nAvg: {:.3} s  •  P50: {:.3} s  •  P90: {:.3} s  •  P99: {:.3} s  •  Max: {:.3} s",
            (self.trimmed_samples as u64).human_count_bare(),
            (self.samples as u64).human_count_bare(),
            self.trim.0 * 100.0,
            self.trim.1 * 100.0,
            self.percentiles.avg_s,
            self.percentiles.p50_s,
            self.percentiles.p90_s,
            self.percentiles.p99_s,
            self.percentiles.max_s,
        )
    }
}

impl MicroReport {
    pub fn subtext(&self) -> String {
        format!(
            "{} proof measurements  •  {} header measurements",
            self.proofs.len(),
            self.headers.len()
        )
    }
}

impl ComparisonReport {
    pub fn subtext(&self) -> String {
        self.entries
            .iter()
            .map(|e| format!("{}: {:.1} tx/s", e.label, e.rate))
            .collect::<Vec<_>>()
            .join("  •  ")
    }
}

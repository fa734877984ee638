use super::time_series::TimeSeries;
use derive_new::new;
use serde::{Deserialize, Serialize};

/// Overlapping time range shared by all partitions, in absolute seconds.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default, new)]
pub struct WindowSummary {
    pub start_s: f64,
    pub end_s: f64,
}

impl WindowSummary {
    pub fn duration_s(&self) -> f64 {
        self.end_s - self.start_s
    }
}

/// Moment at which the replayer stopped feeding a partition.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, new)]
pub struct StopMarker {
    pub partition: u32,
    pub time_s: f64,
}

/// Aggregated throughput of one or more partitions, bucketed on a fixed grid.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct ThroughputReport {
    /// Partition identifiers that took part in the aggregation
    pub partitions: Vec<u32>,

    /// Bucket width used for the aggregation
    pub bucket_width_secs: f64,

    /// Moving average window applied to the aggregate series (1 = none)
    pub moving_average_window: u32,

    /// Common window, absent when the partitions never overlap
    pub window: Option<WindowSummary>,

    /// Sum of the final relocation-corrected counters inside the window
    pub total_events: i64,

    /// Number of transactions subtracted as relocations, over all partitions
    pub relocated_events: i64,

    /// Nanosecond timestamp of the experiment begin marker, if any
    pub experiment_begin_ns: Option<i64>,

    /// Aggregate rate in events/s, time in absolute seconds
    pub aggregate: TimeSeries,

    pub stop_markers: Vec<StopMarker>,
}

impl ThroughputReport {
    pub fn is_empty(&self) -> bool {
        self.aggregate.is_empty()
    }

    /// Average rate over the whole window, derived from the event total.
    pub fn average_rate(&self) -> f64 {
        match self.window {
            Some(window) if window.duration_s() > 0.0 => {
                self.total_events as f64 / window.duration_s()
            }
            _ => 0.0,
        }
    }

    pub fn peak_rate(&self) -> f64 {
        self.aggregate
            .points
            .iter()
            .map(|p| p.value)
            .fold(0.0, f64::max)
    }
}

/// Per-sample rates of a single partition, not aligned to any grid.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct PartitionThroughputReport {
    pub partition: u32,
    pub experiment_begin_ns: Option<i64>,
    pub samples: usize,
    pub negative_deltas: usize,
    pub relocated_events: i64,
    /// Rate in events/s at the midpoint of every pair of consecutive samples
    pub rates: TimeSeries,
    pub stop_marker: Option<StopMarker>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time_series::{TimePoint, TimeSeriesKind};

    #[test]
    fn average_rate_should_use_window_duration() {
        let report = ThroughputReport {
            window: Some(WindowSummary::new(10.0, 20.0)),
            total_events: 500,
            ..Default::default()
        };

        assert_eq!(report.average_rate(), 50.0);
    }

    #[test]
    fn average_rate_without_window_should_be_zero() {
        let report = ThroughputReport {
            total_events: 500,
            ..Default::default()
        };

        assert_eq!(report.average_rate(), 0.0);
    }

    #[test]
    fn peak_rate_should_pick_largest_bucket() {
        let report = ThroughputReport {
            aggregate: TimeSeries::from_points(
                vec![
                    TimePoint::new(1.0, 3.0),
                    TimePoint::new(2.0, 9.0),
                    TimePoint::new(3.0, 4.0),
                ],
                TimeSeriesKind::AggregateThroughput,
            ),
            ..Default::default()
        };

        assert_eq!(report.peak_rate(), 9.0);
    }
}

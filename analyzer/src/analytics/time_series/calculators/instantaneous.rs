use super::TimeSeriesCalculation;
use crate::analytics::stream::{Stream, NANOS_PER_SEC};
use shard_bench_report::time_series::{TimePoint, TimeSeries, TimeSeriesKind};
use tracing::warn;

/// Rate between every pair of consecutive samples, not aligned to any grid.
pub struct InstantaneousRateCalculator;

impl InstantaneousRateCalculator {
    /// Number of consecutive pairs whose counter goes backwards.
    pub fn negative_deltas(&self, stream: &Stream) -> usize {
        stream
            .samples
            .windows(2)
            .filter(|pair| pair[1].count < pair[0].count)
            .count()
    }
}

impl TimeSeriesCalculation for InstantaneousRateCalculator {
    fn calculate(&self, stream: &Stream) -> TimeSeries {
        if stream.len() < 2 {
            warn!(
                "Partition {}: not enough samples to calculate rates",
                stream.partition
            );
            return TimeSeries::empty(TimeSeriesKind::PartitionThroughput);
        }

        let mut points = Vec::with_capacity(stream.len() - 1);
        for pair in stream.samples.windows(2) {
            let (prev, current) = (&pair[0], &pair[1]);
            let elapsed_ns = current.timestamp_ns - prev.timestamp_ns;
            if elapsed_ns <= 0 {
                break;
            }
            let delta = current.count - prev.count;
            if delta < 0 {
                warn!(
                    "Partition {}: counter decreased by {} at {} ns",
                    stream.partition, -delta, current.timestamp_ns
                );
            }
            let midpoint_s =
                (prev.timestamp_ns as f64 + current.timestamp_ns as f64) / 2.0 / NANOS_PER_SEC;
            points.push(TimePoint::new(
                midpoint_s,
                delta as f64 / (elapsed_ns as f64 / NANOS_PER_SEC),
            ));
        }

        TimeSeries::from_points(points, TimeSeriesKind::PartitionThroughput)
    }
}

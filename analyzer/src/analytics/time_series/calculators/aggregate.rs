use crate::analytics::alignment::AlignmentWindow;
use crate::analytics::stream::{Stream, NANOS_PER_SEC};
use shard_bench_report::time_series::{TimePoint, TimeSeries, TimeSeriesKind};
use tracing::{debug, warn};

/// One point of the merged throughput series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AggregatedBucket {
    /// Mean of the per-stream boundary midpoints, absolute seconds
    pub midpoint_s: f64,
    /// Sum of the per-stream rates, events/s
    pub rate: f64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AggregationOutcome {
    pub window: Option<AlignmentWindow>,
    pub buckets: Vec<AggregatedBucket>,
    /// Sum of the final counters of every trimmed stream
    pub total_events: i64,
}

impl AggregationOutcome {
    fn empty(window: Option<AlignmentWindow>) -> Self {
        Self {
            window,
            ..Default::default()
        }
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn to_time_series(&self) -> TimeSeries {
        TimeSeries::from_points(
            self.buckets
                .iter()
                .map(|b| TimePoint::new(b.midpoint_s, b.rate))
                .collect(),
            TimeSeriesKind::AggregateThroughput,
        )
    }
}

/// Merges several cumulative counter streams into one rate series on a
/// fixed time grid anchored at the start of their common window.
pub struct BucketedThroughputCalculator {
    bucket_width_ns: f64,
}

impl BucketedThroughputCalculator {
    pub fn new(bucket_width_secs: f64) -> Self {
        Self {
            bucket_width_ns: bucket_width_secs * NANOS_PER_SEC,
        }
    }

    pub fn aggregate(&self, streams: &[Stream]) -> AggregationOutcome {
        if !(self.bucket_width_ns.is_finite() && self.bucket_width_ns >= 1.0) {
            warn!("Bucket width must be positive, nothing to aggregate");
            return AggregationOutcome::empty(None);
        }

        let Some(window) = AlignmentWindow::of(streams) else {
            warn!(
                "{} streams have no overlapping time range, nothing to aggregate",
                streams.len()
            );
            return AggregationOutcome::empty(None);
        };
        let Some(streams) = window.trim(streams) else {
            warn!("A stream has no samples inside the common window, nothing to aggregate");
            return AggregationOutcome::empty(Some(window));
        };

        let total_events = streams.iter().filter_map(Stream::final_count).sum();
        let buckets = self.walk(&streams, window.start_ns);
        debug!(
            "Aggregated {} streams into {} buckets over [{}, {}] ns",
            streams.len(),
            buckets.len(),
            window.start_ns,
            window.end_ns
        );

        AggregationOutcome {
            window: Some(window),
            buckets,
            total_events,
        }
    }

    // Every stream keeps the index of its last boundary sample. For bucket k
    // each cursor moves to the first later sample reaching the k-th grid edge.
    fn walk(&self, streams: &[Stream], start_ns: i64) -> Vec<AggregatedBucket> {
        let mut cursors = vec![0usize; streams.len()];
        let mut buckets = Vec::new();

        for k in 1u64.. {
            let offset_ns = (k as f64 * self.bucket_width_ns).round() as i64;
            let edge_ns = start_ns.saturating_add(offset_ns);
            let mut rate = 0.0;
            let mut midpoints = 0.0;

            for (stream, cursor) in streams.iter().zip(cursors.iter_mut()) {
                let prev = &stream.samples[*cursor];
                let Some(offset) = stream.samples[*cursor + 1..]
                    .iter()
                    .position(|s| s.timestamp_ns >= edge_ns)
                else {
                    return buckets;
                };
                let next_index = *cursor + 1 + offset;
                let next = &stream.samples[next_index];

                let elapsed_ns = next.timestamp_ns - prev.timestamp_ns;
                if elapsed_ns <= 0 {
                    return buckets;
                }
                let delta = next.count - prev.count;
                if delta < 0 {
                    warn!(
                        "Partition {}: counter decreased by {} between {} and {} ns",
                        stream.partition, -delta, prev.timestamp_ns, next.timestamp_ns
                    );
                }

                rate += delta as f64 / (elapsed_ns as f64 / NANOS_PER_SEC);
                midpoints += (prev.timestamp_ns as f64 + next.timestamp_ns as f64) / 2.0;
                *cursor = next_index;
            }

            buckets.push(AggregatedBucket {
                midpoint_s: midpoints / streams.len() as f64 / NANOS_PER_SEC,
                rate,
            });
        }

        buckets
    }
}

use super::TimeSeriesCalculation;
use crate::analytics::stream::{Stream, NANOS_PER_SEC};
use shard_bench_report::time_series::{TimePoint, TimeSeries, TimeSeriesKind};

/// Seconds between consecutive blocks, indexed by block position in the log.
pub struct BlockIntervalCalculator;

impl TimeSeriesCalculation for BlockIntervalCalculator {
    fn calculate(&self, stream: &Stream) -> TimeSeries {
        let points = stream
            .samples
            .windows(2)
            .enumerate()
            .map(|(index, pair)| {
                let interval_s =
                    (pair[1].timestamp_ns - pair[0].timestamp_ns) as f64 / NANOS_PER_SEC;
                TimePoint::new(index as f64, interval_s)
            })
            .collect();

        TimeSeries::from_points(points, TimeSeriesKind::BlockInterval)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::stream::Sample;

    #[test]
    fn intervals_should_be_indexed_from_zero() {
        let stream = Stream::new(
            1,
            vec![
                Sample::new(0, 0),
                Sample::new(2_000_000_000, 5),
                Sample::new(2_500_000_000, 9),
            ],
        );

        let series = BlockIntervalCalculator.calculate(&stream);

        assert_eq!(series.as_pairs(), vec![(0.0, 2.0), (1.0, 0.5)]);
    }
}

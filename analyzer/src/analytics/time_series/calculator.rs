use super::calculators::{
    AggregationOutcome, BlockIntervalCalculator, BucketedThroughputCalculator,
    InstantaneousRateCalculator, TimeSeriesCalculation,
};
use super::processors::{moving_average::MovingAverageProcessor, TimeSeriesProcessor};
use crate::analytics::stream::Stream;
use shard_bench_report::time_series::TimeSeries;

/// Calculate time series data from parsed partition streams
#[derive(Debug, Default)]
pub struct TimeSeriesCalculator;

impl TimeSeriesCalculator {
    pub fn new() -> Self {
        Self
    }

    pub fn aggregate_throughput(
        &self,
        streams: &[Stream],
        bucket_width_secs: f64,
    ) -> AggregationOutcome {
        BucketedThroughputCalculator::new(bucket_width_secs).aggregate(streams)
    }

    pub fn instantaneous_throughput(&self, stream: &Stream) -> TimeSeries {
        InstantaneousRateCalculator.calculate(stream)
    }

    pub fn negative_deltas(&self, stream: &Stream) -> usize {
        InstantaneousRateCalculator.negative_deltas(stream)
    }

    pub fn block_intervals(&self, stream: &Stream) -> TimeSeries {
        BlockIntervalCalculator.calculate(stream)
    }

    pub fn moving_average(&self, series: &TimeSeries, window: u32) -> TimeSeries {
        MovingAverageProcessor::new(window).process(series)
    }
}

mod aggregate;
mod block_interval;
mod instantaneous;

use crate::analytics::stream::Stream;
use shard_bench_report::time_series::TimeSeries;

pub use aggregate::{AggregationOutcome, BucketedThroughputCalculator};
pub use block_interval::BlockIntervalCalculator;
pub use instantaneous::InstantaneousRateCalculator;

/// Common functionality for per-stream time series calculations
pub trait TimeSeriesCalculation {
    fn calculate(&self, stream: &Stream) -> TimeSeries;
}

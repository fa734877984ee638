use shard_bench_report::time_series::TimeSeries;

pub mod moving_average;

/// Post-processing applied to a finished series
pub trait TimeSeriesProcessor {
    fn process(&self, data: &TimeSeries) -> TimeSeries;
}

use super::TimeSeriesProcessor;
use shard_bench_report::time_series::{TimePoint, TimeSeries};
use std::collections::VecDeque;

/// Trailing simple moving average over the last `window_size` buckets.
/// A window of 0 or 1 leaves the series untouched.
pub struct MovingAverageProcessor {
    window_size: usize,
}

impl MovingAverageProcessor {
    pub fn new(window_size: u32) -> Self {
        Self {
            window_size: window_size.max(1) as usize,
        }
    }
}

impl TimeSeriesProcessor for MovingAverageProcessor {
    fn process(&self, data: &TimeSeries) -> TimeSeries {
        if self.window_size == 1 || data.is_empty() {
            return data.clone();
        }

        let mut window: VecDeque<f64> = VecDeque::with_capacity(self.window_size);
        let mut sum = 0.0;
        let points = data
            .points
            .iter()
            .map(|point| {
                window.push_back(point.value);
                sum += point.value;
                if window.len() > self.window_size {
                    sum -= window.pop_front().unwrap_or_default();
                }
                TimePoint::new(point.time_s, sum / window.len() as f64)
            })
            .collect();

        TimeSeries::from_points(points, data.kind)
    }
}

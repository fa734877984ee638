use shard_bench_report::latency_report::LatencyPercentiles;
use shard_bench_report::time_series::{TimePoint, TimeSeries, TimeSeriesKind};
use tracing::warn;

/// Sorted latencies in seconds together with their trimmed slice.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LatencyDistribution {
    sorted: Vec<f64>,
    trim_start: usize,
    trim_end: usize,
}

impl LatencyDistribution {
    /// Sorts `latencies_s` and keeps the index range
    /// `[floor(n * low), floor(n * high))` for the CDF.
    pub fn new(mut latencies_s: Vec<f64>, trim_low: f64, trim_high: f64) -> Self {
        latencies_s.retain(|l| l.is_finite());
        latencies_s.sort_by(f64::total_cmp);

        let len = latencies_s.len();
        let trim_start = ((len as f64 * trim_low).floor() as usize).min(len);
        let trim_end = ((len as f64 * trim_high).floor() as usize).clamp(trim_start, len);

        Self {
            sorted: latencies_s,
            trim_start,
            trim_end,
        }
    }

    pub fn len(&self) -> usize {
        self.sorted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sorted.is_empty()
    }

    pub fn trimmed(&self) -> &[f64] {
        &self.sorted[self.trim_start..self.trim_end]
    }

    /// Percentiles over every sample, trimming only shapes the CDF.
    pub fn percentiles(&self) -> LatencyPercentiles {
        if self.sorted.is_empty() {
            return LatencyPercentiles::default();
        }
        LatencyPercentiles {
            avg_s: self.sorted.iter().sum::<f64>() / self.sorted.len() as f64,
            p50_s: calculate_percentile(&self.sorted, 50.0),
            p90_s: calculate_percentile(&self.sorted, 90.0),
            p99_s: calculate_percentile(&self.sorted, 99.0),
            max_s: self.sorted[self.sorted.len() - 1],
        }
    }

    /// Empirical CDF of the trimmed slice: one point per distinct value,
    /// holding the fraction of trimmed samples at or below it.
    pub fn cdf(&self) -> TimeSeries {
        let trimmed = self.trimmed();
        if trimmed.is_empty() {
            warn!("No latencies left after trimming, the CDF is empty");
            return TimeSeries::empty(TimeSeriesKind::LatencyCdf);
        }

        let total = trimmed.len() as f64;
        let mut points: Vec<TimePoint> = Vec::new();
        for (index, value) in trimmed.iter().enumerate() {
            let fraction = (index + 1) as f64 / total;
            match points.last_mut() {
                Some(last) if last.time_s == *value => last.value = fraction,
                _ => points.push(TimePoint::new(*value, fraction)),
            }
        }

        TimeSeries::from_points(points, TimeSeriesKind::LatencyCdf)
    }
}

fn calculate_percentile(sorted_data: &[f64], percentile: f64) -> f64 {
    if sorted_data.is_empty() {
        return 0.0;
    }

    let rank = percentile / 100.0 * (sorted_data.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;

    if upper >= sorted_data.len() {
        return sorted_data[sorted_data.len() - 1];
    }

    let weight = rank - lower as f64;
    sorted_data[lower] * (1.0 - weight) + sorted_data[upper] * weight
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn trimming_should_keep_middle_slice_of_sorted_values() {
        let latencies = (1..=10).rev().map(f64::from).collect::<Vec<_>>();

        let distribution = LatencyDistribution::new(latencies, 0.1, 0.9);

        assert_eq!(distribution.trimmed(), &[2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]);
    }

    #[test]
    fn cdf_should_end_at_one_and_merge_duplicates() {
        let distribution = LatencyDistribution::new(vec![1.0, 2.0, 2.0, 4.0], 0.0, 1.0);

        let cdf = distribution.cdf();

        assert_eq!(cdf.as_pairs(), vec![(1.0, 0.25), (2.0, 0.75), (4.0, 1.0)]);
    }

    #[test]
    fn empty_input_should_give_empty_cdf() {
        let distribution = LatencyDistribution::new(Vec::new(), 0.1, 0.9);

        assert!(distribution.cdf().is_empty());
        assert_eq!(distribution.percentiles(), LatencyPercentiles::default());
    }

    #[test_case(50.0, 3.0 ; "median")]
    #[test_case(90.0, 4.6 ; "p90")]
    #[test_case(100.0, 5.0 ; "max")]
    fn percentile_should_interpolate(percentile: f64, expected: f64) {
        let sorted = [1.0, 2.0, 3.0, 4.0, 5.0];

        let value = calculate_percentile(&sorted, percentile);

        assert!((value - expected).abs() < 1e-9);
    }

    #[test]
    fn percentiles_should_use_all_samples() {
        let distribution = LatencyDistribution::new(vec![4.0, 1.0, 3.0, 2.0], 0.25, 0.75);

        let percentiles = distribution.percentiles();

        assert_eq!(percentiles.max_s, 4.0);
        assert_eq!(percentiles.avg_s, 2.5);
    }
}

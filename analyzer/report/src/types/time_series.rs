use serde::{Deserialize, Serialize};

/// A point in time series data
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct TimePoint {
    pub time_s: f64,
    pub value: f64,
}

impl TimePoint {
    pub fn new(time_s: f64, value: f64) -> Self {
        Self { time_s, value }
    }
}

/// Time series data with associated metadata
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct TimeSeries {
    pub points: Vec<TimePoint>,
    #[serde(skip)]
    pub kind: TimeSeriesKind,
}

/// Types of time series data we can calculate
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum TimeSeriesKind {
    #[default]
    AggregateThroughput,
    PartitionThroughput,
    BlockInterval,
    LatencyCdf,
}

impl TimeSeries {
    pub fn empty(kind: TimeSeriesKind) -> Self {
        Self {
            points: Vec::new(),
            kind,
        }
    }

    pub fn from_points(points: Vec<TimePoint>, kind: TimeSeriesKind) -> Self {
        Self { points, kind }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns a copy with every time shifted so that `origin_s` becomes zero.
    pub fn rebased(&self, origin_s: f64) -> Self {
        Self {
            points: self
                .points
                .iter()
                .map(|p| TimePoint::new(p.time_s - origin_s, p.value))
                .collect(),
            kind: self.kind,
        }
    }

    pub fn as_pairs(&self) -> Vec<(f64, f64)> {
        self.points.iter().map(|p| (p.time_s, p.value)).collect()
    }

    pub fn mean_value(&self) -> Option<f64> {
        if self.points.is_empty() {
            return None;
        }
        Some(self.points.iter().map(|p| p.value).sum::<f64>() / self.points.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rebased_should_shift_time_and_keep_values() {
        let series = TimeSeries::from_points(
            vec![TimePoint::new(10.0, 1.0), TimePoint::new(12.5, 2.0)],
            TimeSeriesKind::AggregateThroughput,
        );

        let rebased = series.rebased(10.0);

        assert_eq!(rebased.as_pairs(), vec![(0.0, 1.0), (2.5, 2.0)]);
        assert_eq!(rebased.kind, TimeSeriesKind::AggregateThroughput);
    }

    #[test]
    fn mean_value_of_empty_series_should_be_none() {
        assert!(TimeSeries::empty(TimeSeriesKind::BlockInterval)
            .mean_value()
            .is_none());
    }
}

use tracing::warn;

pub const NANOS_PER_SEC: f64 = 1_000_000_000.0;

/// One line of a partition throughput log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sample {
    pub timestamp_ns: i64,
    pub count: i64,
    pub height: Option<u64>,
    pub validator: Option<String>,
}

impl Sample {
    pub fn new(timestamp_ns: i64, count: i64) -> Self {
        Self {
            timestamp_ns,
            count,
            height: None,
            validator: None,
        }
    }

    pub fn with_height(mut self, height: u64) -> Self {
        self.height = Some(height);
        self
    }

    pub fn with_validator(mut self, validator: &str) -> Self {
        self.validator = Some(validator.to_owned());
        self
    }
}

/// Samples of one partition, ordered by strictly increasing timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Stream {
    pub partition: u32,
    pub samples: Vec<Sample>,
}

impl Stream {
    /// Wraps samples that are already known to be ordered.
    pub fn new(partition: u32, samples: Vec<Sample>) -> Self {
        Self { partition, samples }
    }

    /// Builds a stream from raw log order, dropping every sample whose
    /// timestamp does not advance past the last kept one.
    pub fn from_raw(partition: u32, raw: Vec<Sample>) -> Self {
        let mut samples: Vec<Sample> = Vec::with_capacity(raw.len());
        let mut dropped = 0usize;
        for sample in raw {
            if let Some(last) = samples.last() {
                if sample.timestamp_ns <= last.timestamp_ns {
                    dropped += 1;
                    continue;
                }
            }
            samples.push(sample);
        }
        if dropped > 0 {
            warn!(
                "Partition {}: dropped {} samples with non-increasing timestamps",
                partition, dropped
            );
        }
        Self { partition, samples }
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn first_timestamp(&self) -> Option<i64> {
        self.samples.first().map(|s| s.timestamp_ns)
    }

    pub fn last_timestamp(&self) -> Option<i64> {
        self.samples.last().map(|s| s.timestamp_ns)
    }

    pub fn final_count(&self) -> Option<i64> {
        self.samples.last().map(|s| s.count)
    }

    /// Drops samples recorded before the experiment begin marker.
    pub fn since(mut self, begin_ns: i64) -> Self {
        self.samples.retain(|s| s.timestamp_ns >= begin_ns);
        self
    }

    /// Keeps only samples with `start_ns <= timestamp <= end_ns`.
    pub fn trimmed(&self, start_ns: i64, end_ns: i64) -> Self {
        Self {
            partition: self.partition,
            samples: self
                .samples
                .iter()
                .filter(|s| s.timestamp_ns >= start_ns && s.timestamp_ns <= end_ns)
                .cloned()
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_raw_should_drop_non_increasing_timestamps() {
        let stream = Stream::from_raw(
            1,
            vec![
                Sample::new(10, 0),
                Sample::new(20, 5),
                Sample::new(20, 6),
                Sample::new(15, 7),
                Sample::new(30, 8),
            ],
        );

        let timestamps = stream
            .samples
            .iter()
            .map(|s| s.timestamp_ns)
            .collect::<Vec<_>>();
        assert_eq!(timestamps, vec![10, 20, 30]);
    }

    #[test]
    fn since_should_drop_samples_before_begin() {
        let stream = Stream::new(
            1,
            vec![Sample::new(5, 0), Sample::new(10, 1), Sample::new(15, 2)],
        )
        .since(10);

        assert_eq!(stream.first_timestamp(), Some(10));
        assert_eq!(stream.len(), 2);
    }

    #[test]
    fn trimmed_should_keep_window_bounds() {
        let stream = Stream::new(
            3,
            vec![
                Sample::new(0, 0),
                Sample::new(10, 1),
                Sample::new(20, 2),
                Sample::new(30, 3),
            ],
        );

        let trimmed = stream.trimmed(10, 20);

        assert_eq!(trimmed.partition, 3);
        assert_eq!(trimmed.first_timestamp(), Some(10));
        assert_eq!(trimmed.last_timestamp(), Some(20));
    }
}

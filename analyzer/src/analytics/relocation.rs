use super::stream::Stream;
use crate::error::AnalyzerError;
use tracing::debug;

/// Where relocated (moveTo/move2) transactions of a partition are recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RelocationSource {
    /// No correction.
    #[default]
    None,
    /// Timestamp keyed log written next to the throughput log.
    SameFile,
    /// Height keyed moveTo/move2 lines of the client latency log.
    SeparateFile,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelocationKey {
    Timestamp(i64),
    Height(u64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelocationEvent {
    pub key: RelocationKey,
    pub count: i64,
}

impl RelocationEvent {
    pub fn at_timestamp(timestamp_ns: i64, count: i64) -> Self {
        Self {
            key: RelocationKey::Timestamp(timestamp_ns),
            count,
        }
    }

    pub fn at_height(height: u64, count: i64) -> Self {
        Self {
            key: RelocationKey::Height(height),
            count,
        }
    }
}

/// Relocations of one partition, answering "how many so far" queries.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RelocationLog {
    pub partition: u32,
    // Running totals, sorted by key.
    by_timestamp: Vec<(i64, i64)>,
    by_height: Vec<(u64, i64)>,
}

impl RelocationLog {
    pub fn new(partition: u32, events: Vec<RelocationEvent>) -> Self {
        let mut timestamps = Vec::new();
        let mut heights = Vec::new();
        for event in events {
            match event.key {
                RelocationKey::Timestamp(ts) => timestamps.push((ts, event.count)),
                RelocationKey::Height(height) => heights.push((height, event.count)),
            }
        }
        timestamps.sort_by_key(|(ts, _)| *ts);
        heights.sort_by_key(|(height, _)| *height);

        Self {
            partition,
            by_timestamp: running_totals(timestamps),
            by_height: running_totals(heights),
        }
    }

    /// Relocations recorded at or before `timestamp_ns`.
    pub fn cumulative_at_timestamp(&self, timestamp_ns: i64) -> i64 {
        let idx = self.by_timestamp.partition_point(|(ts, _)| *ts <= timestamp_ns);
        if idx == 0 {
            0
        } else {
            self.by_timestamp[idx - 1].1
        }
    }

    /// Relocations committed in blocks up to and including `height`.
    pub fn cumulative_at_height(&self, height: u64) -> i64 {
        let idx = self.by_height.partition_point(|(h, _)| *h <= height);
        if idx == 0 {
            0
        } else {
            self.by_height[idx - 1].1
        }
    }

    #[cfg(test)]
    pub fn total(&self) -> i64 {
        let timestamps = self.by_timestamp.last().map(|(_, c)| *c).unwrap_or(0);
        let heights = self.by_height.last().map(|(_, c)| *c).unwrap_or(0);
        timestamps + heights
    }
}

fn running_totals<K: Copy>(events: Vec<(K, i64)>) -> Vec<(K, i64)> {
    let mut total = 0;
    events
        .into_iter()
        .map(|(key, count)| {
            total += count;
            (key, total)
        })
        .collect()
}

/// A stream whose counters exclude relocated transactions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorrectedStream {
    pub stream: Stream,
    /// Relocations subtracted from the last sample.
    pub relocated: i64,
}

/// Subtracts, from every sample, the relocations recorded up to that sample.
///
/// An absent log means zero relocations. A corrected counter below zero
/// cannot come from a consistent log and fails the whole run.
pub fn correct_stream(
    stream: Stream,
    relocations: Option<&RelocationLog>,
    source: RelocationSource,
) -> Result<CorrectedStream, AnalyzerError> {
    let Some(relocations) = relocations.filter(|_| source != RelocationSource::None) else {
        return Ok(CorrectedStream {
            stream,
            relocated: 0,
        });
    };

    let partition = stream.partition;
    let mut relocated = 0;
    let mut samples = Vec::with_capacity(stream.samples.len());
    for mut sample in stream.samples {
        relocated = match source {
            RelocationSource::SameFile => relocations.cumulative_at_timestamp(sample.timestamp_ns),
            RelocationSource::SeparateFile => match sample.height {
                Some(height) => relocations.cumulative_at_height(height),
                None => {
                    debug!(
                        "Partition {}: sample at {} ns has no height, keeping previous relocation count",
                        partition, sample.timestamp_ns
                    );
                    relocated
                }
            },
            RelocationSource::None => 0,
        };
        sample.count -= relocated;
        if sample.count < 0 {
            return Err(AnalyzerError::NegativeCorrectedCount {
                partition,
                count: sample.count,
                timestamp_ns: sample.timestamp_ns,
            });
        }
        samples.push(sample);
    }

    Ok(CorrectedStream {
        stream: Stream::new(partition, samples),
        relocated,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::stream::Sample;

    fn counts(stream: &Stream) -> Vec<i64> {
        stream.samples.iter().map(|s| s.count).collect()
    }

    #[test]
    fn timestamp_relocations_should_be_subtracted_cumulatively() {
        let stream = Stream::new(
            2,
            vec![Sample::new(0, 0), Sample::new(1, 10), Sample::new(2, 20)],
        );
        let log = RelocationLog::new(2, vec![RelocationEvent::at_timestamp(1, 5)]);

        let corrected = correct_stream(stream, Some(&log), RelocationSource::SameFile).unwrap();

        assert_eq!(counts(&corrected.stream), vec![0, 5, 15]);
        assert_eq!(corrected.relocated, 5);
    }

    #[test]
    fn height_relocations_should_be_subtracted_cumulatively() {
        let stream = Stream::new(
            2,
            vec![
                Sample::new(0, 0).with_height(1),
                Sample::new(1, 10).with_height(2),
                Sample::new(2, 20).with_height(3),
            ],
        );
        let log = RelocationLog::new(
            2,
            vec![
                RelocationEvent::at_height(2, 3),
                RelocationEvent::at_height(2, 2),
            ],
        );

        let corrected =
            correct_stream(stream, Some(&log), RelocationSource::SeparateFile).unwrap();

        assert_eq!(counts(&corrected.stream), vec![0, 5, 15]);
    }

    #[test]
    fn absent_log_should_mean_zero_relocations() {
        let stream = Stream::new(1, vec![Sample::new(0, 0), Sample::new(1, 10)]);

        let corrected =
            correct_stream(stream.clone(), None, RelocationSource::SeparateFile).unwrap();

        assert_eq!(corrected.stream, stream);
        assert_eq!(corrected.relocated, 0);
    }

    #[test]
    fn negative_corrected_count_should_fail() {
        let stream = Stream::new(4, vec![Sample::new(0, 0), Sample::new(7, 3)]);
        let log = RelocationLog::new(4, vec![RelocationEvent::at_timestamp(7, 5)]);

        let result = correct_stream(stream, Some(&log), RelocationSource::SameFile);

        assert!(matches!(
            result,
            Err(AnalyzerError::NegativeCorrectedCount {
                partition: 4,
                count: -2,
                timestamp_ns: 7
            })
        ));
    }

    #[test]
    fn cumulative_queries_should_include_equal_keys() {
        let log = RelocationLog::new(
            1,
            vec![
                RelocationEvent::at_timestamp(30, 1),
                RelocationEvent::at_timestamp(10, 2),
            ],
        );

        assert_eq!(log.cumulative_at_timestamp(9), 0);
        assert_eq!(log.cumulative_at_timestamp(10), 2);
        assert_eq!(log.cumulative_at_timestamp(29), 2);
        assert_eq!(log.cumulative_at_timestamp(30), 3);
        assert_eq!(log.total(), 3);
    }
}

use super::relocation::{correct_stream, CorrectedStream, RelocationLog, RelocationSource};
use super::stream::Stream;
use super::time_series::calculator::TimeSeriesCalculator;
use super::time_series::calculators::AggregationOutcome;
use crate::error::AnalyzerError;
use tracing::{debug, info};

/// The knobs that distinguish the throughput log variants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AggregatorConfig {
    /// Throughput lines carry a block height (and usually a validator) column.
    pub has_height_column: bool,
    pub relocation_source: RelocationSource,
    pub bucket_width_secs: f64,
}

impl AggregatorConfig {
    pub fn new(
        has_height_column: bool,
        relocation_source: RelocationSource,
        bucket_width_secs: f64,
    ) -> Self {
        Self {
            has_height_column,
            relocation_source,
            bucket_width_secs,
        }
    }
}

/// One parsed partition log and its relocations, if any were recorded.
#[derive(Debug, Clone)]
pub struct PartitionInput {
    pub stream: Stream,
    pub relocations: Option<RelocationLog>,
}

impl PartitionInput {
    pub fn new(stream: Stream, relocations: Option<RelocationLog>) -> Self {
        Self {
            stream,
            relocations,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Aggregation {
    pub outcome: AggregationOutcome,
    /// Corrected streams before window trimming, in input order
    pub streams: Vec<CorrectedStream>,
}

impl Aggregation {
    pub fn relocated_events(&self) -> i64 {
        self.streams.iter().map(|s| s.relocated).sum()
    }
}

pub struct StreamAggregator {
    config: AggregatorConfig,
    calculator: TimeSeriesCalculator,
}

impl StreamAggregator {
    pub fn new(config: AggregatorConfig) -> Self {
        Self {
            config,
            calculator: TimeSeriesCalculator::new(),
        }
    }

    pub fn config(&self) -> &AggregatorConfig {
        &self.config
    }

    /// Drops samples before `begin_ns` and subtracts relocations.
    pub fn prepare(
        &self,
        input: PartitionInput,
        begin_ns: Option<i64>,
    ) -> Result<CorrectedStream, AnalyzerError> {
        if self.config.relocation_source == RelocationSource::SeparateFile
            && !self.config.has_height_column
        {
            return Err(AnalyzerError::InvalidConfiguration(
                "height keyed relocations need a height column in the throughput log".to_owned(),
            ));
        }

        let mut stream = input.stream;
        if let Some(begin_ns) = begin_ns {
            let before = stream.len();
            stream = stream.since(begin_ns);
            debug!(
                "Partition {}: dropped {} samples before experiment begin",
                stream.partition,
                before - stream.len()
            );
        }

        correct_stream(
            stream,
            input.relocations.as_ref(),
            self.config.relocation_source,
        )
    }

    /// Runs the whole pipeline over every partition. Only a relocation
    /// undercount is fatal; everything else degrades to an empty outcome.
    pub fn aggregate(
        &self,
        inputs: Vec<PartitionInput>,
        begin_ns: Option<i64>,
    ) -> Result<Aggregation, AnalyzerError> {
        let streams = inputs
            .into_iter()
            .map(|input| self.prepare(input, begin_ns))
            .collect::<Result<Vec<_>, _>>()?;

        let plain = streams
            .iter()
            .map(|s| s.stream.clone())
            .collect::<Vec<_>>();
        let outcome = self
            .calculator
            .aggregate_throughput(&plain, self.config.bucket_width_secs);
        info!(
            "Aggregated {} partitions into {} buckets of {} s, {} events",
            plain.len(),
            outcome.buckets.len(),
            self.config.bucket_width_secs,
            outcome.total_events
        );

        Ok(Aggregation { outcome, streams })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::relocation::RelocationEvent;
    use crate::analytics::stream::Sample;

    const SEC: i64 = 1_000_000_000;

    fn counts_at_seconds(partition: u32, counts: &[i64]) -> Stream {
        Stream::new(
            partition,
            counts
                .iter()
                .enumerate()
                .map(|(i, c)| Sample::new(i as i64 * SEC, *c).with_height(i as u64 + 1))
                .collect(),
        )
    }

    #[test]
    fn missing_relocation_log_should_mean_no_correction() {
        let aggregator = StreamAggregator::new(AggregatorConfig::new(
            false,
            RelocationSource::SameFile,
            1.0,
        ));
        let input = PartitionInput::new(counts_at_seconds(1, &[0, 10, 20, 30]), None);

        let aggregation = aggregator.aggregate(vec![input], None).unwrap();

        let rates = aggregation
            .outcome
            .buckets
            .iter()
            .map(|b| b.rate)
            .collect::<Vec<_>>();
        assert_eq!(rates, vec![10.0, 10.0, 10.0]);
        assert_eq!(aggregation.relocated_events(), 0);
    }

    #[test]
    fn height_relocations_should_lower_rates_and_total() {
        let aggregator = StreamAggregator::new(AggregatorConfig::new(
            true,
            RelocationSource::SeparateFile,
            1.0,
        ));
        let relocations = RelocationLog::new(1, vec![RelocationEvent::at_height(2, 5)]);
        let input = PartitionInput::new(counts_at_seconds(1, &[0, 10, 20]), Some(relocations));

        let aggregation = aggregator.aggregate(vec![input], None).unwrap();

        let rates = aggregation
            .outcome
            .buckets
            .iter()
            .map(|b| b.rate)
            .collect::<Vec<_>>();
        assert_eq!(rates, vec![5.0, 10.0]);
        assert_eq!(aggregation.outcome.total_events, 15);
        assert_eq!(aggregation.relocated_events(), 5);
    }

    #[test]
    fn begin_marker_should_drop_early_samples() {
        let aggregator = StreamAggregator::new(AggregatorConfig::new(
            false,
            RelocationSource::None,
            1.0,
        ));
        let input = PartitionInput::new(counts_at_seconds(1, &[0, 100, 110, 120]), None);

        let aggregation = aggregator.aggregate(vec![input], Some(SEC)).unwrap();

        let window = aggregation.outcome.window.unwrap();
        assert_eq!(window.start_ns, SEC);
        assert_eq!(aggregation.outcome.buckets.len(), 2);
    }

    #[test]
    fn height_relocations_without_height_column_should_be_rejected() {
        let aggregator = StreamAggregator::new(AggregatorConfig::new(
            false,
            RelocationSource::SeparateFile,
            1.0,
        ));
        let input = PartitionInput::new(counts_at_seconds(1, &[0, 1]), None);

        let result = aggregator.aggregate(vec![input], None);

        assert!(matches!(
            result,
            Err(AnalyzerError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn undercounted_relocations_should_be_fatal() {
        let aggregator = StreamAggregator::new(AggregatorConfig::new(
            true,
            RelocationSource::SeparateFile,
            1.0,
        ));
        let relocations = RelocationLog::new(1, vec![RelocationEvent::at_height(1, 3)]);
        let input = PartitionInput::new(counts_at_seconds(1, &[0, 10]), Some(relocations));

        let result = aggregator.aggregate(vec![input], None);

        assert!(matches!(
            result,
            Err(AnalyzerError::NegativeCorrectedCount { partition: 1, .. })
        ));
    }
}

use super::metrics::latency::LatencyDistribution;
use super::relocation::CorrectedStream;
use super::stream::{Stream, NANOS_PER_SEC};
use super::stream_aggregator::Aggregation;
use super::time_series::calculator::TimeSeriesCalculator;
use crate::logs::latency::{LatencyFormat, LatencyRecord};
use shard_bench_report::{
    comparison_report::{ComparisonEntry, ComparisonReport},
    latency_report::{BlockIntervalReport, LatencyCdfReport, SlowBlock},
    micro_report::{MicroReport, SizePoint},
    throughput_report::{PartitionThroughputReport, StopMarker, ThroughputReport, WindowSummary},
};
use tracing::warn;

/// Bytes per kB on the micro benchmark charts.
const BYTES_PER_KB: f64 = 1e3;

/// Latency trimming and axis choice for a CDF report.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CdfSettings {
    pub trim_low: f64,
    pub trim_high: f64,
    pub log_scale: bool,
}

pub struct ReportBuilder;

impl ReportBuilder {
    pub fn throughput(
        aggregation: &Aggregation,
        bucket_width_secs: f64,
        moving_average_window: u32,
        experiment_begin_ns: Option<i64>,
        stop_markers: Vec<StopMarker>,
    ) -> ThroughputReport {
        let calculator = TimeSeriesCalculator::new();
        let aggregate = calculator.moving_average(
            &aggregation.outcome.to_time_series(),
            moving_average_window,
        );

        ThroughputReport {
            partitions: aggregation
                .streams
                .iter()
                .map(|s| s.stream.partition)
                .collect(),
            bucket_width_secs,
            moving_average_window,
            window: aggregation
                .outcome
                .window
                .map(|w| WindowSummary::new(w.start_s(), w.end_s())),
            total_events: aggregation.outcome.total_events,
            relocated_events: aggregation.relocated_events(),
            experiment_begin_ns,
            aggregate,
            stop_markers,
        }
    }

    pub fn partition(
        corrected: &CorrectedStream,
        experiment_begin_ns: Option<i64>,
        stopped_at_ns: Option<i64>,
    ) -> PartitionThroughputReport {
        let calculator = TimeSeriesCalculator::new();
        let stream = &corrected.stream;

        PartitionThroughputReport {
            partition: stream.partition,
            experiment_begin_ns,
            samples: stream.len(),
            negative_deltas: calculator.negative_deltas(stream),
            relocated_events: corrected.relocated,
            rates: calculator.instantaneous_throughput(stream),
            stop_marker: stopped_at_ns.map(|ns| stop_marker(stream.partition, ns)),
        }
    }

    pub fn block_intervals(
        source: &str,
        stream: &Stream,
        slow_threshold_s: f64,
    ) -> BlockIntervalReport {
        let intervals = TimeSeriesCalculator::new().block_intervals(stream);
        // An interval is attributed to the block that opened it.
        let slow_blocks = intervals
            .points
            .iter()
            .enumerate()
            .filter(|(_, p)| p.value > slow_threshold_s)
            .map(|(index, p)| SlowBlock {
                index,
                interval_s: p.value,
                validator: stream.samples[index].validator.clone(),
            })
            .collect();

        BlockIntervalReport {
            source: source.to_owned(),
            average_interval_s: intervals.mean_value().unwrap_or_default(),
            slow_threshold_s,
            slow_blocks,
            intervals,
        }
    }

    pub fn latency_cdf(
        source: &str,
        format: LatencyFormat,
        records: &[LatencyRecord],
        settings: CdfSettings,
    ) -> LatencyCdfReport {
        let distribution = |filter: &dyn Fn(&LatencyRecord) -> bool| {
            LatencyDistribution::new(
                records
                    .iter()
                    .filter(|r| filter(r))
                    .map(LatencyRecord::latency_s)
                    .collect(),
                settings.trim_low,
                settings.trim_high,
            )
        };

        let overall = distribution(&|_: &LatencyRecord| true);
        if overall.is_empty() {
            warn!("{}: no latency records", source);
        }
        let (single_shard, cross_shard) = match format {
            LatencyFormat::Client => (
                Some(distribution(&|r: &LatencyRecord| !r.cross_shard).cdf()),
                Some(distribution(&|r: &LatencyRecord| r.cross_shard).cdf()),
            ),
            LatencyFormat::Replayer => (None, None),
        };

        LatencyCdfReport {
            source: source.to_owned(),
            samples: overall.len(),
            trimmed_samples: overall.trimmed().len(),
            trim: (settings.trim_low, settings.trim_high),
            percentiles: overall.percentiles(),
            log_scale: settings.log_scale,
            overall: overall.cdf(),
            single_shard,
            cross_shard,
        }
    }

    pub fn micro(proofs: &[(i64, i64)], headers: &[(i64, i64)]) -> MicroReport {
        let sizes = |pairs: &[(i64, i64)]| {
            pairs
                .iter()
                .map(|&(x, bytes)| {
                    SizePoint::new(x.max(0) as u64, bytes as f64 / BYTES_PER_KB)
                })
                .collect()
        };
        MicroReport {
            proofs: sizes(proofs),
            headers: sizes(headers),
        }
    }

    /// `rates` and `baselines` are in shard count order; labels default to
    /// powers of two.
    pub fn comparison(
        cross_shard_percent: u32,
        rates: &[f64],
        baselines: &[Option<f64>],
        labels: Option<&[String]>,
    ) -> ComparisonReport {
        let entries = rates
            .iter()
            .enumerate()
            .map(|(index, rate)| {
                let label = labels
                    .and_then(|labels| labels.get(index).cloned())
                    .unwrap_or_else(|| 2u64.saturating_pow(index as u32).to_string());
                ComparisonEntry::new(label, *rate, baselines.get(index).copied().flatten())
            })
            .collect();

        ComparisonReport {
            cross_shard_percent,
            entries,
        }
    }
}

pub fn stop_marker(partition: u32, stopped_at_ns: i64) -> StopMarker {
    StopMarker::new(partition, stopped_at_ns as f64 / NANOS_PER_SEC)
}

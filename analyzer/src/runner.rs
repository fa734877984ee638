use crate::analytics::relocation::{RelocationLog, RelocationSource};
use crate::analytics::report_builder::{stop_marker, CdfSettings, ReportBuilder};
use crate::analytics::stream_aggregator::{AggregatorConfig, PartitionInput, StreamAggregator};
use crate::args::defaults::{CLIENT_LATENCIES_FILE, DEFAULT_COMPARISON_BASELINE_PARTITIONS};
use crate::args::examples::print_examples;
use crate::args::kind::{
    AccountsArgs, BlockIntervalArgs, CdfArgs, ComparisonArgs, LatencyLogFormat, MicroArgs,
    PartitionArgs, PlotKindCommand, RelocationArg, SingleArgs, ThroughputArgs,
};
use crate::args::ShardPlotArgs;
use crate::config::{validate_bucket_width, validate_trim, PlotConfig};
use crate::error::AnalyzerError;
use crate::logs::latency::{parse_latency_log, LatencyFormat};
use crate::logs::markers::{read_begin_marker, read_stop_marker};
use crate::logs::pairs::{baseline_run_path, parse_pairs, parse_run_totals};
use crate::logs::partition_from_path;
use crate::logs::relocation::{
    moved_accounts_path, parse_client_relocations, parse_moved_accounts_log,
};
use crate::logs::throughput::{parse_throughput_log, throughput_log_path};
use crate::logs::transfers::count_distinct_accounts;
use crate::plot::ChartOutput;
use chrono::{DateTime, Utc};
use shard_bench_report::chart_kind::ChartKind;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

impl From<RelocationArg> for RelocationSource {
    fn from(arg: RelocationArg) -> Self {
        match arg {
            RelocationArg::None => RelocationSource::None,
            RelocationArg::SameFile => RelocationSource::SameFile,
            RelocationArg::SeparateFile => RelocationSource::SeparateFile,
        }
    }
}

pub struct PlotRunner {
    args: Option<ShardPlotArgs>,
    config: PlotConfig,
}

impl PlotRunner {
    pub fn new(args: ShardPlotArgs, config: PlotConfig) -> Self {
        Self {
            args: Some(args),
            config,
        }
    }

    pub fn run(&mut self) -> Result<(), AnalyzerError> {
        let Some(args) = self.args.take() else {
            return Ok(());
        };

        match args.kind {
            PlotKindCommand::Throughput(args) => self.throughput(&args),
            PlotKindCommand::Partition(args) => self.partition(&args),
            PlotKindCommand::Single(args) => self.single(&args),
            PlotKindCommand::BlockInterval(args) => self.block_interval(&args),
            PlotKindCommand::Cdf(args) => self.cdf(&args),
            PlotKindCommand::Micro(args) => self.micro(&args),
            PlotKindCommand::Comparison(args) => self.comparison(&args),
            PlotKindCommand::Accounts(args) => self.accounts(&args),
            PlotKindCommand::Examples => {
                print_examples();
                Ok(())
            }
        }
    }

    fn throughput(&self, args: &ThroughputArgs) -> Result<(), AnalyzerError> {
        if args.partitions == 0 {
            return Err(AnalyzerError::InvalidInput(
                "at least one partition is required".to_owned(),
            ));
        }
        let bucket_width_secs = args
            .bucket_width
            .unwrap_or(self.config.throughput.bucket_width_secs);
        validate_bucket_width(bucket_width_secs)?;
        let moving_average_window = args
            .moving_average_window
            .unwrap_or(self.config.throughput.moving_average_window);

        let source = RelocationSource::from(args.relocation);
        let aggregator = StreamAggregator::new(AggregatorConfig::new(
            source == RelocationSource::SeparateFile,
            source,
            bucket_width_secs,
        ));
        let begin_ns = read_begin_marker(&args.log_dir)?;
        log_begin_marker(begin_ns);

        let mut relocations = load_relocations(&args.log_dir, 1..=args.partitions, source)?;
        let inputs = (1..=args.partitions)
            .map(|partition| {
                let path = throughput_log_path(&args.log_dir, partition);
                let stream =
                    parse_throughput_log(&path, partition, aggregator.config().has_height_column)?;
                Ok(PartitionInput::new(stream, relocations.remove(&partition)))
            })
            .collect::<Result<Vec<_>, AnalyzerError>>()?;

        info!(
            "Aggregating {} partitions from {} into {} s buckets",
            args.partitions,
            args.log_dir.display(),
            bucket_width_secs
        );
        let aggregation = aggregator.aggregate(inputs, begin_ns)?;

        let mut stopped = BTreeMap::new();
        for partition in 1..=args.partitions {
            if let Some(stopped_at_ns) = read_stop_marker(&args.log_dir, partition)? {
                stopped.insert(partition, stopped_at_ns);
            }
        }
        let stop_markers = stopped
            .iter()
            .map(|(partition, ns)| stop_marker(*partition, *ns))
            .collect();

        let report = ReportBuilder::throughput(
            &aggregation,
            bucket_width_secs,
            moving_average_window,
            begin_ns,
            stop_markers,
        );
        report.print_summary();

        let output = ChartOutput::new(
            &args.output,
            &self.config.chart,
            args.log_dir.join("tput-aggregated"),
        );
        output.write(&report, || report.figure(ChartKind::AggregatedThroughput))?;

        if args.no_partition_charts {
            return Ok(());
        }
        let directory = match args.output.output {
            Some(_) => output.directory(),
            None => args.log_dir.clone(),
        };
        for corrected in &aggregation.streams {
            let partition = corrected.stream.partition;
            let report = ReportBuilder::partition(
                corrected,
                begin_ns,
                stopped.get(&partition).copied(),
            );
            report.print_summary();
            output
                .with_base(directory.join(format!("tput-partition-{partition}")))
                .write(&report, || report.figure())?;
        }
        Ok(())
    }

    fn partition(&self, args: &PartitionArgs) -> Result<(), AnalyzerError> {
        let partition = partition_from_path(&args.log).ok_or_else(|| {
            AnalyzerError::InvalidInput(format!(
                "cannot tell the partition of {}, expected a name like tput-partition-N.txt",
                args.log.display()
            ))
        })?;
        let log_dir = parent_dir(&args.log);
        let source = RelocationSource::from(args.relocation);
        // Bucket width is irrelevant for per-sample rates.
        let aggregator = StreamAggregator::new(AggregatorConfig::new(
            source == RelocationSource::SeparateFile,
            source,
            self.config.throughput.single_bucket_width_secs,
        ));

        let begin_ns = read_begin_marker(&log_dir)?;
        log_begin_marker(begin_ns);
        let relocations = load_relocations(&log_dir, [partition], source)?
            .remove(&partition);
        let stream =
            parse_throughput_log(&args.log, partition, aggregator.config().has_height_column)?;
        let corrected = aggregator.prepare(PartitionInput::new(stream, relocations), begin_ns)?;
        let stopped_at_ns = read_stop_marker(&log_dir, partition)?;

        let report = ReportBuilder::partition(&corrected, begin_ns, stopped_at_ns);
        report.print_summary();
        ChartOutput::new(&args.output, &self.config.chart, args.log.with_extension(""))
            .write(&report, || report.figure())?;
        Ok(())
    }

    fn single(&self, args: &SingleArgs) -> Result<(), AnalyzerError> {
        let bucket_width_secs = args
            .bucket_width
            .unwrap_or(self.config.throughput.single_bucket_width_secs);
        validate_bucket_width(bucket_width_secs)?;
        let partition = partition_from_path(&args.log).unwrap_or_default();
        let aggregator = StreamAggregator::new(AggregatorConfig::new(
            false,
            RelocationSource::None,
            bucket_width_secs,
        ));

        let stream = parse_throughput_log(&args.log, partition, false)?;
        let aggregation = aggregator.aggregate(vec![PartitionInput::new(stream, None)], None)?;
        let report = ReportBuilder::throughput(
            &aggregation,
            bucket_width_secs,
            self.config.throughput.moving_average_window,
            None,
            Vec::new(),
        );
        report.print_summary();
        ChartOutput::new(
            &args.output,
            &self.config.chart,
            parent_dir(&args.log).join("tput"),
        )
        .write(&report, || report.figure(ChartKind::Throughput))?;
        Ok(())
    }

    fn block_interval(&self, args: &BlockIntervalArgs) -> Result<(), AnalyzerError> {
        let slow_threshold_s = args
            .slow_threshold
            .unwrap_or(self.config.block_interval.slow_threshold_secs);
        let partition = partition_from_path(&args.log).unwrap_or_default();
        let stream = parse_throughput_log(&args.log, partition, false)?;

        let source = args.log.display().to_string();
        let report = ReportBuilder::block_intervals(&source, &stream, slow_threshold_s);
        report.print_summary();
        ChartOutput::new(
            &args.output,
            &self.config.chart,
            suffixed_path(&args.log, "_lat"),
        )
        .write(&report, || report.figure())?;
        Ok(())
    }

    fn cdf(&self, args: &CdfArgs) -> Result<(), AnalyzerError> {
        let trim_low = args.trim_low.unwrap_or(self.config.latency.trim_low);
        let trim_high = args.trim_high.unwrap_or(self.config.latency.trim_high);
        validate_trim(trim_low, trim_high)?;

        let format = match args.log_format {
            LatencyLogFormat::Auto => None,
            LatencyLogFormat::Replayer => Some(LatencyFormat::Replayer),
            LatencyLogFormat::Client => Some(LatencyFormat::Client),
        };
        let begin_ns = read_begin_marker(&parent_dir(&args.log))?;
        let (format, records) = parse_latency_log(&args.log, format, begin_ns)?;
        let log_scale = args
            .log_scale
            .or(self.config.latency.log_scale)
            .unwrap_or(format == LatencyFormat::Replayer);

        let report = ReportBuilder::latency_cdf(
            &args.log.display().to_string(),
            format,
            &records,
            CdfSettings {
                trim_low,
                trim_high,
                log_scale,
            },
        );
        report.print_summary();
        ChartOutput::new(
            &args.output,
            &self.config.chart,
            suffixed_path(&args.log, "_cdf"),
        )
        .write(&report, || report.figure())?;
        Ok(())
    }

    fn micro(&self, args: &MicroArgs) -> Result<(), AnalyzerError> {
        let proofs = parse_pairs(&args.proofs)?;
        let headers = parse_pairs(&args.headers)?;

        let report = ReportBuilder::micro(&proofs, &headers);
        report.print_summary();
        ChartOutput::new(
            &args.output,
            &self.config.chart,
            parent_dir(&args.proofs).join("storage_header_size"),
        )
        .write(&report, || report.figure())?;
        Ok(())
    }

    fn comparison(&self, args: &ComparisonArgs) -> Result<(), AnalyzerError> {
        let rates = args
            .files
            .iter()
            .map(|path| parse_run_totals(path).map(|totals| totals.rate()))
            .collect::<Result<Vec<_>, _>>()?;

        let mut baselines = Vec::new();
        if let Some(baseline_dir) = &args.baseline_dir {
            for partitions in DEFAULT_COMPARISON_BASELINE_PARTITIONS {
                let path = baseline_run_path(baseline_dir, partitions);
                if path.exists() {
                    baselines.push(Some(parse_run_totals(&path)?.rate()));
                } else {
                    warn!("Baseline run {} not found", path.display());
                    baselines.push(None);
                }
            }
        }

        let labels = args.labels.as_deref();
        if labels.is_some_and(|labels| labels.len() != rates.len()) {
            warn!(
                "{} labels given for {} runs, missing labels default to powers of two",
                labels.map(<[String]>::len).unwrap_or_default(),
                rates.len()
            );
        }

        let report =
            ReportBuilder::comparison(args.cross_shard_percent, &rates, &baselines, labels);
        report.print_summary();
        let directory = args
            .files
            .first()
            .map(|path| parent_dir(path))
            .unwrap_or_default();
        ChartOutput::new(
            &args.output,
            &self.config.chart,
            directory.join("tput-comparison"),
        )
        .write(&report, || report.figure())?;
        Ok(())
    }

    fn accounts(&self, args: &AccountsArgs) -> Result<(), AnalyzerError> {
        let accounts = count_distinct_accounts(&args.log)?;
        info!("{} distinct accounts in {}", accounts, args.log.display());
        println!("{accounts}");
        Ok(())
    }
}

/// Relocation logs of `partitions`, keyed by partition. Partitions without
/// a log are left out, which means no correction for them.
fn load_relocations(
    log_dir: &Path,
    partitions: impl IntoIterator<Item = u32>,
    source: RelocationSource,
) -> Result<BTreeMap<u32, RelocationLog>, AnalyzerError> {
    let mut logs = BTreeMap::new();
    match source {
        RelocationSource::None => {}
        RelocationSource::SameFile => {
            for partition in partitions {
                let path = moved_accounts_path(log_dir, partition);
                if let Some(log) = parse_moved_accounts_log(&path, partition)? {
                    logs.insert(partition, log);
                }
            }
        }
        RelocationSource::SeparateFile => {
            let path = log_dir.join(CLIENT_LATENCIES_FILE);
            match parse_client_relocations(&path)? {
                Some(mut by_partition) => {
                    for partition in partitions {
                        if let Some(log) = by_partition.remove(&partition) {
                            logs.insert(partition, log);
                        }
                    }
                }
                None => info!(
                    "No {} in {}, relocations are not subtracted",
                    CLIENT_LATENCIES_FILE,
                    log_dir.display()
                ),
            }
        }
    }
    Ok(logs)
}

fn log_begin_marker(begin_ns: Option<i64>) {
    if let Some(begin_ns) = begin_ns {
        let begin = DateTime::<Utc>::from_timestamp_nanos(begin_ns).to_rfc3339();
        info!("Experiment began at {}, earlier samples are ignored", begin);
    }
}

fn parent_dir(path: &Path) -> PathBuf {
    path.parent().map(Path::to_path_buf).unwrap_or_default()
}

/// `dir/stem<suffix>`, e.g. `logs/latencies_cdf` for `logs/latencies.txt`.
fn suffixed_path(path: &Path, suffix: &str) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    parent_dir(path).join(format!("{stem}{suffix}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suffixed_path_should_replace_extension() {
        assert_eq!(
            suffixed_path(Path::new("logs/run/latencies.txt"), "_cdf"),
            PathBuf::from("logs/run/latencies_cdf")
        );
    }

    #[test]
    fn separate_file_relocations_should_only_keep_requested_partitions() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CLIENT_LATENCIES_FILE),
            "1 moveTo 1 3\n1 moveTo 2 4\n1 move2 5 4\n",
        )
        .unwrap();

        let logs = load_relocations(dir.path(), 1..=2, RelocationSource::SeparateFile).unwrap();

        assert_eq!(logs.keys().copied().collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn missing_relocation_logs_should_give_no_corrections() {
        let dir = tempfile::tempdir().unwrap();

        let same_file = load_relocations(dir.path(), 1..=3, RelocationSource::SameFile).unwrap();
        let separate_file =
            load_relocations(dir.path(), 1..=3, RelocationSource::SeparateFile).unwrap();

        assert!(same_file.is_empty());
        assert!(separate_file.is_empty());
    }
}

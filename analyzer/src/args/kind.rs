use super::output::OutputArgs;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Subcommand, Debug)]
pub enum PlotKindCommand {
    #[command(
        about = "Aggregated throughput of N partitions",
        long_about = "Aggregates tput-partition-1.txt .. tput-partition-N.txt from a log directory into one throughput series,\nand plots every partition on its own",
        visible_alias = "tp",
        verbatim_doc_comment
    )]
    Throughput(ThroughputArgs),

    #[command(
        about = "Per-block throughput of a single partition log",
        visible_alias = "p",
        verbatim_doc_comment
    )]
    Partition(PartitionArgs),

    #[command(
        about = "Throughput of a single log without relocation correction",
        visible_alias = "s",
        verbatim_doc_comment
    )]
    Single(SingleArgs),

    #[command(
        about = "Time between consecutive blocks of a throughput log",
        visible_alias = "bi",
        verbatim_doc_comment
    )]
    BlockInterval(BlockIntervalArgs),

    #[command(
        about = "Latency CDF of a latency log",
        long_about = "Latency CDF of a replayer (method start end moved) or client (client method start latency ...) latency log",
        verbatim_doc_comment
    )]
    Cdf(CdfArgs),

    #[command(
        about = "Storage proof and header sizes",
        visible_alias = "m",
        verbatim_doc_comment
    )]
    Micro(MicroArgs),

    #[command(
        about = "Whole-run throughput for increasing shard counts",
        visible_alias = "cmp",
        verbatim_doc_comment
    )]
    Comparison(ComparisonArgs),

    #[command(
        about = "Count distinct accounts of a transfer log",
        visible_alias = "a",
        verbatim_doc_comment
    )]
    Accounts(AccountsArgs),

    #[command(about = "Print examples", visible_alias = "e", verbatim_doc_comment)]
    Examples,
}

/// How relocated transactions are found for a partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RelocationArg {
    /// Do not correct for relocations
    None,
    /// moved-accounts-partition-N.txt, keyed by timestamp
    SameFile,
    /// moveTo/move2 lines of latencies.txt, keyed by block height
    SeparateFile,
}

#[derive(Parser, Debug, Clone)]
pub struct ThroughputArgs {
    /// Number of partitions
    pub partitions: u32,

    /// Directory holding tput-partition-N.txt and the auxiliary logs
    pub log_dir: PathBuf,

    /// Bucket width in seconds
    #[arg(long, short = 'b')]
    pub bucket_width: Option<f64>,

    /// Relocation correction source
    #[arg(long, short = 'r', value_enum, default_value_t = RelocationArg::SeparateFile)]
    pub relocation: RelocationArg,

    /// Window size for the moving average of the aggregated series
    #[arg(long)]
    pub moving_average_window: Option<u32>,

    /// Skip the per-partition charts
    #[arg(long)]
    pub no_partition_charts: bool,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Parser, Debug, Clone)]
pub struct PartitionArgs {
    /// Throughput log, named tput-partition-N.txt
    pub log: PathBuf,

    /// Relocation correction source
    #[arg(long, short = 'r', value_enum, default_value_t = RelocationArg::SeparateFile)]
    pub relocation: RelocationArg,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Parser, Debug, Clone)]
pub struct SingleArgs {
    /// Throughput log with `count timestamp` lines
    pub log: PathBuf,

    /// Bucket width in seconds
    #[arg(long, short = 'b')]
    pub bucket_width: Option<f64>,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Parser, Debug, Clone)]
pub struct BlockIntervalArgs {
    /// Throughput log with `count timestamp validator` lines
    pub log: PathBuf,

    /// Intervals above this many seconds are reported with their proposer
    #[arg(long)]
    pub slow_threshold: Option<f64>,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LatencyLogFormat {
    /// Detect from the first line
    Auto,
    /// `method start end moved`
    Replayer,
    /// `client method start latency ...`
    Client,
}

#[derive(Parser, Debug, Clone)]
pub struct CdfArgs {
    /// Latency log
    pub log: PathBuf,

    #[arg(long, value_enum, default_value_t = LatencyLogFormat::Auto)]
    pub log_format: LatencyLogFormat,

    /// Lower fraction of sorted latencies to drop
    #[arg(long)]
    pub trim_low: Option<f64>,

    /// Upper fraction of sorted latencies to keep
    #[arg(long)]
    pub trim_high: Option<f64>,

    /// Log scale latency axis (default: on for replayer logs, off for client logs)
    #[arg(long)]
    pub log_scale: Option<bool>,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Parser, Debug, Clone)]
pub struct MicroArgs {
    /// `slots bytes` lines of the storage proof benchmark
    pub proofs: PathBuf,

    /// `validators bytes` lines of the header benchmark
    pub headers: PathBuf,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Parser, Debug, Clone)]
pub struct ComparisonArgs {
    /// Percentage of cross-shard transactions of the measured runs
    pub cross_shard_percent: u32,

    /// One `elapsed_ns total_txs` file per shard count
    #[arg(required = true, num_args = 1..)]
    pub files: Vec<PathBuf>,

    /// Directory with the 0% cross-shard runs ({p}p_250.txt)
    #[arg(long)]
    pub baseline_dir: Option<PathBuf>,

    /// Axis labels, comma separated (default: 1,2,4,8,...)
    #[arg(long, value_delimiter = ',')]
    pub labels: Option<Vec<String>>,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Parser, Debug, Clone)]
pub struct AccountsArgs {
    /// Log with `Transfer <_> <from> <_> <to>` lines
    pub log: PathBuf,
}

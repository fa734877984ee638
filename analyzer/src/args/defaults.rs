pub const DEFAULT_AGGREGATED_BUCKET_WIDTH_SECS: f64 = 60.0;
pub const DEFAULT_SINGLE_BUCKET_WIDTH_SECS: f64 = 1.0;
pub const DEFAULT_MOVING_AVERAGE_WINDOW: u32 = 1;
pub const DEFAULT_CDF_TRIM_LOW: f64 = 0.1;
pub const DEFAULT_CDF_TRIM_HIGH: f64 = 0.9;
pub const DEFAULT_SLOW_BLOCK_THRESHOLD_SECS: f64 = 20.0;
pub const DEFAULT_CHART_WIDTH: u32 = 1200;
pub const DEFAULT_CHART_HEIGHT: u32 = 800;
pub const DEFAULT_COMPARISON_BASELINE_PARTITIONS: [u32; 4] = [1, 2, 4, 8];

pub const BEGIN_EXPERIMENT_FILE: &str = "begin-experiment.txt";
pub const CLIENT_LATENCIES_FILE: &str = "latencies.txt";
pub const THROUGHPUT_LOG_PREFIX: &str = "tput-partition-";
pub const MOVED_ACCOUNTS_LOG_PREFIX: &str = "moved-accounts-partition-";
pub const STOPPED_STREAM_PREFIX: &str = "stopped-tx-stream-partition-";

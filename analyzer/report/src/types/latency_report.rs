use super::time_series::TimeSeries;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
pub struct LatencyPercentiles {
    pub avg_s: f64,
    pub p50_s: f64,
    pub p90_s: f64,
    pub p99_s: f64,
    pub max_s: f64,
}

/// Empirical latency distribution of one latency log.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct LatencyCdfReport {
    /// File name of the latency log
    pub source: String,

    /// Records read before trimming
    pub samples: usize,

    /// Records left after percentile trimming
    pub trimmed_samples: usize,

    /// Fraction range kept by the trimming, e.g. (0.1, 0.9)
    pub trim: (f64, f64),

    pub percentiles: LatencyPercentiles,

    /// Draw the latency axis in log scale
    pub log_scale: bool,

    /// CDF over all records, x = latency in seconds, y = cumulative fraction
    pub overall: TimeSeries,

    /// Only present for logs that flag cross-shard transactions
    pub single_shard: Option<TimeSeries>,
    pub cross_shard: Option<TimeSeries>,
}

/// One inter-block interval above the slow threshold.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SlowBlock {
    pub index: usize,
    pub interval_s: f64,
    pub validator: Option<String>,
}

/// Time between consecutive blocks of a single partition.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct BlockIntervalReport {
    pub source: String,
    pub average_interval_s: f64,
    pub slow_threshold_s: f64,
    pub slow_blocks: Vec<SlowBlock>,
    /// x = block index, y = seconds since the previous block
    pub intervals: TimeSeries,
}

use derive_more::Display;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum ChartKind {
    #[display("Aggregated Throughput")]
    #[serde(rename = "aggregated_throughput")]
    AggregatedThroughput,
    #[display("Partition Throughput")]
    #[serde(rename = "partition_throughput")]
    PartitionThroughput,
    #[display("Throughput")]
    #[serde(rename = "throughput")]
    Throughput,
    #[display("Block Interval")]
    #[serde(rename = "block_interval")]
    BlockInterval,
    #[display("Latency CDF")]
    #[serde(rename = "latency_cdf")]
    LatencyCdf,
    #[display("Storage Proof And Header Size")]
    #[serde(rename = "micro_sizes")]
    MicroSizes,
    #[display("Throughput Comparison")]
    #[serde(rename = "comparison")]
    Comparison,
}

use shard_bench_report::error::ReportError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalyzerError {
    #[error("IO error")]
    IoError(#[from] std::io::Error),
    #[error("Cannot read log file {path}")]
    CannotReadLog {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Cannot load configuration: {0}")]
    CannotLoadConfiguration(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Partition {partition}: relocation-corrected transaction count {count} at {timestamp_ns} ns is negative")]
    NegativeCorrectedCount {
        partition: u32,
        count: i64,
        timestamp_ns: i64,
    },
    #[error("Report error")]
    ReportError(#[from] ReportError),
}

pub mod alignment;
pub mod metrics;
pub mod relocation;
pub mod report_builder;
pub mod stream;
pub mod stream_aggregator;
pub mod time_series;

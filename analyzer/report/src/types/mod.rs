pub mod comparison_report;
pub mod latency_report;
pub mod micro_report;
pub mod report;
pub mod throughput_report;
pub mod time_series;

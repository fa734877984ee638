pub mod error;
mod plotting;
mod prints;
mod types;

pub use plotting::chart_kind;
pub use plotting::figure;
pub use plotting::html::render_html;
pub use plotting::svg::render_svg;
pub use types::comparison_report;
pub use types::latency_report;
pub use types::micro_report;
pub use types::report;
pub use types::throughput_report;
pub use types::time_series;

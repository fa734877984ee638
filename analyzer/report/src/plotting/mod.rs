pub mod chart;
pub mod chart_kind;
pub mod figure;
mod figures;
pub mod html;
pub mod svg;
mod text;

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Vector image
    Svg,
    /// Interactive chart
    Html,
    /// Report data used to draw the chart
    Json,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Svg => "svg",
            OutputFormat::Html => "html",
            OutputFormat::Json => "json",
        }
    }
}

#[derive(Parser, Debug, Clone)]
pub struct OutputArgs {
    /// Output file path, the extension is replaced per format. Derived from the input path if not provided
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Output formats, can be repeated
    #[arg(long, short = 'f', value_enum, default_values_t = [OutputFormat::Svg])]
    pub format: Vec<OutputFormat>,

    /// Dark background for HTML charts
    #[arg(long)]
    pub dark: bool,

    /// Chart width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Chart height in pixels
    #[arg(long)]
    pub height: Option<u32>,
}

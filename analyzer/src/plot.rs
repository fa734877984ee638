use crate::args::output::{OutputArgs, OutputFormat};
use crate::config::ChartConfig;
use crate::error::AnalyzerError;
use human_repr::{HumanCount, HumanDuration};
use shard_bench_report::figure::Figure;
use shard_bench_report::report::JsonReport;
use shard_bench_report::{render_html, render_svg};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

/// Where and how one chart (and its report) is written.
#[derive(Debug, Clone)]
pub struct ChartOutput {
    base: PathBuf,
    formats: Vec<OutputFormat>,
    size: (u32, u32),
    dark: bool,
}

impl ChartOutput {
    /// `default_base` is used unless `--output` was given; the extension of
    /// either is replaced per format.
    pub fn new(args: &OutputArgs, chart: &ChartConfig, default_base: PathBuf) -> Self {
        let mut formats: Vec<OutputFormat> = Vec::with_capacity(args.format.len());
        for format in &args.format {
            if !formats.contains(format) {
                formats.push(*format);
            }
        }
        Self {
            base: args.output.clone().unwrap_or(default_base),
            formats,
            size: (
                args.width.unwrap_or(chart.width),
                args.height.unwrap_or(chart.height),
            ),
            dark: args.dark || chart.dark,
        }
    }

    /// Same settings, different file.
    pub fn with_base(&self, base: PathBuf) -> Self {
        Self {
            base,
            ..self.clone()
        }
    }

    pub fn directory(&self) -> PathBuf {
        self.base
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default()
    }

    pub fn path(&self, format: OutputFormat) -> PathBuf {
        self.base.with_extension(format.extension())
    }

    /// Writes every requested format. The figure is only built when a chart
    /// format is requested.
    pub fn write<R: JsonReport>(
        &self,
        report: &R,
        figure: impl FnOnce() -> Figure,
    ) -> Result<Vec<PathBuf>, AnalyzerError> {
        let directory = self.directory();
        if !directory.as_os_str().is_empty() {
            std::fs::create_dir_all(&directory)?;
        }

        let data_processing_start = Instant::now();
        let figure = self
            .formats
            .iter()
            .any(|f| *f != OutputFormat::Json)
            .then(figure);
        let data_processing_time = data_processing_start.elapsed();

        let mut written = Vec::new();
        for format in &self.formats {
            let path = self.path(*format);
            let render_start = Instant::now();
            let paths = match (format, &figure) {
                (OutputFormat::Json, _) => {
                    report.dump_to_json(&path)?;
                    vec![path]
                }
                (OutputFormat::Svg, Some(figure)) => {
                    render_svg(figure, &path, self.size)?;
                    vec![path]
                }
                (OutputFormat::Html, Some(figure)) => {
                    render_html(figure, &path, self.size, self.dark)?
                }
                (_, None) => Vec::new(),
            };
            let render_time = render_start.elapsed();

            for path in paths {
                let size = std::fs::metadata(&path)?.len();
                info!(
                    "Generated {} output at: {} (size: {}, data processing: {}, render: {})",
                    format.extension(),
                    path.display(),
                    size.human_count_bytes(),
                    data_processing_time.human_duration(),
                    render_time.human_duration()
                );
                written.push(path);
            }
        }
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shard_bench_report::comparison_report::{ComparisonEntry, ComparisonReport};

    fn output_args(output: PathBuf, format: Vec<OutputFormat>) -> OutputArgs {
        OutputArgs {
            output: Some(output),
            format,
            dark: false,
            width: None,
            height: None,
        }
    }

    #[test]
    fn path_should_replace_extension_per_format() {
        let args = output_args(PathBuf::from("/tmp/run/chart.svg"), vec![OutputFormat::Svg]);
        let output = ChartOutput::new(&args, &ChartConfig::default(), PathBuf::from("unused"));

        assert_eq!(
            output.path(OutputFormat::Json),
            PathBuf::from("/tmp/run/chart.json")
        );
        assert_eq!(output.directory(), PathBuf::from("/tmp/run"));
    }

    #[test]
    fn repeated_formats_should_keep_first_occurrence_only() {
        let args = output_args(
            PathBuf::from("chart"),
            vec![
                OutputFormat::Svg,
                OutputFormat::Json,
                OutputFormat::Svg,
                OutputFormat::Json,
            ],
        );

        let output = ChartOutput::new(&args, &ChartConfig::default(), PathBuf::from("unused"));

        assert_eq!(output.formats, vec![OutputFormat::Svg, OutputFormat::Json]);
    }

    #[test]
    fn json_only_output_should_not_build_figure() {
        let dir = tempfile::tempdir().unwrap();
        let args = output_args(dir.path().join("cmp"), vec![OutputFormat::Json]);
        let output = ChartOutput::new(&args, &ChartConfig::default(), PathBuf::from("unused"));
        let report = ComparisonReport {
            cross_shard_percent: 0,
            entries: vec![ComparisonEntry::new("1".to_owned(), 10.0, None)],
        };

        let written = output
            .write(&report, || panic!("figure must not be built"))
            .unwrap();

        assert_eq!(written, vec![dir.path().join("cmp.json")]);
    }
}

use super::figure::{AxisScale, Figure, LineKind, Panel, PanelContent, PlotBars, PlotLine};
use crate::error::ReportError;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::ops::Range;
use std::path::Path;

const FONT: &str = "sans-serif";
const TITLE_FONT_SIZE: i32 = 24;
const SUBTEXT_FONT_SIZE: i32 = 14;
const SUBTEXT_LINE_HEIGHT: i32 = 18;
const BAR_HALF_WIDTH: f64 = 0.35;

type SvgArea<'a> = DrawingArea<SVGBackend<'a>, Shift>;

/// Render `figure` as a vector image at `path`, panels stacked vertically.
pub fn render_svg(figure: &Figure, path: &Path, size: (u32, u32)) -> Result<(), ReportError> {
    if figure.panels.is_empty() {
        return Err(ReportError::EmptyFigure(figure.title.clone()));
    }

    let root = SVGBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE).map_err(svg_error)?;
    let root = root
        .titled(&figure.title, (FONT, TITLE_FONT_SIZE))
        .map_err(svg_error)?;

    let subtext = figure
        .subtext
        .lines()
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>();
    let (header, body) =
        root.split_vertically(subtext.len() as i32 * SUBTEXT_LINE_HEIGHT + 4);
    let subtext_style = (FONT, SUBTEXT_FONT_SIZE).into_font().color(&BLACK);
    for (index, line) in subtext.iter().enumerate() {
        header
            .draw_text(line, &subtext_style, (10, index as i32 * SUBTEXT_LINE_HEIGHT))
            .map_err(svg_error)?;
    }

    let areas = body.split_evenly((figure.panels.len(), 1));
    for (panel, area) in figure.panels.iter().zip(areas.iter()) {
        match &panel.content {
            PanelContent::Lines(lines) => draw_lines(area, panel, lines)?,
            PanelContent::Bars(bars) => draw_bars(area, panel, bars)?,
        }
    }

    root.present().map_err(svg_error)?;
    Ok(())
}

fn draw_lines(area: &SvgArea, panel: &Panel, lines: &[PlotLine]) -> Result<(), ReportError> {
    let log_x = panel.x_scale == AxisScale::Log;
    // Log axes are drawn as log10 of the value on a linear axis.
    let to_axis = |x: f64| -> Option<f64> {
        if log_x {
            (x > 0.0).then(|| x.log10())
        } else {
            Some(x)
        }
    };

    let series = lines
        .iter()
        .map(|line| {
            let points = line
                .points
                .iter()
                .filter_map(|&(x, y)| to_axis(x).map(|x| (x, y)))
                .collect::<Vec<_>>();
            (line.name.clone(), line.kind, points)
        })
        .collect::<Vec<_>>();

    let xs = series
        .iter()
        .flat_map(|(_, _, points)| points.iter().map(|&(x, _)| x));
    let ys = series
        .iter()
        .flat_map(|(_, _, points)| points.iter().map(|&(_, y)| y));
    let x_range = padded_range(xs, false);
    let y_range = padded_range(ys, panel.y_from_zero);
    let (y_min, y_max) = (y_range.start, y_range.end);

    let mut chart = ChartBuilder::on(area)
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_range, y_range)
        .map_err(svg_error)?;

    let x_formatter = |x: &f64| {
        if log_x {
            format_axis_value(10f64.powf(*x))
        } else {
            format_axis_value(*x)
        }
    };
    chart
        .configure_mesh()
        .x_desc(panel.x_label.as_str())
        .y_desc(panel.y_label.as_str())
        .x_label_formatter(&x_formatter)
        .y_label_formatter(&|y| format_axis_value(*y))
        .draw()
        .map_err(svg_error)?;

    for (index, (name, kind, points)) in series.into_iter().enumerate() {
        let color = Palette99::pick(index).to_rgba();
        let annotation = match kind {
            LineKind::Solid => chart
                .draw_series(LineSeries::new(points, color.stroke_width(2)))
                .map_err(svg_error)?,
            LineKind::Dots => chart
                .draw_series(
                    points
                        .into_iter()
                        .map(|point| Circle::new(point, 2, color.filled())),
                )
                .map_err(svg_error)?,
        };
        annotation.label(name).legend(move |(x, y)| {
            PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
        });
    }

    for marker in &panel.markers {
        let Some(x) = to_axis(marker.x) else {
            continue;
        };
        chart
            .draw_series(std::iter::once(PathElement::new(
                vec![(x, y_min), (x, y_max)],
                RED.stroke_width(1),
            )))
            .map_err(svg_error)?
            .label(marker.label.clone())
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(svg_error)?;

    Ok(())
}

fn draw_bars(area: &SvgArea, panel: &Panel, bars: &[PlotBars]) -> Result<(), ReportError> {
    let categories = panel.categories();
    let slots = categories.len().max(1);
    let tops = bars
        .iter()
        .flat_map(|series| series.bars.iter().flat_map(|bar| [bar.bottom, bar.top]));
    let y_range = padded_range(tops, true);

    let mut chart = ChartBuilder::on(area)
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(-0.5f64..(slots as f64 - 0.5), y_range)
        .map_err(svg_error)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(slots)
        .x_desc(panel.x_label.as_str())
        .y_desc(panel.y_label.as_str())
        .x_label_formatter(&|x| category_label(&categories, *x))
        .y_label_formatter(&|y| format_axis_value(*y))
        .draw()
        .map_err(svg_error)?;

    for (index, series) in bars.iter().enumerate() {
        let color = Palette99::pick(index).to_rgba();
        let slot_of = |label: &String| categories.iter().position(|c| c == label);
        let rectangles = series
            .bars
            .iter()
            .filter_map(|bar| {
                let slot = slot_of(&bar.label)? as f64;
                Some([
                    (slot - BAR_HALF_WIDTH, bar.bottom),
                    (slot + BAR_HALF_WIDTH, bar.top),
                ])
            })
            .collect::<Vec<_>>();

        chart
            .draw_series(
                rectangles
                    .iter()
                    .map(|corners| Rectangle::new(*corners, color.filled())),
            )
            .map_err(svg_error)?
            .label(series.name.clone())
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled()));
        chart
            .draw_series(
                rectangles
                    .iter()
                    .map(|corners| Rectangle::new(*corners, BLACK.stroke_width(1))),
            )
            .map_err(svg_error)?;
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(svg_error)?;

    Ok(())
}

fn padded_range(values: impl Iterator<Item = f64>, from_zero: bool) -> Range<f64> {
    let (mut min, max) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), v| {
            (min.min(v), max.max(v))
        });
    if !min.is_finite() || !max.is_finite() {
        return 0.0..1.0;
    }
    if from_zero {
        min = min.min(0.0);
    }
    if (max - min).abs() < f64::EPSILON {
        return (min - 1.0)..(max + 1.0);
    }
    min..(max + (max - min) * 0.05)
}

fn category_label(categories: &[String], x: f64) -> String {
    let slot = x.round();
    if (x - slot).abs() > 0.01 || slot < 0.0 {
        return String::new();
    }
    categories.get(slot as usize).cloned().unwrap_or_default()
}

fn format_axis_value(value: f64) -> String {
    let magnitude = value.abs();
    if magnitude >= 100.0 || magnitude == 0.0 {
        format!("{value:.0}")
    } else if magnitude >= 1.0 {
        format!("{value:.1}")
    } else {
        format!("{value:.3}")
    }
}

fn svg_error<E: std::fmt::Display>(error: E) -> ReportError {
    ReportError::SvgRenderFailure(error.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart_kind::ChartKind;
    use crate::figure::{Bar, Marker};

    fn read_svg(path: &Path) -> String {
        std::fs::read_to_string(path).unwrap()
    }

    #[test]
    fn line_figure_with_marker_should_render() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tput.svg");
        let panel = Panel::lines(
            "time [s]",
            "throughput [tx/s]",
            vec![PlotLine::new(
                "aggregated".to_owned(),
                vec![(0.5, 10.0), (1.5, 30.0), (2.5, 20.0)],
                LineKind::Solid,
            )],
        )
        .with_markers(vec![Marker::new("partition 2 stopped".to_owned(), 2.0)]);
        let figure = Figure::new(
            ChartKind::AggregatedThroughput,
            "Aggregated Throughput".to_owned(),
            "2 partitions\nbucket width: 1 s".to_owned(),
        )
        .with_panel(panel);

        render_svg(&figure, &path, (800, 600)).unwrap();

        let svg = read_svg(&path);
        assert!(svg.contains("<svg"));
        assert!(svg.contains("partition 2 stopped"));
    }

    #[test]
    fn stacked_bar_figure_should_render() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tput-comparison.svg");
        let panel = Panel::bars(
            "shards",
            "throughput [tx/s]",
            vec![
                PlotBars::new(
                    "20% cross-shard".to_owned(),
                    vec![
                        Bar::new("1".to_owned(), 0.0, 100.0),
                        Bar::new("2".to_owned(), 0.0, 180.0),
                    ],
                ),
                PlotBars::new(
                    "0% cross-shard".to_owned(),
                    vec![Bar::new("2".to_owned(), 180.0, 200.0)],
                ),
            ],
        );
        let figure = Figure::new(ChartKind::Comparison, "Comparison".to_owned(), String::new())
            .with_panel(panel);

        render_svg(&figure, &path, (800, 600)).unwrap();

        let svg = read_svg(&path);
        assert!(svg.contains("<svg"));
        assert!(svg.contains("0% cross-shard"));
    }

    #[test]
    fn figure_without_panels_should_be_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let figure = Figure::new(ChartKind::Throughput, "empty".to_owned(), String::new());

        let result = render_svg(&figure, &dir.path().join("empty.svg"), (800, 600));

        assert!(matches!(result, Err(ReportError::EmptyFigure(_))));
    }

    #[test]
    fn padded_range_should_start_at_zero_when_requested() {
        let range = padded_range([5.0, 15.0].into_iter(), true);

        assert_eq!(range.start, 0.0);
        assert!(range.end > 15.0);
    }

    #[test]
    fn padded_range_should_widen_single_value() {
        let range = padded_range([3.0].into_iter(), false);

        assert_eq!(range, 2.0..4.0);
    }

    #[test]
    fn padded_range_of_nothing_should_be_unit() {
        let range = padded_range(std::iter::empty(), true);

        assert_eq!(range, 0.0..1.0);
    }

    #[test]
    fn category_label_should_only_label_integer_slots() {
        let categories = vec!["1".to_owned(), "2".to_owned()];

        assert_eq!(category_label(&categories, 1.0), "2");
        assert_eq!(category_label(&categories, 0.5), "");
        assert_eq!(category_label(&categories, 7.0), "");
    }
}

use super::figure::{AxisScale, Figure, LineKind, Panel, PanelContent};
use charming::{
    component::{
        Axis, DataView, DataZoom, DataZoomType, Feature, Grid, Legend, LegendSelectedMode,
        LegendType, Restore, SaveAsImage, Title, Toolbox, ToolboxDataZoom,
    },
    element::{
        AxisLabel, AxisPointer, AxisPointerType, AxisType, Emphasis, ItemStyle, LineStyle,
        NameLocation, Orient, SplitLine, Symbol, TextAlign, TextStyle, Tooltip,
    },
    series::{Bar, Line},
    Chart,
};

const AXIS_LABEL_SIZE: u32 = 14;
const MARKER_COLOR: &str = "#d62728";
const STACK_NAME: &str = "total";

pub struct LedgerChart {
    pub inner: Chart,
}

impl LedgerChart {
    /// Create a new `LedgerChart` with default tooltip, legend, grid, and toolbox.
    pub fn new(title: &str, subtext: &str, dark: bool) -> Self {
        let chart = Chart::new()
            .title(
                Title::new()
                    .text(title)
                    .text_align(TextAlign::Center)
                    .subtext(subtext)
                    .text_style(TextStyle::new().font_size(24).font_weight("bold"))
                    .subtext_style(TextStyle::new().font_size(14).line_height(20))
                    .left("50%")
                    .top("1%"),
            )
            .tooltip(Tooltip::new().axis_pointer(AxisPointer::new().type_(AxisPointerType::Cross)))
            .legend(
                Legend::new()
                    .show(true)
                    .right("2%")
                    .top("middle")
                    .orient(Orient::Vertical)
                    .selected_mode(LegendSelectedMode::Multiple)
                    .text_style(TextStyle::new().font_size(12))
                    .padding(10)
                    .item_gap(10)
                    .item_width(25)
                    .item_height(14)
                    .type_(LegendType::Scroll),
            )
            .grid(Grid::new().left("5%").right("20%").top("16%").bottom("8%"))
            .toolbox(
                Toolbox::new().feature(
                    Feature::new()
                        .data_zoom(ToolboxDataZoom::new())
                        .data_view(DataView::new())
                        .restore(Restore::new())
                        .save_as_image(SaveAsImage::new()),
                ),
            );

        let chart = if dark {
            chart.background_color("#242424")
        } else {
            chart
        };

        Self { inner: chart }
    }

    pub fn with_zoom_slider(mut self) -> Self {
        self.inner = self.inner.data_zoom(
            DataZoom::new()
                .show(true)
                .type_(DataZoomType::Slider)
                .bottom("2%")
                .start(0)
                .end(100),
        );
        self
    }

    /// Configure a numeric X axis, e.g. time in seconds or latency.
    pub fn with_value_x_axis(mut self, axis_label: &str, scale: AxisScale) -> Self {
        let axis_type = match scale {
            AxisScale::Linear => AxisType::Value,
            AxisScale::Log => AxisType::Log,
        };
        self.inner = self.inner.x_axis(labelled_axis(axis_type, axis_label));
        self
    }

    /// Category X axis, one slot per bar group.
    pub fn with_category_x_axis(mut self, axis_label: &str, categories: Vec<String>) -> Self {
        self.inner = self
            .inner
            .x_axis(labelled_axis(AxisType::Category, axis_label).data(categories));
        self
    }

    /// Configure a Y axis for e.g. throughput in tx/s.
    pub fn with_y_axis(mut self, axis_label: &str) -> Self {
        self.inner = self.inner.y_axis(
            labelled_axis(AxisType::Value, axis_label)
                .position("left")
                .axis_label(AxisLabel::new()),
        );
        self
    }

    /// Solid line through `[x, y]` points, named in the legend.
    pub fn add_line_series(mut self, name: &str, points: Vec<Vec<f64>>, width: f64) -> Self {
        let line = Line::new()
            .name(name)
            .data(points)
            .show_symbol(false)
            .emphasis(Emphasis::new())
            .line_style(LineStyle::new().width(width).opacity(1.0));

        self.inner = self.inner.series(line);
        self
    }

    /// Add a series drawn as unconnected dots.
    pub fn add_dot_series(mut self, name: &str, points: Vec<Vec<f64>>) -> Self {
        let line = Line::new()
            .name(name)
            .data(points)
            .symbol(Symbol::Circle)
            .symbol_size(4.0)
            .line_style(LineStyle::new().width(0).opacity(0.0));

        self.inner = self.inner.series(line);
        self
    }

    /// Add a vertical marker spanning `[y_min, y_max]` at `x`.
    pub fn add_marker(mut self, name: &str, x: f64, y_min: f64, y_max: f64) -> Self {
        let line = Line::new()
            .name(name)
            .data(vec![vec![x, y_min], vec![x, y_max]])
            .show_symbol(false)
            .line_style(LineStyle::new().width(1.5).opacity(0.8))
            .item_style(ItemStyle::new().color(MARKER_COLOR));

        self.inner = self.inner.series(line);
        self
    }

    /// Add one stacked bar series, `data` holds one value per category.
    pub fn add_bar_series(mut self, name: &str, data: Vec<f64>) -> Self {
        let bar = Bar::new().name(name).stack(STACK_NAME).data(data);

        self.inner = self.inner.series(bar);
        self
    }
}

// Axis name at the end of the axis, with grid lines.
fn labelled_axis(axis_type: AxisType, axis_label: &str) -> Axis {
    Axis::new()
        .type_(axis_type)
        .name(axis_label)
        .name_location(NameLocation::End)
        .name_text_style(TextStyle::new().font_size(AXIS_LABEL_SIZE))
        .name_gap(12)
        .split_line(SplitLine::new().show(true))
}

/// Build the interactive chart of a single panel of `figure`.
pub fn create_panel_chart(figure: &Figure, panel: &Panel, dark: bool) -> Chart {
    let chart = LedgerChart::new(&figure.title, &figure.subtext, dark);

    let chart = match &panel.content {
        PanelContent::Lines(lines) => {
            let mut chart = chart
                .with_zoom_slider()
                .with_value_x_axis(&panel.x_label, panel.x_scale)
                .with_y_axis(&panel.y_label);
            for line in lines {
                let points = line.points.iter().map(|&(x, y)| vec![x, y]).collect();
                chart = match line.kind {
                    LineKind::Solid => chart.add_line_series(&line.name, points, 2.0),
                    LineKind::Dots => chart.add_dot_series(&line.name, points),
                };
            }
            let (y_min, y_max) = value_range(panel);
            for marker in &panel.markers {
                chart = chart.add_marker(&marker.label, marker.x, y_min, y_max);
            }
            chart
        }
        PanelContent::Bars(series) => {
            let categories = panel.categories();
            let mut chart = chart
                .with_category_x_axis(&panel.x_label, categories.clone())
                .with_y_axis(&panel.y_label);
            for bars in series {
                // Stacked bars add up, so every series carries only its own height.
                let data = categories
                    .iter()
                    .map(|category| {
                        bars.bars
                            .iter()
                            .find(|bar| &bar.label == category)
                            .map(|bar| bar.top - bar.bottom)
                            .unwrap_or(0.0)
                    })
                    .collect();
                chart = chart.add_bar_series(&bars.name, data);
            }
            chart
        }
    };

    chart.inner
}

fn value_range(panel: &Panel) -> (f64, f64) {
    let PanelContent::Lines(lines) = &panel.content else {
        return (0.0, 1.0);
    };
    let values = lines
        .iter()
        .flat_map(|l| l.points.iter().map(|&(_, y)| y))
        .collect::<Vec<_>>();
    if values.is_empty() {
        return (0.0, 1.0);
    }
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    (min.min(0.0), max)
}

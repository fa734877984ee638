//! Backend-neutral description of a chart.
//!
//! Reports are turned into a [`Figure`] once and the same figure is handed to
//! the SVG and the HTML renderers.

use super::chart_kind::ChartKind;
use derive_new::new;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AxisScale {
    #[default]
    Linear,
    Log,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineKind {
    #[default]
    Solid,
    Dots,
}

#[derive(Debug, Clone, PartialEq, new)]
pub struct PlotLine {
    pub name: String,
    pub points: Vec<(f64, f64)>,
    pub kind: LineKind,
}

#[derive(Debug, Clone, PartialEq, new)]
pub struct Bar {
    pub label: String,
    pub bottom: f64,
    pub top: f64,
}

#[derive(Debug, Clone, PartialEq, new)]
pub struct PlotBars {
    pub name: String,
    pub bars: Vec<Bar>,
}

/// Vertical line at `x`, e.g. the moment a partition stopped receiving transactions.
#[derive(Debug, Clone, PartialEq, new)]
pub struct Marker {
    pub label: String,
    pub x: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PanelContent {
    Lines(Vec<PlotLine>),
    Bars(Vec<PlotBars>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    pub x_label: String,
    pub y_label: String,
    pub x_scale: AxisScale,
    pub y_from_zero: bool,
    pub content: PanelContent,
    pub markers: Vec<Marker>,
}

impl Panel {
    pub fn lines(x_label: &str, y_label: &str, lines: Vec<PlotLine>) -> Self {
        Self {
            x_label: x_label.to_owned(),
            y_label: y_label.to_owned(),
            x_scale: AxisScale::Linear,
            y_from_zero: true,
            content: PanelContent::Lines(lines),
            markers: Vec::new(),
        }
    }

    pub fn bars(x_label: &str, y_label: &str, bars: Vec<PlotBars>) -> Self {
        Self {
            x_label: x_label.to_owned(),
            y_label: y_label.to_owned(),
            x_scale: AxisScale::Linear,
            y_from_zero: true,
            content: PanelContent::Bars(bars),
            markers: Vec::new(),
        }
    }

    pub fn with_x_scale(mut self, scale: AxisScale) -> Self {
        self.x_scale = scale;
        self
    }

    pub fn with_markers(mut self, markers: Vec<Marker>) -> Self {
        self.markers = markers;
        self
    }

    pub fn is_empty(&self) -> bool {
        match &self.content {
            PanelContent::Lines(lines) => lines.iter().all(|l| l.points.is_empty()),
            PanelContent::Bars(bars) => bars.iter().all(|b| b.bars.is_empty()),
        }
    }

    /// Bar categories in first-seen order.
    pub fn categories(&self) -> Vec<String> {
        let mut categories: Vec<String> = Vec::new();
        if let PanelContent::Bars(series) = &self.content {
            for bar in series.iter().flat_map(|s| s.bars.iter()) {
                if !categories.contains(&bar.label) {
                    categories.push(bar.label.clone());
                }
            }
        }
        categories
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    pub kind: ChartKind,
    pub title: String,
    pub subtext: String,
    pub panels: Vec<Panel>,
}

impl Figure {
    pub fn new(kind: ChartKind, title: String, subtext: String) -> Self {
        Self {
            kind,
            title,
            subtext,
            panels: Vec::new(),
        }
    }

    pub fn with_panel(mut self, panel: Panel) -> Self {
        self.panels.push(panel);
        self
    }
}

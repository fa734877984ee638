use super::chart_kind::ChartKind;
use super::figure::{AxisScale, Bar, Figure, LineKind, Marker, Panel, PlotBars, PlotLine};
use crate::{
    comparison_report::ComparisonReport,
    latency_report::{BlockIntervalReport, LatencyCdfReport},
    micro_report::{MicroReport, SizePoint},
    throughput_report::{PartitionThroughputReport, ThroughputReport},
    time_series::TimeSeries,
};

const TIME_AXIS: &str = "time (s)";
const RATE_AXIS: &str = "tx/s";

impl ThroughputReport {
    /// Aggregated (or single stream) throughput, time relative to the window start.
    pub fn figure(&self, kind: ChartKind) -> Figure {
        let origin_s = self
            .window
            .map(|w| w.start_s)
            .or_else(|| self.aggregate.points.first().map(|p| p.time_s))
            .unwrap_or_default();
        let series = self.aggregate.rebased(origin_s);
        let markers = self
            .stop_markers
            .iter()
            .map(|m| {
                Marker::new(
                    format!("partition {} stopped", m.partition),
                    m.time_s - origin_s,
                )
            })
            .collect();

        let name = match self.partitions.len() {
            1 => format!("partition {}", self.partitions[0]),
            count => format!("{count} partitions"),
        };
        Figure::new(kind, self.title(kind), self.subtext()).with_panel(
            Panel::lines(
                TIME_AXIS,
                RATE_AXIS,
                vec![PlotLine::new(name, series.as_pairs(), LineKind::Solid)],
            )
            .with_markers(markers),
        )
    }
}

impl PartitionThroughputReport {
    /// Per-block rates drawn as dots, time relative to the experiment begin
    /// (or to the first block when there is no begin marker).
    pub fn figure(&self) -> Figure {
        let origin_s = self
            .experiment_begin_ns
            .map(|ns| ns as f64 / 1e9)
            .or_else(|| self.rates.points.first().map(|p| p.time_s))
            .unwrap_or_default();
        let markers = self
            .stop_marker
            .iter()
            .map(|m| Marker::new("stopped".to_owned(), m.time_s - origin_s))
            .collect();

        Figure::new(ChartKind::PartitionThroughput, self.title(), self.subtext()).with_panel(
            Panel::lines(
                TIME_AXIS,
                RATE_AXIS,
                vec![PlotLine::new(
                    format!("partition {}", self.partition),
                    self.rates.rebased(origin_s).as_pairs(),
                    LineKind::Dots,
                )],
            )
            .with_markers(markers),
        )
    }
}

impl BlockIntervalReport {
    pub fn figure(&self) -> Figure {
        Figure::new(ChartKind::BlockInterval, self.title(), self.subtext()).with_panel(
            Panel::lines(
                "block",
                "interval (s)",
                vec![PlotLine::new(
                    "interval".to_owned(),
                    self.intervals.as_pairs(),
                    LineKind::Dots,
                )],
            ),
        )
    }
}

impl LatencyCdfReport {
    pub fn figure(&self) -> Figure {
        let mut lines = vec![cdf_line("all", &self.overall)];
        if let Some(single_shard) = &self.single_shard {
            lines.push(cdf_line("single-shard", single_shard));
        }
        if let Some(cross_shard) = &self.cross_shard {
            lines.push(cdf_line("cross-shard", cross_shard));
        }
        let scale = if self.log_scale {
            AxisScale::Log
        } else {
            AxisScale::Linear
        };

        Figure::new(ChartKind::LatencyCdf, self.title(), self.subtext())
            .with_panel(Panel::lines("latency (s)", "fraction", lines).with_x_scale(scale))
    }
}

fn cdf_line(name: &str, series: &TimeSeries) -> PlotLine {
    PlotLine::new(name.to_owned(), series.as_pairs(), LineKind::Solid)
}

impl MicroReport {
    pub fn figure(&self) -> Figure {
        Figure::new(
            ChartKind::MicroSizes,
            ChartKind::MicroSizes.to_string(),
            self.subtext(),
        )
        .with_panel(size_panel(
            "# 32 bytes storage",
            "Storage proof size (kb)",
            "proofs size",
            &self.proofs,
        ))
        .with_panel(size_panel(
            "# validators",
            "Header size (kb)",
            "header size",
            &self.headers,
        ))
    }
}

fn size_panel(x_label: &str, y_label: &str, name: &str, points: &[SizePoint]) -> Panel {
    let bars = points
        .iter()
        .map(|p| Bar::new(p.x.to_string(), 0.0, p.size_kb))
        .collect();
    Panel::bars(x_label, y_label, vec![PlotBars::new(name.to_owned(), bars)])
}

impl ComparisonReport {
    /// Measured throughput per shard count; with a baseline, every bar after
    /// the first is topped up to the 0% cross-shard throughput.
    pub fn figure(&self) -> Figure {
        let measured = self
            .entries
            .iter()
            .map(|e| Bar::new(e.label.clone(), 0.0, e.rate))
            .collect();
        let mut series = vec![PlotBars::new(
            format!("{}% cross-shard", self.cross_shard_percent),
            measured,
        )];

        if self.has_baseline() {
            let missing = self
                .entries
                .iter()
                .skip(1)
                .filter_map(|e| {
                    e.baseline_rate
                        .map(|baseline| Bar::new(e.label.clone(), e.rate, baseline))
                })
                .collect();
            series.push(PlotBars::new("0% cross-shard".to_owned(), missing));
        }

        Figure::new(ChartKind::Comparison, self.title(), self.subtext())
            .with_panel(Panel::bars("# shards", "txs/s", series))
    }
}

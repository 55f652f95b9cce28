//! Static Chart Renderer
//! Draws chart descriptions to PNG files with plotters.
//!
//! Layouts:
//! - Line charts: optional title, mesh with axis labels, one line per series, red circle markers
//! - Histograms: filled bars over equal-width price bins
//! - Returns: expected and actual returns stacked vertically in one image

use crate::charts::plotter::{HistogramChart, LineChart, LineColor};
use crate::charts::{ChartError, ChartPlotter};
use crate::config::ChartConfig;
use crate::data::ColumnTable;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::error::Error;
use std::path::Path;
use tracing::info;

type DrawResult = Result<(), Box<dyn Error>>;
type Area<'a> = DrawingArea<BitMapBackend<'a>, Shift>;

const TITLE_FONT: (&str, u32) = ("sans-serif", 40);
const BAR_COLOR: RGBColor = RGBColor(52, 152, 219);

/// Renders simulation charts to PNG files.
pub struct ChartRenderer {
    config: ChartConfig,
}

impl Default for ChartRenderer {
    fn default() -> Self {
        Self::new(ChartConfig::default())
    }
}

impl ChartRenderer {
    pub fn new(config: ChartConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    /// Plot `value` against `time`, marking the rows listed in `anomaly_times`.
    pub fn plot_anomaly(
        &self,
        table: &ColumnTable,
        anomaly_times: &[usize],
        path: &Path,
    ) -> Result<(), ChartError> {
        let chart = ChartPlotter::anomaly_chart(table, anomaly_times, self.config.marker_size)?;
        self.render_line_chart(&chart, path)
    }

    /// Plot a series against its index, marking the given positions.
    pub fn plot_series(
        &self,
        values: &[f64],
        marked: &[usize],
        path: &Path,
    ) -> Result<(), ChartError> {
        let chart = ChartPlotter::series_chart(values, marked, self.config.marker_size)?;
        self.render_line_chart(&chart, path)
    }

    /// Plot every simulated path with a reference line at the starting price.
    pub fn plot_paths(
        &self,
        paths: &[Vec<f64>],
        starting_price: f64,
        path: &Path,
    ) -> Result<(), ChartError> {
        let chart = ChartPlotter::paths_chart(paths, starting_price)?;
        self.render_line_chart(&chart, path)
    }

    /// Plot the distribution of final simulated prices.
    pub fn plot_final_dist(&self, values: &[f64], path: &Path) -> Result<(), ChartError> {
        let chart = ChartPlotter::final_dist_chart(values, self.config.histogram_bins)?;
        self.render_histogram(&chart, path)
    }

    /// Plot expected (running mean) and actual returns against number of simulations.
    pub fn plot_returns(&self, returns: &[f64], path: &Path) -> Result<(), ChartError> {
        let charts = ChartPlotter::returns_charts(returns)?;
        self.render_stacked(&charts, path)
    }

    pub fn render_line_chart(&self, chart: &LineChart, path: &Path) -> Result<(), ChartError> {
        self.render_to_file(path, |root| Self::draw_line_chart(root, chart))
    }

    pub fn render_histogram(&self, chart: &HistogramChart, path: &Path) -> Result<(), ChartError> {
        self.render_to_file(path, |root| Self::draw_histogram(root, chart))
    }

    /// Render several line charts one above the other in a single image.
    pub fn render_stacked(&self, charts: &[LineChart], path: &Path) -> Result<(), ChartError> {
        self.render_to_file(path, |root| {
            let panels = root.split_evenly((charts.len().max(1), 1));
            for (panel, chart) in panels.iter().zip(charts) {
                Self::draw_line_chart(panel, chart)?;
            }
            Ok(())
        })
    }

    fn render_to_file<F>(&self, path: &Path, draw: F) -> Result<(), ChartError>
    where
        F: FnOnce(&Area<'_>) -> DrawResult,
    {
        Self::draw_to_file(path, (self.config.width, self.config.height), draw).map_err(|e| {
            ChartError::Render {
                path: path.to_path_buf(),
                message: e.to_string(),
            }
        })?;
        info!("chart saved: {}", path.display());
        Ok(())
    }

    fn draw_to_file<F>(path: &Path, size: (u32, u32), draw: F) -> DrawResult
    where
        F: FnOnce(&Area<'_>) -> DrawResult,
    {
        let root = BitMapBackend::new(path, size).into_drawing_area();
        root.fill(&WHITE)?;
        draw(&root)?;
        root.present()?;
        Ok(())
    }

    fn draw_line_chart(area: &Area<'_>, chart: &LineChart) -> DrawResult {
        let (x_min, x_max) = chart.x_range();
        let (y_min, y_max) = chart.y_range();

        let mut builder = ChartBuilder::on(area);
        builder.margin(20).x_label_area_size(60).y_label_area_size(80);
        if !chart.title.is_empty() {
            builder.caption(chart.title.as_str(), TITLE_FONT);
        }
        let mut ctx = builder.build_cartesian_2d(x_min..x_max, y_min..y_max)?;

        ctx.configure_mesh()
            .x_desc(chart.x_label.as_str())
            .y_desc(chart.y_label.as_str())
            .draw()?;

        for line in &chart.lines {
            let style = match line.color {
                LineColor::Palette(i) => Palette99::pick(i).stroke_width(2),
                LineColor::Reference => BLUE.stroke_width(3),
            };
            ctx.draw_series(LineSeries::new(line.points.iter().copied(), style))?;
        }

        if let Some(markers) = &chart.markers {
            ctx.draw_series(
                markers
                    .points
                    .iter()
                    .map(|&p| Circle::new(p, markers.radius, RED.filled())),
            )?;
        }

        Ok(())
    }

    fn draw_histogram(area: &Area<'_>, chart: &HistogramChart) -> DrawResult {
        let (x_min, x_max) = chart.x_range();
        let y_max = (chart.max_count().max(1) as f64) * 1.1;

        let mut ctx = ChartBuilder::on(area)
            .caption(chart.title.as_str(), TITLE_FONT)
            .margin(20)
            .x_label_area_size(60)
            .y_label_area_size(80)
            .build_cartesian_2d(x_min..x_max, 0.0..y_max)?;

        ctx.configure_mesh()
            .disable_x_mesh()
            .x_desc(chart.x_label.as_str())
            .y_desc(chart.y_label.as_str())
            .draw()?;

        ctx.draw_series(chart.bins.iter().map(|bin| {
            Rectangle::new(
                [(bin.start, 0.0), (bin.end, bin.count as f64)],
                BAR_COLOR.filled(),
            )
        }))?;

        Ok(())
    }
}

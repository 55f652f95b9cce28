//! Chart Plotter Module
//! Builds renderer-independent descriptions of the simulation charts.

use crate::charts::ChartError;
use crate::data::ColumnTable;
use crate::stats::StatsCalculator;

/// Line color for a chart series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineColor {
    /// Index into the renderer's palette
    Palette(usize),
    /// Reference line (starting price)
    Reference,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub points: Vec<(f64, f64)>,
    pub color: LineColor,
}

/// Circular markers drawn on top of the lines.
#[derive(Debug, Clone, PartialEq)]
pub struct Markers {
    pub points: Vec<(f64, f64)>,
    pub radius: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub lines: Vec<Line>,
    pub markers: Option<Markers>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HistogramChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub bins: Vec<HistogramBin>,
}

impl LineChart {
    fn new(title: &str, x_label: &str, y_label: &str) -> Self {
        Self {
            title: title.to_string(),
            x_label: x_label.to_string(),
            y_label: y_label.to_string(),
            lines: Vec::new(),
            markers: None,
        }
    }

    pub fn x_range(&self) -> (f64, f64) {
        let xs = self.all_points().map(|p| p.0);
        ChartPlotter::axis_range(xs, 0.0)
    }

    pub fn y_range(&self) -> (f64, f64) {
        let ys = self.all_points().map(|p| p.1);
        ChartPlotter::axis_range(ys, 0.05)
    }

    fn all_points(&self) -> impl Iterator<Item = &(f64, f64)> {
        self.lines
            .iter()
            .flat_map(|l| l.points.iter())
            .chain(self.markers.iter().flat_map(|m| m.points.iter()))
    }
}

impl HistogramChart {
    pub fn x_range(&self) -> (f64, f64) {
        match (self.bins.first(), self.bins.last()) {
            (Some(first), Some(last)) => (first.start, last.end),
            _ => (0.0, 1.0),
        }
    }

    pub fn max_count(&self) -> usize {
        self.bins.iter().map(|b| b.count).max().unwrap_or(0)
    }
}

/// Builds chart descriptions from simulation output.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Untitled line chart of `value` against `time` with markers at the given row indices.
    ///
    /// Indices outside the table are ignored.
    pub fn anomaly_chart(
        table: &ColumnTable,
        anomaly_times: &[usize],
        marker_size: u32,
    ) -> Result<LineChart, ChartError> {
        let times = table
            .column("time")
            .ok_or_else(|| ChartError::MissingColumn("time".into()))?;
        let values = table
            .column("value")
            .ok_or_else(|| ChartError::MissingColumn("value".into()))?;
        if values.is_empty() {
            return Err(ChartError::EmptySeries);
        }

        let points: Vec<(f64, f64)> = times.iter().copied().zip(values.iter().copied()).collect();
        let markers = anomaly_times
            .iter()
            .filter_map(|&i| points.get(i).copied())
            .collect();

        let mut chart = LineChart::new("", "Time", "Value");
        chart.lines.push(Line {
            points,
            color: LineColor::Palette(0),
        });
        chart.markers = Some(Markers {
            points: markers,
            radius: marker_size,
        });
        Ok(chart)
    }

    /// Line chart of a bare series against its index, with optional markers.
    pub fn series_chart(
        values: &[f64],
        marked: &[usize],
        marker_size: u32,
    ) -> Result<LineChart, ChartError> {
        if values.is_empty() {
            return Err(ChartError::EmptySeries);
        }

        let mut chart = LineChart::new("Generated Data", "Time", "Value");
        chart.lines.push(Line {
            points: Self::indexed(values),
            color: LineColor::Palette(0),
        });
        if !marked.is_empty() {
            chart.markers = Some(Markers {
                points: marked
                    .iter()
                    .filter_map(|&i| values.get(i).map(|&v| (i as f64, v)))
                    .collect(),
                radius: marker_size,
            });
        }
        Ok(chart)
    }

    /// One line per simulated path plus a reference line at the starting price.
    pub fn paths_chart(paths: &[Vec<f64>], starting_price: f64) -> Result<LineChart, ChartError> {
        let timesteps = paths.first().map(Vec::len).unwrap_or(0);
        if timesteps == 0 {
            return Err(ChartError::EmptySeries);
        }
        if let Some(bad) = paths.iter().position(|p| p.len() != timesteps) {
            return Err(ChartError::RaggedPaths {
                index: bad,
                expected: timesteps,
                found: paths[bad].len(),
            });
        }

        let mut chart = LineChart::new("Paths by Monte Carlo Simulations", "Time", "Stock Price");
        chart.lines = paths
            .iter()
            .enumerate()
            .map(|(i, path)| Line {
                points: Self::indexed(path),
                color: LineColor::Palette(i),
            })
            .collect();
        chart.lines.push(Line {
            points: vec![(0.0, starting_price), ((timesteps - 1) as f64, starting_price)],
            color: LineColor::Reference,
        });
        Ok(chart)
    }

    /// Histogram of final simulated prices.
    pub fn final_dist_chart(values: &[f64], bins: usize) -> Result<HistogramChart, ChartError> {
        if values.is_empty() {
            return Err(ChartError::EmptySeries);
        }

        Ok(HistogramChart {
            title: "Distribution of final Stock Price".to_string(),
            x_label: "Price".to_string(),
            y_label: "No. of occurrences".to_string(),
            bins: Self::histogram_bins(values, bins),
        })
    }

    /// Expected (running mean) and actual returns against number of simulations.
    pub fn returns_charts(returns: &[f64]) -> Result<[LineChart; 2], ChartError> {
        if returns.is_empty() {
            return Err(ChartError::EmptySeries);
        }

        let mut expected = LineChart::new(
            "Expected return vs no. of simulations",
            "No. of Simulations",
            "Expected Return",
        );
        expected.lines.push(Line {
            points: Self::indexed(&StatsCalculator::running_mean(returns)),
            color: LineColor::Palette(0),
        });

        let mut actual = LineChart::new(
            "Actual returns vs no. of simulations",
            "No. of Simulations",
            "Returns",
        );
        actual.lines.push(Line {
            points: Self::indexed(returns),
            color: LineColor::Palette(1),
        });

        Ok([expected, actual])
    }

    /// Equal-width bins over `[min, max]`; the maximum lands in the last bin.
    /// Non-finite values are skipped.
    pub fn histogram_bins(values: &[f64], bins: usize) -> Vec<HistogramBin> {
        let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        if finite.is_empty() || bins == 0 {
            return Vec::new();
        }

        let (mut min, mut max) = finite
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        if min == max {
            min -= 0.5;
            max += 0.5;
        }

        let width = (max - min) / bins as f64;
        let mut counts = vec![0usize; bins];
        for v in finite {
            let idx = (((v - min) / width) as usize).min(bins - 1);
            counts[idx] += 1;
        }

        counts
            .into_iter()
            .enumerate()
            .map(|(i, count)| HistogramBin {
                start: min + i as f64 * width,
                end: min + (i + 1) as f64 * width,
                count,
            })
            .collect()
    }

    /// Axis bounds covering all finite values, padded by `pad` of the span.
    pub fn axis_range(values: impl Iterator<Item = f64>, pad: f64) -> (f64, f64) {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for v in values.filter(|v| v.is_finite()) {
            min = min.min(v);
            max = max.max(v);
        }
        if min.is_infinite() {
            return (0.0, 1.0);
        }
        if min == max {
            return (min - 1.0, max + 1.0);
        }
        let span = (max - min) * pad;
        (min - span, max + span)
    }

    fn indexed(values: &[f64]) -> Vec<(f64, f64)> {
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| (i as f64, v))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_histogram_counts_every_value() {
        let values: Vec<f64> = (0..1000).map(|i| (i as f64).sin() * 50.0).collect();
        let bins = ChartPlotter::histogram_bins(&values, 100);
        assert_eq!(bins.len(), 100);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 1000);
        assert!(bins.windows(2).all(|w| (w[0].end - w[1].start).abs() < 1e-9));
    }

    #[test]
    fn test_histogram_max_in_last_bin() {
        let bins = ChartPlotter::histogram_bins(&[0.0, 1.0, 2.0, 4.0], 4);
        let counts: Vec<usize> = bins.iter().map(|b| b.count).collect();
        assert_eq!(counts, vec![1, 1, 1, 1]);
        assert_eq!(bins[0].start, 0.0);
        assert_eq!(bins[3].end, 4.0);
    }

    #[test]
    fn test_histogram_constant_values() {
        let bins = ChartPlotter::histogram_bins(&[3.0, 3.0, f64::NAN], 5);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 2);
        assert!(bins[0].start < 3.0 && bins[4].end > 3.0);
    }

    #[test]
    fn test_anomaly_chart_marks_rows() {
        let table = ColumnTable::from_columns([
            ("value", vec![1.0, 5.0, 2.0]),
            ("time", vec![0.0, 1.0, 2.0]),
        ])
        .unwrap();
        let chart = ChartPlotter::anomaly_chart(&table, &[1, 7], 15).unwrap();
        assert!(chart.title.is_empty());
        let markers = chart.markers.unwrap();
        assert_eq!(markers.points, vec![(1.0, 5.0)]);
        assert_eq!(markers.radius, 15);
    }

    #[test]
    fn test_anomaly_chart_requires_columns() {
        let table = ColumnTable::from_columns([("value", vec![1.0])]).unwrap();
        assert!(matches!(
            ChartPlotter::anomaly_chart(&table, &[], 15),
            Err(ChartError::MissingColumn(name)) if name == "time"
        ));
    }

    #[test]
    fn test_paths_chart_adds_reference_line() {
        let paths = vec![vec![100.0, 101.0, 99.0], vec![100.0, 98.0, 97.0]];
        let chart = ChartPlotter::paths_chart(&paths, 100.0).unwrap();
        assert_eq!(chart.title, "Paths by Monte Carlo Simulations");
        assert_eq!(chart.lines.len(), 3);
        let reference = chart.lines.last().unwrap();
        assert_eq!(reference.color, LineColor::Reference);
        assert_eq!(reference.points, vec![(0.0, 100.0), (2.0, 100.0)]);
    }

    #[test]
    fn test_paths_chart_rejects_ragged_input() {
        let paths = vec![vec![1.0, 2.0], vec![1.0]];
        assert!(matches!(
            ChartPlotter::paths_chart(&paths, 1.0),
            Err(ChartError::RaggedPaths { index: 1, expected: 2, found: 1 })
        ));
        assert!(matches!(
            ChartPlotter::paths_chart(&[], 1.0),
            Err(ChartError::EmptySeries)
        ));
    }

    #[test]
    fn test_returns_charts_use_running_mean() {
        let [expected, actual] = ChartPlotter::returns_charts(&[0.1, 0.3, -0.1]).unwrap();
        let means: Vec<f64> = expected.lines[0].points.iter().map(|p| p.1).collect();
        assert!((means[1] - 0.2).abs() < 1e-12);
        assert!((means[2] - 0.1).abs() < 1e-12);
        assert_eq!(actual.lines[0].points.len(), 3);
    }

    #[test]
    fn test_axis_range_padding() {
        assert_eq!(ChartPlotter::axis_range([0.0, 10.0].into_iter(), 0.1), (-1.0, 11.0));
        assert_eq!(ChartPlotter::axis_range([2.0].into_iter(), 0.1), (1.0, 3.0));
        assert_eq!(ChartPlotter::axis_range(std::iter::empty(), 0.1), (0.0, 1.0));
    }
}

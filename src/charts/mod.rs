//! Charts module - simulation chart descriptions and PNG rendering

mod plotter;
mod renderer;

use std::path::PathBuf;
use thiserror::Error;

pub use plotter::{
    ChartPlotter, HistogramBin, HistogramChart, Line, LineChart, LineColor, Markers,
};
pub use renderer::ChartRenderer;

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("No data to plot")]
    EmptySeries,
    #[error("Path {index} has {found} steps, expected {expected}")]
    RaggedPaths {
        index: usize,
        expected: usize,
        found: usize,
    },
    #[error("Missing column '{0}'")]
    MissingColumn(String),
    #[error("Failed to render {path}: {message}")]
    Render { path: PathBuf, message: String },
}

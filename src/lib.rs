//! MC Series - helpers for Monte Carlo stock-price simulation exercises
//!
//! Loads time-series CSV files into column tables, synthesizes random-walk
//! test data with injected outliers, and renders simulation charts.

pub mod charts;
pub mod config;
pub mod data;
pub mod logging;
pub mod stats;

pub use charts::{ChartError, ChartRenderer};
pub use config::{ChartConfig, Config, ConfigError, GeneratorConfig};
pub use data::{
    ColumnTable, DataLoader, Destination, GeneratedFile, GeneratorError, LoaderError,
    SeriesGenerator, SyntheticSeries,
};
pub use stats::{SeriesStats, StatsCalculator};

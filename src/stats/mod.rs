//! Stats module - descriptive statistics for simulated series

mod calculator;

pub use calculator::{SeriesStats, StatsCalculator};

//! Synthetic Series Generator Module
//! Builds a random-walk test series with injected outliers and writes it to CSV.

use crate::charts::ChartRenderer;
use crate::config::{ChartConfig, ConfigError, GeneratorConfig};
use crate::data::ColumnTable;
use crate::stats::StatsCalculator;
use chrono::Utc;
use polars::prelude::*;
use rand::seq::index;
use rand::Rng;
use rand_distr::StandardNormal;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use tracing::{error, info, warn};

#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("Invalid destination '{0}', expected one of [Local, Remote]")]
    InvalidDestination(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to write CSV: {0}")]
    Csv(#[from] PolarsError),
}

/// Where the generated file is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    /// The configured local directory (working directory by default)
    Local,
    /// The configured mounted storage directory
    Remote,
}

impl FromStr for Destination {
    type Err = GeneratorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Local" => Ok(Destination::Local),
            "Remote" | "Colab" => Ok(Destination::Remote),
            other => Err(GeneratorError::InvalidDestination(other.to_string())),
        }
    }
}

impl Destination {
    pub fn directory<'a>(&self, config: &'a GeneratorConfig) -> &'a Path {
        match self {
            Destination::Local => &config.local_dir,
            Destination::Remote => &config.remote_dir,
        }
    }
}

/// Raw random walk plus the positions that received an outlier shock.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntheticSeries {
    pub raw: Vec<f64>,
    /// Perturbed positions, in selection order
    pub outliers: Vec<usize>,
}

impl SyntheticSeries {
    /// Values truncated toward negative infinity at two decimals.
    pub fn values(&self) -> Vec<f64> {
        self.raw.iter().map(|&v| truncate_cents(v)).collect()
    }

    /// `value` and `time` columns, `time` being the row index.
    pub fn to_table(&self) -> ColumnTable {
        let mut table = ColumnTable::default();
        table.insert("value".to_string(), self.values());
        table.insert(
            "time".to_string(),
            (0..self.raw.len()).map(|t| t as f64).collect(),
        );
        table
    }

    fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        let times: Vec<i64> = (0..self.raw.len() as i64).collect();
        DataFrame::new(vec![
            Column::new("value".into(), self.values()),
            Column::new("time".into(), times),
        ])
    }
}

/// `floor(value * 100) / 100`
pub fn truncate_cents(value: f64) -> f64 {
    (value * 100.0).floor() / 100.0
}

/// Result of a successful `generate` call.
#[derive(Debug, Clone)]
pub struct GeneratedFile {
    /// Bare file name, e.g. `testfile1700000000.csv`
    pub file_name: String,
    pub path: PathBuf,
    pub table: ColumnTable,
    pub outliers: Vec<usize>,
}

/// Generates random-walk test datasets.
pub struct SeriesGenerator {
    config: GeneratorConfig,
    charts: ChartConfig,
}

impl Default for SeriesGenerator {
    fn default() -> Self {
        Self::new(GeneratorConfig::default())
    }
}

impl SeriesGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            config,
            charts: ChartConfig::default(),
        }
    }

    pub fn with_chart_config(mut self, charts: ChartConfig) -> Self {
        self.charts = charts;
        self
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Build the series without touching the filesystem.
    ///
    /// Draw order: walk increments, outlier positions, outlier shocks.
    pub fn synthesize<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
    ) -> Result<SyntheticSeries, GeneratorError> {
        self.config.validate()?;

        let steps = self.config.steps;
        let mut raw = Vec::with_capacity(steps + 1);
        raw.push(self.config.seed_value);
        for i in 0..steps {
            let step: f64 = rng.sample(StandardNormal);
            raw.push(raw[i] + step);
        }

        // Positions 1..=steps-1, distinct
        let outliers: Vec<usize> = index::sample(rng, steps - 1, self.config.outlier_count)
            .into_iter()
            .map(|i| i + 1)
            .collect();
        for &pos in &outliers {
            let shock: f64 = rng.sample(StandardNormal);
            raw[pos] += self.config.outlier_scale * shock;
        }

        Ok(SyntheticSeries { raw, outliers })
    }

    /// Generate a dataset and write it to the destination named by `mode`.
    ///
    /// An unknown mode is logged and returned as `InvalidDestination`; nothing is written.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        mode: &str,
        rng: &mut R,
    ) -> Result<GeneratedFile, GeneratorError> {
        let destination = mode.parse::<Destination>().inspect_err(|e| error!("{e}"))?;
        self.generate_to(destination, rng)
    }

    pub fn generate_to<R: Rng + ?Sized>(
        &self,
        destination: Destination,
        rng: &mut R,
    ) -> Result<GeneratedFile, GeneratorError> {
        let series = self.synthesize(rng)?;
        let table = series.to_table();

        let stats = StatsCalculator::summarize(&series.raw);
        info!(
            "generated {} points, {} outliers (mean {:.3}, std {:.3}, min {:.3}, max {:.3})",
            stats.count,
            series.outliers.len(),
            stats.mean,
            stats.std,
            stats.min,
            stats.max
        );

        // One timestamp for both the written and the returned name
        let timestamp = Utc::now().timestamp();
        let stem = format!("{}{}", self.config.file_prefix, timestamp);
        let file_name = format!("{stem}.csv");
        let dir = destination.directory(&self.config);
        let path = dir.join(&file_name);

        let mut df = series.to_dataframe()?;
        let mut file = File::create(&path).map_err(|source| GeneratorError::Io {
            path: path.clone(),
            source,
        })?;
        CsvWriter::new(&mut file)
            .include_header(true)
            .with_separator(b',')
            .finish(&mut df)?;
        info!("wrote {} rows to {}", df.height(), path.display());

        if self.config.render_preview {
            let preview = dir.join(format!("{stem}.png"));
            let renderer = ChartRenderer::new(self.charts.clone());
            if let Err(e) = renderer.plot_series(&series.values(), &series.outliers, &preview) {
                warn!("preview chart skipped: {e}");
            }
        }

        Ok(GeneratedFile {
            file_name,
            path,
            table,
            outliers: series.outliers,
        })
    }
}

//! Configuration Module
//! Generator and chart settings, deserializable from JSON.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Top-level settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub generator: GeneratorConfig,
    pub charts: ChartConfig,
}

/// Settings for the synthetic series generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// First value of the random walk.
    pub seed_value: f64,
    /// Number of random steps appended after the seed value.
    pub steps: usize,
    /// Number of distinct positions perturbed with a large shock.
    pub outlier_count: usize,
    /// Multiplier applied to the standard-normal outlier shock.
    pub outlier_scale: f64,
    /// Directory used for `Destination::Local`.
    pub local_dir: PathBuf,
    /// Directory used for `Destination::Remote`.
    pub remote_dir: PathBuf,
    /// File name prefix, followed by the Unix timestamp.
    pub file_prefix: String,
    /// Render a PNG preview of the generated series next to the CSV.
    pub render_preview: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed_value: 10.0,
            steps: 10_000,
            outlier_count: 20,
            outlier_scale: 70.0,
            local_dir: PathBuf::from("."),
            remote_dir: PathBuf::from("/content/gdrive/My Drive/Coding Challenge"),
            file_prefix: "testfile".to_string(),
            render_preview: true,
        }
    }
}

/// Settings shared by all rendered charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub width: u32,
    pub height: u32,
    pub histogram_bins: usize,
    /// Radius of anomaly markers, in pixels.
    pub marker_size: u32,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 2000,
            height: 1000,
            histogram_bins: 100,
            marker_size: 15,
        }
    }
}

impl Config {
    /// Load settings from a JSON file. Missing keys fall back to defaults.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.generator.validate()?;
        self.charts.validate()
    }
}

impl GeneratorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.steps < 2 {
            return Err(ConfigError::Invalid(format!(
                "steps must be at least 2, got {}",
                self.steps
            )));
        }
        // Outliers are drawn from [1, steps - 1].
        if self.outlier_count > self.steps - 1 {
            return Err(ConfigError::Invalid(format!(
                "outlier_count {} exceeds the {} available positions",
                self.outlier_count,
                self.steps - 1
            )));
        }
        Ok(())
    }
}

impl ChartConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Invalid("chart dimensions must be positive".into()));
        }
        if self.histogram_bins == 0 {
            return Err(ConfigError::Invalid("histogram_bins must be positive".into()));
        }
        Ok(())
    }
}

//! Data module - CSV loading and synthetic series generation

mod generator;
mod loader;
mod table;

pub use generator::{
    truncate_cents, Destination, GeneratedFile, GeneratorError, SeriesGenerator, SyntheticSeries,
};
pub use loader::{DataLoader, LoaderError};
pub use table::{Column, ColumnTable};

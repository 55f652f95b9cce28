//! CSV Data Loader Module
//! Reads a header-first, comma-separated numeric file into a `ColumnTable`.

use crate::data::ColumnTable;
use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::io::Read;
use std::num::ParseFloatError;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to read CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("Line {line}, column '{column}': cannot parse '{value}' as a number")]
    Parse {
        line: usize,
        column: String,
        value: String,
        #[source]
        source: ParseFloatError,
    },
    #[error("Line {line}: missing field for column '{column}'")]
    MissingField { line: usize, column: String },
    #[error("File has no header line")]
    EmptyFile,
}

/// Loads numeric CSV files into column tables.
pub struct DataLoader;

impl DataLoader {
    /// Load a CSV file, keeping at most `max_rows` data rows.
    pub fn load_csv<P: AsRef<Path>>(
        path: P,
        max_rows: Option<usize>,
    ) -> Result<ColumnTable, LoaderError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| LoaderError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let table = Self::read_table(file, max_rows)?;
        debug!(
            "loaded {}: {} columns x {} rows",
            path.display(),
            table.column_count(),
            table.row_count()
        );
        Ok(table)
    }

    /// Parse CSV text already in memory.
    pub fn parse_csv(text: &str, max_rows: Option<usize>) -> Result<ColumnTable, LoaderError> {
        Self::read_table(text.as_bytes(), max_rows)
    }

    /// The first record names the columns (a UTF-8 BOM is dropped); blank lines
    /// are skipped and `max_rows` counts data rows only. Extra trailing fields
    /// are ignored.
    fn read_table<R: Read>(
        source: R,
        max_rows: Option<usize>,
    ) -> Result<ColumnTable, LoaderError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(source);

        let names: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        if names.is_empty() {
            return Err(LoaderError::EmptyFile);
        }

        let mut values: Vec<Vec<f64>> = vec![Vec::new(); names.len()];
        for record in reader.records().take(max_rows.unwrap_or(usize::MAX)) {
            let record = record?;
            let line = record.position().map_or(0, |p| p.line() as usize);

            for (column, name) in names.iter().enumerate() {
                let raw = record.get(column).ok_or_else(|| LoaderError::MissingField {
                    line,
                    column: name.clone(),
                })?;
                let value = raw.parse::<f64>().map_err(|source| LoaderError::Parse {
                    line,
                    column: name.clone(),
                    value: raw.to_string(),
                    source,
                })?;
                values[column].push(value);
            }
        }

        let mut table = ColumnTable::default();
        for (name, column) in names.into_iter().zip(values) {
            table.insert(name, column);
        }
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = "value,time\n10.5,0\n11.25,1\n9.75,2\n";

    #[test]
    fn test_reads_all_rows_with_trailing_newline() {
        let table = DataLoader::parse_csv(SAMPLE, None).unwrap();
        assert_eq!(table.column_names(), vec!["value", "time"]);
        assert_eq!(table.column("value"), Some(&[10.5, 11.25, 9.75][..]));
        assert_eq!(table.column("time"), Some(&[0.0, 1.0, 2.0][..]));
    }

    #[test]
    fn test_last_row_kept_without_trailing_newline() {
        let table = DataLoader::parse_csv("value,time\n1,0\n2,1", None).unwrap();
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column("value"), Some(&[1.0, 2.0][..]));
    }

    #[test]
    fn test_max_rows_counts_data_rows() {
        assert_eq!(DataLoader::parse_csv(SAMPLE, Some(2)).unwrap().row_count(), 2);
        assert_eq!(DataLoader::parse_csv(SAMPLE, Some(10)).unwrap().row_count(), 3);

        let empty = DataLoader::parse_csv(SAMPLE, Some(0)).unwrap();
        assert_eq!(empty.column_names(), vec!["value", "time"]);
        assert!(empty.is_empty());
    }

    #[test]
    fn test_crlf_and_whitespace() {
        let table = DataLoader::parse_csv("a, b\r\n 1.5 ,2\r\n\r\n", None).unwrap();
        assert_eq!(table.column_names(), vec!["a", "b"]);
        assert_eq!(table.column("a"), Some(&[1.5][..]));
        assert_eq!(table.column("b"), Some(&[2.0][..]));
    }

    #[test]
    fn test_byte_order_mark_stripped_from_header() {
        let table = DataLoader::parse_csv("\u{feff}value,time\n1,0\n", None).unwrap();
        assert_eq!(table.column_names(), vec!["value", "time"]);
        assert_eq!(table.column("value"), Some(&[1.0][..]));
    }

    #[test]
    fn test_non_numeric_field_fails_whole_load() {
        let err = DataLoader::parse_csv("value,time\n1,0\nabc,1\n", None).unwrap_err();
        match err {
            LoaderError::Parse {
                line,
                column,
                value,
                ..
            } => {
                assert_eq!(line, 3);
                assert_eq!(column, "value");
                assert_eq!(value, "abc");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_short_row_reports_missing_field() {
        let err = DataLoader::parse_csv("a,b\n1\n", None).unwrap_err();
        assert!(matches!(err, LoaderError::MissingField { line: 2, .. }));
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(
            DataLoader::parse_csv("", None),
            Err(LoaderError::EmptyFile)
        ));
        assert!(matches!(
            DataLoader::parse_csv("\n\n", None),
            Err(LoaderError::EmptyFile)
        ));
    }

    #[test]
    fn test_load_csv_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let table = DataLoader::load_csv(file.path(), Some(1)).unwrap();
        assert_eq!(table.row_count(), 1);
        assert_eq!(table.column("value"), Some(&[10.5][..]));
    }

    #[test]
    fn test_file_not_found() {
        let result = DataLoader::load_csv("nonexistent.csv", None);
        assert!(matches!(result, Err(LoaderError::Io { .. })));
    }
}

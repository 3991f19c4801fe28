// Dataset Module
//
// In-memory tabular data a query runs against: an ordered header of unique
// column names and rows of raw text values aligned to it. Values are never
// typed here; numeric interpretation happens at comparison time.

pub mod loader;

use std::collections::HashSet;
use std::path::PathBuf;

use linked_hash_map::LinkedHashMap;
use thiserror::Error;

pub use self::loader::{load_file, parse_delimited, LoaderOptions};

/// Errors raised while building or loading a dataset
#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Dataset has no header line")]
    Empty,
    #[error("Duplicate column in header: {0}")]
    DuplicateColumn(String),
    #[error("Empty column name at position {0} in header")]
    EmptyColumnName(usize),
    #[error("Row at line {line} has {found} values, header has {expected}")]
    RaggedRow {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("Unterminated quoted field at line {line}")]
    UnterminatedQuote { line: usize },
}

/// One row: column name -> raw value, in header order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    values: LinkedHashMap<String, String>,
}

impl Row {
    /// Build a row by pairing header names with values
    pub fn from_values(header: &[String], values: Vec<String>) -> Self {
        let values = header.iter().cloned().zip(values).collect();
        Row { values }
    }

    /// Get the raw value of a column
    pub fn get(&self, column: &str) -> Option<&str> {
        self.values.get(column).map(String::as_str)
    }

    /// Column names in header order
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// (column, value) pairs in header order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Header plus ordered rows. Read-only once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    header: Vec<String>,
    rows: Vec<Row>,
}

impl Dataset {
    /// Build a dataset from a header and records aligned to it.
    ///
    /// Header names must be unique and non-empty, and every record must have
    /// exactly one value per header column.
    pub fn new(header: Vec<String>, records: Vec<Vec<String>>) -> Result<Self, DatasetError> {
        if header.is_empty() {
            return Err(DatasetError::Empty);
        }

        let mut seen = HashSet::new();
        for (i, name) in header.iter().enumerate() {
            if name.is_empty() {
                return Err(DatasetError::EmptyColumnName(i + 1));
            }
            if !seen.insert(name.as_str()) {
                return Err(DatasetError::DuplicateColumn(name.clone()));
            }
        }

        let mut rows = Vec::with_capacity(records.len());
        for (i, record) in records.into_iter().enumerate() {
            if record.len() != header.len() {
                return Err(DatasetError::RaggedRow {
                    // header is line 1
                    line: i + 2,
                    expected: header.len(),
                    found: record.len(),
                });
            }
            rows.push(Row::from_values(&header, record));
        }

        Ok(Dataset { header, rows })
    }

    /// Column names in source order
    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.header.iter().any(|c| c == column)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

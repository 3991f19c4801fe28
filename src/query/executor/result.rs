// Query Result Implementation
//
// This module defines the result types and the error taxonomy for query
// execution.

use serde::Serialize;
use thiserror::Error;

use crate::query::parser::{LexError, SyntaxError};

/// A column reference or limit that is grammatical but invalid for the data
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SemanticError {
    /// Column not present in the dataset header
    #[error("Column \"{column}\" not found. Available columns: {}", .available.join(", "))]
    UnknownColumn { column: String, available: Vec<String> },
    /// LIMIT below zero
    #[error("LIMIT must not be negative, got {0}")]
    NegativeLimit(i64),
}

/// Represents a query error. Every kind aborts the query; no partial result
/// is produced.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QueryError {
    /// Unrecognized character or malformed literal
    #[error("Lexical error: {0}")]
    Lexical(#[from] LexError),
    /// Token sequence does not match the grammar
    #[error("Syntax error: {0}")]
    Syntax(#[from] SyntaxError),
    /// Unknown column or invalid LIMIT
    #[error("Semantic error: {0}")]
    Semantic(#[from] SemanticError),
}

/// Result type for query operations
pub type QueryResult<T> = Result<T, QueryError>;

/// One output row, values aligned with `QueryResultSet::columns`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResultRow {
    values: Vec<String>,
}

impl ResultRow {
    pub fn new(values: Vec<String>) -> Self {
        ResultRow { values }
    }

    /// Values in projection order
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Value at a projection position
    pub fn get(&self, index: usize) -> Option<&str> {
        self.values.get(index).map(String::as_str)
    }
}

/// Query resultset representation. Column names may repeat when the
/// projection names a column more than once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryResultSet {
    /// Column names in the resultset
    columns: Vec<String>,
    /// Rows of data
    rows: Vec<ResultRow>,
}

impl QueryResultSet {
    /// Create a new empty resultset with column names
    pub fn new(columns: Vec<String>) -> Self {
        QueryResultSet {
            columns,
            rows: Vec::new(),
        }
    }

    /// Add a row to the resultset
    pub fn add_row(&mut self, row: ResultRow) {
        debug_assert_eq!(row.values.len(), self.columns.len());
        self.rows.push(row);
    }

    /// Get the columns in the resultset
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Get the rows in the resultset
    pub fn rows(&self) -> &[ResultRow] {
        &self.rows
    }

    /// Get the number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// All values of the first column with this name, top to bottom
    pub fn column_values(&self, column: &str) -> Option<Vec<&str>> {
        let index = self.columns.iter().position(|c| c == column)?;
        Some(self.rows.iter().filter_map(|row| row.get(index)).collect())
    }

    /// Format the resultset as an aligned text table followed by a row count
    pub fn to_string_table(&self) -> String {
        // Minimum width of 3 characters per column
        let mut widths: Vec<usize> = self.columns.iter().map(|c| c.chars().count().max(3)).collect();
        for row in &self.rows {
            for (width, value) in widths.iter_mut().zip(row.values()) {
                *width = (*width).max(value.chars().count());
            }
        }

        let mut table = String::new();

        table.push('|');
        for (header, width) in self.columns.iter().zip(&widths) {
            table.push_str(&format!(" {:<width$} |", header, width = width));
        }
        table.push('\n');

        table.push('+');
        for width in &widths {
            table.push_str(&format!("{:-<width$}+", "", width = width + 2));
        }
        table.push('\n');

        for row in &self.rows {
            table.push('|');
            for (value, width) in row.values().iter().zip(&widths) {
                table.push_str(&format!(" {:<width$} |", value, width = width));
            }
            table.push('\n');
        }

        let noun = if self.rows.len() == 1 { "row" } else { "rows" };
        table.push_str(&format!("({} {})", self.rows.len(), noun));
        table
    }
}

// Query Execution Engine Implementation
//
// This module runs a parsed query against a dataset. The pipeline is
//
//   validate -> scan -> filter -> sort -> limit -> project
//
// Sorting and limiting happen on source rows, before projection, so an
// ORDER BY column does not have to be selected. The observable result is the
// same as filtering, projecting, then sorting and truncating.

use std::path::{Path, PathBuf};

use log::debug;
use thiserror::Error;

use crate::dataset::{load_file, Dataset, DatasetError, LoaderOptions};
use crate::query::executor::operators::project::{output_columns, ProjectOperator};
use crate::query::executor::operators::{create_filter, create_limit, create_sort, create_table_scan};
use crate::query::executor::result::{QueryResult, QueryResultSet, SemanticError};
use crate::query::executor::validation::validate_query;
use crate::query::parser::ast::Query;
use crate::query::parser::Parser;

/// Parse query text into an AST
pub fn parse(text: &str) -> QueryResult<Query> {
    let mut parser = Parser::new(text)?;
    Ok(parser.parse_query()?)
}

/// Execute a parsed query against a dataset.
///
/// The dataset is only read. Either the full result is returned or an error;
/// never a partial result.
pub fn execute(query: &Query, dataset: &Dataset) -> QueryResult<QueryResultSet> {
    validate_query(query, dataset)?;

    let mut root = create_table_scan(dataset);
    if let Some(predicate) = &query.predicate {
        root = create_filter(root, predicate);
    }
    if let Some(order) = &query.order_by {
        root = create_sort(root, order);
    }
    if let Some(limit) = query.limit {
        let limit = usize::try_from(limit).map_err(|_| SemanticError::NegativeLimit(limit))?;
        root = create_limit(root, limit);
    }

    let mut project = ProjectOperator::new(root, output_columns(&query.projection, dataset));
    let mut result = QueryResultSet::new(project.columns().to_vec());
    while let Some(row) = project.next() {
        result.add_row(row);
    }

    debug!(
        "query over {:?} scanned {} rows, returned {}",
        query.source,
        dataset.len(),
        result.row_count()
    );
    Ok(result)
}

/// Errors from running query text end to end: the query's own errors, or
/// the dataset failing to load
#[derive(Error, Debug)]
pub enum EngineError {
    #[error(transparent)]
    Query(#[from] crate::query::executor::result::QueryError),
    #[error(transparent)]
    Dataset(#[from] DatasetError),
}

/// Runs query text end to end: parse, load the FROM source, execute.
/// Holds no state between queries beyond its configuration.
#[derive(Debug, Clone, Default)]
pub struct ExecutionEngine {
    loader_options: LoaderOptions,
    data_dir: Option<PathBuf>,
}

impl ExecutionEngine {
    pub fn new(loader_options: LoaderOptions) -> Self {
        ExecutionEngine {
            loader_options,
            data_dir: None,
        }
    }

    /// Resolve relative FROM paths against this directory instead of the
    /// current working directory
    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(data_dir.into());
        self
    }

    pub fn loader_options(&self) -> &LoaderOptions {
        &self.loader_options
    }

    /// Path the FROM literal refers to
    pub fn resolve_source(&self, source: &str) -> PathBuf {
        let path = Path::new(source);
        match &self.data_dir {
            Some(dir) if path.is_relative() => dir.join(path),
            _ => path.to_path_buf(),
        }
    }

    /// Parse, load and execute one query
    pub fn execute_query(&self, text: &str) -> Result<QueryResultSet, EngineError> {
        let query = parse(text)?;
        let dataset = load_file(self.resolve_source(&query.source), &self.loader_options)?;
        Ok(execute(&query, &dataset)?)
    }
}

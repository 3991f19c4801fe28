// Query Operators Module
//
// This module defines the operators used for query execution in the
// iterator-based execution model. Operators borrow rows from the dataset;
// nothing is copied until projection builds the output rows.

pub mod scan;
pub mod filter;
pub mod sort;
pub mod limit;
pub mod project;

use crate::dataset::{Dataset, Row};
use crate::query::parser::ast::{Expression, OrderSpec};

/// The Operator trait defines the interface for all row operators. Each
/// operator pulls rows from its input and passes them on.
pub trait Operator<'a> {
    /// Get the next row from this operator, or `None` when exhausted
    fn next(&mut self) -> Option<&'a Row>;
}

/// Owned handle to an operator in a pipeline
pub type BoxedOperator<'a> = Box<dyn Operator<'a> + 'a>;

// Factory functions for creating operators
pub fn create_table_scan(dataset: &Dataset) -> BoxedOperator<'_> {
    Box::new(scan::TableScanOperator::new(dataset))
}

pub fn create_filter<'a>(input: BoxedOperator<'a>, predicate: &'a Expression) -> BoxedOperator<'a> {
    Box::new(filter::FilterOperator::new(input, predicate))
}

pub fn create_sort<'a>(input: BoxedOperator<'a>, order: &'a OrderSpec) -> BoxedOperator<'a> {
    Box::new(sort::SortOperator::new(input, order))
}

pub fn create_limit(input: BoxedOperator<'_>, limit: usize) -> BoxedOperator<'_> {
    Box::new(limit::LimitOperator::new(input, limit))
}

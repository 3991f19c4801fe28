use crate::dataset::{Dataset, Row};
use crate::query::executor::operators::Operator;

/// Yields every row of a dataset in source order
pub struct TableScanOperator<'a> {
    rows: std::slice::Iter<'a, Row>,
}

impl<'a> TableScanOperator<'a> {
    pub fn new(dataset: &'a Dataset) -> Self {
        TableScanOperator { rows: dataset.rows().iter() }
    }
}

impl<'a> Operator<'a> for TableScanOperator<'a> {
    fn next(&mut self) -> Option<&'a Row> {
        self.rows.next()
    }
}

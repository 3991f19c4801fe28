use crate::dataset::Row;
use crate::query::executor::expression_eval::evaluate_predicate;
use crate::query::executor::operators::{BoxedOperator, Operator};
use crate::query::parser::ast::Expression;

/// Passes on only the rows for which the predicate holds
pub struct FilterOperator<'a> {
    input: BoxedOperator<'a>,
    predicate: &'a Expression,
}

impl<'a> FilterOperator<'a> {
    pub fn new(input: BoxedOperator<'a>, predicate: &'a Expression) -> Self {
        FilterOperator { input, predicate }
    }
}

impl<'a> Operator<'a> for FilterOperator<'a> {
    fn next(&mut self) -> Option<&'a Row> {
        while let Some(row) = self.input.next() {
            if evaluate_predicate(self.predicate, row) {
                return Some(row);
            }
        }
        None
    }
}

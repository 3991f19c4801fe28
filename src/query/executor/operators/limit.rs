use crate::dataset::Row;
use crate::query::executor::operators::{BoxedOperator, Operator};

/// Stops after a fixed number of rows without pulling further input
pub struct LimitOperator<'a> {
    input: BoxedOperator<'a>,
    remaining: usize,
}

impl<'a> LimitOperator<'a> {
    pub fn new(input: BoxedOperator<'a>, limit: usize) -> Self {
        LimitOperator { input, remaining: limit }
    }
}

impl<'a> Operator<'a> for LimitOperator<'a> {
    fn next(&mut self) -> Option<&'a Row> {
        if self.remaining == 0 {
            return None;
        }
        let row = self.input.next()?;
        self.remaining -= 1;
        Some(row)
    }
}

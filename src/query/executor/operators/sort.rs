use crate::dataset::Row;
use crate::query::executor::operators::{BoxedOperator, Operator};
use crate::query::executor::type_conversion::compare_raw;
use crate::query::parser::ast::{OrderSpec, SortDirection};

/// Stable sort on one column. The whole input is pulled on the first call
/// to `next`.
pub struct SortOperator<'a> {
    input: BoxedOperator<'a>,
    order: &'a OrderSpec,
    output_iter: Option<std::vec::IntoIter<&'a Row>>,
}

impl<'a> SortOperator<'a> {
    pub fn new(input: BoxedOperator<'a>, order: &'a OrderSpec) -> Self {
        SortOperator {
            input,
            order,
            output_iter: None,
        }
    }

    fn sorted_input(&mut self) -> std::vec::IntoIter<&'a Row> {
        let mut all_rows = Vec::new();
        while let Some(row) = self.input.next() {
            all_rows.push(row);
        }

        let column = self.order.column.as_str();
        let direction = self.order.direction;
        // sort_by is stable: ties keep their input order in both directions
        all_rows.sort_by(|a, b| {
            let ord = compare_raw(a.get(column).unwrap_or_default(), b.get(column).unwrap_or_default());
            match direction {
                SortDirection::Asc => ord,
                SortDirection::Desc => ord.reverse(),
            }
        });

        all_rows.into_iter()
    }
}

impl<'a> Operator<'a> for SortOperator<'a> {
    fn next(&mut self) -> Option<&'a Row> {
        if self.output_iter.is_none() {
            self.output_iter = Some(self.sorted_input());
        }
        self.output_iter.as_mut()?.next()
    }
}

use crate::dataset::{Dataset, Row};
use crate::query::executor::operators::{BoxedOperator, Operator};
use crate::query::executor::result::ResultRow;
use crate::query::parser::ast::Projection;

/// Output column names for a projection over this dataset
pub fn output_columns(projection: &Projection, dataset: &Dataset) -> Vec<String> {
    match projection {
        Projection::All => dataset.header().to_vec(),
        Projection::Columns(names) => names.clone(),
    }
}

/// Terminal stage: turns borrowed source rows into owned output rows holding
/// only the projected columns
pub struct ProjectOperator<'a> {
    input: BoxedOperator<'a>,
    columns: Vec<String>,
}

impl<'a> ProjectOperator<'a> {
    pub fn new(input: BoxedOperator<'a>, columns: Vec<String>) -> Self {
        ProjectOperator { input, columns }
    }

    /// Output column names in projection order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Get the next projected row
    pub fn next(&mut self) -> Option<ResultRow> {
        let row = self.input.next()?;
        Some(self.project(row))
    }

    fn project(&self, row: &Row) -> ResultRow {
        let values = self
            .columns
            .iter()
            .map(|column| row.get(column).unwrap_or_default().to_string())
            .collect();
        ResultRow::new(values)
    }
}

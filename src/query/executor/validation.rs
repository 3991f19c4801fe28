// Query Validation
//
// Semantic checks that need the dataset header: every referenced column must
// exist and LIMIT must not be negative. Runs before any row is touched.

use crate::dataset::Dataset;
use crate::query::executor::result::SemanticError;
use crate::query::parser::ast::Query;

pub fn validate_query(query: &Query, dataset: &Dataset) -> Result<(), SemanticError> {
    // Projection, then predicate, then ORDER BY: the first unknown column wins
    for column in query.referenced_columns() {
        if !dataset.has_column(column) {
            return Err(SemanticError::UnknownColumn {
                column: column.to_string(),
                available: dataset.header().to_vec(),
            });
        }
    }

    if let Some(limit) = query.limit {
        if limit < 0 {
            return Err(SemanticError::NegativeLimit(limit));
        }
    }

    Ok(())
}

// Expression Evaluation Utility
//
// Evaluates a predicate tree against one row. Evaluation is total: a value
// that cannot be compared the way the literal asks simply fails the
// comparison.

use std::cmp::Ordering;

use crate::dataset::Row;
use crate::query::executor::type_conversion::parse_number;
use crate::query::parser::ast::{ComparisonOp, Expression, Literal, LogicalOp};

/// Evaluate a predicate in the context of a single row
pub fn evaluate_predicate(expr: &Expression, row: &Row) -> bool {
    match expr {
        Expression::Comparison { column, op, literal } => {
            evaluate_comparison(row.get(column), *op, literal)
        }
        Expression::Logical { op: LogicalOp::And, left, right } => {
            evaluate_predicate(left, row) && evaluate_predicate(right, row)
        }
        Expression::Logical { op: LogicalOp::Or, left, right } => {
            evaluate_predicate(left, row) || evaluate_predicate(right, row)
        }
    }
}

/// Compare a raw row value against a literal.
///
/// Numeric literals compare numerically against values that parse as
/// numbers; any other value fails, whatever the operator. String literals
/// compare as exact text, ordered lexicographically.
pub fn evaluate_comparison(value: Option<&str>, op: ComparisonOp, literal: &Literal) -> bool {
    // Columns are resolved before evaluation; a missing value only fails
    let Some(value) = value else {
        return false;
    };

    let ordering = match literal {
        Literal::Number(expected) => parse_number(value).and_then(|v| v.partial_cmp(expected)),
        Literal::String(expected) => Some(value.cmp(expected.as_str())),
    };

    ordering.is_some_and(|ordering| op_matches(op, ordering))
}

fn op_matches(op: ComparisonOp, ordering: Ordering) -> bool {
    match op {
        ComparisonOp::Equals => ordering == Ordering::Equal,
        ComparisonOp::NotEquals => ordering != Ordering::Equal,
        ComparisonOp::LessThan => ordering == Ordering::Less,
        ComparisonOp::LessEquals => ordering != Ordering::Greater,
        ComparisonOp::GreaterThan => ordering == Ordering::Greater,
        ComparisonOp::GreaterEquals => ordering != Ordering::Less,
    }
}

// Query Abstract Syntax Tree (AST) Implementation
//
// This module defines the AST nodes for a parsed query. Nodes are built once
// by the parser and never mutated afterwards.

use std::fmt;

use serde::Serialize;

/// A parsed `FROM ... SELECT ... [WHERE] [ORDER BY] [LIMIT]` query
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Query {
    /// Path literal from the FROM clause
    pub source: String,
    /// Columns in the SELECT clause
    pub projection: Projection,
    /// WHERE clause (optional)
    pub predicate: Option<Expression>,
    /// ORDER BY clause (optional)
    pub order_by: Option<OrderSpec>,
    /// LIMIT clause (optional). Signed so that a negative limit can be
    /// represented and rejected during validation.
    pub limit: Option<i64>,
}

/// Columns requested in the SELECT clause
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Projection {
    /// All columns (*), in header order
    All,
    /// Named columns in the order written; duplicates are kept
    Columns(Vec<String>),
}

/// Predicate tree
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Expression {
    /// `column op literal`
    Comparison {
        column: String,
        op: ComparisonOp,
        literal: Literal,
    },
    /// `left AND right` / `left OR right`
    Logical {
        op: LogicalOp,
        left: Box<Expression>,
        right: Box<Expression>,
    },
}

/// Comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ComparisonOp {
    Equals,
    NotEquals,
    LessThan,
    LessEquals,
    GreaterThan,
    GreaterEquals,
}

/// Boolean connectives. AND and OR share one precedence level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LogicalOp {
    And,
    Or,
}

/// Literal on the right-hand side of a comparison
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Literal {
    Number(f64),
    String(String),
}

/// ORDER BY specification
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderSpec {
    pub column: String,
    pub direction: SortDirection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl Query {
    /// Every column the query refers to: projection first, then predicate,
    /// then ORDER BY. Duplicates are not removed.
    pub fn referenced_columns(&self) -> Vec<&str> {
        let mut columns = Vec::new();
        if let Projection::Columns(names) = &self.projection {
            columns.extend(names.iter().map(String::as_str));
        }
        if let Some(predicate) = &self.predicate {
            predicate.collect_columns(&mut columns);
        }
        if let Some(order) = &self.order_by {
            columns.push(order.column.as_str());
        }
        columns
    }
}

impl Expression {
    fn collect_columns<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Expression::Comparison { column, .. } => out.push(column.as_str()),
            Expression::Logical { left, right, .. } => {
                left.collect_columns(out);
                right.collect_columns(out);
            }
        }
    }

    /// Number of comparison leaves in the tree
    pub fn comparison_count(&self) -> usize {
        match self {
            Expression::Comparison { .. } => 1,
            Expression::Logical { left, right, .. } => {
                left.comparison_count() + right.comparison_count()
            }
        }
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FROM \"{}\" SELECT {}", self.source, self.projection)?;
        if let Some(predicate) = &self.predicate {
            write!(f, " WHERE {}", predicate)?;
        }
        if let Some(order) = &self.order_by {
            write!(f, " ORDER BY {} {}", order.column, order.direction)?;
        }
        if let Some(limit) = self.limit {
            write!(f, " LIMIT {}", limit)?;
        }
        Ok(())
    }
}

impl fmt::Display for Projection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Projection::All => write!(f, "*"),
            Projection::Columns(names) => write!(f, "{}", names.join(", ")),
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Comparison { column, op, literal } => {
                write!(f, "{} {} {}", column, op, literal)
            }
            // Left-leaning chains print back in written order
            Expression::Logical { op, left, right } => write!(f, "{} {} {}", left, op, right),
        }
    }
}

impl fmt::Display for ComparisonOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            ComparisonOp::Equals => "=",
            ComparisonOp::NotEquals => "!=",
            ComparisonOp::LessThan => "<",
            ComparisonOp::LessEquals => "<=",
            ComparisonOp::GreaterThan => ">",
            ComparisonOp::GreaterEquals => ">=",
        };
        f.write_str(symbol)
    }
}

impl fmt::Display for LogicalOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogicalOp::And => f.write_str("AND"),
            LogicalOp::Or => f.write_str("OR"),
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Number(n) => write!(f, "{}", n),
            Literal::String(s) => write!(f, "\"{}\"", s),
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Asc => f.write_str("ASC"),
            SortDirection::Desc => f.write_str("DESC"),
        }
    }
}

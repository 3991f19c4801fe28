// Query Processing Module
//
// This module contains the query front-end (lexer, parser, AST) and the
// executor that evaluates a parsed query against a dataset.

pub mod parser;
pub mod executor;

// Export key public interfaces
pub use parser::Parser;
pub use executor::{execute, parse, ExecutionEngine, QueryError, QueryResultSet};

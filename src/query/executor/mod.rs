// Query Executor Module
//
// This module is responsible for executing parsed queries and producing
// results. It implements the iterator-based execution model for query
// processing.

pub mod engine;
pub mod expression_eval;
pub mod operators;
pub mod result;
pub mod type_conversion;
pub mod validation;

// Export key types
pub use self::engine::{execute, parse, EngineError, ExecutionEngine};
pub use self::result::{QueryError, QueryResult, QueryResultSet, ResultRow, SemanticError};
pub use self::operators::Operator;

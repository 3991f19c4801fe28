// csvquery: a miniature query compiler over delimited text files
//
//   FROM "people.csv" SELECT NAME, AGE WHERE AGE >= 18 AND CITY = "Bandung"
//   ORDER BY AGE DESC LIMIT 10
//
// Query text is lexed, parsed into an AST and evaluated against an
// in-memory dataset. `parse` and `execute` are pure; `ExecutionEngine`
// additionally loads the dataset named in the FROM clause.

pub mod dataset;
pub mod query;

// Re-export key items for convenient access
pub use dataset::{Dataset, DatasetError, LoaderOptions, Row};
pub use query::executor::{
    execute, parse, EngineError, ExecutionEngine, QueryError, QueryResult, QueryResultSet,
    ResultRow, SemanticError,
};
pub use query::parser::ast::Query;
pub use query::parser::{LexError, SyntaxError};

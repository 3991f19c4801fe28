// Query Parser Module
//
// This module is responsible for lexing query text and parsing it
// into an abstract syntax tree (AST) representation.

pub mod lexer;
pub mod ast;
pub mod parser;

// Export key types
pub use self::parser::{Parser, SyntaxError, ParseResult};
pub use self::lexer::{Lexer, LexError, Token, TokenType, Position};
pub use self::ast::{Query, Expression, Projection, Literal, OrderSpec, SortDirection};

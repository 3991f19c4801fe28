// Query Parser Implementation
//
// This module implements a recursive descent parser that converts tokens
// from the lexer into a Query AST.
//
//   Query      := "FROM" StringLit "SELECT" ColumnList
//                 ["WHERE" Predicate]
//                 ["ORDER" "BY" Identifier ["ASC"|"DESC"]]
//                 ["LIMIT" NumberLit]
//   ColumnList := "*" | Identifier {"," Identifier}
//   Predicate  := Comparison {("AND"|"OR") Comparison}
//   Comparison := Identifier CompOp (NumberLit | StringLit)

use std::iter::Peekable;
use std::vec::IntoIter;

use log::debug;
use thiserror::Error;

use super::ast::*;
use super::lexer::{tokenize, LexError, Token, TokenType};

/// Grammar violations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SyntaxError {
    /// A token was found where another construct was required
    #[error("Expected {expected}, found {found} at offset {offset}")]
    Expected {
        expected: String,
        found: String,
        offset: usize,
    },
    /// The token sequence ran out while a construct was still required
    #[error("Expected {expected}, but reached end of query")]
    UnexpectedEnd { expected: String },
}

impl SyntaxError {
    /// The construct the parser was looking for
    pub fn expected(&self) -> &str {
        match self {
            SyntaxError::Expected { expected, .. } | SyntaxError::UnexpectedEnd { expected } => {
                expected
            }
        }
    }
}

/// Result type for parsing operations
pub type ParseResult<T> = Result<T, SyntaxError>;

/// Parser for constructing a Query AST from tokens
pub struct Parser {
    tokens: Peekable<IntoIter<Token>>,
    current_token: Option<Token>,
}

impl Parser {
    /// Create a new parser by lexing a query string
    pub fn new(input: &str) -> Result<Self, LexError> {
        Ok(Self::from_tokens(tokenize(input)?))
    }

    /// Create a parser from an already lexed token sequence
    pub fn from_tokens(tokens: Vec<Token>) -> Self {
        let mut parser = Parser {
            tokens: tokens.into_iter().peekable(),
            current_token: None,
        };
        parser.next_token();
        parser
    }

    /// Advance to the next token, returning the one that was current
    fn next_token(&mut self) -> Option<Token> {
        std::mem::replace(&mut self.current_token, self.tokens.next())
    }

    /// Check if the current token is of the given type
    fn current_token_is(&self, token_type: &TokenType) -> bool {
        matches!(&self.current_token, Some(token) if token.token_type == *token_type)
    }

    /// Build the error for the current token not being `expected`
    fn error_expected(&self, expected: &str) -> SyntaxError {
        match &self.current_token {
            Some(token) => SyntaxError::Expected {
                expected: expected.to_string(),
                found: token.token_type.describe(),
                offset: token.position.offset,
            },
            None => SyntaxError::UnexpectedEnd { expected: expected.to_string() },
        }
    }

    /// Consume a keyword or punctuation token of exactly this type
    fn expect_token(&mut self, expected: TokenType) -> ParseResult<Token> {
        if self.current_token_is(&expected) {
            if let Some(token) = self.next_token() {
                return Ok(token);
            }
        }
        let name = expected
            .keyword_text()
            .map(str::to_string)
            .unwrap_or_else(|| expected.describe());
        Err(self.error_expected(&name))
    }

    /// Consume an identifier and return its name
    fn expect_identifier(&mut self, what: &str) -> ParseResult<String> {
        if let Some(Token { token_type: TokenType::Identifier(name), .. }) = &self.current_token {
            let name = name.clone();
            self.next_token();
            return Ok(name);
        }
        Err(self.error_expected(what))
    }

    /// Parse a complete query; leftover tokens are an error
    pub fn parse_query(&mut self) -> ParseResult<Query> {
        let source = self.parse_from()?;
        let projection = self.parse_select()?;

        let predicate = if self.current_token_is(&TokenType::Where) {
            self.next_token();
            Some(self.parse_predicate()?)
        } else {
            None
        };

        let order_by = if self.current_token_is(&TokenType::Order) {
            self.next_token();
            Some(self.parse_order_by()?)
        } else {
            None
        };

        let limit = if self.current_token_is(&TokenType::Limit) {
            self.next_token();
            Some(self.parse_limit()?)
        } else {
            None
        };

        if self.current_token.is_some() {
            return Err(self.error_expected("end of query"));
        }

        let query = Query { source, projection, predicate, order_by, limit };
        debug!(
            "parsed query over {:?}: {} comparison(s), order_by={}, limit={:?}",
            query.source,
            query.predicate.as_ref().map_or(0, Expression::comparison_count),
            query.order_by.is_some(),
            query.limit
        );
        Ok(query)
    }

    /// FROM "path"
    fn parse_from(&mut self) -> ParseResult<String> {
        self.expect_token(TokenType::From)?;
        match &self.current_token {
            Some(Token { token_type: TokenType::String(path), .. }) => {
                let path = path.clone();
                self.next_token();
                Ok(path)
            }
            _ => Err(self.error_expected("string literal naming the source file")),
        }
    }

    /// SELECT * | SELECT col {, col}
    fn parse_select(&mut self) -> ParseResult<Projection> {
        self.expect_token(TokenType::Select)?;

        if self.current_token_is(&TokenType::Star) {
            self.next_token();
            return Ok(Projection::All);
        }

        let mut columns = vec![self.expect_identifier("column name or '*'")?];
        while self.current_token_is(&TokenType::Comma) {
            self.next_token();
            columns.push(self.expect_identifier("column name")?);
        }
        Ok(Projection::Columns(columns))
    }

    /// Comparison {(AND|OR) Comparison}, folded strictly left to right.
    /// AND does not bind tighter than OR.
    fn parse_predicate(&mut self) -> ParseResult<Expression> {
        let mut left = self.parse_comparison()?;

        while let Some(op) = self.current_logical_op() {
            self.next_token();
            let right = self.parse_comparison()?;
            left = Expression::Logical {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    fn current_logical_op(&self) -> Option<LogicalOp> {
        match self.current_token.as_ref().map(|t| &t.token_type) {
            Some(TokenType::And) => Some(LogicalOp::And),
            Some(TokenType::Or) => Some(LogicalOp::Or),
            _ => None,
        }
    }

    /// column op literal
    fn parse_comparison(&mut self) -> ParseResult<Expression> {
        let column = self.expect_identifier("column name")?;

        let op = self
            .current_token
            .as_ref()
            .and_then(|t| token_to_operator(&t.token_type))
            .ok_or_else(|| self.error_expected("comparison operator"))?;
        self.next_token();

        // Literal kind is not checked against the column here; that is
        // decided per row at evaluation time.
        let literal = match self.current_token.as_ref().map(|t| &t.token_type) {
            Some(TokenType::Number(n)) => Literal::Number(*n),
            Some(TokenType::String(s)) => Literal::String(s.clone()),
            _ => return Err(self.error_expected("number or string literal")),
        };
        self.next_token();

        Ok(Expression::Comparison { column, op, literal })
    }

    /// ORDER has been consumed: BY column [ASC|DESC]
    fn parse_order_by(&mut self) -> ParseResult<OrderSpec> {
        self.expect_token(TokenType::By)?;
        let column = self.expect_identifier("column name")?;

        let direction = if self.current_token_is(&TokenType::Asc) {
            self.next_token();
            SortDirection::Asc
        } else if self.current_token_is(&TokenType::Desc) {
            self.next_token();
            SortDirection::Desc
        } else {
            SortDirection::default()
        };

        Ok(OrderSpec { column, direction })
    }

    /// LIMIT has been consumed: the row count. Fractions are truncated.
    fn parse_limit(&mut self) -> ParseResult<i64> {
        match self.current_token.as_ref().map(|t| &t.token_type) {
            Some(TokenType::Number(n)) => {
                let count = n.trunc() as i64;
                self.next_token();
                Ok(count)
            }
            _ => Err(self.error_expected("number")),
        }
    }
}

fn token_to_operator(token_type: &TokenType) -> Option<ComparisonOp> {
    match token_type {
        TokenType::Equals => Some(ComparisonOp::Equals),
        TokenType::NotEqual => Some(ComparisonOp::NotEquals),
        TokenType::LessThan => Some(ComparisonOp::LessThan),
        TokenType::LessEqual => Some(ComparisonOp::LessEquals),
        TokenType::GreaterThan => Some(ComparisonOp::GreaterThan),
        TokenType::GreaterEqual => Some(ComparisonOp::GreaterEquals),
        _ => None,
    }
}

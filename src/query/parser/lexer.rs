// Query Lexer Implementation
//
// This module breaks query text into tokens. Whitespace separates tokens and
// is otherwise dropped; there is no explicit end-of-input token, the parser
// detects exhaustion when the token sequence runs out.

use std::fmt;
use std::iter::Peekable;
use std::str::Chars;

use log::trace;
use thiserror::Error;

/// Token types produced by the lexer
#[derive(Debug, PartialEq, Clone)]
pub enum TokenType {
    // Keywords
    From,
    Select,
    Where,
    Order,
    By,
    Limit,
    And,
    Or,
    Asc,
    Desc,

    // Literals
    String(String),
    Number(f64),

    // Identifiers
    Identifier(String),

    // Comparison operators
    Equals,       // =
    NotEqual,     // !=
    LessThan,     // <
    LessEqual,    // <=
    GreaterThan,  // >
    GreaterEqual, // >=

    // Punctuation
    Comma, // ,
    Star,  // *
}

impl TokenType {
    /// Human readable description used in syntax errors
    pub fn describe(&self) -> String {
        match self {
            TokenType::String(s) => format!("string \"{}\"", s),
            TokenType::Number(n) => format!("number {}", n),
            TokenType::Identifier(name) => format!("identifier {}", name),
            TokenType::Equals => "'='".to_string(),
            TokenType::NotEqual => "'!='".to_string(),
            TokenType::LessThan => "'<'".to_string(),
            TokenType::LessEqual => "'<='".to_string(),
            TokenType::GreaterThan => "'>'".to_string(),
            TokenType::GreaterEqual => "'>='".to_string(),
            TokenType::Comma => "','".to_string(),
            TokenType::Star => "'*'".to_string(),
            keyword => format!("keyword {}", keyword.keyword_text().unwrap_or_default()),
        }
    }

    /// The source spelling of a keyword token
    pub fn keyword_text(&self) -> Option<&'static str> {
        let text = match self {
            TokenType::From => "FROM",
            TokenType::Select => "SELECT",
            TokenType::Where => "WHERE",
            TokenType::Order => "ORDER",
            TokenType::By => "BY",
            TokenType::Limit => "LIMIT",
            TokenType::And => "AND",
            TokenType::Or => "OR",
            TokenType::Asc => "ASC",
            TokenType::Desc => "DESC",
            _ => return None,
        };
        Some(text)
    }
}

/// Location of a token or error in the query text.
///
/// `offset` counts characters from the start of the query (0-based);
/// `line` and `column` are 1-based for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {} (offset {})", self.line, self.column, self.offset)
    }
}

/// A Token represents a lexical unit in the query
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub token_type: TokenType,
    pub literal: String,
    pub position: Position,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}({})", self.token_type, self.literal)
    }
}

/// Lexical errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LexError {
    #[error("Unexpected character '{ch}' at {position}")]
    UnexpectedCharacter { ch: char, position: Position },
    #[error("Unterminated string literal starting at {position}")]
    UnterminatedString { position: Position },
    #[error("Malformed number '{text}' at {position}")]
    MalformedNumber { text: String, position: Position },
}

impl LexError {
    pub fn position(&self) -> Position {
        match self {
            LexError::UnexpectedCharacter { position, .. }
            | LexError::UnterminatedString { position }
            | LexError::MalformedNumber { position, .. } => *position,
        }
    }
}

/// Lexer for breaking a query string into tokens
pub struct Lexer<'a> {
    input: Peekable<Chars<'a>>,
    position: Position,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer over a query string
    pub fn new(input: &'a str) -> Self {
        Lexer {
            input: input.chars().peekable(),
            position: Position { offset: 0, line: 1, column: 1 },
        }
    }

    /// Read the next character from the input
    fn read_char(&mut self) -> Option<char> {
        let ch = self.input.next()?;
        self.position.offset += 1;
        if ch == '\n' {
            self.position.line += 1;
            self.position.column = 1;
        } else {
            self.position.column += 1;
        }
        Some(ch)
    }

    /// Peek at the next character without advancing
    fn peek_char(&mut self) -> Option<char> {
        self.input.peek().copied()
    }

    /// Consume the next character if it equals `expected`
    fn next_is(&mut self, expected: char) -> bool {
        if self.peek_char() == Some(expected) {
            self.read_char();
            true
        } else {
            false
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(' ' | '\t' | '\n' | '\r') = self.peek_char() {
            self.read_char();
        }
    }

    /// Read an identifier or keyword; `first` has already been consumed
    fn read_identifier(&mut self, first: char) -> String {
        let mut identifier = String::from(first);
        while let Some(ch) = self.peek_char() {
            if is_identifier_part(ch) {
                identifier.push(ch);
                self.read_char();
            } else {
                break;
            }
        }
        identifier
    }

    fn read_digits(&mut self, buf: &mut String) {
        while let Some(ch) = self.peek_char() {
            if ch.is_ascii_digit() {
                buf.push(ch);
                self.read_char();
            } else {
                break;
            }
        }
    }

    /// Read a number with at most one decimal point; `first` has already been consumed
    fn read_number(&mut self, first: char, start: Position) -> Result<(f64, String), LexError> {
        let mut number = String::from(first);
        self.read_digits(&mut number);

        let mut malformed = false;
        if self.next_is('.') {
            number.push('.');
            let before = number.len();
            self.read_digits(&mut number);
            malformed = number.len() == before;
        }

        // Digits running straight into letters or another dot ("12ab", "1.2.3")
        while let Some(ch) = self.peek_char() {
            if is_identifier_part(ch) || ch == '.' {
                malformed = true;
                number.push(ch);
                self.read_char();
            } else {
                break;
            }
        }

        if malformed {
            return Err(LexError::MalformedNumber { text: number, position: start });
        }

        match number.parse::<f64>() {
            Ok(value) => Ok((value, number)),
            Err(_) => Err(LexError::MalformedNumber { text: number, position: start }),
        }
    }

    /// Read a double-quoted string literal; the opening quote has already been consumed.
    /// No escape processing is done.
    fn read_string(&mut self, start: Position) -> Result<String, LexError> {
        let mut string = String::new();
        loop {
            match self.read_char() {
                Some('"') => return Ok(string),
                Some(ch) => string.push(ch),
                None => return Err(LexError::UnterminatedString { position: start }),
            }
        }
    }

    /// Get the next token from the input, or `None` at end of input
    pub fn next_token(&mut self) -> Result<Option<Token>, LexError> {
        self.skip_whitespace();

        let start = self.position;
        let Some(ch) = self.read_char() else {
            return Ok(None);
        };

        let (token_type, literal) = match ch {
            ',' => (TokenType::Comma, ch.to_string()),
            '*' => (TokenType::Star, ch.to_string()),
            '=' => (TokenType::Equals, ch.to_string()),
            '<' => {
                if self.next_is('=') {
                    (TokenType::LessEqual, "<=".to_string())
                } else {
                    (TokenType::LessThan, ch.to_string())
                }
            }
            '>' => {
                if self.next_is('=') {
                    (TokenType::GreaterEqual, ">=".to_string())
                } else {
                    (TokenType::GreaterThan, ch.to_string())
                }
            }
            '!' if self.next_is('=') => (TokenType::NotEqual, "!=".to_string()),
            '"' => {
                let value = self.read_string(start)?;
                let literal = format!("\"{}\"", value);
                (TokenType::String(value), literal)
            }
            c if c.is_ascii_digit() => {
                let (value, literal) = self.read_number(c, start)?;
                (TokenType::Number(value), literal)
            }
            c if is_identifier_start(c) => {
                let identifier = self.read_identifier(c);
                (lookup_identifier(&identifier), identifier)
            }
            c => return Err(LexError::UnexpectedCharacter { ch: c, position: start }),
        };

        Ok(Some(Token { token_type, literal, position: start }))
    }

    /// Position just past the last character read
    pub fn position(&self) -> Position {
        self.position
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token().transpose()
    }
}

/// Lex a whole query into its token sequence
pub fn tokenize(input: &str) -> Result<Vec<Token>, LexError> {
    let tokens = Lexer::new(input).collect::<Result<Vec<_>, _>>()?;
    trace!("lexed {} tokens", tokens.len());
    Ok(tokens)
}

/// Keywords are matched case-sensitively against the whole word
fn lookup_identifier(ident: &str) -> TokenType {
    match ident {
        "FROM" => TokenType::From,
        "SELECT" => TokenType::Select,
        "WHERE" => TokenType::Where,
        "ORDER" => TokenType::Order,
        "BY" => TokenType::By,
        "LIMIT" => TokenType::Limit,
        "AND" => TokenType::And,
        "OR" => TokenType::Or,
        "ASC" => TokenType::Asc,
        "DESC" => TokenType::Desc,
        _ => TokenType::Identifier(ident.to_string()),
    }
}

fn is_identifier_start(ch: char) -> bool {
    ch.is_alphabetic() || ch == '_'
}

fn is_identifier_part(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

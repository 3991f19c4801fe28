use anyhow::{anyhow, Result};
use csvquery::query::parser::ast::{
    ComparisonOp, Expression, Literal, LogicalOp, Projection, SortDirection,
};
use csvquery::query::parser::lexer::{tokenize, TokenType};
use csvquery::{parse, LexError, QueryError, SyntaxError};

#[test]
fn test_full_query() -> Result<()> {
    let query = parse(
        "FROM \"HARGA RUMAH JAKSEL.csv\"\n\
         SELECT HARGA, LT\n\
         WHERE HARGA <= 10000000000 AND LT <= 1000\n\
         ORDER BY HARGA DESC\n\
         LIMIT 10",
    )
    .map_err(|e| anyhow!("Parse error: {}", e))?;

    assert_eq!(query.source, "HARGA RUMAH JAKSEL.csv");
    assert_eq!(
        query.projection,
        Projection::Columns(vec!["HARGA".to_string(), "LT".to_string()])
    );
    match query.predicate {
        Some(Expression::Logical { op: LogicalOp::And, left, right }) => {
            assert_eq!(
                *left,
                Expression::Comparison {
                    column: "HARGA".to_string(),
                    op: ComparisonOp::LessEquals,
                    literal: Literal::Number(10_000_000_000.0),
                }
            );
            assert!(matches!(*right, Expression::Comparison { ref column, .. } if column == "LT"));
        }
        other => panic!("Expected AND predicate, got {:?}", other),
    }
    let order = query.order_by.ok_or_else(|| anyhow!("missing ORDER BY"))?;
    assert_eq!(order.column, "HARGA");
    assert_eq!(order.direction, SortDirection::Desc);
    assert_eq!(query.limit, Some(10));
    Ok(())
}

#[test]
fn test_parse_is_deterministic() -> Result<()> {
    let text = "FROM \"a.csv\" SELECT A, B WHERE A > 1 OR B = \"x\" AND A != 3 ORDER BY B LIMIT 7";
    assert_eq!(parse(text)?, parse(text)?);
    Ok(())
}

#[test]
fn test_display_reparses_to_same_query() -> Result<()> {
    let text = "FROM \"a.csv\" SELECT * WHERE A >= 1.5 OR B < \"m\" ORDER BY A DESC LIMIT 3";
    let query = parse(text)?;
    assert_eq!(query.to_string(), text);
    assert_eq!(parse(&query.to_string())?, query);
    Ok(())
}

#[test]
fn test_mixed_and_or_chain_is_flat() -> Result<()> {
    // A AND B OR C AND D groups as (((A AND B) OR C) AND D)
    let query = parse("FROM \"a\" SELECT * WHERE A = 1 AND B = 2 OR C = 3 AND D = 4")?;
    let mut ops = Vec::new();
    let mut node = query.predicate.as_ref();
    while let Some(Expression::Logical { op, left, right }) = node {
        assert!(matches!(**right, Expression::Comparison { .. }));
        ops.push(*op);
        node = Some(left.as_ref());
    }
    ops.reverse();
    assert_eq!(ops, vec![LogicalOp::And, LogicalOp::Or, LogicalOp::And]);
    Ok(())
}

#[test]
fn test_missing_select_clause() {
    match parse("FROM \"x.csv\" WHERE AGE > 1") {
        Err(QueryError::Syntax(err)) => {
            assert_eq!(
                err,
                SyntaxError::Expected {
                    expected: "SELECT".to_string(),
                    found: "keyword WHERE".to_string(),
                    offset: 13,
                }
            );
        }
        other => panic!("Expected syntax error, got {:?}", other),
    }
}

#[test]
fn test_lowercase_keywords_are_identifiers() {
    match parse("from \"x.csv\" select *") {
        Err(QueryError::Syntax(err)) => assert_eq!(err.expected(), "FROM"),
        other => panic!("Expected syntax error, got {:?}", other),
    }
}

#[test]
fn test_not_equal_must_be_bang_equals() {
    // "<>" lexes as '<' then '>', and '>' is not a literal
    match parse("FROM \"x\" SELECT * WHERE a <> 1") {
        Err(QueryError::Syntax(err)) => assert_eq!(err.expected(), "number or string literal"),
        other => panic!("Expected syntax error, got {:?}", other),
    }
}

#[test]
fn test_lexical_errors_report_offset() {
    for (input, ch, offset) in [
        ("FROM \"x\" SELECT a; ", ';', 17),
        ("FROM \"x\" SELECT * WHERE a = 'b'", '\'', 28),
        ("FROM \"x\" SELECT * WHERE (a = 1)", '(', 24),
    ] {
        match parse(input) {
            Err(QueryError::Lexical(LexError::UnexpectedCharacter { ch: found, position })) => {
                assert_eq!(found, ch, "input {input}");
                assert_eq!(position.offset, offset, "input {input}");
            }
            other => panic!("unexpected result for {input}: {other:?}"),
        }
    }
}

#[test]
fn test_lexical_error_wins_over_syntax_error() {
    // The clause order is wrong too, but the stray character is reported
    assert!(matches!(
        parse("SELECT * FROM \"x\" #"),
        Err(QueryError::Lexical(LexError::UnexpectedCharacter { ch: '#', .. }))
    ));
}

#[test]
fn test_unlisted_characters_are_rejected() {
    for ch in ['#', ';', '(', ')', '-', '+', '/', '\'', '.', '%', '@', '[', '`'] {
        let input = format!("AGE {ch}");
        match tokenize(&input) {
            Err(LexError::UnexpectedCharacter { ch: found, position }) => {
                assert_eq!(found, ch);
                assert_eq!(position.offset, 4);
            }
            other => panic!("expected lexical error for {ch:?}, got {other:?}"),
        }
    }
}

#[test]
fn test_token_stream_for_all_classes() -> Result<()> {
    let tokens =
        tokenize("FROM \"f\" SELECT a,b WHERE a != 1.25 OR b >= \"z\" ORDER BY a ASC LIMIT 2")?;
    let kinds: Vec<TokenType> = tokens.into_iter().map(|t| t.token_type).collect();
    assert_eq!(kinds.len(), 20);
    assert_eq!(kinds[4], TokenType::Comma);
    assert_eq!(kinds[8], TokenType::NotEqual);
    assert_eq!(kinds[9], TokenType::Number(1.25));
    assert_eq!(kinds[11], TokenType::Identifier("b".to_string()));
    assert_eq!(kinds[13], TokenType::String("z".to_string()));
    assert_eq!(kinds[17], TokenType::Asc);
    Ok(())
}

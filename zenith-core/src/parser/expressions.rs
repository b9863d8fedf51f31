use super::error::{Expected, ParseError};
use crate::ast::Expression;
use crate::lexer::TokenKind;
use crate::parser::Parser;

type OperandParser = fn(&mut Parser) -> Result<Expression, ParseError>;

pub fn parse_expression(parser: &mut Parser) -> Result<Expression, ParseError> {
    parse_assignment(parser)
}

fn parse_assignment(parser: &mut Parser) -> Result<Expression, ParseError> {
    // Grouping leaves no node behind, so `(a)` is only told apart from `a` by
    // its opening parenthesis.
    let grouped = parser.check(TokenKind::LParen);
    let target = parse_logical_or(parser)?;

    let Some(equals) = parser.match_token(TokenKind::Assign) else {
        return Ok(target);
    };
    let value = parse_assignment(parser)?;

    match target {
        Expression::Identifier(name) if !grouped => Ok(Expression::Assignment {
            name,
            value: Box::new(value),
        }),
        _ => Err(ParseError::InvalidAssignmentTarget { equals }),
    }
}

fn parse_logical_or(parser: &mut Parser) -> Result<Expression, ParseError> {
    parse_left_associative(parser, parse_logical_and, &[TokenKind::Or])
}

fn parse_logical_and(parser: &mut Parser) -> Result<Expression, ParseError> {
    parse_left_associative(parser, parse_equality, &[TokenKind::And])
}

fn parse_equality(parser: &mut Parser) -> Result<Expression, ParseError> {
    parse_left_associative(
        parser,
        parse_comparison,
        &[TokenKind::Equal, TokenKind::NotEqual],
    )
}

fn parse_comparison(parser: &mut Parser) -> Result<Expression, ParseError> {
    parse_left_associative(
        parser,
        parse_additive,
        &[
            TokenKind::GreaterThan,
            TokenKind::GreaterEqual,
            TokenKind::LessThan,
            TokenKind::LessEqual,
        ],
    )
}

fn parse_additive(parser: &mut Parser) -> Result<Expression, ParseError> {
    parse_left_associative(
        parser,
        parse_multiplicative,
        &[TokenKind::Plus, TokenKind::Minus],
    )
}

fn parse_multiplicative(parser: &mut Parser) -> Result<Expression, ParseError> {
    parse_left_associative(
        parser,
        parse_unary,
        &[TokenKind::Asterisk, TokenKind::Slash],
    )
}

/// Folds `operand (operator operand)*` into a left-leaning chain of binary
/// expressions.
fn parse_left_associative(
    parser: &mut Parser,
    operand: OperandParser,
    operators: &[TokenKind],
) -> Result<Expression, ParseError> {
    let mut expression = operand(parser)?;

    while let Some(operator) = parser.match_any(operators) {
        let right = operand(parser)?;
        expression = Expression::Binary {
            operator,
            left: Box::new(expression),
            right: Box::new(right),
        };
    }

    Ok(expression)
}

fn parse_unary(parser: &mut Parser) -> Result<Expression, ParseError> {
    match parser.match_any(&[TokenKind::Bang, TokenKind::Minus]) {
        Some(operator) => Ok(Expression::Unary {
            operator,
            operand: Box::new(parse_unary(parser)?),
        }),
        None => parse_primary(parser),
    }
}

fn parse_primary(parser: &mut Parser) -> Result<Expression, ParseError> {
    let token = parser.advance();
    match token.kind {
        TokenKind::Number
        | TokenKind::String
        | TokenKind::Char
        | TokenKind::True
        | TokenKind::False
        | TokenKind::Null => Ok(Expression::Literal(token)),
        TokenKind::Ident => Ok(Expression::Identifier(token)),
        TokenKind::LParen => {
            let expression = parse_expression(parser)?;
            parser.expect_token(TokenKind::RParen, "after grouped expression")?;
            Ok(expression)
        }
        _ => Err(ParseError::UnexpectedToken {
            expected: Expected::Expression,
            got: token,
        }),
    }
}

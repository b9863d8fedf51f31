use std::fmt::Display;

use thiserror::Error;

use crate::lexer::{Token, TokenKind};

#[derive(Debug, PartialEq, Clone, Error)]
pub enum ParseError {
    #[error(
        "[line {}] SyntaxError: Expected {expected} {context}, found {}.",
        .got.line,
        describe(.got)
    )]
    MissingToken {
        expected: Expected,
        context: &'static str,
        got: Token,
    },
    #[error("[line {}] SyntaxError: Invalid assignment target.", .equals.line)]
    InvalidAssignmentTarget { equals: Token },
    #[error(
        "[line {}] SyntaxError: Expected {expected}, found {}.",
        .got.line,
        describe(.got)
    )]
    UnexpectedToken { expected: Expected, got: Token },
}

#[derive(Debug, PartialEq, Clone)]
pub enum Expected {
    Token(TokenKind),
    Identifier,
    Expression,
}

impl Display for Expected {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expected::Token(kind) => write!(f, "{}", kind),
            Expected::Identifier => write!(f, "variable name"),
            Expected::Expression => write!(f, "expression"),
        }
    }
}

fn describe(token: &Token) -> String {
    match token.kind {
        TokenKind::EndOfInput => "end of input".to_owned(),
        _ => format!("'{}'", token.lexeme),
    }
}

impl ParseError {
    pub fn line(&self) -> usize {
        match self {
            ParseError::MissingToken { got, .. } => got.line,
            ParseError::InvalidAssignmentTarget { equals } => equals.line,
            ParseError::UnexpectedToken { got, .. } => got.line,
        }
    }

    pub fn missing_token(expected: TokenKind, context: &'static str, got: Token) -> ParseError {
        ParseError::MissingToken {
            expected: Expected::Token(expected),
            context,
            got,
        }
    }
}

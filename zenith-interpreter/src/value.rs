use std::fmt::Display;

use zenith_core::ast::DeclaredType;
use zenith_core::lexer::{Token, TokenKind};

/// Runtime value. Derived equality is structural and never holds across
/// variants.
#[derive(Debug, PartialEq, Clone)]
pub enum Value {
    Int(i64),
    Bool(bool),
    String(String),
    Char(char),
    Null,
}

impl Value {
    pub fn from_literal(token: &Token) -> Option<Value> {
        match token.kind {
            TokenKind::Number => token.lexeme.parse().ok().map(Value::Int),
            TokenKind::String => unquote(&token.lexeme, '"').map(|text| Value::String(text.to_owned())),
            TokenKind::Char => {
                let mut chars = unquote(&token.lexeme, '\'')?.chars();
                match (chars.next(), chars.next()) {
                    (Some(ch), None) => Some(Value::Char(ch)),
                    _ => None,
                }
            }
            TokenKind::True => Some(Value::Bool(true)),
            TokenKind::False => Some(Value::Bool(false)),
            TokenKind::Null => Some(Value::Null),
            _ => None,
        }
    }

    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Bool(false) | Value::Null)
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Bool(_) => "bool",
            Value::String(_) => "string",
            Value::Char(_) => "char",
            Value::Null => "null",
        }
    }

    pub fn has_type(&self, declared: DeclaredType) -> bool {
        matches!(
            (declared, self),
            (DeclaredType::Int, Value::Int(_))
                | (DeclaredType::String, Value::String(_))
                | (DeclaredType::Bool, Value::Bool(_))
                | (DeclaredType::Char, Value::Char(_))
        )
    }
}

fn unquote(lexeme: &str, quote: char) -> Option<&str> {
    lexeme.strip_prefix(quote)?.strip_suffix(quote)
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Int(value) => write!(f, "{}", value),
            Value::Bool(value) => write!(f, "{}", value),
            Value::String(value) => write!(f, "{}", value),
            Value::Char(value) => write!(f, "{}", value),
            Value::Null => write!(f, "null"),
        }
    }
}

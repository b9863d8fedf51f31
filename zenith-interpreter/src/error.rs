use std::io;
use std::rc::Rc;
use std::sync::Arc;

use thiserror::Error;
use zenith_core::ast::DeclaredType;
use zenith_core::lexer::LexError;
use zenith_core::parser::ParseError;

#[derive(Debug, PartialEq, Clone, Error)]
pub enum NameError {
    #[error("Redeclaration of variable '{0}'.")]
    Redeclaration(Rc<str>),
    #[error("Undefined variable '{0}'.")]
    UndefinedVariable(Rc<str>),
}

#[derive(Debug, PartialEq, Clone, Error)]
pub enum TypeError {
    #[error(
        "Cannot initialize '{name}' of type {} with a value of type {found}.",
        .declared.keyword()
    )]
    DeclaredTypeMismatch {
        name: Rc<str>,
        declared: DeclaredType,
        found: &'static str,
    },
    #[error("Operand type mismatch for '{operator}': expected {expected}, found {found}.")]
    OperandTypeMismatch {
        operator: Rc<str>,
        expected: &'static str,
        found: String,
    },
    #[error("Division by zero.")]
    DivisionByZero,
    #[error("Integer overflow in '{operator}'.")]
    IntegerOverflow { operator: Rc<str> },
    #[error("Invalid literal {0}.")]
    InvalidLiteral(Rc<str>),
}

#[derive(Debug, Clone, Error)]
pub enum RuntimeError {
    #[error("[line {line}] NameError: {error}")]
    Name { error: NameError, line: usize },
    #[error("[line {line}] TypeError: {error}")]
    Type { error: TypeError, line: usize },
    #[error("IOError: could not write output: {0}")]
    Output(#[source] Arc<io::Error>),
}

impl PartialEq for RuntimeError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (
                RuntimeError::Name { error, line },
                RuntimeError::Name {
                    error: other_error,
                    line: other_line,
                },
            ) => error == other_error && line == other_line,
            (
                RuntimeError::Type { error, line },
                RuntimeError::Type {
                    error: other_error,
                    line: other_line,
                },
            ) => error == other_error && line == other_line,
            // io::Error has no equality; its kind is the closest stand-in.
            (RuntimeError::Output(error), RuntimeError::Output(other_error)) => {
                error.kind() == other_error.kind()
            }
            _ => false,
        }
    }
}

impl From<io::Error> for RuntimeError {
    fn from(error: io::Error) -> Self {
        RuntimeError::Output(Arc::new(error))
    }
}

impl NameError {
    pub fn at(self, line: usize) -> RuntimeError {
        RuntimeError::Name { error: self, line }
    }
}

impl TypeError {
    pub fn at(self, line: usize) -> RuntimeError {
        RuntimeError::Type { error: self, line }
    }
}

/// First fatal error of a run, whichever stage raised it.
#[derive(Debug, PartialEq, Clone, Error)]
pub enum ZenithError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Syntax(#[from] ParseError),
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

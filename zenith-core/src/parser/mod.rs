pub mod error;
pub mod expressions;
pub mod statements;

use log::debug;

use crate::lexer::{Token, TokenKind};
pub use error::{Expected, ParseError};
use statements::parse_statement;

/// Recursive descent parser over a scanned token sequence.
///
/// The trailing `EndOfInput` token is never consumed, so looking ahead at the
/// end of the program keeps returning it.
pub struct Parser {
    iter: std::iter::Peekable<std::vec::IntoIter<Token>>,
    end_of_input: Token,
}

impl Parser {
    pub fn new(mut tokens: Vec<Token>) -> Self {
        let end_of_input = match tokens.last() {
            Some(token) if token.kind == TokenKind::EndOfInput => token.clone(),
            last => {
                let token = Token {
                    kind: TokenKind::EndOfInput,
                    lexeme: "EOF".into(),
                    line: last.map_or(1, |token| token.line),
                };
                tokens.push(token.clone());
                token
            }
        };
        let iter = tokens.into_iter().peekable();
        Self { iter, end_of_input }
    }

    pub(crate) fn current(&mut self) -> Token {
        match self.iter.peek() {
            Some(token) => token.clone(),
            None => self.end_of_input.clone(),
        }
    }

    pub(crate) fn check(&mut self, kind: TokenKind) -> bool {
        self.iter.peek().map_or(kind == TokenKind::EndOfInput, |token| token.kind == kind)
    }

    pub(crate) fn advance(&mut self) -> Token {
        match self
            .iter
            .next_if(|token| token.kind != TokenKind::EndOfInput)
        {
            Some(token) => token,
            None => self.current(),
        }
    }

    pub(crate) fn match_token(&mut self, kind: TokenKind) -> Option<Token> {
        if kind == TokenKind::EndOfInput {
            return None;
        }
        self.iter.next_if(|token| token.kind == kind)
    }

    pub(crate) fn match_any(&mut self, kinds: &[TokenKind]) -> Option<Token> {
        kinds.iter().find_map(|kind| self.match_token(*kind))
    }

    pub(crate) fn expect_token(
        &mut self,
        kind: TokenKind,
        context: &'static str,
    ) -> Result<Token, ParseError> {
        match self.match_token(kind) {
            Some(token) => Ok(token),
            None => Err(ParseError::missing_token(kind, context, self.current())),
        }
    }

    pub(crate) fn parse_ident(&mut self, context: &'static str) -> Result<Token, ParseError> {
        match self.match_token(TokenKind::Ident) {
            Some(token) => Ok(token),
            None => Err(ParseError::MissingToken {
                expected: Expected::Identifier,
                context,
                got: self.current(),
            }),
        }
    }

    /// Parses every statement up to the end of input, stopping at the first
    /// syntax error.
    pub fn parse_program(&mut self) -> Result<crate::ast::Program, ParseError> {
        let mut statements = Vec::new();

        while !self.check(TokenKind::EndOfInput) {
            statements.push(parse_statement(self)?);
        }

        debug!("parsed {} top-level statements", statements.len());
        Ok(crate::ast::Program { statements })
    }
}

use std::fmt::Display;
use std::rc::Rc;

use log::debug;
use thiserror::Error;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum TokenKind {
    // Punctuation
    LParen,
    RParen,
    LBrace,
    RBrace,
    Comma,
    Dot,
    Minus,
    Plus,
    SemiColon,
    Slash,
    Asterisk,

    // Operators
    Bang,
    NotEqual,
    Assign,
    Equal,
    GreaterThan,
    GreaterEqual,
    LessThan,
    LessEqual,

    // Literals
    Ident,
    String,
    Number,
    Char,

    // Keywords
    And,
    Class,
    Else,
    False,
    True,
    For,
    Fun,
    If,
    Null,
    Or,
    Print,
    Return,
    Super,
    This,
    Var,
    While,

    // Declared types
    TypeInt,
    TypeString,
    TypeBool,
    TypeChar,

    EndOfInput,
}

impl TokenKind {
    /// Upper snake case name, as shown by the token printer.
    pub fn name(&self) -> &'static str {
        use TokenKind::*;
        match self {
            LParen => "LEFT_PAREN",
            RParen => "RIGHT_PAREN",
            LBrace => "LEFT_BRACE",
            RBrace => "RIGHT_BRACE",
            Comma => "COMMA",
            Dot => "DOT",
            Minus => "MINUS",
            Plus => "PLUS",
            SemiColon => "SEMICOLON",
            Slash => "SLASH",
            Asterisk => "STAR",
            Bang => "BANG",
            NotEqual => "BANG_EQUAL",
            Assign => "EQUAL",
            Equal => "EQUAL_EQUAL",
            GreaterThan => "GREATER",
            GreaterEqual => "GREATER_EQUAL",
            LessThan => "LESS",
            LessEqual => "LESS_EQUAL",
            Ident => "IDENTIFIER",
            String => "STRING",
            Number => "NUMBER",
            Char => "CHAR",
            And => "AND",
            Class => "CLASS",
            Else => "ELSE",
            False => "FALSE",
            True => "TRUE",
            For => "FOR",
            Fun => "FUN",
            If => "IF",
            Null => "NIL",
            Or => "OR",
            Print => "PRINT",
            Return => "RETURN",
            Super => "SUPER",
            This => "THIS",
            Var => "VAR",
            While => "WHILE",
            TypeInt => "TYPE_INT",
            TypeString => "TYPE_STRING",
            TypeBool => "TYPE_BOOL",
            TypeChar => "TYPE_CHAR",
            EndOfInput => "END_OF_FILE",
        }
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use TokenKind::*;
        let text = match self {
            LParen => "'('",
            RParen => "')'",
            LBrace => "'{'",
            RBrace => "'}'",
            Comma => "','",
            Dot => "'.'",
            Minus => "'-'",
            Plus => "'+'",
            SemiColon => "';'",
            Slash => "'/'",
            Asterisk => "'*'",
            Bang => "'!'",
            NotEqual => "'!='",
            Assign => "'='",
            Equal => "'=='",
            GreaterThan => "'>'",
            GreaterEqual => "'>='",
            LessThan => "'<'",
            LessEqual => "'<='",
            Ident => "identifier",
            String => "string literal",
            Number => "number literal",
            Char => "character literal",
            EndOfInput => "end of input",
            Null => "'null'",
            Print => "'display'",
            TypeInt => "'int'",
            TypeString => "'string'",
            TypeBool => "'bool'",
            TypeChar => "'char'",
            keyword => return write!(f, "'{}'", keyword.name().to_lowercase()),
        };
        write!(f, "{}", text)
    }
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: Rc<str>,
    pub line: usize,
}

#[derive(Debug, PartialEq, Eq, Clone, Error)]
#[error("[line {line}] LexError: {kind}")]
pub struct LexError {
    pub kind: LexErrorKind,
    pub line: usize,
}

#[derive(Debug, PartialEq, Eq, Clone, Error)]
pub enum LexErrorKind {
    #[error("Unterminated string.")]
    UnterminatedString,
    #[error("Unexpected character '{0}'.")]
    UnexpectedCharacter(char),
    #[error("Integer literal {0} does not fit in 64 bits.")]
    IntegerTooLarge(Rc<str>),
    #[error("Character literal must hold exactly one character.")]
    InvalidCharacterLiteral,
}

fn keywords(ident: &str) -> Option<TokenKind> {
    match ident {
        "and" => Some(TokenKind::And),
        "class" => Some(TokenKind::Class),
        "else" => Some(TokenKind::Else),
        "false" => Some(TokenKind::False),
        "true" => Some(TokenKind::True),
        "for" => Some(TokenKind::For),
        "fun" => Some(TokenKind::Fun),
        "if" => Some(TokenKind::If),
        "null" => Some(TokenKind::Null),
        "or" => Some(TokenKind::Or),
        "display" => Some(TokenKind::Print),
        "return" => Some(TokenKind::Return),
        "super" => Some(TokenKind::Super),
        "this" => Some(TokenKind::This),
        "var" => Some(TokenKind::Var),
        "while" => Some(TokenKind::While),
        "int" => Some(TokenKind::TypeInt),
        "string" => Some(TokenKind::TypeString),
        "bool" => Some(TokenKind::TypeBool),
        "char" => Some(TokenKind::TypeChar),
        _ => None,
    }
}

/// Scans the whole input, stopping at the first lexical error.
pub fn scan_tokens(input: &str) -> Result<Vec<Token>, LexError> {
    let tokens = Tokenizer::new(input).collect::<Result<Vec<_>, _>>()?;
    debug!("scanned {} tokens", tokens.len());
    Ok(tokens)
}

/// Yields tokens up to and including a single `EndOfInput`, or up to the
/// first error, and then stops.
#[derive(Clone)]
pub struct Tokenizer<'a> {
    input: &'a str,
    iter: std::iter::Peekable<std::str::CharIndices<'a>>,
    line: usize,
    finished: bool,
}

impl<'a> Tokenizer<'a> {
    pub fn new(input: &'a str) -> Self {
        let iter = input.char_indices().peekable();
        Self {
            input,
            iter,
            line: 1,
            finished: false,
        }
    }

    fn is_letter(ch: char) -> bool {
        ch.is_ascii_alphabetic() || ch == '_'
    }

    fn error(&self, kind: LexErrorKind, line: usize) -> LexError {
        LexError { kind, line }
    }

    fn make_token(&mut self, kind: TokenKind, start: usize, line: usize) -> Token {
        let end = self.next_idx();
        Token {
            kind,
            lexeme: self.input[start..end].into(),
            line,
        }
    }

    fn skip_whitespace(&mut self) {
        loop {
            match self.iter.peek() {
                Some((_, ' ' | '\r' | '\t')) => {
                    self.iter.next();
                }
                Some((_, '\n')) => {
                    self.line += 1;
                    self.iter.next();
                }
                Some(&(idx, '/')) if self.input[idx + 1..].starts_with('/') => {
                    while self.iter.next_if(|(_, ch)| *ch != '\n').is_some() {}
                }
                _ => return,
            }
        }
    }

    fn read_identifier(&mut self, start: usize) -> Token {
        while self
            .iter
            .next_if(|(_, ch)| Self::is_letter(*ch) || ch.is_ascii_digit())
            .is_some()
        {}

        let end = self.next_idx();
        let kind = keywords(&self.input[start..end]).unwrap_or(TokenKind::Ident);
        self.make_token(kind, start, self.line)
    }

    fn read_number(&mut self, start: usize) -> Result<Token, LexError> {
        while self.iter.next_if(|(_, ch)| ch.is_ascii_digit()).is_some() {}

        let token = self.make_token(TokenKind::Number, start, self.line);
        if token.lexeme.parse::<i64>().is_err() {
            return Err(self.error(LexErrorKind::IntegerTooLarge(token.lexeme), token.line));
        }
        Ok(token)
    }

    fn read_string(&mut self, start: usize) -> Result<Token, LexError> {
        let start_line = self.line;
        loop {
            match self.iter.next() {
                Some((_, '"')) => break,
                Some((_, '\n')) => self.line += 1,
                Some(_) => {}
                None => return Err(self.error(LexErrorKind::UnterminatedString, start_line)),
            }
        }

        Ok(self.make_token(TokenKind::String, start, start_line))
    }

    fn read_char(&mut self, start: usize) -> Result<Token, LexError> {
        let invalid = self.error(LexErrorKind::InvalidCharacterLiteral, self.line);
        match self.iter.next() {
            Some((_, '\'' | '\n')) | None => return Err(invalid),
            Some(_) => {}
        }
        if self.iter.next_if(|(_, ch)| *ch == '\'').is_none() {
            return Err(invalid);
        }

        Ok(self.make_token(TokenKind::Char, start, self.line))
    }

    fn scan_token(&mut self) -> Result<Token, LexError> {
        self.skip_whitespace();

        let Some((idx, ch)) = self.iter.next() else {
            return Ok(Token {
                kind: TokenKind::EndOfInput,
                lexeme: "EOF".into(),
                line: self.line,
            });
        };

        let kind = match ch {
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            ',' => TokenKind::Comma,
            '.' => TokenKind::Dot,
            '-' => TokenKind::Minus,
            '+' => TokenKind::Plus,
            ';' => TokenKind::SemiColon,
            '*' => TokenKind::Asterisk,
            '/' => TokenKind::Slash,
            '!' => self.one_or_two('=', TokenKind::NotEqual, TokenKind::Bang),
            '=' => self.one_or_two('=', TokenKind::Equal, TokenKind::Assign),
            '<' => self.one_or_two('=', TokenKind::LessEqual, TokenKind::LessThan),
            '>' => self.one_or_two('=', TokenKind::GreaterEqual, TokenKind::GreaterThan),
            '"' => return self.read_string(idx),
            '\'' => return self.read_char(idx),
            c if Self::is_letter(c) => return Ok(self.read_identifier(idx)),
            c if c.is_ascii_digit() => return self.read_number(idx),
            _ => return Err(self.error(LexErrorKind::UnexpectedCharacter(ch), self.line)),
        };

        Ok(self.make_token(kind, idx, self.line))
    }

    fn one_or_two(&mut self, second: char, double: TokenKind, single: TokenKind) -> TokenKind {
        if self.iter.next_if(|(_, ch)| *ch == second).is_some() {
            double
        } else {
            single
        }
    }

    fn next_idx(&mut self) -> usize {
        self.iter
            .peek()
            .map(|(idx, _)| *idx)
            .unwrap_or(self.input.len())
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let result = self.scan_token();
        match &result {
            Ok(token) if token.kind != TokenKind::EndOfInput => {}
            _ => self.finished = true,
        }
        Some(result)
    }
}

use zenith_core::lexer::{LexError, Token};
use zenith_interpreter::ZenithError;

use crate::runner::format_token;

pub trait Printer {
    type Object;

    fn print(&mut self, object: Self::Object);
}

pub struct InterpreterPrinter {}

impl Printer for InterpreterPrinter {
    type Object = Result<(), ZenithError>;

    fn print(&mut self, object: Self::Object) {
        if let Err(err) = object {
            eprintln!("{}", err);
        }
    }
}

pub struct TokenPrinter {}

impl Printer for TokenPrinter {
    type Object = Result<Vec<Token>, LexError>;

    fn print(&mut self, object: Self::Object) {
        match object {
            Ok(tokens) => tokens
                .iter()
                .for_each(|token| println!("{}", format_token(token))),
            Err(err) => eprintln!("{}", err),
        }
    }
}

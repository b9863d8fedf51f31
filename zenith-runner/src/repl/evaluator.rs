use std::io;

use zenith_core::lexer::{self, LexError, Token};
use zenith_interpreter::{Environment, ZenithError};

pub trait Evaluator {
    type Object;

    fn evaluate(&mut self, line: &str) -> Self::Object;
}

/// Runs each line in the same global scope, so declarations carry over.
pub struct InterpreterEvaluator {
    environment: Environment<'static>,
}

impl InterpreterEvaluator {
    pub fn new() -> Self {
        Self {
            environment: Environment::new(),
        }
    }
}

impl Evaluator for InterpreterEvaluator {
    type Object = Result<(), ZenithError>;

    fn evaluate(&mut self, line: &str) -> Self::Object {
        let stdout = io::stdout();
        zenith_interpreter::run_in(line, &self.environment, &mut stdout.lock())
    }
}

pub struct TokenEvaluator {}

impl Evaluator for TokenEvaluator {
    type Object = Result<Vec<Token>, LexError>;

    fn evaluate(&mut self, line: &str) -> Self::Object {
        lexer::scan_tokens(line)
    }
}

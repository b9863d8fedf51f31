use std::io::Write;

use zenith_core::lexer::scan_tokens;
use zenith_core::parser::Parser;

pub mod environment;
pub mod error;
pub mod evaluator;
pub mod value;

pub use environment::Environment;
pub use error::{RuntimeError, ZenithError};
pub use value::Value;

/// Lexes, parses and evaluates `source` in a fresh global scope.
pub fn run(source: &str, output: &mut dyn Write) -> Result<(), ZenithError> {
    run_in(source, &Environment::new(), output)
}

/// Same as [`run`], but keeps bindings in `environment` so later calls see
/// them.
pub fn run_in(
    source: &str,
    environment: &Environment<'_>,
    output: &mut dyn Write,
) -> Result<(), ZenithError> {
    let tokens = scan_tokens(source)?;
    let program = Parser::new(tokens).parse_program()?;
    evaluator::eval_program(&program, environment, output)?;
    Ok(())
}

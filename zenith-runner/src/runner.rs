use std::io::{self, Write};
use std::path::Path;

use log::info;
use rustyline::error::ReadlineError;
use thiserror::Error;
use zenith_core::lexer::{scan_tokens, Token};
use zenith_interpreter::ZenithError;

use crate::source::{self, SourceError};
use crate::Mode;

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error(transparent)]
    Zenith(#[from] ZenithError),
    #[error("IOError: could not write output: {0}")]
    Output(#[from] io::Error),
    #[error("[ERROR] Prompt failed: {0}")]
    Prompt(#[from] ReadlineError),
}

pub fn execute(path: &Path, mode: Mode) -> Result<(), RunnerError> {
    let source = source::read_source(path)?;
    info!("running {}", path.display());

    let stdout = io::stdout();
    let mut output = stdout.lock();
    match mode {
        Mode::Run => zenith_interpreter::run(&source, &mut output)?,
        Mode::Tokens => {
            let tokens = scan_tokens(&source).map_err(ZenithError::from)?;
            for token in &tokens {
                writeln!(output, "{}", format_token(token))?;
            }
        }
    }
    Ok(())
}

pub fn format_token(token: &Token) -> String {
    format!("{} {}", token.kind.name(), token.lexeme)
}

mod evaluator;
mod printer;
mod reader;

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use evaluator::{Evaluator, InterpreterEvaluator, TokenEvaluator};
use printer::{InterpreterPrinter, Printer, TokenPrinter};
use reader::{ReadOutput, Reader};

use crate::Mode;

struct Repl<E: Evaluator, P: Printer> {
    reader: Reader,
    evaluator: E,
    printer: P,
}

impl<O, E: Evaluator<Object = O>, P: Printer<Object = O>> Repl<E, P> {
    fn run(mut self) {
        loop {
            match self.reader.read() {
                ReadOutput::Exit => break,
                ReadOutput::Clear => continue,
                ReadOutput::Value(line) => {
                    let result = self.evaluator.evaluate(&line);
                    self.printer.print(result)
                }
            }
        }
    }
}

pub fn start(mode: Mode) -> Result<(), ReadlineError> {
    let rl = DefaultEditor::new()?;

    match mode {
        Mode::Run => Repl {
            reader: Reader::new(rl),
            evaluator: InterpreterEvaluator::new(),
            printer: InterpreterPrinter {},
        }
        .run(),
        Mode::Tokens => Repl {
            reader: Reader::new(rl),
            evaluator: TokenEvaluator {},
            printer: TokenPrinter {},
        }
        .run(),
    };
    Ok(())
}

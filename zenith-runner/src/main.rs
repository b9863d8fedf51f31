mod repl;
mod runner;
mod source;

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Clone, Copy, ValueEnum)]
pub enum Mode {
    /// Execute the program
    Run,
    /// Print the token stream instead of executing
    Tokens,
}

#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    #[arg(short, long, value_enum, default_value_t=Mode::Run)]
    mode: Mode,
    path: Option<PathBuf>,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.path {
        None => repl::start(cli.mode).map_err(runner::RunnerError::from),
        Some(path) => runner::execute(&path, cli.mode),
    };

    if let Err(error) = result {
        eprintln!("{}", error);
        std::process::exit(1);
    }
}

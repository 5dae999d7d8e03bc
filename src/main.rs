// ABOUTME: CLI entry point: script mode or the interactive REPL

mod builtins;
mod config;
mod env;
mod error;
mod eval;
mod printer;
mod reader;
mod runtime;
mod value;

use clap::Parser;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::{Config, Editor};
use runtime::{format_exception, Runtime};
use std::path::PathBuf;
use std::process::ExitCode;

/// MAL-family Lisp interpreter
#[derive(Parser, Debug)]
#[command(name = "mallet")]
#[command(version = config::VERSION)]
#[command(about = "A MAL-family Lisp interpreter in Rust")]
struct CliArgs {
    /// Script file to execute (optional - if not provided, starts REPL)
    #[arg(value_name = "FILE")]
    script: Option<PathBuf>,

    /// Remaining arguments, exposed to the program as *ARGV*
    #[arg(value_name = "ARGS", trailing_var_arg = true)]
    args: Vec<String>,
}

fn main() -> ExitCode {
    let cli = CliArgs::parse();

    let runtime = match Runtime::new(cli.args) {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("{}", format_exception(&e));
            return ExitCode::FAILURE;
        }
    };

    // Script mode: evaluate the file and exit
    if let Some(script) = cli.script {
        return match runtime.run_file(&script.to_string_lossy()) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("{}", format_exception(&e));
                ExitCode::FAILURE
            }
        };
    }

    repl(&runtime)
}

/// Interactive loop: read a line, evaluate, print, repeat until EOF or
/// the run flag clears
fn repl(runtime: &Runtime) -> ExitCode {
    let rl_config = Config::builder().auto_add_history(true).build();
    let mut rl: Editor<(), DefaultHistory> = match Editor::with_config(rl_config) {
        Ok(editor) => editor,
        Err(e) => {
            eprintln!("Failed to initialize REPL: {}", e);
            return ExitCode::FAILURE;
        }
    };

    // Try to load history from previous sessions
    let _ = rl.load_history(config::HISTORY_FILE);

    println!("{}", config::WELCOME_MESSAGE);
    println!("{}", config::WELCOME_SUBTITLE);

    while runtime::is_running() {
        match rl.readline(config::PROMPT) {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                match runtime.rep(&line) {
                    // quit may have flipped the flag mid-evaluation
                    Ok(Some(output)) => {
                        if runtime::is_running() {
                            println!("{}", output);
                        }
                    }
                    Ok(None) => {}
                    Err(e) => println!("{}", format_exception(&e)),
                }
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl-C clears the line and continues
                continue;
            }
            Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("Error: {}", e);
                break;
            }
        }
    }

    // Save history on exit
    let _ = rl.save_history(config::HISTORY_FILE);

    ExitCode::SUCCESS
}

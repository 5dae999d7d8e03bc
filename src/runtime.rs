// ABOUTME: Runtime wiring the reader, evaluator, and printer into a REPL core

use crate::builtins::register_builtins;
use crate::config;
use crate::env::Environment;
use crate::error::EvalError;
use crate::eval;
use crate::printer;
use crate::reader;
use crate::value::Value;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

// ============================================================================
// Process-wide interpreter state
// ============================================================================

thread_local! {
    /// Root environment handle for the `eval` builtin
    static ROOT_ENV: RefCell<Option<Rc<Environment>>> = const { RefCell::new(None) };

    /// Run flag observed by the REPL loop between iterations; `quit` clears it
    static RUNNING: Cell<bool> = const { Cell::new(true) };
}

/// The root environment of the current runtime, if one is initialized
pub fn root_env() -> Option<Rc<Environment>> {
    ROOT_ENV.with(|env| env.borrow().clone())
}

fn set_root_env(env: Rc<Environment>) {
    ROOT_ENV.with(|slot| {
        *slot.borrow_mut() = Some(env);
    });
}

/// Asks the REPL loop to stop after the current iteration
pub fn request_quit() {
    RUNNING.with(|flag| flag.set(false));
}

pub fn is_running() -> bool {
    RUNNING.with(|flag| flag.get())
}

// ============================================================================
// Runtime
// ============================================================================

/// One interpreter instance: the root environment plus the READ-EVAL-PRINT
/// composition. Construction installs every builtin, binds `*ARGV*` and
/// `*host-language*`, and evaluates the startup prelude.
pub struct Runtime {
    env: Rc<Environment>,
}

const PRELUDE: &str = include_str!("prelude.lisp");

impl Runtime {
    pub fn new(argv: Vec<String>) -> Result<Self, EvalError> {
        let env = Environment::new();
        register_builtins(&env);
        env.set(
            "*ARGV*".to_string(),
            Value::list(argv.into_iter().map(Value::Str).collect()),
        );
        env.set(
            "*host-language*".to_string(),
            Value::string(config::HOST_LANGUAGE),
        );
        set_root_env(env.clone());
        RUNNING.with(|flag| flag.set(true));

        let runtime = Runtime { env };
        runtime.eval_source(PRELUDE)?;
        Ok(runtime)
    }

    /// One REPL iteration: read a form, evaluate it, print the result
    /// readably. `None` when the line holds no form at all.
    pub fn rep(&self, line: &str) -> Result<Option<String>, EvalError> {
        let form = match reader::read_str(line)? {
            Some(form) => form,
            None => return Ok(None),
        };
        let value = eval::eval(form, self.env.clone())?;
        Ok(Some(printer::pr_str(&value, true)))
    }

    /// Evaluates every top-level form of `source`, returning the last value
    pub fn eval_source(&self, source: &str) -> Result<Value, EvalError> {
        let mut result = Value::Nil;
        for form in reader::read_many(source)? {
            result = eval::eval(form, self.env.clone())?;
        }
        Ok(result)
    }

    /// Runs a script file, equivalent to `(load-file "<path>")`
    pub fn run_file(&self, path: &str) -> Result<(), EvalError> {
        let call = Value::list(vec![
            Value::symbol("load-file"),
            Value::string(path),
        ]);
        eval::eval(call, self.env.clone()).map(|_| ())
    }
}

/// Top-level rendering of an uncaught raise; the REPL prints this and
/// continues.
pub fn format_exception(err: &EvalError) -> String {
    format!("Exception: {}", printer::pr_str(&err.payload(), true))
}

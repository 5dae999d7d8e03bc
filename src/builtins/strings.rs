//! String and output operations: str, pr-str, prn, println, symbol,
//! keyword, read-string, slurp
//!
//! `str` and `println` use display form (raw string contents); `pr-str`
//! and `prn` use readable form (quoted and escaped). Output goes through
//! the host's line writer, one line per call.

use crate::env::Environment;
use crate::error::{EvalError, ARITY_ONE};
use crate::printer::pr_str;
use crate::reader;
use crate::value::Value;
use std::rc::Rc;

/// Concatenates the display forms of all arguments with no separator
pub fn builtin_str(args: &[Value]) -> Result<Value, EvalError> {
    let joined: String = args.iter().map(|arg| pr_str(arg, false)).collect();
    Ok(Value::Str(joined))
}

/// Joins the readable forms of all arguments with spaces
pub fn builtin_pr_str(args: &[Value]) -> Result<Value, EvalError> {
    let parts: Vec<String> = args.iter().map(|arg| pr_str(arg, true)).collect();
    Ok(Value::Str(parts.join(" ")))
}

/// Prints the readable forms of all arguments and returns nil
pub fn builtin_prn(args: &[Value]) -> Result<Value, EvalError> {
    let parts: Vec<String> = args.iter().map(|arg| pr_str(arg, true)).collect();
    println!("{}", parts.join(" "));
    Ok(Value::Nil)
}

/// Prints the display forms of all arguments and returns nil
pub fn builtin_println(args: &[Value]) -> Result<Value, EvalError> {
    let parts: Vec<String> = args.iter().map(|arg| pr_str(arg, false)).collect();
    println!("{}", parts.join(" "));
    Ok(Value::Nil)
}

/// Interns a string as a symbol
pub fn builtin_symbol(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::arity_error("symbol", ARITY_ONE, args.len()));
    }
    match &args[0] {
        Value::Str(s) => Ok(Value::symbol(s.clone())),
        Value::Symbol(_) => Ok(args[0].clone()),
        other => Err(EvalError::type_error("symbol", "string", other, 1)),
    }
}

/// Interns a string as a keyword; keywords pass through unchanged
pub fn builtin_keyword(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::arity_error("keyword", ARITY_ONE, args.len()));
    }
    match &args[0] {
        Value::Str(s) => Ok(Value::keyword(s.clone())),
        Value::Keyword(_) => Ok(args[0].clone()),
        other => Err(EvalError::type_error("keyword", "string", other, 1)),
    }
}

/// Reads the first form of a string; an empty string gives nil
pub fn builtin_read_string(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::arity_error("read-string", ARITY_ONE, args.len()));
    }
    match &args[0] {
        Value::Str(s) => Ok(reader::read_str(s)?.unwrap_or(Value::Nil)),
        other => Err(EvalError::type_error("read-string", "string", other, 1)),
    }
}

/// Reads a whole file into a string
pub fn builtin_slurp(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::arity_error("slurp", ARITY_ONE, args.len()));
    }
    match &args[0] {
        Value::Str(path) => std::fs::read_to_string(path)
            .map(Value::Str)
            .map_err(|e| EvalError::runtime_error("slurp", format!("{}: {}", path, e))),
        other => Err(EvalError::type_error("slurp", "string", other, 1)),
    }
}

/// Register all string builtins in the environment
pub fn register(env: &Rc<Environment>) {
    env.set("str".to_string(), Value::native("str", builtin_str));
    env.set("pr-str".to_string(), Value::native("pr-str", builtin_pr_str));
    env.set("prn".to_string(), Value::native("prn", builtin_prn));
    env.set(
        "println".to_string(),
        Value::native("println", builtin_println),
    );
    env.set("symbol".to_string(), Value::native("symbol", builtin_symbol));
    env.set(
        "keyword".to_string(),
        Value::native("keyword", builtin_keyword),
    );
    env.set(
        "read-string".to_string(),
        Value::native("read-string", builtin_read_string),
    );
    env.set("slurp".to_string(), Value::native("slurp", builtin_slurp));
}

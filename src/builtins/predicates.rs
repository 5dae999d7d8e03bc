//! Type predicates: nil?, true?, false?, symbol?, string?, number?,
//! keyword?, list?, vector?, sequential?, map?, fn?, macro?, plus `type`
//! for reflection.
//!
//! All predicates take one argument and return a boolean. `list?` and
//! `vector?` distinguish the two sequence kinds even though `=` compares
//! them element-wise; `sequential?` accepts both.

use crate::env::Environment;
use crate::error::{EvalError, ARITY_ONE};
use crate::value::Value;
use std::rc::Rc;

fn one<'a>(function: &str, args: &'a [Value]) -> Result<&'a Value, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::arity_error(function, ARITY_ONE, args.len()));
    }
    Ok(&args[0])
}

pub fn builtin_nil_p(args: &[Value]) -> Result<Value, EvalError> {
    Ok(Value::Bool(matches!(one("nil?", args)?, Value::Nil)))
}

pub fn builtin_true_p(args: &[Value]) -> Result<Value, EvalError> {
    Ok(Value::Bool(matches!(
        one("true?", args)?,
        Value::Bool(true)
    )))
}

pub fn builtin_false_p(args: &[Value]) -> Result<Value, EvalError> {
    Ok(Value::Bool(matches!(
        one("false?", args)?,
        Value::Bool(false)
    )))
}

pub fn builtin_symbol_p(args: &[Value]) -> Result<Value, EvalError> {
    Ok(Value::Bool(matches!(
        one("symbol?", args)?,
        Value::Symbol(_)
    )))
}

pub fn builtin_string_p(args: &[Value]) -> Result<Value, EvalError> {
    Ok(Value::Bool(matches!(one("string?", args)?, Value::Str(_))))
}

pub fn builtin_number_p(args: &[Value]) -> Result<Value, EvalError> {
    Ok(Value::Bool(matches!(
        one("number?", args)?,
        Value::Number(_)
    )))
}

pub fn builtin_keyword_p(args: &[Value]) -> Result<Value, EvalError> {
    Ok(Value::Bool(matches!(
        one("keyword?", args)?,
        Value::Keyword(_)
    )))
}

pub fn builtin_list_p(args: &[Value]) -> Result<Value, EvalError> {
    Ok(Value::Bool(matches!(one("list?", args)?, Value::List(..))))
}

pub fn builtin_vector_p(args: &[Value]) -> Result<Value, EvalError> {
    Ok(Value::Bool(matches!(
        one("vector?", args)?,
        Value::Vector(..)
    )))
}

pub fn builtin_sequential_p(args: &[Value]) -> Result<Value, EvalError> {
    Ok(Value::Bool(matches!(
        one("sequential?", args)?,
        Value::List(..) | Value::Vector(..)
    )))
}

pub fn builtin_map_p(args: &[Value]) -> Result<Value, EvalError> {
    Ok(Value::Bool(matches!(one("map?", args)?, Value::Map(..))))
}

pub fn builtin_fn_p(args: &[Value]) -> Result<Value, EvalError> {
    Ok(Value::Bool(matches!(
        one("fn?", args)?,
        Value::Function(f) if !f.is_macro
    )))
}

pub fn builtin_macro_p(args: &[Value]) -> Result<Value, EvalError> {
    Ok(Value::Bool(matches!(
        one("macro?", args)?,
        Value::Function(f) if f.is_macro
    )))
}

/// Returns the type name of the argument as a string
pub fn builtin_type(args: &[Value]) -> Result<Value, EvalError> {
    Ok(Value::string(one("type", args)?.type_name()))
}

/// Register all type predicate builtins in the environment
pub fn register(env: &Rc<Environment>) {
    env.set("nil?".to_string(), Value::native("nil?", builtin_nil_p));
    env.set("true?".to_string(), Value::native("true?", builtin_true_p));
    env.set(
        "false?".to_string(),
        Value::native("false?", builtin_false_p),
    );
    env.set(
        "symbol?".to_string(),
        Value::native("symbol?", builtin_symbol_p),
    );
    env.set(
        "string?".to_string(),
        Value::native("string?", builtin_string_p),
    );
    env.set(
        "number?".to_string(),
        Value::native("number?", builtin_number_p),
    );
    env.set(
        "keyword?".to_string(),
        Value::native("keyword?", builtin_keyword_p),
    );
    env.set("list?".to_string(), Value::native("list?", builtin_list_p));
    env.set(
        "vector?".to_string(),
        Value::native("vector?", builtin_vector_p),
    );
    env.set(
        "sequential?".to_string(),
        Value::native("sequential?", builtin_sequential_p),
    );
    env.set("map?".to_string(), Value::native("map?", builtin_map_p));
    env.set("fn?".to_string(), Value::native("fn?", builtin_fn_p));
    env.set(
        "macro?".to_string(),
        Value::native("macro?", builtin_macro_p),
    );
    env.set("type".to_string(), Value::native("type", builtin_type));
}

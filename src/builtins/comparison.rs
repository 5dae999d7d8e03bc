//! Comparison operations: =, <, >, <=, >=
//!
//! `=` is deep structural equality across every type, with lists and
//! vectors comparing element-wise against each other. The ordering
//! operators take exactly two numbers.

use crate::env::Environment;
use crate::error::{EvalError, ARITY_TWO};
use crate::value::{Num, Value};
use std::rc::Rc;

fn num_pair(function: &str, args: &[Value]) -> Result<(Num, Num), EvalError> {
    if args.len() != 2 {
        return Err(EvalError::arity_error(function, ARITY_TWO, args.len()));
    }
    let a = match &args[0] {
        Value::Number(n) => *n,
        other => return Err(EvalError::type_error(function, "number", other, 1)),
    };
    let b = match &args[1] {
        Value::Number(n) => *n,
        other => return Err(EvalError::type_error(function, "number", other, 2)),
    };
    Ok((a, b))
}

/// Deep structural equality
pub fn builtin_eq(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 2 {
        return Err(EvalError::arity_error("=", ARITY_TWO, args.len()));
    }
    Ok(Value::Bool(args[0] == args[1]))
}

pub fn builtin_lt(args: &[Value]) -> Result<Value, EvalError> {
    let (a, b) = num_pair("<", args)?;
    Ok(Value::Bool(a < b))
}

pub fn builtin_le(args: &[Value]) -> Result<Value, EvalError> {
    let (a, b) = num_pair("<=", args)?;
    Ok(Value::Bool(a <= b))
}

pub fn builtin_gt(args: &[Value]) -> Result<Value, EvalError> {
    let (a, b) = num_pair(">", args)?;
    Ok(Value::Bool(a > b))
}

pub fn builtin_ge(args: &[Value]) -> Result<Value, EvalError> {
    let (a, b) = num_pair(">=", args)?;
    Ok(Value::Bool(a >= b))
}

/// Register all comparison builtins in the environment
pub fn register(env: &Rc<Environment>) {
    env.set("=".to_string(), Value::native("=", builtin_eq));
    env.set("<".to_string(), Value::native("<", builtin_lt));
    env.set("<=".to_string(), Value::native("<=", builtin_le));
    env.set(">".to_string(), Value::native(">", builtin_gt));
    env.set(">=".to_string(), Value::native(">=", builtin_ge));
}

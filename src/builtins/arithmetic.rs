//! Arithmetic operations: +, -, *, /
//!
//! All four accept homogeneous numeric arguments in the single numeric
//! type of the build.
//!
//! - `+`: Sum of all arguments (identity: 0)
//! - `-`: Subtract subsequent args from first; single arg is returned as-is
//! - `*`: Product of all arguments (identity: 1)
//! - `/`: Divide first by subsequent args; raises on division by zero

use crate::env::Environment;
use crate::error::{EvalError, ARITY_AT_LEAST_ONE};
use crate::value::{Num, Value};
use std::rc::Rc;

/// Returns the sum of all arguments.
///
/// ```lisp
/// (+ 1 2 3) => 6
/// (+) => 0
/// ```
pub fn builtin_add(args: &[Value]) -> Result<Value, EvalError> {
    let mut sum = 0 as Num;
    for (i, arg) in args.iter().enumerate() {
        match arg {
            Value::Number(n) => sum += *n,
            other => return Err(EvalError::type_error("+", "number", other, i + 1)),
        }
    }
    Ok(Value::Number(sum))
}

/// Subtracts subsequent arguments from the first. A single argument is
/// returned unchanged.
///
/// ```lisp
/// (- 10 3 2) => 5
/// (- 5) => 5
/// ```
pub fn builtin_sub(args: &[Value]) -> Result<Value, EvalError> {
    if args.is_empty() {
        return Err(EvalError::arity_error("-", ARITY_AT_LEAST_ONE, 0));
    }

    let mut result = match &args[0] {
        Value::Number(n) => *n,
        other => return Err(EvalError::type_error("-", "number", other, 1)),
    };
    for (i, arg) in args[1..].iter().enumerate() {
        match arg {
            Value::Number(n) => result -= *n,
            other => return Err(EvalError::type_error("-", "number", other, i + 2)),
        }
    }
    Ok(Value::Number(result))
}

/// Returns the product of all arguments.
///
/// ```lisp
/// (* 2 3 4) => 24
/// (*) => 1
/// ```
pub fn builtin_mul(args: &[Value]) -> Result<Value, EvalError> {
    let mut product = 1 as Num;
    for (i, arg) in args.iter().enumerate() {
        match arg {
            Value::Number(n) => product *= *n,
            other => return Err(EvalError::type_error("*", "number", other, i + 1)),
        }
    }
    Ok(Value::Number(product))
}

/// Divides the first argument by subsequent arguments. A single argument
/// is returned unchanged. Division by zero raises.
///
/// ```lisp
/// (/ 20 4) => 5
/// (/ 100 2 5) => 10
/// ```
pub fn builtin_div(args: &[Value]) -> Result<Value, EvalError> {
    if args.is_empty() {
        return Err(EvalError::arity_error("/", ARITY_AT_LEAST_ONE, 0));
    }

    let mut result = match &args[0] {
        Value::Number(n) => *n,
        other => return Err(EvalError::type_error("/", "number", other, 1)),
    };
    for (i, arg) in args[1..].iter().enumerate() {
        match arg {
            Value::Number(n) => {
                if *n == 0 as Num {
                    return Err(EvalError::runtime_error("/", "division by zero"));
                }
                result /= *n;
            }
            other => return Err(EvalError::type_error("/", "number", other, i + 2)),
        }
    }
    Ok(Value::Number(result))
}

/// Register all arithmetic builtins in the environment
pub fn register(env: &Rc<Environment>) {
    env.set("+".to_string(), Value::native("+", builtin_add));
    env.set("-".to_string(), Value::native("-", builtin_sub));
    env.set("*".to_string(), Value::native("*", builtin_mul));
    env.set("/".to_string(), Value::native("/", builtin_div));
}

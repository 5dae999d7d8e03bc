//! System operations: eval, apply, map, throw, time-ms, quit
//!
//! These re-enter the evaluator or touch runtime state: `eval` runs in
//! the root environment, `apply` and `map` call arbitrary callables,
//! `throw` raises any payload, and `quit` asks the REPL loop to stop.

use crate::env::Environment;
use crate::error::{EvalError, ARITY_AT_LEAST_TWO, ARITY_ONE, ARITY_TWO};
use crate::eval;
use crate::runtime;
use crate::value::{Num, Value};
use std::rc::Rc;
use std::time::{SystemTime, UNIX_EPOCH};

/// Evaluates a form in the root environment of the runtime
pub fn builtin_eval(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::arity_error("eval", ARITY_ONE, args.len()));
    }
    let root = runtime::root_env()
        .ok_or_else(|| EvalError::runtime_error("eval", "no runtime initialized"))?;
    eval::eval(args[0].clone(), root)
}

/// Calls a function with the given arguments, flattening a trailing
/// sequence into the call
pub fn builtin_apply(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() < 2 {
        return Err(EvalError::arity_error("apply", ARITY_AT_LEAST_TWO, args.len()));
    }
    let mut call_args: Vec<Value> = args[1..args.len() - 1].to_vec();
    match &args[args.len() - 1] {
        Value::List(items, _) | Value::Vector(items, _) => {
            call_args.extend(items.iter().cloned())
        }
        Value::Nil => {}
        other => {
            return Err(EvalError::type_error(
                "apply",
                "sequence",
                other,
                args.len(),
            ));
        }
    }
    eval::apply_function(&args[0], &call_args)
}

/// Applies a function to each element of a sequence; always returns a list
pub fn builtin_map(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 2 {
        return Err(EvalError::arity_error("map", ARITY_TWO, args.len()));
    }
    let items = match &args[1] {
        Value::List(items, _) | Value::Vector(items, _) => items.as_slice(),
        Value::Nil => &[],
        other => return Err(EvalError::type_error("map", "sequence", other, 2)),
    };
    let mut result = Vec::with_capacity(items.len());
    for item in items {
        result.push(eval::apply_function(&args[0], &[item.clone()])?);
    }
    Ok(Value::list(result))
}

/// Raises with the argument as payload
pub fn builtin_throw(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::arity_error("throw", ARITY_ONE, args.len()));
    }
    Err(EvalError::Throw(args[0].clone()))
}

/// Wall-clock milliseconds since the Unix epoch
pub fn builtin_time_ms(args: &[Value]) -> Result<Value, EvalError> {
    if !args.is_empty() {
        return Err(EvalError::arity_error("time-ms", "0", args.len()));
    }
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| EvalError::runtime_error("time-ms", e.to_string()))?
        .as_millis();
    Ok(Value::Number(millis as Num))
}

/// Clears the run flag; the REPL loop exits before its next prompt
pub fn builtin_quit(args: &[Value]) -> Result<Value, EvalError> {
    if !args.is_empty() {
        return Err(EvalError::arity_error("quit", "0", args.len()));
    }
    runtime::request_quit();
    Ok(Value::Nil)
}

/// Register all system builtins in the environment
pub fn register(env: &Rc<Environment>) {
    env.set("eval".to_string(), Value::native("eval", builtin_eval));
    env.set("apply".to_string(), Value::native("apply", builtin_apply));
    env.set("map".to_string(), Value::native("map", builtin_map));
    env.set("throw".to_string(), Value::native("throw", builtin_throw));
    env.set(
        "time-ms".to_string(),
        Value::native("time-ms", builtin_time_ms),
    );
    env.set("quit".to_string(), Value::native("quit", builtin_quit));
}

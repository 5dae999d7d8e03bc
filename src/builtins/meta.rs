//! Meta-data operations: meta, with-meta
//!
//! Only lists, vectors, maps, and functions carry a meta slot; it
//! defaults to nil. `with-meta` returns a fresh copy with the slot
//! replaced and leaves the original untouched.

use crate::env::Environment;
use crate::error::{EvalError, ARITY_ONE, ARITY_TWO};
use crate::value::Value;
use std::rc::Rc;

pub fn builtin_meta(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::arity_error("meta", ARITY_ONE, args.len()));
    }
    args[0].meta().ok_or_else(|| {
        EvalError::type_error("meta", "list, vector, map, or function", &args[0], 1)
    })
}

pub fn builtin_with_meta(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 2 {
        return Err(EvalError::arity_error("with-meta", ARITY_TWO, args.len()));
    }
    args[0].with_meta(args[1].clone()).ok_or_else(|| {
        EvalError::type_error("with-meta", "list, vector, map, or function", &args[0], 1)
    })
}

/// Register the meta builtins in the environment
pub fn register(env: &Rc<Environment>) {
    env.set("meta".to_string(), Value::native("meta", builtin_meta));
    env.set(
        "with-meta".to_string(),
        Value::native("with-meta", builtin_with_meta),
    );
}

//! Sequence operations: list, vector, cons, concat, vec, first, rest,
//! nth, count, empty?, seq, conj
//!
//! Lists and vectors share most of these; nil is accepted wherever an
//! empty sequence would be. All operations return fresh values, the
//! originals are never modified.

use crate::env::Environment;
use crate::error::{EvalError, ARITY_AT_LEAST_TWO, ARITY_ONE, ARITY_TWO};
use crate::value::{Num, Value};
use std::rc::Rc;

/// Sequence arguments: a list, a vector, or nil for the empty sequence
fn seq_arg<'a>(
    function: &str,
    arg: &'a Value,
    position: usize,
) -> Result<&'a [Value], EvalError> {
    match arg {
        Value::List(items, _) | Value::Vector(items, _) => Ok(items),
        Value::Nil => Ok(&[]),
        other => Err(EvalError::type_error(function, "sequence", other, position)),
    }
}

#[cfg(not(feature = "float"))]
fn to_index(n: Num) -> Option<usize> {
    usize::try_from(n).ok()
}

// Float indices floor
#[cfg(feature = "float")]
fn to_index(n: Num) -> Option<usize> {
    if n.is_finite() && n >= 0.0 {
        Some(n.floor() as usize)
    } else {
        None
    }
}

/// Creates a new list containing the given elements in order
pub fn builtin_list(args: &[Value]) -> Result<Value, EvalError> {
    Ok(Value::list(args.to_vec()))
}

/// Creates a new vector containing the given elements in order
pub fn builtin_vector(args: &[Value]) -> Result<Value, EvalError> {
    Ok(Value::vector(args.to_vec()))
}

/// Constructs a new list by prepending elem to a sequence
pub fn builtin_cons(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 2 {
        return Err(EvalError::arity_error("cons", ARITY_TWO, args.len()));
    }
    let mut result = vec![args[0].clone()];
    result.extend(seq_arg("cons", &args[1], 2)?.iter().cloned());
    Ok(Value::list(result))
}

/// Concatenates any number of sequences into one list
pub fn builtin_concat(args: &[Value]) -> Result<Value, EvalError> {
    let mut result = Vec::new();
    for (i, arg) in args.iter().enumerate() {
        result.extend(seq_arg("concat", arg, i + 1)?.iter().cloned());
    }
    Ok(Value::list(result))
}

/// Converts a sequence into a vector
pub fn builtin_vec(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::arity_error("vec", ARITY_ONE, args.len()));
    }
    Ok(Value::vector(seq_arg("vec", &args[0], 1)?.to_vec()))
}

/// Returns the first element of a sequence, or nil when empty
pub fn builtin_first(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::arity_error("first", ARITY_ONE, args.len()));
    }
    Ok(seq_arg("first", &args[0], 1)?
        .first()
        .cloned()
        .unwrap_or(Value::Nil))
}

/// Returns all elements but the first as a list; empty and nil give the
/// empty list
pub fn builtin_rest(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::arity_error("rest", ARITY_ONE, args.len()));
    }
    let items = seq_arg("rest", &args[0], 1)?;
    if items.is_empty() {
        Ok(Value::list(vec![]))
    } else {
        Ok(Value::list(items[1..].to_vec()))
    }
}

/// Indexes into a sequence, raising when out of bounds
pub fn builtin_nth(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 2 {
        return Err(EvalError::arity_error("nth", ARITY_TWO, args.len()));
    }
    let items = seq_arg("nth", &args[0], 1)?;
    let raw = match &args[1] {
        Value::Number(n) => *n,
        other => return Err(EvalError::type_error("nth", "number", other, 2)),
    };
    to_index(raw)
        .and_then(|i| items.get(i))
        .cloned()
        .ok_or_else(|| {
            EvalError::runtime_error(
                "nth",
                format!("index {} out of range", crate::printer::pr_str(&args[1], true)),
            )
        })
}

/// Number of elements in a sequence; nil counts as 0
pub fn builtin_count(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::arity_error("count", ARITY_ONE, args.len()));
    }
    let items = seq_arg("count", &args[0], 1)?;
    Ok(Value::Number(items.len() as Num))
}

/// Tests whether a sequence is empty; nil is empty
pub fn builtin_empty_q(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::arity_error("empty?", ARITY_ONE, args.len()));
    }
    Ok(Value::Bool(seq_arg("empty?", &args[0], 1)?.is_empty()))
}

/// Normalizes a collection to a list: nil and empty collections become
/// nil, strings become lists of one-character strings
pub fn builtin_seq(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::arity_error("seq", ARITY_ONE, args.len()));
    }
    match &args[0] {
        Value::Nil => Ok(Value::Nil),
        Value::Str(s) if s.is_empty() => Ok(Value::Nil),
        Value::Str(s) => Ok(Value::list(
            s.chars().map(|c| Value::string(c.to_string())).collect(),
        )),
        Value::List(items, _) | Value::Vector(items, _) => {
            if items.is_empty() {
                Ok(Value::Nil)
            } else {
                Ok(Value::list(items.clone()))
            }
        }
        other => Err(EvalError::type_error(
            "seq",
            "sequence or string",
            other,
            1,
        )),
    }
}

/// Adds elements to a collection: lists prepend one by one, vectors append
pub fn builtin_conj(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() < 2 {
        return Err(EvalError::arity_error("conj", ARITY_AT_LEAST_TWO, args.len()));
    }
    match &args[0] {
        Value::List(items, _) => {
            let mut result = items.clone();
            for arg in &args[1..] {
                result.insert(0, arg.clone());
            }
            Ok(Value::list(result))
        }
        Value::Vector(items, _) => {
            let mut result = items.clone();
            result.extend(args[1..].iter().cloned());
            Ok(Value::vector(result))
        }
        other => Err(EvalError::type_error("conj", "list or vector", other, 1)),
    }
}

/// Register all sequence builtins in the environment
pub fn register(env: &Rc<Environment>) {
    env.set("list".to_string(), Value::native("list", builtin_list));
    env.set(
        "vector".to_string(),
        Value::native("vector", builtin_vector),
    );
    env.set("cons".to_string(), Value::native("cons", builtin_cons));
    env.set(
        "concat".to_string(),
        Value::native("concat", builtin_concat),
    );
    env.set("vec".to_string(), Value::native("vec", builtin_vec));
    env.set("first".to_string(), Value::native("first", builtin_first));
    env.set("rest".to_string(), Value::native("rest", builtin_rest));
    env.set("nth".to_string(), Value::native("nth", builtin_nth));
    env.set("count".to_string(), Value::native("count", builtin_count));
    env.set(
        "empty?".to_string(),
        Value::native("empty?", builtin_empty_q),
    );
    env.set("seq".to_string(), Value::native("seq", builtin_seq));
    env.set("conj".to_string(), Value::native("conj", builtin_conj));
}

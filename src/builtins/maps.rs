//! Hash-map operations: hash-map, assoc, dissoc, get, contains?, keys, vals
//!
//! Keys are strings or keywords; the two live in disjoint key spaces. All
//! updates return a new map, the original is not modified.

use crate::env::Environment;
use crate::error::{EvalError, ARITY_AT_LEAST_ONE, ARITY_ONE, ARITY_TWO};
use crate::value::{MapKey, Value};
use std::collections::HashMap;
use std::rc::Rc;

fn as_key(function: &str, arg: &Value, position: usize) -> Result<MapKey, EvalError> {
    MapKey::from_value(arg)
        .ok_or_else(|| EvalError::type_error(function, "string or keyword", arg, position))
}

/// Builds a map from alternating keys and values
pub fn builtin_hash_map(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() % 2 != 0 {
        return Err(EvalError::runtime_error(
            "hash-map",
            "expected an even number of key/value arguments",
        ));
    }
    let mut entries = HashMap::with_capacity(args.len() / 2);
    for (i, pair) in args.chunks(2).enumerate() {
        entries.insert(as_key("hash-map", &pair[0], i * 2 + 1)?, pair[1].clone());
    }
    Ok(Value::map(entries))
}

/// Returns a new map with the given keys set
pub fn builtin_assoc(args: &[Value]) -> Result<Value, EvalError> {
    if args.is_empty() {
        return Err(EvalError::arity_error("assoc", ARITY_AT_LEAST_ONE, 0));
    }
    let mut entries = match &args[0] {
        Value::Map(entries, _) => entries.clone(),
        other => return Err(EvalError::type_error("assoc", "map", other, 1)),
    };
    if (args.len() - 1) % 2 != 0 {
        return Err(EvalError::runtime_error(
            "assoc",
            "expected an even number of key/value arguments",
        ));
    }
    for (i, pair) in args[1..].chunks(2).enumerate() {
        entries.insert(as_key("assoc", &pair[0], i * 2 + 2)?, pair[1].clone());
    }
    Ok(Value::map(entries))
}

/// Returns a new map with the given keys removed
pub fn builtin_dissoc(args: &[Value]) -> Result<Value, EvalError> {
    if args.is_empty() {
        return Err(EvalError::arity_error("dissoc", ARITY_AT_LEAST_ONE, 0));
    }
    let mut entries = match &args[0] {
        Value::Map(entries, _) => entries.clone(),
        other => return Err(EvalError::type_error("dissoc", "map", other, 1)),
    };
    for (i, arg) in args[1..].iter().enumerate() {
        entries.remove(&as_key("dissoc", arg, i + 2)?);
    }
    Ok(Value::map(entries))
}

/// Looks a key up; missing keys and nil maps give nil
pub fn builtin_get(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 2 {
        return Err(EvalError::arity_error("get", ARITY_TWO, args.len()));
    }
    let entries = match &args[0] {
        Value::Map(entries, _) => entries,
        Value::Nil => return Ok(Value::Nil),
        other => return Err(EvalError::type_error("get", "map", other, 1)),
    };
    Ok(MapKey::from_value(&args[1])
        .and_then(|key| entries.get(&key).cloned())
        .unwrap_or(Value::Nil))
}

/// Tests whether a map contains a key
pub fn builtin_contains_q(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 2 {
        return Err(EvalError::arity_error("contains?", ARITY_TWO, args.len()));
    }
    let entries = match &args[0] {
        Value::Map(entries, _) => entries,
        other => return Err(EvalError::type_error("contains?", "map", other, 1)),
    };
    Ok(Value::Bool(
        MapKey::from_value(&args[1])
            .map(|key| entries.contains_key(&key))
            .unwrap_or(false),
    ))
}

/// All keys of a map as a list
pub fn builtin_keys(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::arity_error("keys", ARITY_ONE, args.len()));
    }
    let entries = match &args[0] {
        Value::Map(entries, _) => entries,
        other => return Err(EvalError::type_error("keys", "map", other, 1)),
    };
    // Sort for consistent ordering
    let mut keys: Vec<_> = entries.keys().collect();
    keys.sort();
    Ok(Value::list(keys.into_iter().map(|k| k.to_value()).collect()))
}

/// All values of a map as a list, in key order
pub fn builtin_vals(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::arity_error("vals", ARITY_ONE, args.len()));
    }
    let entries = match &args[0] {
        Value::Map(entries, _) => entries,
        other => return Err(EvalError::type_error("vals", "map", other, 1)),
    };
    let mut sorted: Vec<_> = entries.iter().collect();
    sorted.sort_by_key(|(k, _)| (*k).clone());
    Ok(Value::list(
        sorted.into_iter().map(|(_, v)| v.clone()).collect(),
    ))
}

/// Register all map builtins in the environment
pub fn register(env: &Rc<Environment>) {
    env.set(
        "hash-map".to_string(),
        Value::native("hash-map", builtin_hash_map),
    );
    env.set("assoc".to_string(), Value::native("assoc", builtin_assoc));
    env.set(
        "dissoc".to_string(),
        Value::native("dissoc", builtin_dissoc),
    );
    env.set("get".to_string(), Value::native("get", builtin_get));
    env.set(
        "contains?".to_string(),
        Value::native("contains?", builtin_contains_q),
    );
    env.set("keys".to_string(), Value::native("keys", builtin_keys));
    env.set("vals".to_string(), Value::native("vals", builtin_vals));
}

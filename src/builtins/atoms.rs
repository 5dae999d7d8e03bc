//! Atom operations: atom, atom?, deref, reset!, swap!
//!
//! Atoms are the only user-visible mutable cells. Mutation is in place
//! and immediately visible to every holder; equality between atoms is
//! reference identity.

use crate::env::Environment;
use crate::error::{EvalError, ARITY_AT_LEAST_TWO, ARITY_ONE, ARITY_TWO};
use crate::eval;
use crate::value::Value;
use std::rc::Rc;

/// Creates a new atom holding the given value
pub fn builtin_atom(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::arity_error("atom", ARITY_ONE, args.len()));
    }
    Ok(Value::atom(args[0].clone()))
}

pub fn builtin_atom_p(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::arity_error("atom?", ARITY_ONE, args.len()));
    }
    Ok(Value::Bool(matches!(args[0], Value::Atom(_))))
}

/// Returns the value an atom currently holds
pub fn builtin_deref(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::arity_error("deref", ARITY_ONE, args.len()));
    }
    match &args[0] {
        Value::Atom(cell) => Ok(cell.borrow().clone()),
        other => Err(EvalError::type_error("deref", "atom", other, 1)),
    }
}

/// Replaces an atom's value, returning the new value
pub fn builtin_reset(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 2 {
        return Err(EvalError::arity_error("reset!", ARITY_TWO, args.len()));
    }
    match &args[0] {
        Value::Atom(cell) => {
            *cell.borrow_mut() = args[1].clone();
            Ok(args[1].clone())
        }
        other => Err(EvalError::type_error("reset!", "atom", other, 1)),
    }
}

/// Applies a callable to the atom's value and any extra arguments, stores
/// the result, and returns it. Any callable works, closures included.
pub fn builtin_swap(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() < 2 {
        return Err(EvalError::arity_error("swap!", ARITY_AT_LEAST_TWO, args.len()));
    }
    let cell = match &args[0] {
        Value::Atom(cell) => cell,
        other => return Err(EvalError::type_error("swap!", "atom", other, 1)),
    };

    // read, apply, write; the borrow ends before the callable runs so the
    // function may itself deref the atom
    let mut call_args = vec![cell.borrow().clone()];
    call_args.extend(args[2..].iter().cloned());
    let new_value = eval::apply_function(&args[1], &call_args)?;
    *cell.borrow_mut() = new_value.clone();
    Ok(new_value)
}

/// Register all atom builtins in the environment
pub fn register(env: &Rc<Environment>) {
    env.set("atom".to_string(), Value::native("atom", builtin_atom));
    env.set("atom?".to_string(), Value::native("atom?", builtin_atom_p));
    env.set("deref".to_string(), Value::native("deref", builtin_deref));
    env.set("reset!".to_string(), Value::native("reset!", builtin_reset));
    env.set("swap!".to_string(), Value::native("swap!", builtin_swap));
}

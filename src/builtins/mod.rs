//! # Built-in Functions Module
//!
//! Core built-in functions for the interpreter, organized by category.
//!
//! ## Categories
//!
//! - **[arithmetic]**: +, -, *, / - Numeric operations
//! - **[comparison]**: =, <, >, <=, >= - Value comparisons
//! - **[predicates]**: nil?, true?, false?, symbol?, string?, number?,
//!   keyword?, list?, vector?, sequential?, map?, fn?, macro?, type
//! - **[sequences]**: list, vector, cons, concat, vec, first, rest, nth,
//!   count, empty?, seq, conj - Sequence manipulation
//! - **[maps]**: hash-map, assoc, dissoc, get, contains?, keys, vals
//! - **[atoms]**: atom, atom?, deref, reset!, swap! - Mutable cells
//! - **[strings]**: str, pr-str, prn, println, symbol, keyword,
//!   read-string, slurp - Text and I/O
//! - **[meta]**: meta, with-meta - Meta-data slots
//! - **[system]**: eval, apply, map, throw, time-ms, quit
//!
//! Each category is a sub-module with its own register function that binds
//! the native functions into an environment.

use crate::env::Environment;
use std::rc::Rc;

pub mod arithmetic;
pub mod atoms;
pub mod comparison;
pub mod maps;
pub mod meta;
pub mod predicates;
pub mod sequences;
pub mod strings;
pub mod system;

// Re-export for convenience
pub use arithmetic::register as register_arithmetic;
pub use atoms::register as register_atoms;
pub use comparison::register as register_comparison;
pub use maps::register as register_maps;
pub use meta::register as register_meta;
pub use predicates::register as register_predicates;
pub use sequences::register as register_sequences;
pub use strings::register as register_strings;
pub use system::register as register_system;

/// Register all built-in functions in the environment
pub fn register_builtins(env: &Rc<Environment>) {
    register_arithmetic(env);
    register_comparison(env);
    register_predicates(env);
    register_sequences(env);
    register_maps(env);
    register_atoms(env);
    register_strings(env);
    register_meta(env);
    register_system(env);
}

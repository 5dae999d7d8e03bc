// ABOUTME: Configuration and constants for the interpreter
// This module contains version info, the REPL banner, and host identifiers

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const WELCOME_MESSAGE: &str = "Mallet Lisp v0.1";
pub const WELCOME_SUBTITLE: &str = "A MAL-family Lisp interpreter in Rust";

/// Prompt shown by the interactive REPL.
pub const PROMPT: &str = "user> ";

/// Value bound to `*host-language*` in the root environment.
pub const HOST_LANGUAGE: &str = "mallet";

/// REPL history persisted between sessions.
pub const HISTORY_FILE: &str = ".mallet_history";

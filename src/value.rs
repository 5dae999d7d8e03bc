// ABOUTME: Value types representing Lisp data structures and expressions

use crate::env::Environment;
use crate::error::EvalError;
use crate::printer;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// The single numeric type of the interpreter, selected at compile time.
#[cfg(not(feature = "float"))]
pub type Num = i64;
#[cfg(feature = "float")]
pub type Num = f64;

/// Native builtin functions take evaluated arguments and may raise.
pub type BuiltinFn = fn(&[Value]) -> Result<Value, EvalError>;

/// Meta-data slot carried by lists, vectors, maps, and functions.
/// `None` stands for nil meta, so plain constructions stay allocation-free.
pub type Meta = Option<Rc<Value>>;

#[derive(Debug, Clone)]
pub enum Value {
    Nil,
    Bool(bool),
    Number(Num),
    Str(String),
    Symbol(String),
    Keyword(String), // For :key syntax - keywords are self-evaluating
    List(Vec<Value>, Meta),
    Vector(Vec<Value>, Meta),
    Map(HashMap<MapKey, Value>, Meta),
    Function(Function),
    Atom(Rc<RefCell<Value>>),
}

/// Hash-map keys. Strings and keywords live in disjoint key spaces, so a
/// tagged key rather than an encoded prefix on the name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MapKey {
    Str(String),
    Kw(String),
}

impl MapKey {
    /// Converts a value into a map key; only strings and keywords qualify.
    pub fn from_value(value: &Value) -> Option<MapKey> {
        match value {
            Value::Str(s) => Some(MapKey::Str(s.clone())),
            Value::Keyword(k) => Some(MapKey::Kw(k.clone())),
            _ => None,
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            MapKey::Str(s) => Value::Str(s.clone()),
            MapKey::Kw(k) => Value::Keyword(k.clone()),
        }
    }
}

/// A callable: either a native operation or a closure. Macros are ordinary
/// functions with the `is_macro` flag set by `defmacro!`.
#[derive(Debug, Clone)]
pub struct Function {
    pub kind: FunctionKind,
    pub is_macro: bool,
    pub meta: Meta,
}

#[derive(Debug, Clone)]
pub enum FunctionKind {
    Native(&'static str, BuiltinFn),
    Closure(Rc<Closure>),
}

#[derive(Debug)]
pub struct Closure {
    pub params: Vec<String>,
    pub variadic: Option<String>,
    pub body: Value,
    pub env: Rc<Environment>,
}

impl Value {
    pub fn list(items: Vec<Value>) -> Value {
        Value::List(items, None)
    }

    pub fn vector(items: Vec<Value>) -> Value {
        Value::Vector(items, None)
    }

    pub fn map(entries: HashMap<MapKey, Value>) -> Value {
        Value::Map(entries, None)
    }

    pub fn symbol(name: impl Into<String>) -> Value {
        Value::Symbol(name.into())
    }

    pub fn keyword(name: impl Into<String>) -> Value {
        Value::Keyword(name.into())
    }

    pub fn string(s: impl Into<String>) -> Value {
        Value::Str(s.into())
    }

    pub fn atom(value: Value) -> Value {
        Value::Atom(Rc::new(RefCell::new(value)))
    }

    pub fn native(name: &'static str, func: BuiltinFn) -> Value {
        Value::Function(Function {
            kind: FunctionKind::Native(name, func),
            is_macro: false,
            meta: None,
        })
    }

    pub fn closure(
        params: Vec<String>,
        variadic: Option<String>,
        body: Value,
        env: Rc<Environment>,
    ) -> Value {
        Value::Function(Function {
            kind: FunctionKind::Closure(Rc::new(Closure {
                params,
                variadic,
                body,
                env,
            })),
            is_macro: false,
            meta: None,
        })
    }

    /// Everything is truthy except nil and false.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Nil | Value::Bool(false))
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::Str(_) => "string",
            Value::Symbol(_) => "symbol",
            Value::Keyword(_) => "keyword",
            Value::List(..) => "list",
            Value::Vector(..) => "vector",
            Value::Map(..) => "map",
            Value::Function(f) => {
                if f.is_macro {
                    "macro"
                } else {
                    "function"
                }
            }
            Value::Atom(_) => "atom",
        }
    }

    /// Reads the meta slot; `None` for tags that do not carry one.
    pub fn meta(&self) -> Option<Value> {
        match self {
            Value::List(_, meta) | Value::Vector(_, meta) | Value::Map(_, meta) => {
                Some(meta.as_deref().cloned().unwrap_or(Value::Nil))
            }
            Value::Function(f) => Some(f.meta.as_deref().cloned().unwrap_or(Value::Nil)),
            _ => None,
        }
    }

    /// Returns a fresh copy with the meta slot replaced, leaving the
    /// receiver untouched. `None` for tags that do not carry meta.
    pub fn with_meta(&self, meta: Value) -> Option<Value> {
        let slot = Some(Rc::new(meta));
        match self {
            Value::List(items, _) => Some(Value::List(items.clone(), slot)),
            Value::Vector(items, _) => Some(Value::Vector(items.clone(), slot)),
            Value::Map(entries, _) => Some(Value::Map(entries.clone(), slot)),
            Value::Function(f) => Some(Value::Function(Function {
                kind: f.kind.clone(),
                is_macro: f.is_macro,
                meta: slot,
            })),
            _ => None,
        }
    }
}

/// Deep structural equality. Lists and vectors compare element-wise across
/// each other; atoms compare by reference identity; functions never compare
/// equal. Meta slots are ignored.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Symbol(a), Value::Symbol(b)) => a == b,
            (Value::Keyword(a), Value::Keyword(b)) => a == b,
            (
                Value::List(a, _) | Value::Vector(a, _),
                Value::List(b, _) | Value::Vector(b, _),
            ) => a == b,
            (Value::Map(a, _), Value::Map(b, _)) => a == b,
            (Value::Atom(a), Value::Atom(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", printer::pr_str(self, true))
    }
}

// ABOUTME: Environment module for managing variable bindings and scopes

use crate::error::EvalError;
use crate::value::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Debug)]
pub struct Environment {
    bindings: RefCell<HashMap<String, Value>>,
    outer: Option<Rc<Environment>>,
}

impl Environment {
    /// Creates a new root environment with no outer scope
    pub fn new() -> Rc<Self> {
        Rc::new(Environment {
            bindings: RefCell::new(HashMap::new()),
            outer: None,
        })
    }

    /// Creates a new child environment with an outer scope
    pub fn with_outer(outer: Rc<Environment>) -> Rc<Self> {
        Rc::new(Environment {
            bindings: RefCell::new(HashMap::new()),
            outer: Some(outer),
        })
    }

    /// Inserts or overwrites a binding in THIS frame (doesn't walk the chain)
    pub fn set(&self, name: String, value: Value) {
        self.bindings.borrow_mut().insert(name, value);
    }

    /// Returns the nearest frame containing `name`, walking only `outer`
    pub fn find(self: &Rc<Self>, name: &str) -> Option<Rc<Environment>> {
        if self.bindings.borrow().contains_key(name) {
            return Some(self.clone());
        }
        match &self.outer {
            Some(outer) => outer.find(name),
            None => None,
        }
    }

    /// Looks up a symbol through the nearest frame containing it
    pub fn lookup(self: &Rc<Self>, name: &str) -> Option<Value> {
        self.find(name)
            .and_then(|frame| frame.bindings.borrow().get(name).cloned())
    }

    /// Looks up a symbol, raising on a miss
    pub fn get(self: &Rc<Self>, name: &str) -> Result<Value, EvalError> {
        self.lookup(name)
            .ok_or_else(|| EvalError::SymbolNotFound(name.to_string()))
    }

    /// Creates a child frame binding parameter names to positional
    /// arguments. A variadic tail name binds the remaining actuals as a
    /// list. Arity is checked against the parameter count.
    pub fn bind(
        outer: Rc<Environment>,
        params: &[String],
        variadic: Option<&str>,
        args: &[Value],
    ) -> Result<Rc<Self>, EvalError> {
        match variadic {
            Some(_) if args.len() < params.len() => {
                return Err(EvalError::arity_error(
                    "fn*",
                    format!("at least {}", params.len()),
                    args.len(),
                ));
            }
            None if args.len() != params.len() => {
                return Err(EvalError::arity_error(
                    "fn*",
                    params.len().to_string(),
                    args.len(),
                ));
            }
            _ => {}
        }

        let env = Environment::with_outer(outer);
        for (param, arg) in params.iter().zip(args.iter()) {
            env.set(param.clone(), arg.clone());
        }
        if let Some(rest) = variadic {
            env.set(
                rest.to_string(),
                Value::list(args[params.len()..].to_vec()),
            );
        }
        Ok(env)
    }
}

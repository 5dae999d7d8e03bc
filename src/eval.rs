// ABOUTME: Evaluator module executing value trees with tail call optimization

use crate::env::Environment;
use crate::error::{EvalError, ARITY_ONE, ARITY_ONE_OR_TWO, ARITY_TWO, ARITY_TWO_OR_THREE};
use crate::value::{Function, FunctionKind, Value};
use std::collections::HashMap;
use std::rc::Rc;

/// Head symbols the evaluator intercepts before lookup or argument
/// evaluation. A bare occurrence in value position evaluates to nil and
/// never reaches the environment.
pub const SPECIAL_FORMS: &[&str] = &[
    "def!",
    "let*",
    "do",
    "if",
    "fn*",
    "quote",
    "quasiquote",
    "quasiquoteexpand",
    "macroexpand",
    "defmacro!",
    "try*",
    "catch*",
];

/// Main evaluation function. The loop trampolines on `ast` and `env`
/// instead of recursing for every tail position: `if` branches, `do`'s
/// last form, `let*` and `try*` handler bodies, quasiquote lowering, and
/// closure application all continue the loop.
pub fn eval(mut ast: Value, mut env: Rc<Environment>) -> Result<Value, EvalError> {
    loop {
        ast = macroexpand(ast, &env)?;

        let list = match &ast {
            Value::List(items, _) => {
                if items.is_empty() {
                    return Ok(ast);
                }
                items.clone()
            }
            _ => return eval_ast(&ast, &env),
        };

        if let Value::Symbol(head) = &list[0] {
            match head.as_str() {
                "def!" => {
                    if list.len() != 3 {
                        return Err(EvalError::arity_error("def!", ARITY_TWO, list.len() - 1));
                    }
                    let name = as_symbol(&list[1], "def!", 1)?;
                    let value = eval(list[2].clone(), env.clone())?;
                    env.set(name, value.clone());
                    return Ok(value);
                }
                "let*" => {
                    if list.len() != 3 {
                        return Err(EvalError::arity_error("let*", ARITY_TWO, list.len() - 1));
                    }
                    let binds = seq_items(&list[1], "let*", 1)?.to_vec();
                    if binds.len() % 2 != 0 {
                        return Err(EvalError::runtime_error(
                            "let*",
                            "bindings must come in name/value pairs",
                        ));
                    }
                    let child = Environment::with_outer(env.clone());
                    for pair in binds.chunks(2) {
                        let name = as_symbol(&pair[0], "let*", 1)?;
                        let value = eval(pair[1].clone(), child.clone())?;
                        child.set(name, value);
                    }
                    env = child;
                    ast = list[2].clone();
                    continue;
                }
                "do" => {
                    if list.len() == 1 {
                        return Ok(Value::Nil);
                    }
                    for item in &list[1..list.len() - 1] {
                        eval(item.clone(), env.clone())?;
                    }
                    ast = list[list.len() - 1].clone();
                    continue;
                }
                "if" => {
                    if list.len() < 3 || list.len() > 4 {
                        return Err(EvalError::arity_error(
                            "if",
                            ARITY_TWO_OR_THREE,
                            list.len() - 1,
                        ));
                    }
                    let condition = eval(list[1].clone(), env.clone())?;
                    if condition.is_truthy() {
                        ast = list[2].clone();
                    } else if list.len() == 4 {
                        ast = list[3].clone();
                    } else {
                        return Ok(Value::Nil);
                    }
                    continue;
                }
                "fn*" => {
                    if list.len() != 3 {
                        return Err(EvalError::arity_error("fn*", ARITY_TWO, list.len() - 1));
                    }
                    let (params, variadic) = parse_params(&list[1])?;
                    return Ok(Value::closure(
                        params,
                        variadic,
                        list[2].clone(),
                        env.clone(),
                    ));
                }
                "quote" => {
                    if list.len() != 2 {
                        return Err(EvalError::arity_error("quote", ARITY_ONE, list.len() - 1));
                    }
                    return Ok(list[1].clone());
                }
                "quasiquote" => {
                    if list.len() != 2 {
                        return Err(EvalError::arity_error(
                            "quasiquote",
                            ARITY_ONE,
                            list.len() - 1,
                        ));
                    }
                    ast = quasiquote(&list[1]);
                    continue;
                }
                "quasiquoteexpand" => {
                    if list.len() != 2 {
                        return Err(EvalError::arity_error(
                            "quasiquoteexpand",
                            ARITY_ONE,
                            list.len() - 1,
                        ));
                    }
                    return Ok(quasiquote(&list[1]));
                }
                "macroexpand" => {
                    if list.len() != 2 {
                        return Err(EvalError::arity_error(
                            "macroexpand",
                            ARITY_ONE,
                            list.len() - 1,
                        ));
                    }
                    return macroexpand(list[1].clone(), &env);
                }
                "defmacro!" => {
                    if list.len() != 3 {
                        return Err(EvalError::arity_error(
                            "defmacro!",
                            ARITY_TWO,
                            list.len() - 1,
                        ));
                    }
                    let name = as_symbol(&list[1], "defmacro!", 1)?;
                    match eval(list[2].clone(), env.clone())? {
                        Value::Function(f) => {
                            let mac = Value::Function(Function {
                                kind: f.kind.clone(),
                                is_macro: true,
                                meta: f.meta.clone(),
                            });
                            env.set(name, mac.clone());
                            return Ok(mac);
                        }
                        other => {
                            return Err(EvalError::type_error("defmacro!", "function", &other, 2));
                        }
                    }
                }
                "try*" => {
                    if list.len() < 2 || list.len() > 3 {
                        return Err(EvalError::arity_error(
                            "try*",
                            ARITY_ONE_OR_TWO,
                            list.len() - 1,
                        ));
                    }
                    match eval(list[1].clone(), env.clone()) {
                        Ok(value) => return Ok(value),
                        Err(err) => {
                            if list.len() < 3 {
                                return Err(err);
                            }
                            let (name, handler) = parse_catch(&list[2])?;
                            let child = Environment::with_outer(env.clone());
                            child.set(name, err.payload());
                            env = child;
                            ast = handler;
                            continue;
                        }
                    }
                }
                "catch*" => {
                    return Err(EvalError::runtime_error("catch*", "used outside try*"));
                }
                _ => {}
            }
        }

        // Function application: evaluate every position, then call
        let mut evaluated = Vec::with_capacity(list.len());
        for item in &list {
            evaluated.push(eval(item.clone(), env.clone())?);
        }
        let callee = evaluated.remove(0);
        match callee {
            Value::Function(f) => match f.kind {
                FunctionKind::Native(_, native) => return native(&evaluated),
                FunctionKind::Closure(closure) => {
                    let new_env = Environment::bind(
                        closure.env.clone(),
                        &closure.params,
                        closure.variadic.as_deref(),
                        &evaluated,
                    )?;
                    ast = closure.body.clone();
                    env = new_env;
                }
            },
            other => {
                return Err(match &list[0] {
                    Value::Symbol(name) => EvalError::SymbolNotFound(name.clone()),
                    _ => EvalError::type_error("apply", "function", &other, 0),
                });
            }
        }
    }
}

/// Atomic evaluation: symbols look up, collections evaluate element-wise
/// (map keys preserved verbatim), everything else is itself.
fn eval_ast(ast: &Value, env: &Rc<Environment>) -> Result<Value, EvalError> {
    match ast {
        Value::Symbol(name) => {
            if SPECIAL_FORMS.contains(&name.as_str()) {
                return Ok(Value::Nil);
            }
            env.get(name)
        }
        Value::List(items, _) => {
            let evaluated: Result<Vec<_>, _> = items
                .iter()
                .map(|item| eval(item.clone(), env.clone()))
                .collect();
            Ok(Value::list(evaluated?))
        }
        Value::Vector(items, _) => {
            let evaluated: Result<Vec<_>, _> = items
                .iter()
                .map(|item| eval(item.clone(), env.clone()))
                .collect();
            Ok(Value::vector(evaluated?))
        }
        Value::Map(entries, _) => {
            let mut evaluated = HashMap::with_capacity(entries.len());
            for (key, value) in entries {
                evaluated.insert(key.clone(), eval(value.clone(), env.clone())?);
            }
            Ok(Value::map(evaluated))
        }
        other => Ok(other.clone()),
    }
}

/// Applies any callable to already-evaluated arguments. Used by the
/// builtins that re-enter evaluation (`apply`, `map`, `swap!`) and by
/// macro expansion.
pub fn apply_function(func: &Value, args: &[Value]) -> Result<Value, EvalError> {
    match func {
        Value::Function(f) => match &f.kind {
            FunctionKind::Native(_, native) => native(args),
            FunctionKind::Closure(closure) => {
                let env = Environment::bind(
                    closure.env.clone(),
                    &closure.params,
                    closure.variadic.as_deref(),
                    args,
                )?;
                eval(closure.body.clone(), env)
            }
        },
        other => Err(EvalError::type_error("apply", "function", other, 0)),
    }
}

/// Repeatedly applies the head macro to the unevaluated tail until the
/// form is no longer a macro call.
pub fn macroexpand(mut ast: Value, env: &Rc<Environment>) -> Result<Value, EvalError> {
    loop {
        let call = match &ast {
            Value::List(items, _) => match items.first() {
                Some(Value::Symbol(name)) if !SPECIAL_FORMS.contains(&name.as_str()) => {
                    match env.lookup(name) {
                        Some(Value::Function(f)) if f.is_macro => {
                            Some((f, items[1..].to_vec()))
                        }
                        _ => None,
                    }
                }
                _ => None,
            },
            _ => None,
        };
        match call {
            Some((func, args)) => ast = apply_function(&Value::Function(func), &args)?,
            None => return Ok(ast),
        }
    }
}

/// Lowers a quasiquoted form into cons/concat calls whose evaluation
/// builds the intended structure.
fn quasiquote(ast: &Value) -> Value {
    match ast {
        Value::List(items, _) => {
            if let [Value::Symbol(head), second] = &items[..] {
                if head == "unquote" {
                    return second.clone();
                }
            }
            qq_fold(items)
        }
        Value::Vector(items, _) => Value::list(vec![Value::symbol("vec"), qq_fold(items)]),
        Value::Map(..) | Value::Symbol(_) => {
            Value::list(vec![Value::symbol("quote"), ast.clone()])
        }
        other => other.clone(),
    }
}

fn qq_fold(items: &[Value]) -> Value {
    let mut acc = Value::list(vec![]);
    for element in items.iter().rev() {
        if let Value::List(inner, _) = element {
            if let [Value::Symbol(head), target] = &inner[..] {
                if head == "splice-unquote" {
                    acc = Value::list(vec![Value::symbol("concat"), target.clone(), acc]);
                    continue;
                }
            }
        }
        acc = Value::list(vec![Value::symbol("cons"), quasiquote(element), acc]);
    }
    acc
}

fn as_symbol(form: &Value, function: &str, position: usize) -> Result<String, EvalError> {
    match form {
        Value::Symbol(name) => Ok(name.clone()),
        other => Err(EvalError::type_error(function, "symbol", other, position)),
    }
}

fn seq_items<'a>(
    form: &'a Value,
    function: &str,
    position: usize,
) -> Result<&'a [Value], EvalError> {
    match form {
        Value::List(items, _) | Value::Vector(items, _) => Ok(items),
        other => Err(EvalError::type_error(
            function,
            "list or vector",
            other,
            position,
        )),
    }
}

/// Parameter lists are symbols; a `&` in second-to-last position marks the
/// following name as the variadic tail.
fn parse_params(form: &Value) -> Result<(Vec<String>, Option<String>), EvalError> {
    let items = seq_items(form, "fn*", 1)?;
    let mut names = Vec::with_capacity(items.len());
    for item in items {
        names.push(as_symbol(item, "fn*", 1)?);
    }
    match names.iter().position(|name| name == "&") {
        None => Ok((names, None)),
        Some(pos) if pos + 2 == names.len() => {
            let variadic = names.pop();
            names.pop();
            Ok((names, variadic))
        }
        Some(_) => Err(EvalError::runtime_error(
            "fn*",
            "misplaced & in parameter list",
        )),
    }
}

fn parse_catch(form: &Value) -> Result<(String, Value), EvalError> {
    if let Value::List(items, _) = form {
        if let [Value::Symbol(head), Value::Symbol(name), handler] = &items[..] {
            if head == "catch*" {
                return Ok((name.clone(), handler.clone()));
            }
        }
    }
    Err(EvalError::runtime_error(
        "try*",
        "expected (catch* name handler)",
    ))
}

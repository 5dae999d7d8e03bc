// ABOUTME: Tests for quote, quasiquote, and user-defined macros

use mallet::runtime::Runtime;

fn setup() -> Runtime {
    Runtime::new(vec![]).expect("runtime init failed")
}

fn rep(runtime: &Runtime, line: &str) -> String {
    runtime
        .rep(line)
        .unwrap_or_else(|e| panic!("eval failed for {:?}: {}", line, e))
        .expect("expected a form")
}

#[test]
fn test_quote_forms() {
    let rt = setup();
    assert_eq!(rep(&rt, "(quote abc)"), "abc");
    assert_eq!(rep(&rt, "'(1 2 3)"), "(1 2 3)");
    assert_eq!(rep(&rt, "'(+ 1 (2 3))"), "(+ 1 (2 3))");
    assert_eq!(rep(&rt, "'[1 2]"), "[1 2]");
}

#[test]
fn test_quasiquote_without_unquote_is_quote() {
    let rt = setup();
    assert_eq!(rep(&rt, "`(1 2 3)"), "(1 2 3)");
    assert_eq!(rep(&rt, "`abc"), "abc");
    assert_eq!(rep(&rt, "`{:a 1}"), "{:a 1}");
    assert_eq!(rep(&rt, "`()"), "()");
}

#[test]
fn test_unquote_evaluates_inside_template() {
    let rt = setup();
    rep(&rt, "(def! x 7)");
    assert_eq!(rep(&rt, "`(1 ~x 3)"), "(1 7 3)");
    assert_eq!(rep(&rt, "`(1 ~(+ 1 1) 3)"), "(1 2 3)");
}

#[test]
fn test_splice_unquote() {
    let rt = setup();
    rep(&rt, "(def! xs '(2 3))");
    assert_eq!(rep(&rt, "`(1 ~@xs 4)"), "(1 2 3 4)");
    assert_eq!(rep(&rt, "`(~@xs ~@xs)"), "(2 3 2 3)");
    assert_eq!(rep(&rt, "`(1 ~@(list) 2)"), "(1 2)");
}

#[test]
fn test_quasiquoted_vectors() {
    let rt = setup();
    rep(&rt, "(def! x 2)");
    assert_eq!(rep(&rt, "`[1 ~x 3]"), "[1 2 3]");
    assert_eq!(rep(&rt, "(vector? `[1 ~x])"), "true");
    assert_eq!(rep(&rt, "`[~@(list 1 2) 3]"), "[1 2 3]");
}

#[test]
fn test_quasiquoteexpand_does_not_evaluate() {
    let rt = setup();
    // the lowered form references symbols that are not bound; expansion
    // alone must not raise
    assert_eq!(
        rep(&rt, "(quasiquoteexpand (unbound-a ~unbound-b))"),
        "(cons (quote unbound-a) (cons unbound-b ()))"
    );
}

#[test]
fn test_defmacro_basic() {
    let rt = setup();
    rep(&rt, "(defmacro! identity-m (fn* (x) x))");
    assert_eq!(rep(&rt, "(identity-m (+ 1 2))"), "3");

    rep(&rt, "(defmacro! unless (fn* (pred a b) `(if ~pred ~b ~a)))");
    assert_eq!(rep(&rt, "(unless false 7 8)"), "7");
    assert_eq!(rep(&rt, "(unless true 7 8)"), "8");
}

#[test]
fn test_macro_receives_unevaluated_arguments() {
    let rt = setup();
    // (first-form (boom)) would raise if the argument were evaluated
    rep(&rt, "(defmacro! first-form (fn* (a b) `(quote ~a)))");
    assert_eq!(rep(&rt, "(first-form safe (missing-fn 1))"), "safe");
}

#[test]
fn test_variadic_macro() {
    let rt = setup();
    rep(&rt, "(defmacro! ignore-rest (fn* (a & rest) a))");
    assert_eq!(rep(&rt, "(ignore-rest 1 2 3)"), "1");
}

#[test]
fn test_macroexpand_returns_non_macro_head() {
    let rt = setup();
    rep(&rt, "(defmacro! unless (fn* (pred a b) `(if ~pred ~b ~a)))");
    assert_eq!(rep(&rt, "(macroexpand (unless c x y))"), "(if c y x)");
    // expanding a non-macro form is the identity
    assert_eq!(rep(&rt, "(macroexpand (+ 1 2))"), "(+ 1 2)");
    assert_eq!(rep(&rt, "(macroexpand x)"), "x");
}

#[test]
fn test_macros_expand_through_chains() {
    let rt = setup();
    rep(&rt, "(defmacro! inner (fn* () 42))");
    rep(&rt, "(defmacro! outer (fn* () '(inner)))");
    assert_eq!(rep(&rt, "(outer)"), "42");
    assert_eq!(rep(&rt, "(macroexpand (outer))"), "42");
}

#[test]
fn test_macro_uses_environment_at_expansion() {
    let rt = setup();
    rep(&rt, "(def! two 2)");
    rep(&rt, "(defmacro! add-two (fn* (n) `(+ ~n two)))");
    assert_eq!(rep(&rt, "(add-two 3)"), "5");
}

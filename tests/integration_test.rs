// ABOUTME: End-to-end tests driving the full read-eval-print pipeline

use mallet::runtime::{format_exception, Runtime};

fn setup() -> Runtime {
    Runtime::new(vec![]).expect("runtime init failed")
}

fn rep(runtime: &Runtime, line: &str) -> String {
    runtime
        .rep(line)
        .unwrap_or_else(|e| panic!("eval failed for {:?}: {}", line, e))
        .expect("expected a form")
}

fn rep_err(runtime: &Runtime, line: &str) -> String {
    let err = runtime
        .rep(line)
        .expect_err(&format!("expected {:?} to raise", line));
    format_exception(&err)
}

// ============================================================================
// Arithmetic and comparison
// ============================================================================

#[test]
fn test_arithmetic() {
    let rt = setup();
    assert_eq!(rep(&rt, "(+ 1 2 3)"), "6");
    assert_eq!(rep(&rt, "(+)"), "0");
    assert_eq!(rep(&rt, "(- 10 3 2)"), "5");
    assert_eq!(rep(&rt, "(* 2 3 4)"), "24");
    assert_eq!(rep(&rt, "(*)"), "1");
    assert_eq!(rep(&rt, "(/ 100 2 5)"), "10");
    // single-argument minus is identity in this dialect
    assert_eq!(rep(&rt, "(- 5)"), "5");
    assert_eq!(rep(&rt, "(/ 5)"), "5");
    assert_eq!(rep(&rt, "(* (+ 1 2) 3)"), "9");
}

#[test]
fn test_division_by_zero_raises() {
    let rt = setup();
    assert_eq!(
        rep_err(&rt, "(/ 1 0)"),
        "Exception: \"/: division by zero\""
    );
}

#[test]
fn test_comparisons() {
    let rt = setup();
    assert_eq!(rep(&rt, "(< 1 2)"), "true");
    assert_eq!(rep(&rt, "(<= 2 2)"), "true");
    assert_eq!(rep(&rt, "(> 1 2)"), "false");
    assert_eq!(rep(&rt, "(>= 3 4)"), "false");
    assert_eq!(rep(&rt, "(= 2 (+ 1 1))"), "true");
    assert_eq!(rep(&rt, "(= \"a\" \"a\")"), "true");
    assert_eq!(rep(&rt, "(= :a \"a\")"), "false");
    assert_eq!(rep(&rt, "(= nil nil)"), "true");
}

#[test]
fn test_list_vector_equality_and_predicates() {
    let rt = setup();
    assert_eq!(rep(&rt, "(= '(1 2 3) [1 2 3])"), "true");
    assert_eq!(rep(&rt, "(= '(1 2) [1 2 3])"), "false");
    assert_eq!(rep(&rt, "(list? [1 2 3])"), "false");
    assert_eq!(rep(&rt, "(list? '(1 2 3))"), "true");
    assert_eq!(rep(&rt, "(vector? [1 2 3])"), "true");
    assert_eq!(rep(&rt, "(sequential? [1 2 3])"), "true");
    assert_eq!(rep(&rt, "(sequential? '(1 2 3))"), "true");
    assert_eq!(rep(&rt, "(sequential? \"abc\")"), "false");
}

// ============================================================================
// Bindings and functions
// ============================================================================

#[test]
fn test_let_star() {
    let rt = setup();
    assert_eq!(rep(&rt, "(let* (a 1 b (+ a 1)) (+ a b))"), "3");
    assert_eq!(rep(&rt, "(let* [c 7] c)"), "7");
}

#[test]
fn test_def_and_closures() {
    let rt = setup();
    assert_eq!(rep(&rt, "(def! double (fn* (x) (* 2 x)))"), "#<function>");
    assert_eq!(rep(&rt, "(double 21)"), "42");
    assert_eq!(rep(&rt, "((fn* (& xs) (count xs)) 1 2 3)"), "3");
}

#[test]
fn test_deep_tail_recursion_does_not_overflow() {
    let rt = setup();
    rep(
        &rt,
        "(def! sum-to (fn* (n acc) (if (= n 0) acc (sum-to (- n 1) (+ acc n)))))",
    );
    assert_eq!(rep(&rt, "(sum-to 100000 0)"), "5000050000");
}

// ============================================================================
// Quoting
// ============================================================================

#[test]
fn test_quasiquote_scenario() {
    let rt = setup();
    assert_eq!(rep(&rt, "(let* (a 1) `(1 ~a 3 ~@(list 4 5)))"), "(1 1 3 4 5)");
}

// ============================================================================
// Atoms
// ============================================================================

#[test]
fn test_atom_swap_scenario() {
    let rt = setup();
    rep(&rt, "(def! a (atom 1))");
    assert_eq!(rep(&rt, "(swap! a (fn* (x y) (+ x y)) 10)"), "11");
    assert_eq!(rep(&rt, "@a"), "11");
    assert_eq!(rep(&rt, "(deref a)"), "11");
    assert_eq!(rep(&rt, "(reset! a 0)"), "0");
    assert_eq!(rep(&rt, "(swap! a + 5)"), "5");
    assert_eq!(rep(&rt, "(atom? a)"), "true");
    assert_eq!(rep(&rt, "(atom? 1)"), "false");
}

#[test]
fn test_atom_identity() {
    let rt = setup();
    assert_eq!(rep(&rt, "(= (atom 1) (atom 1))"), "false");
    rep(&rt, "(def! shared (atom 1))");
    rep(&rt, "(def! alias shared)");
    assert_eq!(rep(&rt, "(= shared alias)"), "true");
    rep(&rt, "(reset! alias 9)");
    assert_eq!(rep(&rt, "@shared"), "9");
}

// ============================================================================
// Exceptions
// ============================================================================

#[test]
fn test_try_catch_map_payload() {
    let rt = setup();
    assert_eq!(
        rep(&rt, "(try* (throw {:msg \"bad\"}) (catch* e (get e :msg)))"),
        "\"bad\""
    );
}

#[test]
fn test_throw_roundtrip_various_payloads() {
    let rt = setup();
    for payload in ["7", "\"s\"", ":kw", "(list 1 2)", "[1 2]", "nil"] {
        let source = format!("(try* (throw {}) (catch* e e))", payload);
        assert_eq!(rep(&rt, &source), rep(&rt, payload));
    }
}

#[test]
fn test_uncaught_exception_formats_readably() {
    let rt = setup();
    assert_eq!(rep_err(&rt, "(throw \"boom\")"), "Exception: \"boom\"");
    assert_eq!(rep_err(&rt, "missing"), "Exception: \"'missing' not found\"");
    assert_eq!(rep_err(&rt, "(throw {:a 1})"), "Exception: {:a 1}");
}

#[test]
fn test_runtime_continues_after_exception() {
    let rt = setup();
    rep_err(&rt, "(throw 1)");
    assert_eq!(rep(&rt, "(+ 1 1)"), "2");
}

// ============================================================================
// Sequences
// ============================================================================

#[test]
fn test_map_over_vector() {
    let rt = setup();
    assert_eq!(rep(&rt, "(map (fn* (x) (* x x)) [1 2 3 4])"), "(1 4 9 16)");
    assert_eq!(rep(&rt, "(map (fn* (x) x) nil)"), "()");
}

#[test]
fn test_sequence_builtins() {
    let rt = setup();
    assert_eq!(rep(&rt, "(cons 1 '(2 3))"), "(1 2 3)");
    assert_eq!(rep(&rt, "(cons 1 [2 3])"), "(1 2 3)");
    assert_eq!(rep(&rt, "(concat '(1 2) [3] nil '(4))"), "(1 2 3 4)");
    assert_eq!(rep(&rt, "(vec '(1 2))"), "[1 2]");
    assert_eq!(rep(&rt, "(first '(1 2))"), "1");
    assert_eq!(rep(&rt, "(first nil)"), "nil");
    assert_eq!(rep(&rt, "(rest '(1 2 3))"), "(2 3)");
    assert_eq!(rep(&rt, "(rest nil)"), "()");
    assert_eq!(rep(&rt, "(rest '())"), "()");
    assert_eq!(rep(&rt, "(nth [10 20 30] 1)"), "20");
    assert_eq!(rep(&rt, "(count '(1 2 3))"), "3");
    assert_eq!(rep(&rt, "(count nil)"), "0");
    assert_eq!(rep(&rt, "(empty? '())"), "true");
    assert_eq!(rep(&rt, "(empty? [1])"), "false");
}

#[test]
fn test_nth_out_of_bounds_raises() {
    let rt = setup();
    assert!(rt.rep("(nth '(1 2) 5)").is_err());
    assert!(rt.rep("(nth '(1 2) -1)").is_err());
}

#[test]
fn test_seq_normalization() {
    let rt = setup();
    assert_eq!(rep(&rt, "(seq nil)"), "nil");
    assert_eq!(rep(&rt, "(seq '())"), "nil");
    assert_eq!(rep(&rt, "(seq [])"), "nil");
    assert_eq!(rep(&rt, "(seq \"\")"), "nil");
    assert_eq!(rep(&rt, "(seq \"abc\")"), "(\"a\" \"b\" \"c\")");
    assert_eq!(rep(&rt, "(seq [1 2])"), "(1 2)");
}

#[test]
fn test_conj_list_prepends_vector_appends() {
    let rt = setup();
    assert_eq!(rep(&rt, "(conj '(1 2) 3 4)"), "(4 3 1 2)");
    assert_eq!(rep(&rt, "(conj [1 2] 3 4)"), "[1 2 3 4]");
}

// ============================================================================
// Maps
// ============================================================================

#[test]
fn test_map_builtins() {
    let rt = setup();
    assert_eq!(rep(&rt, "(hash-map :a 1 :b 2)"), "{:a 1 :b 2}");
    assert_eq!(rep(&rt, "(assoc {:a 1} :b 2)"), "{:a 1 :b 2}");
    assert_eq!(rep(&rt, "(dissoc {:a 1 :b 2} :a)"), "{:b 2}");
    assert_eq!(rep(&rt, "(get {:a 1} :a)"), "1");
    assert_eq!(rep(&rt, "(get {:a 1} :b)"), "nil");
    assert_eq!(rep(&rt, "(get nil :a)"), "nil");
    assert_eq!(rep(&rt, "(contains? {:a 1} :a)"), "true");
    assert_eq!(rep(&rt, "(contains? {:a 1} :b)"), "false");
    assert_eq!(rep(&rt, "(keys {:a 1 :b 2})"), "(:a :b)");
    assert_eq!(rep(&rt, "(vals {:a 1 :b 2})"), "(1 2)");
}

#[test]
fn test_string_and_keyword_keys_are_disjoint() {
    let rt = setup();
    assert_eq!(rep(&rt, "(get {:a 1 \"a\" 2} :a)"), "1");
    assert_eq!(rep(&rt, "(get {:a 1 \"a\" 2} \"a\")"), "2");
    assert_eq!(rep(&rt, "(= {:a 1} {\"a\" 1})"), "false");
}

// ============================================================================
// Strings and reflection
// ============================================================================

#[test]
fn test_str_and_pr_str_modes() {
    let rt = setup();
    assert_eq!(rep(&rt, "(str \"a\" \"b\" 1)"), "\"ab1\"");
    assert_eq!(rep(&rt, "(str '(1 2))"), "\"(1 2)\"");
    assert_eq!(rep(&rt, "(pr-str \"a\" 1)"), "\"\\\"a\\\" 1\"");
    assert_eq!(rep(&rt, "(str)"), "\"\"");
}

#[test]
fn test_symbol_and_keyword_constructors() {
    let rt = setup();
    assert_eq!(rep(&rt, "(symbol \"abc\")"), "abc");
    assert_eq!(rep(&rt, "(keyword \"abc\")"), ":abc");
    assert_eq!(rep(&rt, "(keyword :abc)"), ":abc");
    assert_eq!(rep(&rt, "(symbol? (symbol \"abc\"))"), "true");
    assert_eq!(rep(&rt, "(keyword? (keyword \"abc\"))"), "true");
}

#[test]
fn test_read_string_builtin() {
    let rt = setup();
    assert_eq!(rep(&rt, "(read-string \"(1 2 (3 4))\")"), "(1 2 (3 4))");
    assert_eq!(rep(&rt, "(read-string \"7 ;; comment\")"), "7");
    assert_eq!(rep(&rt, "(read-string \"\")"), "nil");
    assert_eq!(rep(&rt, "(eval (read-string \"(+ 2 3)\"))"), "5");
}

#[test]
fn test_type_reflection() {
    let rt = setup();
    assert_eq!(rep(&rt, "(type 1)"), "\"number\"");
    assert_eq!(rep(&rt, "(type \"s\")"), "\"string\"");
    assert_eq!(rep(&rt, "(type :k)"), "\"keyword\"");
    assert_eq!(rep(&rt, "(type '(1))"), "\"list\"");
    assert_eq!(rep(&rt, "(type [1])"), "\"vector\"");
    assert_eq!(rep(&rt, "(type {})"), "\"map\"");
    assert_eq!(rep(&rt, "(type (fn* (x) x))"), "\"function\"");
    assert_eq!(rep(&rt, "(type (atom 1))"), "\"atom\"");
    assert_eq!(rep(&rt, "(type nil)"), "\"nil\"");
}

#[test]
fn test_predicates() {
    let rt = setup();
    assert_eq!(rep(&rt, "(nil? nil)"), "true");
    assert_eq!(rep(&rt, "(nil? '())"), "false");
    assert_eq!(rep(&rt, "(true? true)"), "true");
    assert_eq!(rep(&rt, "(true? 1)"), "false");
    assert_eq!(rep(&rt, "(false? false)"), "true");
    assert_eq!(rep(&rt, "(number? 7)"), "true");
    assert_eq!(rep(&rt, "(string? \"s\")"), "true");
    assert_eq!(rep(&rt, "(string? :s)"), "false");
    assert_eq!(rep(&rt, "(keyword? :s)"), "true");
    assert_eq!(rep(&rt, "(symbol? 'x)"), "true");
    assert_eq!(rep(&rt, "(map? {})"), "true");
    assert_eq!(rep(&rt, "(fn? +)"), "true");
    assert_eq!(rep(&rt, "(fn? (fn* (x) x))"), "true");
    assert_eq!(rep(&rt, "(macro? +)"), "false");
}

// ============================================================================
// apply / eval / misc
// ============================================================================

#[test]
fn test_apply_flattens_trailing_sequence() {
    let rt = setup();
    assert_eq!(rep(&rt, "(apply + '(1 2 3))"), "6");
    assert_eq!(rep(&rt, "(apply + 1 2 [3 4])"), "10");
    assert_eq!(rep(&rt, "(apply (fn* (a b) (* a b)) '(3 4))"), "12");
    assert_eq!(rep(&rt, "(apply list '())"), "()");
}

#[test]
fn test_eval_runs_in_root_environment() {
    let rt = setup();
    assert_eq!(rep(&rt, "(eval '(+ 1 2))"), "3");
    rep(&rt, "(let* (a 1) (eval '(def! top-level 5)))");
    assert_eq!(rep(&rt, "top-level"), "5");
}

#[test]
fn test_time_ms_is_a_number() {
    let rt = setup();
    assert_eq!(rep(&rt, "(number? (time-ms))"), "true");
    assert_eq!(rep(&rt, "(>= (time-ms) 0)"), "true");
}

// ============================================================================
// Meta-data
// ============================================================================

#[test]
fn test_meta_and_with_meta() {
    let rt = setup();
    assert_eq!(rep(&rt, "(meta '(1 2))"), "nil");
    assert_eq!(rep(&rt, "(meta [1 2])"), "nil");
    assert_eq!(rep(&rt, "(meta {})"), "nil");
    assert_eq!(rep(&rt, "(meta +)"), "nil");
    assert_eq!(rep(&rt, "(meta (with-meta [1 2] {:tag \"x\"}))"), "{:tag \"x\"}");
    assert_eq!(rep(&rt, "(meta (with-meta (fn* (x) x) {:doc \"id\"}))"), "{:doc \"id\"}");
}

#[test]
fn test_with_meta_does_not_touch_original() {
    let rt = setup();
    rep(&rt, "(def! plain [1 2])");
    rep(&rt, "(def! tagged (with-meta plain {:tag 1}))");
    assert_eq!(rep(&rt, "(meta plain)"), "nil");
    assert_eq!(rep(&rt, "(meta tagged)"), "{:tag 1}");
    assert_eq!(rep(&rt, "(= plain tagged)"), "true");
}

#[test]
fn test_meta_reader_macro() {
    let rt = setup();
    assert_eq!(rep(&rt, "(meta ^{:a 1} [1 2])"), "{:a 1}");
}

#[test]
fn test_meta_rejected_on_other_types() {
    let rt = setup();
    assert!(rt.rep("(meta 1)").is_err());
    assert!(rt.rep("(with-meta \"s\" {})").is_err());
    assert!(rt.rep("(with-meta (atom 1) {})").is_err());
}

// ============================================================================
// Reader errors surface as exceptions
// ============================================================================

#[test]
fn test_reader_errors_as_exceptions() {
    let rt = setup();
    assert_eq!(rep_err(&rt, "(1 2"), "Exception: \"unbalanced (\"");
    assert_eq!(rep_err(&rt, ")"), "Exception: \"unmatched )\"");
    assert_eq!(rep_err(&rt, "[1}"), "Exception: \"unmatched }\"");
    assert_eq!(rep_err(&rt, "\"open"), "Exception: \"unbalanced \\\"\"");
}

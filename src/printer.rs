// ABOUTME: Printer module converting values to text in readable and display forms

use crate::value::{Num, Value};

/// Renders a value as text. In readable mode strings are quoted with `\`,
/// `"` and newline escaped so the output reads back as the same value; in
/// display mode string contents are emitted raw.
pub fn pr_str(value: &Value, readably: bool) -> String {
    match value {
        Value::Nil => "nil".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => format_num(*n),
        Value::Str(s) => {
            if readably {
                let mut out = String::with_capacity(s.len() + 2);
                out.push('"');
                for c in s.chars() {
                    match c {
                        '\\' => out.push_str("\\\\"),
                        '"' => out.push_str("\\\""),
                        '\n' => out.push_str("\\n"),
                        other => out.push(other),
                    }
                }
                out.push('"');
                out
            } else {
                s.clone()
            }
        }
        Value::Symbol(s) => s.clone(),
        Value::Keyword(k) => format!(":{}", k),
        Value::List(items, _) => pr_seq(items, readably, "(", ")"),
        Value::Vector(items, _) => pr_seq(items, readably, "[", "]"),
        Value::Map(entries, _) => {
            // Sort by key for consistent display
            let mut sorted: Vec<_> = entries.iter().collect();
            sorted.sort_by_key(|(k, _)| (*k).clone());
            let body: Vec<String> = sorted
                .into_iter()
                .map(|(k, v)| {
                    format!(
                        "{} {}",
                        pr_str(&k.to_value(), readably),
                        pr_str(v, readably)
                    )
                })
                .collect();
            format!("{{{}}}", body.join(" "))
        }
        Value::Function(f) => {
            if f.is_macro {
                "#<macro>".to_string()
            } else {
                "#<function>".to_string()
            }
        }
        Value::Atom(cell) => format!("(atom {})", pr_str(&cell.borrow(), readably)),
    }
}

/// Joins the printed forms of `items` with single spaces between delimiters.
pub fn pr_seq(items: &[Value], readably: bool, open: &str, close: &str) -> String {
    let body: Vec<String> = items.iter().map(|item| pr_str(item, readably)).collect();
    format!("{}{}{}", open, body.join(" "), close)
}

#[cfg(not(feature = "float"))]
fn format_num(n: Num) -> String {
    n.to_string()
}

// Whole floats display without the trailing fraction.
#[cfg(feature = "float")]
fn format_num(n: Num) -> String {
    if n.fract() == 0.0 && n.is_finite() {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

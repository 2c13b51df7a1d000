//! Render-time coercion of resolved values to display text.
use serde_json::{Number, Value};

/// Converts a resolved value into the text placed on the page.
///
/// Strings are used verbatim. Numbers print in their shortest form, so a
/// whole float such as `75000.00` shows as `75000`. `null`
/// becomes the empty string; arrays join their items' display text with
/// `,`; objects are written as compact JSON.
pub fn display_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => display_number(n),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(display_string)
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => value.to_string(),
    }
}

fn display_number(n: &Number) -> String {
    if n.is_i64() || n.is_u64() {
        return n.to_string();
    }
    match n.as_f64() {
        Some(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
        _ => n.to_string(),
    }
}

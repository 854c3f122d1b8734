use serde_json::Value;

use super::{format_scalar, result_of};

/// Print just the key answer value from the output.
///
/// Looks for well-known result fields in order of priority, then falls back
/// to the first field in the result object.
pub fn print_minimal(value: &Value) {
    let result_obj = result_of(value);

    // JSON pointers into the result, most specific first
    let priority_pointers = [
        "/savings_caption",
        "/summary/monthly_payment",
        "/monthly_savings",
        "/balances",
        "/amount",
    ];

    for ptr in &priority_pointers {
        if let Some(val) = result_obj.pointer(ptr) {
            if !val.is_null() {
                println!("{}", format_minimal(val));
                return;
            }
        }
    }

    if let Value::Object(map) = result_obj {
        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, format_minimal(val));
            return;
        }
    }

    println!("{}", format_minimal(result_obj));
}

fn format_minimal(value: &Value) -> String {
    match value {
        Value::Array(arr) => arr.iter().map(format_scalar).collect::<Vec<_>>().join(", "),
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
        _ => format_scalar(value),
    }
}

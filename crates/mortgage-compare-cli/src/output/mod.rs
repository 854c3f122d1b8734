pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use rust_decimal::{Decimal, RoundingStrategy};
use serde_json::{Map, Value};

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// Row arrays worth rendering as their own table, in priority order.
const ROW_POINTERS: [&str; 4] = ["/comparison", "/schedule/entries", "/rows", "/savings/rows"];

/// The `result` member of an output envelope, or the value itself.
pub fn result_of(value: &Value) -> &Value {
    value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value)
}

/// First array of row objects found in `result`, with its name.
pub fn primary_rows(result: &Value) -> Option<(&'static str, &Vec<Value>)> {
    ROW_POINTERS.iter().copied().find_map(|ptr| match result.pointer(ptr) {
        Some(Value::Array(rows)) => Some((&ptr[1..], rows)),
        _ => None,
    })
}

/// Parallel series keyed by a `labels` array, e.g. year-end balances.
///
/// Returns the header and one row per label.
pub fn label_series(result: &Value) -> Option<(Vec<String>, Vec<Vec<String>>)> {
    let map = result.as_object()?;
    let labels = map.get("labels")?.as_array()?;
    let series: Vec<(&String, &Vec<Value>)> = map
        .iter()
        .filter(|(k, _)| k.as_str() != "labels")
        .filter_map(|(k, v)| v.as_array().map(|a| (k, a)))
        .filter(|(_, a)| a.len() == labels.len())
        .collect();

    let mut header = vec!["label".to_string()];
    header.extend(series.iter().map(|(k, _)| k.to_string()));
    let rows = labels
        .iter()
        .enumerate()
        .map(|(i, label)| {
            let mut row = vec![format_scalar(label)];
            row.extend(series.iter().map(|(_, a)| format_scalar(&a[i])));
            row
        })
        .collect();
    Some((header, rows))
}

/// Flatten nested objects into dotted keys. Arrays of scalars are joined;
/// arrays of objects are summarised by their length.
pub fn flatten(prefix: &str, value: &Value, out: &mut Vec<(String, String)>) {
    match value {
        Value::Object(map) => flatten_map(prefix, map, out),
        Value::Array(arr) if arr.iter().any(Value::is_object) => {
            out.push((prefix.to_string(), format!("[{} rows]", arr.len())));
        }
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(format_scalar).collect();
            out.push((prefix.to_string(), items.join(", ")));
        }
        _ => out.push((prefix.to_string(), format_scalar(value))),
    }
}

fn flatten_map(prefix: &str, map: &Map<String, Value>, out: &mut Vec<(String, String)>) {
    for (key, val) in map {
        let name = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        flatten(&name, val, out);
    }
}

/// Render a scalar. Decimal strings are rounded to cents for display.
pub fn format_scalar(value: &Value) -> String {
    match value {
        Value::String(s) => round_decimal_string(s),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}

fn round_decimal_string(s: &str) -> String {
    match s.parse::<Decimal>() {
        Ok(d) if d.scale() > 2 => d
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
            .to_string(),
        _ => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flatten_nested_objects() {
        let mut out = Vec::new();
        flatten(
            "",
            &json!({"summary": {"total_interest": "278011.6523"}, "rates": ["0", "0.02"]}),
            &mut out,
        );
        assert_eq!(out.len(), 2);
        assert!(out.contains(&("rates".to_string(), "0, 0.02".to_string())));
        assert!(out.contains(&("summary.total_interest".to_string(), "278011.65".to_string())));
    }

    #[test]
    fn test_row_arrays_are_summarised() {
        let mut out = Vec::new();
        flatten("rows", &json!([{"year": 1}, {"year": 2}]), &mut out);
        assert_eq!(out[0].1, "[2 rows]");
    }

    #[test]
    fn test_primary_rows_prefers_comparison() {
        let result = json!({"comparison": [{"x": 1}], "savings": {"rows": [{"y": 2}]}});
        let (name, rows) = primary_rows(&result).unwrap();
        assert_eq!(name, "comparison");
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_label_series_zips_columns() {
        let result = json!({"labels": [2025, 2026], "balances": ["100", "50.125"]});
        let (header, rows) = label_series(&result).unwrap();
        assert_eq!(header, vec!["label", "balances"]);
        assert_eq!(rows[1], vec!["2026", "50.13"]);
    }

    #[test]
    fn test_integer_strings_untouched() {
        assert_eq!(format_scalar(&json!("30")), "30");
        assert_eq!(format_scalar(&json!("Jan 2025")), "Jan 2025");
        assert_eq!(format_scalar(&Value::Null), "");
    }
}

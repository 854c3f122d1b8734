use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::{flatten, format_scalar, label_series, primary_rows, result_of};

/// Format output as tables using the tabled crate.
///
/// Scalars go into a Field/Value table. The main row array (comparison,
/// schedule or projection rows) and any labelled series get their own table.
pub fn print_table(value: &Value) {
    let result = result_of(value);

    let mut fields = Vec::new();
    flatten("", result, &mut fields);
    if !fields.is_empty() {
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        for (key, val) in &fields {
            builder.push_record([key.as_str(), val.as_str()]);
        }
        println!("{}", Table::from(builder));
    }

    if let Some((name, rows)) = primary_rows(result) {
        println!("\n{}:", name);
        print_rows(rows);
    }

    let chart = result.pointer("/balance_chart").unwrap_or(result);
    if let Some((header, rows)) = label_series(chart) {
        println!("\nBalances:");
        let mut builder = Builder::default();
        builder.push_record(header);
        for row in rows {
            builder.push_record(row);
        }
        println!("{}", Table::from(builder));
    }

    if let Some(envelope) = value.as_object() {
        print_envelope_notes(envelope);
    }
}

fn print_rows(rows: &[Value]) {
    if rows.is_empty() {
        println!("(empty)");
        return;
    }

    let flattened: Vec<Vec<(String, String)>> = rows
        .iter()
        .map(|row| {
            let mut cells = Vec::new();
            flatten("", row, &mut cells);
            cells
        })
        .collect();

    // Rows where one side has ended flatten to fewer cells, so take the
    // widest row's keys as the header.
    let Some(widest) = flattened.iter().max_by_key(|cells| cells.len()) else {
        return;
    };
    let headers: Vec<String> = widest.iter().map(|(k, _)| k.clone()).collect();

    let mut builder = Builder::default();
    builder.push_record(headers.clone());
    for cells in &flattened {
        let row: Vec<String> = headers
            .iter()
            .map(|h| {
                cells
                    .iter()
                    .find(|(k, _)| k == h)
                    .map(|(_, v)| v.clone())
                    .unwrap_or_default()
            })
            .collect();
        builder.push_record(row);
    }
    println!("{}", Table::from(builder));
}

fn print_envelope_notes(envelope: &Map<String, Value>) {
    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                println!("  - {}", format_scalar(w));
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

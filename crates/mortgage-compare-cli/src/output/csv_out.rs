use serde_json::Value;
use std::io;

use super::{flatten, label_series, primary_rows, result_of};

/// Write output as CSV to stdout.
///
/// The main row array is written one line per row. Results without one
/// fall back to a labelled series, then to two-column field/value pairs.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());
    let result = result_of(value);

    if let Some((_, rows)) = primary_rows(result) {
        write_rows(&mut wtr, rows);
    } else if let Some((header, rows)) = label_series(result) {
        let _ = wtr.write_record(&header);
        for row in rows {
            let _ = wtr.write_record(&row);
        }
    } else {
        let mut fields = Vec::new();
        flatten("", result, &mut fields);
        let _ = wtr.write_record(["field", "value"]);
        for (key, val) in &fields {
            let _ = wtr.write_record([key.as_str(), val.as_str()]);
        }
    }

    let _ = wtr.flush();
}

fn write_rows(wtr: &mut csv::Writer<io::StdoutLock<'_>>, rows: &[Value]) {
    let flattened: Vec<Vec<(String, String)>> = rows
        .iter()
        .map(|row| {
            let mut cells = Vec::new();
            flatten("", row, &mut cells);
            cells
        })
        .collect();

    let Some(widest) = flattened.iter().max_by_key(|cells| cells.len()) else {
        return;
    };
    let headers: Vec<&str> = widest.iter().map(|(k, _)| k.as_str()).collect();
    let _ = wtr.write_record(&headers);

    for cells in &flattened {
        let row: Vec<&str> = headers
            .iter()
            .map(|h| {
                cells
                    .iter()
                    .find(|(k, _)| k.as_str() == *h)
                    .map_or("", |(_, v)| v.as_str())
            })
            .collect();
        let _ = wtr.write_record(&row);
    }
}

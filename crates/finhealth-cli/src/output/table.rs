use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::{cell, delta_cells, layout, result_of, row_cells, row_headers, Layout};

pub fn print_table(value: &Value) {
    match layout(result_of(value)) {
        Layout::Deltas(deltas) => println!("{}", delta_table(deltas)),
        Layout::Scenarios(scenarios) => {
            for s in scenarios {
                let name = s.get("name").map(cell).unwrap_or_default();
                println!("Scenario: {name}");
                if let Some(Value::Object(deltas)) = s.get("deltas") {
                    println!("{}\n", delta_table(deltas));
                }
            }
        }
        Layout::Rows(rows) if rows.is_empty() => println!("(no rows)"),
        Layout::Rows(rows) => println!("{}", row_table(rows)),
        Layout::Fields(map) => println!("{}", field_table(map)),
        Layout::Scalar(v) => println!("{}", cell(v)),
    }
    print_notes(value);
}

fn delta_table(deltas: &Map<String, Value>) -> Table {
    let mut builder = Builder::default();
    builder.push_record(["Metric", "Base", "Scenario", "Delta"]);
    for (metric, d) in deltas {
        let [base, scenario, delta] = delta_cells(d);
        builder.push_record([metric.clone(), base, scenario, delta]);
    }
    builder.build()
}

fn row_table(rows: &[Value]) -> Table {
    let headers = row_headers(rows);
    let mut builder = Builder::default();
    builder.push_record(headers.clone());
    for row in rows {
        builder.push_record(row_cells(row, &headers));
    }
    builder.build()
}

/// Scalar fields of a result. Nested sections (dimension analyses, regime
/// breakdowns) render as compact JSON.
fn field_table(map: &Map<String, Value>) -> Table {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in map {
        builder.push_record([key.clone(), cell(val)]);
    }
    builder.build()
}

/// Warnings and methodology from the computation envelope, if any.
fn print_notes(value: &Value) {
    let Some(envelope) = value.as_object() else {
        return;
    };
    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings.iter().filter_map(Value::as_str) {
                println!("  - {w}");
            }
        }
    }
    if let Some(Value::String(methodology)) = envelope.get("methodology") {
        println!("\nMethodology: {methodology}");
    }
}

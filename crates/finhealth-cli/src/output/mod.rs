pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use serde_json::{Map, Value};

use crate::OutputFormat;

/// Write `value` to stdout in the requested format.
pub fn format_output(format: &OutputFormat, value: &Value) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        OutputFormat::Json => json::print_json(value)?,
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value)?,
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
    Ok(())
}

/// How a command's result is best laid out in rows.
pub(crate) enum Layout<'a> {
    /// Scenario diff: metric -> {base, scenario, delta}.
    Deltas(&'a Map<String, Value>),
    /// Several named scenarios, each with its own deltas.
    Scenarios(&'a [Value]),
    /// Year-by-year projection rows.
    Rows(&'a [Value]),
    /// Anything else: one row per field.
    Fields(&'a Map<String, Value>),
    Scalar(&'a Value),
}

/// The `result` of a computation envelope, or the value itself when the
/// command printed something bare (retirement breakdown, config, version).
pub(crate) fn result_of(value: &Value) -> &Value {
    value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value)
}

pub(crate) fn layout(result: &Value) -> Layout<'_> {
    match result {
        Value::Array(rows) => Layout::Rows(rows),
        Value::Object(map) => {
            if let Some(Value::Object(deltas)) = map.get("deltas") {
                Layout::Deltas(deltas)
            } else if let Some(Value::Array(scenarios)) = map.get("scenarios") {
                Layout::Scenarios(scenarios)
            } else if let Some(Value::Array(rows)) = map.get("yearly") {
                Layout::Rows(rows)
            } else {
                Layout::Fields(map)
            }
        }
        other => Layout::Scalar(other),
    }
}

/// Column names of a row set, taken from its first object.
pub(crate) fn row_headers(rows: &[Value]) -> Vec<String> {
    match rows.first() {
        Some(Value::Object(first)) => first.keys().cloned().collect(),
        _ => Vec::new(),
    }
}

/// One row's cells in `headers` order.
pub(crate) fn row_cells(row: &Value, headers: &[String]) -> Vec<String> {
    if headers.is_empty() {
        return vec![cell(row)];
    }
    headers
        .iter()
        .map(|h| row.get(h.as_str()).map(cell).unwrap_or_default())
        .collect()
}

/// `[base, scenario, delta]` of one metric.
pub(crate) fn delta_cells(delta: &Value) -> [String; 3] {
    ["base", "scenario", "delta"].map(|k| delta.get(k).map(cell).unwrap_or_default())
}

/// Render a single JSON value as display text. Decimals arrive as strings.
pub(crate) fn cell(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "-".to_string(),
        Value::Array(items) if items.iter().all(|v| !v.is_object()) => {
            items.iter().map(cell).collect::<Vec<_>>().join(", ")
        }
        Value::Array(items) => format!("({} rows)", items.len()),
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}

use serde_json::Value;
use std::io;

use super::{cell, delta_cells, layout, result_of, row_cells, row_headers, Layout};

pub fn print_csv(value: &Value) -> csv::Result<()> {
    write_csv(io::stdout().lock(), value)
}

/// Projections become one record per year, scenario diffs one record per
/// metric, everything else `field,value` pairs.
pub fn write_csv<W: io::Write>(writer: W, value: &Value) -> csv::Result<()> {
    let mut wtr = csv::WriterBuilder::new().flexible(true).from_writer(writer);

    match layout(result_of(value)) {
        Layout::Deltas(deltas) => {
            wtr.write_record(["metric", "base", "scenario", "delta"])?;
            for (metric, d) in deltas {
                let [base, scenario, delta] = delta_cells(d);
                wtr.write_record([
                    metric.as_str(),
                    base.as_str(),
                    scenario.as_str(),
                    delta.as_str(),
                ])?;
            }
        }
        Layout::Scenarios(scenarios) => {
            wtr.write_record(["name", "metric", "base", "scenario", "delta"])?;
            for s in scenarios {
                let name = s.get("name").map(cell).unwrap_or_default();
                if let Some(Value::Object(deltas)) = s.get("deltas") {
                    for (metric, d) in deltas {
                        let [base, scenario, delta] = delta_cells(d);
                        wtr.write_record([
                            name.as_str(),
                            metric.as_str(),
                            base.as_str(),
                            scenario.as_str(),
                            delta.as_str(),
                        ])?;
                    }
                }
            }
        }
        Layout::Rows(rows) => {
            let headers = row_headers(rows);
            if !headers.is_empty() {
                wtr.write_record(&headers)?;
            }
            for row in rows {
                wtr.write_record(row_cells(row, &headers))?;
            }
        }
        Layout::Fields(map) => {
            wtr.write_record(["field", "value"])?;
            for (key, val) in map {
                wtr.write_record([key.as_str(), cell(val).as_str()])?;
            }
        }
        Layout::Scalar(v) => wtr.write_record([cell(v)])?,
    }

    wtr.flush()?;
    Ok(())
}

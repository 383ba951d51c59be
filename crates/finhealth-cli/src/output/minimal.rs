use serde_json::Value;

use super::{cell, delta_cells, layout, result_of, Layout};

/// Headline answer of each command, most specific first.
const HEADLINE_FIELDS: [&str; 8] = [
    "overall_score",
    "recommended_cover",
    "family_savings",
    "recommended",
    "required_monthly_sip",
    "monthly_sip",
    "total_value",
    "version",
];

pub fn print_minimal(value: &Value) {
    for line in headline(value) {
        println!("{line}");
    }
}

/// A single line for most commands; one line per scenario for comparisons.
pub(crate) fn headline(value: &Value) -> Vec<String> {
    let score_move = |delta: Option<&Value>| {
        delta
            .map(|d| {
                let [base, scenario, change] = delta_cells(d);
                format!("{base} -> {scenario} ({change})")
            })
            .unwrap_or_default()
    };

    match layout(result_of(value)) {
        Layout::Deltas(deltas) => vec![score_move(deltas.get("overall_score"))],
        Layout::Scenarios(scenarios) => scenarios
            .iter()
            .map(|s| {
                let name = s.get("name").map(cell).unwrap_or_default();
                let overall = s.get("deltas").and_then(|d| d.get("overall_score"));
                format!("{name}: {}", score_move(overall))
            })
            .collect(),
        Layout::Rows(rows) => rows.last().map(cell).into_iter().collect(),
        Layout::Fields(map) => HEADLINE_FIELDS
            .iter()
            .find_map(|key| map.get(*key).filter(|v| !v.is_null()).map(cell))
            .or_else(|| map.iter().next().map(|(k, v)| format!("{k}: {}", cell(v))))
            .into_iter()
            .collect(),
        Layout::Scalar(v) => vec![cell(v)],
    }
}

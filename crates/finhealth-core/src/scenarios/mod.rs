//! What-if analysis: rescore a modified copy of a plan and diff the results.

pub mod differ;

pub use differ::{compare_scenarios, diff_scenario, NamedScenario, ScenarioDeltas, ScenarioDiff};

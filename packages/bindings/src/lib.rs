use napi::Result as NapiResult;
use napi_derive::napi;
use serde::de::DeserializeOwned;

use finhealth_core::config::EngineConfig;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

fn parse<T: DeserializeOwned>(json: &str) -> NapiResult<T> {
    serde_json::from_str(json).map_err(to_napi_error)
}

/// The supplied configuration, or the built-in FY 2025-26 tables.
fn engine_config(config_json: Option<String>) -> NapiResult<EngineConfig> {
    let config = match config_json {
        Some(json) => parse::<EngineConfig>(&json)?,
        None => EngineConfig::default(),
    };
    config.validate().map_err(to_napi_error)?;
    Ok(config)
}

// ---------------------------------------------------------------------------
// Planning
// ---------------------------------------------------------------------------

#[napi]
pub fn sip_projection(input_json: String) -> NapiResult<String> {
    let input: finhealth_core::planning::goals::SipInput = parse(&input_json)?;
    let output = finhealth_core::planning::goals::sip_projection(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn goal_plan(input_json: String) -> NapiResult<String> {
    let input: finhealth_core::planning::goals::GoalInput = parse(&input_json)?;
    let output = finhealth_core::planning::goals::generic_goal(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn retirement_corpus(input_json: String) -> NapiResult<String> {
    let input: finhealth_core::planning::retirement::RetirementInput = parse(&input_json)?;
    let output = finhealth_core::planning::retirement::retirement_corpus(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn education_corpus(input_json: String, config_json: Option<String>) -> NapiResult<String> {
    let input: finhealth_core::planning::education::EducationInput = parse(&input_json)?;
    let config = engine_config(config_json)?;
    let output = finhealth_core::planning::education::education_corpus(&input, &config.education)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Insurance
// ---------------------------------------------------------------------------

#[napi]
pub fn term_insurance_need(input_json: String, config_json: Option<String>) -> NapiResult<String> {
    let input: finhealth_core::insurance::term::TermInsuranceInput = parse(&input_json)?;
    let config = engine_config(config_json)?;
    let output = finhealth_core::insurance::term::term_insurance_need(&input, &config.insurance.term)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn health_insurance_need(
    input_json: String,
    config_json: Option<String>,
) -> NapiResult<String> {
    let input: finhealth_core::insurance::health::HealthInsuranceInput = parse(&input_json)?;
    let config = engine_config(config_json)?;
    let output =
        finhealth_core::insurance::health::health_insurance_need(&input, &config.insurance.health)
            .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Tax
// ---------------------------------------------------------------------------

#[napi]
pub fn compare_tax_regimes(input_json: String, config_json: Option<String>) -> NapiResult<String> {
    let input: finhealth_core::tax::regime::RegimeComparisonInput = parse(&input_json)?;
    let config = engine_config(config_json)?;
    let output = finhealth_core::tax::regime::compare_regimes(&input, &config.tax)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn income_split_benefit(input_json: String, config_json: Option<String>) -> NapiResult<String> {
    let input: finhealth_core::tax::huf::IncomeSplitInput = parse(&input_json)?;
    let config = engine_config(config_json)?;
    let output = finhealth_core::tax::huf::income_split_benefit(&input, &config.tax)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Scoring and scenarios
// ---------------------------------------------------------------------------

#[napi]
pub fn score_plan(plan_json: String, config_json: Option<String>) -> NapiResult<String> {
    let plan: finhealth_core::scoring::FinancialPlan = parse(&plan_json)?;
    let config = engine_config(config_json)?;
    let output = finhealth_core::scoring::score(&plan, &config).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn diff_scenario(
    plan_json: String,
    deltas_json: String,
    config_json: Option<String>,
) -> NapiResult<String> {
    let plan: finhealth_core::scoring::FinancialPlan = parse(&plan_json)?;
    let deltas: finhealth_core::scenarios::ScenarioDeltas = parse(&deltas_json)?;
    let config = engine_config(config_json)?;
    let output = finhealth_core::scenarios::diff_scenario(&plan, &deltas, &config)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn compare_scenarios(
    plan_json: String,
    scenarios_json: String,
    config_json: Option<String>,
) -> NapiResult<String> {
    let plan: finhealth_core::scoring::FinancialPlan = parse(&plan_json)?;
    let scenarios: Vec<finhealth_core::scenarios::NamedScenario> = parse(&scenarios_json)?;
    let config = engine_config(config_json)?;
    let output = finhealth_core::scenarios::compare_scenarios(&plan, &scenarios, &config)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn default_config() -> NapiResult<String> {
    serde_json::to_string(&EngineConfig::default()).map_err(to_napi_error)
}

use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;
use std::str::FromStr;

use mortgage_compare_core::inputs::ComparisonInput;
use mortgage_compare_core::report::{self, LoanRequest, LumpSumRequest};
use mortgage_compare_core::snapshot::InputSnapshot;
use mortgage_compare_core::{amortization, balance, presentation, types::Side};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

fn parse_amount(raw: &str) -> NapiResult<Decimal> {
    Decimal::from_str(raw.trim()).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Comparison
// ---------------------------------------------------------------------------

#[napi]
pub fn compare_mortgages(input_json: String) -> NapiResult<String> {
    let input: ComparisonInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = report::compare_mortgages(&input);
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn project_savings(input_json: String) -> NapiResult<String> {
    let input: ComparisonInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = report::project_payment_savings(&input);
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Single loan
// ---------------------------------------------------------------------------

#[napi]
pub fn generate_schedule(input_json: String) -> NapiResult<String> {
    let request: LoanRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = report::analyze_loan(&request);
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Bare balance series (no envelope), horizon defaulting to the loan term.
#[napi]
pub fn year_end_balances(input_json: String) -> NapiResult<String> {
    let request: LoanRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let (config, _) = request.scenario.to_loan_config(Side::A);
    let horizon = request.horizon_years.unwrap_or(config.years);
    let balances = balance::year_end_balances(&config, horizon);
    serde_json::to_string(&balances).map_err(to_napi_error)
}

#[napi]
pub fn monthly_payment(principal: String, annual_rate: String, years: u32) -> NapiResult<String> {
    let config = amortization::LoanConfig::new(
        parse_amount(&principal)?,
        parse_amount(&annual_rate)?,
        years,
        0,
        0,
    );
    Ok(config.monthly_payment.to_string())
}

// ---------------------------------------------------------------------------
// Projections
// ---------------------------------------------------------------------------

#[napi]
pub fn project_lump_sum(input_json: String) -> NapiResult<String> {
    let request: LumpSumRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = report::project_lump_sum_growth(&request);
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

#[napi]
pub fn capture_snapshot(input_json: String) -> NapiResult<String> {
    let input: ComparisonInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    InputSnapshot::capture(&input).to_json().map_err(to_napi_error)
}

/// Rebuild inputs from a snapshot, on top of `defaults_json` when given.
#[napi]
pub fn restore_snapshot(snapshot_json: String, defaults_json: Option<String>) -> NapiResult<String> {
    let snapshot = InputSnapshot::from_json(&snapshot_json).map_err(to_napi_error)?;
    let defaults: ComparisonInput = match defaults_json {
        Some(json) => serde_json::from_str(&json).map_err(to_napi_error)?,
        None => ComparisonInput::default(),
    };
    serde_json::to_string(&snapshot.restore(&defaults)).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Presentation
// ---------------------------------------------------------------------------

#[napi]
pub fn format_currency(amount: String) -> NapiResult<String> {
    Ok(presentation::format_currency(parse_amount(&amount)?))
}

#[napi]
pub fn format_currency_precise(amount: String) -> NapiResult<String> {
    Ok(presentation::format_currency_precise(parse_amount(&amount)?))
}

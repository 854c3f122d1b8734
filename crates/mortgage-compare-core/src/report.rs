//! Entry points that wrap the engine in a [`ComputationOutput`] envelope:
//! the full two-scenario recalculation plus single-loan and projection views.

use log::debug;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::amortization::{
    generate_schedule, offset_year, summarize_loan, AmortizationSchedule, LoanConfig, LoanSummary,
};
use crate::balance::{build_balance_chart, year_end_balances, BalanceChart};
use crate::comparison::{build_comparison, ComparisonRow, DiffKind};
use crate::inputs::{ComparisonInput, MortgageInput, DEFAULT_TERM_YEARS};
use crate::investment::{
    lump_sum_projection, project_savings, LumpSumProjection, SavingsProjection, INVESTMENT_RATES,
};
use crate::presentation::{format_percent, savings_caption};
use crate::types::{with_metadata, ComputationOutput, Granularity, Money, Side};

/// Derived figures for one scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioReport {
    pub config: LoanConfig,
    pub summary: LoanSummary,
    /// Total interest over principal for display, e.g. `115.8%`.
    pub interest_ratio: String,
    pub schedule: AmortizationSchedule,
}

/// Everything the comparison view renders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub scenario_a: ScenarioReport,
    pub scenario_b: ScenarioReport,
    pub granularity: Granularity,
    pub diff_kind: DiffKind,
    /// Longer of the two terms, shared by the chart and both projections.
    pub horizon_years: u32,
    pub comparison: Vec<ComparisonRow>,
    pub balance_chart: BalanceChart,
    pub savings: SavingsProjection,
    pub savings_caption: String,
    pub lump_sum: LumpSumProjection,
}

/// A single loan plus the view options for it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoanRequest {
    #[serde(flatten)]
    pub scenario: MortgageInput,
    pub granularity: Granularity,
    /// Years of balances to project. Defaults to the loan term.
    pub horizon_years: Option<u32>,
}

/// Year-end balances of one loan, labelled by calendar year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceProjection {
    pub labels: Vec<i32>,
    pub balances: Vec<Money>,
}

/// A one-off amount to compound over a number of years.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LumpSumRequest {
    pub amount: Money,
    pub horizon_years: u32,
}

impl Default for LumpSumRequest {
    fn default() -> Self {
        LumpSumRequest {
            amount: Decimal::ZERO,
            horizon_years: DEFAULT_TERM_YEARS,
        }
    }
}

/// Recalculate every schedule, comparison and projection for `input`.
pub fn compare_mortgages(input: &ComparisonInput) -> ComputationOutput<ComparisonReport> {
    let start = Instant::now();

    let (config_a, mut warnings) = input.scenario_a.to_loan_config(Side::A);
    let (config_b, warnings_b) = input.scenario_b.to_loan_config(Side::B);
    warnings.extend(warnings_b);

    let horizon_years = config_a.years.max(config_b.years);

    let scenario_a = scenario_report(config_a, input.granularity);
    let scenario_b = scenario_report(config_b, input.granularity);

    let comparison = build_comparison(
        &scenario_a.schedule,
        &scenario_b.schedule,
        input.diff_kind,
        input.granularity,
    );
    let balance_chart = build_balance_chart(&scenario_a.config, &scenario_b.config);
    let savings = project_savings(
        &scenario_a.config,
        &scenario_b.config,
        &INVESTMENT_RATES,
        horizon_years,
    );
    let lump_sum = lump_sum_projection(input.lump_sum, &INVESTMENT_RATES, horizon_years);

    debug!(
        "compared mortgages: rows={} horizon={} warnings={}",
        comparison.len(),
        horizon_years,
        warnings.len()
    );

    let report = ComparisonReport {
        savings_caption: savings_caption(savings.cheaper, savings.monthly_savings),
        scenario_a,
        scenario_b,
        granularity: input.granularity,
        diff_kind: input.diff_kind,
        horizon_years,
        comparison,
        balance_chart,
        savings,
        lump_sum,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    with_metadata(
        "Fixed-rate amortization comparison with monthly-compounded reinvestment",
        input,
        warnings,
        elapsed,
        report,
    )
}

/// Schedule and totals for a single loan.
pub fn analyze_loan(request: &LoanRequest) -> ComputationOutput<ScenarioReport> {
    let start = Instant::now();
    let (config, warnings) = request.scenario.to_loan_config(Side::A);
    let report = scenario_report(config, request.granularity);
    let elapsed = start.elapsed().as_micros() as u64;
    with_metadata(
        "Fixed-rate amortization, interest on the opening monthly balance",
        request,
        warnings,
        elapsed,
        report,
    )
}

/// Year-end balances for a single loan over the requested horizon.
pub fn project_balances(request: &LoanRequest) -> ComputationOutput<BalanceProjection> {
    let start = Instant::now();
    let (config, warnings) = request.scenario.to_loan_config(Side::A);
    let horizon = request.horizon_years.unwrap_or(config.years);
    let projection = BalanceProjection {
        labels: (0..=horizon).map(|y| offset_year(config.start_year, y)).collect(),
        balances: year_end_balances(&config, horizon),
    };
    let elapsed = start.elapsed().as_micros() as u64;
    with_metadata(
        "Year-end balances, carried forward after payoff",
        request,
        warnings,
        elapsed,
        projection,
    )
}

/// Invest the monthly payment difference of the two scenarios.
pub fn project_payment_savings(input: &ComparisonInput) -> ComputationOutput<SavingsProjection> {
    let start = Instant::now();
    let (config_a, mut warnings) = input.scenario_a.to_loan_config(Side::A);
    let (config_b, warnings_b) = input.scenario_b.to_loan_config(Side::B);
    warnings.extend(warnings_b);

    let horizon = config_a.years.max(config_b.years);
    let projection = project_savings(&config_a, &config_b, &INVESTMENT_RATES, horizon);
    let elapsed = start.elapsed().as_micros() as u64;
    with_metadata(
        "Monthly contributions compounded monthly, contribution before interest",
        input,
        warnings,
        elapsed,
        projection,
    )
}

/// Compound a one-off amount across the standard rate ladder.
pub fn project_lump_sum_growth(request: &LumpSumRequest) -> ComputationOutput<LumpSumProjection> {
    let start = Instant::now();
    let mut warnings = Vec::new();
    if request.amount < Decimal::ZERO {
        warnings.push(format!("Negative lump sum {} projected as a debt", request.amount));
    }
    let projection = lump_sum_projection(request.amount, &INVESTMENT_RATES, request.horizon_years);
    let elapsed = start.elapsed().as_micros() as u64;
    with_metadata(
        "Lump sum compounded monthly: amount * (1 + r/12)^(12y)",
        request,
        warnings,
        elapsed,
        projection,
    )
}

fn scenario_report(config: LoanConfig, granularity: Granularity) -> ScenarioReport {
    let summary = summarize_loan(&config);
    ScenarioReport {
        interest_ratio: format_percent(summary.interest_ratio_pct),
        summary,
        schedule: generate_schedule(&config, granularity),
        config,
    }
}

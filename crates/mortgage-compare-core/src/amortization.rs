//! Fixed-rate mortgage amortization.
//!
//! Builds month-by-month or year-by-year schedules of interest, principal,
//! cumulative principal and remaining balance for a level-payment loan with
//! flat monthly compounding. All math in `rust_decimal::Decimal`.

use log::debug;
use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::{Granularity, Money, Rate};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Remaining balance at or below which a loan is considered paid off.
pub const PAYOFF_EPSILON: Decimal = dec!(0.01);

pub const MONTHS_PER_YEAR: u32 = 12;

pub const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A fully derived loan configuration, immutable for one calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanConfig {
    /// Amount financed (home price less down payment).
    pub principal: Money,
    /// Nominal annual rate / 12 (e.g., 0.005 for 6% annual).
    pub monthly_rate: Rate,
    /// Level monthly payment from the annuity formula.
    pub monthly_payment: Money,
    /// Term in months (`years * 12`).
    pub num_payments: u32,
    /// Term in years.
    pub years: u32,
    /// Calendar month of the first payment, 0 = January.
    pub start_month: u32,
    pub start_year: i32,
}

impl LoanConfig {
    /// Derive a configuration from the principal, annual rate and term.
    ///
    /// Negative rates are treated as zero. The monthly payment is computed
    /// once here and never re-derived from a schedule.
    pub fn new(
        principal: Money,
        annual_rate: Rate,
        years: u32,
        start_month: u32,
        start_year: i32,
    ) -> Self {
        let monthly_rate = annual_rate.max(Decimal::ZERO) / Decimal::from(MONTHS_PER_YEAR);
        let num_payments = years.saturating_mul(MONTHS_PER_YEAR);
        LoanConfig {
            principal,
            monthly_rate,
            monthly_payment: monthly_payment(principal, monthly_rate, num_payments),
            num_payments,
            years,
            start_month,
            start_year,
        }
    }
}

/// Period label: a calendar month ("Jan 2025") or a plain year number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PeriodLabel {
    Year(i32),
    Month(String),
}

impl PeriodLabel {
    /// Label of the `month`-th payment (1-based) counted from the start month.
    pub fn calendar_month(start_month: u32, start_year: i32, month: u32) -> Self {
        let offset = start_month.saturating_add(month).saturating_sub(1);
        let name = MONTH_ABBREVIATIONS[(offset % MONTHS_PER_YEAR) as usize];
        let year = offset_year(start_year, offset / MONTHS_PER_YEAR);
        PeriodLabel::Month(format!("{name} {year}"))
    }

    /// Label of the `year`-th loan year (1-based).
    pub fn loan_year(start_year: i32, year: u32) -> Self {
        PeriodLabel::Year(offset_year(start_year, year.saturating_sub(1)))
    }
}

/// Calendar year `years` after `start_year`, saturating at the `i32` range.
pub(crate) fn offset_year(start_year: i32, years: u32) -> i32 {
    start_year.saturating_add(i32::try_from(years).unwrap_or(i32::MAX))
}

impl fmt::Display for PeriodLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodLabel::Year(y) => write!(f, "{y}"),
            PeriodLabel::Month(m) => f.write_str(m),
        }
    }
}

/// A single period in an amortization schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodEntry {
    pub period: PeriodLabel,
    /// Interest paid in this period.
    pub interest: Money,
    /// Principal repaid in this period.
    pub principal: Money,
    /// Principal repaid from the first period up to and including this one.
    pub principal_cumulative: Money,
    /// Remaining balance at the end of the period, never negative.
    pub balance: Money,
}

impl PeriodEntry {
    /// Total cash paid in the period.
    pub fn payment(&self) -> Money {
        self.interest + self.principal
    }
}

/// Ordered schedule for one loan at one granularity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationSchedule {
    pub granularity: Granularity,
    /// Nominal level payment of the loan the schedule was built from.
    pub monthly_payment: Money,
    pub entries: Vec<PeriodEntry>,
}

impl AmortizationSchedule {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&PeriodEntry> {
        self.entries.get(index)
    }

    pub fn total_interest(&self) -> Money {
        self.entries.iter().map(|e| e.interest).sum()
    }

    pub fn total_principal(&self) -> Money {
        self.entries.iter().map(|e| e.principal).sum()
    }
}

/// Headline figures for one loan, based on the nominal payment over the full term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanSummary {
    pub principal: Money,
    pub monthly_payment: Money,
    pub total_payment: Money,
    pub total_interest: Money,
    /// Total interest as a percentage of principal (0 when principal ≤ 0).
    pub interest_ratio_pct: Decimal,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Level monthly payment from the annuity formula.
///
/// Falls back to straight-line `principal / num_payments` for a zero rate,
/// and to the perpetuity limit `principal * r` when `(1 + r)^n` leaves the
/// decimal range.
pub fn monthly_payment(principal: Money, monthly_rate: Rate, num_payments: u32) -> Money {
    if num_payments == 0 {
        return Decimal::ZERO;
    }
    let n = Decimal::from(num_payments);
    if monthly_rate <= Decimal::ZERO {
        return principal / n;
    }

    match (Decimal::ONE + monthly_rate).checked_powu(u64::from(num_payments)) {
        Some(growth) => {
            let annuity_factor = Decimal::ONE - Decimal::ONE / growth;
            if annuity_factor.is_zero() {
                principal / n
            } else {
                principal * monthly_rate / annuity_factor
            }
        }
        None => principal * monthly_rate,
    }
}

/// Generate the amortization schedule of `config` at the given granularity.
///
/// Iteration stops as soon as the balance is effectively paid off or the
/// nominal term is exhausted. Annual entries sum twelve monthly sub-steps.
pub fn generate_schedule(config: &LoanConfig, granularity: Granularity) -> AmortizationSchedule {
    let entries = match granularity {
        Granularity::Monthly => monthly_entries(config),
        Granularity::Annual => annual_entries(config),
    };

    debug!(
        "generated {:?} schedule: principal={} payment={} periods={}",
        granularity,
        config.principal,
        config.monthly_payment,
        entries.len()
    );

    AmortizationSchedule {
        granularity,
        monthly_payment: config.monthly_payment,
        entries,
    }
}

/// Summarise the nominal totals of a loan.
pub fn summarize_loan(config: &LoanConfig) -> LoanSummary {
    let total_payment = config
        .monthly_payment
        .saturating_mul(Decimal::from(config.num_payments));
    let total_interest = total_payment.saturating_sub(config.principal);
    let interest_ratio_pct = if config.principal > Decimal::ZERO {
        total_interest
            .checked_div(config.principal)
            .and_then(|r| r.checked_mul(dec!(100)))
            .unwrap_or(Decimal::MAX)
    } else {
        Decimal::ZERO
    };

    LoanSummary {
        principal: config.principal,
        monthly_payment: config.monthly_payment,
        total_payment,
        total_interest,
        interest_ratio_pct,
    }
}

// ---------------------------------------------------------------------------
// Internals
// ---------------------------------------------------------------------------

/// Interest and principal paid in one month.
#[derive(Debug, Clone, Copy)]
pub(crate) struct MonthStep {
    pub interest: Money,
    pub principal: Money,
}

/// Advance `balance` by one monthly payment.
pub(crate) fn amortize_month(balance: &mut Money, config: &LoanConfig) -> MonthStep {
    let interest = *balance * config.monthly_rate;
    let mut principal = config.monthly_payment - interest;
    if principal > *balance {
        principal = *balance;
    }
    *balance -= principal;
    if *balance < Decimal::ZERO {
        *balance = Decimal::ZERO;
    }
    MonthStep {
        interest,
        principal,
    }
}

/// Run up to twelve monthly steps, stopping early at payoff.
pub(crate) fn amortize_year(balance: &mut Money, config: &LoanConfig) -> MonthStep {
    let mut year = MonthStep {
        interest: Decimal::ZERO,
        principal: Decimal::ZERO,
    };
    for _ in 0..MONTHS_PER_YEAR {
        if *balance <= PAYOFF_EPSILON {
            break;
        }
        let step = amortize_month(balance, config);
        year.interest += step.interest;
        year.principal += step.principal;
    }
    year
}

fn monthly_entries(config: &LoanConfig) -> Vec<PeriodEntry> {
    let mut entries = Vec::with_capacity(config.num_payments as usize);
    let mut balance = config.principal;
    let mut cumulative = Decimal::ZERO;

    for month in 1..=config.num_payments {
        if balance <= PAYOFF_EPSILON {
            break;
        }
        let step = amortize_month(&mut balance, config);
        cumulative += step.principal;

        entries.push(PeriodEntry {
            period: PeriodLabel::calendar_month(config.start_month, config.start_year, month),
            interest: step.interest,
            principal: step.principal,
            principal_cumulative: cumulative,
            balance,
        });
    }

    entries
}

fn annual_entries(config: &LoanConfig) -> Vec<PeriodEntry> {
    let mut entries = Vec::with_capacity(config.years as usize);
    let mut balance = config.principal;
    let mut cumulative = Decimal::ZERO;

    for year in 1..=config.years {
        if balance <= PAYOFF_EPSILON {
            break;
        }
        let step = amortize_year(&mut balance, config);
        cumulative += step.principal;

        entries.push(PeriodEntry {
            period: PeriodLabel::loan_year(config.start_year, year),
            interest: step.interest,
            principal: step.principal,
            principal_cumulative: cumulative,
            balance,
        });
    }

    entries
}

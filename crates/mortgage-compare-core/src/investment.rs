//! Reinvestment projections: monthly payment savings and one-off lump sums,
//! compounded monthly across a fixed ladder of annual rates.

use log::debug;
use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::amortization::{LoanConfig, MONTHS_PER_YEAR};
use crate::types::{Money, Rate, Side};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Annual rates the projections are tabulated at (0% to 16% in 2% steps).
pub const INVESTMENT_RATES: [Rate; 9] = [
    dec!(0),
    dec!(0.02),
    dec!(0.04),
    dec!(0.06),
    dec!(0.08),
    dec!(0.10),
    dec!(0.12),
    dec!(0.14),
    dec!(0.16),
];

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Account values at the end of one year, one per configured rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionRow {
    pub year: u32,
    /// Aligned with the rate list the projection was run with.
    pub balances: Vec<Money>,
}

/// Result of investing the monthly payment difference between two loans.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsProjection {
    /// Absolute difference of the two nominal monthly payments.
    pub monthly_savings: Money,
    /// Side with the lower monthly payment (B on a tie).
    pub cheaper: Side,
    pub rates: Vec<Rate>,
    pub rows: Vec<ProjectionRow>,
}

/// Result of compounding a one-off amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LumpSumProjection {
    pub amount: Money,
    pub rates: Vec<Rate>,
    pub rows: Vec<ProjectionRow>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Invest the monthly payment difference of `a` and `b` at each rate.
///
/// Each month the contribution is added before that month's interest is
/// applied. While both loans run the contribution is the payment
/// difference. Once only one loan runs, the contribution is that loan's
/// full payment unless it was the cheaper loan, in which case it is zero.
/// Totals saturate at `Decimal::MAX` instead of overflowing.
pub fn project_savings(
    a: &LoanConfig,
    b: &LoanConfig,
    rates: &[Rate],
    horizon_years: u32,
) -> SavingsProjection {
    let monthly_savings = (a.monthly_payment - b.monthly_payment).abs();
    let cheaper = if a.monthly_payment < b.monthly_payment {
        Side::A
    } else {
        Side::B
    };
    let monthly_rates: Vec<Rate> = rates.iter().map(|r| monthly_rate(*r)).collect();

    let mut totals = vec![Decimal::ZERO; rates.len()];
    let mut rows = Vec::with_capacity(horizon_years as usize);

    for year in 1..=horizon_years {
        for (total, rate) in totals.iter_mut().zip(&monthly_rates) {
            for month in 0..MONTHS_PER_YEAR {
                let month_number = (year - 1) * MONTHS_PER_YEAR + month + 1;
                let contribution = monthly_contribution(a, b, monthly_savings, month_number);
                *total = total
                    .checked_add(contribution)
                    .and_then(|t| t.checked_mul(Decimal::ONE + rate))
                    .unwrap_or(Decimal::MAX);
            }
        }
        rows.push(ProjectionRow {
            year,
            balances: totals.clone(),
        });
    }

    debug!(
        "savings projection: monthly_savings={} cheaper={} years={}",
        monthly_savings, cheaper, horizon_years
    );

    SavingsProjection {
        monthly_savings,
        cheaper,
        rates: rates.to_vec(),
        rows,
    }
}

/// Compound `amount` monthly at each rate for years `1..=horizon_years`.
///
/// Each row is computed directly as `amount * (1 + r/12)^(12y)`.
pub fn project_lump_sum(amount: Money, rates: &[Rate], horizon_years: u32) -> Vec<ProjectionRow> {
    (1..=horizon_years)
        .map(|year| ProjectionRow {
            year,
            balances: rates
                .iter()
                .map(|r| lump_sum_value(amount, *r, year))
                .collect(),
        })
        .collect()
}

/// Value of `amount` after `year` years at annual `rate` compounded monthly.
///
/// Saturates at `Decimal::MAX` instead of overflowing.
pub fn lump_sum_value(amount: Money, rate: Rate, year: u32) -> Money {
    let months = u64::from(year) * u64::from(MONTHS_PER_YEAR);
    (Decimal::ONE + monthly_rate(rate))
        .checked_powu(months)
        .and_then(|growth| amount.checked_mul(growth))
        .unwrap_or(Decimal::MAX)
}

/// Convenience wrapper bundling the amount and rates with the rows.
pub fn lump_sum_projection(amount: Money, rates: &[Rate], horizon_years: u32) -> LumpSumProjection {
    LumpSumProjection {
        amount,
        rates: rates.to_vec(),
        rows: project_lump_sum(amount, rates, horizon_years),
    }
}

// ---------------------------------------------------------------------------
// Internals
// ---------------------------------------------------------------------------

fn monthly_rate(annual: Rate) -> Rate {
    annual / Decimal::from(MONTHS_PER_YEAR)
}

fn monthly_contribution(
    a: &LoanConfig,
    b: &LoanConfig,
    monthly_savings: Money,
    month_number: u32,
) -> Money {
    let paying_a = month_number <= a.num_payments;
    let paying_b = month_number <= b.num_payments;

    match (paying_a, paying_b) {
        (true, true) => monthly_savings,
        (true, false) if a.monthly_payment < b.monthly_payment => Decimal::ZERO,
        (true, false) => a.monthly_payment,
        (false, true) if b.monthly_payment < a.monthly_payment => Decimal::ZERO,
        (false, true) => b.monthly_payment,
        (false, false) => Decimal::ZERO,
    }
}

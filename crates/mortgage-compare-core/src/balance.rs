//! Year-end balance projection for charting two loans over a shared horizon.

use serde::{Deserialize, Serialize};

use crate::amortization::{amortize_year, offset_year, LoanConfig, PAYOFF_EPSILON};
use crate::types::Money;

/// Two balance series over a common horizon, one point per year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceChart {
    /// Calendar year of each point, anchored on scenario A's start year.
    pub labels: Vec<i32>,
    pub balances_a: Vec<Money>,
    pub balances_b: Vec<Money>,
}

/// Year-end balances for years `0..=horizon_years`.
///
/// Year 0 is the untouched principal. After payoff or past the loan term the
/// last balance carries forward.
pub fn year_end_balances(config: &LoanConfig, horizon_years: u32) -> Vec<Money> {
    let mut balances = Vec::with_capacity(horizon_years as usize + 1);
    let mut balance = config.principal;
    balances.push(balance);

    for year in 1..=horizon_years {
        if year <= config.years && balance > PAYOFF_EPSILON {
            amortize_year(&mut balance, config);
        }
        balances.push(balance);
    }

    balances
}

/// Chart data for two loans over `max(a.years, b.years)`.
pub fn build_balance_chart(a: &LoanConfig, b: &LoanConfig) -> BalanceChart {
    let horizon = a.years.max(b.years);
    BalanceChart {
        labels: (0..=horizon).map(|y| offset_year(a.start_year, y)).collect(),
        balances_a: year_end_balances(a, horizon),
        balances_b: year_end_balances(b, horizon),
    }
}

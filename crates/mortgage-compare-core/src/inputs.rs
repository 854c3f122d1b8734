//! Raw scenario inputs as entered by the user, and their coercion into
//! [`LoanConfig`]s.
//!
//! Nothing here rejects input: out-of-range values are replaced with
//! defaults and reported as warnings.

use chrono::Datelike;
use log::warn;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::amortization::{LoanConfig, MONTHS_PER_YEAR};
use crate::comparison::DiffKind;
use crate::types::{Granularity, Money, Side};

/// Term used when none (or zero) is given.
pub const DEFAULT_TERM_YEARS: u32 = 30;

/// One mortgage scenario as entered in the form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MortgageInput {
    pub home_price: Money,
    pub down_payment: Money,
    pub term_years: u32,
    /// Annual interest rate as a percentage (6.5 = 6.5%).
    pub annual_rate_pct: Decimal,
    /// First payment month, 0 = January.
    pub start_month: u32,
    pub start_year: i32,
}

impl Default for MortgageInput {
    fn default() -> Self {
        let (start_month, start_year) = current_month_and_year();
        MortgageInput {
            home_price: Decimal::ZERO,
            down_payment: Decimal::ZERO,
            term_years: DEFAULT_TERM_YEARS,
            annual_rate_pct: Decimal::ZERO,
            start_month,
            start_year,
        }
    }
}

impl MortgageInput {
    /// Amount financed, before any clamping.
    pub fn principal(&self) -> Money {
        self.home_price.saturating_sub(self.down_payment)
    }

    /// Down payment as a percentage of the home price.
    pub fn down_payment_percent(&self) -> Decimal {
        down_payment_percent(self.home_price, self.down_payment)
    }

    /// Coerce into a [`LoanConfig`], collecting a warning for every
    /// substituted value.
    pub fn to_loan_config(&self, side: Side) -> (LoanConfig, Vec<String>) {
        let mut warnings = Vec::new();

        if self.principal() <= Decimal::ZERO {
            warnings.push(format!(
                "Mortgage {side}: down payment covers the home price; nothing is financed"
            ));
        }

        let years = if self.term_years == 0 {
            warnings.push(format!(
                "Mortgage {side}: loan term of 0 years replaced by {DEFAULT_TERM_YEARS}"
            ));
            DEFAULT_TERM_YEARS
        } else {
            self.term_years
        };

        let rate_pct = if self.annual_rate_pct < Decimal::ZERO {
            warnings.push(format!(
                "Mortgage {side}: negative interest rate {}% treated as 0%",
                self.annual_rate_pct
            ));
            Decimal::ZERO
        } else {
            self.annual_rate_pct
        };

        let start_month = if self.start_month >= MONTHS_PER_YEAR {
            let reduced = self.start_month % MONTHS_PER_YEAR;
            warnings.push(format!(
                "Mortgage {side}: start month {} reduced to {reduced}",
                self.start_month
            ));
            reduced
        } else {
            self.start_month
        };

        for w in &warnings {
            warn!("{w}");
        }

        let config = LoanConfig::new(
            self.principal(),
            rate_pct / dec!(100),
            years,
            start_month,
            self.start_year,
        );
        (config, warnings)
    }
}

/// Everything one recalculation needs: both scenarios, the lump sum and the
/// two view options.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ComparisonInput {
    pub scenario_a: MortgageInput,
    pub scenario_b: MortgageInput,
    pub lump_sum: Money,
    pub granularity: Granularity,
    pub diff_kind: DiffKind,
}

impl ComparisonInput {
    pub fn scenario(&self, side: Side) -> &MortgageInput {
        match side {
            Side::A => &self.scenario_a,
            Side::B => &self.scenario_b,
        }
    }

    pub fn scenario_mut(&mut self, side: Side) -> &mut MortgageInput {
        match side {
            Side::A => &mut self.scenario_a,
            Side::B => &mut self.scenario_b,
        }
    }
}

/// Down payment for a percentage of the price, rounded to a whole unit.
pub fn down_payment_from_percent(home_price: Money, percent: Decimal) -> Money {
    (home_price * percent / dec!(100)).round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Down payment as a percentage of the price. A zero price is treated as 1.
pub fn down_payment_percent(home_price: Money, down_payment: Money) -> Decimal {
    let price = if home_price.is_zero() {
        Decimal::ONE
    } else {
        home_price
    };
    down_payment / price * dec!(100)
}

/// Current local calendar month (0-based) and year.
pub fn current_month_and_year() -> (u32, i32) {
    let today = chrono::Local::now().date_naive();
    (today.month0(), today.year())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(price: Decimal, down: Decimal, years: u32, rate: Decimal) -> MortgageInput {
        MortgageInput {
            home_price: price,
            down_payment: down,
            term_years: years,
            annual_rate_pct: rate,
            start_month: 0,
            start_year: 2025,
        }
    }

    #[test]
    fn test_to_loan_config_standard() {
        let (config, warnings) = input(dec!(300000), dec!(60000), 30, dec!(6)).to_loan_config(Side::A);
        assert!(warnings.is_empty());
        assert_eq!(config.principal, dec!(240000));
        assert_eq!(config.monthly_rate, dec!(0.005));
        assert_eq!(config.num_payments, 360);
    }

    #[test]
    fn test_zero_term_defaults_to_thirty() {
        let (config, warnings) = input(dec!(300000), dec!(60000), 0, dec!(6)).to_loan_config(Side::B);
        assert_eq!(config.years, 30);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].starts_with("Mortgage B"));
    }

    #[test]
    fn test_negative_rate_is_zeroed() {
        let (config, warnings) = input(dec!(120000), dec!(0), 10, dec!(-2)).to_loan_config(Side::A);
        assert_eq!(config.monthly_rate, Decimal::ZERO);
        assert_eq!(config.monthly_payment, dec!(1000));
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_down_payment_over_price_warns() {
        let (config, warnings) = input(dec!(100000), dec!(150000), 30, dec!(6)).to_loan_config(Side::A);
        assert_eq!(config.principal, dec!(-50000));
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_start_month_reduced() {
        let mut raw = input(dec!(100000), dec!(0), 30, dec!(6));
        raw.start_month = 14;
        let (config, warnings) = raw.to_loan_config(Side::A);
        assert_eq!(config.start_month, 2);
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_down_payment_percent_helpers() {
        assert_eq!(down_payment_from_percent(dec!(300000), dec!(20)), dec!(60000));
        assert_eq!(down_payment_from_percent(dec!(333333), dec!(10)), dec!(33333));
        assert_eq!(down_payment_from_percent(dec!(5), dec!(10)), dec!(1));
        assert_eq!(down_payment_percent(dec!(300000), dec!(60000)), dec!(20));
        assert_eq!(down_payment_percent(Decimal::ZERO, dec!(50)), dec!(5000));
    }

    #[test]
    fn test_defaults() {
        let raw = MortgageInput::default();
        assert_eq!(raw.term_years, DEFAULT_TERM_YEARS);
        assert_eq!(raw.home_price, Decimal::ZERO);
        assert!(raw.start_month < 12);

        let parsed: ComparisonInput =
            serde_json::from_str(r#"{"scenario_a": {"home_price": "400000", "annual_rate_pct": "6.5"}}"#)
                .unwrap();
        assert_eq!(parsed.scenario_a.home_price, dec!(400000));
        assert_eq!(parsed.scenario_a.term_years, 30);
        assert_eq!(parsed.scenario_b.home_price, Decimal::ZERO);
        assert_eq!(parsed.granularity, Granularity::Annual);
        assert_eq!(parsed.diff_kind, DiffKind::Balance);
    }
}

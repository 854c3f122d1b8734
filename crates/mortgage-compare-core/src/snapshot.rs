//! Flat key/value snapshot of every raw input field.
//!
//! The storage medium belongs to the caller. The snapshot is written after
//! every recalculation and read once at startup. Values are kept as the
//! strings the user typed. Restoring applies the same coercion the form
//! would: unparsable amounts and rates become 0 and an unparsable or zero
//! term becomes 30.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::inputs::{down_payment_from_percent, ComparisonInput, MortgageInput, DEFAULT_TERM_YEARS};
use crate::types::Side;
use crate::MortgageResult;

/// Key the snapshot is persisted under.
pub const STORAGE_KEY: &str = "mortgageCalculatorData";

const HOME_PRICE: &str = "homePrice";
const DOWN_PAYMENT: &str = "downPayment";
const DOWN_PAYMENT_PERCENT: &str = "downPaymentPercent";
const LOAN_TERM: &str = "loanTerm";
const INTEREST_RATE: &str = "interestRate";
const START_MONTH: &str = "startMonth";
const START_YEAR: &str = "startYear";
const LUMP_SUM_AMOUNT: &str = "lumpSumAmount";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InputSnapshot {
    entries: BTreeMap<String, String>,
}

impl InputSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record every input field of `input`. View flags are not recorded.
    pub fn capture(input: &ComparisonInput) -> Self {
        let mut snapshot = Self::new();
        for side in [Side::A, Side::B] {
            let s = input.scenario(side);
            snapshot.insert(key(HOME_PRICE, side), s.home_price.normalize().to_string());
            snapshot.insert(key(DOWN_PAYMENT, side), s.down_payment.normalize().to_string());
            let mut percent = s
                .down_payment_percent()
                .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
            percent.rescale(1);
            snapshot.insert(key(DOWN_PAYMENT_PERCENT, side), percent.to_string());
            snapshot.insert(key(LOAN_TERM, side), s.term_years.to_string());
            snapshot.insert(key(INTEREST_RATE, side), s.annual_rate_pct.normalize().to_string());
            snapshot.insert(key(START_MONTH, side), s.start_month.to_string());
            snapshot.insert(key(START_YEAR, side), s.start_year.to_string());
        }
        snapshot.insert(LUMP_SUM_AMOUNT.to_string(), input.lump_sum.normalize().to_string());
        snapshot
    }

    /// Rebuild inputs on top of `defaults`.
    ///
    /// The view flags (granularity, diff kind) are not part of the snapshot
    /// and always come from `defaults`. Missing or empty keys keep the
    /// default's value. Present keys are
    /// parsed with coercion. When only the down payment percentage is
    /// present the amount is derived from it.
    pub fn restore(&self, defaults: &ComparisonInput) -> ComparisonInput {
        let mut input = defaults.clone();

        for side in [Side::A, Side::B] {
            let s: &mut MortgageInput = input.scenario_mut(side);

            if let Some(v) = self.value(&key(HOME_PRICE, side)) {
                s.home_price = parse_amount(v);
            }
            if let Some(v) = self.value(&key(DOWN_PAYMENT, side)) {
                s.down_payment = parse_amount(v);
            } else if let Some(v) = self.value(&key(DOWN_PAYMENT_PERCENT, side)) {
                s.down_payment = down_payment_from_percent(s.home_price, parse_amount(v));
            }
            if let Some(v) = self.value(&key(LOAN_TERM, side)) {
                s.term_years = parse_term(v);
            }
            if let Some(v) = self.value(&key(INTEREST_RATE, side)) {
                s.annual_rate_pct = parse_amount(v);
            }
            if let Some(month) = self.value(&key(START_MONTH, side)).and_then(parse_integer) {
                if let Ok(month) = u32::try_from(month) {
                    s.start_month = month;
                }
            }
            if let Some(year) = self.value(&key(START_YEAR, side)).and_then(parse_integer) {
                if let Ok(year) = i32::try_from(year) {
                    s.start_year = year;
                }
            }
        }

        if let Some(v) = self.value(LUMP_SUM_AMOUNT) {
            input.lump_sum = parse_amount(v);
        }

        input
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_json(&self) -> MortgageResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> MortgageResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Non-empty value for `key`.
    fn value(&self, key: &str) -> Option<&str> {
        self.get(key).map(str::trim).filter(|v| !v.is_empty())
    }
}

fn key(field: &str, side: Side) -> String {
    format!("{field}{}", side.suffix())
}

fn parse_amount(raw: &str) -> Decimal {
    raw.trim().parse::<Decimal>().unwrap_or(Decimal::ZERO)
}

/// Integer part of a numeric string (`"30.9"` → 30).
fn parse_integer(raw: &str) -> Option<i64> {
    raw.trim().parse::<Decimal>().ok().and_then(|d| d.trunc().to_i64())
}

fn parse_term(raw: &str) -> u32 {
    parse_integer(raw)
        .and_then(|y| u32::try_from(y).ok())
        .filter(|y| *y > 0)
        .unwrap_or(DEFAULT_TERM_YEARS)
}

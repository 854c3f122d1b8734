//! Period-by-period comparison of two amortization schedules.
//!
//! Rows are aligned by index. Once one schedule has ended its side of the row
//! is `None` (absent, not zero); for diff math an absent side counts as zero.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::amortization::{AmortizationSchedule, PeriodEntry, PeriodLabel, PAYOFF_EPSILON};
use crate::error::MortgageError;
use crate::types::{Granularity, Money};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Which schedule field the per-row diff is taken on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DiffKind {
    #[default]
    Balance,
    Interest,
    Principal,
    PrincipalCumulative,
}

impl DiffKind {
    pub const ALL: [DiffKind; 4] = [
        DiffKind::Balance,
        DiffKind::Interest,
        DiffKind::Principal,
        DiffKind::PrincipalCumulative,
    ];

    /// Identifier used by the UI selector.
    pub fn as_str(self) -> &'static str {
        match self {
            DiffKind::Balance => "balance",
            DiffKind::Interest => "interest",
            DiffKind::Principal => "principal",
            DiffKind::PrincipalCumulative => "principalCumulative",
        }
    }

    fn field(self, entry: &PeriodEntry) -> Money {
        match self {
            DiffKind::Balance => entry.balance,
            DiffKind::Interest => entry.interest,
            DiffKind::Principal => entry.principal,
            DiffKind::PrincipalCumulative => entry.principal_cumulative,
        }
    }
}

impl FromStr for DiffKind {
    type Err = MortgageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DiffKind::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| MortgageError::InvalidInput {
                field: "diff_kind".into(),
                reason: format!(
                    "Unknown diff kind '{s}' (expected balance, interest, principal or principalCumulative)"
                ),
            })
    }
}

/// Sign classification of a diff from A's point of view.
///
/// A positive diff means A is higher, which is disadvantageous to A.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffClass {
    Positive,
    Negative,
    Neutral,
}

impl DiffClass {
    pub fn classify(value: Money) -> Self {
        if value > Decimal::ZERO {
            DiffClass::Negative
        } else if value < Decimal::ZERO {
            DiffClass::Positive
        } else {
            DiffClass::Neutral
        }
    }
}

/// One aligned row of the comparison table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    /// A's label when present, otherwise B's.
    pub period: PeriodLabel,
    pub a: Option<PeriodEntry>,
    pub b: Option<PeriodEntry>,
    /// Cash paid on A in this period.
    pub payment_a: Money,
    /// Cash paid on B in this period.
    pub payment_b: Money,
    pub diff_value: Money,
    pub diff_class: DiffClass,
    /// Running total of `payment_a - payment_b`.
    pub cumulative_payment_diff: Money,
    pub cumulative_payment_class: DiffClass,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Align two schedules and compute the selected diff per row.
pub fn build_comparison(
    schedule_a: &AmortizationSchedule,
    schedule_b: &AmortizationSchedule,
    diff_kind: DiffKind,
    granularity: Granularity,
) -> Vec<ComparisonRow> {
    let rows = schedule_a.len().max(schedule_b.len());
    let mut out = Vec::with_capacity(rows);
    let mut cumulative_payment_diff = Decimal::ZERO;

    for i in 0..rows {
        let a = schedule_a.get(i);
        let b = schedule_b.get(i);
        let Some(period) = a.or(b).map(|e| e.period.clone()) else {
            continue;
        };

        let payment_a = period_payment(schedule_a, i, granularity);
        let payment_b = period_payment(schedule_b, i, granularity);
        cumulative_payment_diff += payment_a - payment_b;

        let field_a = a.map_or(Decimal::ZERO, |e| diff_kind.field(e));
        let field_b = b.map_or(Decimal::ZERO, |e| diff_kind.field(e));
        let diff_value = field_a - field_b;

        out.push(ComparisonRow {
            period,
            a: a.cloned(),
            b: b.cloned(),
            payment_a,
            payment_b,
            diff_value,
            diff_class: DiffClass::classify(diff_value),
            cumulative_payment_diff,
            cumulative_payment_class: DiffClass::classify(cumulative_payment_diff),
        });
    }

    out
}

/// Cash paid on one loan in period `index`.
///
/// Annual rows use the actual interest + principal. Monthly rows use the
/// nominal payment, except the payoff row (actual amount) and any row after
/// payoff (zero).
pub fn period_payment(
    schedule: &AmortizationSchedule,
    index: usize,
    granularity: Granularity,
) -> Money {
    let Some(entry) = schedule.get(index) else {
        return Decimal::ZERO;
    };

    match granularity {
        Granularity::Annual => entry.payment(),
        Granularity::Monthly => {
            let previous = index.checked_sub(1).and_then(|p| schedule.get(p));
            match previous {
                Some(prev) if prev.balance <= PAYOFF_EPSILON => Decimal::ZERO,
                Some(_) if entry.balance <= PAYOFF_EPSILON => entry.payment(),
                _ => schedule.monthly_payment,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amortization::{generate_schedule, LoanConfig};
    use rust_decimal_macros::dec;

    fn entry(label: i32, interest: Money, principal: Money, cum: Money, balance: Money) -> PeriodEntry {
        PeriodEntry {
            period: PeriodLabel::Year(label),
            interest,
            principal,
            principal_cumulative: cum,
            balance,
        }
    }

    fn schedule(entries: Vec<PeriodEntry>, monthly_payment: Money) -> AmortizationSchedule {
        AmortizationSchedule {
            granularity: Granularity::Annual,
            monthly_payment,
            entries,
        }
    }

    #[test]
    fn test_classify_sign_convention() {
        assert_eq!(DiffClass::classify(dec!(12.5)), DiffClass::Negative);
        assert_eq!(DiffClass::classify(dec!(-0.01)), DiffClass::Positive);
        assert_eq!(DiffClass::classify(Decimal::ZERO), DiffClass::Neutral);
    }

    #[test]
    fn test_higher_balance_on_a_is_negative() {
        let a = schedule(vec![entry(2025, dec!(100), dec!(50), dec!(50), dec!(950))], dec!(12.5));
        let b = schedule(vec![entry(2025, dec!(80), dec!(70), dec!(70), dec!(930))], dec!(12.5));
        let rows = build_comparison(&a, &b, DiffKind::Balance, Granularity::Annual);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].diff_value, dec!(20));
        assert_eq!(rows[0].diff_class, DiffClass::Negative);
    }

    #[test]
    fn test_each_diff_kind_selects_its_field() {
        let a = schedule(vec![entry(2025, dec!(100), dec!(50), dec!(60), dec!(950))], dec!(0));
        let b = schedule(vec![entry(2025, dec!(80), dec!(70), dec!(75), dec!(930))], dec!(0));
        let diff = |kind| build_comparison(&a, &b, kind, Granularity::Annual)[0].diff_value;
        assert_eq!(diff(DiffKind::Balance), dec!(20));
        assert_eq!(diff(DiffKind::Interest), dec!(20));
        assert_eq!(diff(DiffKind::Principal), dec!(-20));
        assert_eq!(diff(DiffKind::PrincipalCumulative), dec!(-15));
    }

    #[test]
    fn test_absent_side_is_none_and_counts_as_zero() {
        let a = schedule(
            vec![
                entry(2025, dec!(10), dec!(90), dec!(90), dec!(10)),
                entry(2026, dec!(1), dec!(10), dec!(100), dec!(0)),
            ],
            dec!(8),
        );
        let b = schedule(vec![entry(2025, dec!(5), dec!(95), dec!(95), dec!(5))], dec!(8));
        let rows = build_comparison(&a, &b, DiffKind::PrincipalCumulative, Granularity::Annual);
        assert_eq!(rows.len(), 2);
        assert!(rows[1].a.is_some());
        assert!(rows[1].b.is_none());
        assert_eq!(rows[1].period, PeriodLabel::Year(2026));
        assert_eq!(rows[1].diff_value, dec!(100));
        assert_eq!(rows[1].payment_b, Decimal::ZERO);
    }

    #[test]
    fn test_label_falls_back_to_b() {
        let a = schedule(vec![], dec!(0));
        let b = schedule(vec![entry(2031, dec!(5), dec!(95), dec!(95), dec!(5))], dec!(8));
        let rows = build_comparison(&a, &b, DiffKind::Balance, Granularity::Annual);
        assert_eq!(rows[0].period, PeriodLabel::Year(2031));
        assert_eq!(rows[0].diff_value, dec!(-5));
        assert_eq!(rows[0].diff_class, DiffClass::Positive);
    }

    #[test]
    fn test_cumulative_payment_diff_is_running_total() {
        let a = schedule(
            vec![
                entry(2025, dec!(60), dec!(40), dec!(40), dec!(60)),
                entry(2026, dec!(30), dec!(60), dec!(100), dec!(0)),
            ],
            dec!(0),
        );
        let b = schedule(
            vec![
                entry(2025, dec!(50), dec!(30), dec!(30), dec!(70)),
                entry(2026, dec!(40), dec!(40), dec!(70), dec!(30)),
                entry(2027, dec!(10), dec!(30), dec!(100), dec!(0)),
            ],
            dec!(0),
        );
        let rows = build_comparison(&a, &b, DiffKind::Balance, Granularity::Annual);
        let cum: Vec<Money> = rows.iter().map(|r| r.cumulative_payment_diff).collect();
        // 100-80, then +90-80, then +0-40
        assert_eq!(cum, vec![dec!(20), dec!(30), dec!(-10)]);
        assert_eq!(rows[1].cumulative_payment_class, DiffClass::Negative);
        assert_eq!(rows[2].cumulative_payment_class, DiffClass::Positive);
    }

    #[test]
    fn test_monthly_payment_uses_nominal_then_actual_at_payoff() {
        let monthly = |entries| AmortizationSchedule {
            granularity: Granularity::Monthly,
            monthly_payment: dec!(100),
            entries,
        };
        let s = monthly(vec![
            entry(0, dec!(5), dec!(95), dec!(95), dec!(150)),
            entry(0, dec!(3), dec!(97), dec!(192), dec!(53)),
            entry(0, dec!(1), dec!(53), dec!(245), dec!(0)),
        ]);
        assert_eq!(period_payment(&s, 0, Granularity::Monthly), dec!(100));
        assert_eq!(period_payment(&s, 1, Granularity::Monthly), dec!(100));
        assert_eq!(period_payment(&s, 2, Granularity::Monthly), dec!(54));
        assert_eq!(period_payment(&s, 3, Granularity::Monthly), Decimal::ZERO);
    }

    #[test]
    fn test_monthly_first_row_payoff_uses_nominal() {
        let s = AmortizationSchedule {
            granularity: Granularity::Monthly,
            monthly_payment: dec!(100),
            entries: vec![entry(0, dec!(1), dec!(40), dec!(40), dec!(0))],
        };
        assert_eq!(period_payment(&s, 0, Granularity::Monthly), dec!(100));
    }

    #[test]
    fn test_identical_loans_are_neutral() {
        let config = LoanConfig::new(dec!(240000), dec!(0.06), 30, 0, 2025);
        let a = generate_schedule(&config, Granularity::Monthly);
        let b = generate_schedule(&config, Granularity::Monthly);
        let rows = build_comparison(&a, &b, DiffKind::Interest, Granularity::Monthly);
        assert_eq!(rows.len(), 360);
        assert!(rows.iter().all(|r| r.diff_class == DiffClass::Neutral));
        assert!(rows.iter().all(|r| r.cumulative_payment_diff.is_zero()));
    }

    #[test]
    fn test_shorter_term_loan_pays_more_per_month() {
        let a = LoanConfig::new(dec!(240000), dec!(0.055), 15, 0, 2025);
        let b = LoanConfig::new(dec!(240000), dec!(0.06), 30, 0, 2025);
        let sa = generate_schedule(&a, Granularity::Monthly);
        let sb = generate_schedule(&b, Granularity::Monthly);
        let rows = build_comparison(&sa, &sb, DiffKind::Balance, Granularity::Monthly);
        assert_eq!(rows.len(), 360);
        assert_eq!(rows[0].diff_class, DiffClass::Positive);
        assert_eq!(rows[0].cumulative_payment_class, DiffClass::Negative);
        // After A is paid off only B pays, so the running diff turns in A's favour
        assert!(rows[200].a.is_none());
        assert_eq!(rows[200].payment_a, Decimal::ZERO);
        assert_eq!(rows[359].cumulative_payment_class, DiffClass::Positive);
    }

    #[test]
    fn test_diff_kind_parse() {
        assert_eq!("principalCumulative".parse::<DiffKind>().unwrap(), DiffKind::PrincipalCumulative);
        assert_eq!("Balance".parse::<DiffKind>().unwrap(), DiffKind::Balance);
        assert!("payment".parse::<DiffKind>().is_err());
        assert_eq!(
            serde_json::to_string(&DiffKind::PrincipalCumulative).unwrap(),
            "\"principalCumulative\""
        );
    }
}

use mortgage_compare_core::amortization::{self, LoanConfig, PeriodLabel, PAYOFF_EPSILON};
use mortgage_compare_core::balance;
use mortgage_compare_core::inputs::MortgageInput;
use mortgage_compare_core::types::{Granularity, Side};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn standard_input() -> MortgageInput {
    MortgageInput {
        home_price: dec!(300000),
        down_payment: dec!(60000),
        term_years: 30,
        annual_rate_pct: dec!(6),
        start_month: 0,
        start_year: 2025,
    }
}

// ===========================================================================
// Known-answer scenario
// ===========================================================================

#[test]
fn test_standard_scenario_known_answer() {
    let (config, warnings) = standard_input().to_loan_config(Side::A);
    assert!(warnings.is_empty());
    assert_eq!(config.principal, dec!(240000));
    assert!(
        (config.monthly_payment - dec!(1438.92)).abs() < dec!(0.01),
        "Expected payment ~1438.92, got {}",
        config.monthly_payment
    );

    let schedule = amortization::generate_schedule(&config, Granularity::Monthly);
    let interest = schedule.total_interest();
    assert!(
        (interest - dec!(278011.65)).abs() < dec!(5),
        "Expected total interest ~278011.65, got {}",
        interest
    );
}

#[test]
fn test_standard_scenario_first_month_split() {
    let (config, _) = standard_input().to_loan_config(Side::A);
    let schedule = amortization::generate_schedule(&config, Granularity::Monthly);
    let first = &schedule.entries[0];
    // 240000 * 0.005
    assert_eq!(first.interest, dec!(1200));
    assert!((first.principal - dec!(238.92)).abs() < dec!(0.01));
    assert_eq!(first.period, PeriodLabel::Month("Jan 2025".into()));
}

// ===========================================================================
// Schedule invariants across a grid of loans
// ===========================================================================

#[test]
fn test_schedule_invariants_across_loans() {
    let loans = [
        (dec!(100000), dec!(0.03), 10),
        (dec!(450000), dec!(0.0699), 30),
        (dec!(82000), dec!(0.125), 7),
        (dec!(1250000), dec!(0), 25),
    ];

    for (principal, rate, years) in loans {
        let config = LoanConfig::new(principal, rate, years, 6, 2030);
        let monthly = amortization::generate_schedule(&config, Granularity::Monthly);
        let annual = amortization::generate_schedule(&config, Granularity::Annual);

        let periods = Decimal::from(monthly.len() as u64);
        assert!(
            (monthly.total_principal() - principal).abs() <= PAYOFF_EPSILON * periods,
            "principal sum drifted for {principal} @ {rate}"
        );
        assert!(monthly.len() as u32 <= config.num_payments);
        assert!(annual.len() as u32 <= config.years);

        let mut prev = principal;
        for e in &monthly.entries {
            assert!(e.balance <= prev);
            assert!(e.balance >= Decimal::ZERO);
            prev = e.balance;
        }

        // Year-end balances agree between granularities and with the projector
        let projected = balance::year_end_balances(&config, years);
        for (y, entry) in annual.entries.iter().enumerate() {
            let month_idx = (y + 1) * 12 - 1;
            if let Some(m) = monthly.entries.get(month_idx) {
                assert_eq!(m.balance, entry.balance);
            }
            assert_eq!(projected[y + 1], entry.balance);
        }
    }
}

#[test]
fn test_zero_rate_schedule_has_no_interest() {
    let config = LoanConfig::new(dec!(90000), Decimal::ZERO, 15, 0, 2025);
    assert_eq!(config.monthly_payment, dec!(90000) / dec!(180));
    for granularity in [Granularity::Monthly, Granularity::Annual] {
        let schedule = amortization::generate_schedule(&config, granularity);
        assert_eq!(schedule.total_interest(), Decimal::ZERO);
    }
}

#[test]
fn test_summary_and_schedule_interest_agree_for_full_term() {
    let (config, _) = standard_input().to_loan_config(Side::B);
    let summary = amortization::summarize_loan(&config);
    let schedule = amortization::generate_schedule(&config, Granularity::Annual);
    assert!((summary.total_interest - schedule.total_interest()).abs() < dec!(1));
}

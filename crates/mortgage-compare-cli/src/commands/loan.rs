use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use mortgage_compare_core::inputs::{self, MortgageInput};
use mortgage_compare_core::report::{self, LoanRequest};
use mortgage_compare_core::types::Granularity;

use crate::input;

/// Loan fields for commands that work on a single mortgage
#[derive(Args)]
pub struct LoanFlags {
    /// Home price
    #[arg(long)]
    pub price: Option<Decimal>,

    /// Down payment amount
    #[arg(long, conflicts_with = "down_percent")]
    pub down: Option<Decimal>,

    /// Down payment as a percentage of the home price
    #[arg(long)]
    pub down_percent: Option<Decimal>,

    /// Loan term in years
    #[arg(long)]
    pub years: Option<u32>,

    /// Annual interest rate in percent (6.5 = 6.5%)
    #[arg(long, allow_hyphen_values = true)]
    pub rate: Option<Decimal>,

    /// Month of the first payment (1 = January)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
    pub start_month: Option<u32>,

    /// Year of the first payment
    #[arg(long)]
    pub start_year: Option<i32>,
}

impl LoanFlags {
    /// Build a scenario from flags, filling gaps from the defaults.
    pub fn into_scenario(self) -> Result<MortgageInput, Box<dyn std::error::Error>> {
        let price = self
            .price
            .ok_or("--price is required (or provide --input)")?;
        let mut scenario = MortgageInput {
            home_price: price,
            ..MortgageInput::default()
        };

        if let Some(down) = self.down {
            scenario.down_payment = down;
        } else if let Some(pct) = self.down_percent {
            scenario.down_payment = inputs::down_payment_from_percent(price, pct);
        }
        if let Some(years) = self.years {
            scenario.term_years = years;
        }
        if let Some(rate) = self.rate {
            scenario.annual_rate_pct = rate;
        }
        if let Some(month) = self.start_month {
            scenario.start_month = month - 1;
        }
        if let Some(year) = self.start_year {
            scenario.start_year = year;
        }
        Ok(scenario)
    }
}

/// Arguments for a single loan's amortization schedule
#[derive(Args)]
pub struct ScheduleArgs {
    /// Path to JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    #[command(flatten)]
    pub loan: LoanFlags,

    /// One row per month instead of per loan year
    #[arg(long)]
    pub monthly: bool,
}

pub fn run_schedule(args: ScheduleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let mut request = match input::load::<LoanRequest>(args.input.as_deref())? {
        Some(request) => request,
        None => LoanRequest {
            scenario: args.loan.into_scenario()?,
            ..LoanRequest::default()
        },
    };
    if args.monthly {
        request.granularity = Granularity::Monthly;
    }

    let result = report::analyze_loan(&request);
    Ok(serde_json::to_value(result)?)
}

/// Arguments for year-end balance projection
#[derive(Args)]
pub struct BalancesArgs {
    /// Path to JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    #[command(flatten)]
    pub loan: LoanFlags,

    /// Years to project (defaults to the loan term)
    #[arg(long)]
    pub horizon: Option<u32>,
}

pub fn run_balances(args: BalancesArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let mut request = match input::load::<LoanRequest>(args.input.as_deref())? {
        Some(request) => request,
        None => LoanRequest {
            scenario: args.loan.into_scenario()?,
            ..LoanRequest::default()
        },
    };
    if args.horizon.is_some() {
        request.horizon_years = args.horizon;
    }

    let result = report::project_balances(&request);
    Ok(serde_json::to_value(result)?)
}

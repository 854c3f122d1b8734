use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use mortgage_compare_core::inputs::ComparisonInput;
use mortgage_compare_core::report::{self, LumpSumRequest};

use crate::input;

/// Arguments for investing the monthly payment difference
#[derive(Args)]
pub struct SavingsArgs {
    /// Path to JSON or YAML comparison input
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_savings(args: SavingsArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let comparison_input: ComparisonInput = input::load(args.input.as_deref())?
        .ok_or("--input <file.json> or stdin required for savings projection")?;
    let result = report::project_payment_savings(&comparison_input);
    Ok(serde_json::to_value(result)?)
}

/// Arguments for compounding a one-off lump sum
#[derive(Args)]
pub struct LumpSumArgs {
    /// Path to JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Amount invested today
    #[arg(long, allow_hyphen_values = true)]
    pub amount: Option<Decimal>,

    /// Years to project
    #[arg(long)]
    pub years: Option<u32>,
}

pub fn run_lump_sum(args: LumpSumArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let request: LumpSumRequest = match input::load(args.input.as_deref())? {
        Some(request) => request,
        None => {
            let amount = args
                .amount
                .ok_or("--amount is required (or provide --input)")?;
            let mut request = LumpSumRequest {
                amount,
                ..LumpSumRequest::default()
            };
            if let Some(years) = args.years {
                request.horizon_years = years;
            }
            request
        }
    };

    let result = report::project_lump_sum_growth(&request);
    Ok(serde_json::to_value(result)?)
}

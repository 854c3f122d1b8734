use clap::Args;
use log::info;
use rust_decimal::Decimal;
use serde_json::Value;

use mortgage_compare_core::comparison::DiffKind;
use mortgage_compare_core::inputs::ComparisonInput;
use mortgage_compare_core::report;
use mortgage_compare_core::snapshot::InputSnapshot;
use mortgage_compare_core::types::Granularity;

use crate::input;

/// Arguments for a full A/B mortgage comparison
#[derive(Args)]
pub struct CompareArgs {
    /// Path to JSON or YAML comparison input
    #[arg(long, conflicts_with = "snapshot")]
    pub input: Option<String>,

    /// Restore inputs from a saved snapshot file
    #[arg(long)]
    pub snapshot: Option<String>,

    /// Write the inputs used to a snapshot file
    #[arg(long)]
    pub save_snapshot: Option<String>,

    /// One comparison row per month instead of per loan year
    #[arg(long)]
    pub monthly: bool,

    /// Field to diff: balance, interest, principal or principalCumulative
    #[arg(long)]
    pub diff: Option<DiffKind>,

    /// Lump sum to project alongside the comparison
    #[arg(long)]
    pub lump_sum: Option<Decimal>,
}

pub fn run_compare(args: CompareArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let mut comparison_input: ComparisonInput = if let Some(ref path) = args.snapshot {
        let snapshot = InputSnapshot::from_json(&input::file::read_to_string(path)?)?;
        info!("restored {} snapshot fields from {}", snapshot.len(), path);
        snapshot.restore(&ComparisonInput::default())
    } else if let Some(loaded) = input::load(args.input.as_deref())? {
        loaded
    } else {
        return Err("--input <file.json>, --snapshot <file.json> or stdin required for compare".into());
    };

    if args.monthly {
        comparison_input.granularity = Granularity::Monthly;
    }
    if let Some(kind) = args.diff {
        comparison_input.diff_kind = kind;
    }
    if let Some(amount) = args.lump_sum {
        comparison_input.lump_sum = amount;
    }

    if let Some(ref path) = args.save_snapshot {
        let json = InputSnapshot::capture(&comparison_input).to_json()?;
        input::file::write_string(path, &json)?;
        info!("saved snapshot to {}", path);
    }

    let result = report::compare_mortgages(&comparison_input);
    Ok(serde_json::to_value(result)?)
}

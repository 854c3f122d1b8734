mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::compare::CompareArgs;
use commands::loan::{BalancesArgs, ScheduleArgs};
use commands::projection::{LumpSumArgs, SavingsArgs};

/// Side-by-side mortgage comparison
#[derive(Parser)]
#[command(
    name = "mcalc",
    version,
    about = "Side-by-side mortgage comparison",
    long_about = "Compare two fixed-rate mortgages with decimal precision: amortization \
                  schedules, period-by-period diffs, year-end balances, and what the \
                  monthly payment difference or a lump sum would grow to if invested."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare two mortgage scenarios (schedules, diffs, chart, projections)
    Compare(CompareArgs),
    /// Amortization schedule for a single loan
    Schedule(ScheduleArgs),
    /// Year-end balances for a single loan
    Balances(BalancesArgs),
    /// Invest the monthly payment difference between two loans
    Savings(SavingsArgs),
    /// Compound a one-off lump sum across the rate ladder
    LumpSum(LumpSumArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Compare(args) => commands::compare::run_compare(args),
        Commands::Schedule(args) => commands::loan::run_schedule(args),
        Commands::Balances(args) => commands::loan::run_balances(args),
        Commands::Savings(args) => commands::projection::run_savings(args),
        Commands::LumpSum(args) => commands::projection::run_lump_sum(args),
        Commands::Version => {
            println!("mcalc {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}

mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::affordability::AffordabilityArgs;
use commands::buy_vs_rent::BuyVsRentArgs;
use commands::eligibility::EligibilityArgs;
use commands::loan::{LoanArgs, UpfrontArgs};
use commands::tool::ToolArgs;

/// Deterministic UAE mortgage and buy-vs-rent calculations
#[derive(Parser)]
#[command(
    name = "uaem",
    version,
    about = "Deterministic UAE mortgage and buy-vs-rent calculations",
    long_about = "A CLI for UAE mortgage calculations with decimal precision. \
                  Supports EMI quotes, upfront transaction costs, income-based \
                  affordability, buy-vs-rent comparison and eligibility screening. \
                  All policy constants (LTV caps, fees, DTI limits) are applied \
                  deterministically."
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
    /// Calculate mortgage EMI and lifetime cost
    Loan(LoanArgs),
    /// Break down the upfront cash needed at transaction time
    Upfront(UpfrontArgs),
    /// Assess maximum property budget from income
    Affordability(AffordabilityArgs),
    /// Compare buying a property against continuing to rent
    BuyVsRent(BuyVsRentArgs),
    /// Screen an applicant against the UAE eligibility checklist
    Eligibility(EligibilityArgs),
    /// Print the key UAE mortgage rules
    Rules,
    /// Dispatch a JSON tool request and print the formatted reply
    Tool(ToolArgs),
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
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Loan(args) => commands::loan::run_loan(args),
        Commands::Upfront(args) => commands::loan::run_upfront(args),
        Commands::Affordability(args) => commands::affordability::run_affordability(args),
        Commands::BuyVsRent(args) => commands::buy_vs_rent::run_buy_vs_rent(args),
        Commands::Eligibility(args) => commands::eligibility::run_eligibility(args),
        Commands::Rules => {
            println!("{}", commands::eligibility::run_rules());
            return;
        }
        Commands::Tool(args) => match commands::tool::run_tool(args) {
            Ok(text) => {
                println!("{text}");
                return;
            }
            Err(e) => Err(e),
        },
        Commands::Version => {
            println!("uaem {}", env!("CARGO_PKG_VERSION"));
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

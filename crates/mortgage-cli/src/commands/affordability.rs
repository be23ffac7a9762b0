use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use uae_mortgage_core::affordability::compute_affordability;
use uae_mortgage_core::LendingPolicy;

/// Arguments for the affordability assessment
#[derive(Args)]
pub struct AffordabilityArgs {
    /// Gross monthly income in AED
    #[arg(long)]
    pub monthly_income: Decimal,

    /// Fixed monthly expenses in AED
    #[arg(long, default_value = "0")]
    pub monthly_expenses: Decimal,

    /// Existing monthly debt payments (car loans, cards) in AED
    #[arg(long, default_value = "0")]
    pub existing_debts: Decimal,

    /// Maximum debt-to-income ratio in percent (capped at the 50% policy limit)
    #[arg(long, default_value = "50")]
    pub max_dti: Decimal,
}

pub fn run_affordability(args: AffordabilityArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let policy = LendingPolicy::default();
    let result = compute_affordability(
        &policy,
        args.monthly_income,
        args.monthly_expenses,
        args.existing_debts,
        args.max_dti,
    )?;
    Ok(serde_json::to_value(result)?)
}

use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use uae_mortgage_core::amortization::compute_loan;
use uae_mortgage_core::upfront::compute_upfront_costs;
use uae_mortgage_core::LendingPolicy;

/// Arguments for an EMI quote
#[derive(Args)]
pub struct LoanArgs {
    /// Property price in AED
    #[arg(long)]
    pub property_price: Decimal,

    /// Down payment percentage (floored at the 20% policy minimum)
    #[arg(long, default_value = "20")]
    pub down_payment_percent: Decimal,

    /// Annual interest rate in percent
    #[arg(long, default_value = "4.5")]
    pub interest_rate: Decimal,

    /// Loan tenure in years (capped at the 25-year policy maximum)
    #[arg(long, default_value = "25")]
    pub tenure_years: u32,
}

/// Arguments for the upfront cost breakdown
#[derive(Args)]
pub struct UpfrontArgs {
    /// Property price in AED
    #[arg(long)]
    pub property_price: Decimal,

    /// Down payment percentage (floored at the 20% policy minimum)
    #[arg(long, default_value = "20")]
    pub down_payment_percent: Decimal,
}

pub fn run_loan(args: LoanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let policy = LendingPolicy::default();
    let result = compute_loan(
        &policy,
        args.property_price,
        args.down_payment_percent,
        args.interest_rate,
        args.tenure_years,
    )?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_upfront(args: UpfrontArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let policy = LendingPolicy::default();
    let result = compute_upfront_costs(&policy, args.property_price, args.down_payment_percent)?;
    Ok(serde_json::to_value(result)?)
}

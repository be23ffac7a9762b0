use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use uae_mortgage_core::buy_vs_rent::{compare_buy_vs_rent, BuyVsRentInput};
use uae_mortgage_core::LendingPolicy;

use crate::input;

/// Arguments for the buy-vs-rent comparison
#[derive(Args)]
pub struct BuyVsRentArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Property price in AED
    #[arg(long)]
    pub property_price: Option<Decimal>,

    /// Current monthly rent for a comparable property in AED
    #[arg(long)]
    pub monthly_rent: Option<Decimal>,

    /// Stay horizon in years
    #[arg(long)]
    pub years_staying: Option<u32>,

    /// Down payment percentage (floored at the 20% policy minimum)
    #[arg(long)]
    pub down_payment_percent: Option<Decimal>,

    /// Annual interest rate in percent
    #[arg(long)]
    pub interest_rate: Option<Decimal>,

    /// Expected annual property appreciation in percent
    #[arg(long)]
    pub appreciation: Option<Decimal>,

    /// Expected annual rent increase in percent
    #[arg(long)]
    pub rent_increase: Option<Decimal>,
}

pub fn run_buy_vs_rent(args: BuyVsRentArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let bvr_input: BuyVsRentInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        let (property_price, monthly_rent, years_staying) =
            match (args.property_price, args.monthly_rent, args.years_staying) {
                (Some(p), Some(r), Some(y)) => (p, r, y),
                _ => {
                    return Err("--property-price, --monthly-rent and --years-staying are \
                                required (or pass --input <file.json> / pipe JSON on stdin)"
                        .into())
                }
            };
        BuyVsRentInput {
            property_price,
            monthly_rent,
            years_staying,
            down_payment_percent: args.down_payment_percent,
            annual_rate_percent: args.interest_rate,
            appreciation_percent: args.appreciation,
            rent_increase_percent: args.rent_increase,
        }
    };

    let policy = LendingPolicy::default();
    let result = compare_buy_vs_rent(&policy, &bvr_input)?;
    Ok(serde_json::to_value(result)?)
}

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::{Money, Percent, Rate};

/// The UAE lending rule set every calculation closes over.
///
/// Immutable value record rather than module-level constants so that tests
/// (and a future rate regime) can substitute alternate numbers without
/// touching calculation logic. `LendingPolicy::default()` is the simplified
/// UAE rule set this engine reproduces bit-exactly; it is not authoritative
/// banking policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LendingPolicy {
    /// Maximum loan-to-value for expats (0.80 = 80%)
    pub max_ltv_expat: Rate,
    /// Maximum loan-to-value for UAE nationals
    pub max_ltv_national: Rate,
    /// Minimum down payment in percent of property price
    pub min_down_payment_percent: Percent,
    /// Dubai Land Department transfer fee, % of price
    pub transfer_fee_percent: Percent,
    /// Real estate agent commission, % of price
    pub agency_fee_percent: Percent,
    /// Valuation, mortgage registration, insurance, % of price
    pub misc_fees_percent: Percent,
    /// Standard market interest rate, % per annum
    pub default_annual_rate_percent: Percent,
    /// Maximum loan tenure in years
    pub max_tenure_years: u32,
    /// Annual maintenance cost, % of property value
    pub maintenance_fee_percent: Percent,
    /// Maximum debt-to-income ratio, percent
    pub max_dti_percent: Percent,
    /// Minimum gross monthly income for expats, AED
    pub min_income_expat: Money,
    /// Minimum gross monthly income for UAE nationals, AED
    pub min_income_national: Money,
}

impl Default for LendingPolicy {
    fn default() -> Self {
        LendingPolicy {
            max_ltv_expat: dec!(0.80),
            max_ltv_national: dec!(0.85),
            min_down_payment_percent: dec!(20.0),
            transfer_fee_percent: dec!(4.0),
            agency_fee_percent: dec!(2.0),
            misc_fees_percent: dec!(1.0),
            default_annual_rate_percent: dec!(4.5),
            max_tenure_years: 25,
            maintenance_fee_percent: dec!(1.5),
            max_dti_percent: dec!(50.0),
            min_income_expat: dec!(15000),
            min_income_national: dec!(10000),
        }
    }
}

impl LendingPolicy {
    /// Total transaction fees on top of the down payment, % of price.
    pub fn total_fees_percent(&self) -> Percent {
        self.transfer_fee_percent + self.agency_fee_percent + self.misc_fees_percent
    }

    /// Policy monthly rate derived from the default annual rate.
    pub fn default_monthly_rate(&self) -> Rate {
        self.default_annual_rate_percent / dec!(100) / dec!(12)
    }
}

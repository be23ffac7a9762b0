use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::amortization::clamp_down_payment_percent;
use crate::error::MortgageError;
use crate::policy::LendingPolicy;
use crate::types::{round_money, with_metadata, ComputationOutput, Money, Percent};
use crate::MortgageResult;

/// Cash due at transaction time: down payment plus the ~7% of fees buyers
/// routinely forget to budget for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpfrontCosts {
    pub property_price: Money,
    pub down_payment: Money,
    pub down_payment_percent: Percent,
    /// Dubai Land Department transfer fee
    pub transfer_fee: Money,
    /// Agent commission
    pub agency_fee: Money,
    /// Valuation, mortgage registration, insurance
    pub misc_fees: Money,
    pub total_fees: Money,
    pub total_cash_needed: Money,
}

/// Compute the transaction-time cash requirement for a purchase.
///
/// Fee percentages come from the policy record, never from the caller:
/// they are externally imposed fees, not negotiable mortgage terms.
pub fn compute_upfront_costs(
    policy: &LendingPolicy,
    property_price: Money,
    down_payment_percent: Percent,
) -> MortgageResult<ComputationOutput<UpfrontCosts>> {
    let mut warnings: Vec<String> = Vec::new();

    if property_price <= Decimal::ZERO {
        return Err(MortgageError::InvalidInput {
            field: "property_price".into(),
            reason: "Property price must be positive".into(),
        });
    }
    if down_payment_percent < Decimal::ZERO {
        return Err(MortgageError::InvalidInput {
            field: "down_payment_percent".into(),
            reason: "Down payment percent cannot be negative".into(),
        });
    }

    let down_payment_percent =
        clamp_down_payment_percent(policy, down_payment_percent, &mut warnings);

    let down_payment = round_money(property_price * down_payment_percent / dec!(100));
    let transfer_fee = round_money(property_price * policy.transfer_fee_percent / dec!(100));
    let agency_fee = round_money(property_price * policy.agency_fee_percent / dec!(100));
    let misc_fees = round_money(property_price * policy.misc_fees_percent / dec!(100));

    let total_fees = transfer_fee + agency_fee + misc_fees;
    let total_cash_needed = down_payment + total_fees;

    let costs = UpfrontCosts {
        property_price,
        down_payment,
        down_payment_percent,
        transfer_fee,
        agency_fee,
        misc_fees,
        total_fees,
        total_cash_needed,
    };

    let assumptions = serde_json::json!({
        "transfer_fee_percent": policy.transfer_fee_percent,
        "agency_fee_percent": policy.agency_fee_percent,
        "misc_fees_percent": policy.misc_fees_percent,
    });

    Ok(with_metadata(
        "UAE Upfront Transaction Costs",
        &assumptions,
        warnings,
        costs,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_two_million_breakdown() {
        let out = compute_upfront_costs(&LendingPolicy::default(), dec!(2000000), dec!(20)).unwrap();
        let c = &out.result;

        assert_eq!(c.down_payment, dec!(400000.00));
        assert_eq!(c.transfer_fee, dec!(80000.00));
        assert_eq!(c.agency_fee, dec!(40000.00));
        assert_eq!(c.misc_fees, dec!(20000.00));
        assert_eq!(c.total_cash_needed, dec!(540000.00));
    }

    #[test]
    fn test_fees_are_seven_percent_of_price() {
        let price = dec!(1375000);
        let out = compute_upfront_costs(&LendingPolicy::default(), price, dec!(35)).unwrap();
        let c = &out.result;

        assert_eq!(c.total_fees, round_money(price * dec!(0.07)));
        assert_eq!(c.total_cash_needed, c.down_payment + c.total_fees);
    }

    #[test]
    fn test_down_payment_floor_applies() {
        let low = compute_upfront_costs(&LendingPolicy::default(), dec!(1000000), dec!(5)).unwrap();
        let floor =
            compute_upfront_costs(&LendingPolicy::default(), dec!(1000000), dec!(20)).unwrap();
        assert_eq!(low.result, floor.result);
        assert!(!low.warnings.is_empty());
    }

    #[test]
    fn test_zero_price_rejected() {
        let result = compute_upfront_costs(&LendingPolicy::default(), dec!(0), dec!(20));
        assert!(result.is_err());
    }
}

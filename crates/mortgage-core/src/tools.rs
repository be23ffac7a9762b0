//! Fixed capability surface for an external tool-calling collaborator.
//!
//! A language model (or any other non-deterministic dispatcher) selects one
//! of these named operations and extracts its typed arguments from user
//! text; the arithmetic itself always runs through the deterministic engine
//! and the reply text is templated by the `format` module. The dispatcher is
//! never in the path of a numeric computation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::affordability::compute_affordability;
use crate::amortization::compute_loan;
use crate::buy_vs_rent::{compare_buy_vs_rent, BuyVsRentInput};
use crate::eligibility::{validate_eligibility, EligibilityInput, EmploymentType, Nationality};
use crate::format;
use crate::policy::LendingPolicy;
use crate::types::{Money, Percent};
use crate::upfront::compute_upfront_costs;
use crate::MortgageResult;

/// The five operations the conversational layer may invoke, with typed
/// parameters. Optional parameters default from the lending policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "tool", content = "params", rename_all = "snake_case")]
pub enum ToolRequest {
    /// EMI quote plus the upfront-cost breakdown
    CalculateMortgage {
        property_price: Money,
        #[serde(skip_serializing_if = "Option::is_none")]
        down_payment_percent: Option<Percent>,
        #[serde(skip_serializing_if = "Option::is_none")]
        interest_rate: Option<Percent>,
        #[serde(skip_serializing_if = "Option::is_none")]
        tenure_years: Option<u32>,
    },
    /// Maximum budget from income, optionally checking a specific property
    AssessAffordability {
        monthly_income: Money,
        #[serde(skip_serializing_if = "Option::is_none")]
        existing_monthly_debts: Option<Money>,
        #[serde(skip_serializing_if = "Option::is_none")]
        desired_property_price: Option<Money>,
    },
    CompareBuyVsRent {
        property_price: Money,
        monthly_rent: Money,
        years_staying: u32,
        #[serde(skip_serializing_if = "Option::is_none")]
        down_payment_percent: Option<Percent>,
    },
    CheckEligibility {
        nationality: Nationality,
        monthly_income: Money,
        employment_type: EmploymentType,
        years_in_uae: Decimal,
    },
    /// Static rules summary; takes no parameters
    GetMortgageRules,
}

/// Run one capability and return the chat-ready text.
///
/// The returned string is presentation only: every number in it was
/// computed by the engine and merely formatted here.
pub fn dispatch(policy: &LendingPolicy, request: &ToolRequest) -> MortgageResult<String> {
    match request {
        ToolRequest::CalculateMortgage {
            property_price,
            down_payment_percent,
            interest_rate,
            tenure_years,
        } => {
            let dp = down_payment_percent.unwrap_or(policy.min_down_payment_percent);
            let rate = interest_rate.unwrap_or(policy.default_annual_rate_percent);
            let tenure = tenure_years.unwrap_or(policy.max_tenure_years);

            let quote = compute_loan(policy, *property_price, dp, rate, tenure)?.result;
            let upfront = compute_upfront_costs(policy, *property_price, dp)?.result;
            Ok(format::format_loan_quote(&quote, &upfront))
        }
        ToolRequest::AssessAffordability {
            monthly_income,
            existing_monthly_debts,
            desired_property_price,
        } => {
            let debts = existing_monthly_debts.unwrap_or(Decimal::ZERO);
            let assessment = compute_affordability(
                policy,
                *monthly_income,
                Decimal::ZERO,
                debts,
                policy.max_dti_percent,
            )?
            .result;
            Ok(format::format_affordability(
                &assessment,
                *desired_property_price,
            ))
        }
        ToolRequest::CompareBuyVsRent {
            property_price,
            monthly_rent,
            years_staying,
            down_payment_percent,
        } => {
            let input = BuyVsRentInput {
                property_price: *property_price,
                monthly_rent: *monthly_rent,
                years_staying: *years_staying,
                down_payment_percent: *down_payment_percent,
                annual_rate_percent: None,
                appreciation_percent: None,
                rent_increase_percent: None,
            };
            let verdict = compare_buy_vs_rent(policy, &input)?.result;
            Ok(format::format_buy_vs_rent(&verdict))
        }
        ToolRequest::CheckEligibility {
            nationality,
            monthly_income,
            employment_type,
            years_in_uae,
        } => {
            let input = EligibilityInput {
                nationality: *nationality,
                monthly_income: *monthly_income,
                employment_type: *employment_type,
                years_in_uae: *years_in_uae,
            };
            let report = validate_eligibility(policy, &input)?.result;
            Ok(format::format_eligibility(&report))
        }
        ToolRequest::GetMortgageRules => Ok(format::format_rules(policy)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn policy() -> LendingPolicy {
        LendingPolicy::default()
    }

    #[test]
    fn test_request_wire_format() {
        let json = r#"{
            "tool": "calculate_mortgage",
            "params": { "property_price": "2000000", "tenure_years": 20 }
        }"#;
        let request: ToolRequest = serde_json::from_str(json).unwrap();
        match request {
            ToolRequest::CalculateMortgage {
                property_price,
                tenure_years,
                ..
            } => {
                assert_eq!(property_price, dec!(2000000));
                assert_eq!(tenure_years, Some(20));
            }
            other => panic!("Wrong variant: {other:?}"),
        }
    }

    #[test]
    fn test_dispatch_mortgage_includes_upfront() {
        let request = ToolRequest::CalculateMortgage {
            property_price: dec!(2000000),
            down_payment_percent: None,
            interest_rate: None,
            tenure_years: None,
        };
        let text = dispatch(&policy(), &request).unwrap();
        assert!(text.contains("1,600,000"));
        assert!(text.contains("540,000"));
    }

    #[test]
    fn test_dispatch_affordability_with_budget_check() {
        let request = ToolRequest::AssessAffordability {
            monthly_income: dec!(30000),
            existing_monthly_debts: None,
            desired_property_price: Some(dec!(10000000)),
        };
        let text = dispatch(&policy(), &request).unwrap();
        assert!(text.contains("exceeds your maximum"));
    }

    #[test]
    fn test_dispatch_buy_vs_rent() {
        let request = ToolRequest::CompareBuyVsRent {
            property_price: dec!(1500000),
            monthly_rent: dec!(8000),
            years_staying: 2,
            down_payment_percent: None,
        };
        let text = dispatch(&policy(), &request).unwrap();
        assert!(text.contains("Keep renting"));
    }

    #[test]
    fn test_dispatch_eligibility() {
        let request = ToolRequest::CheckEligibility {
            nationality: Nationality::Expat,
            monthly_income: dec!(10000),
            employment_type: EmploymentType::Salaried,
            years_in_uae: dec!(1),
        };
        let text = dispatch(&policy(), &request).unwrap();
        assert!(text.contains("challenges"));
    }

    #[test]
    fn test_dispatch_rules_is_static() {
        let a = dispatch(&policy(), &ToolRequest::GetMortgageRules).unwrap();
        let b = dispatch(&policy(), &ToolRequest::GetMortgageRules).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_dispatch_propagates_invalid_input() {
        let request = ToolRequest::CalculateMortgage {
            property_price: dec!(-1),
            down_payment_percent: None,
            interest_rate: None,
            tenure_years: None,
        };
        assert!(dispatch(&policy(), &request).is_err());
    }
}

//! Presentation formatters for the conversational surface.
//!
//! Every function here maps an already-computed result record to display
//! text. Formatters never re-derive a number — they only round and group
//! values the engine produced, so numeric fidelity is preserved end to end.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use std::fmt::Write as _;

use crate::affordability::AffordabilityAssessment;
use crate::amortization::LoanQuote;
use crate::buy_vs_rent::BuyVsRentVerdict;
use crate::eligibility::{EligibilityReport, Nationality};
use crate::policy::LendingPolicy;
use crate::types::Money;
use crate::upfront::UpfrontCosts;

/// Render a monetary amount as whole AED with thousands separators.
pub fn fmt_aed(amount: Money) -> String {
    let rounded = amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let plain = rounded.normalize().to_string();
    let (sign, digits) = match plain.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", plain.as_str()),
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{sign}{grouped}")
}

/// Mortgage quote plus the upfront-cost warning buyers routinely miss.
pub fn format_loan_quote(quote: &LoanQuote, upfront: &UpfrontCosts) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Mortgage calculation for a {} AED property",
        fmt_aed(quote.property_price)
    );
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Monthly payment (EMI): {} AED",
        fmt_aed(quote.monthly_payment)
    );
    let _ = writeln!(
        out,
        "Loan amount: {} AED ({}% of property)",
        fmt_aed(quote.loan_amount),
        dec!(100) - quote.down_payment_percent
    );
    let _ = writeln!(
        out,
        "Interest rate: {}% per year",
        quote.annual_rate_percent
    );
    let _ = writeln!(
        out,
        "Tenure: {} years ({} months)",
        quote.tenure_years, quote.tenure_months
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "Over {} years you will pay:", quote.tenure_years);
    let _ = writeln!(out, "  Total principal: {} AED", fmt_aed(quote.loan_amount));
    let _ = writeln!(
        out,
        "  Total interest:  {} AED",
        fmt_aed(quote.total_interest)
    );
    let _ = writeln!(out, "  Grand total:     {} AED", fmt_aed(quote.total_payment));
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Upfront cash required: {} AED in total (not just the {} AED down payment)",
        fmt_aed(upfront.total_cash_needed),
        fmt_aed(upfront.down_payment)
    );
    let _ = writeln!(
        out,
        "  Down payment ({}%): {} AED",
        upfront.down_payment_percent,
        fmt_aed(upfront.down_payment)
    );
    let _ = writeln!(
        out,
        "  Transfer fee (DLD): {} AED",
        fmt_aed(upfront.transfer_fee)
    );
    let _ = writeln!(out, "  Agency fee: {} AED", fmt_aed(upfront.agency_fee));
    let _ = write!(out, "  Misc fees: {} AED", fmt_aed(upfront.misc_fees));
    out
}

/// Affordability summary, optionally checking a specific property price
/// against the computed maxima (never re-deriving them).
pub fn format_affordability(
    assessment: &AffordabilityAssessment,
    desired_property_price: Option<Money>,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Affordability assessment");
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Income: {} AED/month; existing debts: {} AED/month",
        fmt_aed(assessment.monthly_income),
        fmt_aed(assessment.existing_debts)
    );

    if !assessment.is_affordable {
        if let Some(msg) = &assessment.message {
            let _ = write!(out, "\n{msg}");
        }
        return out;
    }

    let _ = writeln!(
        out,
        "Available for mortgage: {} AED/month (maximum)",
        fmt_aed(assessment.max_monthly_payment)
    );
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Maximum property: {} AED",
        fmt_aed(assessment.max_property_price)
    );
    let _ = writeln!(
        out,
        "Comfortable budget: {} AED (recommended)",
        fmt_aed(assessment.comfortable_property_price)
    );
    let _ = writeln!(
        out,
        "Maximum loan: {} AED",
        fmt_aed(assessment.max_loan_amount)
    );
    let _ = writeln!(
        out,
        "Debt-to-income ratio: {}%",
        assessment.debt_to_income_ratio
    );
    let _ = write!(
        out,
        "\nA comfortable budget is 70% of the maximum, leaving room for emergencies."
    );

    if let Some(price) = desired_property_price {
        let _ = writeln!(out);
        if price <= assessment.comfortable_property_price {
            let _ = write!(
                out,
                "\n{} AED is comfortably within your budget.",
                fmt_aed(price)
            );
        } else if price <= assessment.max_property_price {
            let _ = write!(
                out,
                "\n{} AED is possible but stretches your budget — consider a lower price.",
                fmt_aed(price)
            );
        } else {
            let _ = write!(
                out,
                "\n{} AED exceeds your maximum by {} AED.",
                fmt_aed(price),
                fmt_aed(price - assessment.max_property_price)
            );
        }
    }
    out
}

/// Buy-vs-rent verdict with the monthly and cumulative breakdowns.
pub fn format_buy_vs_rent(verdict: &BuyVsRentVerdict) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", verdict.reasoning);
    let _ = writeln!(out);
    let _ = writeln!(out, "Monthly cost comparison:");
    let _ = writeln!(
        out,
        "  Buying: EMI {} AED + maintenance {} AED = {} AED",
        fmt_aed(verdict.monthly_emi),
        fmt_aed(verdict.monthly_maintenance),
        fmt_aed(verdict.monthly_buy_cost)
    );
    let _ = writeln!(
        out,
        "  Renting: {} AED (maintenance included)",
        fmt_aed(verdict.monthly_rent_cost)
    );
    let _ = writeln!(
        out,
        "  Difference: {} AED/month",
        fmt_aed(verdict.monthly_difference)
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "{}-year analysis:", verdict.years_analyzed);
    let _ = writeln!(
        out,
        "  If you buy: {} AED upfront, {} AED total payments, {} AED equity built",
        fmt_aed(verdict.upfront.total_cash_needed),
        fmt_aed(verdict.total_buy_cost),
        fmt_aed(verdict.equity_buildup)
    );
    let _ = writeln!(
        out,
        "  If you rent: {} AED paid, no equity",
        fmt_aed(verdict.total_rent_cost)
    );
    let _ = write!(
        out,
        "  Break-even point: ~{} years",
        verdict.break_even_years
    );
    out
}

/// Eligibility report with issues, advisory warnings and next steps.
pub fn format_eligibility(report: &EligibilityReport) -> String {
    let mut out = String::new();
    if report.is_eligible {
        let _ = writeln!(out, "You appear eligible for a UAE mortgage.");
    } else {
        let _ = writeln!(out, "There may be some challenges with eligibility:");
    }
    let _ = writeln!(out);
    let status = match report.nationality {
        Nationality::Expat => "Expat",
        Nationality::UaeNational => "UAE National",
    };
    let _ = writeln!(out, "Status: {status}");
    let _ = writeln!(
        out,
        "Maximum LTV: {}% (requires a {}% down payment)",
        (report.max_ltv * dec!(100)).normalize(),
        report.min_down_payment_percent.normalize()
    );

    if !report.issues.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Issues to address:");
        for issue in &report.issues {
            let _ = writeln!(out, "  - {issue}");
        }
    }

    if !report.warnings.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Things to note:");
        for warning in &report.warnings {
            let _ = writeln!(out, "  - {warning}");
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "{}",
        if report.is_eligible {
            "Documents you will need:"
        } else {
            "Next steps:"
        }
    );
    for (i, step) in report.next_steps.iter().enumerate() {
        if i + 1 < report.next_steps.len() {
            let _ = writeln!(out, "  - {step}");
        } else {
            let _ = write!(out, "  - {step}");
        }
    }
    out
}

/// Static rules summary: the key UAE mortgage constraints, straight from
/// the policy record.
pub fn format_rules(policy: &LendingPolicy) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "UAE mortgage rules (key facts)");
    let _ = writeln!(out);
    let _ = writeln!(out, "Loan-to-value limits:");
    let _ = writeln!(
        out,
        "  Expats: maximum {}% LTV ({}% down payment required)",
        (policy.max_ltv_expat * dec!(100)).normalize(),
        ((Decimal::ONE - policy.max_ltv_expat) * dec!(100)).normalize()
    );
    let _ = writeln!(
        out,
        "  UAE nationals: maximum {}% LTV",
        (policy.max_ltv_national * dec!(100)).normalize()
    );
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Maximum tenure: {} years",
        policy.max_tenure_years
    );
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Upfront costs (the hidden ~{}%):",
        policy.total_fees_percent()
    );
    let _ = writeln!(
        out,
        "  {}% Dubai Land Department transfer fee",
        policy.transfer_fee_percent
    );
    let _ = writeln!(
        out,
        "  {}% real estate agent commission",
        policy.agency_fee_percent
    );
    let _ = writeln!(
        out,
        "  {}% valuation, mortgage registration, insurance",
        policy.misc_fees_percent
    );
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Standard market rate: ~{}% per annum (typically variable, linked to EIBOR)",
        policy.default_annual_rate_percent
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "Eligibility:");
    let _ = writeln!(
        out,
        "  Minimum income: ~{} AED/month for expats, {} AED/month for nationals",
        fmt_aed(policy.min_income_expat),
        fmt_aed(policy.min_income_national)
    );
    let _ = writeln!(
        out,
        "  Maximum debt-to-income ratio: {}%",
        policy.max_dti_percent
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "Buy vs rent rule of thumb:");
    let _ = writeln!(out, "  Staying under 3 years: rent — fees eat any profit");
    let _ = write!(out, "  Staying over 5 years: consider buying — equity builds up");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::affordability::compute_affordability;
    use crate::amortization::compute_loan;
    use crate::buy_vs_rent::{compare_buy_vs_rent, BuyVsRentInput};
    use crate::eligibility::{validate_eligibility, EligibilityInput, EmploymentType};
    use crate::upfront::compute_upfront_costs;

    #[test]
    fn test_fmt_aed_grouping() {
        assert_eq!(fmt_aed(dec!(540000)), "540,000");
        assert_eq!(fmt_aed(dec!(1234567.89)), "1,234,568");
        assert_eq!(fmt_aed(dec!(999)), "999");
        assert_eq!(fmt_aed(dec!(-50000)), "-50,000");
        assert_eq!(fmt_aed(Decimal::ZERO), "0");
    }

    #[test]
    fn test_loan_quote_text_preserves_numbers() {
        let policy = LendingPolicy::default();
        let quote = compute_loan(&policy, dec!(2000000), dec!(20), dec!(4.5), 25)
            .unwrap()
            .result;
        let upfront = compute_upfront_costs(&policy, dec!(2000000), dec!(20))
            .unwrap()
            .result;
        let text = format_loan_quote(&quote, &upfront);

        assert!(text.contains("1,600,000"));
        assert!(text.contains("540,000"));
        assert!(text.contains(&fmt_aed(quote.monthly_payment)));
    }

    #[test]
    fn test_affordability_text_with_budget_check() {
        let policy = LendingPolicy::default();
        let assessment = compute_affordability(&policy, dec!(30000), dec!(0), dec!(0), dec!(50))
            .unwrap()
            .result;

        let over = assessment.max_property_price + dec!(500000);
        let text = format_affordability(&assessment, Some(over));
        assert!(text.contains("exceeds your maximum"));

        let comfortable = format_affordability(&assessment, Some(dec!(1000000)));
        assert!(comfortable.contains("comfortably within"));
    }

    #[test]
    fn test_not_affordable_text_carries_message() {
        let policy = LendingPolicy::default();
        let assessment = compute_affordability(&policy, dec!(0), dec!(0), dec!(0), dec!(50))
            .unwrap()
            .result;
        let text = format_affordability(&assessment, None);
        assert!(text.contains("Reduce debts"));
    }

    #[test]
    fn test_buy_vs_rent_text_includes_reasoning() {
        let policy = LendingPolicy::default();
        let verdict = compare_buy_vs_rent(
            &policy,
            &BuyVsRentInput {
                property_price: dec!(1500000),
                monthly_rent: dec!(9000),
                years_staying: 7,
                down_payment_percent: None,
                annual_rate_percent: None,
                appreciation_percent: None,
                rent_increase_percent: None,
            },
        )
        .unwrap()
        .result;

        let text = format_buy_vs_rent(&verdict);
        assert!(text.contains(&verdict.reasoning));
        assert!(text.contains("Break-even point"));
    }

    #[test]
    fn test_eligibility_text_lists_issues() {
        let policy = LendingPolicy::default();
        let report = validate_eligibility(
            &policy,
            &EligibilityInput {
                nationality: Nationality::Expat,
                monthly_income: dec!(9000),
                employment_type: EmploymentType::Salaried,
                years_in_uae: dec!(1),
            },
        )
        .unwrap()
        .result;

        let text = format_eligibility(&report);
        assert!(text.contains("challenges"));
        assert!(text.contains("15,000") || text.contains("15000"));
    }

    #[test]
    fn test_rules_summary_quotes_policy() {
        let text = format_rules(&LendingPolicy::default());
        assert!(text.contains("80% LTV"));
        assert!(text.contains("25 years"));
        assert!(text.contains("4.5%"));
        assert!(text.contains("15,000"));
    }
}

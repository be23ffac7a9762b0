use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::amortization::annuity_pv_factor;
use crate::error::MortgageError;
use crate::policy::LendingPolicy;
use crate::types::{round_money, round_ratio, with_metadata, ComputationOutput, Money, Percent};
use crate::MortgageResult;

/// Fraction of the maximum payment treated as a comfortable budget.
const COMFORT_MARGIN: Decimal = dec!(0.7);

/// Maximum purchasing power derived from income under the DTI cap.
///
/// "Not affordable" is a normal result state, never an error: callers get a
/// zeroed assessment with an explanatory message when existing debts already
/// exhaust the allowed debt service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AffordabilityAssessment {
    pub is_affordable: bool,
    /// Largest EMI the DTI cap leaves room for
    pub max_monthly_payment: Money,
    /// 70% of the maximum, leaving headroom for emergencies
    pub recommended_monthly_payment: Money,
    pub max_loan_amount: Money,
    /// Loan divided by the expat LTV cap — the loan is only 80% of the price
    pub max_property_price: Money,
    pub comfortable_property_price: Money,
    /// Percent, rounded to 1 dp; 100 when income leaves no room
    pub debt_to_income_ratio: Decimal,
    pub monthly_income: Money,
    pub existing_debts: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Assess how much property an income can carry.
///
/// Inverts the EMI annuity at the policy default rate and maximum tenure to
/// turn the allowed monthly payment into a loan amount, then divides by the
/// expat LTV cap to reach a property price.
pub fn compute_affordability(
    policy: &LendingPolicy,
    monthly_income: Money,
    monthly_expenses: Money,
    existing_debts: Money,
    max_dti_ratio_percent: Percent,
) -> MortgageResult<ComputationOutput<AffordabilityAssessment>> {
    let mut warnings: Vec<String> = Vec::new();

    validate_input(
        monthly_income,
        monthly_expenses,
        existing_debts,
        max_dti_ratio_percent,
    )?;

    // A requested DTI above the regulatory cap is clamped, not rejected.
    let dti_percent = if max_dti_ratio_percent > policy.max_dti_percent {
        warnings.push(format!(
            "DTI ratio of {max_dti_ratio_percent}% exceeds the {}% regulatory cap — capped",
            policy.max_dti_percent
        ));
        policy.max_dti_percent
    } else {
        max_dti_ratio_percent
    };

    if monthly_income > Decimal::ZERO && monthly_expenses >= monthly_income * dec!(0.4) {
        warnings.push("Fixed expenses consume 40%+ of income — budget is tight".into());
    }

    let available_for_debt = monthly_income * dti_percent / dec!(100);
    let max_monthly_payment = available_for_debt - existing_debts;

    if max_monthly_payment <= Decimal::ZERO {
        let assessment = AffordabilityAssessment {
            is_affordable: false,
            max_monthly_payment: Decimal::ZERO,
            recommended_monthly_payment: Decimal::ZERO,
            max_loan_amount: Decimal::ZERO,
            max_property_price: Decimal::ZERO,
            comfortable_property_price: Decimal::ZERO,
            debt_to_income_ratio: dec!(100),
            monthly_income,
            existing_debts,
            message: Some(
                "Existing debts already exhaust the allowed debt service. \
                 Reduce debts before considering a mortgage."
                    .into(),
            ),
        };
        return Ok(envelope(policy, dti_percent, warnings, assessment));
    }

    // Invert the EMI formula at the policy default rate over the maximum
    // tenure: Loan = EMI * ((1+r)^n - 1) / (r(1+r)^n)
    let tenure_months = policy.max_tenure_years * 12;
    let factor = annuity_pv_factor(policy.default_monthly_rate(), tenure_months)?;
    let max_loan_amount = max_monthly_payment * factor;

    // Dividing by LTV, not multiplying: the loan covers only that fraction
    // of the price, the buyer funds the rest.
    if policy.max_ltv_expat.is_zero() {
        return Err(MortgageError::DivisionByZero {
            context: "max property price (loan / LTV cap)".into(),
        });
    }
    let max_property_price = max_loan_amount / policy.max_ltv_expat;

    // monthly_income > 0 here: income == 0 forces max_monthly_payment <= 0
    let debt_to_income_ratio =
        round_ratio((max_monthly_payment + existing_debts) / monthly_income * dec!(100));

    let assessment = AffordabilityAssessment {
        is_affordable: true,
        max_monthly_payment: round_money(max_monthly_payment),
        recommended_monthly_payment: round_money(max_monthly_payment * COMFORT_MARGIN),
        max_loan_amount: round_money(max_loan_amount),
        max_property_price: round_money(max_property_price),
        comfortable_property_price: round_money(max_property_price * COMFORT_MARGIN),
        debt_to_income_ratio,
        monthly_income,
        existing_debts,
        message: None,
    };

    Ok(envelope(policy, dti_percent, warnings, assessment))
}

fn envelope(
    policy: &LendingPolicy,
    dti_percent: Percent,
    warnings: Vec<String>,
    assessment: AffordabilityAssessment,
) -> ComputationOutput<AffordabilityAssessment> {
    let assumptions = serde_json::json!({
        "max_dti_percent": dti_percent,
        "annual_rate_percent": policy.default_annual_rate_percent,
        "tenure_years": policy.max_tenure_years,
        "max_ltv": policy.max_ltv_expat,
        "comfort_margin": COMFORT_MARGIN,
    });
    with_metadata(
        "Income-Based Affordability (DTI)",
        &assumptions,
        warnings,
        assessment,
    )
}

fn validate_input(
    monthly_income: Money,
    monthly_expenses: Money,
    existing_debts: Money,
    max_dti_ratio_percent: Percent,
) -> MortgageResult<()> {
    if monthly_income < Decimal::ZERO {
        return Err(MortgageError::InvalidInput {
            field: "monthly_income".into(),
            reason: "Income cannot be negative".into(),
        });
    }
    if monthly_expenses < Decimal::ZERO {
        return Err(MortgageError::InvalidInput {
            field: "monthly_expenses".into(),
            reason: "Expenses cannot be negative".into(),
        });
    }
    if existing_debts < Decimal::ZERO {
        return Err(MortgageError::InvalidInput {
            field: "existing_debts".into(),
            reason: "Existing debts cannot be negative".into(),
        });
    }
    if max_dti_ratio_percent < Decimal::ZERO {
        return Err(MortgageError::InvalidInput {
            field: "max_dti_ratio_percent".into(),
            reason: "DTI ratio cannot be negative".into(),
        });
    }
    Ok(())
}

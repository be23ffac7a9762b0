use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::MortgageError;
use crate::policy::LendingPolicy;
use crate::types::{with_metadata, ComputationOutput, Money, Percent, Rate};
use crate::MortgageResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Nationality {
    Expat,
    UaeNational,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentType {
    Salaried,
    SelfEmployed,
    BusinessOwner,
}

impl EmploymentType {
    fn is_self_employed(self) -> bool {
        matches!(self, EmploymentType::SelfEmployed | EmploymentType::BusinessOwner)
    }
}

/// Applicant profile for the eligibility checklist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EligibilityInput {
    pub nationality: Nationality,
    pub monthly_income: Money,
    pub employment_type: EmploymentType,
    /// Years of UAE residency; fractional values are allowed (0.5 = 6 months)
    pub years_in_uae: Decimal,
}

/// Rule-based screening result. Issues are hard blockers; warnings are
/// advisory and never affect `is_eligible`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilityReport {
    pub is_eligible: bool,
    pub nationality: Nationality,
    /// Maximum loan-to-value as a decimal (0.80 = 80%)
    pub max_ltv: Rate,
    pub min_down_payment_percent: Percent,
    pub issues: Vec<String>,
    pub warnings: Vec<String>,
    pub next_steps: Vec<String>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Screen an applicant against the basic UAE lending checklist.
pub fn validate_eligibility(
    policy: &LendingPolicy,
    input: &EligibilityInput,
) -> MortgageResult<ComputationOutput<EligibilityReport>> {
    if input.monthly_income < Decimal::ZERO {
        return Err(MortgageError::InvalidInput {
            field: "monthly_income".into(),
            reason: "Income cannot be negative".into(),
        });
    }
    if input.years_in_uae < Decimal::ZERO {
        return Err(MortgageError::InvalidInput {
            field: "years_in_uae".into(),
            reason: "Residency years cannot be negative".into(),
        });
    }

    let is_expat = input.nationality == Nationality::Expat;
    let max_ltv = if is_expat {
        policy.max_ltv_expat
    } else {
        policy.max_ltv_national
    };
    let min_down_payment_percent = (Decimal::ONE - max_ltv) * dec!(100);

    let mut issues: Vec<String> = Vec::new();
    let mut warnings: Vec<String> = Vec::new();

    let min_income = if is_expat {
        policy.min_income_expat
    } else {
        policy.min_income_national
    };
    if input.monthly_income < min_income {
        issues.push(format!(
            "Most banks require a minimum income of {min_income} AED/month"
        ));
    }

    if input.employment_type.is_self_employed() {
        warnings.push(
            "Self-employed applicants face stricter documentation requirements \
             (2+ years of audited accounts)"
                .into(),
        );
        if is_expat && input.years_in_uae < dec!(2) {
            issues.push("Self-employed expats typically need 2+ years in the UAE".into());
        }
    }

    if is_expat && input.years_in_uae < dec!(0.5) {
        warnings.push("Some banks require 6+ months of UAE residency".into());
    }

    let is_eligible = issues.is_empty();

    let next_steps = if is_eligible {
        vec![
            "Gather salary certificates (3 months)".to_string(),
            "Prepare bank statements (6 months)".to_string(),
            "Get Emirates ID copy".to_string(),
            "Obtain passport copy with residence visa".to_string(),
        ]
    } else {
        vec!["Address the issues listed above first".to_string()]
    };

    let report = EligibilityReport {
        is_eligible,
        nationality: input.nationality,
        max_ltv,
        min_down_payment_percent,
        issues,
        warnings,
        next_steps,
    };

    let assumptions = serde_json::json!({
        "min_income_expat": policy.min_income_expat,
        "min_income_national": policy.min_income_national,
        "max_ltv_expat": policy.max_ltv_expat,
        "max_ltv_national": policy.max_ltv_national,
    });

    Ok(with_metadata(
        "UAE Mortgage Eligibility Screening",
        &assumptions,
        Vec::new(),
        report,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

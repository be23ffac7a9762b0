use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::MortgageError;
use crate::policy::LendingPolicy;
use crate::types::{round_money, with_metadata, ComputationOutput, Money, Percent, Rate};
use crate::MortgageResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Output of a mortgage amortization: the fixed monthly installment and the
/// lifetime cost of the loan. All monetary fields are rounded to 2 dp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanQuote {
    pub property_price: Money,
    /// Cash portion of the price (after the policy floor is applied)
    pub down_payment: Money,
    /// Effective down payment percent, post-clamp
    pub down_payment_percent: Percent,
    pub loan_amount: Money,
    /// Equated Monthly Installment
    pub monthly_payment: Money,
    pub annual_rate_percent: Percent,
    pub tenure_years: u32,
    pub tenure_months: u32,
    pub total_payment: Money,
    pub total_interest: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Compute the EMI quote for a property purchase.
///
/// Out-of-policy requests are clamped, never rejected: a down payment below
/// the policy minimum is raised to it, a tenure beyond the policy maximum is
/// shortened to it. Each clamp is reported as a warning on the envelope.
/// Only structurally invalid inputs (non-positive price or tenure, negative
/// rate or down payment) are errors.
pub fn compute_loan(
    policy: &LendingPolicy,
    property_price: Money,
    down_payment_percent: Percent,
    annual_rate_percent: Percent,
    tenure_years: u32,
) -> MortgageResult<ComputationOutput<LoanQuote>> {
    let mut warnings: Vec<String> = Vec::new();

    validate_loan_input(
        property_price,
        down_payment_percent,
        annual_rate_percent,
        tenure_years,
    )?;

    let down_payment_percent =
        clamp_down_payment_percent(policy, down_payment_percent, &mut warnings);
    let tenure_years = clamp_tenure_years(policy, tenure_years, &mut warnings);

    let quote = amortize(
        property_price,
        down_payment_percent,
        annual_rate_percent,
        tenure_years,
    )?;

    let assumptions = serde_json::json!({
        "property_price": property_price,
        "down_payment_percent": down_payment_percent,
        "annual_rate_percent": annual_rate_percent,
        "tenure_years": tenure_years,
        "rounding": "half-up to 2dp",
    });

    Ok(with_metadata(
        "UAE Mortgage Amortization (EMI)",
        &assumptions,
        warnings,
        quote,
    ))
}

// ---------------------------------------------------------------------------
// Validation and policy clamps
// ---------------------------------------------------------------------------

fn validate_loan_input(
    property_price: Money,
    down_payment_percent: Percent,
    annual_rate_percent: Percent,
    tenure_years: u32,
) -> MortgageResult<()> {
    if property_price <= Decimal::ZERO {
        return Err(MortgageError::InvalidInput {
            field: "property_price".into(),
            reason: "Property price must be positive".into(),
        });
    }
    if tenure_years == 0 {
        return Err(MortgageError::InvalidInput {
            field: "tenure_years".into(),
            reason: "Tenure must be at least 1 year".into(),
        });
    }
    if down_payment_percent < Decimal::ZERO {
        return Err(MortgageError::InvalidInput {
            field: "down_payment_percent".into(),
            reason: "Down payment percent cannot be negative".into(),
        });
    }
    if annual_rate_percent < Decimal::ZERO {
        return Err(MortgageError::InvalidInput {
            field: "annual_rate_percent".into(),
            reason: "Interest rate cannot be negative".into(),
        });
    }
    Ok(())
}

/// Floor at the policy minimum (20% for expats), cap at 100%.
pub(crate) fn clamp_down_payment_percent(
    policy: &LendingPolicy,
    requested: Percent,
    warnings: &mut Vec<String>,
) -> Percent {
    if requested < policy.min_down_payment_percent {
        warnings.push(format!(
            "Down payment of {requested}% is below the {}% policy minimum — raised to the minimum",
            policy.min_down_payment_percent
        ));
        return policy.min_down_payment_percent;
    }
    if requested > dec!(100) {
        warnings.push(format!(
            "Down payment of {requested}% exceeds 100% — capped at 100%"
        ));
        return dec!(100);
    }
    requested
}

pub(crate) fn clamp_tenure_years(
    policy: &LendingPolicy,
    requested: u32,
    warnings: &mut Vec<String>,
) -> u32 {
    if requested > policy.max_tenure_years {
        warnings.push(format!(
            "Tenure of {requested} years exceeds the {}-year policy maximum — shortened to the maximum",
            policy.max_tenure_years
        ));
        return policy.max_tenure_years;
    }
    requested
}

// ---------------------------------------------------------------------------
// Amortization math
// ---------------------------------------------------------------------------

/// Core EMI computation on already-clamped inputs.
pub(crate) fn amortize(
    property_price: Money,
    down_payment_percent: Percent,
    annual_rate_percent: Percent,
    tenure_years: u32,
) -> MortgageResult<LoanQuote> {
    let down_payment = property_price * down_payment_percent / dec!(100);
    let loan_amount = property_price - down_payment;

    let monthly_rate = annual_rate_percent / dec!(100) / dec!(12);
    let tenure_months = tenure_years * 12;

    let monthly_payment = monthly_emi(loan_amount, monthly_rate, tenure_months)?;

    // Totals are derived from the rounded EMI so that
    // total_payment == monthly_payment * tenure_months holds exactly.
    let monthly_payment = round_money(monthly_payment);
    let down_payment = round_money(down_payment);
    let loan_amount = round_money(loan_amount);
    let total_payment = round_money(monthly_payment * Decimal::from(tenure_months));
    let total_interest = round_money(total_payment - loan_amount);

    Ok(LoanQuote {
        property_price,
        down_payment,
        down_payment_percent,
        loan_amount,
        monthly_payment,
        annual_rate_percent,
        tenure_years,
        tenure_months,
        total_payment,
        total_interest,
    })
}

/// Standard fixed-rate installment: P * r(1+r)^n / ((1+r)^n - 1).
/// Zero-rate loans amortize straight-line.
pub(crate) fn monthly_emi(
    loan_amount: Money,
    monthly_rate: Rate,
    tenure_months: u32,
) -> MortgageResult<Money> {
    if tenure_months == 0 {
        return Err(MortgageError::DivisionByZero {
            context: "EMI with zero tenure months".into(),
        });
    }

    if monthly_rate.is_zero() {
        return Ok(loan_amount / Decimal::from(tenure_months));
    }

    let compound = (Decimal::ONE + monthly_rate).powi(tenure_months as i64);
    let denominator = compound - Decimal::ONE;

    if denominator.is_zero() {
        return Err(MortgageError::DivisionByZero {
            context: "EMI annuity denominator".into(),
        });
    }

    Ok(loan_amount * monthly_rate * compound / denominator)
}

/// Present value of a 1-AED-per-month annuity: ((1+r)^n - 1) / (r(1+r)^n).
/// Inverse of the EMI formula; used to back out a loan amount from a payment.
pub(crate) fn annuity_pv_factor(monthly_rate: Rate, tenure_months: u32) -> MortgageResult<Decimal> {
    if monthly_rate.is_zero() {
        return Ok(Decimal::from(tenure_months));
    }

    let compound = (Decimal::ONE + monthly_rate).powi(tenure_months as i64);
    let denominator = monthly_rate * compound;

    if denominator.is_zero() {
        return Err(MortgageError::DivisionByZero {
            context: "annuity PV factor denominator".into(),
        });
    }

    Ok((compound - Decimal::ONE) / denominator)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

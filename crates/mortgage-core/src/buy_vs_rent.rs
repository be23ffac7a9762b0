use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::amortization::{amortize, clamp_down_payment_percent, LoanQuote};
use crate::error::MortgageError;
use crate::format::fmt_aed;
use crate::policy::LendingPolicy;
use crate::types::{round_money, round_ratio, with_metadata, ComputationOutput, Money, Percent};
use crate::upfront::{compute_upfront_costs, UpfrontCosts};
use crate::MortgageResult;

/// Savings band (AED) around zero inside which a 3-5 year stay is a toss-up.
const BORDERLINE_BAND: Decimal = dec!(50000);

/// Sentinel for "no break-even within any plausible horizon".
const BREAK_EVEN_CAP: Decimal = dec!(99);

/// Longest stay horizon accepted. Bounds the rent-escalation loop and the
/// appreciation exponent so horizon arithmetic cannot overflow.
const MAX_STAY_YEARS: u32 = 100;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Recommendation {
    Buy,
    Rent,
    Borderline,
}

/// Input parameters for the buy-vs-rent comparison. Optional fields fall
/// back to the policy defaults (20% down, 4.5% rate) and the standard market
/// assumptions (3% appreciation, 5% annual rent increases).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuyVsRentInput {
    pub property_price: Money,
    /// Current monthly rent for a comparable property
    pub monthly_rent: Money,
    /// Stay horizon in years — the decision models cost during the stay,
    /// not full loan payoff
    pub years_staying: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub down_payment_percent: Option<Percent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annual_rate_percent: Option<Percent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appreciation_percent: Option<Percent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rent_increase_percent: Option<Percent>,
}

/// Multi-year total-cost-of-ownership comparison. Composes the loan quote
/// and upfront costs it was built from; each call produces fresh,
/// non-aliased records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuyVsRentVerdict {
    pub recommendation: Recommendation,
    /// Templated from the computed numbers below — never re-derived
    pub reasoning: String,
    pub monthly_emi: Money,
    pub monthly_maintenance: Money,
    pub monthly_buy_cost: Money,
    /// Rent today, before escalation
    pub monthly_rent_cost: Money,
    pub monthly_difference: Money,
    pub total_buy_cost: Money,
    pub total_rent_cost: Money,
    pub equity_buildup: Money,
    pub savings_if_buying: Money,
    /// Linear approximation, clamped to [0, 99]; 99 means "never within
    /// any plausible horizon"
    pub break_even_years: Decimal,
    pub years_analyzed: u32,
    pub loan: LoanQuote,
    pub upfront: UpfrontCosts,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Compare buying a property against continuing to rent over a stay horizon.
///
/// The mortgage is amortized over `min(years_staying, policy max tenure)` so
/// the comparison reflects cost during the stay rather than full payoff.
pub fn compare_buy_vs_rent(
    policy: &LendingPolicy,
    input: &BuyVsRentInput,
) -> MortgageResult<ComputationOutput<BuyVsRentVerdict>> {
    let mut warnings: Vec<String> = Vec::new();

    validate_input(input)?;

    let down_payment_percent = clamp_down_payment_percent(
        policy,
        input
            .down_payment_percent
            .unwrap_or(policy.min_down_payment_percent),
        &mut warnings,
    );
    let annual_rate_percent = input
        .annual_rate_percent
        .unwrap_or(policy.default_annual_rate_percent);
    let appreciation_percent = input.appreciation_percent.unwrap_or(dec!(3.0));
    let rent_increase_percent = input.rent_increase_percent.unwrap_or(dec!(5.0));

    let years = input.years_staying;
    let months = years * 12;

    // 1-2. Amortize over the stay horizon (capped at policy tenure) and
    // price the transaction costs at the same terms.
    let tenure_years = years.min(policy.max_tenure_years);
    let loan = amortize(
        input.property_price,
        down_payment_percent,
        annual_rate_percent,
        tenure_years,
    )?;
    let upfront = compute_upfront_costs(policy, input.property_price, down_payment_percent)?.result;

    // 3-4. Ownership carries maintenance on top of the EMI.
    let monthly_maintenance =
        round_money(input.property_price * policy.maintenance_fee_percent / dec!(100) / dec!(12));
    let monthly_buy_cost = loan.monthly_payment + monthly_maintenance;

    // 5. Rent compounds annually over the stay.
    let mut total_rent = Decimal::ZERO;
    let mut current_rent = input.monthly_rent;
    for _ in 0..years {
        total_rent += current_rent * dec!(12);
        current_rent *= Decimal::ONE + rent_increase_percent / dec!(100);
    }

    // 6. Month-by-month principal scan. A linear scan rather than a closed
    // form: it must stop early when the stay is shorter than the tenure.
    let monthly_rate = annual_rate_percent / dec!(100) / dec!(12);
    let mut principal_paid = Decimal::ZERO;
    let mut remaining_balance = loan.loan_amount;
    for _ in 0..months.min(loan.tenure_months) {
        let interest_portion = remaining_balance * monthly_rate;
        let principal_portion = loan.monthly_payment - interest_portion;
        principal_paid += principal_portion;
        remaining_balance -= principal_portion;
    }

    // 7-8. Appreciation and equity.
    let future_value = input.property_price
        * (Decimal::ONE + appreciation_percent / dec!(100)).powi(years as i64);
    let appreciation_gain = future_value - input.property_price;
    let equity_buildup = loan.down_payment + principal_paid + appreciation_gain;

    // 9-10. Totals over the stay.
    let total_buy_cost = upfront.total_cash_needed + monthly_buy_cost * Decimal::from(months);
    let total_rent_cost = total_rent;
    let savings_if_buying = equity_buildup - (total_buy_cost - total_rent_cost);

    // 11. Break-even heuristic, see break_even_estimate.
    let break_even_years = break_even_estimate(
        monthly_buy_cost,
        input.monthly_rent,
        upfront.total_cash_needed,
        principal_paid,
        appreciation_gain,
        years,
    );

    let equity_buildup = round_money(equity_buildup);
    let total_buy_cost = round_money(total_buy_cost);
    let total_rent_cost = round_money(total_rent_cost);
    let savings_if_buying = round_money(savings_if_buying);

    // 12. Deterministic recommendation thresholds.
    let (recommendation, reasoning) = recommend(
        policy,
        years,
        savings_if_buying,
        equity_buildup,
        total_rent_cost,
        total_buy_cost,
        upfront.total_fees,
        rent_increase_percent,
        break_even_years,
    );

    let verdict = BuyVsRentVerdict {
        recommendation,
        reasoning,
        monthly_emi: loan.monthly_payment,
        monthly_maintenance,
        monthly_buy_cost,
        monthly_rent_cost: input.monthly_rent,
        monthly_difference: monthly_buy_cost - input.monthly_rent,
        total_buy_cost,
        total_rent_cost,
        equity_buildup,
        savings_if_buying,
        break_even_years,
        years_analyzed: years,
        loan,
        upfront,
    };

    let assumptions = serde_json::json!({
        "down_payment_percent": down_payment_percent,
        "annual_rate_percent": annual_rate_percent,
        "appreciation_percent": appreciation_percent,
        "rent_increase_percent": rent_increase_percent,
        "maintenance_fee_percent": policy.maintenance_fee_percent,
        "tenure_years": tenure_years,
    });

    Ok(with_metadata(
        "Buy vs Rent Total Cost of Ownership",
        &assumptions,
        warnings,
        verdict,
    ))
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_input(input: &BuyVsRentInput) -> MortgageResult<()> {
    if input.property_price <= Decimal::ZERO {
        return Err(MortgageError::InvalidInput {
            field: "property_price".into(),
            reason: "Property price must be positive".into(),
        });
    }
    if input.monthly_rent < Decimal::ZERO {
        return Err(MortgageError::InvalidInput {
            field: "monthly_rent".into(),
            reason: "Monthly rent cannot be negative".into(),
        });
    }
    if input.years_staying == 0 {
        return Err(MortgageError::InvalidInput {
            field: "years_staying".into(),
            reason: "Stay horizon must be at least 1 year".into(),
        });
    }
    if input.years_staying > MAX_STAY_YEARS {
        return Err(MortgageError::InvalidInput {
            field: "years_staying".into(),
            reason: format!("Stay horizon cannot exceed {MAX_STAY_YEARS} years"),
        });
    }
    if let Some(dp) = input.down_payment_percent {
        if dp < Decimal::ZERO {
            return Err(MortgageError::InvalidInput {
                field: "down_payment_percent".into(),
                reason: "Down payment percent cannot be negative".into(),
            });
        }
    }
    if let Some(rate) = input.annual_rate_percent {
        if rate < Decimal::ZERO {
            return Err(MortgageError::InvalidInput {
                field: "annual_rate_percent".into(),
                reason: "Interest rate cannot be negative".into(),
            });
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Break-even heuristic
// ---------------------------------------------------------------------------

/// Rough linear break-even estimate, clamped to [0, 99].
///
/// This is a heuristic, not an exact law: the two branches compare
/// annualized equity gain against annualized extra cost when buying costs
/// more per month, and recovered upfront costs when it costs less. The
/// clamp value 99 is the "never" sentinel.
fn break_even_estimate(
    monthly_buy_cost: Money,
    monthly_rent: Money,
    total_upfront: Money,
    principal_paid: Money,
    appreciation_gain: Money,
    years: u32,
) -> Decimal {
    let years_dec = Decimal::from(years);

    let raw = if monthly_buy_cost > monthly_rent {
        // Buying costs more monthly but builds equity.
        let annual_equity_gain = principal_paid / years_dec + appreciation_gain / years_dec;
        let annual_extra_cost = (monthly_buy_cost - monthly_rent) * dec!(12);
        if annual_equity_gain > annual_extra_cost {
            total_upfront / (annual_equity_gain - annual_extra_cost)
        } else {
            BREAK_EVEN_CAP
        }
    } else {
        let annual_recovery = (monthly_rent - monthly_buy_cost) * dec!(12) + principal_paid / years_dec;
        if annual_recovery > Decimal::ZERO {
            total_upfront / annual_recovery
        } else {
            BREAK_EVEN_CAP
        }
    };

    round_ratio(raw.clamp(Decimal::ZERO, BREAK_EVEN_CAP))
}

// ---------------------------------------------------------------------------
// Recommendation policy
// ---------------------------------------------------------------------------

#[allow(clippy::too_many_arguments)]
fn recommend(
    policy: &LendingPolicy,
    years: u32,
    savings_if_buying: Money,
    equity_buildup: Money,
    total_rent_cost: Money,
    total_buy_cost: Money,
    total_fees: Money,
    rent_increase_percent: Percent,
    break_even_years: Decimal,
) -> (Recommendation, String) {
    if years < 3 {
        let reasoning = format!(
            "Keep renting. At {years} years, the ~{}% transaction fees ({} AED) would eat any \
             potential gains; it takes 3-4 years to recover them. Rent over {years} years: {} AED. \
             Buying costs excluding equity: {} AED.",
            policy.total_fees_percent(),
            fmt_aed(total_fees),
            fmt_aed(total_rent_cost),
            fmt_aed(total_buy_cost),
        );
        return (Recommendation::Rent, reasoning);
    }

    if years <= 5 {
        if savings_if_buying > BORDERLINE_BAND {
            let reasoning = format!(
                "Consider buying. Over {years} years you would build {} AED in equity at broadly \
                 similar monthly cost. Net benefit versus renting: about {} AED.",
                fmt_aed(equity_buildup),
                fmt_aed(savings_if_buying),
            );
            return (Recommendation::Buy, reasoning);
        }
        if savings_if_buying < -BORDERLINE_BAND {
            let reasoning = format!(
                "Keep renting. The numbers do not favour buying on a {years}-year timeline: \
                 upfront costs and the monthly difference would cost about {} AED more than renting.",
                fmt_aed(-savings_if_buying),
            );
            return (Recommendation::Rent, reasoning);
        }
        let reasoning = format!(
            "It's a close call. Over {years} years, buying and renting are financially similar — \
             the difference is only about {} AED. Stability and customizing your home favour \
             buying; flexibility to move favours renting.",
            fmt_aed(savings_if_buying.abs()),
        );
        return (Recommendation::Borderline, reasoning);
    }

    let reasoning = format!(
        "Buy. At {years}+ years, buying makes strong financial sense: equity after {years} years \
         is {} AED while {} AED of rent would be gone, with rent rising {rent_increase_percent}% \
         per year. Estimated break-even: about {break_even_years} years.",
        fmt_aed(equity_buildup),
        fmt_aed(total_rent_cost),
    );
    (Recommendation::Buy, reasoning)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde_json::Value;

use uae_mortgage_core::eligibility::{
    validate_eligibility, EligibilityInput, EmploymentType, Nationality,
};
use uae_mortgage_core::format::format_rules;
use uae_mortgage_core::LendingPolicy;

#[derive(Debug, Clone, ValueEnum)]
pub enum NationalityArg {
    Expat,
    UaeNational,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum EmploymentArg {
    Salaried,
    SelfEmployed,
    BusinessOwner,
}

impl From<NationalityArg> for Nationality {
    fn from(arg: NationalityArg) -> Self {
        match arg {
            NationalityArg::Expat => Nationality::Expat,
            NationalityArg::UaeNational => Nationality::UaeNational,
        }
    }
}

impl From<EmploymentArg> for EmploymentType {
    fn from(arg: EmploymentArg) -> Self {
        match arg {
            EmploymentArg::Salaried => EmploymentType::Salaried,
            EmploymentArg::SelfEmployed => EmploymentType::SelfEmployed,
            EmploymentArg::BusinessOwner => EmploymentType::BusinessOwner,
        }
    }
}

/// Arguments for the eligibility screen
#[derive(Args)]
pub struct EligibilityArgs {
    /// Applicant nationality class
    #[arg(long, value_enum)]
    pub nationality: NationalityArg,

    /// Gross monthly income in AED
    #[arg(long)]
    pub monthly_income: Decimal,

    /// Employment type
    #[arg(long, value_enum, default_value = "salaried")]
    pub employment_type: EmploymentArg,

    /// Years of UAE residency (fractions allowed, e.g. 0.5)
    #[arg(long, default_value = "0")]
    pub years_in_uae: Decimal,
}

pub fn run_eligibility(args: EligibilityArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let policy = LendingPolicy::default();
    let input = EligibilityInput {
        nationality: args.nationality.into(),
        monthly_income: args.monthly_income,
        employment_type: args.employment_type.into(),
        years_in_uae: args.years_in_uae,
    };
    let result = validate_eligibility(&policy, &input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_rules() -> String {
    format_rules(&LendingPolicy::default())
}

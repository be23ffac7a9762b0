use rust_decimal_macros::dec;
use uae_mortgage_core::eligibility::{
    validate_eligibility, EligibilityInput, EmploymentType, Nationality,
};
use uae_mortgage_core::LendingPolicy;

fn check(
    nationality: Nationality,
    income: rust_decimal::Decimal,
    employment: EmploymentType,
    years: rust_decimal::Decimal,
) -> uae_mortgage_core::eligibility::EligibilityReport {
    validate_eligibility(
        &LendingPolicy::default(),
        &EligibilityInput {
            nationality,
            monthly_income: income,
            employment_type: employment,
            years_in_uae: years,
        },
    )
    .unwrap()
    .result
}

#[test]
fn test_reference_low_income_expat() {
    // 10k salaried expat with a year of residency: blocked on income alone
    let r = check(Nationality::Expat, dec!(10000), EmploymentType::Salaried, dec!(1));

    assert!(!r.is_eligible);
    assert_eq!(r.issues.len(), 1);
    assert!(r.warnings.is_empty());
}

#[test]
fn test_income_floor_differs_by_nationality() {
    // 12k blocks an expat but clears a national
    let expat = check(Nationality::Expat, dec!(12000), EmploymentType::Salaried, dec!(3));
    let national = check(
        Nationality::UaeNational,
        dec!(12000),
        EmploymentType::Salaried,
        dec!(3),
    );

    assert!(!expat.is_eligible);
    assert!(national.is_eligible);
}

#[test]
fn test_ltv_caps_by_nationality() {
    let expat = check(Nationality::Expat, dec!(20000), EmploymentType::Salaried, dec!(3));
    let national = check(
        Nationality::UaeNational,
        dec!(20000),
        EmploymentType::Salaried,
        dec!(3),
    );

    assert_eq!(expat.max_ltv, dec!(0.80));
    assert_eq!(expat.min_down_payment_percent, dec!(20));
    assert_eq!(national.max_ltv, dec!(0.85));
    assert_eq!(national.min_down_payment_percent, dec!(15));
}

#[test]
fn test_self_employed_residency_blocker_is_expat_only() {
    let expat = check(
        Nationality::Expat,
        dec!(50000),
        EmploymentType::BusinessOwner,
        dec!(1),
    );
    let national = check(
        Nationality::UaeNational,
        dec!(50000),
        EmploymentType::BusinessOwner,
        dec!(1),
    );

    assert!(!expat.is_eligible);
    // Nationals get the documentation warning but no residency blocker
    assert!(national.is_eligible);
    assert!(!national.warnings.is_empty());
}

#[test]
fn test_warnings_never_affect_eligibility() {
    // Fresh salaried expat arrival: residency warning only
    let r = check(Nationality::Expat, dec!(20000), EmploymentType::Salaried, dec!(0.3));

    assert!(r.is_eligible, "warnings must not block eligibility");
    assert!(!r.warnings.is_empty());
    assert!(r.issues.is_empty());
}

#[test]
fn test_is_eligible_means_no_issues() {
    let combos = [
        (Nationality::Expat, dec!(9000), EmploymentType::SelfEmployed, dec!(0.1)),
        (Nationality::Expat, dec!(25000), EmploymentType::Salaried, dec!(5)),
        (Nationality::UaeNational, dec!(8000), EmploymentType::Salaried, dec!(10)),
    ];
    for (nat, income, emp, years) in combos {
        let r = check(nat, income, emp, years);
        assert_eq!(r.is_eligible, r.issues.is_empty());
    }
}

#[test]
fn test_multiple_issues_accumulate() {
    // Low income AND insufficient residency for a self-employed expat
    let r = check(
        Nationality::Expat,
        dec!(9000),
        EmploymentType::SelfEmployed,
        dec!(0.5),
    );

    assert!(!r.is_eligible);
    assert_eq!(r.issues.len(), 2);
}

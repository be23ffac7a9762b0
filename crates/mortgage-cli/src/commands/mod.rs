pub mod affordability;
pub mod buy_vs_rent;
pub mod eligibility;
pub mod loan;
pub mod tool;

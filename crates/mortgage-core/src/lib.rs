//! Deterministic UAE mortgage calculation engine.
//!
//! Pure, stateless functions over decimal arithmetic: amortization (EMI),
//! upfront transaction costs, income-based affordability, buy-vs-rent
//! comparison and eligibility screening. All policy numbers live in an
//! immutable [`policy::LendingPolicy`] record; no function performs I/O or
//! retains state, so every operation is safe under arbitrary concurrency
//! and returns byte-identical results for identical inputs.

pub mod affordability;
pub mod amortization;
pub mod buy_vs_rent;
pub mod eligibility;
pub mod error;
pub mod format;
pub mod policy;
pub mod tools;
pub mod types;
pub mod upfront;

pub use error::MortgageError;
pub use policy::LendingPolicy;
pub use types::*;

/// Standard result type for all mortgage engine operations
pub type MortgageResult<T> = Result<T, MortgageError>;

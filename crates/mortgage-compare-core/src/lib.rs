pub mod amortization;
pub mod balance;
pub mod comparison;
pub mod error;
pub mod inputs;
pub mod investment;
pub mod presentation;
pub mod report;
pub mod snapshot;
pub mod types;

pub use error::MortgageError;
pub use types::*;

/// Standard result type for the input and serialization boundaries
pub type MortgageResult<T> = Result<T, MortgageError>;

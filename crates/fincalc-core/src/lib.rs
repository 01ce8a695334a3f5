pub mod deposit;
pub mod error;
pub mod loan;
pub mod overpayment;
pub mod savings;
pub mod types;

pub use error::FincalcError;
pub use types::*;

/// Standard result type for all fincalc operations
pub type FincalcResult<T> = Result<T, FincalcError>;

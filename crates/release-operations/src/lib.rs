mod error;
pub mod lifecycle;
pub mod providers;
pub mod traits;

#[cfg(test)]
pub mod mocks;

pub use error::{OperationError, Result, VerificationErrors};

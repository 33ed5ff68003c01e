//! Crate-wide error type and result alias.

use thiserror::Error;

/// Errors surfaced by experiment construction and simulation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BanditError {
    /// A construction parameter violated its documented range or shape.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// A posterior or reward draw could not be performed.
    #[error("sampling failed: {0}")]
    Sampling(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, BanditError>;

//! Error types for the renormalization driver.

use thiserror::Error;

use braid_circuit::CircuitError;

/// Errors raised while configuring or running SBRG.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SbrgError {
    /// `max_rate` must be positive and finite.
    #[error("invalid max_rate {0} (must be positive and finite)")]
    InvalidMaxRate(f64),

    /// `tol` must be non-negative and finite.
    #[error("invalid tolerance {0} (must be non-negative and finite)")]
    InvalidTol(f64),

    /// An error from circuit construction or application.
    #[error(transparent)]
    Circuit(#[from] CircuitError),
}

/// Convenience alias used throughout the crate.
pub type SbrgResult<T> = Result<T, SbrgError>;

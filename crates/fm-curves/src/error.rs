//! Error types for curve construction.

use fm_core::FmError;
use thiserror::Error;

/// Configuration errors raised while building curve models.
///
/// Numerical edge cases during evaluation never surface here; they fall back
/// to safe values instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CurveError {
    #[error(
        "Fan curve geometry is ill-conditioned: (Q_ref/Q_max)^2 = {ratio_squared:.4} must stay below {limit}"
    )]
    IllConditioned { ratio_squared: f64, limit: f64 },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error(transparent)]
    Core(#[from] FmError),
}

pub type CurveResult<T> = Result<T, CurveError>;

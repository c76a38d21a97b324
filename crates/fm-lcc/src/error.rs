//! Error types for lifecycle cost evaluation.

use fm_core::FmError;
use fm_curves::CurveError;
use thiserror::Error;

/// Configuration errors. All are raised while building the model, before
/// any scenario is evaluated.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LccError {
    #[error("Configuration error: {what}")]
    Config { what: String },

    #[error("Operating profile hours ({profile_hours}) do not match total operating hours ({operating_hours}); adjust the profile to sum to {operating_hours} h/year")]
    ProfileHours {
        profile_hours: f64,
        operating_hours: f64,
    },

    #[error("Curve model error: {0}")]
    Curve(#[from] CurveError),

    #[error("Invalid parameter: {0}")]
    Parameter(#[from] FmError),
}

pub type LccResult<T> = Result<T, LccError>;

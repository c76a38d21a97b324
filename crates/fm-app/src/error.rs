//! Error types for the fm-app service layer.

use std::path::PathBuf;

/// Application error type that wraps errors from the backend crates and
/// gives the CLI one error surface.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Project error: {0}")]
    Project(String),

    #[error("Failed to read project file: {path}")]
    ProjectFileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Project validation failed: {0}")]
    Validation(String),

    #[error("Runtime compilation failed: {0}")]
    Compile(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for fm-app operations.
pub type AppResult<T> = Result<T, AppError>;

// Conversions from backend error types
impl From<fm_project::ProjectError> for AppError {
    fn from(err: fm_project::ProjectError) -> Self {
        AppError::Project(err.to_string())
    }
}

impl From<fm_project::ValidationError> for AppError {
    fn from(err: fm_project::ValidationError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<fm_lcc::LccError> for AppError {
    fn from(err: fm_lcc::LccError) -> Self {
        AppError::Compile(err.to_string())
    }
}

impl From<fm_curves::CurveError> for AppError {
    fn from(err: fm_curves::CurveError) -> Self {
        AppError::Compile(err.to_string())
    }
}

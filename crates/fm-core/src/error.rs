use thiserror::Error;

pub type FmResult<T> = Result<T, FmError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FmError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Invalid argument: {what} (got {value})")]
    InvalidArg { what: &'static str, value: f64 },
}

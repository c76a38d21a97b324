//! fm-core: shared foundation for the fan margin workspace.
//!
//! Contains:
//! - units (uom SI types + datasheet unit constructors)
//! - numeric (Real + tolerances + interpolation and guarded arithmetic)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{FmError, FmResult};
pub use numeric::*;
pub use units::*;

//! Fan and system characteristic curves.
//!
//! This crate holds the closed-form performance model of a variable-speed
//! booster fan: affinity-law scaling, the static + dynamic system resistance
//! curve, the parametric fan curve anchored to a datasheet point, and the
//! operating-point solvers that estimate shaft speed and interpolate fan
//! efficiency across flow and speed.

pub mod affinity;
pub mod error;
pub mod fan_curve;
pub mod operating_point;
pub mod system_curve;

pub use affinity::{fan_affinity_flow, fan_affinity_power, fan_affinity_pressure};
pub use error::{CurveError, CurveResult};
pub use fan_curve::{FanCurve, FanCurveModel, FanCurveSample, FanModelParams};
pub use operating_point::{
    FanEfficiency, OperatingPointSolver, SolverBounds, SpeedGrid, MAX_GRID_SPEEDS,
};
pub use system_curve::{DatasheetPoint, SystemCurve};

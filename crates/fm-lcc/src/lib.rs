//! Lifecycle cost engine for a VFD-driven booster fan.
//!
//! Given a flow design margin above the nominal duty, the engine sizes the
//! fan and motor, integrates annual energy over a part-load operating
//! profile (or the nominal point alone), and aggregates CAPEX, escalated and
//! discounted OPEX, and CO2 emissions into a [`LifecycleCostResult`].
//!
//! Every evaluation is a pure function of the margin and the immutable
//! [`LifecycleConfig`], so sweeps can run in parallel.

pub mod config;
pub mod engine;
pub mod error;
pub mod npv;
pub mod result;
pub mod sweep;

pub use config::{
    Datasheet, Economics, LifecycleConfig, OperatingProfile, ProfileSegment,
    PROFILE_HOURS_TOLERANCE,
};
pub use engine::{fan_shaft_power_kw, DesignScenario, EnergyMode, LifecycleModel};
pub use error::{LccError, LccResult};
pub use npv::{npv_opex, opex_schedule, YearlyOpex};
pub use result::{LifecycleCostResult, SegmentEnergy};
pub use sweep::{
    run_sweep, run_sweep_parallel, MarginSweep, SweepResult, MAX_SWEEP_POINTS,
};

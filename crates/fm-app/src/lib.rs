//! Shared application service layer for fanmargin.
//!
//! This crate gives the command-line front end one place for project
//! management, runtime compilation, scenario evaluation, reporting, and
//! plot-ready series extraction.

pub mod error;
pub mod export;
pub mod project_service;
pub mod query;
pub mod report;
pub mod run_service;
pub mod runtime_compile;

// Re-export key types for convenience
pub use error::{AppError, AppResult};
pub use project_service::{
    describe_project, load_project, save_project, validate_project, ProjectSummary,
};
pub use query::{
    drive_efficiency_series, fan_curve_series, operating_points, sweep_series,
    system_curve_series, DriveSeries, OperatingPointRow,
};
pub use report::{
    build_recommendation, build_summary, classify_margin, margin_cost_slope, Recommendation,
    ScenarioClass, Summary, SummaryRow,
};
pub use run_service::{compare_modes, evaluate, run_sweep, ModeComparison};
pub use runtime_compile::{build_economics, build_profile, build_sweep, compile_project};

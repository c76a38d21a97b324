//! Scenario and sweep execution.

use std::time::Instant;

use fm_lcc::{EnergyMode, LifecycleCostResult, LifecycleModel, MarginSweep, SweepResult};
use tracing::info;

/// The same margin evaluated with both energy integration modes.
#[derive(Debug, Clone)]
pub struct ModeComparison {
    pub profile: LifecycleCostResult,
    pub nominal_only: LifecycleCostResult,
}

impl ModeComparison {
    /// Profile energy minus nominal-only energy (kWh/year).
    pub fn energy_difference_kwh(&self) -> f64 {
        self.profile.annual_energy_kwh - self.nominal_only.annual_energy_kwh
    }

    /// Profile total minus nominal-only total (€).
    pub fn total_cost_difference(&self) -> f64 {
        self.profile.total_lifecycle_cost - self.nominal_only.total_lifecycle_cost
    }
}

pub fn evaluate(model: &LifecycleModel, margin: f64, mode: EnergyMode) -> LifecycleCostResult {
    model.calculate_lifecycle_cost(margin, mode)
}

/// Run a margin sweep, optionally on the rayon pool.
pub fn run_sweep(
    model: &LifecycleModel,
    sweep: &MarginSweep,
    mode: EnergyMode,
    parallel: bool,
) -> SweepResult {
    let started = Instant::now();
    let result = if parallel {
        fm_lcc::run_sweep_parallel(model, sweep, mode)
    } else {
        fm_lcc::run_sweep(model, sweep, mode)
    };
    info!(
        points = result.results.len(),
        mode = mode.label(),
        parallel,
        elapsed_ms = started.elapsed().as_secs_f64() * 1000.0,
        "Sweep finished"
    );
    result
}

pub fn compare_modes(model: &LifecycleModel, margin: f64) -> ModeComparison {
    ModeComparison {
        profile: model.calculate_lifecycle_cost(margin, EnergyMode::Profile),
        nominal_only: model.calculate_lifecycle_cost(margin, EnergyMode::NominalOnly),
    }
}

//! Design-margin sensitivity sweeps.
//!
//! Each margin is evaluated independently against the same immutable model,
//! so the parallel run returns exactly the sequential results in the same
//! order.

use crate::engine::{EnergyMode, LifecycleModel};
use crate::error::{LccError, LccResult};
use crate::result::LifecycleCostResult;
use fm_curves::FanEfficiency;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Upper limit on the number of margins in one sweep.
pub const MAX_SWEEP_POINTS: usize = 10_000;

/// Inclusive range of design margins (%).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MarginSweep {
    pub start: f64,
    pub end: f64,
    pub step: f64,
}

impl Default for MarginSweep {
    fn default() -> Self {
        Self {
            start: 10.0,
            end: 34.0,
            step: 1.0,
        }
    }
}

impl MarginSweep {
    pub fn new(start: f64, end: f64, step: f64) -> LccResult<Self> {
        if !(step > 0.0) || !start.is_finite() || !end.is_finite() || end < start {
            return Err(LccError::Config {
                what: format!("invalid margin sweep {start}..={end} step {step}"),
            });
        }
        let count = (end - start) / step + 1.0;
        if count > MAX_SWEEP_POINTS as f64 {
            return Err(LccError::Config {
                what: format!(
                    "margin sweep {start}..={end} step {step} has {count:.0} points, limit is {MAX_SWEEP_POINTS}"
                ),
            });
        }
        Ok(Self { start, end, step })
    }

    /// Margins `start, start + step, ...` up to and including `end`, at most
    /// [`MAX_SWEEP_POINTS`] of them.
    pub fn margins(&self) -> Vec<f64> {
        if !(self.step > 0.0) || self.end < self.start {
            return Vec::new();
        }
        let steps = ((self.end - self.start) / self.step + 1e-9).floor();
        let count = steps.min((MAX_SWEEP_POINTS - 1) as f64) as usize + 1;
        (0..count)
            .map(|i| self.start + i as f64 * self.step)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.margins().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Ordered sweep results with column accessors for tables and plots.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SweepResult {
    pub mode: EnergyMode,
    pub results: Vec<LifecycleCostResult>,
}

impl SweepResult {
    pub fn margins(&self) -> Vec<f64> {
        self.column(|r| r.design_margin_pct)
    }

    pub fn capex(&self) -> Vec<f64> {
        self.column(|r| r.capex)
    }

    pub fn npv_opex(&self) -> Vec<f64> {
        self.column(|r| r.npv_opex)
    }

    pub fn total_lifecycle_cost(&self) -> Vec<f64> {
        self.column(|r| r.total_lifecycle_cost)
    }

    pub fn annual_co2_tons(&self) -> Vec<f64> {
        self.column(|r| r.annual_co2_tons)
    }

    pub fn motor_rated_kw(&self) -> Vec<f64> {
        self.column(|r| r.motor_rated_kw)
    }

    pub fn avg_motor_load_pct(&self) -> Vec<f64> {
        self.column(|r| r.avg_motor_load_pct)
    }

    /// Result with the lowest total lifecycle cost.
    pub fn cheapest(&self) -> Option<&LifecycleCostResult> {
        self.results
            .iter()
            .min_by(|a, b| a.total_lifecycle_cost.total_cmp(&b.total_lifecycle_cost))
    }

    fn column(&self, f: impl Fn(&LifecycleCostResult) -> f64) -> Vec<f64> {
        self.results.iter().map(f).collect()
    }
}

/// Evaluate every margin in order on the current thread.
pub fn run_sweep<E: FanEfficiency>(
    model: &LifecycleModel<E>,
    sweep: &MarginSweep,
    mode: EnergyMode,
) -> SweepResult {
    let results = sweep
        .margins()
        .into_iter()
        .map(|m| model.calculate_lifecycle_cost(m, mode))
        .collect();
    SweepResult { mode, results }
}

/// Evaluate every margin on the rayon pool; order matches [`run_sweep`].
pub fn run_sweep_parallel<E: FanEfficiency>(
    model: &LifecycleModel<E>,
    sweep: &MarginSweep,
    mode: EnergyMode,
) -> SweepResult {
    let results = sweep
        .margins()
        .into_par_iter()
        .map(|m| model.calculate_lifecycle_cost(m, mode))
        .collect();
    SweepResult { mode, results }
}

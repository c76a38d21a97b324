//! Operating-point solvers.
//!
//! Speed is estimated by inverting the quadratic affinity law against the
//! reference-speed curve. Fan efficiency at an arbitrary (flow, pressure) is
//! then interpolated in two stages: along flow on the two grid curves that
//! bracket the estimated speed, and across those curves by speed. Snapping to
//! the nearest discrete curve instead would make efficiency jump between grid
//! speeds.
//!
//! Grid curves are generated once at construction and shared read-only, so a
//! solver can be used from several threads during a sweep.

use crate::error::{CurveError, CurveResult};
use crate::fan_curve::{FanCurve, FanCurveModel};
use fm_core::safe_div;
use std::borrow::Cow;

/// Fan performance lookup at a duty point, flow in m³/h and pressure rise
/// in mbar.
pub trait FanEfficiency: Send + Sync {
    /// Efficiency (%)
    fn efficiency_at(&self, flow: f64, pressure: f64) -> f64;

    /// Shaft speed (rpm)
    fn speed_at(&self, flow: f64, pressure: f64) -> f64;
}

/// Upper limit on grid speeds; one fan curve is cached per speed.
pub const MAX_GRID_SPEEDS: usize = 1_000;

/// Discrete speeds used for efficiency interpolation, strictly increasing.
#[derive(Clone, Debug, PartialEq)]
pub struct SpeedGrid {
    speeds: Vec<f64>,
}

impl SpeedGrid {
    /// Grid from explicit speeds.
    pub fn new(speeds: Vec<f64>) -> CurveResult<Self> {
        if speeds.len() < 2 {
            return Err(CurveError::InvalidArg {
                what: "speed grid needs at least two speeds",
            });
        }
        if speeds.len() > MAX_GRID_SPEEDS {
            return Err(CurveError::InvalidArg {
                what: "speed grid has too many speeds",
            });
        }
        if speeds.windows(2).any(|w| w[1] <= w[0]) {
            return Err(CurveError::InvalidArg {
                what: "speed grid must be strictly increasing",
            });
        }
        Ok(Self { speeds })
    }

    /// Inclusive grid `start, start + step, ..., end`.
    pub fn stepped(start: f64, end: f64, step: f64) -> CurveResult<Self> {
        if !(step > 0.0) || !(end > start) {
            return Err(CurveError::InvalidArg {
                what: "speed grid needs end > start and a positive step",
            });
        }
        let steps = ((end - start) / step + 1e-9).floor();
        if steps >= MAX_GRID_SPEEDS as f64 {
            return Err(CurveError::InvalidArg {
                what: "speed grid has too many speeds",
            });
        }
        let count = steps as usize + 1;
        Self::new((0..count).map(|i| start + i as f64 * step).collect())
    }

    pub fn speeds(&self) -> &[f64] {
        &self.speeds
    }

    /// Indices of the two grid speeds around `speed`.
    ///
    /// Outside the grid the first or last pair is returned, so the speed
    /// fraction between them falls outside `[0, 1]`.
    pub fn bracket(&self, speed: f64) -> (usize, usize) {
        let upper = self.speeds.partition_point(|&s| s < speed);
        let lower = upper.saturating_sub(1).min(self.speeds.len() - 2);
        (lower, lower + 1)
    }
}

/// Clamps applied by the solvers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SolverBounds {
    /// Mechanical speed range (rpm)
    pub min_speed: f64,
    pub max_speed: f64,
    /// Plausible efficiency range (%)
    pub min_efficiency: f64,
    pub max_efficiency: f64,
    /// Speeds this close to the lower grid speed use that curve directly
    pub snap_tolerance: f64,
}

impl Default for SolverBounds {
    fn default() -> Self {
        Self {
            min_speed: 800.0,
            max_speed: 1600.0,
            min_efficiency: 30.0,
            max_efficiency: 90.0,
            snap_tolerance: 1.0,
        }
    }
}

/// Speed estimation and bilinear efficiency interpolation over a cached
/// curve bank.
#[derive(Clone, Debug)]
pub struct OperatingPointSolver {
    model: FanCurveModel,
    grid: SpeedGrid,
    bounds: SolverBounds,
    reference_curve: FanCurve,
    grid_curves: Vec<FanCurve>,
}

impl OperatingPointSolver {
    pub fn new(model: FanCurveModel, grid: SpeedGrid, bounds: SolverBounds) -> CurveResult<Self> {
        if !(bounds.max_speed > bounds.min_speed) {
            return Err(CurveError::InvalidArg {
                what: "speed bounds must satisfy min < max",
            });
        }
        if !(bounds.max_efficiency > bounds.min_efficiency) {
            return Err(CurveError::InvalidArg {
                what: "efficiency bounds must satisfy min < max",
            });
        }

        let reference_curve = model.curve(model.reference_speed());
        let grid_curves = grid.speeds().iter().map(|&s| model.curve(s)).collect();

        Ok(Self {
            model,
            grid,
            bounds,
            reference_curve,
            grid_curves,
        })
    }

    pub fn model(&self) -> &FanCurveModel {
        &self.model
    }

    pub fn grid(&self) -> &SpeedGrid {
        &self.grid
    }

    pub fn bounds(&self) -> &SolverBounds {
        &self.bounds
    }

    /// Curve at `speed`, borrowed from the cache when it is a grid or the
    /// reference speed.
    pub fn curve_at(&self, speed: f64) -> Cow<'_, FanCurve> {
        if speed == self.reference_curve.speed {
            return Cow::Borrowed(&self.reference_curve);
        }
        match self.grid.speeds().iter().position(|&s| s == speed) {
            Some(idx) => Cow::Borrowed(&self.grid_curves[idx]),
            None => Cow::Owned(self.model.curve(speed)),
        }
    }

    /// Shaft speed needed to deliver `pressure` (mbar) at `flow` (m³/h).
    ///
    /// Inverts `P ∝ N²` against the reference-speed curve. A non-positive
    /// reference pressure returns the reference speed unchanged. The result is
    /// clamped to the mechanical speed range.
    pub fn estimate_speed(&self, flow: f64, pressure: f64) -> f64 {
        let reference_speed = self.model.reference_speed();
        let pressure_at_reference = self.reference_curve.pressure_at(flow);

        let speed = if pressure_at_reference > 0.0 {
            let ratio = safe_div(pressure.max(0.0), pressure_at_reference, 1.0).sqrt();
            reference_speed * ratio
        } else {
            reference_speed
        };

        speed.clamp(self.bounds.min_speed, self.bounds.max_speed)
    }

    /// Fan efficiency (%) at `flow` (m³/h) and `pressure` (mbar).
    pub fn interpolate_efficiency(&self, flow: f64, pressure: f64) -> f64 {
        let speed = self.estimate_speed(flow, pressure);
        let (lo, hi) = self.grid.bracket(speed);
        let speed_lo = self.grid.speeds()[lo];
        let speed_hi = self.grid.speeds()[hi];

        let eff_lo = self.grid_curves[lo].efficiency_at(flow);
        let eff_hi = self.grid_curves[hi].efficiency_at(flow);

        let efficiency =
            if speed_lo == speed_hi || (speed - speed_lo).abs() < self.bounds.snap_tolerance {
                eff_lo
            } else {
                let w = safe_div(speed - speed_lo, speed_hi - speed_lo, 0.0);
                (1.0 - w) * eff_lo + w * eff_hi
            };

        efficiency.clamp(self.bounds.min_efficiency, self.bounds.max_efficiency)
    }
}

impl FanEfficiency for OperatingPointSolver {
    fn efficiency_at(&self, flow: f64, pressure: f64) -> f64 {
        self.interpolate_efficiency(flow, pressure)
    }

    fn speed_at(&self, flow: f64, pressure: f64) -> f64 {
        self.estimate_speed(flow, pressure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fan_curve::FanModelParams;

    fn solver() -> OperatingPointSolver {
        let model = FanCurveModel::new(FanModelParams::anchored(1500.0, 177_521.0, 103.9)).unwrap();
        let grid = SpeedGrid::stepped(1000.0, 1500.0, 100.0).unwrap();
        OperatingPointSolver::new(model, grid, SolverBounds::default()).unwrap()
    }

    #[test]
    fn stepped_grid_is_inclusive() {
        let grid = SpeedGrid::stepped(1000.0, 1600.0, 100.0).unwrap();
        assert_eq!(
            grid.speeds(),
            &[1000.0, 1100.0, 1200.0, 1300.0, 1400.0, 1500.0, 1600.0]
        );
    }

    #[test]
    fn grid_rejects_bad_input() {
        assert!(SpeedGrid::new(vec![1000.0]).is_err());
        assert!(SpeedGrid::new(vec![1000.0, 1000.0]).is_err());
        assert!(SpeedGrid::stepped(1000.0, 1600.0, 0.0).is_err());
        assert!(SpeedGrid::stepped(1600.0, 1000.0, 100.0).is_err());
    }

    #[test]
    fn grid_size_is_bounded() {
        assert!(SpeedGrid::stepped(1000.0, 1500.0, 1e-12).is_err());
        assert!(SpeedGrid::stepped(0.0, 999.0, 1.0).is_ok());
        assert!(SpeedGrid::stepped(0.0, 1000.0, 1.0).is_err());
        let speeds: Vec<f64> = (0..=MAX_GRID_SPEEDS).map(|i| i as f64).collect();
        assert!(SpeedGrid::new(speeds).is_err());
    }

    #[test]
    fn bracket_selection() {
        let grid = SpeedGrid::stepped(1000.0, 1600.0, 100.0).unwrap();
        assert_eq!(grid.bracket(1250.0), (2, 3));
        assert_eq!(grid.bracket(1200.0), (1, 2));
        assert_eq!(grid.bracket(900.0), (0, 1));
        assert_eq!(grid.bracket(1000.0), (0, 1));
        assert_eq!(grid.bracket(1600.0), (5, 6));
        assert_eq!(grid.bracket(1700.0), (5, 6));
    }

    #[test]
    fn anchor_point_needs_reference_speed() {
        let s = solver();
        let speed = s.estimate_speed(177_521.0, 103.9);
        assert!((speed - 1500.0).abs() < 1.0, "speed = {speed}");
    }

    #[test]
    fn speed_follows_square_root_of_pressure() {
        let s = solver();
        let flow = 100_000.0;
        let p_ref = s.curve_at(1500.0).pressure_at(flow);
        let speed = s.estimate_speed(flow, p_ref * 0.81);
        assert!((speed - 1350.0).abs() < 1e-6);
    }

    #[test]
    fn speed_is_clamped_to_mechanical_range() {
        let s = solver();
        assert_eq!(s.estimate_speed(100_000.0, 1.0), 800.0);
        assert_eq!(s.estimate_speed(100_000.0, 10_000.0), 1600.0);
        assert_eq!(s.estimate_speed(100_000.0, -5.0), 800.0);
    }

    #[test]
    fn zero_reference_pressure_keeps_reference_speed() {
        let mut params = FanModelParams::anchored(1500.0, 177_521.0, 103.9);
        // sample past free delivery so the tail of the curve sits at zero
        params.span_ratio = 1.5;
        let model = FanCurveModel::new(params).unwrap();
        let grid = SpeedGrid::stepped(1000.0, 1600.0, 100.0).unwrap();
        let s = OperatingPointSolver::new(model, grid, SolverBounds::default()).unwrap();
        assert_eq!(s.estimate_speed(1e6, 50.0), 1500.0);
    }

    #[test]
    fn cached_curves_are_borrowed() {
        let s = solver();
        assert!(matches!(s.curve_at(1200.0), Cow::Borrowed(_)));
        assert!(matches!(s.curve_at(1500.0), Cow::Borrowed(_)));
        assert!(matches!(s.curve_at(1234.0), Cow::Owned(_)));
        assert_eq!(*s.curve_at(1200.0), s.model().curve(1200.0));
    }

    #[test]
    fn efficiency_on_grid_speed_matches_curve() {
        let s = solver();
        let flow = 150_000.0;
        // Duty point whose affinity inversion lands exactly on 1200 rpm
        let p = s.curve_at(1500.0).pressure_at(flow) * (1200.0_f64 / 1500.0).powi(2);
        let speed = s.estimate_speed(flow, p);
        assert!((speed - 1200.0).abs() < 1e-6, "speed = {speed}");

        let eff = s.interpolate_efficiency(flow, p);
        let expected = s.curve_at(1200.0).efficiency_at(flow);
        assert!((eff - expected).abs() < 1e-9, "eff = {eff}, expected = {expected}");
    }

    #[test]
    fn efficiency_is_clamped() {
        let s = solver();
        // Near shutoff the Gaussian is tiny
        assert_eq!(s.interpolate_efficiency(1.0, 200.0), 30.0);
        let eff = s.interpolate_efficiency(134_754.0, 59.3);
        assert!((30.0..=90.0).contains(&eff));
    }

    #[test]
    fn reference_duty_points() {
        let s = solver();
        let speed = s.estimate_speed(134_754.0, 59.3);
        assert!((speed - 891.95).abs() < 0.5, "speed = {speed}");
        let eff = s.interpolate_efficiency(134_754.0, 59.3);
        assert!((eff - 63.31).abs() < 0.1, "eff = {eff}");
    }

    #[test]
    fn rejects_inverted_bounds() {
        let model = FanCurveModel::new(FanModelParams::anchored(1500.0, 177_521.0, 103.9)).unwrap();
        let grid = SpeedGrid::stepped(1000.0, 1600.0, 100.0).unwrap();
        let bounds = SolverBounds {
            min_speed: 1600.0,
            max_speed: 800.0,
            ..SolverBounds::default()
        };
        assert!(OperatingPointSolver::new(model, grid, bounds).is_err());
    }
}

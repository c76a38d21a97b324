//! Continuity of the two-stage efficiency interpolation.
//!
//! The snap to the lower grid curve within 1 rpm leaves steps of roughly a
//! tenth of a percentage point, so the bound used here is 0.25.

use fm_curves::{
    DatasheetPoint, FanCurveModel, FanModelParams, OperatingPointSolver, SolverBounds, SpeedGrid,
    SystemCurve,
};
use proptest::prelude::*;

fn reference_solver() -> OperatingPointSolver {
    let model = FanCurveModel::new(FanModelParams::anchored(1500.0, 177_521.0, 103.9)).unwrap();
    let grid = SpeedGrid::stepped(1000.0, 1500.0, 100.0).unwrap();
    OperatingPointSolver::new(model, grid, SolverBounds::default()).unwrap()
}

#[test]
fn efficiency_has_no_jumps_along_the_system_curve() {
    let solver = reference_solver();
    let system = SystemCurve::fit(
        DatasheetPoint::new(134_754.0, 59.3),
        DatasheetPoint::new(142_017.0, 65.8),
    );

    // Walk the design points of a 10..34 % margin sweep in fine steps
    let mut previous: Option<f64> = None;
    let mut flow = 134_754.0 * 1.10;
    while flow <= 134_754.0 * 1.34 {
        let eff = solver.interpolate_efficiency(flow, system.pressure_at(flow));
        if let Some(prev) = previous {
            assert!(
                (eff - prev).abs() < 0.25,
                "jump at flow {flow}: {prev} -> {eff}"
            );
        }
        previous = Some(eff);
        flow += 50.0;
    }
}

#[test]
fn efficiency_is_smooth_across_a_grid_speed() {
    let solver = reference_solver();
    let flow = 150_000.0;
    let p_grid = solver.curve_at(1300.0).pressure_at(flow);

    let below = solver.interpolate_efficiency(flow, p_grid * 0.999);
    let above = solver.interpolate_efficiency(flow, p_grid * 1.001);
    assert!((below - above).abs() < 0.25, "{below} vs {above}");
}

proptest! {
    #[test]
    fn continuous_in_flow(flow in 90_000.0_f64..200_000.0, pressure in 30.0_f64..110.0) {
        let solver = reference_solver();
        let a = solver.interpolate_efficiency(flow, pressure);
        let b = solver.interpolate_efficiency(flow + 1.0, pressure);
        prop_assert!((a - b).abs() < 0.25, "{} vs {}", a, b);
    }

    #[test]
    fn continuous_in_pressure(flow in 90_000.0_f64..200_000.0, pressure in 30.0_f64..110.0) {
        let solver = reference_solver();
        let a = solver.interpolate_efficiency(flow, pressure);
        let b = solver.interpolate_efficiency(flow, pressure + 0.001);
        prop_assert!((a - b).abs() < 0.25, "{} vs {}", a, b);
    }

    #[test]
    fn fit_static_pressure_never_negative(
        qa in 1_000.0_f64..200_000.0,
        dq in 1.0_f64..100_000.0,
        pa in 1.0_f64..100.0,
        dp in 0.01_f64..100.0,
    ) {
        let a = DatasheetPoint::new(qa, pa);
        let b = DatasheetPoint::new(qa + dq, pa + dp);
        let curve = SystemCurve::fit(a, b);
        prop_assert!(curve.static_pressure >= 0.0);
        prop_assert!(curve.dynamic_coefficient >= 0.0);
        let reversed = SystemCurve::fit(b, a);
        prop_assert!(reversed.static_pressure >= 0.0);
    }
}

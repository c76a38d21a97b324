//! Induction motor efficiency versus load.
//!
//! Piecewise-linear fit typical of large IE3/IE4 motors: poor below 25 %
//! load, rising to a plateau around 95-96 % between 75 % and full load, and
//! falling off in overload. The bands meet exactly at 25, 50, 75 and 100 %.

/// Efficiency fraction at `load_pct` percent of rated power.
pub fn motor_efficiency(load_pct: f64) -> f64 {
    let l = load_pct;
    if l < 25.0 {
        0.60 + 0.0072 * l
    } else if l < 50.0 {
        0.78 + 0.0048 * (l - 25.0)
    } else if l < 75.0 {
        0.90 + 0.0020 * (l - 50.0)
    } else if l <= 100.0 {
        0.95 + 0.0004 * (l - 75.0)
    } else {
        (0.96 - 0.001 * (l - 100.0)).max(0.85)
    }
}

/// Efficiency for each load in `loads`.
pub fn motor_efficiency_curve(loads: &[f64]) -> Vec<f64> {
    loads.iter().map(|&l| motor_efficiency(l)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn band_values() {
        assert!((motor_efficiency(0.0) - 0.60).abs() < EPS);
        assert!((motor_efficiency(25.0) - 0.78).abs() < EPS);
        assert!((motor_efficiency(50.0) - 0.90).abs() < EPS);
        assert!((motor_efficiency(75.0) - 0.95).abs() < EPS);
        assert!((motor_efficiency(100.0) - 0.96).abs() < EPS);
    }

    #[test]
    fn continuous_at_breakpoints() {
        for bp in [25.0, 50.0, 75.0, 100.0] {
            let left = motor_efficiency(bp - 1e-9);
            let right = motor_efficiency(bp + 1e-9);
            let at = motor_efficiency(bp);
            assert!((left - right).abs() < 1e-9, "breakpoint {bp}");
            assert!((left - at).abs() < 1e-9, "breakpoint {bp}");
        }
    }

    #[test]
    fn overload_floor() {
        assert!((motor_efficiency(150.0) - 0.91).abs() < EPS);
        assert_eq!(motor_efficiency(500.0), 0.85);
    }

    #[test]
    fn sequence_form_preserves_length() {
        let loads = [10.0, 30.0, 60.0, 90.0, 120.0];
        let effs = motor_efficiency_curve(&loads);
        assert_eq!(effs.len(), loads.len());
        for (l, e) in loads.iter().zip(&effs) {
            assert_eq!(*e, motor_efficiency(*l));
        }
        assert!(motor_efficiency_curve(&[]).is_empty());
    }
}

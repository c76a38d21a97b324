//! Plot-ready series for external plotting and CSV export.

use fm_core::linspace;
use fm_curves::FanCurve;
use fm_drive::{motor_efficiency_curve, vfd_efficiency_curve};
use fm_lcc::{LifecycleModel, SweepResult};

use crate::error::{AppError, AppResult};

/// Fan curves at each requested speed (rpm).
pub fn fan_curve_series(model: &LifecycleModel, speeds: &[f64]) -> Vec<FanCurve> {
    speeds
        .iter()
        .map(|&s| model.solver().curve_at(s).into_owned())
        .collect()
}

/// System curve through the nominal point, sampled from zero flow to
/// `max_flow` (m³/h).
pub fn system_curve_series(
    model: &LifecycleModel,
    max_flow: f64,
    points: usize,
) -> AppResult<Vec<(f64, f64)>> {
    if !(max_flow > 0.0) || points < 2 {
        return Err(AppError::InvalidInput(format!(
            "System curve needs a positive flow range and at least two points (got {} m3/h, {} points)",
            max_flow, points
        )));
    }
    let reference = model.config().datasheet().nominal;
    let flows = linspace(0.0, max_flow, points);
    Ok(model.system_curve().sample(&flows, reference))
}

/// Motor, VFD and combined efficiency (fractions) over a load range.
#[derive(Debug, Clone)]
pub struct DriveSeries {
    pub load_pct: Vec<f64>,
    pub motor: Vec<f64>,
    pub vfd: Vec<f64>,
    pub combined: Vec<f64>,
}

pub fn drive_efficiency_series(max_load_pct: f64, points: usize) -> AppResult<DriveSeries> {
    if !(max_load_pct > 0.0) || points < 2 {
        return Err(AppError::InvalidInput(format!(
            "Drive series needs a positive load range and at least two points (got {}%, {} points)",
            max_load_pct, points
        )));
    }
    let load_pct = linspace(0.0, max_load_pct, points);
    let motor = motor_efficiency_curve(&load_pct);
    let vfd = vfd_efficiency_curve(&load_pct, None);
    let combined = motor.iter().zip(&vfd).map(|(m, v)| m * v).collect();
    Ok(DriveSeries {
        load_pct,
        motor,
        vfd,
        combined,
    })
}

/// A datasheet point located on the fan map.
#[derive(Debug, Clone)]
pub struct OperatingPointRow {
    pub label: String,
    pub flow: f64,
    pub pressure: f64,
    pub speed: f64,
    pub efficiency: f64,
}

pub fn operating_points(model: &LifecycleModel) -> Vec<OperatingPointRow> {
    model
        .config()
        .datasheet()
        .points()
        .into_iter()
        .map(|(label, p)| OperatingPointRow {
            label: label.to_string(),
            flow: p.flow,
            pressure: p.pressure,
            speed: model.estimate_speed(p.flow, p.pressure),
            efficiency: model.fan_efficiency(p.flow, p.pressure),
        })
        .collect()
}

/// (margin, value) pairs for one sweep variable.
pub fn sweep_series(sweep: &SweepResult, variable: &str) -> AppResult<Vec<(f64, f64)>> {
    let values = match variable {
        "capex" => sweep.capex(),
        "npv_opex" => sweep.npv_opex(),
        "total" | "total_lifecycle_cost" => sweep.total_lifecycle_cost(),
        "co2" | "annual_co2_tons" => sweep.annual_co2_tons(),
        "motor_rated_kw" | "motor_size" => sweep.motor_rated_kw(),
        "motor_load" | "avg_motor_load_pct" => sweep.avg_motor_load_pct(),
        _ => {
            return Err(AppError::InvalidInput(format!(
                "Unknown sweep variable: {}",
                variable
            )));
        }
    };
    Ok(sweep.margins().into_iter().zip(values).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drive_series_is_aligned() {
        let series = drive_efficiency_series(120.0, 121).unwrap();
        assert_eq!(series.load_pct.len(), 121);
        assert_eq!(series.motor.len(), 121);
        assert_eq!(series.vfd.len(), 121);
        assert!((series.combined[80] - series.motor[80] * series.vfd[80]).abs() < 1e-15);
    }

    #[test]
    fn drive_series_rejects_empty_range() {
        assert!(drive_efficiency_series(0.0, 10).is_err());
        assert!(drive_efficiency_series(100.0, 1).is_err());
    }
}

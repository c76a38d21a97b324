//! CSV writers.
//!
//! Each writer returns the CSV text; [`write_csv`] stores it or prints it.

use std::fmt::Write as _;
use std::path::Path;

use fm_curves::FanCurve;
use fm_lcc::SweepResult;

use crate::error::{AppError, AppResult};
use crate::query::{DriveSeries, OperatingPointRow};
use crate::report::Summary;

pub const SUMMARY_HEADER: [&str; 19] = [
    "Design_Margin_%",
    "Design_Type",
    "Motor_Size_kW",
    "Motor_Load_%",
    "Motor_Efficiency_%",
    "Annual_OPEX_EUR",
    "CAPEX_EUR",
    "NPV_OPEX_EUR",
    "Total_Lifecycle_Cost_EUR",
    "Annual_CO2_Tons",
    "Delta_OPEX_vs_Baseline_EUR",
    "Delta_CAPEX_vs_Baseline_EUR",
    "Delta_NPV_OPEX_vs_Baseline_EUR",
    "Delta_Total_LC_vs_Baseline_EUR",
    "Delta_CO2_vs_Baseline_Tons",
    "Flow_Design_m3h",
    "Pressure_Design_mbar",
    "Annual_Energy_kWh",
    "Annual_Maintenance_EUR",
];

/// Summary table, rounded as in the printed report.
pub fn summary_csv(summary: &Summary) -> String {
    let mut csv = SUMMARY_HEADER.join(",");
    csv.push('\n');
    for row in &summary.rows {
        let r = &row.result;
        let _ = writeln!(
            csv,
            "{},{},{:.1},{:.1},{:.1},{:.0},{:.0},{:.0},{:.0},{:.1},{:.0},{:.0},{:.0},{:.0},{:.1},{:.0},{:.1},{:.0},{:.0}",
            row.margin(),
            row.class.label(),
            r.motor_rated_kw,
            r.avg_motor_load_pct,
            r.avg_motor_efficiency * 100.0,
            r.annual_opex,
            r.capex,
            r.npv_opex,
            r.total_lifecycle_cost,
            r.annual_co2_tons,
            row.delta_annual_opex,
            row.delta_capex,
            row.delta_npv_opex,
            row.delta_total,
            row.delta_co2_tons,
            r.design_flow,
            r.design_pressure,
            r.annual_energy_kwh,
            r.annual_maintenance,
        );
    }
    csv
}

pub fn sweep_csv(sweep: &SweepResult) -> String {
    let mut csv = String::from(
        "margin_pct,mode,design_flow_m3h,design_pressure_mbar,design_efficiency_pct,design_speed_rpm,motor_rated_kw,avg_motor_load_pct,avg_motor_efficiency,annual_energy_kwh,annual_opex_eur,capex_eur,npv_opex_eur,total_lifecycle_cost_eur,annual_co2_tons\n",
    );
    for r in &sweep.results {
        let _ = writeln!(
            csv,
            "{},{},{},{},{},{},{},{},{},{},{},{},{},{},{}",
            r.design_margin_pct,
            r.mode.label(),
            r.design_flow,
            r.design_pressure,
            r.design_efficiency,
            r.design_speed,
            r.motor_rated_kw,
            r.avg_motor_load_pct,
            r.avg_motor_efficiency,
            r.annual_energy_kwh,
            r.annual_opex,
            r.capex,
            r.npv_opex,
            r.total_lifecycle_cost,
            r.annual_co2_tons,
        );
    }
    csv
}

/// Long format: one row per (speed, sample).
pub fn fan_curves_csv(curves: &[FanCurve]) -> String {
    let mut csv = String::from("speed_rpm,flow_m3h,pressure_mbar,efficiency_pct\n");
    for curve in curves {
        for s in curve.samples() {
            let _ = writeln!(csv, "{},{},{},{}", curve.speed, s.flow, s.pressure, s.efficiency);
        }
    }
    csv
}

pub fn system_curve_csv(series: &[(f64, f64)]) -> String {
    let mut csv = String::from("flow_m3h,pressure_mbar\n");
    for (q, p) in series {
        let _ = writeln!(csv, "{},{}", q, p);
    }
    csv
}

pub fn drive_csv(series: &DriveSeries) -> String {
    let mut csv = String::from("load_pct,motor_efficiency,vfd_efficiency,combined_efficiency\n");
    for i in 0..series.load_pct.len() {
        let _ = writeln!(
            csv,
            "{},{},{},{}",
            series.load_pct[i], series.motor[i], series.vfd[i], series.combined[i]
        );
    }
    csv
}

pub fn points_csv(points: &[OperatingPointRow]) -> String {
    let mut csv = String::from("point,flow_m3h,pressure_mbar,speed_rpm,efficiency_pct\n");
    for p in points {
        let _ = writeln!(
            csv,
            "{},{},{},{},{}",
            p.label, p.flow, p.pressure, p.speed, p.efficiency
        );
    }
    csv
}

/// Write `csv` to `path`, or to stdout when no path is given.
pub fn write_csv(path: Option<&Path>, csv: &str) -> AppResult<()> {
    match path {
        Some(path) => std::fs::write(path, csv).map_err(|e| AppError::FileWrite {
            path: path.to_path_buf(),
            source: e,
        }),
        None => {
            print!("{}", csv);
            Ok(())
        }
    }
}

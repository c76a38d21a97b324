use crate::engine::EnergyMode;
use serde::{Deserialize, Serialize};

/// Energy drawn by one operating profile segment.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SegmentEnergy {
    pub name: String,
    pub flow: f64,
    pub pressure: f64,
    pub hours: f64,
    /// Interpolated fan efficiency (%)
    pub fan_efficiency: f64,
    pub fan_power_kw: f64,
    pub motor_load_pct: f64,
    /// Motor efficiency (fraction)
    pub motor_efficiency: f64,
    /// VFD speed as a fraction of design speed
    pub speed_fraction: f64,
    /// VFD efficiency (fraction)
    pub vfd_efficiency: f64,
    /// Electrical input to the VFD (kW)
    pub input_power_kw: f64,
    pub energy_kwh: f64,
}

/// Full outcome of one design-margin scenario.
///
/// This is the only record reporting and plotting code needs; costs are in
/// €, powers in kW, flow in m³/h and pressure in mbar.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LifecycleCostResult {
    pub design_margin_pct: f64,
    pub mode: EnergyMode,
    pub design_flow: f64,
    pub design_pressure: f64,
    /// Fan efficiency at the design point (%)
    pub design_efficiency: f64,
    /// Estimated shaft speed at the design point (rpm)
    pub design_speed: f64,
    pub fan_shaft_power_kw: f64,
    pub motor_rated_kw: f64,
    /// Hours-weighted average motor load (%)
    pub avg_motor_load_pct: f64,
    /// Motor efficiency at the average load (fraction)
    pub avg_motor_efficiency: f64,
    /// Annual energy over annual hours (kW)
    pub avg_motor_input_kw: f64,
    pub annual_energy_kwh: f64,
    pub annual_energy_cost: f64,
    pub annual_maintenance: f64,
    pub annual_opex: f64,
    pub annual_co2_tons: f64,
    pub capex: f64,
    pub npv_opex: f64,
    pub total_lifecycle_cost: f64,
    pub segments: Vec<SegmentEnergy>,
}

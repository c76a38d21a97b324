//! Analysis file schema.
//!
//! Only the datasheet is required; every other section defaults to the
//! reference booster fan study.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisProject {
    pub version: u32,
    pub name: String,
    pub datasheet: DatasheetDef,
    #[serde(default)]
    pub fan_model: FanModelDef,
    #[serde(default)]
    pub economics: EconomicsDef,
    /// Empty means the reference split over the datasheet points
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub operating_profile: Vec<ProfileSegmentDef>,
    #[serde(default)]
    pub sweep: SweepDef,
    #[serde(default)]
    pub scenarios: ScenariosDef,
}

impl AnalysisProject {
    /// Profile segments to evaluate, expanding an omitted profile to
    /// startup / normal / peak at CCLPE / CCLPA / CCLPB.
    pub fn effective_profile(&self) -> Vec<ProfileSegmentDef> {
        if !self.operating_profile.is_empty() {
            return self.operating_profile.clone();
        }
        let ds = &self.datasheet;
        vec![
            ProfileSegmentDef::at("startup", ds.minimum, 80.0),
            ProfileSegmentDef::at("normal", ds.nominal, 7760.0),
            ProfileSegmentDef::at("peak", ds.maximum, 160.0),
        ]
    }
}

/// Flow in m³/h, pressure rise in mbar.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PointDef {
    pub flow: f64,
    pub pressure: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DatasheetDef {
    #[serde(alias = "cclpa")]
    pub nominal: PointDef,
    #[serde(alias = "cclpb")]
    pub maximum: PointDef,
    #[serde(alias = "cclpe")]
    pub minimum: PointDef,
    pub design: PointDef,
    #[serde(default = "default_nominal_efficiency")]
    pub nominal_efficiency: f64,
    #[serde(default = "default_reference_speed")]
    pub reference_speed: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FanModelDef {
    pub free_delivery_ratio: f64,
    pub span_ratio: f64,
    pub samples: usize,
    pub peak_flow_ratio: f64,
    pub peak_efficiency: f64,
    pub width_factor: f64,
    pub speed_exponent: f64,
    pub efficiency_cap: f64,
    pub speed_grid: Vec<f64>,
    pub min_speed: f64,
    pub max_speed: f64,
    pub min_efficiency: f64,
    pub max_efficiency: f64,
    pub snap_tolerance: f64,
}

impl Default for FanModelDef {
    fn default() -> Self {
        Self {
            free_delivery_ratio: 1.3,
            span_ratio: 1.2,
            samples: 100,
            peak_flow_ratio: 0.95,
            peak_efficiency: 85.0,
            width_factor: 0.4,
            speed_exponent: 0.1,
            efficiency_cap: 90.0,
            speed_grid: vec![1000.0, 1100.0, 1200.0, 1300.0, 1400.0, 1500.0],
            min_speed: 800.0,
            max_speed: 1600.0,
            min_efficiency: 30.0,
            max_efficiency: 90.0,
            snap_tolerance: 1.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EconomicsDef {
    /// €/kWh
    pub electricity_price: f64,
    pub operating_hours: f64,
    pub lifetime_years: u32,
    pub discount_rate: f64,
    pub electricity_escalation: f64,
    pub maintenance_inflation: f64,
    /// €/kW of rated motor power, motor and VFD together
    pub motor_cost_per_kw: f64,
    /// kg CO2 per kWh
    pub co2_intensity: f64,
    pub maintenance_rate: f64,
    pub motor_sizing_margin: f64,
}

impl Default for EconomicsDef {
    fn default() -> Self {
        Self {
            electricity_price: 0.30,
            operating_hours: 8000.0,
            lifetime_years: 30,
            discount_rate: 0.0,
            electricity_escalation: 0.02,
            maintenance_inflation: 0.02,
            motor_cost_per_kw: 650.0,
            co2_intensity: 0.23,
            maintenance_rate: 0.03,
            motor_sizing_margin: 1.10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProfileSegmentDef {
    pub name: String,
    pub flow: f64,
    pub pressure: f64,
    pub hours_per_year: f64,
}

impl ProfileSegmentDef {
    pub fn at(name: &str, point: PointDef, hours_per_year: f64) -> Self {
        Self {
            name: name.to_string(),
            flow: point.flow,
            pressure: point.pressure,
            hours_per_year,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SweepDef {
    pub start: f64,
    pub end: f64,
    pub step: f64,
}

impl Default for SweepDef {
    fn default() -> Self {
        Self {
            start: 10.0,
            end: 34.0,
            step: 1.0,
        }
    }
}

/// Margins (%) the summary report compares.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScenariosDef {
    /// API 560 recommendation
    pub baseline_margin: f64,
    pub current_margin: f64,
    pub best_practice_margin: f64,
    pub report_margins: Vec<f64>,
}

impl Default for ScenariosDef {
    fn default() -> Self {
        Self {
            baseline_margin: 15.0,
            current_margin: 31.7,
            best_practice_margin: 12.0,
            report_margins: vec![10.0, 12.0, 15.0, 18.0, 20.0, 22.0, 25.0, 30.0],
        }
    }
}

fn default_nominal_efficiency() -> f64 {
    80.0
}

fn default_reference_speed() -> f64 {
    1500.0
}

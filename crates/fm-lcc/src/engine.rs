//! Lifecycle cost evaluation for one design margin.
//!
//! A margin fixes the design flow; the system curve gives the design
//! pressure, the fan curves give the design efficiency, and from there the
//! shaft power, motor rating and CAPEX follow. Annual energy is then
//! integrated segment by segment so each segment's motor and VFD losses are
//! evaluated at that segment's own load.

use crate::config::{LifecycleConfig, ProfileSegment};
use crate::error::LccResult;
use crate::npv::npv_opex;
use crate::result::{LifecycleCostResult, SegmentEnergy};
use fm_core::{air_power_kw, energy_kwh, safe_div};
use fm_curves::{FanCurveModel, FanEfficiency, OperatingPointSolver, SystemCurve};
use fm_drive::{motor_efficiency, vfd_efficiency};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// How annual energy is integrated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnergyMode {
    /// Weighted over the operating profile segments
    #[default]
    Profile,
    /// Nominal point for all operating hours
    NominalOnly,
}

impl EnergyMode {
    pub fn label(self) -> &'static str {
        match self {
            EnergyMode::Profile => "profile",
            EnergyMode::NominalOnly => "nominal-only",
        }
    }
}

/// Fan shaft power (kW) for flow (m³/h), pressure rise (mbar) and fan
/// efficiency (%). Zero efficiency yields zero power.
pub fn fan_shaft_power_kw(flow: f64, pressure: f64, efficiency_pct: f64) -> f64 {
    safe_div(air_power_kw(flow, pressure), efficiency_pct / 100.0, 0.0)
}

/// Design quantities derived from a margin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DesignScenario {
    pub margin_pct: f64,
    pub flow: f64,
    pub pressure: f64,
    pub efficiency: f64,
    pub speed: f64,
    pub shaft_power_kw: f64,
    pub motor_rated_kw: f64,
}

/// Lifecycle cost model over an immutable configuration.
///
/// `E` supplies fan efficiency at a duty point; the default interpolates a
/// bank of generated fan curves.
#[derive(Clone, Debug)]
pub struct LifecycleModel<E = OperatingPointSolver> {
    config: LifecycleConfig,
    system: SystemCurve,
    fan: E,
}

impl LifecycleModel<OperatingPointSolver> {
    /// Fit the system curve and build the fan curve bank.
    pub fn new(config: LifecycleConfig) -> LccResult<Self> {
        let model = FanCurveModel::new(config.fan_model().clone())?;
        let solver =
            OperatingPointSolver::new(model, config.speed_grid().clone(), *config.bounds())?;
        Ok(Self::with_efficiency(config, solver))
    }

    pub fn solver(&self) -> &OperatingPointSolver {
        &self.fan
    }
}

impl<E: FanEfficiency> LifecycleModel<E> {
    /// Model with a custom fan efficiency source.
    pub fn with_efficiency(config: LifecycleConfig, fan: E) -> Self {
        let datasheet = config.datasheet();
        let system = SystemCurve::fit(datasheet.nominal, datasheet.maximum);
        Self {
            config,
            system,
            fan,
        }
    }

    pub fn config(&self) -> &LifecycleConfig {
        &self.config
    }

    pub fn system_curve(&self) -> &SystemCurve {
        &self.system
    }

    /// Fan efficiency (%) at a duty point.
    pub fn fan_efficiency(&self, flow: f64, pressure: f64) -> f64 {
        self.fan.efficiency_at(flow, pressure)
    }

    /// Estimated shaft speed (rpm) at a duty point.
    pub fn estimate_speed(&self, flow: f64, pressure: f64) -> f64 {
        self.fan.speed_at(flow, pressure)
    }

    /// Design point and motor sizing for `margin_pct` above nominal flow.
    pub fn design_scenario(&self, margin_pct: f64) -> DesignScenario {
        let nominal = self.config.datasheet().nominal;
        let flow = nominal.flow * (1.0 + margin_pct / 100.0);
        let pressure = self.system.pressure_at(flow);
        let efficiency = self.fan.efficiency_at(flow, pressure);
        let shaft_power_kw = fan_shaft_power_kw(flow, pressure, efficiency);
        let motor_rated_kw = shaft_power_kw * self.config.economics().motor_sizing_margin;
        let speed = self.fan.speed_at(flow, pressure);

        DesignScenario {
            margin_pct,
            flow,
            pressure,
            efficiency,
            speed,
            shaft_power_kw,
            motor_rated_kw,
        }
    }

    /// Energy drawn by one segment for a motor sized at `motor_rated_kw`.
    pub fn segment_energy(
        &self,
        segment: &ProfileSegment,
        design_flow: f64,
        motor_rated_kw: f64,
    ) -> SegmentEnergy {
        let fan_efficiency = self.fan.efficiency_at(segment.flow, segment.pressure);
        let fan_power_kw = fan_shaft_power_kw(segment.flow, segment.pressure, fan_efficiency);
        let motor_load_pct = safe_div(fan_power_kw, motor_rated_kw, 0.0) * 100.0;
        let motor_eff = motor_efficiency(motor_load_pct);
        // Q ∝ N, so speed relative to design follows flow
        let speed_fraction = safe_div(segment.flow, design_flow, 1.0);
        let vfd_eff = vfd_efficiency(motor_load_pct, Some(speed_fraction));
        let input_power_kw = safe_div(fan_power_kw, motor_eff * vfd_eff, fan_power_kw);
        let energy = energy_kwh(input_power_kw, segment.hours_per_year);

        debug!(
            segment = %segment.name,
            fan_efficiency,
            motor_load_pct,
            motor_eff,
            vfd_eff,
            input_power_kw,
            "Segment energy"
        );

        SegmentEnergy {
            name: segment.name.clone(),
            flow: segment.flow,
            pressure: segment.pressure,
            hours: segment.hours_per_year,
            fan_efficiency,
            fan_power_kw,
            motor_load_pct,
            motor_efficiency: motor_eff,
            speed_fraction,
            vfd_efficiency: vfd_eff,
            input_power_kw,
            energy_kwh: energy,
        }
    }

    /// Evaluate the full lifecycle cost of one design margin.
    pub fn calculate_lifecycle_cost(&self, margin_pct: f64, mode: EnergyMode) -> LifecycleCostResult {
        let economics = self.config.economics();
        let design = self.design_scenario(margin_pct);
        let capex = design.motor_rated_kw * economics.motor_cost_per_kw;

        let segments: Vec<SegmentEnergy> = match mode {
            EnergyMode::Profile => self
                .config
                .profile()
                .segments()
                .iter()
                .map(|seg| self.segment_energy(seg, design.flow, design.motor_rated_kw))
                .collect(),
            EnergyMode::NominalOnly => {
                let nominal = self.config.datasheet().nominal;
                let seg = ProfileSegment::new(
                    "nominal",
                    nominal.flow,
                    nominal.pressure,
                    economics.operating_hours,
                );
                vec![self.segment_energy(&seg, design.flow, design.motor_rated_kw)]
            }
        };

        let annual_energy_kwh: f64 = segments.iter().map(|s| s.energy_kwh).sum();
        let total_hours: f64 = segments.iter().map(|s| s.hours).sum();
        let weighted_load: f64 = segments.iter().map(|s| s.motor_load_pct * s.hours).sum();
        let avg_motor_load_pct = safe_div(weighted_load, total_hours, 0.0);
        let avg_motor_efficiency = motor_efficiency(avg_motor_load_pct);

        let annual_energy_cost = annual_energy_kwh * economics.electricity_price;
        let annual_maintenance = capex * economics.maintenance_rate;
        let annual_opex = annual_energy_cost + annual_maintenance;
        let npv = npv_opex(annual_energy_cost, annual_maintenance, economics);
        let annual_co2_tons = annual_energy_kwh * economics.co2_intensity / 1000.0;

        let result = LifecycleCostResult {
            design_margin_pct: margin_pct,
            mode,
            design_flow: design.flow,
            design_pressure: design.pressure,
            design_efficiency: design.efficiency,
            design_speed: design.speed,
            fan_shaft_power_kw: design.shaft_power_kw,
            motor_rated_kw: design.motor_rated_kw,
            avg_motor_load_pct,
            avg_motor_efficiency,
            avg_motor_input_kw: safe_div(annual_energy_kwh, economics.operating_hours, 0.0),
            annual_energy_kwh,
            annual_energy_cost,
            annual_maintenance,
            annual_opex,
            annual_co2_tons,
            capex,
            npv_opex: npv,
            total_lifecycle_cost: capex + npv,
            segments,
        };

        debug!(
            margin = margin_pct,
            mode = mode.label(),
            motor_rated_kw = result.motor_rated_kw,
            annual_energy_kwh = result.annual_energy_kwh,
            total = result.total_lifecycle_cost,
            "Evaluated design margin"
        );

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Flat fan efficiency so the drive-train arithmetic can be checked by hand.
    struct ConstantFan(f64);

    impl FanEfficiency for ConstantFan {
        fn efficiency_at(&self, _flow: f64, _pressure: f64) -> f64 {
            self.0
        }

        fn speed_at(&self, _flow: f64, _pressure: f64) -> f64 {
            1500.0
        }
    }

    fn flat_model() -> LifecycleModel<ConstantFan> {
        let config = LifecycleConfig::reference_plant().unwrap();
        LifecycleModel::with_efficiency(config, ConstantFan(80.0))
    }

    #[test]
    fn shaft_power_formula() {
        // 1 m³/s through 1000 Pa at 50 % is 2 kW
        assert!((fan_shaft_power_kw(3600.0, 10.0, 50.0) - 2.0).abs() < 1e-9);
        assert_eq!(fan_shaft_power_kw(3600.0, 10.0, 0.0), 0.0);
    }

    #[test]
    fn design_point_follows_system_curve() {
        let model = flat_model();
        let design = model.design_scenario(15.0);
        assert!((design.flow - 134_754.0 * 1.15).abs() < 1e-6);
        let expected_p = model.system_curve().pressure_at(design.flow);
        assert_eq!(design.pressure, expected_p);
        let shaft = fan_shaft_power_kw(design.flow, design.pressure, 80.0);
        assert!((design.shaft_power_kw - shaft).abs() < 1e-9);
        assert!((design.motor_rated_kw - 1.1 * shaft).abs() < 1e-9);
    }

    #[test]
    fn zero_margin_designs_at_nominal() {
        let model = flat_model();
        let design = model.design_scenario(0.0);
        assert_eq!(design.flow, 134_754.0);
        assert!((design.pressure - 59.3).abs() < 1e-9);
    }

    #[test]
    fn profile_energy_is_sum_of_segments() {
        let model = flat_model();
        let result = model.calculate_lifecycle_cost(15.0, EnergyMode::Profile);
        assert_eq!(result.segments.len(), 3);
        let sum: f64 = result.segments.iter().map(|s| s.energy_kwh).sum();
        assert!((result.annual_energy_kwh - sum).abs() < 1e-6);
        for seg in &result.segments {
            let expected = seg.fan_power_kw / (seg.motor_efficiency * seg.vfd_efficiency) * seg.hours;
            assert!((seg.energy_kwh - expected).abs() < 1e-6);
        }
    }

    #[test]
    fn average_load_is_hours_weighted() {
        let model = flat_model();
        let result = model.calculate_lifecycle_cost(20.0, EnergyMode::Profile);
        let weighted: f64 = result
            .segments
            .iter()
            .map(|s| s.motor_load_pct * s.hours)
            .sum::<f64>()
            / 8000.0;
        assert!((result.avg_motor_load_pct - weighted).abs() < 1e-9);
        assert_eq!(
            result.avg_motor_efficiency,
            motor_efficiency(result.avg_motor_load_pct)
        );
    }

    #[test]
    fn speed_fraction_tracks_flow_ratio() {
        let model = flat_model();
        let result = model.calculate_lifecycle_cost(15.0, EnergyMode::Profile);
        let normal = &result.segments[1];
        assert!((normal.speed_fraction - 1.0 / 1.15).abs() < 1e-12);
    }

    #[test]
    fn nominal_only_uses_all_hours_at_nominal() {
        let model = flat_model();
        let result = model.calculate_lifecycle_cost(15.0, EnergyMode::NominalOnly);
        assert_eq!(result.mode, EnergyMode::NominalOnly);
        assert_eq!(result.segments.len(), 1);
        assert_eq!(result.segments[0].hours, 8000.0);
        assert_eq!(result.segments[0].flow, 134_754.0);
        assert!((result.avg_motor_load_pct - result.segments[0].motor_load_pct).abs() < 1e-12);
    }

    #[test]
    fn cost_aggregation() {
        let model = flat_model();
        let r = model.calculate_lifecycle_cost(15.0, EnergyMode::Profile);
        let economics = model.config().economics();
        assert!((r.capex - r.motor_rated_kw * 650.0).abs() < 1e-6);
        assert!((r.annual_energy_cost - r.annual_energy_kwh * 0.30).abs() < 1e-6);
        assert!((r.annual_maintenance - r.capex * 0.03).abs() < 1e-9);
        assert!((r.annual_opex - (r.annual_energy_cost + r.annual_maintenance)).abs() < 1e-6);
        let npv = npv_opex(r.annual_energy_cost, r.annual_maintenance, economics);
        assert!((r.npv_opex - npv).abs() < 1e-6);
        assert!((r.total_lifecycle_cost - (r.capex + r.npv_opex)).abs() < 1e-6);
        assert!((r.annual_co2_tons - r.annual_energy_kwh * 0.23 / 1000.0).abs() < 1e-9);
        assert!((r.avg_motor_input_kw - r.annual_energy_kwh / 8000.0).abs() < 1e-9);
        assert_eq!(r.design_speed, 1500.0);
    }

    #[test]
    fn evaluation_is_reproducible() {
        let model = flat_model();
        let a = model.calculate_lifecycle_cost(22.0, EnergyMode::Profile);
        let b = model.calculate_lifecycle_cost(22.0, EnergyMode::Profile);
        assert_eq!(a, b);
    }

    #[test]
    fn mode_labels() {
        assert_eq!(EnergyMode::default(), EnergyMode::Profile);
        assert_eq!(EnergyMode::NominalOnly.label(), "nominal-only");
    }
}

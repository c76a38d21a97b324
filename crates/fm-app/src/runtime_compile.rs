//! Convert a project file into the immutable runtime model.

use fm_curves::{DatasheetPoint, FanModelParams, SolverBounds, SpeedGrid};
use fm_lcc::{
    Datasheet, Economics, LifecycleConfig, LifecycleModel, MarginSweep, OperatingProfile,
    ProfileSegment,
};
use fm_project::schema::{
    AnalysisProject, DatasheetDef, EconomicsDef, FanModelDef, PointDef, SweepDef,
};
use tracing::info;

use crate::error::AppResult;

fn point(def: PointDef) -> DatasheetPoint {
    DatasheetPoint::new(def.flow, def.pressure)
}

pub fn build_datasheet(def: &DatasheetDef) -> Datasheet {
    Datasheet {
        nominal: point(def.nominal),
        maximum: point(def.maximum),
        minimum: point(def.minimum),
        design: point(def.design),
        nominal_efficiency: def.nominal_efficiency,
        reference_speed: def.reference_speed,
    }
}

pub fn build_fan_model(datasheet: &Datasheet, def: &FanModelDef) -> FanModelParams {
    FanModelParams {
        free_delivery_ratio: def.free_delivery_ratio,
        span_ratio: def.span_ratio,
        samples: def.samples,
        peak_flow_ratio: def.peak_flow_ratio,
        peak_efficiency: def.peak_efficiency,
        width_factor: def.width_factor,
        speed_exponent: def.speed_exponent,
        efficiency_cap: def.efficiency_cap,
        ..datasheet.fan_anchor()
    }
}

pub fn build_bounds(def: &FanModelDef) -> SolverBounds {
    SolverBounds {
        min_speed: def.min_speed,
        max_speed: def.max_speed,
        min_efficiency: def.min_efficiency,
        max_efficiency: def.max_efficiency,
        snap_tolerance: def.snap_tolerance,
    }
}

pub fn build_economics(def: &EconomicsDef) -> Economics {
    Economics {
        electricity_price: def.electricity_price,
        operating_hours: def.operating_hours,
        lifetime_years: def.lifetime_years,
        discount_rate: def.discount_rate,
        electricity_escalation: def.electricity_escalation,
        maintenance_inflation: def.maintenance_inflation,
        motor_cost_per_kw: def.motor_cost_per_kw,
        co2_intensity: def.co2_intensity,
        maintenance_rate: def.maintenance_rate,
        motor_sizing_margin: def.motor_sizing_margin,
    }
}

pub fn build_profile(project: &AnalysisProject) -> AppResult<OperatingProfile> {
    let segments = project
        .effective_profile()
        .into_iter()
        .map(|s| ProfileSegment::new(s.name, s.flow, s.pressure, s.hours_per_year))
        .collect();
    Ok(OperatingProfile::new(segments)?)
}

pub fn build_sweep(def: &SweepDef) -> AppResult<MarginSweep> {
    Ok(MarginSweep::new(def.start, def.end, def.step)?)
}

/// Build the runtime configuration and the lifecycle model.
pub fn compile_project(project: &AnalysisProject) -> AppResult<LifecycleModel> {
    let datasheet = build_datasheet(&project.datasheet);
    let fan_model = build_fan_model(&datasheet, &project.fan_model);
    let grid = SpeedGrid::new(project.fan_model.speed_grid.clone())?;
    let config = LifecycleConfig::new(
        datasheet,
        fan_model,
        grid,
        build_bounds(&project.fan_model),
        build_economics(&project.economics),
        build_profile(project)?,
    )?;

    let model = LifecycleModel::new(config)?;
    let system = model.system_curve();
    info!(
        static_pressure = system.static_pressure,
        dynamic_coefficient = system.dynamic_coefficient,
        purely_dynamic = system.purely_dynamic,
        "Runtime model compiled"
    );
    Ok(model)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fm_project::reference_project;

    #[test]
    fn compiled_reference_matches_builtin_config() {
        let model = compile_project(&reference_project()).unwrap();
        let builtin = LifecycleConfig::reference_plant().unwrap();
        assert_eq!(model.config().datasheet(), builtin.datasheet());
        assert_eq!(model.config().fan_model(), builtin.fan_model());
        assert_eq!(model.config().speed_grid(), builtin.speed_grid());
        assert_eq!(model.config().bounds(), builtin.bounds());
        assert_eq!(model.config().economics(), builtin.economics());
        assert_eq!(model.config().profile(), builtin.profile());
    }

    #[test]
    fn fan_model_is_anchored_to_design_point() {
        let mut project = reference_project();
        project.datasheet.design.flow = 180_000.0;
        project.fan_model.peak_efficiency = 82.0;
        let datasheet = build_datasheet(&project.datasheet);
        let params = build_fan_model(&datasheet, &project.fan_model);
        assert_eq!(params.reference_flow, 180_000.0);
        assert_eq!(params.peak_efficiency, 82.0);
    }

    #[test]
    fn hours_mismatch_is_a_compile_error() {
        let mut project = reference_project();
        project.economics.operating_hours = 8760.0;
        let err = compile_project(&project).unwrap_err();
        assert!(matches!(err, crate::AppError::Compile(_)));
    }
}

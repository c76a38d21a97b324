//! Project validation logic.

use crate::schema::{AnalysisProject, DatasheetDef, EconomicsDef, FanModelDef, SweepDef};
use std::collections::HashSet;

/// Hand-entered profile hours may be off by this much (h).
const PROFILE_HOURS_TOLERANCE: f64 = 1.0;

/// Largest margin sweep a project may request.
pub const MAX_SWEEP_POINTS: usize = 10_000;

/// Largest speed grid a project may define; one fan curve is built per speed.
pub const MAX_GRID_SPEEDS: usize = 1_000;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Duplicate name: {name} in {context}")]
    DuplicateName { name: String, context: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error(
        "Operating profile covers {profile_hours} h but economics.operating_hours is {operating_hours} h"
    )]
    ProfileHours {
        profile_hours: f64,
        operating_hours: f64,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

fn invalid(field: impl Into<String>, value: impl ToString, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.into(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn positive(field: &str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, value, "must be positive"))
    }
}

fn non_negative(field: &str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(field, value, "must not be negative"))
    }
}

pub fn validate_project(project: &AnalysisProject) -> Result<(), ValidationError> {
    if project.version > crate::LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: project.version,
        });
    }

    validate_datasheet(&project.datasheet)?;
    validate_fan_model(&project.fan_model)?;
    validate_economics(&project.economics)?;
    validate_sweep(&project.sweep)?;

    let profile = project.effective_profile();
    let mut names = HashSet::new();
    for seg in &profile {
        if !names.insert(seg.name.as_str()) {
            return Err(ValidationError::DuplicateName {
                name: seg.name.clone(),
                context: "operating_profile".to_string(),
            });
        }
        positive(&format!("operating_profile.{}.flow", seg.name), seg.flow)?;
        positive(&format!("operating_profile.{}.pressure", seg.name), seg.pressure)?;
        non_negative(
            &format!("operating_profile.{}.hours_per_year", seg.name),
            seg.hours_per_year,
        )?;
    }

    let profile_hours: f64 = profile.iter().map(|s| s.hours_per_year).sum();
    let operating_hours = project.economics.operating_hours;
    if (profile_hours - operating_hours).abs() > PROFILE_HOURS_TOLERANCE {
        return Err(ValidationError::ProfileHours {
            profile_hours,
            operating_hours,
        });
    }

    for &margin in project
        .scenarios
        .report_margins
        .iter()
        .chain([
            &project.scenarios.baseline_margin,
            &project.scenarios.current_margin,
            &project.scenarios.best_practice_margin,
        ])
    {
        if !margin.is_finite() || margin <= -100.0 {
            return Err(invalid("scenarios", margin, "margin must exceed -100 %"));
        }
    }

    Ok(())
}

fn validate_datasheet(ds: &DatasheetDef) -> Result<(), ValidationError> {
    for (label, point) in [
        ("nominal", ds.nominal),
        ("maximum", ds.maximum),
        ("minimum", ds.minimum),
        ("design", ds.design),
    ] {
        positive(&format!("datasheet.{label}.flow"), point.flow)?;
        positive(&format!("datasheet.{label}.pressure"), point.pressure)?;
    }
    positive("datasheet.nominal_efficiency", ds.nominal_efficiency)?;
    positive("datasheet.reference_speed", ds.reference_speed)?;
    Ok(())
}

fn validate_fan_model(fan: &FanModelDef) -> Result<(), ValidationError> {
    positive("fan_model.free_delivery_ratio", fan.free_delivery_ratio)?;
    let ratio_squared = (1.0 / fan.free_delivery_ratio).powi(2);
    if ratio_squared >= 0.99 {
        return Err(invalid(
            "fan_model.free_delivery_ratio",
            fan.free_delivery_ratio,
            "free delivery must be well beyond the design flow",
        ));
    }
    positive("fan_model.span_ratio", fan.span_ratio)?;
    if fan.samples < 2 {
        return Err(invalid("fan_model.samples", fan.samples, "need at least two"));
    }
    positive("fan_model.peak_flow_ratio", fan.peak_flow_ratio)?;
    positive("fan_model.peak_efficiency", fan.peak_efficiency)?;
    positive("fan_model.width_factor", fan.width_factor)?;
    if !fan.speed_exponent.is_finite() {
        return Err(invalid("fan_model.speed_exponent", fan.speed_exponent, "must be finite"));
    }
    positive("fan_model.efficiency_cap", fan.efficiency_cap)?;

    if fan.speed_grid.len() < 2 {
        return Err(invalid(
            "fan_model.speed_grid",
            format!("{:?}", fan.speed_grid),
            "need at least two speeds",
        ));
    }
    if fan.speed_grid.len() > MAX_GRID_SPEEDS {
        return Err(invalid(
            "fan_model.speed_grid",
            format!("{} speeds", fan.speed_grid.len()),
            "too many speeds",
        ));
    }
    if fan.speed_grid.windows(2).any(|w| w[1] <= w[0]) {
        return Err(invalid(
            "fan_model.speed_grid",
            format!("{:?}", fan.speed_grid),
            "must be strictly increasing",
        ));
    }
    positive("fan_model.min_speed", fan.min_speed)?;
    if !(fan.max_speed > fan.min_speed) {
        return Err(invalid("fan_model.max_speed", fan.max_speed, "must exceed min_speed"));
    }
    non_negative("fan_model.min_efficiency", fan.min_efficiency)?;
    if !(fan.max_efficiency > fan.min_efficiency) {
        return Err(invalid(
            "fan_model.max_efficiency",
            fan.max_efficiency,
            "must exceed min_efficiency",
        ));
    }
    non_negative("fan_model.snap_tolerance", fan.snap_tolerance)?;
    Ok(())
}

fn validate_economics(eco: &EconomicsDef) -> Result<(), ValidationError> {
    non_negative("economics.electricity_price", eco.electricity_price)?;
    positive("economics.operating_hours", eco.operating_hours)?;
    if eco.lifetime_years < 1 {
        return Err(invalid("economics.lifetime_years", eco.lifetime_years, "must be at least 1"));
    }
    non_negative("economics.discount_rate", eco.discount_rate)?;
    non_negative("economics.electricity_escalation", eco.electricity_escalation)?;
    non_negative("economics.maintenance_inflation", eco.maintenance_inflation)?;
    non_negative("economics.motor_cost_per_kw", eco.motor_cost_per_kw)?;
    non_negative("economics.co2_intensity", eco.co2_intensity)?;
    non_negative("economics.maintenance_rate", eco.maintenance_rate)?;
    positive("economics.motor_sizing_margin", eco.motor_sizing_margin)?;
    Ok(())
}

fn validate_sweep(sweep: &SweepDef) -> Result<(), ValidationError> {
    if !sweep.start.is_finite() || !sweep.end.is_finite() || sweep.end < sweep.start {
        return Err(invalid("sweep.end", sweep.end, "must not be below sweep.start"));
    }
    positive("sweep.step", sweep.step)?;
    let points = (sweep.end - sweep.start) / sweep.step + 1.0;
    if points > MAX_SWEEP_POINTS as f64 {
        return Err(invalid("sweep.step", sweep.step, "sweep has too many points"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference_project;
    use crate::schema::ProfileSegmentDef;

    #[test]
    fn reference_project_is_valid() {
        validate_project(&reference_project()).unwrap();
    }

    #[test]
    fn omitted_profile_uses_reference_split() {
        let mut project = reference_project();
        project.operating_profile.clear();
        let profile = project.effective_profile();
        assert_eq!(profile.len(), 3);
        assert_eq!(profile[1].flow, 134_754.0);
        assert_eq!(profile.iter().map(|s| s.hours_per_year).sum::<f64>(), 8000.0);
        validate_project(&project).unwrap();
    }

    #[test]
    fn rejects_future_version() {
        let mut project = reference_project();
        project.version = crate::LATEST_VERSION + 1;
        assert!(matches!(
            validate_project(&project),
            Err(ValidationError::UnsupportedVersion { .. })
        ));
    }

    #[test]
    fn rejects_profile_hours_mismatch() {
        let mut project = reference_project();
        project.operating_profile[1].hours_per_year = 7000.0;
        let err = validate_project(&project).unwrap_err();
        assert!(matches!(err, ValidationError::ProfileHours { .. }));
        assert!(err.to_string().contains("7240"));
    }

    #[test]
    fn rejects_duplicate_segment() {
        let mut project = reference_project();
        project.operating_profile.push(ProfileSegmentDef {
            name: "normal".to_string(),
            flow: 1.0,
            pressure: 1.0,
            hours_per_year: 0.0,
        });
        assert!(matches!(
            validate_project(&project),
            Err(ValidationError::DuplicateName { .. })
        ));
    }

    #[test]
    fn rejects_ill_conditioned_fan_geometry() {
        let mut project = reference_project();
        project.fan_model.free_delivery_ratio = 1.004;
        let err = validate_project(&project).unwrap_err();
        assert!(err.to_string().contains("free_delivery_ratio"));
    }

    #[test]
    fn rejects_non_positive_datasheet_values() {
        let mut project = reference_project();
        project.datasheet.design.pressure = 0.0;
        let err = validate_project(&project).unwrap_err();
        assert!(err.to_string().contains("datasheet.design.pressure"));
    }

    #[test]
    fn rejects_bad_grid_and_bounds() {
        let mut project = reference_project();
        project.fan_model.speed_grid = vec![1000.0, 900.0];
        assert!(validate_project(&project).is_err());

        let mut project = reference_project();
        project.fan_model.max_speed = 700.0;
        assert!(validate_project(&project).is_err());
    }

    #[test]
    fn rejects_bad_sweep_and_lifetime() {
        let mut project = reference_project();
        project.sweep.step = 0.0;
        assert!(validate_project(&project).is_err());

        let mut project = reference_project();
        project.sweep.end = 5.0;
        assert!(validate_project(&project).is_err());

        let mut project = reference_project();
        project.economics.lifetime_years = 0;
        assert!(validate_project(&project).is_err());
    }

    #[test]
    fn rejects_oversized_sweep_and_grid() {
        let mut project = reference_project();
        project.sweep.step = 1e-12;
        let err = validate_project(&project).unwrap_err();
        assert!(err.to_string().contains("too many points"), "{err}");

        let mut project = reference_project();
        project.fan_model.speed_grid = (0..=MAX_GRID_SPEEDS).map(|i| 800.0 + i as f64).collect();
        let err = validate_project(&project).unwrap_err();
        assert!(err.to_string().contains("too many speeds"), "{err}");
    }
}

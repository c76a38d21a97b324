use crate::LATEST_VERSION;
use crate::schema::*;

/// Booster fan study shipped as the built-in reference.
pub fn reference_project() -> AnalysisProject {
    let datasheet = DatasheetDef {
        nominal: PointDef {
            flow: 134_754.0,
            pressure: 59.3,
        },
        maximum: PointDef {
            flow: 142_017.0,
            pressure: 65.8,
        },
        minimum: PointDef {
            flow: 100_000.0,
            pressure: 31.8,
        },
        design: PointDef {
            flow: 177_521.0,
            pressure: 103.9,
        },
        nominal_efficiency: 80.0,
        reference_speed: 1500.0,
    };

    let mut project = AnalysisProject {
        version: LATEST_VERSION,
        name: "Booster fan design margin study".to_string(),
        datasheet,
        fan_model: FanModelDef::default(),
        economics: EconomicsDef::default(),
        operating_profile: Vec::new(),
        sweep: SweepDef::default(),
        scenarios: ScenariosDef::default(),
    };
    project.operating_profile = project.effective_profile();
    project
}

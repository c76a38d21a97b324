use fm_project::schema::*;
use fm_project::{load_json, load_yaml, reference_project, save_json, save_yaml, validate_project};

#[test]
fn roundtrip_yaml_reference_project() {
    let project = reference_project();
    validate_project(&project).unwrap();

    let path = std::env::temp_dir().join("fm_project_roundtrip_reference.yaml");
    save_yaml(&path, &project).unwrap();
    let loaded = load_yaml(&path).unwrap();

    assert_eq!(project, loaded);
}

#[test]
fn roundtrip_json_custom_profile() {
    let mut project = reference_project();
    project.name = "Two-shift operation".to_string();
    project.operating_profile = vec![
        ProfileSegmentDef {
            name: "day".to_string(),
            flow: 142_017.0,
            pressure: 65.8,
            hours_per_year: 4000.0,
        },
        ProfileSegmentDef {
            name: "night".to_string(),
            flow: 100_000.0,
            pressure: 31.8,
            hours_per_year: 4000.0,
        },
    ];
    project.economics.discount_rate = 0.05;

    let path = std::env::temp_dir().join("fm_project_roundtrip_custom.json");
    save_json(&path, &project).unwrap();
    let loaded = load_json(&path).unwrap();

    assert_eq!(project, loaded);
}

#[test]
fn minimal_yaml_takes_reference_defaults() {
    let yaml = r#"
version: 1
name: minimal
datasheet:
  cclpa: { flow: 134754.0, pressure: 59.3 }
  cclpb: { flow: 142017.0, pressure: 65.8 }
  cclpe: { flow: 100000.0, pressure: 31.8 }
  design: { flow: 177521.0, pressure: 103.9 }
"#;
    let project: AnalysisProject = serde_yaml::from_str(yaml).unwrap();
    validate_project(&project).unwrap();

    let reference = reference_project();
    assert!(project.operating_profile.is_empty());
    assert_eq!(project.effective_profile(), reference.operating_profile);
    assert_eq!(project.datasheet, reference.datasheet);
    assert_eq!(project.fan_model, reference.fan_model);
    assert_eq!(project.economics, reference.economics);
    assert_eq!(project.scenarios, reference.scenarios);
}

#[test]
fn save_refuses_invalid_project() {
    let mut project = reference_project();
    project.economics.operating_hours = 8760.0;
    let path = std::env::temp_dir().join("fm_project_invalid.yaml");
    assert!(save_yaml(&path, &project).is_err());
}

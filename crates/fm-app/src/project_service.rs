//! Project loading, saving, validation, and introspection.

use std::path::Path;

use fm_project::schema::AnalysisProject;
use tracing::info;

use crate::error::{AppError, AppResult};

/// Summary of a project for listing.
#[derive(Debug, Clone)]
pub struct ProjectSummary {
    pub name: String,
    pub version: u32,
    pub segment_count: usize,
    pub profile_hours: f64,
    pub sweep_points: usize,
    pub report_margins: usize,
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"))
}

/// Load and validate a project. `.json` files are read as JSON, anything
/// else as YAML.
pub fn load_project(path: &Path) -> AppResult<AnalysisProject> {
    let content = std::fs::read_to_string(path).map_err(|e| AppError::ProjectFileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let project: AnalysisProject = if is_json(path) {
        serde_json::from_str(&content)
            .map_err(|e| AppError::Project(format!("Failed to parse project JSON: {}", e)))?
    } else {
        serde_yaml::from_str(&content)
            .map_err(|e| AppError::Project(format!("Failed to parse project YAML: {}", e)))?
    };

    validate_project(&project)?;
    info!(path = %path.display(), name = %project.name, "Project loaded");
    Ok(project)
}

/// Validate and save a project, format chosen by extension.
pub fn save_project(path: &Path, project: &AnalysisProject) -> AppResult<()> {
    validate_project(project)?;

    let content = if is_json(path) {
        serde_json::to_string_pretty(project)
            .map_err(|e| AppError::Project(format!("Failed to serialize project: {}", e)))?
    } else {
        serde_yaml::to_string(project)
            .map_err(|e| AppError::Project(format!("Failed to serialize project: {}", e)))?
    };

    std::fs::write(path, content).map_err(|e| AppError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}

/// Validate project structure and values.
pub fn validate_project(project: &AnalysisProject) -> AppResult<()> {
    fm_project::validate_project(project)?;
    Ok(())
}

pub fn describe_project(project: &AnalysisProject) -> ProjectSummary {
    let profile = project.effective_profile();
    let sweep = crate::runtime_compile::build_sweep(&project.sweep);
    ProjectSummary {
        name: project.name.clone(),
        version: project.version,
        segment_count: profile.len(),
        profile_hours: profile.iter().map(|s| s.hours_per_year).sum(),
        sweep_points: sweep.map(|s| s.len()).unwrap_or(0),
        report_margins: project.scenarios.report_margins.len(),
    }
}

//! Summary table, scenario classification and recommendation.
//!
//! All figures are profile-mode results; deltas are taken against the
//! baseline (API 560) margin.

use fm_lcc::{EnergyMode, LifecycleCostResult, LifecycleModel};
use fm_project::schema::ScenariosDef;

/// Margins closer than this are treated as the same scenario (%).
const MARGIN_MATCH: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenarioClass {
    Baseline,
    CurrentDesign,
    BestPractice,
    Other,
}

impl ScenarioClass {
    pub fn label(self) -> &'static str {
        match self {
            ScenarioClass::Baseline => "API 560",
            ScenarioClass::CurrentDesign => "CURRENT",
            ScenarioClass::BestPractice => "Best Practice",
            ScenarioClass::Other => "",
        }
    }
}

/// Baseline and current design match exactly; anything at or below the
/// best-practice margin counts as best practice.
pub fn classify_margin(margin: f64, scenarios: &ScenariosDef) -> ScenarioClass {
    if (margin - scenarios.baseline_margin).abs() < MARGIN_MATCH {
        ScenarioClass::Baseline
    } else if (margin - scenarios.current_margin).abs() < MARGIN_MATCH {
        ScenarioClass::CurrentDesign
    } else if margin <= scenarios.best_practice_margin + MARGIN_MATCH {
        ScenarioClass::BestPractice
    } else {
        ScenarioClass::Other
    }
}

#[derive(Debug, Clone)]
pub struct SummaryRow {
    pub class: ScenarioClass,
    pub result: LifecycleCostResult,
    pub delta_capex: f64,
    pub delta_annual_opex: f64,
    pub delta_npv_opex: f64,
    pub delta_total: f64,
    pub delta_co2_tons: f64,
}

impl SummaryRow {
    fn against(result: LifecycleCostResult, baseline: &LifecycleCostResult, class: ScenarioClass) -> Self {
        let delta_capex = result.capex - baseline.capex;
        let delta_total = result.total_lifecycle_cost - baseline.total_lifecycle_cost;
        Self {
            class,
            delta_capex,
            delta_annual_opex: result.annual_opex - baseline.annual_opex,
            delta_npv_opex: delta_total - delta_capex,
            delta_total,
            delta_co2_tons: result.annual_co2_tons - baseline.annual_co2_tons,
            result,
        }
    }

    pub fn margin(&self) -> f64 {
        self.result.design_margin_pct
    }
}

#[derive(Debug, Clone)]
pub struct Summary {
    pub baseline: LifecycleCostResult,
    pub rows: Vec<SummaryRow>,
    /// Lifecycle cost of one margin point above the baseline (€)
    pub cost_per_margin_point: f64,
}

pub fn build_summary(model: &LifecycleModel, scenarios: &ScenariosDef) -> Summary {
    let baseline = model.calculate_lifecycle_cost(scenarios.baseline_margin, EnergyMode::Profile);
    let rows = scenarios
        .report_margins
        .iter()
        .map(|&margin| {
            let result = model.calculate_lifecycle_cost(margin, EnergyMode::Profile);
            SummaryRow::against(result, &baseline, classify_margin(margin, scenarios))
        })
        .collect();

    Summary {
        cost_per_margin_point: margin_cost_slope(model, scenarios.baseline_margin),
        baseline,
        rows,
    }
}

/// Extra lifecycle cost of designing one percentage point above `baseline`.
pub fn margin_cost_slope(model: &LifecycleModel, baseline: f64) -> f64 {
    let base = model.calculate_lifecycle_cost(baseline, EnergyMode::Profile);
    let next = model.calculate_lifecycle_cost(baseline + 1.0, EnergyMode::Profile);
    next.total_lifecycle_cost - base.total_lifecycle_cost
}

#[derive(Debug, Clone)]
pub struct Recommendation {
    pub current: LifecycleCostResult,
    pub baseline: LifecycleCostResult,
    pub best_practice: LifecycleCostResult,
}

impl Recommendation {
    pub fn baseline_savings(&self) -> f64 {
        self.current.total_lifecycle_cost - self.baseline.total_lifecycle_cost
    }

    pub fn best_practice_savings(&self) -> f64 {
        self.current.total_lifecycle_cost - self.best_practice.total_lifecycle_cost
    }
}

pub fn build_recommendation(model: &LifecycleModel, scenarios: &ScenariosDef) -> Recommendation {
    let eval = |m| model.calculate_lifecycle_cost(m, EnergyMode::Profile);
    Recommendation {
        current: eval(scenarios.current_margin),
        baseline: eval(scenarios.baseline_margin),
        best_practice: eval(scenarios.best_practice_margin),
    }
}

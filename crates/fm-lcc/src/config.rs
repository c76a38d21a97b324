//! Runtime configuration.
//!
//! Everything an evaluation reads is held in one immutable
//! [`LifecycleConfig`], built and validated once and then passed by
//! reference. Nothing here is mutated after construction.

use crate::error::{LccError, LccResult};
use fm_core::{ensure_finite, ensure_non_negative, ensure_positive};
use fm_curves::{DatasheetPoint, FanModelParams, SolverBounds, SpeedGrid};

/// Allowed difference between the profile hours and the annual operating
/// hours (h), covering rounding in hand-entered profiles.
pub const PROFILE_HOURS_TOLERANCE: f64 = 1.0;

/// Vendor datasheet for the installed fan.
#[derive(Clone, Debug, PartialEq)]
pub struct Datasheet {
    /// Nominal duty (CCLPA)
    pub nominal: DatasheetPoint,
    /// Maximum continuous duty (CCLPB)
    pub maximum: DatasheetPoint,
    /// Minimum duty (CCLPE)
    pub minimum: DatasheetPoint,
    /// Fan design point the characteristic curve is anchored to
    pub design: DatasheetPoint,
    /// Fan efficiency quoted at the nominal point (%)
    pub nominal_efficiency: f64,
    /// Shaft speed of the datasheet curve (rpm)
    pub reference_speed: f64,
}

impl Datasheet {
    /// The booster fan the reference study was run for.
    pub fn reference() -> Self {
        Self {
            nominal: DatasheetPoint::new(134_754.0, 59.3),
            maximum: DatasheetPoint::new(142_017.0, 65.8),
            minimum: DatasheetPoint::new(100_000.0, 31.8),
            design: DatasheetPoint::new(177_521.0, 103.9),
            nominal_efficiency: 80.0,
            reference_speed: 1500.0,
        }
    }

    /// Fan curve shape anchored to the design point at the reference speed.
    pub fn fan_anchor(&self) -> FanModelParams {
        FanModelParams::anchored(self.reference_speed, self.design.flow, self.design.pressure)
    }

    /// All four points, labelled.
    pub fn points(&self) -> [(&'static str, DatasheetPoint); 4] {
        [
            ("CCLPA", self.nominal),
            ("CCLPB", self.maximum),
            ("CCLPE", self.minimum),
            ("Design", self.design),
        ]
    }

    fn validate(&self) -> LccResult<()> {
        for (_, point) in self.points() {
            ensure_positive(point.flow, "datasheet flow")?;
            ensure_positive(point.pressure, "datasheet pressure")?;
        }
        ensure_positive(self.nominal_efficiency, "nominal fan efficiency")?;
        ensure_positive(self.reference_speed, "reference speed")?;
        Ok(())
    }
}

/// Economic assumptions.
#[derive(Clone, Debug, PartialEq)]
pub struct Economics {
    /// Electricity price (€/kWh)
    pub electricity_price: f64,
    /// Annual operating hours (h)
    pub operating_hours: f64,
    /// Plant lifetime (years)
    pub lifetime_years: u32,
    /// Discount rate (fraction per year)
    pub discount_rate: f64,
    /// Electricity price escalation (fraction per year)
    pub electricity_escalation: f64,
    /// Maintenance cost inflation (fraction per year)
    pub maintenance_inflation: f64,
    /// Motor + VFD cost per rated kW (€/kW)
    pub motor_cost_per_kw: f64,
    /// Grid CO2 intensity (kg/kWh)
    pub co2_intensity: f64,
    /// Annual maintenance as a fraction of CAPEX
    pub maintenance_rate: f64,
    /// Motor rating over design shaft power
    pub motor_sizing_margin: f64,
}

impl Default for Economics {
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

impl Economics {
    fn validate(&self) -> LccResult<()> {
        ensure_non_negative(self.electricity_price, "electricity price")?;
        ensure_positive(self.operating_hours, "operating hours")?;
        ensure_finite(self.electricity_escalation, "electricity escalation")?;
        ensure_finite(self.maintenance_inflation, "maintenance inflation")?;
        ensure_non_negative(self.motor_cost_per_kw, "motor cost per kW")?;
        ensure_non_negative(self.co2_intensity, "CO2 intensity")?;
        ensure_non_negative(self.maintenance_rate, "maintenance rate")?;
        ensure_positive(self.motor_sizing_margin, "motor sizing margin")?;
        if self.lifetime_years == 0 {
            return Err(LccError::Config {
                what: "plant lifetime must be at least one year".into(),
            });
        }
        if !(self.discount_rate > -1.0) || !self.discount_rate.is_finite() {
            return Err(LccError::Config {
                what: format!("discount rate {} must be greater than -1", self.discount_rate),
            });
        }
        Ok(())
    }
}

/// One named load case of the operating profile.
#[derive(Clone, Debug, PartialEq)]
pub struct ProfileSegment {
    pub name: String,
    /// Flow (m³/h)
    pub flow: f64,
    /// Pressure rise (mbar)
    pub pressure: f64,
    /// Hours per year spent at this duty (h)
    pub hours_per_year: f64,
}

impl ProfileSegment {
    pub fn new(name: impl Into<String>, flow: f64, pressure: f64, hours_per_year: f64) -> Self {
        Self {
            name: name.into(),
            flow,
            pressure,
            hours_per_year,
        }
    }
}

/// Ordered part-load operating profile.
#[derive(Clone, Debug, PartialEq)]
pub struct OperatingProfile {
    segments: Vec<ProfileSegment>,
}

impl OperatingProfile {
    /// Build a profile from segments in evaluation order.
    ///
    /// # Errors
    /// `Config` for an empty profile, duplicate names, negative hours or
    /// non-positive duty values.
    pub fn new(segments: Vec<ProfileSegment>) -> LccResult<Self> {
        if segments.is_empty() {
            return Err(LccError::Config {
                what: "operating profile has no segments".into(),
            });
        }
        for (i, seg) in segments.iter().enumerate() {
            if segments[..i].iter().any(|s| s.name == seg.name) {
                return Err(LccError::Config {
                    what: format!("duplicate operating profile segment '{}'", seg.name),
                });
            }
            ensure_positive(seg.flow, "segment flow")?;
            ensure_positive(seg.pressure, "segment pressure")?;
            ensure_non_negative(seg.hours_per_year, "segment hours")?;
        }
        Ok(Self { segments })
    }

    /// Reference profile: startup, normal running at the nominal point, and
    /// peak running at the maximum point.
    pub fn reference(datasheet: &Datasheet) -> LccResult<Self> {
        Self::new(vec![
            ProfileSegment::new(
                "startup",
                datasheet.minimum.flow,
                datasheet.minimum.pressure,
                80.0,
            ),
            ProfileSegment::new(
                "normal",
                datasheet.nominal.flow,
                datasheet.nominal.pressure,
                7760.0,
            ),
            ProfileSegment::new("peak", datasheet.maximum.flow, datasheet.maximum.pressure, 160.0),
        ])
    }

    pub fn segments(&self) -> &[ProfileSegment] {
        &self.segments
    }

    pub fn total_hours(&self) -> f64 {
        self.segments.iter().map(|s| s.hours_per_year).sum()
    }
}

/// Complete, validated input for lifecycle evaluation.
#[derive(Clone, Debug)]
pub struct LifecycleConfig {
    datasheet: Datasheet,
    fan_model: FanModelParams,
    speed_grid: SpeedGrid,
    bounds: SolverBounds,
    economics: Economics,
    profile: OperatingProfile,
}

impl LifecycleConfig {
    /// # Errors
    /// `ProfileHours` when the profile does not cover the annual operating
    /// hours, `Config`/`Parameter` for any other inconsistent input.
    pub fn new(
        datasheet: Datasheet,
        fan_model: FanModelParams,
        speed_grid: SpeedGrid,
        bounds: SolverBounds,
        economics: Economics,
        profile: OperatingProfile,
    ) -> LccResult<Self> {
        datasheet.validate()?;
        economics.validate()?;

        if fan_model.reference_speed != datasheet.reference_speed
            || fan_model.reference_flow != datasheet.design.flow
            || fan_model.reference_pressure != datasheet.design.pressure
        {
            return Err(LccError::Config {
                what: "fan curve must be anchored to the datasheet design point at the reference speed"
                    .into(),
            });
        }

        let profile_hours = profile.total_hours();
        if (profile_hours - economics.operating_hours).abs() > PROFILE_HOURS_TOLERANCE {
            return Err(LccError::ProfileHours {
                profile_hours,
                operating_hours: economics.operating_hours,
            });
        }

        Ok(Self {
            datasheet,
            fan_model,
            speed_grid,
            bounds,
            economics,
            profile,
        })
    }

    /// The reference booster fan study.
    pub fn reference_plant() -> LccResult<Self> {
        let datasheet = Datasheet::reference();
        let profile = OperatingProfile::reference(&datasheet)?;
        let fan_model = datasheet.fan_anchor();
        Self::new(
            datasheet,
            fan_model,
            SpeedGrid::stepped(1000.0, 1500.0, 100.0)?,
            SolverBounds::default(),
            Economics::default(),
            profile,
        )
    }

    pub fn datasheet(&self) -> &Datasheet {
        &self.datasheet
    }

    pub fn fan_model(&self) -> &FanModelParams {
        &self.fan_model
    }

    pub fn speed_grid(&self) -> &SpeedGrid {
        &self.speed_grid
    }

    pub fn bounds(&self) -> &SolverBounds {
        &self.bounds
    }

    pub fn economics(&self) -> &Economics {
        &self.economics
    }

    pub fn profile(&self) -> &OperatingProfile {
        &self.profile
    }
}

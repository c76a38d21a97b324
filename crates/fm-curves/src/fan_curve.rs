//! Parametric fan characteristic curve.
//!
//! ## Model
//!
//! At the reference speed the pressure rise is a downward parabola anchored to
//! one datasheet point `(Q_ref, P_ref)` and an assumed free-delivery flow
//! `Q_max = free_delivery_ratio * Q_ref`:
//!
//! ```text
//! P0 = P_ref / (1 - (Q_ref / Q_max)²)
//! P(Q) = max(P0 - (P0 / Q_max²) * Q², 0)
//! ```
//!
//! Efficiency is a Gaussian around `peak_flow_ratio * Q_ref`, attenuated by
//! `(N / N_ref)^speed_exponent` and capped. The whole curve is then moved to
//! the requested speed with the affinity laws.
//!
//! The shape constants are empirical fits to one fan family, not physical law.

use crate::affinity::{fan_affinity_flow, fan_affinity_pressure};
use crate::error::{CurveError, CurveResult};
use fm_core::{ensure_positive, interp_clamped, linspace, safe_div};

/// Limit on `(Q_ref / Q_max)²` above which the shutoff solve is rejected.
pub const MAX_RATIO_SQUARED: f64 = 0.99;

/// Shape parameters of the fan curve family.
#[derive(Clone, Debug, PartialEq)]
pub struct FanModelParams {
    /// Speed the datasheet curve was measured at (rpm)
    pub reference_speed: f64,
    /// Anchor flow at the reference speed (m³/h)
    pub reference_flow: f64,
    /// Anchor pressure at the reference speed (mbar)
    pub reference_pressure: f64,
    /// Free-delivery flow as a multiple of the reference flow
    pub free_delivery_ratio: f64,
    /// Sampled flow span as a multiple of the reference flow
    pub span_ratio: f64,
    /// Number of samples per curve
    pub samples: usize,
    /// Peak-efficiency flow as a multiple of the reference flow
    pub peak_flow_ratio: f64,
    /// Peak efficiency (%)
    pub peak_efficiency: f64,
    /// Gaussian width as a multiple of the peak-efficiency flow
    pub width_factor: f64,
    /// Exponent on the speed ratio for part-speed efficiency loss
    pub speed_exponent: f64,
    /// Upper clip for efficiency (%)
    pub efficiency_cap: f64,
}

impl FanModelParams {
    /// Shape constants of the reference fan family anchored to `(flow, pressure)`
    /// at `speed`.
    pub fn anchored(speed: f64, flow: f64, pressure: f64) -> Self {
        Self {
            reference_speed: speed,
            reference_flow: flow,
            reference_pressure: pressure,
            free_delivery_ratio: 1.3,
            span_ratio: 1.2,
            samples: 100,
            peak_flow_ratio: 0.95,
            peak_efficiency: 85.0,
            width_factor: 0.4,
            speed_exponent: 0.1,
            efficiency_cap: 90.0,
        }
    }
}

/// One sample of a generated curve.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FanCurveSample {
    /// Flow (m³/h)
    pub flow: f64,
    /// Pressure rise (mbar)
    pub pressure: f64,
    /// Fan efficiency (%)
    pub efficiency: f64,
}

/// Fan curve at a single shaft speed, ordered by ascending flow.
#[derive(Clone, Debug, PartialEq)]
pub struct FanCurve {
    pub speed: f64,
    pub flow: Vec<f64>,
    pub pressure: Vec<f64>,
    pub efficiency: Vec<f64>,
}

impl FanCurve {
    pub fn len(&self) -> usize {
        self.flow.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flow.is_empty()
    }

    /// Pressure at `flow`, held at the end samples outside the curve.
    pub fn pressure_at(&self, flow: f64) -> f64 {
        interp_clamped(flow, &self.flow, &self.pressure)
    }

    /// Efficiency (%) at `flow`, held at the end samples outside the curve.
    pub fn efficiency_at(&self, flow: f64) -> f64 {
        interp_clamped(flow, &self.flow, &self.efficiency)
    }

    pub fn samples(&self) -> impl Iterator<Item = FanCurveSample> + '_ {
        self.flow
            .iter()
            .zip(&self.pressure)
            .zip(&self.efficiency)
            .map(|((&flow, &pressure), &efficiency)| FanCurveSample {
                flow,
                pressure,
                efficiency,
            })
    }
}

/// Validated fan curve generator.
#[derive(Clone, Debug)]
pub struct FanCurveModel {
    params: FanModelParams,
    /// Shutoff pressure at the reference speed (mbar)
    shutoff_pressure: f64,
    /// Parabola curvature at the reference speed (mbar per (m³/h)²)
    curvature: f64,
    /// Flow abscissa at the reference speed
    base_flow: Vec<f64>,
}

impl FanCurveModel {
    /// Build the generator.
    ///
    /// # Errors
    /// `IllConditioned` when `(Q_ref / Q_max)² >= 0.99`, `InvalidArg` / `Core`
    /// for non-positive anchors or fewer than two samples.
    pub fn new(params: FanModelParams) -> CurveResult<Self> {
        ensure_positive(params.reference_speed, "reference speed")?;
        ensure_positive(params.reference_flow, "reference flow")?;
        ensure_positive(params.reference_pressure, "reference pressure")?;
        ensure_positive(params.free_delivery_ratio, "free delivery ratio")?;
        ensure_positive(params.span_ratio, "curve span ratio")?;
        ensure_positive(params.peak_flow_ratio, "peak efficiency flow ratio")?;
        ensure_positive(params.width_factor, "efficiency width factor")?;
        if params.samples < 2 {
            return Err(CurveError::InvalidArg {
                what: "fan curve needs at least two samples",
            });
        }

        let q_max = params.reference_flow * params.free_delivery_ratio;
        let ratio_squared = (params.reference_flow / q_max).powi(2);
        if ratio_squared >= MAX_RATIO_SQUARED {
            return Err(CurveError::IllConditioned {
                ratio_squared,
                limit: MAX_RATIO_SQUARED,
            });
        }

        let shutoff_pressure = params.reference_pressure / (1.0 - ratio_squared);
        let curvature = shutoff_pressure / q_max.powi(2);
        let base_flow = linspace(
            0.0,
            params.reference_flow * params.span_ratio,
            params.samples,
        );

        Ok(Self {
            params,
            shutoff_pressure,
            curvature,
            base_flow,
        })
    }

    pub fn params(&self) -> &FanModelParams {
        &self.params
    }

    pub fn reference_speed(&self) -> f64 {
        self.params.reference_speed
    }

    pub fn shutoff_pressure(&self) -> f64 {
        self.shutoff_pressure
    }

    /// Generate the curve at `speed` (rpm). Negative speeds are treated as zero.
    pub fn curve(&self, speed: f64) -> FanCurve {
        let p = &self.params;
        let speed = speed.max(0.0);
        let speed_ratio = safe_div(speed, p.reference_speed, 0.0);
        let peak_flow = p.reference_flow * p.peak_flow_ratio;
        let width = p.width_factor * peak_flow;
        let attenuation = speed_ratio.powf(p.speed_exponent);

        let n = self.base_flow.len();
        let mut flow = Vec::with_capacity(n);
        let mut pressure = Vec::with_capacity(n);
        let mut efficiency = Vec::with_capacity(n);

        for &q in &self.base_flow {
            let p_base = (self.shutoff_pressure - self.curvature * q * q).max(0.0);
            flow.push(fan_affinity_flow(q, p.reference_speed, speed));
            pressure.push(fan_affinity_pressure(p_base, p.reference_speed, speed));

            let gauss = (-(q - peak_flow).powi(2) / (2.0 * width * width)).exp();
            let eff = p.peak_efficiency * gauss * attenuation;
            efficiency.push(eff.clamp(0.0, p.efficiency_cap));
        }

        FanCurve {
            speed,
            flow,
            pressure,
            efficiency,
        }
    }
}

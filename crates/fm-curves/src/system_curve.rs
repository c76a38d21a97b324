//! System resistance curve.
//!
//! ## Model
//!
//! ```text
//! P(Q) = P_static + k * Q²
//! ```
//!
//! `P_static` and `k` are solved exactly from two datasheet points. A negative
//! static term is not physical; in that case the curve is refit as purely
//! dynamic through the first point.

use fm_core::safe_div;
use tracing::warn;

/// A (flow, pressure) pair from the fan vendor's performance sheet.
///
/// Flow is in m³/h, pressure rise in mbar.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DatasheetPoint {
    pub flow: f64,
    pub pressure: f64,
}

impl DatasheetPoint {
    pub const fn new(flow: f64, pressure: f64) -> Self {
        Self { flow, pressure }
    }
}

/// Fitted static + dynamic system curve.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SystemCurve {
    /// Static pressure component (mbar), never negative
    pub static_pressure: f64,
    /// Dynamic coefficient (mbar per (m³/h)²)
    pub dynamic_coefficient: f64,
    /// True when the two-point fit was rejected in favour of a purely dynamic curve
    pub purely_dynamic: bool,
}

impl SystemCurve {
    /// Fit the curve through two operating points.
    ///
    /// Falls back to `P_static = 0, k = P_A / Q_A²` when the exact fit yields a
    /// negative static pressure or the two flows coincide.
    pub fn fit(a: DatasheetPoint, b: DatasheetPoint) -> Self {
        let dq2 = b.flow.powi(2) - a.flow.powi(2);
        let k = safe_div(b.pressure - a.pressure, dq2, f64::NAN);
        let p_static = a.pressure - k * a.flow.powi(2);

        if k.is_finite() && p_static >= 0.0 {
            return Self {
                static_pressure: p_static,
                dynamic_coefficient: k,
                purely_dynamic: false,
            };
        }

        warn!(
            static_pressure = p_static,
            "System curve fit gave a non-physical static pressure; assuming purely dynamic system (P_static = 0)"
        );
        Self {
            static_pressure: 0.0,
            dynamic_coefficient: safe_div(a.pressure, a.flow.powi(2), 0.0).max(0.0),
            purely_dynamic: true,
        }
    }

    /// Pressure required at `flow` on the fitted curve, clamped at zero.
    pub fn pressure_at(&self, flow: f64) -> f64 {
        (self.static_pressure + self.dynamic_coefficient * flow.powi(2)).max(0.0)
    }

    /// Pressure at `flow` on the curve sharing this static term but passing
    /// through `reference`.
    ///
    /// The dynamic coefficient is re-derived from the reference point; a zero
    /// reference flow keeps the fitted coefficient.
    pub fn pressure_through(&self, flow: f64, reference: DatasheetPoint) -> f64 {
        let k = safe_div(
            reference.pressure - self.static_pressure,
            reference.flow.powi(2),
            self.dynamic_coefficient,
        );
        (self.static_pressure + k * flow.powi(2)).max(0.0)
    }

    /// Sample the curve over `flows` for plotting.
    pub fn sample(&self, flows: &[f64], reference: DatasheetPoint) -> Vec<(f64, f64)> {
        flows
            .iter()
            .map(|&q| (q, self.pressure_through(q, reference)))
            .collect()
    }
}

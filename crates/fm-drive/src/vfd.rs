//! Variable-frequency drive efficiency.
//!
//! ```text
//! eta = 0.98 * (0.98 - 0.00012 * (100 - speed%)) * load_factor
//! load_factor = 0.99 - 0.003 * (30 - load%)   for load < 30 %
//!             = 1                             otherwise
//! ```
//!
//! clamped to `[0.90, 0.98]`. Speed is a fraction of full speed; when absent
//! it is derived from load assuming `P ∝ N³`.

pub const VFD_MIN_EFFICIENCY: f64 = 0.90;
pub const VFD_MAX_EFFICIENCY: f64 = 0.98;

const BASE_EFFICIENCY: f64 = 0.98;
const LOW_LOAD_THRESHOLD_PCT: f64 = 30.0;

/// Speed fraction implied by `load_pct` under the cubic power law.
pub fn speed_from_load(load_pct: f64) -> f64 {
    (load_pct.max(0.0) / 100.0).cbrt()
}

fn efficiency_at(load_pct: f64, speed_fraction: f64) -> f64 {
    let speed_factor = 0.98 - 0.00012 * (100.0 - speed_fraction * 100.0);
    let load_factor = if load_pct < LOW_LOAD_THRESHOLD_PCT {
        0.99 - 0.003 * (LOW_LOAD_THRESHOLD_PCT - load_pct)
    } else {
        1.0
    };
    let eff = BASE_EFFICIENCY * speed_factor * load_factor;
    if eff.is_finite() {
        eff.clamp(VFD_MIN_EFFICIENCY, VFD_MAX_EFFICIENCY)
    } else {
        VFD_MIN_EFFICIENCY
    }
}

/// Efficiency fraction at `load_pct` and an optional speed.
///
/// A speed above 1.5 is taken to be in percent and divided by 100.
pub fn vfd_efficiency(load_pct: f64, speed: Option<f64>) -> f64 {
    let speed = match speed {
        Some(s) if s > 1.5 => s / 100.0,
        Some(s) => s,
        None => speed_from_load(load_pct),
    };
    efficiency_at(load_pct, speed)
}

/// Efficiency for each load in `loads`.
///
/// When `speeds` is given and any entry exceeds 1.5 the whole sequence is
/// read as percent. Loads without a matching speed derive it from load.
pub fn vfd_efficiency_curve(loads: &[f64], speeds: Option<&[f64]>) -> Vec<f64> {
    let speeds = speeds.unwrap_or(&[]);
    let scale = if speeds.iter().any(|&s| s > 1.5) {
        0.01
    } else {
        1.0
    };

    loads
        .iter()
        .enumerate()
        .map(|(i, &load)| {
            let speed = speeds
                .get(i)
                .map(|&s| s * scale)
                .unwrap_or_else(|| speed_from_load(load));
            efficiency_at(load, speed)
        })
        .collect()
}

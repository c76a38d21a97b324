use crate::{FmError, FmResult};

/// Floating point type used throughout system
pub type Real = f64;

/// Denominators smaller than this are treated as zero by [`safe_div`].
pub const DIV_EPSILON: Real = 1e-12;

/// One tolerance for everything
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: Real, what: &'static str) -> FmResult<Real> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(FmError::NonFinite { what, value: v })
    }
}

/// Require a finite, strictly positive value.
pub fn ensure_positive(v: Real, what: &'static str) -> FmResult<Real> {
    let v = ensure_finite(v, what)?;
    if v > 0.0 {
        Ok(v)
    } else {
        Err(FmError::InvalidArg { what, value: v })
    }
}

/// Require a finite, non-negative value.
pub fn ensure_non_negative(v: Real, what: &'static str) -> FmResult<Real> {
    let v = ensure_finite(v, what)?;
    if v >= 0.0 {
        Ok(v)
    } else {
        Err(FmError::InvalidArg { what, value: v })
    }
}

/// Divide, returning `fallback` when the denominator is (near) zero or the
/// quotient is not finite.
pub fn safe_div(num: Real, den: Real, fallback: Real) -> Real {
    if den.abs() < DIV_EPSILON {
        return fallback;
    }
    let q = num / den;
    if q.is_finite() { q } else { fallback }
}

/// `n` evenly spaced points from `start` to `end` inclusive.
pub fn linspace(start: Real, end: Real, n: usize) -> Vec<Real> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as Real;
            let mut points: Vec<Real> = (0..n).map(|i| start + i as Real * step).collect();
            // Ensure exact endpoint
            points[n - 1] = end;
            points
        }
    }
}

/// Piecewise-linear interpolation of `ys` over ascending `xs`.
///
/// Values outside the sampled range are held at the first/last sample.
/// Empty input yields 0.0.
pub fn interp_clamped(x: Real, xs: &[Real], ys: &[Real]) -> Real {
    let n = xs.len().min(ys.len());
    if n == 0 {
        return 0.0;
    }
    if x <= xs[0] {
        return ys[0];
    }
    if x >= xs[n - 1] {
        return ys[n - 1];
    }

    // first index with xs[i] >= x; 1 <= hi < n given the checks above
    let hi = xs[..n].partition_point(|&v| v < x);
    let lo = hi - 1;
    let span = xs[hi] - xs[lo];
    if span <= 0.0 {
        return ys[hi];
    }
    let t = (x - xs[lo]) / span;
    ys[lo] + t * (ys[hi] - ys[lo])
}

//! Put two series on a common x-grid.
//!
//! The reference grid always wins. When the lengths differ, the companion is
//! resampled with piecewise-linear interpolation, clamped to its endpoint
//! values outside its own range (the same semantics as `numpy.interp`).

use crate::config::Thresholds;
use crate::data::model::{AlignedPair, EndpointMismatch, Series};
use crate::error::InvalidInput;

/// Align `other` onto `reference.x` with the default endpoint tolerance.
pub fn align(reference: &Series, other: &Series) -> Result<AlignedPair, InvalidInput> {
    align_with_tolerance(reference, other, Thresholds::default().endpoint_tolerance)
}

/// Align `other` onto `reference.x`.
///
/// Equal-length series are assumed to share a grid and are paired as-is.
/// Otherwise `other.x` must be non-decreasing; a decrease (or a NaN) fails
/// with [`InvalidInput::NonMonotonic`] instead of producing garbage.
///
/// Endpoints further apart than `endpoint_tolerance` are reported through
/// [`AlignedPair::endpoint_mismatch`], never as an error.
pub fn align_with_tolerance(
    reference: &Series,
    other: &Series,
    endpoint_tolerance: f64,
) -> Result<AlignedPair, InvalidInput> {
    let endpoint_mismatch = check_endpoints(reference, other, endpoint_tolerance);
    if let Some(mismatch) = &endpoint_mismatch {
        log::warn!("{mismatch}");
    }

    let resampled = reference.len() != other.len();
    let other_y = if resampled {
        log::debug!(
            "resampling {} points onto a {}-point reference grid",
            other.len(),
            reference.len()
        );
        ensure_non_decreasing(other.x())?;
        reference
            .x()
            .iter()
            .map(|&t| interpolate_clamped(other.x(), other.y(), t))
            .collect()
    } else {
        other.y().to_vec()
    };

    Ok(AlignedPair {
        x: reference.x().to_vec(),
        reference: reference.y().to_vec(),
        other: other_y,
        resampled,
        endpoint_mismatch,
    })
}

fn check_endpoints(
    reference: &Series,
    other: &Series,
    tolerance: f64,
) -> Option<EndpointMismatch> {
    let r = reference.interval();
    let o = other.interval();
    let differs = (r.0 - o.0).abs() > tolerance || (r.1 - o.1).abs() > tolerance;
    differs.then_some(EndpointMismatch {
        reference: r,
        other: o,
    })
}

fn ensure_non_decreasing(x: &[f64]) -> Result<(), InvalidInput> {
    match x.windows(2).position(|w| !(w[1] >= w[0])) {
        Some(i) => Err(InvalidInput::NonMonotonic { index: i + 1 }),
        None => Ok(()),
    }
}

/// Linear interpolation on a non-decreasing grid, clamped at both ends.
///
/// Returns NaN for an empty grid, mismatched `x`/`y` lengths or a NaN `t`.
pub fn interpolate_clamped(x: &[f64], y: &[f64], t: f64) -> f64 {
    if x.is_empty() || x.len() != y.len() || t.is_nan() {
        return f64::NAN;
    }
    let last = x.len() - 1;
    if t <= x[0] {
        return y[0];
    }
    if t >= x[last] {
        return y[last];
    }

    // x[idx] <= t < x[idx + 1], so the interval has positive width.
    let idx = x.partition_point(|&v| v <= t) - 1;
    let (x1, x2) = (x[idx], x[idx + 1]);
    let (y1, y2) = (y[idx], y[idx + 1]);
    y1 + (t - x1) * (y2 - y1) / (x2 - x1)
}

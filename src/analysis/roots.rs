use crate::data::model::RootEstimate;
use crate::error::InvalidInput;

/// Brackets whose endpoint values are closer than this are skipped.
pub const MIN_SECANT_DENOMINATOR: f64 = 1e-10;

/// Locate sign changes of a sampled function and refine each one with a
/// single linear-interpolation (false position) step.
///
/// NaN samples are dropped before scanning, so a bracket may span a gap of
/// undefined values. A sample that is exactly zero never forms a bracket on
/// its own. Estimates come out in scan order and are not deduplicated.
pub fn find_roots(x: &[f64], y: &[f64]) -> Result<Vec<RootEstimate>, InvalidInput> {
    if x.len() != y.len() {
        return Err(InvalidInput::LengthMismatch {
            x: x.len(),
            y: y.len(),
        });
    }
    if x.is_empty() {
        return Err(InvalidInput::Empty);
    }

    let valid: Vec<(f64, f64)> = x
        .iter()
        .copied()
        .zip(y.iter().copied())
        .filter(|(xi, yi)| !xi.is_nan() && !yi.is_nan())
        .collect();

    let roots = valid
        .windows(2)
        .filter_map(|w| {
            let (x1, y1) = w[0];
            let (x2, y2) = w[1];
            if sign(y1) * sign(y2) >= 0.0 {
                return None;
            }
            let dy = y2 - y1;
            if dy.abs() <= MIN_SECANT_DENOMINATOR {
                return None;
            }
            Some(RootEstimate {
                bracket_lo: x1,
                bracket_hi: x2,
                x_root: x1 - y1 * (x2 - x1) / dy,
            })
        })
        .collect();

    Ok(roots)
}

/// Like `numpy.sign`: zero maps to zero.
fn sign(v: f64) -> f64 {
    if v > 0.0 {
        1.0
    } else if v < 0.0 {
        -1.0
    } else {
        0.0
    }
}

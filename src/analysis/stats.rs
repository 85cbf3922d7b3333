use serde::Serialize;

use crate::config::Thresholds;
use crate::data::model::{AlignedPair, ErrorStats};
use crate::error::InvalidInput;

/// Elementwise `|a[i] - b[i]|`.
pub fn absolute_errors(a: &[f64], b: &[f64]) -> Result<Vec<f64>, InvalidInput> {
    if a.len() != b.len() {
        return Err(InvalidInput::SeriesMismatch {
            a: a.len(),
            b: b.len(),
        });
    }
    if a.is_empty() {
        return Err(InvalidInput::Empty);
    }
    Ok(a.iter().zip(b).map(|(ya, yb)| (ya - yb).abs()).collect())
}

/// Summarise an error vector.
///
/// NaN errors are masked out of every statistic, including `final`, and
/// counted in [`ErrorStats::masked`]. An all-NaN vector has nothing to
/// summarise and fails with [`InvalidInput::AllNan`].
///
/// The log-scale decision is `min > 0 && max / min > log_scale_ratio`; the
/// `min > 0` guard keeps an all-zero error on a linear axis.
pub fn error_stats(errors: &[f64], log_scale_ratio: f64) -> Result<ErrorStats, InvalidInput> {
    if errors.is_empty() {
        return Err(InvalidInput::Empty);
    }
    let valid: Vec<f64> = errors.iter().copied().filter(|e| !e.is_nan()).collect();
    let Some(&final_error) = valid.last() else {
        return Err(InvalidInput::AllNan { len: errors.len() });
    };
    let masked = errors.len() - valid.len();
    if masked > 0 {
        log::warn!("{masked} of {} error values are undefined and were skipped", errors.len());
    }

    let max = valid.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min = valid.iter().copied().fold(f64::INFINITY, f64::min);
    let mean = valid.iter().sum::<f64>() / valid.len() as f64;
    let use_log_scale = min > 0.0 && max / min > log_scale_ratio;

    Ok(ErrorStats {
        max,
        mean,
        min,
        final_error,
        use_log_scale,
        masked,
    })
}

/// Error statistics of an aligned pair with the default log-scale ratio.
pub fn analyze(aligned: &AlignedPair) -> Result<ErrorStats, InvalidInput> {
    analyze_with(aligned, &Thresholds::default())
}

pub fn analyze_with(
    aligned: &AlignedPair,
    thresholds: &Thresholds,
) -> Result<ErrorStats, InvalidInput> {
    let errors = absolute_errors(&aligned.reference, &aligned.other)?;
    error_stats(&errors, thresholds.log_scale_ratio)
}

// ---------------------------------------------------------------------------
// ErrorProfile – what an error plot needs
// ---------------------------------------------------------------------------

/// Per-point error curve together with its summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorProfile {
    pub x: Vec<f64>,
    pub errors: Vec<f64>,
    pub stats: ErrorStats,
}

impl ErrorProfile {
    pub fn from_aligned(
        aligned: &AlignedPair,
        thresholds: &Thresholds,
    ) -> Result<Self, InvalidInput> {
        let errors = absolute_errors(&aligned.reference, &aligned.other)?;
        let stats = error_stats(&errors, thresholds.log_scale_ratio)?;
        Ok(Self {
            x: aligned.x.clone(),
            errors,
            stats,
        })
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn pair(a: &[f64], b: &[f64]) -> AlignedPair {
        AlignedPair {
            x: (0..a.len()).map(|i| i as f64).collect(),
            reference: a.to_vec(),
            other: b.to_vec(),
            resampled: false,
            endpoint_mismatch: None,
        }
    }

    #[test]
    fn basic_statistics() {
        let stats = analyze(&pair(&[1.0, 2.0, 3.0], &[1.0, 2.0, 4.0])).unwrap();
        assert_eq!(stats.max, 1.0);
        assert_relative_eq!(stats.mean, 1.0 / 3.0);
        assert_eq!(stats.min, 0.0);
        assert_eq!(stats.final_error, 1.0);
        assert!(!stats.use_log_scale);
    }

    #[test]
    fn wide_dynamic_range_switches_to_log_scale() {
        let stats = error_stats(&[1e-5, 1e-1], 100.0).unwrap();
        assert!(stats.use_log_scale);

        let narrow = error_stats(&[1.0, 100.0], 100.0).unwrap();
        assert!(!narrow.use_log_scale, "ratio of exactly 100 stays linear");
    }

    #[test]
    fn all_zero_errors_stay_linear() {
        let stats = analyze(&pair(&[1.0, 2.0], &[1.0, 2.0])).unwrap();
        assert_eq!((stats.min, stats.max), (0.0, 0.0));
        assert!(!stats.use_log_scale);
    }

    #[test]
    fn ratio_is_configurable() {
        let thresholds = Thresholds {
            log_scale_ratio: 1e6,
            ..Thresholds::default()
        };
        let stats = analyze_with(&pair(&[0.0, 0.0], &[1e-5, 1e-1]), &thresholds).unwrap();
        assert!(!stats.use_log_scale);
    }

    #[test]
    fn empty_and_mismatched_inputs_are_rejected() {
        assert_eq!(error_stats(&[], 100.0), Err(InvalidInput::Empty));
        assert_eq!(analyze(&pair(&[], &[])), Err(InvalidInput::Empty));
        assert_eq!(
            absolute_errors(&[1.0], &[1.0, 2.0]),
            Err(InvalidInput::SeriesMismatch { a: 1, b: 2 })
        );
    }

    #[test]
    fn nan_errors_are_masked_from_every_statistic() {
        let stats = error_stats(&[f64::NAN, 1.0, 2.0, f64::NAN], 100.0).unwrap();
        assert_eq!(stats.masked, 2);
        assert_eq!((stats.min, stats.max), (1.0, 2.0));
        assert_relative_eq!(stats.mean, 1.5);
        assert_eq!(stats.final_error, 2.0);
        assert!(!stats.use_log_scale);

        let wide = error_stats(&[1e-5, f64::NAN, 1e-1], 100.0).unwrap();
        assert!(wide.use_log_scale);
        assert_eq!(wide.masked, 1);
    }

    #[test]
    fn all_nan_errors_are_rejected() {
        assert_eq!(
            error_stats(&[f64::NAN, f64::NAN], 100.0),
            Err(InvalidInput::AllNan { len: 2 })
        );
    }

    #[test]
    fn profile_keeps_grid_and_errors() {
        let aligned = pair(&[0.0, 1.0], &[0.5, 3.0]);
        let profile = ErrorProfile::from_aligned(&aligned, &Thresholds::default()).unwrap();
        assert_eq!(profile.x, vec![0.0, 1.0]);
        assert_eq!(profile.errors, vec![0.5, 2.0]);
        assert_eq!(profile.stats.final_error, 2.0);
        assert_eq!(profile.stats.masked, 0);
    }
}

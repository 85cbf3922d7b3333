use std::fmt::Display;

use serde::Serialize;
use thiserror::Error;

use super::align::align_with_tolerance;
use super::roots::find_roots;
use super::stats::ErrorProfile;
use crate::config::{AnalysisConfig, RootScan, Thresholds};
use crate::data::model::{AlignedPair, RootEstimate, Series, SeriesSummary};
use crate::error::InvalidInput;
use crate::expr::{
    Expr, ExprError, SampledFunction, has_valid_data, linspace, sample, sample_or_nan,
};
use crate::style::{PlotStyle, SeriesStyle};

#[derive(Debug, Error)]
pub enum CompareError {
    #[error(transparent)]
    Invalid(#[from] InvalidInput),

    #[error("invalid formula")]
    Expr(#[from] ExprError),

    #[error("'{formula}' has no valid values on the requested grid")]
    NoValidData { formula: String },

    #[error("invalid scan window [{x_min}, {x_max}] with {samples} samples")]
    InvalidScan { x_min: f64, x_max: f64, samples: usize },
}

/// A series with the label it is shown under.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamedSeries {
    pub name: String,
    pub series: Series,
}

impl NamedSeries {
    pub fn new(name: impl Into<String>, series: Series) -> Self {
        Self {
            name: name.into(),
            series,
        }
    }
}

// ---------------------------------------------------------------------------
// Pair comparison
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairComparison {
    pub reference_name: String,
    pub other_name: String,
    pub aligned: AlignedPair,
    pub profile: ErrorProfile,
}

/// Compare two tables; the first one provides the grid.
pub fn compare_pair(
    reference: &NamedSeries,
    other: &NamedSeries,
    thresholds: &Thresholds,
) -> Result<PairComparison, CompareError> {
    if reference.series.len() != other.series.len() {
        log::info!(
            "interpolating '{}' onto the points of '{}'",
            other.name,
            reference.name
        );
    }
    let aligned =
        align_with_tolerance(&reference.series, &other.series, thresholds.endpoint_tolerance)?;
    let profile = ErrorProfile::from_aligned(&aligned, thresholds)?;
    Ok(PairComparison {
        reference_name: reference.name.clone(),
        other_name: other.name.clone(),
        aligned,
        profile,
    })
}

// ---------------------------------------------------------------------------
// Numerical method vs exact solution
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExactComparison {
    pub method_name: String,
    pub formula: String,
    /// `reference` is the method, `other` the exact solution on the same grid.
    pub aligned: AlignedPair,
    pub profile: ErrorProfile,
    /// Dense exact curve over the method's interval.
    pub curve: SampledFunction,
    pub points: Vec<PointOfInterest>,
}

/// A requested x marked on the method sample closest to it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PointOfInterest {
    pub requested: f64,
    pub index: usize,
    pub x: f64,
    pub y: f64,
}

/// Evaluate `formula` at the method's own points and measure the error.
///
/// Each x in `points` that lies within the method's first and last x is
/// marked on its nearest sample; the rest are dropped.
pub fn compare_with_exact(
    method: &NamedSeries,
    formula: &str,
    points: &[f64],
    config: &AnalysisConfig,
) -> Result<ExactComparison, CompareError> {
    let expr = Expr::parse(formula)?;
    let exact = sample(&expr, method.series.x());
    if !has_valid_data(&exact.y) {
        return Err(CompareError::NoValidData {
            formula: formula.to_string(),
        });
    }

    let aligned = AlignedPair {
        x: exact.x,
        reference: method.series.y().to_vec(),
        other: exact.y,
        resampled: false,
        endpoint_mismatch: None,
    };
    let profile = ErrorProfile::from_aligned(&aligned, &config.thresholds)?;

    let (start, end) = method.series.interval();
    let curve = sample(&expr, &linspace(start, end, config.exact_samples));

    Ok(ExactComparison {
        method_name: method.name.clone(),
        formula: formula.to_string(),
        aligned,
        profile,
        curve,
        points: points_of_interest(&method.series, points),
    })
}

/// Nearest sample for every requested x inside `[x_first, x_last]`.
pub fn points_of_interest(series: &Series, requested: &[f64]) -> Vec<PointOfInterest> {
    let (first, last) = series.interval();
    requested
        .iter()
        .copied()
        .filter(|&t| {
            let inside = first <= t && t <= last;
            if !inside {
                log::debug!("point x = {t} lies outside [{first}, {last}]");
            }
            inside
        })
        .filter_map(|t| {
            let index = nearest_index(series.x(), t)?;
            Some(PointOfInterest {
                requested: t,
                index,
                x: series.x()[index],
                y: series.y()[index],
            })
        })
        .collect()
}

/// Index of the smallest `|x[i] - t|`; ties go to the first.
fn nearest_index(x: &[f64], t: f64) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &v) in x.iter().enumerate() {
        let dist = (v - t).abs();
        let closer = match best {
            Some((_, d)) => dist < d,
            None => !dist.is_nan(),
        };
        if closer {
            best = Some((i, dist));
        }
    }
    best.map(|(i, _)| i)
}

// ---------------------------------------------------------------------------
// Several methods on one plot
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MethodEntry {
    pub name: String,
    pub series: Series,
    pub style: SeriesStyle,
    /// `style.color` resolved for renderers.
    pub rgb: [u8; 3],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedMethod {
    pub name: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MultiComparison {
    pub methods: Vec<MethodEntry>,
    pub skipped: Vec<SkippedMethod>,
    /// Smallest first x and largest last x over all loaded methods.
    pub interval: Option<(f64, f64)>,
    pub exact: Option<SampledFunction>,
}

impl MultiComparison {
    /// Collect already-loaded methods. A failed entry is skipped, not fatal;
    /// styles follow input position so a skipped entry leaves a gap in the
    /// cycle.
    ///
    /// With more inputs than the configured cycle holds, every input gets
    /// its own hue from [`PlotStyle::generated`] instead of repeating.
    pub fn from_results<I, E>(
        results: I,
        exact_formula: Option<&str>,
        config: &AnalysisConfig,
    ) -> Self
    where
        I: IntoIterator<Item = (String, Result<Series, E>)>,
        E: Display,
    {
        let results: Vec<_> = results.into_iter().collect();
        let styles = if results.len() > config.style.series.len() {
            log::info!(
                "{} inputs for {} configured styles; generating a palette",
                results.len(),
                config.style.series.len()
            );
            PlotStyle::generated(results.len())
        } else {
            config.style.clone()
        };

        let mut methods = Vec::new();
        let mut skipped = Vec::new();
        let mut interval: Option<(f64, f64)> = None;

        for (idx, (name, result)) in results.into_iter().enumerate() {
            match result {
                Ok(series) => {
                    let (first, last) = series.interval();
                    interval = Some(match interval {
                        Some((lo, hi)) => (lo.min(first), hi.max(last)),
                        None => (first, last),
                    });
                    log::info!("{name}: {} points", series.len());
                    let style = styles.style_for(idx);
                    methods.push(MethodEntry {
                        name,
                        series,
                        rgb: style.rgb(),
                        style,
                    });
                }
                Err(e) => {
                    log::warn!("skipping '{name}': {e}");
                    skipped.push(SkippedMethod {
                        name,
                        reason: e.to_string(),
                    });
                }
            }
        }

        let exact = match (exact_formula, interval) {
            (Some(formula), Some((lo, hi))) => {
                let curve = sample_or_nan(formula, &linspace(lo, hi, config.exact_samples));
                if has_valid_data(&curve.y) {
                    Some(curve)
                } else {
                    log::warn!(
                        "exact solution '{formula}' produced no valid values; leaving it out"
                    );
                    None
                }
            }
            _ => None,
        };

        Self {
            methods,
            skipped,
            interval,
            exact,
        }
    }
}

// ---------------------------------------------------------------------------
// Root scan
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RootScanResult {
    pub formula: String,
    pub function: SampledFunction,
    pub roots: Vec<RootEstimate>,
}

/// Sample `formula` over the scan window and bracket its sign changes.
pub fn scan_roots(formula: &str, scan: &RootScan) -> Result<RootScanResult, CompareError> {
    if !(scan.x_min < scan.x_max) || scan.samples < 2 {
        return Err(CompareError::InvalidScan {
            x_min: scan.x_min,
            x_max: scan.x_max,
            samples: scan.samples,
        });
    }

    let function = sample_or_nan(formula, &linspace(scan.x_min, scan.x_max, scan.samples));
    if !has_valid_data(&function.y) {
        return Err(CompareError::NoValidData {
            formula: formula.to_string(),
        });
    }

    let roots = find_roots(&function.x, &function.y)?;
    log::info!(
        "'{formula}': {} sign changes in [{}, {}]",
        roots.len(),
        scan.x_min,
        scan.x_max
    );
    Ok(RootScanResult {
        formula: formula.to_string(),
        function,
        roots,
    })
}

// ---------------------------------------------------------------------------
// Plain data summary
// ---------------------------------------------------------------------------

/// Row of a data preview: `(index, x, y)`.
pub type PreviewRow = (usize, f64, f64);

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataSummary {
    pub name: String,
    pub summary: SeriesSummary,
    pub head: Vec<PreviewRow>,
    /// Empty when the head already covers the table.
    pub tail: Vec<PreviewRow>,
}

const PREVIEW_ROWS: usize = 5;

pub fn summarize(data: &NamedSeries) -> DataSummary {
    let n = data.series.len();
    let row = |i: usize| (i, data.series.x()[i], data.series.y()[i]);
    let head = (0..n.min(PREVIEW_ROWS)).map(row).collect();
    let tail = (n.saturating_sub(PREVIEW_ROWS).max(PREVIEW_ROWS)..n).map(row).collect();
    DataSummary {
        name: data.name.clone(),
        summary: data.series.summary(),
        head,
        tail,
    }
}

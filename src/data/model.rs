use std::fmt;

use serde::Serialize;

use crate::error::InvalidInput;

// ---------------------------------------------------------------------------
// Series – one method's (x, y) samples
// ---------------------------------------------------------------------------

/// An ordered set of `(x, y)` samples produced by one method or one function.
///
/// A `Series` always holds at least one point and `x.len() == y.len()`.
/// The x order is whatever the source provided; it is not sorted here.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    x: Vec<f64>,
    y: Vec<f64>,
}

impl Series {
    /// Build a series, rejecting empty or mismatched columns.
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Result<Self, InvalidInput> {
        if x.len() != y.len() {
            return Err(InvalidInput::LengthMismatch {
                x: x.len(),
                y: y.len(),
            });
        }
        if x.is_empty() {
            return Err(InvalidInput::Empty);
        }
        Ok(Series { x, y })
    }

    /// Independent variable.
    pub fn x(&self) -> &[f64] {
        &self.x
    }

    /// Dependent variable – same length as `x`.
    pub fn y(&self) -> &[f64] {
        &self.y
    }

    /// Number of points (always ≥ 1).
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Always `false`; present for API symmetry with collections.
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// First and last x as stored (not min / max).
    pub fn interval(&self) -> (f64, f64) {
        (self.x[0], self.x[self.x.len() - 1])
    }

    pub fn summary(&self) -> SeriesSummary {
        let (x_first, x_last) = self.interval();
        let y_min = self.y.iter().copied().fold(f64::INFINITY, f64::min);
        let y_max = self.y.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        SeriesSummary {
            points: self.len(),
            x_first,
            x_last,
            y_min,
            y_max,
        }
    }
}

/// Quick description of a series for annotation boxes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesSummary {
    pub points: usize,
    pub x_first: f64,
    pub x_last: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl fmt::Display for SeriesSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} points, x: [{:.4}, {:.4}], y: [{:.4}, {:.4}]",
            self.points, self.x_first, self.x_last, self.y_min, self.y_max
        )
    }
}

// ---------------------------------------------------------------------------
// AlignedPair – two series on one grid
// ---------------------------------------------------------------------------

/// Start / end points of two series that disagree beyond the tolerance.
///
/// Usually means the two methods were not run over the same interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EndpointMismatch {
    pub reference: (f64, f64),
    pub other: (f64, f64),
}

impl fmt::Display for EndpointMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "intervals differ: reference [{:.6}, {:.6}], other [{:.6}, {:.6}]",
            self.reference.0, self.reference.1, self.other.0, self.other.1
        )
    }
}

/// Two series sharing the reference x-grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlignedPair {
    /// The reference grid.
    pub x: Vec<f64>,
    /// Reference values on `x`.
    pub reference: Vec<f64>,
    /// Companion values on `x`, interpolated when `resampled` is set.
    pub other: Vec<f64>,
    pub resampled: bool,
    pub endpoint_mismatch: Option<EndpointMismatch>,
}

impl AlignedPair {
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Analysis results
// ---------------------------------------------------------------------------

/// Absolute-error summary between two aligned series.
///
/// Points whose error is NaN (an undefined exact value, a `nan` table row)
/// are left out of every statistic and counted in `masked`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ErrorStats {
    pub max: f64,
    pub mean: f64,
    pub min: f64,
    /// Error at the last grid point that has one.
    #[serde(rename = "final")]
    pub final_error: f64,
    /// Plot the error on a logarithmic axis.
    pub use_log_scale: bool,
    pub masked: usize,
}

impl fmt::Display for ErrorStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "max error:   {:.10e}", self.max)?;
        writeln!(f, "mean error:  {:.10e}", self.mean)?;
        writeln!(f, "min error:   {:.10e}", self.min)?;
        write!(f, "final error: {:.10e}", self.final_error)?;
        if self.masked > 0 {
            write!(f, "\n({} undefined points skipped)", self.masked)?;
        }
        Ok(())
    }
}

/// Approximate root inside one sign-change bracket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RootEstimate {
    pub bracket_lo: f64,
    pub bracket_hi: f64,
    pub x_root: f64,
}

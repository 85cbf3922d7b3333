use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::data::parser::ColumnLayout;
use crate::error::ConfigError;
use crate::style::PlotStyle;

// ---------------------------------------------------------------------------
// Thresholds
// ---------------------------------------------------------------------------

/// Tunable constants of the comparison pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Largest endpoint difference that still counts as "same interval".
    pub endpoint_tolerance: f64,
    /// `max / min` error ratio above which the error plot goes logarithmic.
    pub log_scale_ratio: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            endpoint_tolerance: 1e-6,
            log_scale_ratio: 100.0,
        }
    }
}

/// Sampling window used to scan an expression for roots.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RootScan {
    pub x_min: f64,
    pub x_max: f64,
    pub samples: usize,
}

impl Default for RootScan {
    fn default() -> Self {
        Self {
            x_min: -10.0,
            x_max: 10.0,
            samples: 1000,
        }
    }
}

// ---------------------------------------------------------------------------
// AnalysisConfig
// ---------------------------------------------------------------------------

/// Everything a run can be configured with. Every field has a default, so a
/// config file only needs the keys it wants to change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub thresholds: Thresholds,
    /// Points used to draw a smooth exact-solution curve.
    pub exact_samples: usize,
    pub root_scan: RootScan,
    /// Rows in the strided error table.
    pub table_rows: usize,
    pub columns: ColumnLayout,
    pub style: PlotStyle,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            thresholds: Thresholds::default(),
            exact_samples: 500,
            root_scan: RootScan::default(),
            table_rows: 10,
            columns: ColumnLayout::default(),
            style: PlotStyle::default(),
        }
    }
}

impl AnalysisConfig {
    /// Read a JSON config file.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Decode {
            path: path.to_path_buf(),
            source,
        })
    }
}

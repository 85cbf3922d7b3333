//! Error types shared across the crate.
//!
//! ┌ [`ParseError`]   : table ingestion
//! │   ├ no numeric rows survived
//! │   └ file missing / unreadable (raised by the loader only)
//! │
//! ├ [`InvalidInput`] : structural problems with numeric arrays
//! │   ├ empty input
//! │   ├ x / y length mismatch
//! │   ├ two value columns of different length
//! │   ├ nothing but NaN
//! │   └ non-monotonic interpolation grid
//! │
//! └ [`ConfigError`]  : configuration file read / decode failures
//!
//! Expression errors live next to the tokenizer in [`crate::expr::ExprError`].

use std::path::PathBuf;

use thiserror::Error;

/// Failures while turning text into a [`crate::data::model::Series`].
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("no numeric rows found")]
    EmptyResult,

    #[error("file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Structural violations of a numeric routine's preconditions.
///
/// These are reported to the immediate caller, never truncated or patched up.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidInput {
    #[error("input is empty")]
    Empty,

    #[error("length mismatch: x has {x} values but y has {y}")]
    LengthMismatch { x: usize, y: usize },

    #[error("series length mismatch: {a} values against {b}")]
    SeriesMismatch { a: usize, b: usize },

    #[error("all {len} values are NaN")]
    AllNan { len: usize },

    #[error("x values are not non-decreasing at index {index}")]
    NonMonotonic { index: usize },
}

/// Failures while loading an [`crate::config::AnalysisConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

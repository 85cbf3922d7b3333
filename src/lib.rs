//! Compare tabulated ODE solver output.
//!
//! Solver programs write loosely formatted `x y` / `i x y` tables. This crate
//! parses them ([`data`]), puts two tables on one grid, measures their
//! absolute error and brackets the roots of user formulas ([`analysis`],
//! [`expr`]), and hands structured results to whatever draws them
//! ([`report`], [`style`]).

pub mod analysis;
pub mod config;
pub mod data;
pub mod error;
pub mod expr;
pub mod report;
pub mod style;

pub use config::AnalysisConfig;
pub use data::model::{AlignedPair, ErrorStats, RootEstimate, Series};
pub use error::{InvalidInput, ParseError};

use serde::Serialize;

use super::Expr;

/// A function tabulated on a grid. `y` may contain NaN where the formula is
/// undefined.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampledFunction {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

/// `n` evenly spaced points from `start` to `end`, both included.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            let mut grid: Vec<f64> = (0..n).map(|i| start + step * i as f64).collect();
            grid[n - 1] = end;
            grid
        }
    }
}

pub fn sample(expr: &Expr, grid: &[f64]) -> SampledFunction {
    SampledFunction {
        x: grid.to_vec(),
        y: grid.iter().map(|&x| expr.eval(x)).collect(),
    }
}

/// Parse and sample `source`; a formula that fails to parse yields an
/// all-NaN `y` so downstream NaN masking treats it as "no data".
pub fn sample_or_nan(source: &str, grid: &[f64]) -> SampledFunction {
    match Expr::parse(source) {
        Ok(expr) => sample(&expr, grid),
        Err(e) => {
            log::error!("cannot evaluate '{source}': {e}");
            SampledFunction {
                x: grid.to_vec(),
                y: vec![f64::NAN; grid.len()],
            }
        }
    }
}

/// `true` when at least one sample is a number.
pub fn has_valid_data(y: &[f64]) -> bool {
    y.iter().any(|v| !v.is_nan())
}

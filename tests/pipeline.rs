use std::fs;
use std::path::PathBuf;

use approx::assert_relative_eq;

use odelens::analysis::compare::{
    MultiComparison, NamedSeries, compare_pair, compare_with_exact, scan_roots,
};
use odelens::config::{AnalysisConfig, RootScan};
use odelens::data::loader::load_table;
use odelens::data::parser::ColumnLayout;
use odelens::report::{error_rows, table_stride, write_error_table};
use odelens::ParseError;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("odelens-{name}-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn exact(x: f64) -> f64 {
    (x + 1.0).powi(2) - 0.5 * x.exp()
}

/// Euler table for y' = y - x^2 + 1 in the solvers' commented 3-column format.
fn euler_table(steps: usize) -> String {
    let h = 2.0 / steps as f64;
    let mut text = String::from("# Euler method\n# Paso h: 0.2\n#\n# i\tx_i\ty_i\n");
    let mut y = 0.5;
    for i in 0..=steps {
        let x = i as f64 * h;
        text.push_str(&format!("{i}\t{x:.10}\t{y:.10}\n"));
        y += h * (y - x * x + 1.0);
    }
    text
}

fn exact_table(steps: usize) -> String {
    let mut text = String::from("x y\n");
    for i in 0..=steps {
        let x = 2.0 * i as f64 / steps as f64;
        text.push_str(&format!("{x:.12} {:.12}\n", exact(x)));
    }
    text
}

#[test]
fn euler_against_exact_table_and_formula() {
    let dir = scratch_dir("pipeline");
    let euler_path = dir.join("euler.txt");
    let exact_path = dir.join("exact.txt");
    fs::write(&euler_path, euler_table(10)).unwrap();
    fs::write(&exact_path, exact_table(40)).unwrap();

    let config = AnalysisConfig::default();
    let euler = load_table(&euler_path, ColumnLayout::Auto).unwrap();
    let table = load_table(&exact_path, ColumnLayout::Auto).unwrap();
    assert_eq!(euler.accepted, 11);
    assert_eq!(table.accepted, 41);
    assert_eq!(table.discarded, 1, "the 'x y' header is counted as malformed");

    let euler = NamedSeries::new("Euler", euler.series);
    let table = NamedSeries::new("Exact", table.series);

    // Table vs formula: the exact table is interpolated onto the Euler grid,
    // which sits exactly on every fourth exact row.
    let by_table = compare_pair(&euler, &table, &config.thresholds).unwrap();
    let by_formula =
        compare_with_exact(&euler, "(x+1)^2 - 0.5*exp(x)", &[1.0], &config).unwrap();
    assert!(by_table.aligned.resampled);
    assert!(by_table.aligned.endpoint_mismatch.is_none());
    let (table_stats, formula_stats) = (by_table.profile.stats, by_formula.profile.stats);
    assert_relative_eq!(table_stats.max, formula_stats.max, epsilon = 1e-9);
    assert_relative_eq!(table_stats.mean, formula_stats.mean, epsilon = 1e-9);
    assert_eq!(formula_stats.masked, 0);

    // x = 1 is the sixth Euler point.
    assert_eq!(by_formula.points.len(), 1);
    assert_eq!(by_formula.points[0].index, 5);

    // Euler's error grows monotonically on this problem and peaks at the end.
    let stats = by_formula.profile.stats;
    assert_eq!(stats.min, 0.0);
    assert_eq!(stats.max, stats.final_error);
    assert!(!stats.use_log_scale);

    let stride = table_stride(euler.series.len(), config.table_rows);
    let rows = error_rows(&by_formula.aligned, stride);
    let mut out = Vec::new();
    write_error_table(&mut out, &rows, "Euler", "exact").unwrap();
    assert_eq!(String::from_utf8(out).unwrap().lines().count(), 12);

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn multi_method_run_survives_a_bad_file() {
    let dir = scratch_dir("multi");
    let good = dir.join("euler.txt");
    let junk = dir.join("junk.txt");
    fs::write(&good, euler_table(10)).unwrap();
    fs::write(&junk, "# nothing useful\nnot numbers here\n").unwrap();

    let config = AnalysisConfig::default();
    let inputs = [
        ("Euler", good.clone()),
        ("Junk", junk.clone()),
        ("Missing", dir.join("missing.txt")),
    ];
    let results = inputs.iter().map(|(name, path)| {
        let result = load_table(path, config.columns).map(|t| t.series);
        (name.to_string(), result)
    });
    let multi = MultiComparison::from_results(results, Some("(x+1)^2 - 0.5*exp(x)"), &config);

    assert_eq!(multi.methods.len(), 1);
    assert_eq!(multi.skipped.len(), 2);
    assert_eq!(multi.interval, Some((0.0, 2.0)));
    assert!(multi.exact.is_some());

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn missing_and_empty_inputs_are_typed_failures() {
    let dir = scratch_dir("errors");
    let empty = dir.join("empty.txt");
    fs::write(&empty, "# header only\n\n").unwrap();

    assert!(matches!(
        load_table(&dir.join("nope.txt"), ColumnLayout::Auto),
        Err(ParseError::FileNotFound { .. })
    ));
    assert!(matches!(
        load_table(&empty, ColumnLayout::Auto),
        Err(ParseError::EmptyResult)
    ));

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn root_scan_of_exact_solution() {
    // (x+1)^2 - 0.5 e^x changes sign once on [0, 5].
    let scan = RootScan {
        x_min: 0.0,
        x_max: 5.0,
        samples: 501,
    };
    let result = scan_roots("(x+1)^2 - 0.5*exp(x)", &scan).unwrap();
    assert_eq!(result.roots.len(), 1);
    let root = result.roots[0];
    assert!(root.bracket_lo < root.x_root && root.x_root < root.bracket_hi);
    assert!(exact(root.x_root).abs() < 1e-3);
}

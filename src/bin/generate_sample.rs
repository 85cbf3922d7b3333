use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Test problem: y' = y - x² + 1, y(0) = 0.5 on [0, 2].
fn f(x: f64, y: f64) -> f64 {
    y - x * x + 1.0
}

fn exact(x: f64) -> f64 {
    (x + 1.0).powi(2) - 0.5 * x.exp()
}

const X0: f64 = 0.0;
const XF: f64 = 2.0;
const Y0: f64 = 0.5;

fn euler(steps: usize) -> Vec<(f64, f64)> {
    let h = (XF - X0) / steps as f64;
    let mut y = Y0;
    let mut out = vec![(X0, y)];
    for i in 0..steps {
        let x = X0 + i as f64 * h;
        y += h * f(x, y);
        out.push((X0 + (i + 1) as f64 * h, y));
    }
    out
}

fn rk4(steps: usize) -> Vec<(f64, f64)> {
    let h = (XF - X0) / steps as f64;
    let mut y = Y0;
    let mut out = vec![(X0, y)];
    for i in 0..steps {
        let x = X0 + i as f64 * h;
        let k1 = f(x, y);
        let k2 = f(x + h / 2.0, y + h * k1 / 2.0);
        let k3 = f(x + h / 2.0, y + h * k2 / 2.0);
        let k4 = f(x + h, y + h * k3);
        y += h * (k1 + 2.0 * k2 + 2.0 * k3 + k4) / 6.0;
        out.push((X0 + (i + 1) as f64 * h, y));
    }
    out
}

/// Write `i x y` rows under a commented header, the way the solver programs do.
fn write_indexed(path: &Path, title: &str, steps: usize, rows: &[(f64, f64)]) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut w = BufWriter::new(file);
    writeln!(w, "# {title}")?;
    writeln!(w, "# ODE: dy/dx = y - x^2 + 1")?;
    writeln!(w, "# Initial condition: y({X0:.6}) = {Y0:.6}")?;
    writeln!(w, "# Interval: [{X0:.6}, {XF:.6}]")?;
    writeln!(w, "# Step h: {:.6}", (XF - X0) / steps as f64)?;
    writeln!(w, "#")?;
    writeln!(w, "# i\tx_i\ty_i")?;
    for (i, (x, y)) in rows.iter().enumerate() {
        writeln!(w, "{i}\t{x:.10}\t{y:.10}")?;
    }
    w.flush()?;
    Ok(())
}

fn write_plain(path: &Path, n: usize) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut w = BufWriter::new(file);
    writeln!(w, "# Exact solution y(x) = (x+1)^2 - 0.5*e^x")?;
    writeln!(w, "# x\ty")?;
    for i in 0..=n {
        let x = X0 + (XF - X0) * i as f64 / n as f64;
        writeln!(w, "{x:.10}  {:.10}", exact(x))?;
    }
    w.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let out_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;

    let euler_steps = 10;
    let rk4_steps = 20;
    let exact_steps = 40;

    let euler_path = out_dir.join("euler.txt");
    write_indexed(&euler_path, "Euler method", euler_steps, &euler(euler_steps))?;
    log::info!("wrote {}", euler_path.display());

    let rk4_path = out_dir.join("rk4.txt");
    write_indexed(&rk4_path, "Runge-Kutta 4", rk4_steps, &rk4(rk4_steps))?;
    log::info!("wrote {}", rk4_path.display());

    let exact_path = out_dir.join("exact.txt");
    write_plain(&exact_path, exact_steps)?;
    log::info!("wrote {}", exact_path.display());

    println!(
        "Wrote euler.txt ({} rows), rk4.txt ({} rows) and exact.txt ({} rows) to {}",
        euler_steps + 1,
        rk4_steps + 1,
        exact_steps + 1,
        out_dir.display()
    );
    println!("Try: odelens exact {} \"(x+1)^2 - 0.5*exp(x)\"", euler_path.display());
    Ok(())
}

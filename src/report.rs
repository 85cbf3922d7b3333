use std::io::Write;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::data::model::AlignedPair;

// ---------------------------------------------------------------------------
// JSON
// ---------------------------------------------------------------------------

/// Pretty-print any report as JSON, newline-terminated.
pub fn write_json<W: Write, T: Serialize>(mut writer: W, report: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, report).context("serializing report")?;
    writeln!(writer).context("writing report")?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Point-by-point error table
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ErrorRow {
    pub x: f64,
    pub y_a: f64,
    pub y_b: f64,
    pub abs_error: f64,
}

/// Distance between printed rows so that roughly `rows` lines come out.
pub fn table_stride(len: usize, rows: usize) -> usize {
    if rows == 0 {
        return 1;
    }
    (len / rows).max(1)
}

/// Every `stride`-th row of an aligned pair, starting at the first point.
pub fn error_rows(aligned: &AlignedPair, stride: usize) -> Vec<ErrorRow> {
    (0..aligned.len())
        .step_by(stride.max(1))
        .map(|i| {
            let (y_a, y_b) = (aligned.reference[i], aligned.other[i]);
            ErrorRow {
                x: aligned.x[i],
                y_a,
                y_b,
                abs_error: (y_a - y_b).abs(),
            }
        })
        .collect()
}

/// Write rows as a tab-separated table with a header naming both series.
pub fn write_error_table<W: Write>(
    writer: W,
    rows: &[ErrorRow],
    name_a: &str,
    name_b: &str,
) -> Result<()> {
    let mut out = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .from_writer(writer);

    out.write_record(["x", name_a, name_b, "abs_error"])
        .context("writing table header")?;
    for row in rows {
        out.write_record([
            format!("{:.10}", row.x),
            format!("{:.10}", row.y_a),
            format!("{:.10}", row.y_b),
            format!("{:.10e}", row.abs_error),
        ])
        .context("writing table row")?;
    }
    out.flush().context("flushing table")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aligned() -> AlignedPair {
        AlignedPair {
            x: vec![0.0, 0.5, 1.0, 1.5],
            reference: vec![1.0, 2.0, 3.0, 4.0],
            other: vec![1.0, 2.5, 3.0, 3.0],
            resampled: false,
            endpoint_mismatch: None,
        }
    }

    #[test]
    fn stride_never_drops_to_zero() {
        assert_eq!(table_stride(4, 10), 1);
        assert_eq!(table_stride(101, 10), 10);
        assert_eq!(table_stride(5, 0), 1);
    }

    #[test]
    fn strided_rows() {
        let rows = error_rows(&aligned(), 2);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].x, 1.0);
        assert_eq!(rows[1].abs_error, 0.0);
    }

    #[test]
    fn table_is_tab_separated_with_named_header() {
        let mut buf = Vec::new();
        write_error_table(&mut buf, &error_rows(&aligned(), 1), "Euler", "Exact").unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "x\tEuler\tExact\tabs_error");
        assert_eq!(lines[2], "0.5000000000\t2.0000000000\t2.5000000000\t5.0000000000e-1");
    }

    #[test]
    fn json_report_ends_with_newline() {
        let mut buf = Vec::new();
        write_json(&mut buf, &error_rows(&aligned(), 4)).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.ends_with("]\n"));
        assert!(text.contains("\"abs_error\": 0.0"));
    }
}

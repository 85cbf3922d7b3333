use serde::{Deserialize, Serialize};

use super::model::Series;
use crate::error::ParseError;

// ---------------------------------------------------------------------------
// Column layout
// ---------------------------------------------------------------------------

/// Which whitespace-separated columns hold x and y.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ColumnLayout {
    /// `index x y` when a line has three or more tokens, `x y` when it has two.
    #[default]
    Auto,
    /// Fixed zero-based column indices.
    Explicit { x: usize, y: usize },
}

// ---------------------------------------------------------------------------
// Line classification
// ---------------------------------------------------------------------------

/// What a single input line turned out to be.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LineKind {
    Blank,
    Comment,
    Data { x: f64, y: f64 },
    /// Wrong token count, non-numeric token, or a non-numeric leading character.
    Malformed,
}

/// Classify one line under the given column layout.
pub fn classify_line(line: &str, layout: ColumnLayout) -> LineKind {
    let trimmed = line.trim();
    let Some(first) = trimmed.chars().next() else {
        return LineKind::Blank;
    };
    if first == '#' {
        return LineKind::Comment;
    }
    if !(first.is_ascii_digit() || matches!(first, '-' | '+' | '.')) {
        return LineKind::Malformed;
    }

    let tokens: Vec<&str> = trimmed.split_ascii_whitespace().collect();
    let picked = match layout {
        ColumnLayout::Auto => match tokens.len() {
            0 | 1 => None,
            2 => Some((tokens[0], tokens[1])),
            _ => Some((tokens[1], tokens[2])),
        },
        ColumnLayout::Explicit { x, y } => tokens.get(x).copied().zip(tokens.get(y).copied()),
    };

    match picked.map(|(xs, ys)| (xs.parse::<f64>(), ys.parse::<f64>())) {
        Some((Ok(x), Ok(y))) => LineKind::Data { x, y },
        _ => LineKind::Malformed,
    }
}

// ---------------------------------------------------------------------------
// Table parsing
// ---------------------------------------------------------------------------

/// A parsed table plus the bookkeeping needed to spot corrupted inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedTable {
    pub series: Series,
    /// Data rows kept.
    pub accepted: usize,
    /// Lines that looked like neither data, comment nor blank.
    pub discarded: usize,
}

/// Parse a line-oriented numeric table.
///
/// Best-effort: malformed lines are counted and skipped, never raised.
/// Fails only when no data row survives.
pub fn parse<I, S>(lines: I, layout: ColumnLayout) -> Result<ParsedTable, ParseError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut x = Vec::new();
    let mut y = Vec::new();
    let mut discarded = 0usize;

    for line in lines {
        match classify_line(line.as_ref(), layout) {
            LineKind::Data { x: xi, y: yi } => {
                x.push(xi);
                y.push(yi);
            }
            LineKind::Malformed => discarded += 1,
            LineKind::Blank | LineKind::Comment => {}
        }
    }

    log::debug!("parsed {} data rows, discarded {discarded} lines", x.len());

    let accepted = x.len();
    let series = Series::new(x, y).map_err(|_| ParseError::EmptyResult)?;
    Ok(ParsedTable {
        series,
        accepted,
        discarded,
    })
}

/// Convenience wrapper over [`parse`] for an in-memory string.
pub fn parse_str(text: &str, layout: ColumnLayout) -> Result<ParsedTable, ParseError> {
    parse(text.lines(), layout)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_only_data_rows_in_order() {
        let text = "# hdr\n1 0.0 1.0\n\n2 0.1 1.105\nbad line\n";
        let table = parse_str(text, ColumnLayout::Auto).unwrap();
        assert_eq!(table.series.x(), &[0.0, 0.1]);
        assert_eq!(table.series.y(), &[1.0, 1.105]);
        assert_eq!(table.accepted, 2);
        assert_eq!(table.discarded, 1);
    }

    #[test]
    fn two_and_three_column_layouts_agree() {
        let two = parse_str("0.0 1.0\n0.1 1.1\n", ColumnLayout::Auto).unwrap();
        let three = parse_str("0 0.0 1.0\n1 0.1 1.1\n", ColumnLayout::Auto).unwrap();
        assert_eq!(two.series, three.series);
    }

    #[test]
    fn tolerates_tabs_and_mixed_whitespace() {
        let text = "  0\t0.5 \t 2.0\n1   \t1.5\t3.0   extra 9\n";
        let table = parse_str(text, ColumnLayout::Auto).unwrap();
        assert_eq!(table.series.x(), &[0.5, 1.5]);
        assert_eq!(table.series.y(), &[2.0, 3.0]);
    }

    #[test]
    fn bad_tokens_drop_single_lines_only() {
        let text = "0 1.0\n1 abc\n2\n+3 .5\n-1e-2 4\n";
        let table = parse_str(text, ColumnLayout::Auto).unwrap();
        assert_eq!(table.series.x(), &[0.0, 3.0, -0.01]);
        assert_eq!(table.series.y(), &[1.0, 0.5, 4.0]);
        assert_eq!(table.discarded, 2);
    }

    #[test]
    fn header_rows_fail_the_leading_character_gate() {
        assert_eq!(classify_line("x y", ColumnLayout::Auto), LineKind::Malformed);
        assert_eq!(classify_line("   # note", ColumnLayout::Auto), LineKind::Comment);
        assert_eq!(classify_line(" \t ", ColumnLayout::Auto), LineKind::Blank);
    }

    #[test]
    fn explicit_columns() {
        let layout = ColumnLayout::Explicit { x: 1, y: 3 };
        let text = "0 0.0 9.9 1.0 0.0\n1 0.1 9.9 1.1 0.0\n2 0.2 9.9\n";
        let table = parse_str(text, layout).unwrap();
        assert_eq!(table.series.x(), &[0.0, 0.1]);
        assert_eq!(table.series.y(), &[1.0, 1.1]);
        assert_eq!(table.discarded, 1);
    }

    #[test]
    fn reparsing_is_bit_identical() {
        let text = "# t\n0 0.1 0.30000000000000004\n1 0.2 1e-300\n";
        let a = parse_str(text, ColumnLayout::Auto).unwrap();
        let b = parse_str(text, ColumnLayout::Auto).unwrap();
        let bits = |s: &Series| -> Vec<u64> { s.y().iter().map(|v| v.to_bits()).collect() };
        assert_eq!(bits(&a.series), bits(&b.series));
        assert_eq!(a, b);
    }

    #[test]
    fn comments_and_blanks_only_is_an_error() {
        let err = parse_str("# only\n\n   \n#another\n", ColumnLayout::Auto).unwrap_err();
        assert!(matches!(err, ParseError::EmptyResult));
    }
}

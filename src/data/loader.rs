use std::io::{BufRead, BufReader, ErrorKind};
use std::path::Path;

use super::parser::{ColumnLayout, ParsedTable, parse};
use crate::error::ParseError;

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a solver output table from disk.
///
/// The file is read line by line; bytes that are not valid UTF-8 are
/// replaced instead of aborting the load.
pub fn load_table(path: &Path, layout: ColumnLayout) -> Result<ParsedTable, ParseError> {
    let file = std::fs::File::open(path).map_err(|e| io_error(path, e))?;
    let table = read_table(BufReader::new(file), layout).map_err(|e| match e {
        ParseError::Io { source, .. } => io_error(path, source),
        other => other,
    })?;

    if table.discarded > 0 {
        log::warn!(
            "{}: skipped {} malformed lines",
            path.display(),
            table.discarded
        );
    }
    log::info!("Loaded {} points from {}", table.accepted, path.display());
    Ok(table)
}

/// Parse a table from any buffered reader.
pub fn read_table<R: BufRead>(
    mut reader: R,
    layout: ColumnLayout,
) -> Result<ParsedTable, ParseError> {
    let mut lines = Vec::new();
    let mut buf = Vec::new();
    loop {
        buf.clear();
        let n = reader.read_until(b'\n', &mut buf).map_err(|source| ParseError::Io {
            path: Default::default(),
            source,
        })?;
        if n == 0 {
            break;
        }
        lines.push(String::from_utf8_lossy(&buf).into_owned());
    }
    parse(lines, layout)
}

fn io_error(path: &Path, source: std::io::Error) -> ParseError {
    if source.kind() == ErrorKind::NotFound {
        ParseError::FileNotFound {
            path: path.to_path_buf(),
        }
    } else {
        ParseError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

use std::io::BufRead;
use std::path::Path;

use anyhow::Context as _;

use crate::foundation::core::Point;
use crate::foundation::error::TrajviewResult;
use crate::path::dataset::PathDataset;

/// Why a single line was rejected.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LineError {
    /// Nothing left after trimming whitespace and brackets.
    Empty,
    /// Not exactly two comma-separated fields.
    FieldCount(usize),
    /// A field is not a finite decimal number.
    NotANumber(String),
    /// The line is not valid UTF-8.
    Encoding,
}

impl std::fmt::Display for LineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => f.write_str("empty record"),
            Self::FieldCount(n) => write!(f, "expected 2 fields, found {n}"),
            Self::NotANumber(tok) => write!(f, "'{tok}' is not a finite number"),
            Self::Encoding => f.write_str("line is not valid UTF-8"),
        }
    }
}

/// Diagnostic record for a skipped input line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkippedLine {
    /// 1-based line number.
    pub line_no: usize,
    /// Trimmed line text.
    pub text: String,
    /// Rejection reason.
    pub reason: LineError,
}

/// Result of parsing a whole point stream.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParsedPoints {
    /// Points from every well-formed line, in input order.
    pub dataset: PathDataset,
    /// One entry per rejected line, in input order.
    pub skipped: Vec<SkippedLine>,
}

const OPEN_BRACKETS: &[char] = &['(', '['];
const CLOSE_BRACKETS: &[char] = &[')', ']'];

/// Parse one record of the form `(x, y)` or `x, y`.
pub fn parse_line(line: &str) -> Result<Point, LineError> {
    let body = line
        .trim()
        .trim_start_matches(OPEN_BRACKETS)
        .trim_end_matches(CLOSE_BRACKETS)
        .trim();
    if body.is_empty() {
        return Err(LineError::Empty);
    }

    let fields: Vec<&str> = body.split(',').collect();
    let [x, y] = fields.as_slice() else {
        return Err(LineError::FieldCount(fields.len()));
    };
    Ok(Point::new(parse_coord(x)?, parse_coord(y)?))
}

fn parse_coord(tok: &str) -> Result<f64, LineError> {
    let tok = tok.trim();
    match tok.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(LineError::NotANumber(tok.to_string())),
    }
}

/// Parse a point stream, skipping malformed lines.
///
/// Every rejected line, including one that is not valid UTF-8, is logged at `warn` level and
/// recorded in [`ParsedPoints::skipped`]; parsing always continues with the next line. Only a
/// failure to read the stream itself is an error.
pub fn parse_points<R: BufRead>(mut reader: R) -> TrajviewResult<ParsedPoints> {
    let mut out = ParsedPoints::default();
    let mut points = Vec::new();
    let mut buf = Vec::new();
    let mut line_no = 0usize;

    loop {
        buf.clear();
        let read = reader
            .read_until(b'\n', &mut buf)
            .with_context(|| format!("failed to read point stream line {}", line_no + 1))?;
        if read == 0 {
            break;
        }
        line_no += 1;

        let parsed = match std::str::from_utf8(&buf) {
            Ok(line) => parse_line(line).map_err(|reason| (line.trim().to_string(), reason)),
            Err(_) => Err((
                String::from_utf8_lossy(&buf).trim().to_string(),
                LineError::Encoding,
            )),
        };
        match parsed {
            Ok(p) => points.push(p),
            Err((text, reason)) => {
                tracing::warn!(line_no, line = %text, %reason, "skipping invalid line");
                out.skipped.push(SkippedLine {
                    line_no,
                    text,
                    reason,
                });
            }
        }
    }

    out.dataset = PathDataset::new(points);
    Ok(out)
}

/// Parse the point file at `path`.
#[tracing::instrument]
pub fn parse_point_file(path: &Path) -> TrajviewResult<ParsedPoints> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("failed to open point file '{}'", path.display()))?;
    let parsed = parse_points(std::io::BufReader::new(file))?;
    tracing::debug!(
        points = parsed.dataset.len(),
        skipped = parsed.skipped.len(),
        "parsed point file"
    );
    Ok(parsed)
}

#[cfg(test)]
#[path = "../../tests/unit/path/parse.rs"]
mod tests;

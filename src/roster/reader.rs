//! CSV roster ingest.
//!
//! Reading is strict about structure: a ragged row or invalid UTF-8 fails the
//! whole roster with `ParseError`. Column presence and cell contents are
//! checked later, by the simulation.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::table::{Roster, RosterRow};

/// Reads a roster from any CSV source.
///
/// The first record is the header row. Cells are trimmed; blank lines are
/// skipped.
///
/// # Example
///
/// ```
/// use raise_engine::roster::read_csv;
///
/// let roster = read_csv("name,salary,rating\nA,6000000,S\n".as_bytes()).unwrap();
/// assert_eq!(roster.len(), 1);
/// assert_eq!(roster.columns(), ["name", "salary", "rating"]);
/// ```
pub fn read_csv<R: Read>(source: R) -> EngineResult<Roster> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(source);

    let headers = reader.headers()?.clone();
    if headers.iter().all(|h| h.trim().is_empty()) {
        return Err(EngineError::ParseError {
            message: "roster has no header row".to_string(),
        });
    }

    let mut rows = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let record = result?;
        // Quoted cells may span lines, so prefer the reader's own position.
        let line = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(idx + 2);
        rows.push(RosterRow {
            line,
            values: record.iter().map(str::to_string).collect(),
        });
    }

    Ok(Roster::new(headers.iter(), rows))
}

/// Reads a roster from a CSV file on disk.
pub fn read_csv_path<P: AsRef<Path>>(path: P) -> EngineResult<Roster> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| EngineError::ParseError {
        message: format!("failed to open '{}': {}", path.display(), e),
    })?;
    read_csv(file)
}

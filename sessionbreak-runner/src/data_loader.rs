//! CSV bar loading.
//!
//! Expects a header row of `time,open,high,low,close` with timestamps in
//! `YYYY-MM-DD HH:MM:SS` form (seconds optional). The loader parses and
//! fails fast on malformed rows; it deliberately does NOT sort or
//! deduplicate — ordering is the normalizer's responsibility.

use std::io::Read;
use std::path::Path;

use chrono::NaiveDateTime;
use serde::Deserialize;
use thiserror::Error;

use sessionbreak_core::RawBar;

const TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"];

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to open data file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed row at line {line}: {source}")]
    MalformedRow {
        line: u64,
        #[source]
        source: csv::Error,
    },
    #[error("unparsable timestamp '{value}' at line {line}")]
    BadTimestamp { line: u64, value: String },
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    time: String,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
}

/// Load bars from a CSV file.
pub fn load_bars(path: &Path) -> Result<Vec<RawBar>, LoadError> {
    let file = std::fs::File::open(path)?;
    read_bars(file)
}

/// Load bars from any reader (used by tests and stdin piping).
pub fn read_bars<R: Read>(reader: R) -> Result<Vec<RawBar>, LoadError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut bars = Vec::new();
    for result in csv_reader.deserialize() {
        // Header occupies line 1; data rows are one per line.
        let line = bars.len() as u64 + 2;
        let row: CsvRow = result.map_err(|source| LoadError::MalformedRow {
            line: source.position().map(|p| p.line()).unwrap_or(line),
            source,
        })?;
        let timestamp = parse_timestamp(&row.time).ok_or_else(|| LoadError::BadTimestamp {
            line,
            value: row.time.clone(),
        })?;
        bars.push(RawBar {
            timestamp,
            open: row.open,
            high: row.high,
            low: row.low,
            close: row.close,
        });
    }
    Ok(bars)
}

fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
}

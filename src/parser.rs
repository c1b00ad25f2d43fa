//! Delimited-file parser for student score sheets.
//!
//! Each row holds a student name and a score. A leading header row is
//! detected by its non-numeric score cell and skipped. Rows that cannot be
//! turned into a valid record are reported as [`SkippedRow`]s; they never
//! abort the import.

use anyhow::{Context, Result};
use csv::{ByteRecord, ReaderBuilder, StringRecord, Trim};
use serde::Serialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::records::{RecordStore, is_valid_score};

/// Why a row was left out of the record store.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum SkipReason {
    Incomplete { cells: usize },
    EmptyName,
    InvalidScore { value: String },
    OutOfRange { score: f64 },
    InvalidEncoding,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::Incomplete { cells } => write!(f, "incomplete row ({cells} cell(s))"),
            SkipReason::EmptyName => write!(f, "empty name"),
            SkipReason::InvalidScore { value } => write!(f, "invalid score {value:?}"),
            SkipReason::OutOfRange { score } => write!(f, "score {score} out of 0-100 range"),
            SkipReason::InvalidEncoding => write!(f, "row is not valid UTF-8"),
        }
    }
}

/// A diagnostic for a row that was not imported.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedRow {
    pub line: u64,
    pub name: Option<String>,
    #[serde(flatten)]
    pub reason: SkipReason,
}

/// What an import left out of the record store, for reporting.
#[derive(Debug, Default, Clone, Copy, Serialize)]
pub struct ImportNotes<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<&'a str>,
    #[serde(skip_serializing_if = "<[SkippedRow]>::is_empty")]
    pub skipped: &'a [SkippedRow],
}

/// The outcome of importing one score sheet.
#[derive(Debug, Default)]
pub struct ImportOutcome {
    pub store: RecordStore,
    pub skipped: Vec<SkippedRow>,
    /// Text of the first row when it was taken as a header and dropped.
    pub header: Option<String>,
}

impl ImportOutcome {
    pub fn notes(&self) -> ImportNotes<'_> {
        ImportNotes {
            header: self.header.as_deref(),
            skipped: &self.skipped,
        }
    }
}

/// Parses a score sheet at `path` into a record store.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or is not readable as
/// delimited text. Individual bad rows are reported in
/// [`ImportOutcome::skipped`] instead.
#[tracing::instrument(skip(path), fields(path = %path.as_ref().display()))]
pub fn import_csv(path: impl AsRef<Path>) -> Result<ImportOutcome> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let outcome = parse_scores(file).with_context(|| format!("reading {}", path.display()))?;

    info!(
        records = outcome.store.len(),
        skipped = outcome.skipped.len(),
        "Score sheet loaded"
    );
    if outcome.store.is_empty() {
        warn!("Score sheet loaded but contained no valid student data");
    }
    Ok(outcome)
}

/// Parses score rows from any reader.
pub fn parse_scores<R: Read>(reader: R) -> Result<ImportOutcome> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut outcome = ImportOutcome::default();
    let mut first = true;

    for result in rdr.byte_records() {
        let bytes = result?;
        let line = bytes.position().map_or(0, |p| p.line());

        if bytes.iter().all(<[u8]>::is_empty) {
            continue;
        }

        let record = match StringRecord::from_byte_record(bytes) {
            Ok(record) => record,
            Err(e) => {
                let name = lossy_name(&e.into_byte_record());
                warn!(line, name = ?name, "Skipping row with invalid UTF-8");
                outcome.skipped.push(SkippedRow {
                    line,
                    name,
                    reason: SkipReason::InvalidEncoding,
                });
                first = false;
                continue;
            }
        };

        if std::mem::take(&mut first) && is_header(&record) {
            let text = record.iter().collect::<Vec<_>>().join(",");
            debug!(line, header = %text, "Skipping header row");
            outcome.header = Some(text);
            continue;
        }

        match parse_row(&record) {
            Ok((name, score)) => {
                // parse_row has already checked name and range
                outcome.store.insert(name, score)?;
            }
            Err(reason) => {
                let name = record
                    .get(0)
                    .filter(|n| !n.is_empty())
                    .map(str::to_string);
                warn!(line, name = ?name, %reason, "Skipping row");
                outcome.skipped.push(SkippedRow { line, name, reason });
            }
        }
    }

    Ok(outcome)
}

fn lossy_name(record: &ByteRecord) -> Option<String> {
    record
        .get(0)
        .filter(|n| !n.is_empty())
        .map(|n| String::from_utf8_lossy(n).into_owned())
}

fn is_header(record: &StringRecord) -> bool {
    record.len() >= 2 && record[1].parse::<f64>().is_err()
}

fn parse_row(record: &StringRecord) -> std::result::Result<(&str, f64), SkipReason> {
    if record.len() < 2 {
        return Err(SkipReason::Incomplete {
            cells: record.len(),
        });
    }

    let name = &record[0];
    if name.is_empty() {
        return Err(SkipReason::EmptyName);
    }

    let raw = &record[1];
    let score: f64 = raw.parse().map_err(|_| SkipReason::InvalidScore {
        value: raw.to_string(),
    })?;
    if !is_valid_score(score) {
        return Err(SkipReason::OutOfRange { score });
    }

    Ok((name, score))
}

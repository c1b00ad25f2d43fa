use anyhow::Result;
use std::path::PathBuf;

use super::Collector;
use crate::parser::{ImportNotes, SkippedRow, import_csv};
use crate::records::RecordStore;

/// Collects records from a score sheet on disk.
pub struct CsvImport {
    path: PathBuf,
    skipped: Vec<SkippedRow>,
    header: Option<String>,
}

impl CsvImport {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            skipped: Vec::new(),
            header: None,
        }
    }

    /// Rows left out by the most recent [`Collector::collect`] call.
    pub fn skipped(&self) -> &[SkippedRow] {
        &self.skipped
    }

    /// Header and skipped rows from the most recent [`Collector::collect`] call.
    pub fn notes(&self) -> ImportNotes<'_> {
        ImportNotes {
            header: self.header.as_deref(),
            skipped: &self.skipped,
        }
    }
}

impl Collector for CsvImport {
    fn source(&self) -> String {
        self.path.display().to_string()
    }

    fn collect(&mut self) -> Result<RecordStore> {
        let outcome = import_csv(&self.path)?;
        self.skipped = outcome.skipped;
        self.header = outcome.header;
        Ok(outcome.store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_reports_skipped_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("marks.csv");
        std::fs::write(&path, "name,score\nAmy,70\nBob,oops\n").unwrap();

        let mut import = CsvImport::new(&path);
        let store = import.collect().unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(import.skipped().len(), 1);
        assert_eq!(import.notes().header, Some("name,score"));
        assert!(import.source().ends_with("marks.csv"));
    }
}

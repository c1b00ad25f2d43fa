//! Record store collectors.
//!
//! A [`Collector`] gathers and validates raw student input and hands the
//! analysis engines a ready [`RecordStore`].

mod import;
mod manual;
mod prompt;

pub use import::CsvImport;
pub use manual::ManualEntry;
pub use prompt::Prompter;

use anyhow::Result;

use crate::records::RecordStore;

/// A source of validated student records.
pub trait Collector {
    /// Short label used in logs and reports.
    fn source(&self) -> String;

    fn collect(&mut self) -> Result<RecordStore>;
}

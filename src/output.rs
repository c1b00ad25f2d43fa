//! Report rendering and persistence for analysis results.
//!
//! Supports a plain-text console report, JSON serialization, and CSV export
//! of the per-student results table.

use anyhow::{Context, Result};
use chrono::Utc;
use csv::WriterBuilder;
use serde::Serialize;
use std::fmt::Write as _;
use std::path::Path;
use tracing::{debug, info};

use crate::analyzers::grade::Grade;
use crate::analyzers::types::{Analysis, AnalysisReport};
use crate::parser::ImportNotes;
use crate::records::RecordStore;

const BANNER_WIDTH: usize = 40;
const TABLE_RULE: &str = "===============================================";
const TABLE_DIVIDER: &str = "-----------------------------------------------";

/// One row of the per-student results table.
#[derive(Debug, Serialize)]
pub struct ResultRow<'a> {
    pub name: &'a str,
    pub score: f64,
    pub grade: Grade,
    pub passed: bool,
}

/// Rows of the results table, sorted by student name.
///
/// `analysis` must have been computed from `store`; both list students in
/// store order.
pub fn result_rows<'a>(store: &'a RecordStore, analysis: &Analysis) -> Vec<ResultRow<'a>> {
    debug_assert_eq!(store.len(), analysis.grades.len());

    let mut rows: Vec<_> = store
        .iter()
        .zip(analysis.grades.iter())
        .map(|(r, g)| ResultRow {
            name: &r.name,
            score: r.score,
            grade: g.grade,
            passed: g.grade.is_passing(),
        })
        .collect();
    rows.sort_by(|a, b| a.name.cmp(b.name));
    rows
}

/// Renders the full text report: summary, distribution, pass/fail and table.
pub fn render_report(store: &RecordStore, analysis: &Analysis) -> String {
    let mut out = String::new();
    let banner = "=".repeat(BANNER_WIDTH);
    let stats = &analysis.stats;

    let _ = writeln!(out);
    let _ = writeln!(out, "{banner}");
    let _ = writeln!(out, "{:^width$}", "ANALYSIS RESULTS", width = BANNER_WIDTH);
    let _ = writeln!(out, "{banner}");
    let _ = writeln!(out, "Average Marks: {:.2}", stats.average);
    let _ = writeln!(out, "Median Marks: {:.2}", stats.median);
    let _ = writeln!(
        out,
        "Highest Score: {} ({:.2})",
        stats.highest.name, stats.highest.score
    );
    let _ = writeln!(
        out,
        "Lowest Score: {} ({:.2})",
        stats.lowest.name, stats.lowest.score
    );

    let _ = writeln!(out, "\nGrade Distribution:");
    for c in analysis.distribution.iter() {
        let _ = writeln!(out, "Grade {:<2}: {} student(s)", c.grade.label(), c.count);
    }

    let pf = &analysis.pass_fail;
    let _ = writeln!(out, "\nPassed Students: {}", name_list(&pf.passed));
    let _ = writeln!(out, "Failed Students: {}", name_list(&pf.failed));
    let _ = writeln!(
        out,
        "Total Passed: {} | Total Failed: {}",
        pf.passed_count(),
        pf.failed_count()
    );

    out.push_str(&render_table(store, analysis));
    out
}

/// Renders the per-student results table, sorted by name.
pub fn render_table(store: &RecordStore, analysis: &Analysis) -> String {
    let mut out = String::new();
    if store.is_empty() {
        let _ = writeln!(out, "\nNo data to display in the results table.");
        return out;
    }

    let _ = writeln!(out, "\n{TABLE_RULE}");
    let _ = writeln!(out, "{:<15}{:<10}{:<5}", "Name", "Marks", "Grade");
    let _ = writeln!(out, "{TABLE_DIVIDER}");
    for row in result_rows(store, analysis) {
        let marks = format!("{:.2}", row.score);
        let _ = writeln!(
            out,
            "{:<15}{:<10}{:<5}",
            row.name,
            marks,
            row.grade.label()
        );
    }
    let _ = writeln!(out, "{TABLE_RULE}");
    out
}

/// Renders what an import dropped: the header row and each skipped row.
pub fn render_import_notes(notes: &ImportNotes<'_>) -> String {
    let mut out = String::new();
    if let Some(header) = notes.header {
        let _ = writeln!(out, "Skipped first row as a header: {header}");
    }
    for row in notes.skipped {
        let name = row.name.as_deref().unwrap_or("-");
        let _ = writeln!(out, "Skipping line {} ({name}): {}", row.line, row.reason);
    }
    out
}

fn name_list(names: &[String]) -> String {
    if names.is_empty() {
        "(none)".to_string()
    } else {
        names.join(", ")
    }
}

/// Serializes an analysis as pretty-printed JSON with a generation timestamp
/// and any import diagnostics.
pub fn render_json(source: &str, analysis: &Analysis, notes: ImportNotes<'_>) -> Result<String> {
    let report = AnalysisReport {
        generated_at: Utc::now(),
        source,
        analysis,
        notes,
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

/// Writes the results table to a CSV file, replacing any existing file.
pub fn export_results(path: &Path, store: &RecordStore, analysis: &Analysis) -> Result<()> {
    debug!(path = %path.display(), rows = store.len(), "Exporting results");

    let mut writer = WriterBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;

    for row in result_rows(store, analysis) {
        writer.serialize(&row)?;
    }
    writer.flush()?;

    info!(path = %path.display(), "Results exported");
    Ok(())
}

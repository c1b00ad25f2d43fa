//! Result containers produced by one analysis cycle.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::analyzers::grade::Grade;
use crate::parser::ImportNotes;
use crate::stats::ScoreStats;

/// A student's name paired with their derived grade.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradedStudent {
    pub name: String,
    pub grade: Grade,
}

/// One grade per student in the record store, in store order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct GradeAssignment {
    pub(crate) entries: Vec<GradedStudent>,
}

impl GradeAssignment {
    pub fn get(&self, name: &str) -> Option<Grade> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.grade)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GradedStudent> {
        self.entries.iter()
    }
}

/// Number of students holding a grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GradeCount {
    pub grade: Grade,
    pub count: usize,
}

/// Grade frequencies in display order. Only grades that occur are present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct GradeDistribution {
    pub(crate) counts: Vec<GradeCount>,
}

impl GradeDistribution {
    pub fn count(&self, grade: Grade) -> usize {
        self.counts
            .iter()
            .find(|c| c.grade == grade)
            .map_or(0, |c| c.count)
    }

    pub fn total(&self) -> usize {
        self.counts.iter().map(|c| c.count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GradeCount> {
        self.counts.iter()
    }
}

/// Students split by the pass mark, each list in store order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PassFail {
    pub passed: Vec<String>,
    pub failed: Vec<String>,
}

impl PassFail {
    pub fn passed_count(&self) -> usize {
        self.passed.len()
    }

    pub fn failed_count(&self) -> usize {
        self.failed.len()
    }
}

/// Everything computed for one record store.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    pub stats: ScoreStats,
    pub grades: GradeAssignment,
    pub distribution: GradeDistribution,
    pub pass_fail: PassFail,
}

/// JSON envelope for an [`Analysis`].
#[derive(Serialize)]
pub struct AnalysisReport<'a> {
    pub(crate) generated_at: DateTime<Utc>,
    pub(crate) source: &'a str,
    #[serde(flatten)]
    pub(crate) analysis: &'a Analysis,
    #[serde(flatten)]
    pub(crate) notes: ImportNotes<'a>,
}

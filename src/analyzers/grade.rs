use serde::{Serialize, Serializer};

use crate::analyzers::types::{GradeAssignment, GradedStudent};
use crate::records::RecordStore;

/// Minimum score that counts as a pass. Also the lower bound of grade C.
pub const PASS_MARK: f64 = 40.0;

/// Letter grade derived from a percentage score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Grade {
    APlus,
    A,
    BPlus,
    B,
    CPlus,
    C,
    DPlus,
    F,
}

impl Grade {
    /// All grades, best first.
    pub const ALL: [Grade; 8] = [
        Grade::APlus,
        Grade::A,
        Grade::BPlus,
        Grade::B,
        Grade::CPlus,
        Grade::C,
        Grade::DPlus,
        Grade::F,
    ];

    /// Converts a score in `[0, 100]` into a letter grade.
    ///
    /// | Range            | Grade |
    /// |------------------|-------|
    /// | 90 <= s <= 100   | A+    |
    /// | 80 <= s < 90     | A     |
    /// | 70 <= s < 80     | B+    |
    /// | 60 <= s < 70     | B     |
    /// | 50 <= s < 60     | C+    |
    /// | 40 <= s < 50     | C     |
    /// | 33 <= s < 40     | D+    |
    /// | s < 33           | F     |
    ///
    /// Scores outside `[0, 100]` are rejected before they reach this point.
    pub fn from_score(s: f64) -> Self {
        match s {
            s if s >= 90.0 => Grade::APlus,
            s if s >= 80.0 => Grade::A,
            s if s >= 70.0 => Grade::BPlus,
            s if s >= 60.0 => Grade::B,
            s if s >= 50.0 => Grade::CPlus,
            s if s >= PASS_MARK => Grade::C,
            s if s >= 33.0 => Grade::DPlus,
            _ => Grade::F,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::BPlus => "B+",
            Grade::B => "B",
            Grade::CPlus => "C+",
            Grade::C => "C",
            Grade::DPlus => "D+",
            Grade::F => "F",
        }
    }

    pub fn is_passing(&self) -> bool {
        !matches!(self, Grade::DPlus | Grade::F)
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Grade {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// Grades every student in the store.
pub fn assign_grades(store: &RecordStore) -> GradeAssignment {
    GradeAssignment {
        entries: store
            .iter()
            .map(|r| GradedStudent {
                name: r.name.clone(),
                grade: Grade::from_score(r.score),
            })
            .collect(),
    }
}

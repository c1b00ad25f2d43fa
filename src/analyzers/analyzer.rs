use tracing::{debug, info};

use crate::analyzers::aggregate::{grade_distribution, pass_fail};
use crate::analyzers::grade::assign_grades;
use crate::analyzers::types::Analysis;
use crate::records::RecordStore;
use crate::stats::ScoreStats;

/// Runs every engine over one record store.
pub fn analyze(store: &RecordStore) -> Analysis {
    let stats = ScoreStats::from_store(store);
    let grades = assign_grades(store);
    let distribution = grade_distribution(&grades);
    let pass_fail = pass_fail(store);

    debug_assert_eq!(grades.len(), store.len());
    debug_assert_eq!(distribution.total(), store.len());
    debug_assert_eq!(
        pass_fail.passed_count() + pass_fail.failed_count(),
        store.len()
    );

    debug!(?distribution, "Grade distribution computed");
    info!(
        students = stats.count,
        average = stats.average,
        median = stats.median,
        passed = pass_fail.passed_count(),
        failed = pass_fail.failed_count(),
        "Analysis complete"
    );

    Analysis {
        stats,
        grades,
        distribution,
        pass_fail,
    }
}

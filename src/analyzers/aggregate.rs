use std::cmp::Ordering;
use std::collections::HashMap;

use crate::analyzers::grade::{Grade, PASS_MARK};
use crate::analyzers::types::{GradeAssignment, GradeCount, GradeDistribution, PassFail};
use crate::records::RecordStore;

/// Display ordering for grade labels: reverse lexicographic on the label text.
///
/// This yields `F, D+, C+, C, B+, B, A+, A`. It is a presentation order, not
/// a ranking of grade quality.
pub fn display_order(a: &Grade, b: &Grade) -> Ordering {
    b.label().cmp(a.label())
}

/// Counts how many students hold each grade.
///
/// Grades nobody holds are omitted. The result is sorted with [`display_order`].
pub fn grade_distribution(assignment: &GradeAssignment) -> GradeDistribution {
    let tally = assignment
        .iter()
        .fold(HashMap::<Grade, usize>::new(), |mut acc, g| {
            *acc.entry(g.grade).or_default() += 1;
            acc
        });

    let mut counts: Vec<GradeCount> = tally
        .into_iter()
        .map(|(grade, count)| GradeCount { grade, count })
        .collect();
    counts.sort_by(|a, b| display_order(&a.grade, &b.grade));

    GradeDistribution { counts }
}

/// Splits students into those at or above [`PASS_MARK`] and those below it.
pub fn pass_fail(store: &RecordStore) -> PassFail {
    let (passed, failed): (Vec<_>, Vec<_>) = store.iter().partition(|r| r.score >= PASS_MARK);

    PassFail {
        passed: passed.into_iter().map(|r| r.name.clone()).collect(),
        failed: failed.into_iter().map(|r| r.name.clone()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::grade::assign_grades;

    fn store(entries: &[(&str, f64)]) -> RecordStore {
        let mut s = RecordStore::new();
        for (name, score) in entries {
            s.insert(name, *score).unwrap();
        }
        s
    }

    #[test]
    fn test_display_order_is_reverse_label() {
        let mut grades = Grade::ALL.to_vec();
        grades.sort_by(display_order);
        let labels: Vec<_> = grades.iter().map(Grade::label).collect();
        assert_eq!(labels, vec!["F", "D+", "C+", "C", "B+", "B", "A+", "A"]);
    }

    #[test]
    fn test_distribution_counts() {
        let s = store(&[
            ("a", 95.0),
            ("b", 91.0),
            ("c", 85.0),
            ("d", 10.0),
            ("e", 45.0),
        ]);
        let dist = grade_distribution(&assign_grades(&s));

        assert_eq!(dist.count(Grade::APlus), 2);
        assert_eq!(dist.count(Grade::A), 1);
        assert_eq!(dist.count(Grade::C), 1);
        assert_eq!(dist.count(Grade::F), 1);
        assert_eq!(dist.count(Grade::B), 0);
        assert_eq!(dist.total(), s.len());

        let order: Vec<_> = dist.iter().map(|c| c.grade).collect();
        assert_eq!(order, vec![Grade::F, Grade::C, Grade::APlus, Grade::A]);
    }

    #[test]
    fn test_distribution_empty() {
        assert!(grade_distribution(&GradeAssignment::default()).is_empty());
    }

    #[test]
    fn test_pass_fail_boundary() {
        let pf = pass_fail(&store(&[("A", 40.0), ("B", 39.999)]));
        assert_eq!(pf.passed, vec!["A"]);
        assert_eq!(pf.failed, vec!["B"]);
    }

    #[test]
    fn test_pass_fail_partitions_in_store_order() {
        let s = store(&[("d", 12.0), ("a", 99.0), ("c", 40.0), ("b", 0.0)]);
        let pf = pass_fail(&s);

        assert_eq!(pf.passed, vec!["a", "c"]);
        assert_eq!(pf.failed, vec!["d", "b"]);
        assert_eq!(pf.passed_count() + pf.failed_count(), s.len());
        assert!(pf.passed.iter().all(|n| !pf.failed.contains(n)));
    }

    fn sample_stores() -> Vec<RecordStore> {
        vec![
            RecordStore::new(),
            store(&[("solo", 47.5)]),
            store(&[("a", 60.0), ("b", 60.0), ("c", 60.0)]),
            store(&[("a", 39.99), ("b", 39.99)]),
            store(&[("a", 33.3), ("b", 99.9), ("c", 0.0), ("d", 71.25), ("e", 40.0)]),
            store(&[
                ("a", 100.0),
                ("b", 85.0),
                ("c", 75.0),
                ("d", 65.0),
                ("e", 55.0),
                ("f", 45.0),
                ("g", 35.0),
                ("h", 5.0),
            ]),
        ]
    }

    #[test]
    fn test_distribution_total_matches_store() {
        for s in sample_stores() {
            let dist = grade_distribution(&assign_grades(&s));
            assert_eq!(dist.total(), s.len());
            assert!(dist.iter().all(|c| c.count > 0));
        }
    }

    #[test]
    fn test_all_equal_scores_share_one_grade() {
        let s = store(&[("a", 60.0), ("b", 60.0), ("c", 60.0)]);
        let dist = grade_distribution(&assign_grades(&s));

        assert_eq!(dist.iter().count(), 1);
        assert_eq!(dist.count(Grade::B), 3);
    }

    #[test]
    fn test_pass_fail_partitions_every_store() {
        for s in sample_stores() {
            let pf = pass_fail(&s);
            assert_eq!(pf.passed_count() + pf.failed_count(), s.len());
            for r in s.iter() {
                let in_passed = pf.passed.contains(&r.name);
                let in_failed = pf.failed.contains(&r.name);
                assert!(in_passed != in_failed, "{} in both or neither", r.name);
                assert_eq!(in_passed, r.score >= PASS_MARK);
            }
        }
    }

    #[test]
    fn test_pass_fail_empty() {
        let pf = pass_fail(&RecordStore::new());
        assert_eq!(pf, PassFail::default());
    }
}

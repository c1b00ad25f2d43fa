use serde::Serialize;

use crate::records::{RecordStore, StudentRecord};

/// Placeholder name reported by [`max_holder`] and [`min_holder`] for an empty store.
pub const NO_HOLDER: &str = "N/A";

/// The student holding an extreme score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreHolder {
    pub name: String,
    pub score: f64,
}

impl ScoreHolder {
    fn none() -> Self {
        ScoreHolder {
            name: NO_HOLDER.to_string(),
            score: 0.0,
        }
    }
}

/// Summary statistics for one record store.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreStats {
    pub count: usize,
    pub average: f64,
    pub median: f64,
    pub highest: ScoreHolder,
    pub lowest: ScoreHolder,
}

impl ScoreStats {
    pub fn from_store(store: &RecordStore) -> Self {
        ScoreStats {
            count: store.len(),
            average: average(store),
            median: median(store),
            highest: max_holder(store),
            lowest: min_holder(store),
        }
    }
}

/// Rounds to two decimal places, halves away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Arithmetic mean of all scores rounded with [`round2`]. Returns 0.0 for an empty store.
pub fn average(store: &RecordStore) -> f64 {
    if store.is_empty() {
        return 0.0;
    }
    round2(store.scores().sum::<f64>() / store.len() as f64)
}

/// Median of all scores rounded with [`round2`]. Even counts average the two middle values.
pub fn median(store: &RecordStore) -> f64 {
    let mut scores: Vec<f64> = store.scores().collect();
    if scores.is_empty() {
        return 0.0;
    }
    scores.sort_by(f64::total_cmp);

    let mid = scores.len() / 2;
    let value = if scores.len() % 2 == 0 {
        (scores[mid - 1] + scores[mid]) / 2.0
    } else {
        scores[mid]
    };
    round2(value)
}

/// Student with the greatest score. The earliest inserted wins ties.
pub fn max_holder(store: &RecordStore) -> ScoreHolder {
    extreme_holder(store, |candidate, best| candidate > best)
}

/// Student with the least score. The earliest inserted wins ties.
pub fn min_holder(store: &RecordStore) -> ScoreHolder {
    extreme_holder(store, |candidate, best| candidate < best)
}

fn extreme_holder(store: &RecordStore, beats: impl Fn(f64, f64) -> bool) -> ScoreHolder {
    store
        .iter()
        .fold(None, |best: Option<&StudentRecord>, r| match best {
            Some(b) if !beats(r.score, b.score) => Some(b),
            _ => Some(r),
        })
        .map_or_else(ScoreHolder::none, |r| ScoreHolder {
            name: r.name.clone(),
            score: r.score,
        })
}

//! The record store: one analysis cycle's name → score mapping.

use anyhow::{Result, bail};
use std::collections::HashMap;

/// Lowest accepted score.
pub const MIN_SCORE: f64 = 0.0;
/// Highest accepted score.
pub const MAX_SCORE: f64 = 100.0;

/// A single student and their percentage score.
#[derive(Debug, Clone, PartialEq)]
pub struct StudentRecord {
    pub name: String,
    pub score: f64,
}

/// Insertion-ordered mapping from unique student name to score.
///
/// Inserting a name that is already present replaces its score but keeps
/// the position of the first insertion.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Vec<StudentRecord>,
    index: HashMap<String, usize>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates and inserts a record.
    ///
    /// # Errors
    ///
    /// Returns an error if the trimmed name is empty or the score is not a
    /// finite number within `[0, 100]`.
    pub fn insert(&mut self, name: &str, score: f64) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            bail!("student name cannot be empty");
        }
        if !is_valid_score(score) {
            bail!("score {score} for {name} is outside {MIN_SCORE}-{MAX_SCORE}");
        }

        match self.index.get(name) {
            Some(&pos) => self.records[pos].score = score,
            None => {
                self.index.insert(name.to_string(), self.records.len());
                self.records.push(StudentRecord {
                    name: name.to_string(),
                    score,
                });
            }
        }
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.index.get(name).map(|&pos| self.records[pos].score)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterates records in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &StudentRecord> {
        self.records.iter()
    }

    pub fn scores(&self) -> impl Iterator<Item = f64> + '_ {
        self.records.iter().map(|r| r.score)
    }
}

/// Returns `true` for finite scores within `[0, 100]`.
pub fn is_valid_score(score: f64) -> bool {
    score.is_finite() && (MIN_SCORE..=MAX_SCORE).contains(&score)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_keeps_insertion_order() {
        let mut store = RecordStore::new();
        store.insert("Zed", 10.0).unwrap();
        store.insert("Amy", 20.0).unwrap();

        let names: Vec<_> = store.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Zed", "Amy"]);
    }

    #[test]
    fn test_duplicate_overwrites_in_place() {
        let mut store = RecordStore::new();
        store.insert("Amy", 20.0).unwrap();
        store.insert("Bob", 30.0).unwrap();
        store.insert("Amy", 95.0).unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(store.get("Amy"), Some(95.0));
        assert_eq!(store.iter().next().unwrap().name, "Amy");
    }

    #[test]
    fn test_insert_trims_name() {
        let mut store = RecordStore::new();
        store.insert("  Amy ", 50.0).unwrap();
        assert_eq!(store.get("Amy"), Some(50.0));
    }

    #[test]
    fn test_insert_rejects_bad_input() {
        let mut store = RecordStore::new();
        assert!(store.insert("   ", 50.0).is_err());
        assert!(store.insert("Amy", -0.1).is_err());
        assert!(store.insert("Amy", 100.01).is_err());
        assert!(store.insert("Amy", f64::NAN).is_err());
        assert!(store.is_empty());
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let mut store = RecordStore::new();
        store.insert("Low", 0.0).unwrap();
        store.insert("High", 100.0).unwrap();
        assert_eq!(store.len(), 2);
    }
}

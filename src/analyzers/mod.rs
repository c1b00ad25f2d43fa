//! Score analysis and grading.
//!
//! This module assigns letter grades, counts the grade distribution, splits
//! students by the pass mark and bundles the results with the summary
//! statistics from [`crate::stats`].

pub mod aggregate;
pub mod analyzer;
pub mod grade;
pub mod types;

use anyhow::Result;
use std::io::{BufRead, Write};
use tracing::debug;

use super::Collector;
use super::prompt::Prompter;
use crate::records::{MAX_SCORE, MIN_SCORE, RecordStore, is_valid_score};

/// Collects records by asking for each student's name and score.
///
/// Invalid answers are re-asked rather than rejected, so the resulting
/// store is always well formed.
pub struct ManualEntry<'a, R, W> {
    prompter: &'a mut Prompter<R, W>,
}

impl<'a, R: BufRead, W: Write> ManualEntry<'a, R, W> {
    pub fn new(prompter: &'a mut Prompter<R, W>) -> Self {
        Self { prompter }
    }

    fn ask_count(&mut self) -> Result<usize> {
        loop {
            let answer = self.prompter.ask("Enter number of students: ")?;
            match answer.parse::<i64>() {
                Ok(n) if n < 0 => self
                    .prompter
                    .say("Number of students cannot be negative. Try again.")?,
                Ok(n) => return Ok(n as usize),
                Err(_) => self
                    .prompter
                    .say("Invalid input. Please enter a whole number.")?,
            }
        }
    }

    fn ask_name(&mut self) -> Result<String> {
        let mut name = self.prompter.ask("Enter student name: ")?;
        while name.is_empty() {
            name = self
                .prompter
                .ask("Student name cannot be empty. Enter student name: ")?;
        }
        Ok(name)
    }

    fn ask_score(&mut self, name: &str) -> Result<f64> {
        loop {
            let answer = self.prompter.ask(&format!("Enter marks for {name}: "))?;
            match answer.parse::<f64>() {
                Ok(score) if is_valid_score(score) => return Ok(score),
                Ok(_) => self.prompter.say(&format!(
                    "Marks must be between {MIN_SCORE} and {MAX_SCORE}."
                ))?,
                Err(_) => self
                    .prompter
                    .say("Invalid input. Please enter a number for marks.")?,
            }
        }
    }
}

impl<R: BufRead, W: Write> Collector for ManualEntry<'_, R, W> {
    fn source(&self) -> String {
        "manual entry".to_string()
    }

    fn collect(&mut self) -> Result<RecordStore> {
        let count = self.ask_count()?;
        let mut store = RecordStore::new();

        for _ in 0..count {
            let name = self.ask_name()?;
            let score = self.ask_score(&name)?;
            debug!(name = %name, score, "Record entered");
            store.insert(&name, score)?;
        }

        Ok(store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run(input: &str) -> (Result<RecordStore>, String) {
        let mut prompter = Prompter::new(Cursor::new(input.to_string()), Vec::new());
        let result = ManualEntry::new(&mut prompter).collect();
        let output = String::from_utf8(prompter.into_output()).unwrap();
        (result, output)
    }

    #[test]
    fn test_collects_students() {
        let (store, _) = run("2\nAmy\n88\nBob\n39.5\n");
        let store = store.unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(store.get("Bob"), Some(39.5));
    }

    #[test]
    fn test_reprompts_on_bad_input() {
        let (store, output) = run("-1\nthree\n1\n\n  \nAmy\n150\nabc\n75\n");
        let store = store.unwrap();

        assert_eq!(store.get("Amy"), Some(75.0));
        assert!(output.contains("cannot be negative"));
        assert!(output.contains("whole number"));
        assert!(output.contains("Student name cannot be empty"));
        assert!(output.contains("between 0 and 100"));
        assert!(output.contains("number for marks"));
    }

    #[test]
    fn test_zero_students() {
        let (store, _) = run("0\n");
        assert!(store.unwrap().is_empty());
    }

    #[test]
    fn test_closed_input_is_an_error() {
        let (store, _) = run("2\nAmy\n");
        assert!(store.is_err());
    }
}

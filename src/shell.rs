//! Interactive menu loop: collect a dataset, analyze it, report, repeat.

use anyhow::Result;
use std::io::{self, BufRead, Write};
use tracing::{error, info, instrument};

use crate::analyzers::analyzer::analyze;
use crate::collect::{Collector, CsvImport, ManualEntry, Prompter};
use crate::output::{render_import_notes, render_report};
use crate::records::RecordStore;

const MENU_WIDTH: usize = 60;

/// A top-level menu selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Manual,
    Import,
    Exit,
}

impl MenuChoice {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(MenuChoice::Manual),
            "2" => Some(MenuChoice::Import),
            "3" => Some(MenuChoice::Exit),
            _ => None,
        }
    }
}

fn print_welcome<R: BufRead, W: Write>(prompter: &mut Prompter<R, W>) -> Result<()> {
    let rule = "=".repeat(MENU_WIDTH);
    prompter.say(&rule)?;
    prompter.say("Welcome to the GradeBook Analyzer")?;
    prompter.say(&rule)?;
    prompter.say("Choose an option to start:")?;
    prompter.say("1. Manual Entry of Student Data")?;
    prompter.say("2. Import from CSV File")?;
    prompter.say("3. Exit")?;
    prompter.say(&rule)
}

/// Runs one CSV import from the menu. Failures are reported to the user and
/// yield an empty store so the menu can continue.
fn import_from_menu<R: BufRead, W: Write>(prompter: &mut Prompter<R, W>) -> Result<RecordStore> {
    let path = prompter.ask("Enter CSV file path (e.g., data.csv): ")?;
    let mut import = CsvImport::new(path);

    match import.collect() {
        Ok(store) => {
            write!(prompter.output(), "{}", render_import_notes(&import.notes()))?;
            prompter.say("CSV file loaded successfully!")?;
            if store.is_empty() {
                prompter.say("The file was loaded, but no valid student data was found.")?;
            }
            Ok(store)
        }
        Err(e) => {
            error!(error = %e, "Score sheet import failed");
            let not_found = e
                .chain()
                .filter_map(|c| c.downcast_ref::<io::Error>())
                .any(|io| io.kind() == io::ErrorKind::NotFound);
            if not_found {
                prompter.say("File not found. Please check the path and try again.")?;
            } else {
                prompter.say(&format!("An error occurred during file processing: {e:#}"))?;
            }
            Ok(RecordStore::new())
        }
    }
}

/// Drives the menu until the user exits or declines another dataset.
///
/// # Errors
///
/// Returns an error if the input closes or the output cannot be written.
#[instrument(skip_all)]
pub fn run_interactive<R: BufRead, W: Write>(prompter: &mut Prompter<R, W>) -> Result<()> {
    loop {
        print_welcome(prompter)?;
        let answer = prompter.ask("Enter your choice (1-3): ")?;

        let store = match MenuChoice::parse(&answer) {
            Some(MenuChoice::Manual) => ManualEntry::new(prompter).collect()?,
            Some(MenuChoice::Import) => import_from_menu(prompter)?,
            Some(MenuChoice::Exit) => {
                prompter.say("Exiting GradeBook Analyzer. Goodbye!")?;
                break;
            }
            None => {
                prompter.say("Invalid choice! Please try again.")?;
                continue;
            }
        };

        if store.is_empty() {
            prompter.say("No valid student data was entered or imported for analysis.")?;
            continue;
        }

        let analysis = analyze(&store);
        write!(prompter.output(), "{}", render_report(&store, &analysis))?;

        let again = prompter.ask("\nWould you like to analyze another dataset? (y/n): ")?;
        if !again.eq_ignore_ascii_case("y") {
            prompter.say("Analysis complete. Thank you for using GradeBook Analyzer!")?;
            break;
        }
    }

    info!("Interactive session finished");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn session(input: &str) -> (Result<()>, String) {
        let mut prompter = Prompter::new(Cursor::new(input.to_string()), Vec::new());
        let result = run_interactive(&mut prompter);
        (result, String::from_utf8(prompter.into_output()).unwrap())
    }

    #[test]
    fn test_menu_choice_parse() {
        assert_eq!(MenuChoice::parse(" 1 "), Some(MenuChoice::Manual));
        assert_eq!(MenuChoice::parse("2"), Some(MenuChoice::Import));
        assert_eq!(MenuChoice::parse("3"), Some(MenuChoice::Exit));
        assert_eq!(MenuChoice::parse("4"), None);
    }

    #[test]
    fn test_exit_immediately() {
        let (result, output) = session("3\n");
        result.unwrap();
        assert!(output.contains("Goodbye"));
    }

    #[test]
    fn test_manual_cycle_then_stop() {
        let (result, output) = session("1\n2\nAmy\n90\nBob\n20\nn\n");
        result.unwrap();

        assert!(output.contains("ANALYSIS RESULTS"));
        assert!(output.contains("Highest Score: Amy (90.00)"));
        assert!(output.contains("Total Passed: 1 | Total Failed: 1"));
        assert!(output.contains("Thank you for using GradeBook Analyzer"));
    }

    #[test]
    fn test_invalid_choice_and_empty_dataset_return_to_menu() {
        let (result, output) = session("9\n1\n0\n3\n");
        result.unwrap();

        assert!(output.contains("Invalid choice"));
        assert!(output.contains("No valid student data"));
        assert!(output.contains("Goodbye"));
    }

    #[test]
    fn test_missing_file_returns_to_menu() {
        let (result, output) = session("2\n/no/such/scores.csv\n3\n");
        result.unwrap();
        assert!(output.contains("File not found"));
    }

    #[test]
    fn test_import_cycle_and_repeat() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scores.csv");
        std::fs::write(&path, "name,score\nAmy,55\nBob,x\n").unwrap();

        let input = format!("2\n{}\ny\n3\n", path.display());
        let (result, output) = session(&input);
        result.unwrap();

        assert!(output.contains("Skipped first row as a header: name,score"));
        assert!(output.contains("Skipping line 3 (Bob)"));
        assert!(output.contains("CSV file loaded successfully!"));
        assert!(output.contains("Grade C+: 1 student(s)"));
        assert!(output.contains("Goodbye"));
    }

    #[test]
    fn test_closed_input_errors() {
        let (result, _) = session("");
        assert!(result.is_err());
    }
}

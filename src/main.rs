//! CLI entry point for the GradeBook Analyzer.
//!
//! Runs the interactive menu by default, or analyzes a single dataset from a
//! score sheet or manual entry and prints a text or JSON report.

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use gradebook_analyzer::{
    analyzers::analyzer::analyze,
    collect::{Collector, CsvImport, ManualEntry, Prompter},
    config::LogConfig,
    output::{export_results, render_import_notes, render_json, render_report},
    parser::ImportNotes,
    records::RecordStore,
    shell::run_interactive,
};
use std::io::Write;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "gradebook")]
#[command(about = "Analyze student scores: statistics, grades and pass/fail", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the interactive menu (default)
    Interactive,
    /// Analyze a score sheet with `name,score` rows
    Import {
        /// Path to the score sheet
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Report format
        #[arg(short, long, value_enum, default_value_t = Format::Text, env = "GRADEBOOK_FORMAT")]
        format: Format,

        /// Optional: write the per-student results table to this CSV file
        #[arg(short, long)]
        export: Option<PathBuf>,
    },
    /// Enter scores at the prompt and analyze them once
    Manual {
        /// Report format
        #[arg(short, long, value_enum, default_value_t = Format::Text, env = "GRADEBOOK_FORMAT")]
        format: Format,

        /// Optional: write the per-student results table to this CSV file
        #[arg(short, long)]
        export: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    let _log_guard = init_logging(&LogConfig::from_env())?;

    let cli = Cli::parse();
    let stdin = std::io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), std::io::stdout());

    match cli.command.unwrap_or(Commands::Interactive) {
        Commands::Interactive => run_interactive(&mut prompter)?,
        Commands::Import {
            file,
            format,
            export,
        } => {
            let mut import = CsvImport::new(file);
            let store = import.collect()?;
            for row in import.skipped() {
                warn!(line = row.line, reason = %row.reason, "Row skipped");
            }
            let notes = import.notes();
            report(&mut prompter, &import.source(), &store, notes, format, export)?;
        }
        Commands::Manual { format, export } => {
            let mut entry = ManualEntry::new(&mut prompter);
            let source = entry.source();
            let store = entry.collect()?;
            report(
                &mut prompter,
                &source,
                &store,
                ImportNotes::default(),
                format,
                export,
            )?;
        }
    }

    Ok(())
}

/// Colored stderr for humans plus a daily-rolling JSON log file.
fn init_logging(config: &LogConfig) -> Result<WorkerGuard> {
    let file_appender =
        tracing_appender::rolling::daily(&config.log_dir, &config.log_file_name);
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(
            EnvFilter::from_env("RUST_LOG").add_directive(config.stderr_default.parse()?),
        );

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(
            EnvFilter::from_env("RUST_LOG_JSON").add_directive(config.file_default.parse()?),
        );

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    Ok(guard)
}

/// Prints the analysis of one dataset and optionally exports the results table.
#[tracing::instrument(
    skip(prompter, store, notes, format, export),
    fields(students = store.len())
)]
fn report<R: std::io::BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    source: &str,
    store: &RecordStore,
    notes: ImportNotes<'_>,
    format: Format,
    export: Option<PathBuf>,
) -> Result<()> {
    if store.is_empty() {
        warn!("No valid student data to analyze");
    }

    let analysis = analyze(store);
    match format {
        Format::Text => write!(
            prompter.output(),
            "{}{}",
            render_import_notes(&notes),
            render_report(store, &analysis)
        )?,
        Format::Json => prompter.say(&render_json(source, &analysis, notes)?)?,
    }

    if let Some(path) = export {
        export_results(&path, store, &analysis)?;
        info!(path = %path.display(), "Results table exported");
    }

    Ok(())
}

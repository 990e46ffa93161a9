use crate::config::Config;
use crate::constants::{CONVERSION_RESULTS_FILE, WORD_COUNT_RESULTS_FILE};
use crate::diagnostics::Diagnostics;
use crate::logging;
use crate::pipeline::{compute_statistics, convert_numbers, count_words};
use crate::report::{publish, ReportSink};
use anyhow::Context;
use clap::Args;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;

/// Input files shared by every utility.
#[derive(Args, Debug, Clone)]
pub struct InputFiles {
    /// Text files to process, in order
    #[arg(required = true, value_name = "FILE")]
    pub files: Vec<PathBuf>,
}

/// How a utility run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Completed,
    Failed,
}

impl From<RunStatus> for ExitCode {
    fn from(status: RunStatus) -> Self {
        match status {
            RunStatus::Completed => ExitCode::SUCCESS,
            RunStatus::Failed => ExitCode::FAILURE,
        }
    }
}

/// Load `.env` and the config file, then install logging.
/// Keep the returned guard alive until the process exits.
pub fn bootstrap() -> anyhow::Result<Option<WorkerGuard>> {
    dotenv::dotenv().ok();
    let config = Config::load().context("Failed to load configuration")?;
    Ok(logging::init_logging(&config.logging))
}

/// Number-base converter. Any unreadable file fails the run and nothing is
/// written.
pub fn run_converter(files: &[PathBuf], sink: &dyn ReportSink) -> RunStatus {
    let mut diagnostics = Diagnostics::new();
    let result = convert_numbers(files, &mut diagnostics);
    diagnostics.flush_to_stdout();

    match result {
        Ok(run) => {
            if publish(&run.render(), sink) {
                println!(
                    "Conversion complete. Results saved to {}",
                    CONVERSION_RESULTS_FILE
                );
            }
            RunStatus::Completed
        }
        Err(e) => {
            error!("Conversion aborted: {}", e);
            println!("Conversion process failed due to file errors.");
            RunStatus::Failed
        }
    }
}

/// Word-frequency counter. Unreadable files are listed in the report.
pub fn run_word_count(files: &[PathBuf], sink: &dyn ReportSink) -> RunStatus {
    let mut diagnostics = Diagnostics::new();
    let run = count_words(files, &mut diagnostics);
    diagnostics.flush_to_stdout();

    if publish(&run.render(), sink) {
        println!(
            "Word count complete. Results saved to {}",
            WORD_COUNT_RESULTS_FILE
        );
    }
    RunStatus::Completed
}

/// Descriptive statistics. Files that do not qualify are left out.
pub fn run_statistics(files: &[PathBuf], sink: &dyn ReportSink) -> RunStatus {
    let mut diagnostics = Diagnostics::new();
    let run = compute_statistics(files, &mut diagnostics);
    diagnostics.flush_to_stdout();

    publish(&run.render(), sink);
    info!("Statistics table has {} column(s)", run.files.len());
    RunStatus::Completed
}

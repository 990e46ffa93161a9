use clap::Parser;
use std::process::ExitCode;
use text_reports::app::{self, InputFiles};
use text_reports::report::FileSink;

/// Compute descriptive statistics for numeric text files
#[derive(Parser, Debug)]
#[command(name = "compute-statistics", version, about = "Compute descriptive statistics for numeric text files")]
struct Cli {
    #[command(flatten)]
    input: InputFiles,
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let _guard = app::bootstrap()?;
    Ok(app::run_statistics(&cli.input.files, &FileSink::current_dir()).into())
}

use clap::{Parser, Subcommand};
use std::process::ExitCode;
use text_reports::app::{self, InputFiles};
use text_reports::report::FileSink;

#[derive(Parser)]
#[command(name = "text_reports")]
#[command(about = "Batch text-report utilities")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert integers to binary and hexadecimal (ConvertionResults.txt)
    Convert(InputFiles),
    /// Count word frequencies across files (WordCountResults.txt)
    WordCount(InputFiles),
    /// Mean, median, mode, variance and standard deviation per file (StatisticsResults.txt)
    Statistics(InputFiles),
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let _guard = app::bootstrap()?;
    let sink = FileSink::current_dir();

    let status = match cli.command {
        Commands::Convert(input) => app::run_converter(&input.files, &sink),
        Commands::WordCount(input) => app::run_word_count(&input.files, &sink),
        Commands::Statistics(input) => app::run_statistics(&input.files, &sink),
    };
    Ok(status.into())
}

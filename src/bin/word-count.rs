use clap::Parser;
use std::process::ExitCode;
use text_reports::app::{self, InputFiles};
use text_reports::report::FileSink;

/// Count word frequencies across text files
#[derive(Parser, Debug)]
#[command(name = "word-count", version, about = "Count word frequencies across text files")]
struct Cli {
    #[command(flatten)]
    input: InputFiles,
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let _guard = app::bootstrap()?;
    Ok(app::run_word_count(&cli.input.files, &FileSink::current_dir()).into())
}

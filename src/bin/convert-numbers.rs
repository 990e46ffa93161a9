use clap::Parser;
use std::process::ExitCode;
use text_reports::app::{self, InputFiles};
use text_reports::report::FileSink;

/// Convert integers from text files to binary and hexadecimal
#[derive(Parser, Debug)]
#[command(name = "convert-numbers", version, about = "Convert integers from text files to binary and hexadecimal")]
struct Cli {
    #[command(flatten)]
    input: InputFiles,
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let _guard = app::bootstrap()?;
    Ok(app::run_converter(&cli.input.files, &FileSink::current_dir()).into())
}

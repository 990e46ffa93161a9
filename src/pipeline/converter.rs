use crate::constants::{
    BINARY_WIDTH, CONVERSION_RESULTS_FILE, CONVERTER_PIPELINE, CONVERTER_SEPARATOR_WIDTH,
    DECIMAL_WIDTH, HEX_WIDTH, ITEM_WIDTH,
};
use crate::diagnostics::Diagnostics;
use crate::error::{ReportError, Result};
use crate::input::{for_each_line, parse_integer, ParsedInteger};
use crate::report::{pad, separator, Report};
use metrics::{counter, histogram};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument};

const DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// Render the decimal number `decimal` in `base` by repeated division, most
/// significant digit first. The division runs on the decimal digits
/// themselves, so the magnitude is unbounded. Non-digit characters are
/// ignored.
fn to_base(decimal: &str, base: u32) -> String {
    let mut dividend: Vec<u32> = decimal
        .chars()
        .filter_map(|c| c.to_digit(10))
        .skip_while(|&d| d == 0)
        .collect();
    if dividend.is_empty() {
        return "0".to_string();
    }

    let mut remainders = Vec::new();
    while !dividend.is_empty() {
        let mut quotient = Vec::with_capacity(dividend.len());
        let mut remainder = 0;
        for digit in &dividend {
            let acc = remainder * 10 + digit;
            let q = acc / base;
            remainder = acc % base;
            if !(quotient.is_empty() && q == 0) {
                quotient.push(q);
            }
        }
        remainders.push(DIGITS[remainder as usize]);
        dividend = quotient;
    }
    remainders.iter().rev().map(|&b| b as char).collect()
}

pub fn to_binary(decimal: &str) -> String {
    to_base(decimal, 2)
}

/// Upper-case hexadecimal digits.
pub fn to_hexadecimal(decimal: &str) -> String {
    to_base(decimal, 16)
}

/// One successfully converted line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumericRecord {
    pub item_number: usize,
    /// Canonical decimal digits, no leading zeros
    pub decimal_value: String,
    pub binary: String,
    pub hexadecimal: String,
}

impl NumericRecord {
    pub fn new(item_number: usize, decimal_value: impl Into<String>) -> Self {
        let decimal_value = decimal_value.into();
        Self {
            item_number,
            binary: to_binary(&decimal_value),
            hexadecimal: to_hexadecimal(&decimal_value),
            decimal_value,
        }
    }

    pub fn row(&self) -> String {
        format_row(
            &self.item_number.to_string(),
            &self.decimal_value,
            &self.binary,
            &self.hexadecimal,
        )
    }
}

fn format_row(item: &str, decimal: &str, binary: &str, hexadecimal: &str) -> String {
    format!(
        "{} {} {} {}",
        pad(item, ITEM_WIDTH),
        pad(decimal, DECIMAL_WIDTH),
        pad(binary, BINARY_WIDTH),
        pad(hexadecimal, HEX_WIDTH)
    )
}

/// Converted rows and rejected-line count for one input file.
#[derive(Debug, Clone)]
pub struct FileConversion {
    pub path: PathBuf,
    pub records: Vec<NumericRecord>,
    pub invalid_count: usize,
}

/// Result of converting every input file.
#[derive(Debug, Clone)]
pub struct ConversionRun {
    pub files: Vec<FileConversion>,
    pub elapsed: Duration,
}

impl ConversionRun {
    /// Rejected lines across all files.
    pub fn total_invalid(&self) -> usize {
        self.files.iter().map(|f| f.invalid_count).sum()
    }

    pub fn total_converted(&self) -> usize {
        self.files.iter().map(|f| f.records.len()).sum()
    }

    pub fn render(&self) -> Report {
        let rule = separator(CONVERTER_SEPARATOR_WIDTH);

        // Files without a single converted row get no section.
        let mut body: Vec<String> = Vec::new();
        for file in self.files.iter().filter(|f| !f.records.is_empty()) {
            let path = file.path.display();
            body.push(format!("Results for file: {}", path));
            body.push(rule.clone());
            body.extend(file.records.iter().map(NumericRecord::row));
            body.push(rule.clone());
            body.push(format!("Invalid Data Count in {}: {}", path, file.invalid_count));
            body.push(String::new());
        }

        let mut text = String::new();
        text.push_str(&format_row("Item", "Decimal", "Binary", "Hexadecimal"));
        text.push('\n');
        text.push_str(&rule);
        text.push('\n');
        text.push_str(&body.join("\n"));
        text.push('\n');
        text.push_str(&rule);
        text.push('\n');
        text.push_str(&format!("Total Invalid Data Count: {}\n", self.total_invalid()));
        text.push_str(&format!(
            "Elapsed Time: {:.6} seconds\n",
            self.elapsed.as_secs_f64()
        ));

        Report::new(CONVERSION_RESULTS_FILE, text)
    }
}

/// Convert every integer line of a single file.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn convert_file(path: &Path, diagnostics: &mut Diagnostics) -> Result<FileConversion> {
    let mut records = Vec::new();
    let mut invalid_count = 0;

    for_each_line(path, |line| {
        let text = line.trim();
        match parse_integer(text) {
            Some(ParsedInteger::NonNegative(value)) => {
                records.push(NumericRecord::new(records.len() + 1, value));
                counter!("text_reports_lines_total", "pipeline" => CONVERTER_PIPELINE, "outcome" => "valid")
                    .increment(1);
            }
            Some(ParsedInteger::Negative) => {
                diagnostics.push(format!(
                    "Invalid data (negative number) in {}: {}",
                    path.display(),
                    text
                ));
                invalid_count += 1;
                counter!("text_reports_lines_total", "pipeline" => CONVERTER_PIPELINE, "outcome" => "invalid")
                    .increment(1);
            }
            None => {
                diagnostics.push(format!(
                    "Invalid data (not an integer) in {}: {}",
                    path.display(),
                    text
                ));
                invalid_count += 1;
                counter!("text_reports_lines_total", "pipeline" => CONVERTER_PIPELINE, "outcome" => "invalid")
                    .increment(1);
            }
        }
    })?;

    debug!(
        "Converted {} lines, {} invalid",
        records.len(),
        invalid_count
    );

    Ok(FileConversion {
        path: path.to_path_buf(),
        records,
        invalid_count,
    })
}

/// Convert all files in order. The first file that cannot be opened or read
/// aborts the whole run; no partial result is returned.
pub fn convert_numbers(paths: &[PathBuf], diagnostics: &mut Diagnostics) -> Result<ConversionRun> {
    info!("Converting {} file(s)", paths.len());
    counter!("text_reports_runs_total", "pipeline" => CONVERTER_PIPELINE).increment(1);
    let started = Instant::now();

    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        match convert_file(path, diagnostics) {
            Ok(file) => files.push(file),
            Err(e) => {
                match &e {
                    ReportError::FileOpen { .. } => {
                        diagnostics.push(format!("Error: File '{}' not found.", path.display()))
                    }
                    other => diagnostics.push(format!("Error: {}", other)),
                }
                counter!("text_reports_files_failed_total", "pipeline" => CONVERTER_PIPELINE)
                    .increment(1);
                return Err(e);
            }
        }
    }

    let elapsed = started.elapsed();
    histogram!("text_reports_run_duration_seconds", "pipeline" => CONVERTER_PIPELINE)
        .record(elapsed.as_secs_f64());

    let run = ConversionRun { files, elapsed };
    info!(
        "Converted {} values, {} invalid lines",
        run.total_converted(),
        run.total_invalid()
    );
    Ok(run)
}

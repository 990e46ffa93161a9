use crate::constants::{
    STATISTICS_FILE_SUFFIX, STATISTICS_PIPELINE, STATISTICS_RESULTS_FILE, STAT_COLUMN_WIDTH,
    STAT_DECIMALS, STAT_LABEL_WIDTH,
};
use crate::diagnostics::Diagnostics;
use crate::error::Result;
use crate::input::{for_each_line, parse_float};
use crate::report::{pad, separator, Report};
use metrics::{counter, histogram};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

/// Row labels of the statistics table, in display order.
pub const STATISTIC_NAMES: [&str; 5] = ["Mean", "Median", "Mode", "Variance", "Std Dev"];

/// Most frequent value(s) of a sample.
#[derive(Debug, Clone, PartialEq)]
pub enum Mode {
    Single(f64),
    /// Several values share the highest count; ascending order.
    Tied(Vec<f64>),
}

impl Mode {
    pub fn render(&self) -> String {
        match self {
            Mode::Single(value) => fixed(*value),
            Mode::Tied(values) => {
                let items: Vec<String> = values.iter().map(|v| list_repr(*v)).collect();
                format!("[{}]", items.join(", "))
            }
        }
    }
}

/// Fixed-point rendering used for every table cell.
fn fixed(value: f64) -> String {
    if value.is_nan() {
        "nan".to_string()
    } else {
        format!("{:.*}", STAT_DECIMALS, value)
    }
}

/// Shortest round-trip rendering used inside a tied-mode list, e.g. `1.0`,
/// `2.5`, `1e+16`, `1e-05`.
fn list_repr(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    let debug = format!("{:?}", value);
    match debug.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{}e{}{:0>2}", mantissa, sign, digits)
        }
        None => debug,
    }
}

pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    data.iter().sum::<f64>() / data.len() as f64
}

fn sorted(data: &[f64]) -> Vec<f64> {
    // -0.0 and 0.0 are the same sample value
    let mut values: Vec<f64> = data
        .iter()
        .map(|&v| if v == 0.0 { 0.0 } else { v })
        .collect();
    values.sort_by(f64::total_cmp);
    values
}

pub fn median(data: &[f64]) -> f64 {
    let values = sorted(data);
    let n = values.len();
    if n == 0 {
        return 0.0;
    }
    if n % 2 == 1 {
        values[n / 2]
    } else {
        (values[n / 2 - 1] + values[n / 2]) / 2.0
    }
}

/// `None` for an empty sample.
pub fn mode(data: &[f64]) -> Option<Mode> {
    let values = sorted(data);
    let first = *values.first()?;

    // Runs of equal values in sorted order
    let mut runs: Vec<(f64, usize)> = vec![(first, 0)];
    for value in values {
        match runs.last_mut() {
            Some(run) if run.0.to_bits() == value.to_bits() => run.1 += 1,
            _ => runs.push((value, 1)),
        }
    }

    let highest = runs.iter().map(|r| r.1).max().unwrap_or(0);
    let mut modes: Vec<f64> = runs
        .into_iter()
        .filter(|r| r.1 == highest)
        .map(|r| r.0)
        .collect();

    if modes.len() == 1 {
        modes.pop().map(Mode::Single)
    } else {
        Some(Mode::Tied(modes))
    }
}

/// Population variance around `mean`.
pub fn variance(data: &[f64], mean: f64) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    data.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / data.len() as f64
}

pub fn std_dev(variance: f64) -> f64 {
    variance.sqrt()
}

/// Descriptive statistics of one sample.
#[derive(Debug, Clone, PartialEq)]
pub struct Statistics {
    pub mean: f64,
    pub median: f64,
    pub mode: Option<Mode>,
    pub variance: f64,
    pub std_dev: f64,
}

impl Statistics {
    pub fn compute(data: &[f64]) -> Self {
        let mean = mean(data);
        let variance = variance(data, mean);
        Self {
            mean,
            median: median(data),
            mode: mode(data),
            variance,
            std_dev: std_dev(variance),
        }
    }

    /// Table cells, in the order of [`STATISTIC_NAMES`].
    pub fn cells(&self) -> [String; 5] {
        [
            fixed(self.mean),
            fixed(self.median),
            self.mode
                .as_ref()
                .map(Mode::render)
                .unwrap_or_else(|| "None".to_string()),
            fixed(self.variance),
            fixed(self.std_dev),
        ]
    }
}

/// Parsed sample of one input file.
#[derive(Debug, Clone)]
pub struct NumericSample {
    pub path: PathBuf,
    pub values: Vec<f64>,
    pub invalid_count: usize,
}

/// Read every line of `path` as a float, reporting lines that are not.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn read_sample(path: &Path, diagnostics: &mut Diagnostics) -> Result<NumericSample> {
    let mut values = Vec::new();
    let mut invalid_count = 0;

    for_each_line(path, |line| match parse_float(line) {
        Some(value) => values.push(value),
        None => {
            diagnostics.push(format!(
                "Invalid data skipped in {}: {}",
                path.display(),
                line.trim()
            ));
            invalid_count += 1;
        }
    })?;

    counter!("text_reports_lines_total", "pipeline" => STATISTICS_PIPELINE, "outcome" => "valid")
        .increment(values.len() as u64);
    counter!("text_reports_lines_total", "pipeline" => STATISTICS_PIPELINE, "outcome" => "invalid")
        .increment(invalid_count as u64);
    debug!("Read {} values, {} invalid", values.len(), invalid_count);

    Ok(NumericSample {
        path: path.to_path_buf(),
        values,
        invalid_count,
    })
}

pub fn has_required_suffix(path: &Path) -> bool {
    path.to_string_lossy().ends_with(STATISTICS_FILE_SUFFIX)
}

/// Read a candidate once and keep it only if it qualifies: `.txt` name,
/// readable, and at least one numeric line.
pub fn qualify(path: &Path, diagnostics: &mut Diagnostics) -> Option<NumericSample> {
    if !has_required_suffix(path) {
        debug!("Skipping {}: not a {} file", path.display(), STATISTICS_FILE_SUFFIX);
        return None;
    }
    match read_sample(path, diagnostics) {
        Ok(sample) if !sample.values.is_empty() => Some(sample),
        Ok(_) => {
            debug!("Skipping {}: no numeric lines", path.display());
            None
        }
        Err(e) => {
            warn!("Skipping {}: {}", path.display(), e);
            counter!("text_reports_files_failed_total", "pipeline" => STATISTICS_PIPELINE)
                .increment(1);
            None
        }
    }
}

/// One column of the statistics table.
#[derive(Debug, Clone)]
pub struct FileStatistics {
    pub path: PathBuf,
    pub statistics: Statistics,
}

/// Result of computing statistics for every qualifying file.
#[derive(Debug, Clone)]
pub struct StatisticsRun {
    pub files: Vec<FileStatistics>,
    pub elapsed: Duration,
}

impl StatisticsRun {
    pub fn render(&self) -> Report {
        let rule = separator(STAT_LABEL_WIDTH + self.files.len() * STAT_COLUMN_WIDTH);

        let mut header = pad("", STAT_LABEL_WIDTH);
        for file in &self.files {
            header.push_str(&pad(file.path.display(), STAT_COLUMN_WIDTH));
        }

        let columns: Vec<[String; 5]> = self.files.iter().map(|f| f.statistics.cells()).collect();

        let mut lines = vec![header, rule.clone()];
        for (row, name) in STATISTIC_NAMES.iter().enumerate() {
            let mut line = format!("{} ", pad(name, STAT_LABEL_WIDTH));
            for cells in &columns {
                line.push_str(&pad(&cells[row], STAT_COLUMN_WIDTH));
            }
            lines.push(line);
        }
        lines.push(rule);
        lines.push(format!(
            "Execution Time: {:.5} seconds",
            self.elapsed.as_secs_f64()
        ));

        Report::new(STATISTICS_RESULTS_FILE, lines.join("\n"))
    }
}

/// Compute statistics for every qualifying path, in argument order.
/// Paths that do not qualify are left out of the table.
pub fn compute_statistics(paths: &[PathBuf], diagnostics: &mut Diagnostics) -> StatisticsRun {
    info!("Computing statistics for {} candidate file(s)", paths.len());
    counter!("text_reports_runs_total", "pipeline" => STATISTICS_PIPELINE).increment(1);
    let started = Instant::now();

    // A path named twice keeps its first column only.
    let mut seen = HashSet::new();
    let files: Vec<FileStatistics> = paths
        .iter()
        .filter(|path| seen.insert(path.as_path()))
        .filter_map(|path| qualify(path, diagnostics))
        .map(|sample| FileStatistics {
            statistics: Statistics::compute(&sample.values),
            path: sample.path,
        })
        .collect();

    let elapsed = started.elapsed();
    histogram!("text_reports_run_duration_seconds", "pipeline" => STATISTICS_PIPELINE)
        .record(elapsed.as_secs_f64());
    info!(
        "{} of {} file(s) qualified",
        files.len(),
        paths.len()
    );

    StatisticsRun { files, elapsed }
}

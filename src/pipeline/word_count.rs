use crate::constants::{
    FREQUENCY_WIDTH, WORD_COUNT_PIPELINE, WORD_COUNT_RESULTS_FILE, WORD_COUNT_SEPARATOR_WIDTH,
    WORD_PUNCTUATION, WORD_WIDTH,
};
use crate::diagnostics::Diagnostics;
use crate::error::{ReportError, Result};
use crate::input::for_each_line;
use crate::report::{pad, separator, Report};
use metrics::{counter, histogram};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument};

/// Strip surrounding punctuation and lower-case a raw token.
/// Returns `None` when nothing is left.
pub fn clean_token(raw: &str) -> Option<String> {
    let stripped = raw.trim_matches(WORD_PUNCTUATION);
    if stripped.is_empty() {
        None
    } else {
        Some(stripped.to_lowercase())
    }
}

/// Word occurrence counts accumulated across files.
///
/// Words remember the order they were first seen in, so equal counts keep a
/// stable presentation order.
#[derive(Debug, Default, Clone)]
pub struct WordFrequencies {
    index: HashMap<String, usize>,
    entries: Vec<(String, u64)>,
}

impl WordFrequencies {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, word: String) {
        if let Some(&slot) = self.index.get(&word) {
            self.entries[slot].1 += 1;
            return;
        }
        self.index.insert(word.clone(), self.entries.len());
        self.entries.push((word, 1));
    }

    /// Count every cleaned token on `line`.
    pub fn record_line(&mut self, line: &str) {
        for token in line.split_whitespace() {
            if let Some(word) = clean_token(token) {
                self.record(word);
            }
        }
    }

    pub fn count(&self, word: &str) -> u64 {
        self.index
            .get(word)
            .map(|&slot| self.entries[slot].1)
            .unwrap_or(0)
    }

    pub fn distinct(&self) -> usize {
        self.entries.len()
    }

    /// Sum of all occurrences.
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, n)| n).sum()
    }

    /// Most frequent first; ties in first-seen order.
    pub fn sorted(&self) -> Vec<(&str, u64)> {
        let mut sorted: Vec<(&str, u64)> = self
            .entries
            .iter()
            .map(|(word, n)| (word.as_str(), *n))
            .collect();
        sorted.sort_by(|a, b| b.1.cmp(&a.1));
        sorted
    }
}

/// Result of counting words over every input file.
#[derive(Debug, Clone)]
pub struct WordCountRun {
    pub frequencies: WordFrequencies,
    pub file_errors: Vec<PathBuf>,
    pub elapsed: Duration,
}

impl WordCountRun {
    pub fn render(&self) -> Report {
        let rule = separator(WORD_COUNT_SEPARATOR_WIDTH);
        let mut text = String::new();

        text.push_str(&format!(
            "{} {}\n",
            pad("Word", WORD_WIDTH),
            pad("Frequency", FREQUENCY_WIDTH)
        ));
        text.push_str(&rule);
        text.push('\n');

        for (word, count) in self.frequencies.sorted() {
            text.push_str(&format!(
                "{} {}\n",
                pad(word, WORD_WIDTH),
                pad(count, FREQUENCY_WIDTH)
            ));
        }

        text.push_str(&rule);
        text.push('\n');
        text.push_str(&format!(
            "Total words processed: {}\n",
            self.frequencies.total()
        ));
        text.push_str(&format!(
            "Elapsed Time: {:.6} seconds\n",
            self.elapsed.as_secs_f64()
        ));

        if !self.file_errors.is_empty() {
            let failed: Vec<String> = self
                .file_errors
                .iter()
                .map(|p| p.display().to_string())
                .collect();
            text.push_str(&format!("File Errors: {}\n", failed.join(", ")));
        }

        Report::new(WORD_COUNT_RESULTS_FILE, text)
    }
}

/// Add the words of one file to `frequencies`.
///
/// Counts from lines read before a mid-file read failure are kept.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn count_file(path: &Path, frequencies: &mut WordFrequencies) -> Result<usize> {
    let before = frequencies.total();
    let lines = for_each_line(path, |line| frequencies.record_line(line))?;
    debug!(
        "Counted {} words over {} lines",
        frequencies.total() - before,
        lines
    );
    Ok(lines)
}

/// Count words across all files. Unreadable files are recorded and skipped.
pub fn count_words(paths: &[PathBuf], diagnostics: &mut Diagnostics) -> WordCountRun {
    info!("Counting words in {} file(s)", paths.len());
    counter!("text_reports_runs_total", "pipeline" => WORD_COUNT_PIPELINE).increment(1);
    let started = Instant::now();

    let mut frequencies = WordFrequencies::new();
    let mut file_errors = Vec::new();

    for path in paths {
        if let Err(e) = count_file(path, &mut frequencies) {
            match &e {
                ReportError::FileOpen { .. } => {
                    diagnostics.push(format!("Error: File '{}' not found.", path.display()))
                }
                other => diagnostics.push(format!("Error: {}", other)),
            }
            counter!("text_reports_files_failed_total", "pipeline" => WORD_COUNT_PIPELINE)
                .increment(1);
            file_errors.push(path.clone());
        }
    }

    let elapsed = started.elapsed();
    histogram!("text_reports_run_duration_seconds", "pipeline" => WORD_COUNT_PIPELINE)
        .record(elapsed.as_secs_f64());
    info!(
        "Counted {} words ({} distinct), {} file error(s)",
        frequencies.total(),
        frequencies.distinct(),
        file_errors.len()
    );

    WordCountRun {
        frequencies,
        file_errors,
        elapsed,
    }
}

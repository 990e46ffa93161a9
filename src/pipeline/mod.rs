//! The three report pipelines. Each reads its input files in argument order,
//! aggregates, and renders a [`crate::report::Report`].

pub mod converter;
pub mod statistics;
pub mod word_count;

pub use converter::{convert_numbers, ConversionRun};
pub use statistics::{compute_statistics, Mode, StatisticsRun};
pub use word_count::{count_words, WordCountRun, WordFrequencies};

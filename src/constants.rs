/// Fixed output file names, written into the current working directory
pub const CONVERSION_RESULTS_FILE: &str = "ConvertionResults.txt";
pub const WORD_COUNT_RESULTS_FILE: &str = "WordCountResults.txt";
pub const STATISTICS_RESULTS_FILE: &str = "StatisticsResults.txt";

// Pipeline names used for log spans and metric labels
pub const CONVERTER_PIPELINE: &str = "converter";
pub const WORD_COUNT_PIPELINE: &str = "word_count";
pub const STATISTICS_PIPELINE: &str = "statistics";

// Converter table layout
pub const CONVERTER_SEPARATOR_WIDTH: usize = 70;
pub const ITEM_WIDTH: usize = 5;
pub const DECIMAL_WIDTH: usize = 15;
pub const BINARY_WIDTH: usize = 30;
pub const HEX_WIDTH: usize = 15;

// Word count table layout
pub const WORD_COUNT_SEPARATOR_WIDTH: usize = 30;
pub const WORD_WIDTH: usize = 20;
pub const FREQUENCY_WIDTH: usize = 10;

/// Characters stripped from both ends of every token before counting
pub const WORD_PUNCTUATION: &[char] = &['.', ',', '!', '?', ';', ':', '"', '\''];

// Statistics table layout
pub const STAT_LABEL_WIDTH: usize = 15;
pub const STAT_COLUMN_WIDTH: usize = 20;
pub const STAT_DECIMALS: usize = 5;

/// Only files with this suffix are considered by the statistics pipeline
pub const STATISTICS_FILE_SUFFIX: &str = ".txt";

/// Default config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "text_reports.toml";
/// Environment variable that overrides the config file location
pub const CONFIG_PATH_ENV: &str = "TEXT_REPORTS_CONFIG";

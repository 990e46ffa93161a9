use crate::constants::{CONFIG_PATH_ENV, DEFAULT_CONFIG_FILE};
use crate::error::{ReportError, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Ambient settings shared by every utility. Pipeline behaviour is fixed and
/// not configurable here.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub directory: PathBuf,
    pub file_name: String,
    pub filter: String,
    pub file_output: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("logs"),
            file_name: "text_reports.log".to_string(),
            filter: "text_reports=info".to_string(),
            file_output: false,
        }
    }
}

impl Config {
    /// Load from `$TEXT_REPORTS_CONFIG`, else `text_reports.toml`, else defaults.
    ///
    /// An explicitly named file must exist; the default file is optional.
    pub fn load() -> Result<Self> {
        match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) if !path.trim().is_empty() => Self::from_file(Path::new(path.trim())),
            _ => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::from_file(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            ReportError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        if config.logging.file_output && config.logging.file_name.trim().is_empty() {
            return Err(ReportError::Config(
                "logging.file_name must not be empty when file_output is enabled".to_string(),
            ));
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.logging.directory, PathBuf::from("logs"));
        assert_eq!(config.logging.file_name, "text_reports.log");
        assert!(!config.logging.file_output);
    }

    #[test]
    fn test_partial_logging_section() {
        let config = Config::from_toml("[logging]\nfilter = \"text_reports=debug\"\nfile_output = true\n").unwrap();
        assert_eq!(config.logging.filter, "text_reports=debug");
        assert!(config.logging.file_output);
        assert_eq!(config.logging.directory, PathBuf::from("logs"));
    }

    #[test]
    fn test_empty_file_name_rejected() {
        let err = Config::from_toml("[logging]\nfile_name = \"  \"\nfile_output = true\n").unwrap_err();
        assert!(matches!(err, ReportError::Config(_)));
    }

    #[test]
    fn test_empty_file_name_allowed_without_file_output() {
        let config = Config::from_toml("[logging]\nfile_name = \"\"\n").unwrap();
        assert!(!config.logging.file_output);
    }

    #[test]
    fn test_malformed_toml_is_an_error() {
        let err = Config::from_toml("[logging\n").unwrap_err();
        assert!(matches!(err, ReportError::Toml(_)));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[logging]\ndirectory = \"var/log\"").unwrap();
        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.logging.directory, PathBuf::from("var/log"));
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::from_file(&dir.path().join("absent.toml")).unwrap_err();
        assert!(err.to_string().contains("absent.toml"));
    }
}

// Cleaner settings, loaded from a JSON file or taken from defaults.
use serde::Deserialize;
use shared::utils::{validate_timestamp_format, DEFAULT_TIMESTAMP_FORMAT};
use std::fs;
use std::path::Path;

use crate::error::CleanerError;
use crate::normalize::DEFAULT_ALLOWED_CHARS;

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct CleanerSettings {
    pub csv_delimiter: char,
    pub numeric_columns: Vec<String>,
    pub allow_negative: bool,
    pub allowed_chars: Vec<char>,
    pub sanitize_text: bool,
    pub coalesce_nulls: bool,
    pub timestamp_format: String,
}

impl Default for CleanerSettings {
    fn default() -> Self {
        CleanerSettings {
            csv_delimiter: ',',
            numeric_columns: Vec::new(),
            allow_negative: false,
            allowed_chars: DEFAULT_ALLOWED_CHARS.to_vec(),
            sanitize_text: true,
            coalesce_nulls: true,
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
        }
    }
}

impl CleanerSettings {
    pub fn from_json(json: &str) -> Result<Self, CleanerError> {
        let settings: CleanerSettings =
            serde_json::from_str(json).map_err(|e| CleanerError::Config(format!("Invalid settings JSON: {}", e)))?;
        settings.delimiter_byte()?;
        validate_timestamp_format(&settings.timestamp_format).map_err(|e| CleanerError::Config(e.to_string()))?;
        Ok(settings)
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, CleanerError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .map_err(|e| CleanerError::Config(format!("Failed to read settings file '{}': {}", path.display(), e)))?;
        Self::from_json(&json)
    }

    /// The csv crate takes a single byte delimiter.
    pub fn delimiter_byte(&self) -> Result<u8, CleanerError> {
        if self.csv_delimiter.is_ascii() {
            Ok(self.csv_delimiter as u8)
        } else {
            Err(CleanerError::Config(format!(
                "CSV delimiter must be an ASCII character, got '{}'",
                self.csv_delimiter
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let settings = CleanerSettings::default();
        assert_eq!(settings.csv_delimiter, ',');
        assert!(settings.numeric_columns.is_empty());
        assert!(!settings.allow_negative);
        assert_eq!(settings.allowed_chars, vec![',', '.']);
        assert_eq!(settings.timestamp_format, "%Y-%m-%d %H:%M:%S");
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings =
            CleanerSettings::from_json(r#"{ "csv_delimiter": ";", "numeric_columns": ["Fechamento", "Volume"] }"#)
                .unwrap();
        assert_eq!(settings.csv_delimiter, ';');
        assert_eq!(settings.numeric_columns, vec!["Fechamento".to_string(), "Volume".to_string()]);
        assert!(settings.sanitize_text);
        assert!(settings.coalesce_nulls);
        assert_eq!(settings.allowed_chars, vec![',', '.']);
    }

    #[test]
    fn test_invalid_json_is_config_error() {
        let err = CleanerSettings::from_json("{ not json").unwrap_err();
        assert!(matches!(err, CleanerError::Config(_)));
    }

    #[test]
    fn test_non_ascii_delimiter_rejected() {
        let err = CleanerSettings::from_json(r#"{ "csv_delimiter": "§" }"#).unwrap_err();
        assert!(err.to_string().contains("ASCII"));
    }

    #[test]
    fn test_invalid_timestamp_format_rejected_at_load() {
        let err = CleanerSettings::from_json(r#"{ "timestamp_format": "%Q" }"#).unwrap_err();
        assert!(matches!(err, CleanerError::Config(_)));
        assert!(err.to_string().contains("Invalid timestamp format '%Q'"));

        let settings = CleanerSettings::from_json(r#"{ "timestamp_format": "%d/%m/%Y" }"#).unwrap();
        assert_eq!(settings.timestamp_format, "%d/%m/%Y");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"{{ "allow_negative": true }}"#).unwrap();
        let settings = CleanerSettings::load_from_file(file.path()).unwrap();
        assert!(settings.allow_negative);
        assert_eq!(settings.delimiter_byte().unwrap(), b',');
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = CleanerSettings::load_from_file("/nonexistent/cleaner.json").unwrap_err();
        assert!(err.to_string().contains("Failed to read settings file"));
    }
}

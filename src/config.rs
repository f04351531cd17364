//! Runtime settings for the lending engine and its demo binary.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::error::{LibraryError, Result};

/// Settings read from a JSON file, every field optional
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct LibraryConfig {
    /// Where the library snapshot is stored
    pub data_file: PathBuf,
    /// Loan length used when none is given
    pub default_loan_days: i64,
    /// Days added by a standard extension
    pub extension_days: i64,
    /// Length of the popularity rankings
    pub ranking_size: usize,
    /// Field separator for tabular files
    pub delimiter: char,
    /// `tracing` filter directive, e.g. `info` or `library_lending=debug`
    pub log_filter: String,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("library.json"),
            default_loan_days: 14,
            extension_days: 7,
            ranking_size: 3,
            delimiter: ',',
            log_filter: "info".to_string(),
        }
    }
}

impl LibraryConfig {
    /// Parse a JSON document; missing keys keep their defaults
    ///
    /// # Errors
    ///
    /// Returns a `LibraryError::Serialization` for malformed JSON and a
    /// `LibraryError::Config` for out-of-range values.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a JSON config file
    ///
    /// # Errors
    ///
    /// Returns a `LibraryError::Io` if the file cannot be read, otherwise
    /// the errors of [`LibraryConfig::from_json`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| LibraryError::io(path, e))?;
        Self::from_json(&json)
    }

    /// Apply a single `key=value` override
    ///
    /// # Errors
    ///
    /// Returns a `LibraryError::Config` if the text is not `key=value`, the
    /// key is unknown, or the value does not parse or validate.
    pub fn apply_override(&mut self, assignment: &str) -> Result<()> {
        let (key, value) = assignment
            .split_once('=')
            .map(|(k, v)| (k.trim(), v.trim()))
            .ok_or_else(|| {
                LibraryError::Config(format!("expected key=value, got `{assignment}`"))
            })?;

        let invalid = || LibraryError::Config(format!("invalid value for `{key}`: `{value}`"));
        let mut next = self.clone();
        match key {
            "data_file" => next.data_file = PathBuf::from(value),
            "default_loan_days" => next.default_loan_days = value.parse().map_err(|_| invalid())?,
            "extension_days" => next.extension_days = value.parse().map_err(|_| invalid())?,
            "ranking_size" => next.ranking_size = value.parse().map_err(|_| invalid())?,
            "delimiter" => {
                let mut chars = value.chars();
                next.delimiter = match (chars.next(), chars.next()) {
                    (Some(c), None) => c,
                    _ => return Err(invalid()),
                };
            }
            "log_filter" => next.log_filter = value.to_string(),
            other => return Err(LibraryError::Config(format!("unknown key `{other}`"))),
        }
        next.validate()?;
        *self = next;
        Ok(())
    }

    /// Check that values are usable
    ///
    /// # Errors
    ///
    /// Returns a `LibraryError::Config` describing the first bad value.
    pub fn validate(&self) -> Result<()> {
        if self.default_loan_days <= 0 {
            return Err(LibraryError::Config("default_loan_days must be positive".into()));
        }
        if self.extension_days <= 0 {
            return Err(LibraryError::Config("extension_days must be positive".into()));
        }
        if self.delimiter.is_alphanumeric() || self.delimiter == '.' || self.delimiter == '-' {
            return Err(LibraryError::Config(format!(
                "delimiter `{}` would clash with field contents",
                self.delimiter
            )));
        }
        if self.data_file.as_os_str().is_empty() {
            return Err(LibraryError::Config("data_file must not be empty".into()));
        }
        Ok(())
    }
}

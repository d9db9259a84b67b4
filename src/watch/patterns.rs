// src/watch/patterns.rs

//! Extension filtering for watched files.

use regex::Regex;

use crate::errors::{Result, SyncwatchError};

/// Compiled filter matching file paths with the watched extension.
///
/// Accepts both the lowercase and the uppercase variant of the configured
/// extension, anchored to the end of the path (for `"mp3"` the compiled
/// pattern is `^.*\.(mp3|MP3)$`). Mixed-case variants are not accepted.
#[derive(Debug, Clone)]
pub struct ExtensionFilter {
    regex: Regex,
}

impl ExtensionFilter {
    pub fn new(extension: &str) -> Result<Self> {
        if extension.is_empty() || extension.starts_with('.') {
            return Err(SyncwatchError::ConfigError(format!(
                "watched extension must be non-empty without a leading dot (got {extension:?})"
            )));
        }

        let pattern = format!(
            r"^.*\.({}|{})$",
            regex::escape(&extension.to_lowercase()),
            regex::escape(&extension.to_uppercase()),
        );
        let regex = Regex::new(&pattern).map_err(|e| {
            SyncwatchError::ConfigError(format!("invalid extension pattern: {e}"))
        })?;

        Ok(Self { regex })
    }

    pub fn matches(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }
}

// src/config/validate.rs

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{Result, SyncwatchError};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = crate::errors::SyncwatchError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.remote, raw.watch))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    validate_remote(cfg)?;
    validate_watch(cfg)?;
    Ok(())
}

fn validate_remote(cfg: &RawConfigFile) -> Result<()> {
    if cfg.remote.base_url.trim().is_empty() {
        return Err(SyncwatchError::ConfigError(
            "[remote].base_url must not be empty".to_string(),
        ));
    }

    if let Err(e) = reqwest::Url::parse(&cfg.remote.base_url) {
        return Err(SyncwatchError::ConfigError(format!(
            "[remote].base_url is not a valid URL: {e}"
        )));
    }

    Ok(())
}

fn validate_watch(cfg: &RawConfigFile) -> Result<()> {
    if cfg.watch.root.trim().is_empty() {
        return Err(SyncwatchError::ConfigError(
            "[watch].root must not be empty".to_string(),
        ));
    }

    if cfg.watch.poll_interval_secs == 0 {
        return Err(SyncwatchError::ConfigError(
            "[watch].poll_interval_secs must be >= 1 (got 0)".to_string(),
        ));
    }

    if cfg.watch.extension.is_empty() || cfg.watch.extension.starts_with('.') {
        return Err(SyncwatchError::ConfigError(format!(
            "[watch].extension must be non-empty without a leading dot (got {:?})",
            cfg.watch.extension
        )));
    }

    if cfg.watch.trash_marker.is_empty() {
        return Err(SyncwatchError::ConfigError(
            "[watch].trash_marker must not be empty".to_string(),
        ));
    }

    if cfg.watch.queue_capacity == 0 {
        return Err(SyncwatchError::ConfigError(
            "[watch].queue_capacity must be >= 1 (got 0)".to_string(),
        ));
    }

    Ok(())
}

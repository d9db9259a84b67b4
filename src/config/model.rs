// src/config/model.rs

use std::time::Duration;

use serde::Deserialize;

use crate::dispatch::ClassifyRules;

/// Top-level configuration as read from a TOML file.
///
/// This is a direct mapping of the expected file:
///
/// ```toml
/// [remote]
/// base_url = "http://localhost:4533/rest/library"
///
/// [watch]
/// root = "/music"
/// poll_interval_secs = 10
/// extension = "mp3"
/// trash_marker = ".Trash"
/// queue_capacity = 1
/// ```
///
/// Only `base_url` and `root` are required; everything else has defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct RawConfigFile {
    /// Remote service settings from `[remote]`.
    pub remote: RemoteSection,

    /// Watch settings from `[watch]`.
    pub watch: WatchSection,
}

/// `[remote]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteSection {
    /// Base URL the payloads are POSTed/PUT/DELETEd to.
    pub base_url: String,
}

/// `[watch]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct WatchSection {
    /// Root directory of the watched library.
    pub root: String,

    /// How often the poll watcher re-scans the tree, in seconds.
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,

    /// Watched file extension, without the leading dot.
    #[serde(default = "default_extension")]
    pub extension: String,

    /// Substring identifying a trash destination in a moved path.
    #[serde(default = "default_trash_marker")]
    pub trash_marker: String,

    /// Capacity of the event queue between watcher and dispatcher.
    ///
    /// The default of 1 intentionally coalesces bursts rather than
    /// buffering every individual change.
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,
}

fn default_poll_interval_secs() -> u64 {
    10
}

fn default_extension() -> String {
    "mp3".to_string()
}

fn default_trash_marker() -> String {
    ".Trash".to_string()
}

fn default_queue_capacity() -> usize {
    1
}

/// Validated configuration, immutable for the lifetime of the process.
///
/// Construct via `TryFrom<RawConfigFile>` (see `config::validate`); the
/// validated value is passed explicitly into the watcher and dispatcher
/// constructors instead of living in global state.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub remote: RemoteSection,
    pub watch: WatchSection,
}

impl ConfigFile {
    /// Internal constructor; callers go through validation.
    pub(crate) fn new_unchecked(remote: RemoteSection, watch: WatchSection) -> Self {
        Self { remote, watch }
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.watch.poll_interval_secs)
    }

    /// The subset of the config the classifier cares about.
    pub fn classify_rules(&self) -> ClassifyRules {
        ClassifyRules::new(&self.watch.extension, &self.watch.trash_marker)
    }
}

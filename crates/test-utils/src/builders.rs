#![allow(dead_code)]

use syncwatch::config::{ConfigFile, RawConfigFile, RemoteSection, WatchSection};

/// Builder for `ConfigFile` to simplify test setup.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile {
                remote: RemoteSection {
                    base_url: "http://localhost:4533/rest/library".to_string(),
                },
                watch: WatchSection {
                    root: "/music".to_string(),
                    poll_interval_secs: 10,
                    extension: "mp3".to_string(),
                    trash_marker: ".Trash".to_string(),
                    queue_capacity: 1,
                },
            },
        }
    }

    pub fn base_url(mut self, url: &str) -> Self {
        self.config.remote.base_url = url.to_string();
        self
    }

    pub fn root(mut self, root: &str) -> Self {
        self.config.watch.root = root.to_string();
        self
    }

    pub fn extension(mut self, ext: &str) -> Self {
        self.config.watch.extension = ext.to_string();
        self
    }

    pub fn trash_marker(mut self, marker: &str) -> Self {
        self.config.watch.trash_marker = marker.to_string();
        self
    }

    pub fn queue_capacity(mut self, capacity: usize) -> Self {
        self.config.watch.queue_capacity = capacity;
        self
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

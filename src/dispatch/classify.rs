// src/dispatch/classify.rs

//! Pure event classification.
//!
//! This module contains a synchronous, deterministic classifier that maps
//! one [`ChangeEvent`] to exactly one [`SyncIntent`]. It has no hidden
//! state, performs no IO, and does not depend on the order of prior
//! events, so it can be unit tested exhaustively without Tokio, channels
//! or a real filesystem.

use crate::dispatch::paths::parent_folder;
use crate::event::{ChangeEvent, FsOp};

/// The parameters classification needs from configuration.
#[derive(Debug, Clone)]
pub struct ClassifyRules {
    /// Watched file extension, without the leading dot (e.g. `"mp3"`).
    pub extension: String,
    /// Fixed substring identifying a trash destination (e.g. `".Trash"`).
    ///
    /// Known limitation: the marker matches anywhere in the new path, not
    /// just as a directory component. A library folder that happens to
    /// contain the marker in its name is treated as trash.
    pub trash_marker: String,
}

impl ClassifyRules {
    pub fn new(extension: impl Into<String>, trash_marker: impl Into<String>) -> Self {
        Self {
            extension: extension.into(),
            trash_marker: trash_marker.into(),
        }
    }

    /// The extension as it appears inside a file name (`".mp3"`).
    fn dotted_extension(&self) -> String {
        format!(".{}", self.extension)
    }
}

/// The synchronization action derived from one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncIntent {
    /// A new matching file appeared; re-scan its containing folder.
    Import { folder_path: String },
    /// A matching file was renamed or moved within the tree.
    Relocate {
        old_file_path: String,
        new_file_path: String,
    },
    /// A matching file was deleted, or moved out into a trash location.
    Purge { file_path: String },
    /// The event cannot be mapped to a valid action.
    Rejected { reason: String },
}

/// Map one event to exactly one intent.
///
/// Paths inside the returned intent are raw; quote escaping happens later,
/// exactly once, when the wire payload is built.
pub fn classify(event: &ChangeEvent, rules: &ClassifyRules) -> SyncIntent {
    // The watch source already skips bare-root paths; stay total anyway.
    if event.path.len() <= 1 {
        return SyncIntent::Rejected {
            reason: "event path is empty or a bare root separator".to_string(),
        };
    }

    match event.op {
        // A created file signals "this folder's contents changed": the
        // remote re-scans the whole containing folder, which also covers
        // batched drops of many files into one directory.
        FsOp::Created => SyncIntent::Import {
            folder_path: parent_folder(&event.path),
        },
        FsOp::Moved => classify_move(event, rules),
        FsOp::Removed => SyncIntent::Purge {
            file_path: event.path.clone(),
        },
    }
}

fn classify_move(event: &ChangeEvent, rules: &ClassifyRules) -> SyncIntent {
    let Some(old_path) = event.old_path.as_deref() else {
        return SyncIntent::Rejected {
            reason: "move event carries no previous path".to_string(),
        };
    };
    if old_path.len() <= 1 {
        return SyncIntent::Rejected {
            reason: "previous path is empty or a bare root separator".to_string(),
        };
    }

    // Destination inside the trash means the object is gone, not
    // relocated, regardless of what the old path looks like.
    if event.path.contains(&rules.trash_marker) {
        return SyncIntent::Purge {
            file_path: old_path.to_string(),
        };
    }

    // Folder-level moves are unsupported; flag them instead of acting.
    // Case-sensitive on purpose: the watch source emits one event per
    // case variant it accepts.
    if !old_path.contains(&rules.dotted_extension()) {
        return SyncIntent::Rejected {
            reason:
                "forbidden to move folders, only single files of the watched type are relocatable"
                    .to_string(),
        };
    }

    SyncIntent::Relocate {
        old_file_path: old_path.to_string(),
        new_file_path: event.path.clone(),
    }
}

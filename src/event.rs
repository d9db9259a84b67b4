// src/event.rs

//! The value flowing from the watch source into the dispatcher.

/// Kind of filesystem change observed by the watch source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FsOp {
    Created,
    Moved,
    Removed,
}

/// One filesystem observation.
///
/// Built by the watch source, consumed exactly once by the dispatcher and
/// then dropped; nothing mutates it in between.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    pub op: FsOp,
    /// Current (or new) path of the object.
    pub path: String,
    /// Previous path; present only for [`FsOp::Moved`].
    pub old_path: Option<String>,
    /// True when the path failed the extension filter, i.e. the object
    /// looks like a directory rather than a matching file.
    pub is_dir_hint: bool,
}

impl ChangeEvent {
    pub fn created(path: impl Into<String>) -> Self {
        Self {
            op: FsOp::Created,
            path: path.into(),
            old_path: None,
            is_dir_hint: false,
        }
    }

    pub fn moved(old_path: impl Into<String>, new_path: impl Into<String>) -> Self {
        Self {
            op: FsOp::Moved,
            path: new_path.into(),
            old_path: Some(old_path.into()),
            is_dir_hint: false,
        }
    }

    pub fn removed(path: impl Into<String>) -> Self {
        Self {
            op: FsOp::Removed,
            path: path.into(),
            old_path: None,
            is_dir_hint: false,
        }
    }

    pub fn with_dir_hint(mut self, hint: bool) -> Self {
        self.is_dir_hint = hint;
        self
    }
}

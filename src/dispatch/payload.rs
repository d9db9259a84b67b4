// src/dispatch/payload.rs

//! Wire-ready request payloads, one body shape per HTTP verb.
//!
//! Field names follow the remote service's JSON contract (camelCase via
//! serde renames). Quote escaping is applied here, exactly once.

use serde::Serialize;

use crate::dispatch::classify::SyncIntent;
use crate::dispatch::paths::escape;

/// HTTP verb the remote expects for a given payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Post,
    Put,
    Delete,
}

/// POST body: re-scan a folder for newly appeared files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportBody {
    pub path: String,
    pub recursive: bool,
    pub song_extension: String,
    pub genre_from_path: bool,
}

/// PUT body: a single file moved within the library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RelocateBody {
    pub new_path: String,
    pub old_path: String,
    pub recursive: bool,
    pub song_extension: String,
}

/// DELETE body: a file left the library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PurgeBody {
    pub path: String,
    pub recursive: bool,
    pub song_extension: String,
    pub genre_from_path: bool,
}

/// The normalized, wire-ready representation of a [`SyncIntent`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestPayload {
    Import(ImportBody),
    Relocate(RelocateBody),
    Purge(PurgeBody),
}

impl RequestPayload {
    pub fn verb(&self) -> Verb {
        match self {
            RequestPayload::Import(_) => Verb::Post,
            RequestPayload::Relocate(_) => Verb::Put,
            RequestPayload::Purge(_) => Verb::Delete,
        }
    }

    /// Serialize the inner body as a bare JSON object.
    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        match self {
            RequestPayload::Import(body) => serde_json::to_value(body),
            RequestPayload::Relocate(body) => serde_json::to_value(body),
            RequestPayload::Purge(body) => serde_json::to_value(body),
        }
    }
}

/// Build the wire payload for an intent.
///
/// `Rejected` intents have no wire representation and yield `None`; the
/// dispatcher logs them instead of sending anything.
pub fn build_payload(intent: &SyncIntent, extension: &str) -> Option<RequestPayload> {
    match intent {
        SyncIntent::Import { folder_path } => Some(RequestPayload::Import(ImportBody {
            path: escape(folder_path),
            recursive: true,
            song_extension: extension.to_string(),
            genre_from_path: true,
        })),
        SyncIntent::Relocate {
            old_file_path,
            new_file_path,
        } => Some(RequestPayload::Relocate(RelocateBody {
            new_path: escape(new_file_path),
            old_path: escape(old_file_path),
            recursive: false,
            song_extension: extension.to_string(),
        })),
        SyncIntent::Purge { file_path } => Some(RequestPayload::Purge(PurgeBody {
            path: escape(file_path),
            recursive: false,
            song_extension: extension.to_string(),
            genre_from_path: false,
        })),
        SyncIntent::Rejected { .. } => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn import_serializes_with_remote_field_names() {
        let payload = build_payload(
            &SyncIntent::Import {
                folder_path: "/lib/NewAlbum".to_string(),
            },
            "mp3",
        )
        .unwrap();

        assert_eq!(payload.verb(), Verb::Post);
        assert_eq!(
            payload.to_json().unwrap(),
            json!({
                "path": "/lib/NewAlbum",
                "recursive": true,
                "songExtension": "mp3",
                "genreFromPath": true,
            })
        );
    }

    #[test]
    fn relocate_serializes_with_remote_field_names() {
        let payload = build_payload(
            &SyncIntent::Relocate {
                old_file_path: "/lib/A/song.mp3".to_string(),
                new_file_path: "/lib/B/song.mp3".to_string(),
            },
            "mp3",
        )
        .unwrap();

        assert_eq!(payload.verb(), Verb::Put);
        assert_eq!(
            payload.to_json().unwrap(),
            json!({
                "newPath": "/lib/B/song.mp3",
                "oldPath": "/lib/A/song.mp3",
                "recursive": false,
                "songExtension": "mp3",
            })
        );
    }

    #[test]
    fn purge_serializes_with_remote_field_names() {
        let payload = build_payload(
            &SyncIntent::Purge {
                file_path: "/lib/A/song.mp3".to_string(),
            },
            "mp3",
        )
        .unwrap();

        assert_eq!(payload.verb(), Verb::Delete);
        assert_eq!(
            payload.to_json().unwrap(),
            json!({
                "path": "/lib/A/song.mp3",
                "recursive": false,
                "songExtension": "mp3",
                "genreFromPath": false,
            })
        );
    }

    #[test]
    fn quotes_are_escaped_once_at_payload_construction() {
        let payload = build_payload(
            &SyncIntent::Purge {
                file_path: "/lib/O'Brien/track.mp3".to_string(),
            },
            "mp3",
        )
        .unwrap();

        let RequestPayload::Purge(body) = payload else {
            panic!("expected purge body");
        };
        assert_eq!(body.path, "/lib/O\\\\'Brien/track.mp3");
    }

    #[test]
    fn rejected_intent_has_no_payload() {
        let intent = SyncIntent::Rejected {
            reason: "nope".to_string(),
        };
        assert!(build_payload(&intent, "mp3").is_none());
    }
}

// src/watch/mod.rs

//! File watching and change detection.
//!
//! This module is responsible for:
//! - Compiling the watched-extension filter.
//! - Wiring up a polling filesystem watcher (`notify`).
//! - Translating raw notify events into [`crate::event::ChangeEvent`]s
//!   and feeding them into the bounded dispatcher queue.
//!
//! It does **not** know about classification or the remote service; it
//! only turns filesystem changes into the dispatcher's input values.

pub mod patterns;
pub mod source;

pub use patterns::ExtensionFilter;
pub use source::{spawn_watch_source, WatchHandle};

// src/notifier/mod.rs

//! Delivery of wire payloads to the remote media service.

pub mod backend;

pub use backend::{HttpNotifier, Notifier};

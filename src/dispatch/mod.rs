// src/dispatch/mod.rs

//! Event classification and dispatch core.
//!
//! This module ties together:
//! - the pure classifier mapping one event to exactly one intent
//! - the pure path normalizer (parent folder derivation, quote escaping)
//! - the wire payload builder (one body shape per HTTP verb)
//! - the dispatcher loop that reacts to incoming change events
//!
//! The pure mapping semantics live in [`classify`], [`paths`] and
//! [`payload`]; the async IO shell is implemented in [`dispatcher`].

pub mod classify;
pub mod dispatcher;
pub mod paths;
pub mod payload;

pub use classify::{classify, ClassifyRules, SyncIntent};
pub use dispatcher::Dispatcher;
pub use paths::{escape, parent_folder};
pub use payload::{build_payload, ImportBody, PurgeBody, RelocateBody, RequestPayload, Verb};

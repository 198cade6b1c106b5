//! Domain model for the notes widget.
//!
//! # Responsibility
//! - Define the canonical note record owned by the state store.
//! - Keep validation of user-authored fields next to the data it guards.
//!
//! # Invariants
//! - Every note is identified by a stable `NoteId` that is never reused.
//! - A stored note always has non-empty, trimmed title and content.

pub mod note;

//! Snippet domain model.
//!
//! # Responsibility
//! - Define the grouped snippet shape shared by store, storage and view.
//! - Own the mutation rules for groups and blocks.
//!
//! # Invariants
//! - At most one `Group` per tag (case-sensitive, exact match).
//! - Every persisted `Group` holds at least one block.

pub mod collection;

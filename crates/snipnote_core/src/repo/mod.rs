//! Repository layer between the snippet store and durable storage.
//!
//! # Responsibility
//! - Define the load/save contract the store persists through.
//! - Isolate payload encoding from key-value backend details.
//!
//! # Invariants
//! - Read paths reject invalid persisted state instead of masking it; the
//!   store decides how to recover.

pub mod collection_repo;

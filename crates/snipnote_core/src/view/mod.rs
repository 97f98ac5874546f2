//! Presentation state and action dispatch for the snippet UI.
//!
//! # Responsibility
//! - Hold all UI state (form, expanded panel, edit target, notice) in one
//!   explicit `AppState` value.
//! - Translate user actions into store mutations and state transitions.
//! - Produce a render-ready `ViewModel` snapshot for any front end.
//!
//! # Invariants
//! - At most one group is expanded and at most one block is in edit mode.
//! - Edit/expanded indices never point past the collection after a deletion.

pub mod app;
pub mod render;
pub mod state;
pub mod suggest;

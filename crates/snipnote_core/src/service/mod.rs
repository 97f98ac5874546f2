//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate model mutations and repository persistence.
//! - Keep UI/FFI layers decoupled from storage details.

pub mod snippet_service;

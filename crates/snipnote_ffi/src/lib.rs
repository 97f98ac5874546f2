//! Flutter-facing bindings for SnipNote core.

pub mod api;

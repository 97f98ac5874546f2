//! Core domain logic for SnipNote, a grouped code snippet manager.
//! This crate is the single source of truth for snippet invariants.

pub mod clipboard;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod storage;
pub mod view;

pub use clipboard::{ClipboardError, ClipboardSink, MemoryClipboard};
pub use config::{AppConfig, ConfigOverrides};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::collection::{BlockRef, BlockRemoval, Collection, CollectionError, Group};
pub use repo::collection_repo::{
    CollectionRepository, KvCollectionRepository, RepoError, RepoResult, DEFAULT_STORAGE_KEY,
};
pub use service::snippet_service::{LoadOutcome, SnippetError, SnippetResult, SnippetStore};
pub use storage::{
    KeyValueStore, MemoryKeyValueStore, SqliteKeyValueStore, StorageError, StorageResult,
};
pub use view::app::{AppError, SnippetApp};
pub use view::render::{BlockView, FormView, PanelView, ViewModel};
pub use view::state::{Action, AppState, FormState, Notice, NoticeLevel, DEFAULT_TAG};
pub use view::suggest::{suggest_tags, LANGUAGE_SUGGESTIONS};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}

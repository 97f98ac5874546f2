//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose snippet store operations to Dart via FRB.
//! - Return whole-collection envelopes so the UI re-renders from one value.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Calls are serialized in-process; each one loads, mutates and saves.

use log::warn;
use snipnote_core::db::open_db;
use snipnote_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    suggest_tags, AppConfig, Collection, ConfigOverrides, KvCollectionRepository, SnippetStore,
    SqliteKeyValueStore,
};
use std::sync::{Mutex, OnceLock};

static FFI_CONFIG: OnceLock<AppConfig> = OnceLock::new();
static STORE_LOCK: Mutex<()> = Mutex::new(());

/// Minimal health-check API for FRB smoke integration.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// One language group as seen by Dart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnippetGroupItem {
    pub tag: String,
    pub blocks: Vec<String>,
}

/// Response envelope shared by all snippet calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnippetResponse {
    /// Whether the operation succeeded.
    pub ok: bool,
    /// Human-readable message for diagnostics/UI; carries load warnings too.
    pub message: String,
    /// Collection after the call (unchanged on failure).
    pub groups: Vec<SnippetGroupItem>,
}

/// Lists the stored collection.
#[flutter_rust_bridge::frb(sync)]
pub fn snippets_list() -> SnippetResponse {
    with_store("snippets_list", |_| Ok("Loaded.".to_string()))
}

/// Appends a block under `tag`, creating the group if needed.
#[flutter_rust_bridge::frb(sync)]
pub fn snippet_add(tag: String, text: String) -> SnippetResponse {
    with_store("snippet_add", |store| {
        store
            .add_or_append_block(tag, text)
            .map(|_| "Snippet saved.".to_string())
    })
}

/// Replaces one block.
#[flutter_rust_bridge::frb(sync)]
pub fn snippet_update(group_index: u32, block_index: u32, text: String) -> SnippetResponse {
    with_store("snippet_update", |store| {
        store
            .update_block(group_index as usize, block_index as usize, text)
            .map(|()| "Snippet updated.".to_string())
    })
}

/// Deletes one block; the group goes with its last block.
#[flutter_rust_bridge::frb(sync)]
pub fn snippet_delete_block(group_index: u32, block_index: u32) -> SnippetResponse {
    with_store("snippet_delete_block", |store| {
        store
            .delete_block(group_index as usize, block_index as usize)
            .map(|removal| {
                if removal.group_removed {
                    "Snippet and empty group deleted.".to_string()
                } else {
                    "Snippet deleted.".to_string()
                }
            })
    })
}

/// Deletes a whole group.
#[flutter_rust_bridge::frb(sync)]
pub fn snippet_delete_group(group_index: u32) -> SnippetResponse {
    with_store("snippet_delete_group", |store| {
        store
            .delete_group(group_index as usize)
            .map(|group| format!("Group `{}` deleted.", group.tag))
    })
}

/// Tag autocomplete for the form input.
#[flutter_rust_bridge::frb(sync)]
pub fn tag_suggestions(prefix: String) -> Vec<String> {
    let response = snippets_list();
    let collection = Collection::from_groups(
        response
            .groups
            .into_iter()
            .map(|item| snipnote_core::Group {
                tag: item.tag,
                blocks: item.blocks,
            })
            .collect(),
    )
    .unwrap_or_default();
    suggest_tags(prefix.as_str(), &collection)
}

fn ffi_config() -> &'static AppConfig {
    FFI_CONFIG.get_or_init(|| AppConfig::resolve(&ConfigOverrides::default()))
}

type FfiStore<'conn> = SnippetStore<KvCollectionRepository<SqliteKeyValueStore<'conn>>>;

fn with_store(
    call: &'static str,
    f: impl FnOnce(&mut FfiStore<'_>) -> snipnote_core::SnippetResult<String>,
) -> SnippetResponse {
    let _guard = STORE_LOCK
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());

    let conn = match open_db(&ffi_config().db_path) {
        Ok(conn) => conn,
        Err(err) => return failure(call, format!("DB open failed: {err}"), Vec::new()),
    };
    let kv = match SqliteKeyValueStore::try_new(&conn) {
        Ok(kv) => kv,
        Err(err) => return failure(call, format!("storage init failed: {err}"), Vec::new()),
    };
    let repo = KvCollectionRepository::with_key(kv, ffi_config().storage_key.as_str());
    let (mut store, outcome) = match SnippetStore::open(repo) {
        Ok(opened) => opened,
        Err(err) => return failure(call, format!("load failed: {err}"), Vec::new()),
    };

    let result = f(&mut store);
    let groups = to_group_items(store.collection());
    let load_warning = outcome.warning();
    match result {
        Ok(message) => SnippetResponse {
            ok: true,
            message: match load_warning {
                Some(warning) => format!("{warning} {message}"),
                None => message,
            },
            groups,
        },
        Err(err) => failure(call, err.to_string(), groups),
    }
}

fn failure(call: &str, reason: String, groups: Vec<SnippetGroupItem>) -> SnippetResponse {
    warn!("event=ffi_call module=ffi call={call} status=error error={reason}");
    SnippetResponse {
        ok: false,
        message: format!("{call} failed: {reason}"),
        groups,
    }
}

fn to_group_items(collection: &Collection) -> Vec<SnippetGroupItem> {
    collection
        .groups()
        .iter()
        .map(|group| SnippetGroupItem {
            tag: group.tag.clone(),
            blocks: group.blocks.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{
        core_version, init_logging, ping, snippet_add, snippet_delete_block,
        snippet_delete_group, snippet_update, snippets_list, tag_suggestions,
    };
    use super::{ffi_config, FFI_CONFIG};
    use snipnote_core::{AppConfig, ConfigOverrides};
    use std::sync::{Mutex, MutexGuard, OnceLock};
    use std::time::{SystemTime, UNIX_EPOCH};
    use tempfile::TempDir;

    // Tests share one database file and address groups by index.
    static TEST_LOCK: Mutex<()> = Mutex::new(());
    static TEST_DB_DIR: OnceLock<TempDir> = OnceLock::new();

    /// Serializes storage tests and binds the FFI config to a temp database.
    fn serial() -> MutexGuard<'static, ()> {
        let guard = TEST_LOCK
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let dir = TEST_DB_DIR.get_or_init(|| tempfile::tempdir().expect("create temp dir"));
        FFI_CONFIG.get_or_init(|| {
            let db_path = dir.path().join("ffi.sqlite3");
            let overrides = ConfigOverrides {
                db_path: Some(db_path.to_string_lossy().into_owned()),
                ..ConfigOverrides::default()
            };
            AppConfig::resolve_with(&overrides, |_| None)
        });
        guard
    }

    #[test]
    fn storage_calls_use_temp_database() {
        let _serial = serial();
        let dir = TEST_DB_DIR.get().expect("temp dir initialized");
        assert!(ffi_config().db_path.starts_with(dir.path()));

        let added = snippet_add("temp-db".to_string(), "x".to_string());
        assert!(added.ok, "{}", added.message);
        assert!(dir.path().join("ffi.sqlite3").exists());
        snippet_delete_group(group_index_of("temp-db"));
    }

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_bad_input() {
        assert!(!init_logging("info".to_string(), String::new()).is_empty());
        assert!(!init_logging("verbose".to_string(), "/tmp/logs".to_string()).is_empty());
    }

    #[test]
    fn add_update_and_delete_round_trip_through_storage() {
        let _serial = serial();
        let tag = unique_token("ffi-tag");
        let added = snippet_add(tag.clone(), "first".to_string());
        assert!(added.ok, "{}", added.message);
        snippet_add(tag.clone(), "second".to_string());

        let group_index = group_index_of(&tag);
        let updated = snippet_update(group_index, 1, "second v2".to_string());
        assert!(updated.ok, "{}", updated.message);

        let listed = snippets_list();
        let group = listed
            .groups
            .iter()
            .find(|group| group.tag == tag)
            .expect("group should be listed");
        assert_eq!(group.blocks, vec!["first", "second v2"]);

        let deleted = snippet_delete_block(group_index_of(&tag), 0);
        assert!(deleted.ok, "{}", deleted.message);
        let deleted = snippet_delete_block(group_index_of(&tag), 0);
        assert!(deleted.message.contains("empty group"));
        assert!(!snippets_list().groups.iter().any(|group| group.tag == tag));
    }

    #[test]
    fn out_of_range_calls_fail_with_message() {
        let _serial = serial();
        let response = snippet_delete_group(u32::MAX);
        assert!(!response.ok);
        assert!(response.message.contains("index out of range"));

        let response = snippet_update(u32::MAX, 0, "x".to_string());
        assert!(!response.ok);
    }

    #[test]
    fn suggestions_include_custom_tags() {
        let _serial = serial();
        let tag = unique_token("zz-custom");
        assert!(snippet_add(tag.clone(), "x".to_string()).ok);
        let suggestions = tag_suggestions("zz-custom".to_string());
        assert!(suggestions.contains(&tag));

        snippet_delete_group(group_index_of(&tag));
    }

    fn group_index_of(tag: &str) -> u32 {
        snippets_list()
            .groups
            .iter()
            .position(|group| group.tag == tag)
            .expect("tag should exist") as u32
    }

    fn unique_token(prefix: &str) -> String {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time went backwards")
            .as_nanos();
        format!("{prefix}-{nanos}")
    }
}

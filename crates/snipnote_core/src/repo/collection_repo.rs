//! Collection repository over a key-value store.
//!
//! # Responsibility
//! - Serialize the whole collection as one JSON array under one key.
//! - Reject unreadable or invariant-breaking payloads on read.
//!
//! # Invariants
//! - Every save rewrites the full payload; there are no incremental updates.
//! - A missing key reads as an empty collection.

use crate::model::collection::{Collection, CollectionError, Group};
use crate::storage::{KeyValueStore, StorageError};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage key used when none is configured.
pub const DEFAULT_STORAGE_KEY: &str = "my-snippets";

pub type RepoResult<T> = Result<T, RepoError>;

#[derive(Debug)]
pub enum RepoError {
    Storage(StorageError),
    /// Stored payload exists but cannot be turned into a valid collection.
    StorageCorrupt { key: String, reason: String },
    Serialize(serde_json::Error),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Storage(err) => write!(f, "{err}"),
            Self::StorageCorrupt { key, reason } => {
                write!(f, "stored snippets under `{key}` are corrupt: {reason}")
            }
            Self::Serialize(err) => write!(f, "failed to serialize snippets: {err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            Self::StorageCorrupt { .. } => None,
            Self::Serialize(err) => Some(err),
        }
    }
}

impl From<StorageError> for RepoError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

/// Persistence contract for the snippet collection.
pub trait CollectionRepository {
    /// Reads the stored collection, or an empty one when nothing is stored.
    fn load(&self) -> RepoResult<Collection>;
    /// Overwrites the stored collection.
    fn save(&self, collection: &Collection) -> RepoResult<()>;
}

/// JSON-in-one-key repository.
pub struct KvCollectionRepository<S: KeyValueStore> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> KvCollectionRepository<S> {
    /// Uses `DEFAULT_STORAGE_KEY`.
    pub fn new(store: S) -> Self {
        Self::with_key(store, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl<S: KeyValueStore> CollectionRepository for KvCollectionRepository<S> {
    fn load(&self) -> RepoResult<Collection> {
        let Some(raw) = self.store.get(&self.key)? else {
            return Ok(Collection::new());
        };
        decode_collection(&raw).map_err(|reason| RepoError::StorageCorrupt {
            key: self.key.clone(),
            reason,
        })
    }

    fn save(&self, collection: &Collection) -> RepoResult<()> {
        let payload = serde_json::to_string(collection).map_err(RepoError::Serialize)?;
        self.store.set(&self.key, &payload)?;
        Ok(())
    }
}

fn decode_collection(raw: &str) -> Result<Collection, String> {
    let groups: Vec<Group> = serde_json::from_str(raw).map_err(|err| err.to_string())?;
    Collection::from_groups(groups).map_err(|err| match err {
        CollectionError::InvalidState(details) => details,
        other => other.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::decode_collection;

    #[test]
    fn decode_accepts_legacy_field_names() {
        let collection =
            decode_collection(r#"[{"language":"sql","contents":["select 1;"]}]"#).unwrap();
        assert_eq!(collection.groups()[0].tag, "sql");
        assert_eq!(collection.groups()[0].blocks, vec!["select 1;".to_string()]);
    }

    #[test]
    fn decode_rejects_non_array_payload() {
        assert!(decode_collection(r#"{"tag":"sql"}"#).is_err());
        assert!(decode_collection("not json").is_err());
    }
}

//! Snippet store use-case service.
//!
//! # Responsibility
//! - Own the in-memory collection for one session.
//! - Apply mutations and persist the full collection after each one.
//!
//! # Invariants
//! - In-memory state only changes when the matching save succeeds.
//! - Failed index checks never reach the repository.
//! - Snippet text is never logged; only indices and lengths.

use crate::model::collection::{BlockRef, BlockRemoval, Collection, CollectionError, Group};
use crate::repo::collection_repo::{CollectionRepository, RepoError};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type SnippetResult<T> = Result<T, SnippetError>;

/// Service error for snippet use-cases.
#[derive(Debug)]
pub enum SnippetError {
    /// Target group/block does not exist.
    IndexOutOfRange {
        group: usize,
        block: Option<usize>,
    },
    /// Mutation would break a collection invariant.
    InvalidState(String),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for SnippetError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IndexOutOfRange { group, block } => write!(
                f,
                "{}",
                CollectionError::IndexOutOfRange {
                    group: *group,
                    block: *block,
                }
            ),
            Self::InvalidState(details) => write!(f, "invalid snippet state: {details}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SnippetError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::IndexOutOfRange { .. } | Self::InvalidState(_) => None,
        }
    }
}

impl From<RepoError> for SnippetError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<CollectionError> for SnippetError {
    fn from(value: CollectionError) -> Self {
        match value {
            CollectionError::IndexOutOfRange { group, block } => {
                Self::IndexOutOfRange { group, block }
            }
            CollectionError::InvalidState(details) => Self::InvalidState(details),
        }
    }
}

/// What `load` found in durable storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Stored collection read successfully (possibly empty).
    Loaded { groups: usize },
    /// Stored payload was unreadable; the session starts empty.
    RecoveredFromCorrupt { reason: String },
}

impl LoadOutcome {
    /// User-facing warning for recovered loads.
    pub fn warning(&self) -> Option<String> {
        match self {
            Self::Loaded { .. } => None,
            Self::RecoveredFromCorrupt { reason } => Some(format!(
                "Saved snippets could not be read and were reset: {reason}"
            )),
        }
    }
}

/// Store facade: one collection plus the repository it mirrors to.
pub struct SnippetStore<R: CollectionRepository> {
    repo: R,
    collection: Collection,
}

impl<R: CollectionRepository> SnippetStore<R> {
    /// Creates a store and loads the persisted collection.
    pub fn open(repo: R) -> SnippetResult<(Self, LoadOutcome)> {
        let mut store = Self {
            repo,
            collection: Collection::new(),
        };
        let outcome = store.load()?;
        Ok((store, outcome))
    }

    /// Re-reads the collection from storage, replacing in-memory state.
    ///
    /// Corrupt payloads fall back to an empty collection and are reported in
    /// the returned outcome; backend failures are returned as errors.
    pub fn load(&mut self) -> SnippetResult<LoadOutcome> {
        match self.repo.load() {
            Ok(collection) => {
                let groups = collection.len();
                info!(
                    "event=snippets_load module=service status=ok groups={} blocks={}",
                    groups,
                    collection.block_count()
                );
                self.collection = collection;
                Ok(LoadOutcome::Loaded { groups })
            }
            Err(RepoError::StorageCorrupt { reason, .. }) => {
                warn!(
                    "event=snippets_load module=service status=recovered error_code=storage_corrupt"
                );
                self.collection = Collection::new();
                Ok(LoadOutcome::RecoveredFromCorrupt { reason })
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Read-only snapshot for rendering.
    pub fn collection(&self) -> &Collection {
        &self.collection
    }

    pub fn groups(&self) -> &[Group] {
        self.collection.groups()
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Appends `text` under `tag`, creating the group if the tag is new.
    pub fn add_or_append_block(
        &mut self,
        tag: impl Into<String>,
        text: impl Into<String>,
    ) -> SnippetResult<BlockRef> {
        let text = text.into();
        let text_len = text.len();
        let at = self.commit(|collection| Ok(collection.add_or_append_block(tag, text)))?;
        info!(
            "event=snippet_add module=service status=ok group_index={} block_index={} text_len={}",
            at.group, at.block, text_len
        );
        Ok(at)
    }

    /// Replaces one block's text.
    pub fn update_block(
        &mut self,
        group_index: usize,
        block_index: usize,
        text: impl Into<String>,
    ) -> SnippetResult<()> {
        let at = BlockRef::new(group_index, block_index);
        let text = text.into();
        let text_len = text.len();
        self.commit(|collection| collection.update_block(at, text).map(|_| ()))?;
        info!(
            "event=snippet_update module=service status=ok group_index={} block_index={} text_len={}",
            group_index, block_index, text_len
        );
        Ok(())
    }

    /// Removes one block, and its group when it was the last block.
    pub fn delete_block(
        &mut self,
        group_index: usize,
        block_index: usize,
    ) -> SnippetResult<BlockRemoval> {
        let at = BlockRef::new(group_index, block_index);
        let removal = self.commit(|collection| collection.delete_block(at))?;
        info!(
            "event=snippet_delete module=service status=ok group_index={} block_index={} group_removed={}",
            group_index, block_index, removal.group_removed
        );
        Ok(removal)
    }

    /// Removes a whole group.
    pub fn delete_group(&mut self, group_index: usize) -> SnippetResult<Group> {
        let removed = self.commit(|collection| collection.delete_group(group_index))?;
        info!(
            "event=group_delete module=service status=ok group_index={} blocks={}",
            group_index,
            removed.blocks.len()
        );
        Ok(removed)
    }

    fn commit<T>(
        &mut self,
        mutate: impl FnOnce(&mut Collection) -> Result<T, CollectionError>,
    ) -> SnippetResult<T> {
        let mut next = self.collection.clone();
        let value = mutate(&mut next)?;
        if let Err(err) = self.repo.save(&next) {
            warn!("event=snippets_save module=service status=error error={err}");
            return Err(err.into());
        }
        self.collection = next;
        Ok(value)
    }
}

//! Group/collection model and its mutation rules.
//!
//! # Responsibility
//! - Keep groups ordered by first use of their tag.
//! - Apply add/update/delete operations with explicit index errors.
//!
//! # Invariants
//! - A group emptied by `delete_block` is removed in the same call.
//! - Tags are compared exactly; no case folding or trimming.
//! - Out-of-range indices never mutate the collection.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// All text blocks filed under one language/category tag.
///
/// `language`/`contents` are accepted on read so payloads written by the
/// earlier storage shape still load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    #[serde(alias = "language")]
    pub tag: String,
    #[serde(alias = "contents")]
    pub blocks: Vec<String>,
}

impl Group {
    /// Creates a group holding a single block.
    pub fn new(tag: impl Into<String>, first_block: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            blocks: vec![first_block.into()],
        }
    }
}

/// Position of one block inside a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockRef {
    pub group: usize,
    pub block: usize,
}

impl BlockRef {
    pub fn new(group: usize, block: usize) -> Self {
        Self { group, block }
    }
}

impl Display for BlockRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.group, self.block)
    }
}

/// Result of removing one block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockRemoval {
    /// Text of the removed block.
    pub text: String,
    /// Whether the owning group was removed because it became empty.
    pub group_removed: bool,
}

/// Model-level failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectionError {
    /// Group or block index does not address an existing element.
    IndexOutOfRange {
        group: usize,
        block: Option<usize>,
    },
    /// Loaded data breaks a collection invariant.
    InvalidState(String),
}

impl Display for CollectionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IndexOutOfRange {
                group,
                block: Some(block),
            } => write!(f, "index out of range: block {block} of group {group}"),
            Self::IndexOutOfRange { group, block: None } => {
                write!(f, "index out of range: group {group}")
            }
            Self::InvalidState(details) => write!(f, "invalid collection state: {details}"),
        }
    }
}

impl Error for CollectionError {}

/// Ordered set of groups; the unit of persistence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Collection {
    groups: Vec<Group>,
}

impl Collection {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a collection from groups after checking invariants.
    pub fn from_groups(groups: Vec<Group>) -> Result<Self, CollectionError> {
        let collection = Self { groups };
        collection.validate()?;
        Ok(collection)
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn group(&self, index: usize) -> Option<&Group> {
        self.groups.get(index)
    }

    /// Returns block text at `at`, if present.
    pub fn block(&self, at: BlockRef) -> Option<&str> {
        self.groups
            .get(at.group)
            .and_then(|group| group.blocks.get(at.block))
            .map(String::as_str)
    }

    /// Finds the group index for an exact tag match.
    pub fn position_of(&self, tag: &str) -> Option<usize> {
        self.groups.iter().position(|group| group.tag == tag)
    }

    /// Iterates tags in collection order.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|group| group.tag.as_str())
    }

    /// Total number of blocks across all groups.
    pub fn block_count(&self) -> usize {
        self.groups.iter().map(|group| group.blocks.len()).sum()
    }

    /// Appends `text` to the group named `tag`, creating the group at the end
    /// when the tag is new. Returns the position of the stored block.
    pub fn add_or_append_block(
        &mut self,
        tag: impl Into<String>,
        text: impl Into<String>,
    ) -> BlockRef {
        let tag = tag.into();
        let text = text.into();
        match self.position_of(&tag) {
            Some(group_index) => {
                let blocks = &mut self.groups[group_index].blocks;
                blocks.push(text);
                BlockRef::new(group_index, blocks.len() - 1)
            }
            None => {
                self.groups.push(Group::new(tag, text));
                BlockRef::new(self.groups.len() - 1, 0)
            }
        }
    }

    /// Replaces the block at `at`, returning the previous text.
    pub fn update_block(
        &mut self,
        at: BlockRef,
        text: impl Into<String>,
    ) -> Result<String, CollectionError> {
        let slot = self
            .groups
            .get_mut(at.group)
            .and_then(|group| group.blocks.get_mut(at.block))
            .ok_or(CollectionError::IndexOutOfRange {
                group: at.group,
                block: Some(at.block),
            })?;
        Ok(std::mem::replace(slot, text.into()))
    }

    /// Removes the block at `at`; drops the group when it becomes empty.
    pub fn delete_block(&mut self, at: BlockRef) -> Result<BlockRemoval, CollectionError> {
        let out_of_range = CollectionError::IndexOutOfRange {
            group: at.group,
            block: Some(at.block),
        };
        let group = self.groups.get_mut(at.group).ok_or(out_of_range.clone())?;
        if at.block >= group.blocks.len() {
            return Err(out_of_range);
        }

        let text = group.blocks.remove(at.block);
        let group_removed = group.blocks.is_empty();
        if group_removed {
            self.groups.remove(at.group);
        }

        Ok(BlockRemoval {
            text,
            group_removed,
        })
    }

    /// Removes the whole group at `index`.
    pub fn delete_group(&mut self, index: usize) -> Result<Group, CollectionError> {
        if index >= self.groups.len() {
            return Err(CollectionError::IndexOutOfRange {
                group: index,
                block: None,
            });
        }
        Ok(self.groups.remove(index))
    }

    /// Checks tag uniqueness and the non-empty group rule.
    pub fn validate(&self) -> Result<(), CollectionError> {
        let mut seen = HashSet::with_capacity(self.groups.len());
        for (index, group) in self.groups.iter().enumerate() {
            if group.blocks.is_empty() {
                return Err(CollectionError::InvalidState(format!(
                    "group {index} (`{}`) has no blocks",
                    group.tag
                )));
            }
            if !seen.insert(group.tag.as_str()) {
                return Err(CollectionError::InvalidState(format!(
                    "duplicate tag `{}` at group {index}",
                    group.tag
                )));
            }
        }
        Ok(())
    }
}

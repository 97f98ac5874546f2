//! Explicit UI state and its pure transitions.

use crate::model::collection::BlockRef;

/// Tag the form falls back to after a successful submit.
pub const DEFAULT_TAG: &str = "markdown";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// Single user-visible status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// Current create/edit form inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub tag: String,
    pub text: String,
}

/// User intents the view can dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    SetTag(String),
    SetText(String),
    Submit,
    ToggleGroup(usize),
    EditBlock(BlockRef),
    CancelEdit,
    DeleteBlock(BlockRef),
    DeleteGroup(usize),
    CopyBlock(BlockRef),
    DismissNotice,
}

/// Whole UI state for one session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppState {
    pub form: FormState,
    pub expanded: Option<usize>,
    pub editing: Option<BlockRef>,
    pub notice: Option<Notice>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_editing() {
            "Update"
        } else {
            "Create"
        }
    }

    /// Expands `index`, or collapses it when it is already expanded.
    ///
    /// Edit mode is left as is.
    pub fn toggle_group(&mut self, index: usize) {
        self.expanded = if self.expanded == Some(index) {
            None
        } else {
            Some(index)
        };
    }

    /// Loads a block into the form and tracks it as the edit target.
    pub fn begin_edit(&mut self, at: BlockRef, tag: &str, text: &str) {
        self.form.tag = tag.to_string();
        self.form.text = text.to_string();
        self.editing = Some(at);
    }

    /// Leaves edit mode and clears the form.
    pub fn cancel_edit(&mut self) {
        self.editing = None;
        self.form = FormState::default();
    }

    /// Resets the form after a successful create or update.
    pub fn finish_submit(&mut self) {
        self.editing = None;
        self.form.text.clear();
        self.form.tag = DEFAULT_TAG.to_string();
    }

    /// Re-aligns tracked indices after `at` was removed.
    pub fn after_block_deleted(&mut self, at: BlockRef, group_removed: bool) {
        if group_removed {
            self.after_group_deleted(at.group);
            return;
        }
        if let Some(editing) = self.editing {
            if editing == at {
                self.editing = None;
            } else if editing.group == at.group && editing.block > at.block {
                self.editing = Some(BlockRef::new(editing.group, editing.block - 1));
            }
        }
    }

    /// Re-aligns tracked indices after group `index` was removed.
    pub fn after_group_deleted(&mut self, index: usize) {
        self.expanded = match self.expanded {
            Some(expanded) if expanded == index => None,
            Some(expanded) if expanded > index => Some(expanded - 1),
            other => other,
        };
        self.editing = match self.editing {
            Some(editing) if editing.group == index => None,
            Some(editing) if editing.group > index => {
                Some(BlockRef::new(editing.group - 1, editing.block))
            }
            other => other,
        };
    }

    pub fn set_notice(&mut self, notice: Notice) {
        self.notice = Some(notice);
    }

    pub fn clear_notice(&mut self) {
        self.notice = None;
    }
}

//! Action dispatcher tying UI state, the snippet store and the clipboard.

use super::render::{render, ViewModel};
use super::state::{Action, AppState, Notice};
use crate::clipboard::{ClipboardError, ClipboardSink};
use crate::model::collection::{BlockRef, Collection};
use crate::repo::collection_repo::CollectionRepository;
use crate::service::snippet_service::{SnippetError, SnippetResult, SnippetStore};
use log::{debug, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Failure of one dispatched action.
#[derive(Debug)]
pub enum AppError {
    Snippet(SnippetError),
    Clipboard(ClipboardError),
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Snippet(err) => write!(f, "{err}"),
            Self::Clipboard(err) => write!(f, "{err}"),
        }
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Snippet(err) => Some(err),
            Self::Clipboard(err) => Some(err),
        }
    }
}

impl From<SnippetError> for AppError {
    fn from(value: SnippetError) -> Self {
        Self::Snippet(value)
    }
}

impl From<ClipboardError> for AppError {
    fn from(value: ClipboardError) -> Self {
        Self::Clipboard(value)
    }
}

/// One UI session over a snippet store.
pub struct SnippetApp<R: CollectionRepository, C: ClipboardSink> {
    store: SnippetStore<R>,
    clipboard: C,
    state: AppState,
}

impl<R: CollectionRepository, C: ClipboardSink> SnippetApp<R, C> {
    /// Loads the store and starts with a fresh UI state.
    ///
    /// A corrupt stored payload starts the session empty with a warning notice.
    pub fn open(repo: R, clipboard: C) -> SnippetResult<Self> {
        let (store, outcome) = SnippetStore::open(repo)?;
        let mut state = AppState::new();
        if let Some(warning) = outcome.warning() {
            state.set_notice(Notice::warning(warning));
        }
        Ok(Self {
            store,
            clipboard,
            state,
        })
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn collection(&self) -> &Collection {
        self.store.collection()
    }

    pub fn store(&self) -> &SnippetStore<R> {
        &self.store
    }

    pub fn clipboard(&self) -> &C {
        &self.clipboard
    }

    pub fn render(&self) -> ViewModel {
        render(&self.state, self.store.collection())
    }

    /// Applies one action.
    ///
    /// Failures are also written to the notice so a front end that only
    /// re-renders still shows them.
    pub fn dispatch(&mut self, action: Action) -> Result<(), AppError> {
        debug!("event=ui_action module=view action={}", action_name(&action));
        let result = self.apply(action);
        if let Err(err) = &result {
            warn!("event=ui_action module=view status=error error={err}");
            self.state.set_notice(Notice::error(err.to_string()));
        }
        result
    }

    fn apply(&mut self, action: Action) -> Result<(), AppError> {
        match action {
            Action::SetTag(tag) => self.state.form.tag = tag,
            Action::SetText(text) => self.state.form.text = text,
            Action::Submit => self.submit()?,
            Action::ToggleGroup(index) => {
                self.ensure_group(index)?;
                self.state.toggle_group(index);
            }
            Action::EditBlock(at) => {
                let group = self
                    .store
                    .collection()
                    .group(at.group)
                    .filter(|group| at.block < group.blocks.len())
                    .ok_or_else(|| out_of_range(at))?;
                let (tag, text) = (group.tag.clone(), group.blocks[at.block].clone());
                self.state.begin_edit(at, &tag, &text);
            }
            Action::CancelEdit => self.state.cancel_edit(),
            Action::DeleteBlock(at) => {
                let removal = self.store.delete_block(at.group, at.block)?;
                self.state.after_block_deleted(at, removal.group_removed);
                self.state.set_notice(Notice::info("Snippet deleted."));
            }
            Action::DeleteGroup(index) => {
                let removed = self.store.delete_group(index)?;
                self.state.after_group_deleted(index);
                self.state
                    .set_notice(Notice::info(format!("Group `{}` deleted.", removed.tag)));
            }
            Action::CopyBlock(at) => {
                let text = self
                    .store
                    .collection()
                    .block(at)
                    .ok_or_else(|| out_of_range(at))?;
                self.clipboard.write_text(text)?;
                self.state.set_notice(Notice::info("Copied to clipboard."));
            }
            Action::DismissNotice => self.state.clear_notice(),
        }
        Ok(())
    }

    fn submit(&mut self) -> Result<(), AppError> {
        let text = self.state.form.text.clone();
        match self.state.editing {
            Some(at) => {
                self.store.update_block(at.group, at.block, text)?;
                self.state.set_notice(Notice::info("Snippet updated."));
            }
            None => {
                let tag = self.state.form.tag.clone();
                self.store.add_or_append_block(tag, text)?;
                self.state.set_notice(Notice::info("Snippet saved."));
            }
        }
        self.state.finish_submit();
        Ok(())
    }

    fn ensure_group(&self, index: usize) -> Result<(), AppError> {
        if index < self.store.collection().len() {
            Ok(())
        } else {
            Err(SnippetError::IndexOutOfRange {
                group: index,
                block: None,
            }
            .into())
        }
    }
}

fn out_of_range(at: BlockRef) -> SnippetError {
    SnippetError::IndexOutOfRange {
        group: at.group,
        block: Some(at.block),
    }
}

fn action_name(action: &Action) -> &'static str {
    match action {
        Action::SetTag(_) => "set_tag",
        Action::SetText(_) => "set_text",
        Action::Submit => "submit",
        Action::ToggleGroup(_) => "toggle_group",
        Action::EditBlock(_) => "edit_block",
        Action::CancelEdit => "cancel_edit",
        Action::DeleteBlock(_) => "delete_block",
        Action::DeleteGroup(_) => "delete_group",
        Action::CopyBlock(_) => "copy_block",
        Action::DismissNotice => "dismiss_notice",
    }
}

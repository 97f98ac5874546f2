//! Render snapshot consumed by front ends.
//!
//! Blocks are only listed for the expanded panel; collapsed panels carry
//! their tag and block count.

use super::state::{AppState, Notice};
use super::suggest::suggest_tags;
use crate::model::collection::{BlockRef, Collection};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewModel {
    pub form: FormView,
    pub panels: Vec<PanelView>,
    pub notice: Option<Notice>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    pub tag: String,
    pub text: String,
    pub submit_label: &'static str,
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelView {
    pub index: usize,
    pub tag: String,
    pub expanded: bool,
    pub block_count: usize,
    pub blocks: Vec<BlockView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockView {
    pub index: usize,
    pub text: String,
    /// This block is the current edit target.
    pub editing: bool,
}

/// Builds the view snapshot for `state` over `collection`.
pub fn render(state: &AppState, collection: &Collection) -> ViewModel {
    let panels = collection
        .groups()
        .iter()
        .enumerate()
        .map(|(group_index, group)| {
            let expanded = state.expanded == Some(group_index);
            let blocks = if expanded {
                group
                    .blocks
                    .iter()
                    .enumerate()
                    .map(|(block_index, text)| BlockView {
                        index: block_index,
                        text: text.clone(),
                        editing: state.editing == Some(BlockRef::new(group_index, block_index)),
                    })
                    .collect()
            } else {
                Vec::new()
            };
            PanelView {
                index: group_index,
                tag: group.tag.clone(),
                expanded,
                block_count: group.blocks.len(),
                blocks,
            }
        })
        .collect();

    ViewModel {
        form: FormView {
            tag: state.form.tag.clone(),
            text: state.form.text.clone(),
            submit_label: state.submit_label(),
            suggestions: suggest_tags(&state.form.tag, collection),
        },
        panels,
        notice: state.notice.clone(),
    }
}

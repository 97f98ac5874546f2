//! Plain-text rendering of a `ViewModel`.

use snipnote_core::{NoticeLevel, ViewModel};
use std::fmt::Write;

/// Formats panels, the form line and the notice for a terminal.
pub fn format_view(view: &ViewModel) -> String {
    let mut out = String::new();

    if view.panels.is_empty() {
        out.push_str("(no snippets)\n");
    }
    for panel in &view.panels {
        let marker = if panel.expanded { "v" } else { ">" };
        let _ = writeln!(
            out,
            "{marker} [{}] {} ({} block{})",
            panel.index,
            panel.tag,
            panel.block_count,
            if panel.block_count == 1 { "" } else { "s" }
        );
        for block in &panel.blocks {
            let edit_marker = if block.editing { " *editing*" } else { "" };
            let _ = writeln!(out, "    --- {}:{}{edit_marker}", panel.index, block.index);
            for line in block.text.lines() {
                let _ = writeln!(out, "    {line}");
            }
        }
    }

    let _ = writeln!(
        out,
        "form: tag=`{}` text_lines={} [{}]",
        view.form.tag,
        view.form.text.lines().count(),
        view.form.submit_label
    );

    if let Some(notice) = &view.notice {
        let label = match notice.level {
            NoticeLevel::Info => "info",
            NoticeLevel::Warning => "warning",
            NoticeLevel::Error => "error",
        };
        let _ = writeln!(out, "{label}: {}", notice.message);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::format_view;
    use snipnote_core::{AppState, BlockRef, Collection, Notice};

    #[test]
    fn expanded_panel_lists_blocks_with_edit_marker() {
        let mut collection = Collection::new();
        collection.add_or_append_block("rust", "fn a() {}\nfn b() {}");
        collection.add_or_append_block("sql", "select 1;");
        let mut state = AppState::new();
        state.toggle_group(0);
        state.begin_edit(BlockRef::new(0, 0), "rust", "fn a() {}");
        state.set_notice(Notice::info("Snippet saved."));

        let text = format_view(&snipnote_core::view::render::render(&state, &collection));
        assert!(text.contains("v [0] rust (1 block)"));
        assert!(text.contains("--- 0:0 *editing*"));
        assert!(text.contains("    fn b() {}"));
        assert!(text.contains("> [1] sql (1 block)"));
        assert!(!text.contains("select 1;"));
        assert!(text.contains("[Update]"));
        assert!(text.ends_with("info: Snippet saved.\n"));
    }

    #[test]
    fn empty_collection_says_so() {
        let text = format_view(&snipnote_core::view::render::render(
            &AppState::new(),
            &Collection::new(),
        ));
        assert!(text.starts_with("(no snippets)"));
    }
}

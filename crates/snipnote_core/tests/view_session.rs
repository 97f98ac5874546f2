use snipnote_core::{
    Action, AppError, BlockRef, ClipboardError, KvCollectionRepository, MemoryClipboard,
    MemoryKeyValueStore, NoticeLevel, SnippetApp, SnippetError, DEFAULT_STORAGE_KEY, DEFAULT_TAG,
};

type TestApp = SnippetApp<KvCollectionRepository<MemoryKeyValueStore>, MemoryClipboard>;

fn open_app(kv: &MemoryKeyValueStore, clipboard: MemoryClipboard) -> TestApp {
    SnippetApp::open(KvCollectionRepository::new(kv.clone()), clipboard).unwrap()
}

fn submit(app: &mut TestApp, tag: &str, text: &str) {
    app.dispatch(Action::SetTag(tag.to_string())).unwrap();
    app.dispatch(Action::SetText(text.to_string())).unwrap();
    app.dispatch(Action::Submit).unwrap();
}

#[test]
fn submit_creates_then_appends_and_resets_form() {
    let kv = MemoryKeyValueStore::new();
    let mut app = open_app(&kv, MemoryClipboard::new());

    submit(&mut app, "python", "print(1)");
    submit(&mut app, "python", "print(2)");

    let group = &app.collection().groups()[0];
    assert_eq!(group.tag, "python");
    assert_eq!(group.blocks, vec!["print(1)", "print(2)"]);
    assert_eq!(app.state().form.tag, DEFAULT_TAG);
    assert!(app.state().form.text.is_empty());
}

#[test]
fn edit_loads_form_and_submit_updates_tracked_block() {
    let kv = MemoryKeyValueStore::new();
    let mut app = open_app(&kv, MemoryClipboard::new());
    submit(&mut app, "sql", "select 1;");
    submit(&mut app, "sql", "select 2;");

    app.dispatch(Action::EditBlock(BlockRef::new(0, 1))).unwrap();
    assert_eq!(app.state().form.tag, "sql");
    assert_eq!(app.state().form.text, "select 2;");
    assert_eq!(app.render().form.submit_label, "Update");

    app.dispatch(Action::SetText("select 42;".to_string())).unwrap();
    app.dispatch(Action::Submit).unwrap();

    assert_eq!(app.collection().groups()[0].blocks, vec!["select 1;", "select 42;"]);
    assert_eq!(app.state().editing, None);
    assert_eq!(app.render().form.submit_label, "Create");
}

#[test]
fn at_most_one_group_is_expanded() {
    let kv = MemoryKeyValueStore::new();
    let mut app = open_app(&kv, MemoryClipboard::new());
    submit(&mut app, "a", "1");
    submit(&mut app, "b", "2");

    app.dispatch(Action::ToggleGroup(0)).unwrap();
    app.dispatch(Action::ToggleGroup(1)).unwrap();

    let view = app.render();
    let expanded: Vec<usize> = view
        .panels
        .iter()
        .filter(|panel| panel.expanded)
        .map(|panel| panel.index)
        .collect();
    assert_eq!(expanded, vec![1]);
    assert!(view.panels[0].blocks.is_empty());
    assert_eq!(view.panels[1].blocks[0].text, "2");
}

#[test]
fn toggling_group_keeps_edit_mode() {
    let kv = MemoryKeyValueStore::new();
    let mut app = open_app(&kv, MemoryClipboard::new());
    submit(&mut app, "a", "1");
    submit(&mut app, "b", "2");

    app.dispatch(Action::ToggleGroup(1)).unwrap();
    app.dispatch(Action::EditBlock(BlockRef::new(1, 0))).unwrap();
    app.dispatch(Action::ToggleGroup(0)).unwrap();

    assert_eq!(app.state().editing, Some(BlockRef::new(1, 0)));
    assert_eq!(app.state().expanded, Some(0));
}

#[test]
fn deleting_last_block_removes_group_and_realigns_state() {
    let kv = MemoryKeyValueStore::new();
    let mut app = open_app(&kv, MemoryClipboard::new());
    submit(&mut app, "a", "1");
    submit(&mut app, "b", "2");
    submit(&mut app, "c", "3");

    app.dispatch(Action::ToggleGroup(2)).unwrap();
    app.dispatch(Action::EditBlock(BlockRef::new(2, 0))).unwrap();
    app.dispatch(Action::DeleteBlock(BlockRef::new(0, 0))).unwrap();

    assert_eq!(app.collection().len(), 2);
    assert_eq!(app.state().expanded, Some(1));
    assert_eq!(app.state().editing, Some(BlockRef::new(1, 0)));

    app.dispatch(Action::SetText("three".to_string())).unwrap();
    app.dispatch(Action::Submit).unwrap();
    assert_eq!(app.collection().groups()[1].blocks, vec!["three"]);
}

#[test]
fn deleting_group_under_edit_leaves_edit_mode() {
    let kv = MemoryKeyValueStore::new();
    let mut app = open_app(&kv, MemoryClipboard::new());
    submit(&mut app, "a", "1");
    app.dispatch(Action::EditBlock(BlockRef::new(0, 0))).unwrap();

    app.dispatch(Action::DeleteGroup(0)).unwrap();
    assert!(app.collection().is_empty());
    assert_eq!(app.state().editing, None);
    assert_eq!(app.render().form.submit_label, "Create");
}

#[test]
fn copy_writes_raw_block_text() {
    let kv = MemoryKeyValueStore::new();
    let mut app = open_app(&kv, MemoryClipboard::new());
    submit(&mut app, "bash", "echo \"hi\"\nls -la");

    app.dispatch(Action::CopyBlock(BlockRef::new(0, 0))).unwrap();
    assert_eq!(app.clipboard().contents(), Some("echo \"hi\"\nls -la"));
}

#[test]
fn copy_failure_is_surfaced() {
    let kv = MemoryKeyValueStore::new();
    let mut app = open_app(&kv, MemoryClipboard::unavailable());
    submit(&mut app, "bash", "ls");

    let err = app
        .dispatch(Action::CopyBlock(BlockRef::new(0, 0)))
        .unwrap_err();
    assert!(matches!(err, AppError::Clipboard(ClipboardError::Unavailable(_))));
    let notice = app.state().notice.clone().unwrap();
    assert_eq!(notice.level, NoticeLevel::Error);
    assert!(notice.message.contains("clipboard unavailable"));
}

#[test]
fn bad_indices_report_index_out_of_range() {
    let kv = MemoryKeyValueStore::new();
    let mut app = open_app(&kv, MemoryClipboard::new());
    submit(&mut app, "a", "1");

    for action in [
        Action::ToggleGroup(4),
        Action::EditBlock(BlockRef::new(0, 9)),
        Action::DeleteBlock(BlockRef::new(1, 0)),
        Action::CopyBlock(BlockRef::new(3, 3)),
    ] {
        let err = app.dispatch(action).unwrap_err();
        assert!(matches!(
            err,
            AppError::Snippet(SnippetError::IndexOutOfRange { .. })
        ));
    }
    assert_eq!(app.collection().groups()[0].blocks, vec!["1"]);
}

#[test]
fn corrupt_storage_opens_with_warning_notice() {
    let kv = MemoryKeyValueStore::with_entry(DEFAULT_STORAGE_KEY, "[{]");
    let mut app = open_app(&kv, MemoryClipboard::new());

    let notice = app.render().notice.unwrap();
    assert_eq!(notice.level, NoticeLevel::Warning);
    assert!(app.collection().is_empty());

    app.dispatch(Action::DismissNotice).unwrap();
    assert_eq!(app.state().notice, None);
}

#[test]
fn suggestions_follow_form_tag() {
    let kv = MemoryKeyValueStore::new();
    let mut app = open_app(&kv, MemoryClipboard::new());
    submit(&mut app, "terraform", "resource {}");

    app.dispatch(Action::SetTag("t".to_string())).unwrap();
    assert_eq!(app.render().form.suggestions, vec!["typescript", "terraform"]);
}

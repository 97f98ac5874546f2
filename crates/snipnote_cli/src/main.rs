//! `snipnote` command-line front end.
//!
//! # Responsibility
//! - Resolve configuration and open the SQLite-backed snippet store.
//! - Route one-shot subcommands and the interactive shell through the same
//!   action dispatcher the other front ends use.

mod output;
mod shell;
mod system_clipboard;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::{error, info, warn};
use snipnote_core::db::open_db;
use snipnote_core::{
    init_logging, suggest_tags, Action, AppConfig, BlockRef, ClipboardSink,
    CollectionRepository, ConfigOverrides, KvCollectionRepository, SnippetApp,
    SqliteKeyValueStore,
};
use std::io::{BufRead, Read, Write};
use system_clipboard::{Retention, SystemClipboard};

#[derive(Parser, Debug)]
#[command(name = "snipnote", version, about = "Grouped code snippet manager")]
struct Cli {
    /// SQLite database file (env: SNIPNOTE_DB_PATH).
    #[arg(long, global = true)]
    db: Option<String>,
    /// Storage key holding the collection (env: SNIPNOTE_STORAGE_KEY).
    #[arg(long, global = true)]
    key: Option<String>,
    /// trace|debug|info|warn|error (env: SNIPNOTE_LOG_LEVEL).
    #[arg(long, global = true)]
    log_level: Option<String>,
    /// Absolute directory for rolling log files (env: SNIPNOTE_LOG_DIR).
    #[arg(long, global = true)]
    log_dir: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print all groups; `--expand` shows the blocks of one group.
    List {
        #[arg(long)]
        expand: Option<usize>,
    },
    /// Add a block under a tag; reads stdin when TEXT is omitted.
    Add { tag: String, text: Option<String> },
    /// Replace one block; reads stdin when TEXT is omitted.
    Edit {
        group: usize,
        block: usize,
        text: Option<String>,
    },
    /// Delete one block (and its group when it was the last one).
    Rm { group: usize, block: usize },
    /// Delete a whole group.
    RmGroup { group: usize },
    /// Copy one block to the system clipboard.
    Copy { group: usize, block: usize },
    /// List tag suggestions for a prefix.
    Tags { prefix: Option<String> },
    /// Interactive line-oriented view.
    Shell,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::resolve(&ConfigOverrides {
        db_path: cli.db.clone(),
        storage_key: cli.key.clone(),
        log_level: cli.log_level.clone(),
        log_dir: cli.log_dir.clone(),
    });

    if let Some(log_dir) = config.log_dir.as_deref() {
        if let Err(err) = init_logging(&config.log_level, &log_dir.to_string_lossy()) {
            eprintln!("warning: file logging disabled: {err}");
            warn!("event=logging_init module=cli status=disabled");
        }
    }

    let conn = open_db(&config.db_path)
        .with_context(|| format!("failed to open `{}`", config.db_path.display()))?;
    let kv = SqliteKeyValueStore::try_new(&conn)?;
    let repo = KvCollectionRepository::with_key(kv, config.storage_key.as_str());

    let retention = match cli.command {
        Command::Copy { .. } => Retention::UntilReplaced,
        _ => Retention::Session,
    };
    if retention == Retention::UntilReplaced && cfg!(target_os = "linux") {
        eprintln!("serving clipboard text until another copy replaces it");
    }
    let mut app = SnippetApp::open(repo, SystemClipboard::new(retention))?;
    if let Some(notice) = app.state().notice.clone() {
        warn!("event=snippets_load module=cli status=recovered");
        eprintln!("warning: {}", notice.message);
    }

    let command = command_name(&cli.command);
    info!("event=cli_command module=cli status=start command={command}");
    let stdin = std::io::stdin();
    let result = run_command(&mut app, cli.command, stdin.lock(), std::io::stdout().lock());
    match &result {
        Ok(()) => info!("event=cli_command module=cli status=ok command={command}"),
        Err(err) => {
            error!("event=cli_command module=cli status=error command={command} error={err}")
        }
    }
    result
}

/// Executes one subcommand against an opened app.
///
/// `input` supplies snippet text when it is omitted on the command line and
/// drives the shell.
fn run_command<R, C>(
    app: &mut SnippetApp<R, C>,
    command: Command,
    input: impl BufRead,
    mut out: impl Write,
) -> Result<()>
where
    R: CollectionRepository,
    C: ClipboardSink,
{
    match command {
        Command::List { expand } => {
            if let Some(group) = expand {
                app.dispatch(Action::ToggleGroup(group))?;
            }
            write!(out, "{}", output::format_view(&app.render()))?;
        }
        Command::Add { tag, text } => {
            let text = text_or_read(text, input)?;
            app.dispatch(Action::SetTag(tag))?;
            app.dispatch(Action::SetText(text))?;
            app.dispatch(Action::Submit)?;
            writeln!(out, "saved")?;
        }
        Command::Edit { group, block, text } => {
            let text = text_or_read(text, input)?;
            app.dispatch(Action::EditBlock(BlockRef::new(group, block)))?;
            app.dispatch(Action::SetText(text))?;
            app.dispatch(Action::Submit)?;
            writeln!(out, "updated {group}:{block}")?;
        }
        Command::Rm { group, block } => {
            app.dispatch(Action::DeleteBlock(BlockRef::new(group, block)))?;
            writeln!(out, "deleted {group}:{block}")?;
        }
        Command::RmGroup { group } => {
            app.dispatch(Action::DeleteGroup(group))?;
            writeln!(out, "deleted group {group}")?;
        }
        Command::Copy { group, block } => {
            app.dispatch(Action::CopyBlock(BlockRef::new(group, block)))?;
            writeln!(out, "copied {group}:{block}")?;
        }
        Command::Tags { prefix } => {
            for tag in suggest_tags(prefix.as_deref().unwrap_or(""), app.collection()) {
                writeln!(out, "{tag}")?;
            }
        }
        Command::Shell => shell::run(app, input, out)?,
    }
    Ok(())
}

fn command_name(command: &Command) -> &'static str {
    match command {
        Command::List { .. } => "list",
        Command::Add { .. } => "add",
        Command::Edit { .. } => "edit",
        Command::Rm { .. } => "rm",
        Command::RmGroup { .. } => "rm-group",
        Command::Copy { .. } => "copy",
        Command::Tags { .. } => "tags",
        Command::Shell => "shell",
    }
}

/// Returns `text`, or everything from `input` minus one trailing line break.
fn text_or_read(text: Option<String>, mut input: impl Read) -> Result<String> {
    if let Some(text) = text {
        return Ok(text);
    }
    let mut buffer = String::new();
    input
        .read_to_string(&mut buffer)
        .context("failed to read snippet text from stdin")?;
    if buffer.ends_with('\n') {
        buffer.pop();
        if buffer.ends_with('\r') {
            buffer.pop();
        }
    }
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::{run_command, text_or_read, Command};
    use snipnote_core::{
        AppError, ClipboardError, KvCollectionRepository, MemoryClipboard, MemoryKeyValueStore,
        SnippetApp, SnippetError,
    };

    type TestApp = SnippetApp<KvCollectionRepository<MemoryKeyValueStore>, MemoryClipboard>;

    fn open_app(clipboard: MemoryClipboard) -> TestApp {
        SnippetApp::open(KvCollectionRepository::new(MemoryKeyValueStore::new()), clipboard)
            .unwrap()
    }

    fn run(app: &mut TestApp, command: Command, stdin: &str) -> anyhow::Result<String> {
        let mut out = Vec::new();
        run_command(app, command, stdin.as_bytes(), &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    fn add(app: &mut TestApp, tag: &str, text: &str) {
        let command = Command::Add {
            tag: tag.to_string(),
            text: Some(text.to_string()),
        };
        assert_eq!(run(app, command, "").unwrap(), "saved\n");
    }

    #[test]
    fn add_reads_stdin_and_trims_one_crlf() {
        let mut app = open_app(MemoryClipboard::new());
        let command = Command::Add {
            tag: "bash".to_string(),
            text: None,
        };
        run(&mut app, command, "ls -la\r\ncd ..\r\n").unwrap();
        assert_eq!(app.collection().groups()[0].blocks, vec!["ls -la\r\ncd .."]);
    }

    #[test]
    fn text_argument_wins_over_input() {
        let text = text_or_read(Some("given".to_string()), "ignored".as_bytes()).unwrap();
        assert_eq!(text, "given");
        let text = text_or_read(None, "".as_bytes()).unwrap();
        assert_eq!(text, "");
    }

    #[test]
    fn list_expands_requested_group() {
        let mut app = open_app(MemoryClipboard::new());
        add(&mut app, "python", "print(1)");
        add(&mut app, "sql", "select 1;");

        let printed = run(&mut app, Command::List { expand: Some(1) }, "").unwrap();
        assert!(printed.contains("> [0] python (1 block)"));
        assert!(printed.contains("v [1] sql (1 block)"));
        assert!(printed.contains("    select 1;"));
        assert!(!printed.contains("print(1)"));

        let err = run(&mut app, Command::List { expand: Some(7) }, "").unwrap_err();
        assert!(err.to_string().contains("index out of range: group 7"));
    }

    #[test]
    fn edit_replaces_block_text_from_stdin() {
        let mut app = open_app(MemoryClipboard::new());
        add(&mut app, "rust", "let a = 1;");
        add(&mut app, "rust", "let b = 2;");

        let command = Command::Edit {
            group: 0,
            block: 1,
            text: None,
        };
        assert_eq!(run(&mut app, command, "let b = 3;\n").unwrap(), "updated 0:1\n");
        assert_eq!(
            app.collection().groups()[0].blocks,
            vec!["let a = 1;", "let b = 3;"]
        );
    }

    #[test]
    fn rm_and_rm_group_remove_entries() {
        let mut app = open_app(MemoryClipboard::new());
        add(&mut app, "go", "a");
        add(&mut app, "go", "b");
        add(&mut app, "c", "int x;");

        let printed = run(&mut app, Command::Rm { group: 0, block: 0 }, "").unwrap();
        assert_eq!(printed, "deleted 0:0\n");
        assert_eq!(app.collection().groups()[0].blocks, vec!["b"]);

        run(&mut app, Command::RmGroup { group: 0 }, "").unwrap();
        assert_eq!(app.collection().groups().len(), 1);
        assert_eq!(app.collection().groups()[0].tag, "c");

        let err = run(&mut app, Command::Rm { group: 4, block: 0 }, "").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<AppError>(),
            Some(AppError::Snippet(SnippetError::IndexOutOfRange { .. }))
        ));
    }

    #[test]
    fn copy_writes_clipboard_and_surfaces_failure() {
        let mut app = open_app(MemoryClipboard::new());
        add(&mut app, "sh", "echo hi");
        let printed = run(&mut app, Command::Copy { group: 0, block: 0 }, "").unwrap();
        assert_eq!(printed, "copied 0:0\n");
        assert_eq!(app.clipboard().contents(), Some("echo hi"));

        let mut app = open_app(MemoryClipboard::unavailable());
        add(&mut app, "sh", "echo hi");
        let err = run(&mut app, Command::Copy { group: 0, block: 0 }, "").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<AppError>(),
            Some(AppError::Clipboard(ClipboardError::Unavailable(_)))
        ));
    }

    #[test]
    fn tags_lists_prefix_matches_with_custom_tags() {
        let mut app = open_app(MemoryClipboard::new());
        add(&mut app, "jq", ".items[]");

        let command = Command::Tags {
            prefix: Some("j".to_string()),
        };
        let printed = run(&mut app, command, "").unwrap();
        assert_eq!(printed, "java\njavascript\njson\njq\n");
    }

    #[test]
    fn shell_reads_commands_from_input() {
        let mut app = open_app(MemoryClipboard::new());
        run(&mut app, Command::Shell, "tag yaml\ntext a: 1\nsubmit\nquit\n").unwrap();
        assert_eq!(app.collection().groups()[0].tag, "yaml");
    }
}

//! Line-oriented interactive view.
//!
//! Each input line maps to one `Action` (or a shell-only command) and the
//! view is printed after every state change.

use crate::output::format_view;
use snipnote_core::{Action, BlockRef, ClipboardSink, CollectionRepository, SnippetApp};
use std::io::{BufRead, Write};

const HELP: &str = "\
commands:
  tag <name>           set the form tag
  text <line>          replace the form text
  append <line>        add a line to the form text
  submit               create, or update the block under edit
  toggle <g>           expand/collapse group g
  edit <g> <b>         load block b of group g into the form
  cancel               leave edit mode
  delete <g> <b>       delete block b of group g
  delete-group <g>     delete group g
  copy <g> <b>         copy block b of group g to the clipboard
  show                 print the view
  help                 print this help
  quit                 leave the shell";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Dispatch(Action),
    AppendLine(String),
    Show,
    Help,
    Quit,
    Empty,
}

/// Parses one input line.
pub fn parse_command(line: &str) -> Result<ShellCommand, String> {
    let trimmed = line.trim_end_matches(['\r', '\n']);
    let (word, rest) = match trimmed.trim_start().split_once(' ') {
        Some((word, rest)) => (word, rest),
        None => (trimmed.trim(), ""),
    };

    let command = match word {
        "" => ShellCommand::Empty,
        "tag" => ShellCommand::Dispatch(Action::SetTag(rest.trim().to_string())),
        "text" => ShellCommand::Dispatch(Action::SetText(rest.to_string())),
        "append" => ShellCommand::AppendLine(rest.to_string()),
        "submit" => ShellCommand::Dispatch(Action::Submit),
        "toggle" => ShellCommand::Dispatch(Action::ToggleGroup(parse_index(rest, "group")?)),
        "edit" => ShellCommand::Dispatch(Action::EditBlock(parse_block_ref(rest)?)),
        "cancel" => ShellCommand::Dispatch(Action::CancelEdit),
        "delete" => ShellCommand::Dispatch(Action::DeleteBlock(parse_block_ref(rest)?)),
        "delete-group" => {
            ShellCommand::Dispatch(Action::DeleteGroup(parse_index(rest, "group")?))
        }
        "copy" => ShellCommand::Dispatch(Action::CopyBlock(parse_block_ref(rest)?)),
        "dismiss" => ShellCommand::Dispatch(Action::DismissNotice),
        "show" => ShellCommand::Show,
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" => ShellCommand::Quit,
        other => return Err(format!("unknown command `{other}`; type `help`")),
    };
    Ok(command)
}

/// Runs the shell until `quit` or end of input.
pub fn run<R, C>(
    app: &mut SnippetApp<R, C>,
    input: impl BufRead,
    mut output: impl Write,
) -> std::io::Result<()>
where
    R: CollectionRepository,
    C: ClipboardSink,
{
    write!(output, "{}", format_view(&app.render()))?;
    for line in input.lines() {
        let line = line?;
        match parse_command(&line) {
            Ok(ShellCommand::Quit) => break,
            Ok(ShellCommand::Empty) => {}
            Ok(ShellCommand::Help) => writeln!(output, "{HELP}")?,
            Ok(ShellCommand::Show) => write!(output, "{}", format_view(&app.render()))?,
            Ok(ShellCommand::AppendLine(extra)) => {
                let mut text = app.state().form.text.clone();
                if !text.is_empty() {
                    text.push('\n');
                }
                text.push_str(&extra);
                // Form edits cannot fail.
                let _ = app.dispatch(Action::SetText(text));
            }
            Ok(ShellCommand::Dispatch(action)) => {
                let redraw = !matches!(action, Action::SetTag(_) | Action::SetText(_));
                // Failures land in the notice printed below.
                let _ = app.dispatch(action);
                if redraw {
                    write!(output, "{}", format_view(&app.render()))?;
                }
            }
            Err(message) => writeln!(output, "error: {message}")?,
        }
        output.flush()?;
    }
    Ok(())
}

fn parse_index(raw: &str, what: &str) -> Result<usize, String> {
    let raw = raw.trim();
    raw.parse::<usize>()
        .map_err(|_| format!("expected a {what} index, got `{raw}`"))
}

fn parse_block_ref(raw: &str) -> Result<BlockRef, String> {
    let mut parts = raw.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(group), Some(block), None) => Ok(BlockRef::new(
            parse_index(group, "group")?,
            parse_index(block, "block")?,
        )),
        _ => Err(format!("expected `<group> <block>`, got `{}`", raw.trim())),
    }
}

// Chunk: docs/chunks/headless_frontend - Line commands for the headless front end
//!
//! Parses the line commands the `deskedit` binary reads from stdin.
//!
//! | command | events |
//! |---------|--------|
//! | `type <text>` | typed text; `\n` and `\t` are unescaped |
//! | `key [ctrl+][shift+][alt+]<name>` | one key press |
//! | `click <x> <y>` | press and release |
//! | `move <x> <y>` | pointer move |
//! | `drag <x1> <y1> <x2> <y2>` | press, move, release |
//! | `open <path>`, `new`, `close [i]`, `select <i>`, `save [path]` | documents |
//! | `sidebar [activity]`, `panel [tab]`, `write <tab> <text>` | chrome |
//! | `theme`, `resize <w> <h>`, `show`, `quit` | shell |
//!
//! Blank lines and lines starting with `#` produce no events.

use std::path::PathBuf;
use std::str::FromStr;

use deskedit_input::{Key, KeyEvent, Modifiers, MouseEvent};
use thiserror::Error;

use crate::activity_bar::Activity;
use crate::bottom_panel::PanelTab;
use crate::editor_event::{Command, EditorEvent};

/// Why a line could not be turned into events.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command `{0}`")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error("unknown key `{0}`")]
    UnknownKey(String),
    #[error("unknown activity `{0}`")]
    UnknownActivity(String),
    #[error("unknown panel `{0}`")]
    UnknownPanel(String),
}

/// Parses one input line into the events it stands for.
pub fn parse_line(line: &str) -> Result<Vec<EditorEvent>, CommandError> {
    let line = line.trim_end_matches(['\r', '\n']);
    let trimmed = line.trim_start();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(Vec::new());
    }

    let (name, rest) = match trimmed.split_once(' ') {
        Some((name, rest)) => (name, rest),
        None => (trimmed, ""),
    };
    let args: Vec<&str> = rest.split_whitespace().collect();
    let emit = |command| Ok(vec![EditorEvent::Command(command)]);

    match name {
        "type" => emit(Command::Type(unescape(rest))),
        "key" => {
            let [spec] = args[..] else {
                return Err(CommandError::Usage("key [ctrl+][shift+][alt+]<name>"));
            };
            Ok(vec![EditorEvent::Key(parse_key(spec)?)])
        }
        "click" => {
            let (x, y) = point(&args, "click <x> <y>")?;
            Ok(vec![
                EditorEvent::Mouse(MouseEvent::down(x, y)),
                EditorEvent::Mouse(MouseEvent::up(x, y)),
            ])
        }
        "move" => {
            let (x, y) = point(&args, "move <x> <y>")?;
            Ok(vec![EditorEvent::Mouse(MouseEvent::moved(x, y))])
        }
        "drag" => {
            const USAGE: &str = "drag <x1> <y1> <x2> <y2>";
            let [x1, y1, x2, y2] = args[..] else {
                return Err(CommandError::Usage(USAGE));
            };
            let (x1, y1) = point(&[x1, y1], USAGE)?;
            let (x2, y2) = point(&[x2, y2], USAGE)?;
            Ok(vec![
                EditorEvent::Mouse(MouseEvent::down(x1, y1)),
                EditorEvent::Mouse(MouseEvent::moved(x2, y2)),
                EditorEvent::Mouse(MouseEvent::up(x2, y2)),
            ])
        }
        "open" => match rest.trim() {
            "" => Err(CommandError::Usage("open <path>")),
            path => emit(Command::Open(PathBuf::from(path))),
        },
        "new" => emit(Command::NewFile),
        "close" => match args[..] {
            [] => emit(Command::Close(None)),
            [index] => emit(Command::Close(Some(number(index, "close [index]")?))),
            _ => Err(CommandError::Usage("close [index]")),
        },
        "select" => match args[..] {
            [index] => emit(Command::Select(number(index, "select <index>")?)),
            _ => Err(CommandError::Usage("select <index>")),
        },
        "save" => match rest.trim() {
            "" => emit(Command::Save(None)),
            path => emit(Command::Save(Some(PathBuf::from(path)))),
        },
        "sidebar" => match args[..] {
            [] => emit(Command::SideBar(None)),
            [name] => {
                let activity = Activity::from_name(name)
                    .ok_or_else(|| CommandError::UnknownActivity(name.to_string()))?;
                emit(Command::SideBar(Some(activity)))
            }
            _ => Err(CommandError::Usage("sidebar [activity]")),
        },
        "panel" => match args[..] {
            [] => emit(Command::Panel(None)),
            [name] => emit(Command::Panel(Some(panel_tab(name)?))),
            _ => Err(CommandError::Usage("panel [terminal|output|problems]")),
        },
        "write" => {
            let Some((tab, text)) = rest.trim_start().split_once(' ') else {
                return Err(CommandError::Usage("write <tab> <text>"));
            };
            emit(Command::PanelWrite(panel_tab(tab)?, unescape(text)))
        }
        "theme" => emit(Command::ToggleTheme),
        "resize" => {
            let (width, height) = point(&args, "resize <width> <height>")?;
            emit(Command::ResizeWindow { width, height })
        }
        "show" => emit(Command::Show),
        "quit" | "exit" => Ok(vec![EditorEvent::Quit]),
        other => Err(CommandError::Unknown(other.to_string())),
    }
}

/// Parses `ctrl+shift+x` style key specs.
fn parse_key(spec: &str) -> Result<KeyEvent, CommandError> {
    let mut modifiers = Modifiers::default();
    let mut parts: Vec<&str> = spec.split('+').collect();
    // A trailing `+` means the plus key itself.
    let name = match parts.pop() {
        Some("") if spec.ends_with("++") || spec == "+" => {
            parts.pop();
            "+"
        }
        Some(name) => name,
        None => spec,
    };

    for part in parts {
        match part.to_ascii_lowercase().as_str() {
            "ctrl" | "control" => modifiers.control = true,
            "shift" => modifiers.shift = true,
            "alt" => modifiers.alt = true,
            _ => return Err(CommandError::UnknownKey(spec.to_string())),
        }
    }

    let key = Key::from_name(name).ok_or_else(|| CommandError::UnknownKey(spec.to_string()))?;
    Ok(KeyEvent::new(key, modifiers))
}

fn panel_tab(name: &str) -> Result<PanelTab, CommandError> {
    PanelTab::from_name(name).ok_or_else(|| CommandError::UnknownPanel(name.to_string()))
}

fn number<T: FromStr>(arg: &str, usage: &'static str) -> Result<T, CommandError> {
    arg.parse().map_err(|_| CommandError::Usage(usage))
}

fn point(args: &[&str], usage: &'static str) -> Result<(f32, f32), CommandError> {
    let [x, y] = args[..] else {
        return Err(CommandError::Usage(usage));
    };
    Ok((number(x, usage)?, number(y, usage)?))
}

fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

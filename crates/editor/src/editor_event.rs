// Chunk: docs/chunks/shell_events - Unified event queue
//! Editor event types for the unified event queue.
//!
//! Every event source (keyboard, pointer, the command reader thread) sends
//! one of these through a single channel. The drain loop owns the layout
//! directly and processes events one at a time, so no source ever holds a
//! reference into editor state.

use std::path::PathBuf;

use deskedit_input::{KeyEvent, MouseEvent};

use crate::activity_bar::Activity;
use crate::bottom_panel::PanelTab;

/// A shell-level action that does not come from a key or pointer.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Insert text into the active view as typed input
    Type(String),
    Open(PathBuf),
    NewFile,
    /// Close the tab at the index, or the selected tab
    Close(Option<usize>),
    Select(usize),
    /// Save the active buffer, optionally to a new path
    Save(Option<PathBuf>),
    /// Activate an activity bar item, or toggle the side bar
    SideBar(Option<Activity>),
    /// Show a bottom panel tab, or toggle the panel
    Panel(Option<PanelTab>),
    /// Replace the text of a bottom panel tab
    PanelWrite(PanelTab, String),
    ToggleTheme,
    ResizeWindow { width: f32, height: f32 },
    /// Print the current frame
    Show,
}

/// Unified event type for all editor events.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent {
    /// A key press
    Key(KeyEvent),

    /// A pointer event (press, move, release)
    Mouse(MouseEvent),

    Command(Command),

    /// Stop the drain loop
    Quit,
}

impl EditorEvent {
    /// Returns true if this is direct user input (key or pointer).
    pub fn is_user_input(&self) -> bool {
        matches!(self, EditorEvent::Key(_) | EditorEvent::Mouse(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_input_classification() {
        assert!(EditorEvent::Key(KeyEvent::char('a')).is_user_input());
        assert!(EditorEvent::Mouse(MouseEvent::down(1.0, 1.0)).is_user_input());
        assert!(!EditorEvent::Command(Command::Show).is_user_input());
        assert!(!EditorEvent::Quit.is_user_input());
    }
}

// Chunk: docs/chunks/text_surface - Editable text surface
//!
//! The editable surface a view displays.
//!
//! [`TextSurface`] is the seam between the view state and whatever widget
//! shows the text. A surface reports edits and cursor moves as
//! [`SurfaceEvent`]s that its owner drains after each input event; it never
//! calls back into the owner. Notifications can be suspended so a
//! programmatic `set_text` does not read as a user edit.
//!
//! [`EntrySurface`] is the in-memory implementation used by the shell: a
//! multi-line entry with a character-addressed cursor.

use deskedit_buffer::Loc;
use deskedit_input::{Key, KeyEvent};

/// A notification raised by the surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceEvent {
    /// The text changed through user input. Carries the full new text.
    ContentChanged(String),
    /// The cursor moved.
    CursorChanged(Loc),
}

/// An editable text widget.
pub trait TextSurface {
    /// The full displayed text, lines joined by `\n`.
    fn text(&self) -> String;

    /// Replaces the displayed text. Raises `ContentChanged` unless
    /// notifications are suspended.
    fn set_text(&mut self, text: &str);

    /// Stops raising notifications until `resume_notifications`.
    fn suspend_notifications(&mut self);

    fn resume_notifications(&mut self);

    fn is_focused(&self) -> bool;

    fn set_focused(&mut self, focused: bool);

    fn cursor(&self) -> Loc;

    /// Applies a key press. Returns true if the key was consumed.
    fn handle_key(&mut self, event: &KeyEvent) -> bool;

    /// Inserts `text` at the cursor as if typed.
    fn type_text(&mut self, text: &str);

    /// Drains notifications raised since the last call.
    fn take_events(&mut self) -> Vec<SurfaceEvent>;
}

/// In-memory multi-line entry.
#[derive(Debug)]
pub struct EntrySurface {
    lines: Vec<String>,
    cursor: Loc,
    focused: bool,
    suspended: bool,
    events: Vec<SurfaceEvent>,
}

impl Default for EntrySurface {
    fn default() -> Self {
        Self::new()
    }
}

impl EntrySurface {
    pub fn new() -> Self {
        Self {
            lines: vec![String::new()],
            cursor: Loc::ORIGIN,
            focused: false,
            suspended: false,
            events: Vec::new(),
        }
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Moves the cursor, clamped to existing text.
    pub fn set_cursor(&mut self, loc: Loc) {
        let y = loc.y.min(self.lines.len() - 1);
        let x = loc.x.min(char_len(&self.lines[y]));
        self.move_cursor(Loc::new(x, y));
    }

    fn move_cursor(&mut self, loc: Loc) {
        if loc != self.cursor {
            self.cursor = loc;
            self.notify(SurfaceEvent::CursorChanged(loc));
        }
    }

    fn notify(&mut self, event: SurfaceEvent) {
        if !self.suspended {
            self.events.push(event);
        }
    }

    fn content_changed(&mut self) {
        if !self.suspended {
            let text = self.text();
            self.events.push(SurfaceEvent::ContentChanged(text));
        }
    }

    fn current_line_len(&self) -> usize {
        char_len(&self.lines[self.cursor.y])
    }

    fn insert_char(&mut self, ch: char) {
        let Loc { x, y } = self.cursor;
        if ch == '\n' {
            let at = byte_index(&self.lines[y], x);
            let rest = self.lines[y].split_off(at);
            self.lines.insert(y + 1, rest);
            self.cursor = Loc::new(0, y + 1);
        } else {
            let at = byte_index(&self.lines[y], x);
            self.lines[y].insert(at, ch);
            self.cursor = Loc::new(x + 1, y);
        }
    }

    fn backspace(&mut self) -> bool {
        let Loc { x, y } = self.cursor;
        if x > 0 {
            let at = byte_index(&self.lines[y], x - 1);
            self.lines[y].remove(at);
            self.cursor = Loc::new(x - 1, y);
            true
        } else if y > 0 {
            let line = self.lines.remove(y);
            let prev_len = char_len(&self.lines[y - 1]);
            self.lines[y - 1].push_str(&line);
            self.cursor = Loc::new(prev_len, y - 1);
            true
        } else {
            false
        }
    }

    fn delete_forward(&mut self) -> bool {
        let Loc { x, y } = self.cursor;
        if x < self.current_line_len() {
            let at = byte_index(&self.lines[y], x);
            self.lines[y].remove(at);
            true
        } else if y + 1 < self.lines.len() {
            let next = self.lines.remove(y + 1);
            self.lines[y].push_str(&next);
            true
        } else {
            false
        }
    }

    fn cursor_after_motion(&self, key: &Key) -> Option<Loc> {
        let Loc { x, y } = self.cursor;
        let last = self.lines.len() - 1;
        let loc = match key {
            Key::Left if x > 0 => Loc::new(x - 1, y),
            Key::Left if y > 0 => Loc::new(char_len(&self.lines[y - 1]), y - 1),
            Key::Right if x < self.current_line_len() => Loc::new(x + 1, y),
            Key::Right if y < last => Loc::new(0, y + 1),
            Key::Up if y > 0 => Loc::new(x.min(char_len(&self.lines[y - 1])), y - 1),
            Key::Down if y < last => Loc::new(x.min(char_len(&self.lines[y + 1])), y + 1),
            Key::Home => Loc::new(0, y),
            Key::End => Loc::new(self.current_line_len(), y),
            Key::Left | Key::Right | Key::Up | Key::Down => self.cursor,
            _ => return None,
        };
        Some(loc)
    }
}

impl TextSurface for EntrySurface {
    fn text(&self) -> String {
        self.lines.join("\n")
    }

    fn set_text(&mut self, text: &str) {
        self.lines = text.split('\n').map(str::to_owned).collect();
        let clamped = {
            let y = self.cursor.y.min(self.lines.len() - 1);
            Loc::new(self.cursor.x.min(char_len(&self.lines[y])), y)
        };
        self.cursor = clamped;
        self.content_changed();
    }

    fn suspend_notifications(&mut self) {
        self.suspended = true;
    }

    fn resume_notifications(&mut self) {
        self.suspended = false;
    }

    fn is_focused(&self) -> bool {
        self.focused
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn cursor(&self) -> Loc {
        self.cursor
    }

    fn handle_key(&mut self, event: &KeyEvent) -> bool {
        if event.modifiers.control || event.modifiers.alt {
            return false;
        }

        let before = self.cursor;
        let edited = match &event.key {
            Key::Char(ch) => {
                self.insert_char(*ch);
                true
            }
            Key::Return => {
                self.insert_char('\n');
                true
            }
            Key::Tab => {
                self.insert_char('\t');
                true
            }
            Key::Backspace => self.backspace(),
            Key::Delete => self.delete_forward(),
            Key::Escape => return false,
            motion => {
                if let Some(loc) = self.cursor_after_motion(motion) {
                    self.move_cursor(loc);
                }
                return true;
            }
        };

        if edited {
            self.content_changed();
            if self.cursor != before {
                self.notify(SurfaceEvent::CursorChanged(self.cursor));
            }
        }
        true
    }

    fn type_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        for ch in text.chars() {
            self.insert_char(ch);
        }
        self.content_changed();
        let cursor = self.cursor;
        self.notify(SurfaceEvent::CursorChanged(cursor));
    }

    fn take_events(&mut self) -> Vec<SurfaceEvent> {
        std::mem::take(&mut self.events)
    }
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Byte index of character column `x` in `s`, clamped to the end.
fn byte_index(s: &str, x: usize) -> usize {
    s.char_indices().nth(x).map_or(s.len(), |(i, _)| i)
}

// Chunk: docs/chunks/shell_input - Shared input types
//!
//! Input event types for keyboard and pointer handling.
//!
//! These types abstract over whatever windowing layer drives the shell and
//! give the editor a plain Rust interface. Pointer coordinates are window
//! pixels with the origin at the top-left and y increasing downward.

/// A keyboard event.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyEvent {
    /// The key that was pressed
    pub key: Key,
    /// Modifier keys held during the event
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub fn new(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    /// A single character with no modifiers.
    pub fn char(ch: char) -> Self {
        Self::new(Key::Char(ch), Modifiers::default())
    }

    /// A key with the control modifier held (shortcuts such as Ctrl+S).
    pub fn ctrl(key: Key) -> Self {
        Self::new(
            key,
            Modifiers {
                control: true,
                ..Default::default()
            },
        )
    }
}

/// Modifier keys that can be held during an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub control: bool,
    pub alt: bool,
}

impl Modifiers {
    /// Returns true if no modifier keys are held.
    pub fn is_empty(&self) -> bool {
        !self.shift && !self.control && !self.alt
    }

    /// Returns true if control is the only modifier held.
    pub fn is_control_only(&self) -> bool {
        self.control && !self.shift && !self.alt
    }
}

/// Keys the editing surface understands.
#[derive(Debug, Clone, PartialEq)]
pub enum Key {
    /// A printable character (already accounts for shift state)
    Char(char),
    Backspace,
    Delete,
    Return,
    Tab,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    Escape,
}

impl Key {
    /// Parses a key name as typed on the command line (`"return"`, `"left"`,
    /// or a single character).
    pub fn from_name(name: &str) -> Option<Key> {
        let key = match name.to_ascii_lowercase().as_str() {
            "backspace" => Key::Backspace,
            "delete" | "del" => Key::Delete,
            "return" | "enter" => Key::Return,
            "tab" => Key::Tab,
            "left" => Key::Left,
            "right" => Key::Right,
            "up" => Key::Up,
            "down" => Key::Down,
            "home" => Key::Home,
            "end" => Key::End,
            "escape" | "esc" => Key::Escape,
            _ => {
                let mut chars = name.chars();
                let ch = chars.next()?;
                if chars.next().is_some() {
                    return None;
                }
                Key::Char(ch)
            }
        };
        Some(key)
    }
}

/// A pointer event.
#[derive(Debug, Clone, PartialEq)]
pub struct MouseEvent {
    /// The type of pointer event
    pub kind: MouseEventKind,
    /// Position in window coordinates (pixels from top-left)
    pub position: (f32, f32),
    /// Modifier keys held during the event
    pub modifiers: Modifiers,
    /// Number of consecutive clicks (1 for single, 2 for double, etc.)
    pub click_count: u32,
}

impl MouseEvent {
    pub fn new(kind: MouseEventKind, x: f32, y: f32) -> Self {
        Self {
            kind,
            position: (x, y),
            modifiers: Modifiers::default(),
            click_count: 1,
        }
    }

    pub fn down(x: f32, y: f32) -> Self {
        Self::new(MouseEventKind::Down, x, y)
    }

    pub fn moved(x: f32, y: f32) -> Self {
        Self::new(MouseEventKind::Moved, x, y)
    }

    pub fn up(x: f32, y: f32) -> Self {
        Self::new(MouseEventKind::Up, x, y)
    }

    pub fn x(&self) -> f32 {
        self.position.0
    }

    pub fn y(&self) -> f32 {
        self.position.1
    }
}

/// Kind of pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseEventKind {
    /// Button pressed
    Down,
    /// Button released
    Up,
    /// Pointer moved (with or without a button held)
    Moved,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_event_char() {
        let event = KeyEvent::char('a');
        assert_eq!(event.key, Key::Char('a'));
        assert!(event.modifiers.is_empty());
    }

    #[test]
    fn test_key_event_ctrl() {
        let event = KeyEvent::ctrl(Key::Char('s'));
        assert!(event.modifiers.is_control_only());
    }

    #[test]
    fn test_key_from_name() {
        assert_eq!(Key::from_name("Return"), Some(Key::Return));
        assert_eq!(Key::from_name("x"), Some(Key::Char('x')));
        assert_eq!(Key::from_name("é"), Some(Key::Char('é')));
        assert_eq!(Key::from_name("nonsense"), None);
        assert_eq!(Key::from_name(""), None);
    }

    #[test]
    fn test_mouse_constructors() {
        let event = MouseEvent::down(10.0, 20.0);
        assert_eq!(event.kind, MouseEventKind::Down);
        assert_eq!(event.x(), 10.0);
        assert_eq!(event.y(), 20.0);
        assert_eq!(event.click_count, 1);
    }
}

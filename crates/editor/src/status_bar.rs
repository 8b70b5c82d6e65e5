// Chunk: docs/chunks/status_bar - Status bar labels and panel toggle

use crate::geometry::Rect;

/// Height of the status bar in pixels
pub const STATUS_BAR_HEIGHT: f32 = 20.0;

/// Width of the bottom-panel toggle button at the right end
pub const PANEL_TOGGLE_WIDTH: f32 = 24.0;

/// Encoding label; buffers are always UTF-8.
pub const ENCODING_LABEL: &str = "UTF-8";

/// The status bar along the bottom of the window.
///
/// Left to right: encoding label, message slot, cursor label, and a toggle
/// for the bottom panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusBar {
    message: String,
    cursor_label: String,
}

impl StatusBar {
    pub fn new() -> Self {
        Self {
            message: "Ready".to_string(),
            cursor_label: "Ln 1, Col 1".to_string(),
        }
    }

    pub fn encoding(&self) -> &str {
        ENCODING_LABEL
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = message.into();
    }

    pub fn cursor_label(&self) -> &str {
        &self.cursor_label
    }

    pub fn set_cursor_label(&mut self, label: impl Into<String>) {
        self.cursor_label = label.into();
    }

    /// One-line rendering, `width` columns wide when there is room.
    pub fn render(&self, panel_visible: bool, width: usize) -> String {
        let left = format!(" {}  {}", ENCODING_LABEL, self.message);
        let toggle = if panel_visible { "[v]" } else { "[^]" };
        let right = format!("{}  {} ", self.cursor_label, toggle);
        let used = left.chars().count() + right.chars().count();
        let gap = width.saturating_sub(used).max(1);
        format!("{left}{}{right}", " ".repeat(gap))
    }
}

impl Default for StatusBar {
    fn default() -> Self {
        Self::new()
    }
}

/// Hit area of the bottom-panel toggle inside a status bar at `bounds`.
pub fn panel_toggle_rect(bounds: Rect) -> Rect {
    Rect::new(
        bounds.right() - PANEL_TOGGLE_WIDTH,
        bounds.y,
        PANEL_TOGGLE_WIDTH,
        bounds.height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_labels() {
        let bar = StatusBar::new();
        assert_eq!(bar.encoding(), "UTF-8");
        assert_eq!(bar.message(), "Ready");
        assert_eq!(bar.cursor_label(), "Ln 1, Col 1");
    }

    #[test]
    fn test_render_pads_to_width() {
        let mut bar = StatusBar::new();
        bar.set_message("Lines: 3");
        let line = bar.render(true, 60);
        assert_eq!(line.chars().count(), 60);
        assert!(line.contains("Lines: 3"));
        assert!(line.ends_with("[v] "));
    }

    #[test]
    fn test_render_never_overlaps() {
        let bar = StatusBar::new();
        let line = bar.render(false, 5);
        assert!(line.contains("Ready Ln 1"));
    }

    #[test]
    fn test_panel_toggle_rect_at_right_edge() {
        let rect = panel_toggle_rect(Rect::new(0.0, 748.0, 1024.0, STATUS_BAR_HEIGHT));
        assert_eq!(rect.right(), 1024.0);
        assert!(rect.contains(1010.0, 750.0));
        assert!(!rect.contains(900.0, 750.0));
    }
}

// Chunk: docs/chunks/tab_bar_geometry - Tab bar layout and hit testing
//!
//! Tab bar geometry for the editor area.
//!
//! Geometry is computed by pure functions so it can be tested without any
//! windowing layer. The tab bar is a fixed-height strip at the top of the
//! editor area. Each tab is a rectangle holding a label and a close button
//! on its right edge.
//!
//! Tab widths follow the label's display width (wide characters count as
//! two columns), clamped to `[TAB_MIN_WIDTH, TAB_MAX_WIDTH]`. When tabs
//! overflow the bar, `view_offset` scrolls them horizontally.

use std::collections::HashMap;
use std::path::Path;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

// =============================================================================
// Layout Constants
// =============================================================================

/// Height of the tab bar in pixels
pub const TAB_BAR_HEIGHT: f32 = 28.0;

/// Minimum width of a tab in pixels
pub const TAB_MIN_WIDTH: f32 = 80.0;

/// Maximum width of a tab in pixels
pub const TAB_MAX_WIDTH: f32 = 200.0;

/// Horizontal padding inside each tab
pub const TAB_PADDING_H: f32 = 12.0;

/// Size of the close button (square)
pub const CLOSE_BUTTON_SIZE: f32 = 16.0;

/// Gap between close button and tab label
pub const CLOSE_BUTTON_GAP: f32 = 4.0;

/// Spacing between tabs
pub const TAB_SPACING: f32 = 1.0;

/// Glyph width used when no font metrics are available
pub const DEFAULT_GLYPH_WIDTH: f32 = 8.0;

// =============================================================================
// Geometry Types
// =============================================================================

/// Rectangle describing a close button's hit area.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CloseButtonRect {
    pub x: f32,
    pub y: f32,
    pub size: f32,
}

impl CloseButtonRect {
    pub fn new(x: f32, y: f32, size: f32) -> Self {
        Self { x, y, size }
    }

    /// Returns true if the point (px, py) is inside this close button.
    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px < self.x + self.size && py >= self.y && py < self.y + self.size
    }
}

/// A tab rectangle with hit areas for the tab body and close button.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TabRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub close_button: CloseButtonRect,
    /// Index of the tab in the tab manager
    pub tab_index: usize,
}

impl TabRect {
    pub fn new(
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        close_button: CloseButtonRect,
        tab_index: usize,
    ) -> Self {
        Self {
            x,
            y,
            width,
            height,
            close_button,
            tab_index,
        }
    }

    /// Returns true if the point (px, py) is inside this tab rectangle.
    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px < self.x + self.width && py >= self.y && py < self.y + self.height
    }
}

/// Information about a tab needed for layout and drawing.
#[derive(Debug, Clone, PartialEq)]
pub struct TabInfo {
    pub label: String,
    pub is_active: bool,
    /// Whether the tab's buffer has unsaved changes
    pub is_dirty: bool,
    pub index: usize,
}

/// Computed geometry for the tab bar, in window pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct TabBarGeometry {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Rectangles for each visible tab
    pub tab_rects: Vec<TabRect>,
    pub view_offset: f32,
    /// Total width of all tabs (may exceed visible width)
    pub total_tabs_width: f32,
}

/// What a point in the tab bar lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabBarHit {
    Tab(usize),
    CloseButton(usize),
    /// Inside the bar but past the last tab.
    EmptyArea,
    Outside,
}

// =============================================================================
// Layout
// =============================================================================

/// Width of a tab for `label`, clamped to `[TAB_MIN_WIDTH, TAB_MAX_WIDTH]`.
pub fn calculate_tab_width(label: &str, glyph_width: f32) -> f32 {
    let label_width = label.width() as f32 * glyph_width;
    let content_width =
        TAB_PADDING_H + label_width + CLOSE_BUTTON_GAP + CLOSE_BUTTON_SIZE + TAB_PADDING_H;
    content_width.clamp(TAB_MIN_WIDTH, TAB_MAX_WIDTH)
}

/// Calculates tab rectangles for a bar at `(bar_x, bar_y)` that is
/// `bar_width` wide.
///
/// Only tabs at least partially inside the bar get a rectangle.
pub fn calculate_tab_bar_geometry(
    bar_x: f32,
    bar_y: f32,
    bar_width: f32,
    tabs: &[TabInfo],
    glyph_width: f32,
    view_offset: f32,
) -> TabBarGeometry {
    let bar_width = bar_width.max(0.0);
    let bar_height = TAB_BAR_HEIGHT;

    let mut tab_rects = Vec::with_capacity(tabs.len());
    let mut x = bar_x - view_offset;
    let mut total_tabs_width = 0.0;

    for (idx, tab_info) in tabs.iter().enumerate() {
        let tab_width = calculate_tab_width(&tab_info.label, glyph_width);

        if x + tab_width > bar_x && x < bar_x + bar_width {
            let close_x = x + tab_width - TAB_PADDING_H - CLOSE_BUTTON_SIZE;
            let close_y = bar_y + (bar_height - CLOSE_BUTTON_SIZE) / 2.0;
            let close_button = CloseButtonRect::new(close_x, close_y, CLOSE_BUTTON_SIZE);
            tab_rects.push(TabRect::new(x, bar_y, tab_width, bar_height, close_button, idx));
        }

        if idx > 0 {
            total_tabs_width += TAB_SPACING;
        }
        total_tabs_width += tab_width;
        x += tab_width + TAB_SPACING;
    }

    TabBarGeometry {
        x: bar_x,
        y: bar_y,
        width: bar_width,
        height: bar_height,
        tab_rects,
        view_offset,
        total_tabs_width,
    }
}

/// Resolves what the point `(px, py)` hits. Close buttons win over the tab
/// body they sit on.
pub fn hit_test(geometry: &TabBarGeometry, px: f32, py: f32) -> TabBarHit {
    let inside_bar = px >= geometry.x
        && px < geometry.x + geometry.width
        && py >= geometry.y
        && py < geometry.y + geometry.height;
    if !inside_bar {
        return TabBarHit::Outside;
    }

    for rect in &geometry.tab_rects {
        if rect.close_button.contains(px, py) {
            return TabBarHit::CloseButton(rect.tab_index);
        }
        if rect.contains(px, py) {
            return TabBarHit::Tab(rect.tab_index);
        }
    }
    TabBarHit::EmptyArea
}

/// Smallest view offset that brings tab `index` fully into view, starting
/// from `current_offset`.
pub fn offset_to_reveal(
    tabs: &[TabInfo],
    index: usize,
    bar_width: f32,
    glyph_width: f32,
    current_offset: f32,
) -> f32 {
    let mut left = 0.0;
    for tab in tabs.iter().take(index) {
        left += calculate_tab_width(&tab.label, glyph_width) + TAB_SPACING;
    }
    let Some(tab) = tabs.get(index) else {
        return current_offset;
    };
    let right = left + calculate_tab_width(&tab.label, glyph_width);

    if left < current_offset {
        left
    } else if right > current_offset + bar_width {
        (right - bar_width).max(0.0)
    } else {
        current_offset
    }
}

// =============================================================================
// Labels
// =============================================================================

/// Tab title for a document: the file name, or `fallback` for unnamed ones.
pub fn label_for_path(path: Option<&Path>, fallback: &str) -> String {
    path.and_then(|p| p.file_name())
        .and_then(|name| name.to_str())
        .map(str::to_string)
        .unwrap_or_else(|| fallback.to_string())
}

/// Prefixes duplicate labels with their parent directory name.
///
/// `paths[i]` is the document path behind `tabs[i]`, if any. For example two
/// `main.rs` tabs become `src/main.rs` and `tests/main.rs`.
pub fn disambiguate_labels(tabs: &mut [TabInfo], paths: &[Option<&Path>]) {
    let mut label_counts: HashMap<String, usize> = HashMap::new();
    for tab in tabs.iter() {
        *label_counts.entry(tab.label.clone()).or_insert(0) += 1;
    }

    for (idx, tab_info) in tabs.iter_mut().enumerate() {
        if label_counts.get(&tab_info.label).copied().unwrap_or(0) < 2 {
            continue;
        }
        let parent_name = paths
            .get(idx)
            .copied()
            .flatten()
            .and_then(Path::parent)
            .and_then(Path::file_name)
            .and_then(|n| n.to_str());
        if let Some(parent_name) = parent_name {
            tab_info.label = format!("{}/{}", parent_name, tab_info.label);
        }
    }
}

/// Truncates `label` from the left to at most `max_columns` display
/// columns, marking the cut with `…`. The end of a path stays readable.
pub fn truncate_label_left(label: &str, max_columns: usize) -> String {
    if label.width() <= max_columns {
        return label.to_string();
    }
    if max_columns == 0 {
        return String::new();
    }

    let budget = max_columns - 1;
    let mut used = 0;
    let mut kept: Vec<char> = Vec::new();
    for ch in label.chars().rev() {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        kept.push(ch);
    }
    std::iter::once('…').chain(kept.into_iter().rev()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn glyph() -> f32 {
        DEFAULT_GLYPH_WIDTH
    }

    fn infos(labels: &[&str]) -> Vec<TabInfo> {
        labels
            .iter()
            .enumerate()
            .map(|(i, label)| TabInfo {
                label: label.to_string(),
                is_active: i == 0,
                is_dirty: false,
                index: i,
            })
            .collect()
    }

    // =========================================================================
    // Geometry Tests
    // =========================================================================

    #[test]
    fn test_geometry_with_zero_tabs() {
        let geom = calculate_tab_bar_geometry(40.0, 0.0, 760.0, &[], glyph(), 0.0);
        assert_eq!(geom.x, 40.0);
        assert_eq!(geom.height, TAB_BAR_HEIGHT);
        assert!(geom.tab_rects.is_empty());
        assert_eq!(geom.total_tabs_width, 0.0);
    }

    #[test]
    fn test_geometry_tabs_laid_out_without_overlap() {
        let tabs = infos(&["a.rs", "b.rs", "Untitled-3"]);
        let geom = calculate_tab_bar_geometry(40.0, 0.0, 760.0, &tabs, glyph(), 0.0);
        assert_eq!(geom.tab_rects.len(), 3);
        assert_eq!(geom.tab_rects[0].x, 40.0);
        for i in 1..geom.tab_rects.len() {
            let prev = &geom.tab_rects[i - 1];
            assert!(geom.tab_rects[i].x >= prev.x + prev.width);
        }
    }

    #[test]
    fn test_tab_width_clamped() {
        assert_eq!(calculate_tab_width("a", glyph()), TAB_MIN_WIDTH);
        let long = "a_really_long_file_name_that_will_not_fit.rs";
        assert_eq!(calculate_tab_width(long, glyph()), TAB_MAX_WIDTH);
    }

    #[test]
    fn test_wide_characters_count_double() {
        // Six CJK characters occupy twelve columns.
        let narrow = calculate_tab_width("abcdefghijkl", glyph());
        let wide = calculate_tab_width("文件名文件名", glyph());
        assert_eq!(narrow, wide);
    }

    #[test]
    fn test_view_offset_scrolls_and_clips() {
        let tabs = infos(&["one", "two", "three", "four"]);
        let geom = calculate_tab_bar_geometry(0.0, 0.0, 200.0, &tabs, glyph(), 100.0);
        assert!(geom.tab_rects[0].x < 0.0);
        assert!(geom.tab_rects.iter().all(|r| r.x < 200.0));
        assert!(geom.tab_rects.len() < tabs.len());
    }

    // =========================================================================
    // Hit Testing
    // =========================================================================

    #[test]
    fn test_hit_tab_body_and_close_button() {
        let tabs = infos(&["a.rs", "b.rs"]);
        let geom = calculate_tab_bar_geometry(40.0, 0.0, 760.0, &tabs, glyph(), 0.0);
        let second = geom.tab_rects[1];

        assert_eq!(hit_test(&geom, second.x + 2.0, 10.0), TabBarHit::Tab(1));
        let close = second.close_button;
        assert_eq!(
            hit_test(&geom, close.x + 1.0, close.y + 1.0),
            TabBarHit::CloseButton(1)
        );
    }

    #[test]
    fn test_hit_empty_area_and_outside() {
        let tabs = infos(&["a.rs"]);
        let geom = calculate_tab_bar_geometry(40.0, 0.0, 760.0, &tabs, glyph(), 0.0);
        assert_eq!(hit_test(&geom, 700.0, 10.0), TabBarHit::EmptyArea);
        assert_eq!(hit_test(&geom, 10.0, 10.0), TabBarHit::Outside);
        assert_eq!(hit_test(&geom, 100.0, TAB_BAR_HEIGHT + 1.0), TabBarHit::Outside);
    }

    #[test]
    fn test_offset_to_reveal() {
        let tabs = infos(&["a", "b", "c", "d"]);
        // Each tab is TAB_MIN_WIDTH wide.
        assert_eq!(offset_to_reveal(&tabs, 0, 100.0, glyph(), 50.0), 0.0);
        let offset = offset_to_reveal(&tabs, 3, 100.0, glyph(), 0.0);
        assert_eq!(offset, 3.0 * (TAB_MIN_WIDTH + TAB_SPACING) + TAB_MIN_WIDTH - 100.0);
        assert_eq!(offset_to_reveal(&tabs, 9, 100.0, glyph(), 7.0), 7.0);
    }

    // =========================================================================
    // Label Tests
    // =========================================================================

    #[test]
    fn test_label_for_path() {
        let path = PathBuf::from("/tmp/project/notes.md");
        assert_eq!(label_for_path(Some(&path), "Untitled-1"), "notes.md");
        assert_eq!(label_for_path(None, "Untitled-1"), "Untitled-1");
    }

    #[test]
    fn test_disambiguation_for_duplicate_names() {
        let mut tabs = infos(&["main.rs", "main.rs", "lib.rs"]);
        let a = PathBuf::from("/p/src/main.rs");
        let b = PathBuf::from("/p/tests/main.rs");
        let c = PathBuf::from("/p/src/lib.rs");
        disambiguate_labels(&mut tabs, &[Some(&a), Some(&b), Some(&c)]);
        assert_eq!(tabs[0].label, "src/main.rs");
        assert_eq!(tabs[1].label, "tests/main.rs");
        assert_eq!(tabs[2].label, "lib.rs");
    }

    #[test]
    fn test_disambiguation_skips_unnamed() {
        let mut tabs = infos(&["x", "x"]);
        disambiguate_labels(&mut tabs, &[None, None]);
        assert_eq!(tabs[0].label, "x");
    }

    #[test]
    fn test_left_truncation_preserves_end() {
        assert_eq!(truncate_label_left("short", 10), "short");
        assert_eq!(truncate_label_left("very/long/path/file.rs", 8), "…file.rs");
        // A wide character that would overflow the budget is dropped whole.
        assert_eq!(truncate_label_left("文件名.txt", 7), "…名.txt");
        assert_eq!(truncate_label_left("文件名.txt", 6), "….txt");
        assert_eq!(truncate_label_left("abc", 0), "");
    }
}

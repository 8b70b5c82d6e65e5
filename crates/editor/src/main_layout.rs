// Chunk: docs/chunks/main_layout - Shell layout composition
//!
//! The window layout and everything it composes.
//!
//! `MainLayout` owns the activity bar, the resizable side bar, the tab
//! manager with one [`EditorViewState`] per tab, the bottom panel and the
//! status bar. It also owns the buffer registry the views bind to.
//!
//! Geometry is recomputed with [`calculate_layout`] on every event that
//! changes a dimension: window resize, side bar drag, side bar toggle and
//! bottom panel toggle. The layout always shows at least one tab: closing
//! the last one opens a fresh `Untitled-1`.
//!
//! ```text
//! ┌──┬─────────┬┬──────────────────────────┐
//! │  │         ││ tab bar                  │
//! │A │  side   ││──────────────────────────│
//! │  │  bar    ││ editor                   │
//! │  │         ││──────────────────────────│
//! │  │         ││ bottom panel             │
//! ├──┴─────────┴┴──────────────────────────┤
//! │ status bar                             │
//! └────────────────────────────────────────┘
//! ```

use std::cell::Cell;
use std::fmt;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::Instant;

use deskedit_buffer::{BufferError, BufferId, BufferRegistry, OpenOutcome};
use deskedit_input::{KeyEvent, MouseEvent, MouseEventKind};
use tracing::{debug, info, warn};

use crate::activity_bar::{
    calculate_activity_bar_geometry, Activity, ActivityBar, ActivityHit, SideBarChange,
    ACTIVITY_BAR_WIDTH,
};
use crate::bottom_panel::{BottomPanel, PanelTab};
use crate::context::{AppContext, Theme};
use crate::deferred::earliest;
use crate::editor_view::{EditorViewState, ViewId};
use crate::geometry::Rect;
use crate::resizable_panel::{GeometryError, ResizablePanel, RESIZE_HANDLE_WIDTH};
use crate::settings::SettingsError;
use crate::status_bar::{panel_toggle_rect, StatusBar, STATUS_BAR_HEIGHT};
use crate::tab_bar::{
    calculate_tab_bar_geometry, disambiguate_labels, hit_test, label_for_path, offset_to_reveal,
    TabBarGeometry, TabBarHit, TabInfo, DEFAULT_GLYPH_WIDTH, TAB_BAR_HEIGHT,
};
use crate::tabs::{DoubleTap, TabEntry, TabManager};

/// Window width used when settings do not say otherwise
pub const DEFAULT_WINDOW_WIDTH: f32 = 1024.0;

/// Window height used when settings do not say otherwise
pub const DEFAULT_WINDOW_HEIGHT: f32 = 768.0;

/// Title given to a tab whose buffer has no path.
const UNTITLED_PREFIX: &str = "Untitled";

// =============================================================================
// Geometry
// =============================================================================

/// Rectangles of every layout region, in window pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LayoutRects {
    pub activity_bar: Rect,
    /// Zero width when the side bar is hidden
    pub side_bar: Rect,
    /// Strip at the right edge of the side bar; empty when hidden
    pub resize_handle: Rect,
    pub tab_bar: Rect,
    /// Text area below the tab bar
    pub editor: Rect,
    /// Zero height when the bottom panel is hidden
    pub bottom_panel: Rect,
    pub status_bar: Rect,
}

impl LayoutRects {
    /// Size of the tab container: the tab bar plus the text area.
    pub fn editor_size(&self) -> (f32, f32) {
        (self.editor.width, self.tab_bar.height + self.editor.height)
    }
}

/// Computes the layout for a window.
///
/// `side_bar_width` is `None` when the side bar is hidden. The editor column
/// takes the window width minus the activity bar and the side bar, and the
/// window height minus the status bar and the bottom panel.
pub fn calculate_layout(
    window_width: f32,
    window_height: f32,
    side_bar_width: Option<f32>,
    bottom_panel_height: f32,
) -> LayoutRects {
    let window_width = window_width.max(0.0);
    let window_height = window_height.max(0.0);
    let body_height = (window_height - STATUS_BAR_HEIGHT).max(0.0);

    let side_width = side_bar_width.unwrap_or(0.0);
    let column_x = ACTIVITY_BAR_WIDTH + side_width;
    let column_width = window_width - column_x;
    let bottom_height = bottom_panel_height.clamp(0.0, body_height);
    let container_height = body_height - bottom_height;
    let tab_height = TAB_BAR_HEIGHT.min(container_height);

    let side_bar = Rect::new(ACTIVITY_BAR_WIDTH, 0.0, side_width, body_height);
    let resize_handle = match side_bar_width {
        Some(_) => Rect::new(
            side_bar.right() - RESIZE_HANDLE_WIDTH,
            0.0,
            RESIZE_HANDLE_WIDTH,
            body_height,
        ),
        None => Rect::ZERO,
    };

    LayoutRects {
        activity_bar: Rect::new(0.0, 0.0, ACTIVITY_BAR_WIDTH, body_height),
        side_bar,
        resize_handle,
        tab_bar: Rect::new(column_x, 0.0, column_width, tab_height),
        editor: Rect::new(column_x, tab_height, column_width, container_height - tab_height),
        bottom_panel: Rect::new(column_x, container_height, column_width, bottom_height),
        status_bar: Rect::new(0.0, body_height, window_width, window_height - body_height),
    }
}

// =============================================================================
// Notices and frames
// =============================================================================

/// A non-blocking message for the user, such as a failed open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub message: String,
}

/// Snapshot of what the window shows.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub theme: Theme,
    pub rects: LayoutRects,
    /// The side bar's activity, if the side bar is visible
    pub side_bar: Option<Activity>,
    pub side_bar_width: f32,
    pub tabs: Vec<TabInfo>,
    pub selected: Option<usize>,
    pub text: String,
    pub gutter: String,
    pub status: String,
    /// Selected panel tab and its text, if the panel is visible
    pub bottom_panel: Option<(PanelTab, String)>,
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "deskedit [{}] {}x{}",
            self.theme.name(),
            self.rects.status_bar.width,
            self.rects.status_bar.bottom()
        )?;
        match self.side_bar {
            Some(activity) => writeln!(f, "side bar: {} ({}px)", activity.title(), self.side_bar_width)?,
            None => writeln!(f, "side bar: hidden")?,
        }

        let labels: Vec<String> = self
            .tabs
            .iter()
            .map(|tab| {
                let dirty = if tab.is_dirty { "*" } else { "" };
                if tab.is_active {
                    format!("[{}{}]", tab.label, dirty)
                } else {
                    format!(" {}{} ", tab.label, dirty)
                }
            })
            .collect();
        writeln!(f, "tabs: {}", labels.join("|"))?;

        let mut numbers = self.gutter.lines();
        let width = self.gutter.lines().next().map_or(1, str::len);
        for line in self.text.split('\n') {
            let number = numbers.next().unwrap_or("");
            writeln!(f, "{number:>width$} | {line}")?;
        }

        if let Some((tab, text)) = &self.bottom_panel {
            writeln!(f, "--- {} ---", tab.title())?;
            if !text.is_empty() {
                writeln!(f, "{text}")?;
            }
        }
        write!(f, "{}", self.status)
    }
}

// =============================================================================
// MainLayout
// =============================================================================

/// The composed window: side bar, tabs of editor views, panel and status.
pub struct MainLayout {
    context: AppContext,
    registry: BufferRegistry,
    tabs: TabManager<EditorViewState>,
    panel: ResizablePanel,
    activity_bar: ActivityBar,
    bottom_panel: BottomPanel,
    status_bar: StatusBar,
    double_tap: DoubleTap,
    window_width: f32,
    window_height: f32,
    rects: LayoutRects,
    tab_bar: TabBarGeometry,
    /// Horizontal scroll of the tab bar
    tab_offset: f32,
    /// Width reported by the panel's resize callback, not yet laid out
    resized: Rc<Cell<Option<f32>>>,
    next_view_id: u64,
    notices: Vec<Notice>,
}

impl MainLayout {
    /// Builds the layout from the context's settings and opens `Untitled-1`.
    pub fn new(context: AppContext) -> Result<Self, GeometryError> {
        let settings = context.settings();
        let mut panel = ResizablePanel::new(
            settings.side_bar_width,
            settings.min_side_bar_width,
            settings.max_side_bar_width,
        )?;
        let double_tap = DoubleTap::new(settings.double_tap_ms);
        let (window_width, window_height) = (settings.window_width, settings.window_height);

        let resized = Rc::new(Cell::new(None));
        let sink = Rc::clone(&resized);
        panel.set_on_resize(move |width| sink.set(Some(width)));

        let mut layout = Self {
            context,
            registry: BufferRegistry::new(),
            tabs: TabManager::new(),
            panel,
            activity_bar: ActivityBar::new(),
            bottom_panel: BottomPanel::new(),
            status_bar: StatusBar::new(),
            double_tap,
            window_width,
            window_height,
            rects: LayoutRects::default(),
            tab_bar: calculate_tab_bar_geometry(0.0, 0.0, 0.0, &[], DEFAULT_GLYPH_WIDTH, 0.0),
            tab_offset: 0.0,
            resized,
            next_view_id: 0,
            notices: Vec::new(),
        };
        layout.new_file();
        Ok(layout)
    }

    // ==================== Accessors ====================

    pub fn context(&self) -> &AppContext {
        &self.context
    }

    pub fn registry(&self) -> &BufferRegistry {
        &self.registry
    }

    pub fn tabs(&self) -> &TabManager<EditorViewState> {
        &self.tabs
    }

    /// The view in the selected tab.
    pub fn active_view(&self) -> Option<&EditorViewState> {
        self.tabs.selected().map(|tab| &tab.content)
    }

    pub fn panel(&self) -> &ResizablePanel {
        &self.panel
    }

    pub fn activity_bar(&self) -> &ActivityBar {
        &self.activity_bar
    }

    pub fn bottom_panel(&self) -> &BottomPanel {
        &self.bottom_panel
    }

    pub fn status_bar(&self) -> &StatusBar {
        &self.status_bar
    }

    pub fn rects(&self) -> &LayoutRects {
        &self.rects
    }

    pub fn tab_bar_geometry(&self) -> &TabBarGeometry {
        &self.tab_bar
    }

    /// Takes the notices queued since the last call.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    // ==================== Documents ====================

    /// Opens an empty buffer in a new tab titled `Untitled-{n}`, where `n`
    /// is one more than the current tab count. Returns the tab index.
    pub fn new_file(&mut self) -> usize {
        let title = format!("{}-{}", UNTITLED_PREFIX, self.tabs.tab_count() + 1);
        let buffer = self.registry.create_empty();
        info!(title = %title, "new file");
        self.add_view(title, buffer)
    }

    /// Opens `path` in a tab, or selects the tab already showing it.
    ///
    /// A failure is reported as a notice and a status message; existing tabs
    /// are left alone.
    pub fn open_file(&mut self, path: impl AsRef<Path>) -> Option<usize> {
        let path = path.as_ref();
        match self.registry.open(path) {
            Ok(outcome) => {
                let id = outcome.id();
                if let OpenOutcome::Reused(_) = outcome {
                    if let Some(index) = self.tabs.position(|view| view.buffer_id() == Some(id)) {
                        debug!(index, path = %path.display(), "file already open, selecting tab");
                        self.select_tab(index);
                        return Some(index);
                    }
                }
                let title = label_for_path(
                    self.registry.get(id).and_then(|buffer| buffer.path()),
                    UNTITLED_PREFIX,
                );
                Some(self.add_view(title, id))
            }
            Err(e) => {
                self.report("Open failed", &e);
                None
            }
        }
    }

    fn add_view(&mut self, title: String, buffer: BufferId) -> usize {
        let id = ViewId(self.next_view_id);
        self.next_view_id += 1;

        let mut view = EditorViewState::new(id, self.context.settings());
        view.set_buffer(self.registry.get(buffer).map(|b| (buffer, b)));
        let entry = TabEntry::new(title, view).with_close_hook(|view: &mut EditorViewState| {
            view.close();
        });
        let index = self.tabs.add_entry(entry);
        self.select_tab(index);
        index
    }

    /// Selects the tab at `index`. Out-of-range indices are ignored.
    pub fn select_tab(&mut self, index: usize) -> bool {
        if !self.tabs.select_tab(index) {
            return false;
        }
        self.refresh_status();
        self.relayout();
        true
    }

    /// Closes the tab at `index` and releases its buffer.
    ///
    /// Closing the last tab opens a fresh `Untitled-1` in its place.
    pub fn close_tab(&mut self, index: usize) -> bool {
        let Some(buffer) = self.tabs.get(index).map(|tab| tab.content.buffer_id()) else {
            debug!(index, count = self.tabs.tab_count(), "close_tab out of range");
            return false;
        };
        let Some(closed) = self.tabs.close_tab(index) else {
            return false;
        };
        if let Some(id) = buffer {
            self.registry.close(id);
        }
        info!(index, title = %closed.entry.title, "tab closed");

        if closed.now_empty {
            self.new_file();
        } else {
            self.refresh_status();
            self.relayout();
        }
        true
    }

    /// Saves the selected tab's buffer, flushing pending edits first.
    pub fn save_active(&mut self, now: Instant) -> bool {
        self.save_selected(None, now)
    }

    /// Saves the selected tab's buffer to `path` and retitles the tab.
    pub fn save_active_as(&mut self, path: impl Into<PathBuf>, now: Instant) -> bool {
        self.save_selected(Some(path.into()), now)
    }

    fn save_selected(&mut self, target: Option<PathBuf>, now: Instant) -> bool {
        let Some(index) = self.tabs.selected_index() else {
            return false;
        };
        let Some(tab) = self.tabs.get_mut(index) else {
            return false;
        };
        tab.content.flush(&mut self.registry, now);
        let Some(buffer) = tab.content.buffer_id().and_then(|id| self.registry.get_mut(id)) else {
            debug!(index, "save on a tab without a buffer ignored");
            return false;
        };

        let result = match target {
            Some(path) => buffer.save_as(path),
            None => buffer.save(),
        };
        if let Err(e) = result {
            self.report("Save failed", &e);
            return false;
        }

        let title = label_for_path(buffer.path(), &tab.title);
        info!(index, title = %title, "saved");
        tab.title = title.clone();
        self.refresh_status();
        self.status_bar.set_message(format!("Saved {title}"));
        self.relayout();
        true
    }

    fn report(&mut self, title: &str, error: &BufferError) {
        warn!(error = %error, "{}", title);
        self.status_bar.set_message(format!("Error: {error}"));
        self.notices.push(Notice {
            title: title.to_string(),
            message: error.to_string(),
        });
    }

    // ==================== Keyboard ====================

    /// Sends a key press to the selected view.
    pub fn handle_key(&mut self, event: &KeyEvent, now: Instant) -> bool {
        match self.tabs.selected_mut() {
            Some(tab) => tab.content.handle_key(event, now),
            None => false,
        }
    }

    /// Types `text` into the selected view.
    pub fn type_text(&mut self, text: &str, now: Instant) {
        if let Some(tab) = self.tabs.selected_mut() {
            tab.content.type_text(text, now);
        }
    }

    // ==================== Pointer ====================

    /// Routes a pointer event to the region under it.
    pub fn handle_mouse(&mut self, event: &MouseEvent, now: Instant) {
        let (x, y) = event.position;
        match event.kind {
            MouseEventKind::Down => self.pointer_down(x, y, now),
            MouseEventKind::Moved => self.pointer_moved(x, y),
            MouseEventKind::Up => self.pointer_up(),
        }
    }

    fn pointer_down(&mut self, x: f32, y: f32, now: Instant) {
        if self.rects.resize_handle.contains(x, y) {
            self.panel.press(x);
            return;
        }

        if self.rects.activity_bar.contains(x, y) {
            let geometry = calculate_activity_bar_geometry(self.rects.activity_bar.height);
            match geometry.hit_test(x, y) {
                Some(ActivityHit::Item(activity)) => {
                    self.activate(activity);
                }
                Some(ActivityHit::Settings) => {
                    self.toggle_theme();
                }
                None => {}
            }
            return;
        }

        if panel_toggle_rect(self.rects.status_bar).contains(x, y) {
            self.toggle_bottom_panel();
            return;
        }

        match hit_test(&self.tab_bar, x, y) {
            TabBarHit::CloseButton(index) => {
                self.close_tab(index);
            }
            TabBarHit::Tab(index) => {
                self.select_tab(index);
            }
            TabBarHit::EmptyArea => {
                if self.double_tap.tap(now) {
                    self.new_file();
                }
            }
            TabBarHit::Outside => {
                if self.rects.editor.contains(x, y) {
                    if let Some(tab) = self.tabs.selected_mut() {
                        tab.content.set_cursor_focus(true);
                    }
                }
            }
        }
    }

    fn pointer_moved(&mut self, x: f32, y: f32) {
        if self.panel.is_dragging() {
            self.panel.drag_to(x);
            self.apply_resize();
        } else {
            self.panel.set_hovered(self.rects.resize_handle.contains(x, y));
        }
    }

    fn pointer_up(&mut self) {
        if self.panel.is_dragging() {
            self.panel.release();
            self.context.remember_side_bar_width(self.panel.width());
        }
    }

    /// Lays out again if the panel reported a new width.
    fn apply_resize(&mut self) {
        if let Some(width) = self.resized.take() {
            debug!(width, "side bar resized");
            self.relayout();
        }
    }

    /// Changes the side bar width by `delta`, as a keyboard resize would.
    pub fn adjust_side_bar(&mut self, delta: f32) -> Option<f32> {
        let width = self.panel.adjust_width(delta)?;
        self.apply_resize();
        self.context.remember_side_bar_width(width);
        Some(width)
    }

    // ==================== Chrome ====================

    /// Activates an activity bar item.
    pub fn activate(&mut self, activity: Activity) -> SideBarChange {
        let change = self.activity_bar.activate(activity);
        debug!(?change, "activity bar");
        self.relayout();
        change
    }

    /// Shows or hides the side bar. Returns whether it is now visible.
    pub fn toggle_side_bar(&mut self) -> bool {
        self.activity_bar.toggle_side_bar();
        self.relayout();
        self.activity_bar.is_side_bar_visible()
    }

    /// Shows or hides the bottom panel. Returns whether it is now visible.
    pub fn toggle_bottom_panel(&mut self) -> bool {
        let visible = self.bottom_panel.toggle_visibility();
        self.relayout();
        visible
    }

    /// Shows the bottom panel on `tab`.
    pub fn show_panel(&mut self, tab: PanelTab) {
        self.bottom_panel.show(tab);
        if !self.bottom_panel.is_visible() {
            self.bottom_panel.set_visible(true);
            self.relayout();
        }
    }

    /// Replaces the text of a bottom panel tab.
    pub fn write_to_panel(&mut self, tab: PanelTab, text: impl Into<String>) {
        self.bottom_panel.write(tab, text);
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.context.toggle_theme()
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.context.set_theme(theme);
    }

    /// Lays the window out for a new size.
    pub fn resize_window(&mut self, width: f32, height: f32) {
        if !width.is_finite() || !height.is_finite() {
            debug!(width, height, "non-finite window size ignored");
            return;
        }
        self.window_width = width.max(0.0);
        self.window_height = height.max(0.0);
        self.relayout();
    }

    // ==================== Timers ====================

    /// Runs expired view timers. Returns true if anything changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let selected = self.tabs.selected_index();
        let mut changed = false;

        for (index, tab) in self.tabs.iter_mut().enumerate() {
            let polled = tab.content.poll(now, &mut self.registry);
            if polled.is_idle() {
                continue;
            }
            changed = true;

            let status = tab.content.take_status();
            if Some(index) != selected {
                continue;
            }
            if let Some(status) = status {
                self.status_bar.set_message(status);
            }
            if polled.cursor_refreshed {
                self.status_bar.set_cursor_label(tab.content.cursor_label());
            }
        }

        if changed {
            self.relayout();
        }
        changed
    }

    /// Earliest instant at which [`tick`](Self::tick) has work to do.
    pub fn next_deadline(&self) -> Option<Instant> {
        earliest(self.tabs.iter().map(|tab| tab.content.next_deadline()))
    }

    // ==================== Layout ====================

    fn side_bar_width(&self) -> Option<f32> {
        self.activity_bar
            .is_side_bar_visible()
            .then(|| self.panel.width())
    }

    /// Recomputes every region, then scrolls the tab bar so the selected tab
    /// is in view.
    fn relayout(&mut self) {
        self.rects = calculate_layout(
            self.window_width,
            self.window_height,
            self.side_bar_width(),
            self.bottom_panel.height(),
        );

        let infos = self.tab_infos();
        let bar = self.rects.tab_bar;
        if let Some(index) = self.tabs.selected_index().filter(|_| bar.width > 0.0) {
            self.tab_offset =
                offset_to_reveal(&infos, index, bar.width, DEFAULT_GLYPH_WIDTH, self.tab_offset);
        }
        let mut geometry = calculate_tab_bar_geometry(
            bar.x,
            bar.y,
            bar.width,
            &infos,
            DEFAULT_GLYPH_WIDTH,
            self.tab_offset,
        );
        let max_offset = (geometry.total_tabs_width - bar.width).max(0.0);
        if self.tab_offset > max_offset {
            self.tab_offset = max_offset;
            geometry = calculate_tab_bar_geometry(
                bar.x,
                bar.y,
                bar.width,
                &infos,
                DEFAULT_GLYPH_WIDTH,
                self.tab_offset,
            );
        }
        self.tab_bar = geometry;
    }

    /// Shows the selected view's queued status and cursor position.
    fn refresh_status(&mut self) {
        let Some(tab) = self.tabs.selected_mut() else {
            return;
        };
        if let Some(status) = tab.content.take_status() {
            self.status_bar.set_message(status);
        }
        self.status_bar.set_cursor_label(tab.content.cursor_label());
    }

    fn tab_infos(&self) -> Vec<TabInfo> {
        let selected = self.tabs.selected_index();
        let buffer_of = |view: &EditorViewState| view.buffer_id().and_then(|id| self.registry.get(id));

        let mut infos: Vec<TabInfo> = self
            .tabs
            .iter()
            .enumerate()
            .map(|(index, tab)| TabInfo {
                label: tab.title.clone(),
                is_active: selected == Some(index),
                is_dirty: buffer_of(&tab.content).is_some_and(|b| b.modified()),
                index,
            })
            .collect();
        let paths: Vec<Option<&Path>> = self
            .tabs
            .iter()
            .map(|tab| buffer_of(&tab.content).and_then(|b| b.path()))
            .collect();
        disambiguate_labels(&mut infos, &paths);
        infos
    }

    /// Snapshot of the window content.
    pub fn content(&self) -> Frame {
        let view = self.active_view();
        let columns = (self.rects.status_bar.width / DEFAULT_GLYPH_WIDTH) as usize;
        Frame {
            theme: self.context.theme(),
            rects: self.rects,
            side_bar: self
                .activity_bar
                .is_side_bar_visible()
                .then(|| self.activity_bar.active()),
            side_bar_width: self.panel.width(),
            tabs: self.tab_infos(),
            selected: self.tabs.selected_index(),
            text: view.map(EditorViewState::text).unwrap_or_default(),
            gutter: view.map(|v| v.gutter().text.clone()).unwrap_or_default(),
            status: self.status_bar.render(self.bottom_panel.is_visible(), columns),
            bottom_panel: self.bottom_panel.is_visible().then(|| {
                let tab = self.bottom_panel.selected();
                (tab, self.bottom_panel.text(tab).to_string())
            }),
        }
    }

    /// Tears the layout down and persists settings that changed.
    pub fn shutdown(self) -> Result<(), SettingsError> {
        let Self {
            mut context, panel, ..
        } = self;
        context.remember_side_bar_width(panel.width());
        context.shutdown()
    }
}

impl fmt::Debug for MainLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MainLayout")
            .field("tabs", &self.tabs.titles())
            .field("selected", &self.tabs.selected_index())
            .field("rects", &self.rects)
            .finish()
    }
}

// Chunk: docs/chunks/view_buffer_sync - Debounced view/buffer synchronization
// Chunk: docs/chunks/line_number_gutter - Bounded line-number column
//!
//! Per-tab editor view state.
//!
//! An `EditorViewState` binds one text surface to at most one buffer in the
//! registry. It is the only place where surface edits and buffer content
//! meet:
//!
//! - surface edits go through [`DebouncedSync`] and reach the buffer after
//!   the quiet period, at most once per burst;
//! - [`EditorViewState::set_buffer`] replaces the surface text with the
//!   buffer content without the surface reporting it as an edit;
//! - the gutter is re-rendered on rebind and whenever a sync changes the
//!   line count.
//!
//! ## Lifecycle
//!
//! ```text
//! Unbound ──set_buffer(b)──▶ Bound(b) ──set_buffer(b')──▶ Bound(b') ──close──▶ Closed
//! ```
//!
//! Status messages ("Ready", "No file", "Lines: N") are queued on the view
//! and picked up by the layout with [`EditorViewState::take_status`].

use std::time::Instant;

use deskedit_buffer::{BufferId, BufferRegistry, Loc, TextBuffer};
use deskedit_input::KeyEvent;
use tracing::{debug, info};

use crate::change_detector::{fingerprint, Fingerprint};
use crate::debounced_sync::{
    apply_content, apply_content_exact, DebouncedSync, SyncOutcome, SyncState,
};
use crate::line_numbers::{render_line_numbers, LineNumbers, Padding};
use crate::settings::Settings;
use crate::tabs::TabContent;
use crate::text_surface::{EntrySurface, SurfaceEvent, TextSurface};

/// Status shown after a buffer is bound.
pub const STATUS_READY: &str = "Ready";

/// Status shown when a view is unbound.
pub const STATUS_NO_FILE: &str = "No file";

/// Unique identifier for a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewId(pub u64);

/// What the view is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    Unbound,
    Bound(BufferId),
    Closed,
}

/// What happened during one [`EditorViewState::poll`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewPoll {
    /// Set when the quiet period elapsed.
    pub sync: Option<SyncOutcome>,
    /// Set when the cursor refresh window elapsed.
    pub cursor_refreshed: bool,
}

impl ViewPoll {
    pub fn is_idle(&self) -> bool {
        self.sync.is_none() && !self.cursor_refreshed
    }
}

/// One editor view: a surface, its binding, its sync state and its gutter.
pub struct EditorViewState {
    id: ViewId,
    binding: Binding,
    surface: Box<dyn TextSurface>,
    sync: DebouncedSync,
    /// Fingerprint of the content last pushed to or pulled from the buffer.
    last_fingerprint: Option<Fingerprint>,
    gutter: LineNumbers,
    padding: Padding,
    pending_status: Option<String>,
}

impl EditorViewState {
    /// Creates an unbound view with an in-memory surface.
    pub fn new(id: ViewId, settings: &Settings) -> Self {
        Self::with_surface(id, settings, Box::new(EntrySurface::new()))
    }

    pub fn with_surface(id: ViewId, settings: &Settings, surface: Box<dyn TextSurface>) -> Self {
        let padding = settings.line_number_padding;
        Self {
            id,
            binding: Binding::Unbound,
            gutter: render_line_numbers(&surface.text(), padding),
            surface,
            sync: DebouncedSync::new(settings.sync_debounce_ms, settings.cursor_refresh_ms),
            last_fingerprint: None,
            padding,
            pending_status: None,
        }
    }

    // ==================== Accessors ====================

    pub fn id(&self) -> ViewId {
        self.id
    }

    pub fn binding(&self) -> Binding {
        self.binding
    }

    pub fn buffer_id(&self) -> Option<BufferId> {
        match self.binding {
            Binding::Bound(id) => Some(id),
            _ => None,
        }
    }

    pub fn is_closed(&self) -> bool {
        self.binding == Binding::Closed
    }

    /// The text currently displayed.
    pub fn text(&self) -> String {
        self.surface.text()
    }

    pub fn gutter(&self) -> &LineNumbers {
        &self.gutter
    }

    pub fn cursor(&self) -> Loc {
        self.surface.cursor()
    }

    /// `Ln L, Col C`, one-based.
    pub fn cursor_label(&self) -> String {
        let cursor = self.cursor();
        format!("Ln {}, Col {}", cursor.y + 1, cursor.x + 1)
    }

    pub fn is_focused(&self) -> bool {
        self.surface.is_focused()
    }

    pub fn sync_state(&self) -> SyncState {
        self.sync.state()
    }

    pub fn last_fingerprint(&self) -> Option<Fingerprint> {
        self.last_fingerprint
    }

    /// Earliest instant at which [`poll`](Self::poll) has work to do.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.sync.next_deadline()
    }

    /// Takes the status message queued since the last call.
    pub fn take_status(&mut self) -> Option<String> {
        self.pending_status.take()
    }

    // ==================== Binding ====================

    /// Binds the view to `target`, or unbinds it with `None`.
    ///
    /// Cancels any pending sync, replaces the surface text with the buffer
    /// content while surface notifications are suspended, then renders the
    /// gutter once. Ignored on a closed view.
    pub fn set_buffer(&mut self, target: Option<(BufferId, &TextBuffer)>) {
        if self.is_closed() {
            debug!(view = self.id.0, "set_buffer on closed view ignored");
            return;
        }

        self.sync.cancel();
        let (binding, content, status) = match target {
            Some((id, buffer)) => (Binding::Bound(id), buffer.content(), STATUS_READY),
            None => (Binding::Unbound, String::new(), STATUS_NO_FILE),
        };

        self.surface.suspend_notifications();
        self.surface.set_text(&content);
        self.surface.resume_notifications();
        // Anything raised before the swap refers to content that is gone.
        self.surface.take_events();

        self.binding = binding;
        self.last_fingerprint = self.buffer_id().map(|_| fingerprint(&content));
        self.gutter = render_line_numbers(&content, self.padding);
        self.pending_status = Some(status.to_string());
        debug!(view = self.id.0, ?binding, lines = self.gutter.line_count, "view bound");
    }

    /// Re-reads the bound buffer into the surface.
    pub fn update_from_buffer(&mut self, registry: &BufferRegistry) {
        match self.buffer_id() {
            Some(id) => match registry.get(id) {
                Some(buffer) => self.set_buffer(Some((id, buffer))),
                None => {
                    debug!(view = self.id.0, buffer = id.raw(), "bound buffer is gone, unbinding");
                    self.set_buffer(None);
                }
            },
            None => debug!(view = self.id.0, "update_from_buffer on unbound view ignored"),
        }
    }

    /// Closes the view, dropping any pending sync. Returns the buffer it was
    /// bound to.
    pub fn close(&mut self) -> Option<BufferId> {
        let bound = self.buffer_id();
        self.sync.cancel();
        self.binding = Binding::Closed;
        info!(view = self.id.0, "view closed");
        bound
    }

    // ==================== Input ====================

    /// Applies a key press to the surface and schedules the resulting sync.
    pub fn handle_key(&mut self, event: &KeyEvent, now: Instant) -> bool {
        if self.is_closed() {
            return false;
        }
        let consumed = self.surface.handle_key(event);
        self.dispatch_surface_events(now);
        consumed
    }

    /// Inserts `text` at the cursor as typed input.
    pub fn type_text(&mut self, text: &str, now: Instant) {
        if self.is_closed() {
            return;
        }
        self.surface.type_text(text);
        self.dispatch_surface_events(now);
    }

    pub fn set_cursor_focus(&mut self, focused: bool) {
        self.surface.set_focused(focused);
    }

    fn dispatch_surface_events(&mut self, now: Instant) {
        let focused = self.surface.is_focused();
        for event in self.surface.take_events() {
            match event {
                SurfaceEvent::ContentChanged(content) => {
                    if self.buffer_id().is_some() {
                        self.sync.on_content_changed(content, now);
                    } else {
                        self.gutter = render_line_numbers(&content, self.padding);
                    }
                }
                SurfaceEvent::CursorChanged(_) => {
                    self.sync.on_cursor_changed(focused, now);
                }
            }
        }
    }

    // ==================== Timers ====================

    /// Runs expired timers: writes pending content to the bound buffer and
    /// reports an elapsed cursor refresh window.
    pub fn poll(&mut self, now: Instant, registry: &mut BufferRegistry) -> ViewPoll {
        let mut result = ViewPoll {
            cursor_refreshed: self.sync.poll_cursor_refresh(now),
            ..ViewPoll::default()
        };

        if let Some(content) = self.sync.begin(now) {
            result.sync = self.write_to_buffer(&content, registry, now, apply_content);
            self.sync.finish();
        }
        result
    }

    /// Makes the bound buffer hold exactly the displayed text, without
    /// waiting for the quiet period. Used before a save.
    pub fn flush(&mut self, registry: &mut BufferRegistry, now: Instant) -> Option<SyncOutcome> {
        let content = match self.sync.begin_now() {
            Some(content) => content,
            None => self.surface.text(),
        };
        let outcome = self.write_to_buffer(&content, registry, now, apply_content_exact);
        self.sync.finish();
        outcome
    }

    fn write_to_buffer(
        &mut self,
        content: &str,
        registry: &mut BufferRegistry,
        now: Instant,
        apply: fn(&mut TextBuffer, &str) -> SyncOutcome,
    ) -> Option<SyncOutcome> {
        let id = self.buffer_id()?;
        let Some(buffer) = registry.get_mut(id) else {
            debug!(view = self.id.0, buffer = id.raw(), "sync target missing from registry");
            return None;
        };

        let outcome = apply(buffer, content);
        self.last_fingerprint = Some(fingerprint(content));
        if let SyncOutcome::Applied { line_count } = outcome {
            if line_count != self.gutter.line_count {
                self.gutter = render_line_numbers(content, self.padding);
            }
            self.pending_status = Some(format!("Lines: {line_count}"));
        }

        // Notifications raised while syncing are our own echo.
        self.dispatch_surface_events(now);
        Some(outcome)
    }
}

impl TabContent for EditorViewState {
    fn set_active(&mut self, active: bool) {
        self.surface.set_focused(active);
    }
}

impl std::fmt::Debug for EditorViewState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorViewState")
            .field("id", &self.id)
            .field("binding", &self.binding)
            .field("sync", &self.sync.state())
            .field("lines", &self.gutter.line_count)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deskedit_input::Key;
    use std::time::Duration;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn view() -> EditorViewState {
        EditorViewState::new(ViewId(1), &Settings::default())
    }

    fn bound_view(registry: &mut BufferRegistry, content: &str) -> (EditorViewState, BufferId) {
        let id = registry.insert(TextBuffer::from_str(content));
        let mut view = view();
        view.set_buffer(Some((id, registry.get(id).unwrap())));
        view.take_status();
        (view, id)
    }

    // =========================================================================
    // Binding
    // =========================================================================

    #[test]
    fn test_new_view_is_unbound() {
        let view = view();
        assert_eq!(view.binding(), Binding::Unbound);
        assert_eq!(view.gutter().line_count, 1);
    }

    #[test]
    fn test_set_buffer_shows_content_and_ready() {
        let mut registry = BufferRegistry::new();
        let id = registry.insert(TextBuffer::from_str("a\nb\nc"));
        let mut view = view();

        view.set_buffer(Some((id, registry.get(id).unwrap())));
        assert_eq!(view.text(), "a\nb\nc");
        assert_eq!(view.gutter().line_count, 3);
        assert_eq!(view.take_status().as_deref(), Some(STATUS_READY));
        assert_eq!(view.sync_state(), SyncState::Idle);
        assert_eq!(view.last_fingerprint(), Some(fingerprint("a\nb\nc")));
    }

    #[test]
    fn test_unbind_shows_no_file() {
        let mut registry = BufferRegistry::new();
        let (mut view, _) = bound_view(&mut registry, "text");
        view.set_buffer(None);
        assert_eq!(view.binding(), Binding::Unbound);
        assert_eq!(view.text(), "");
        assert_eq!(view.take_status().as_deref(), Some(STATUS_NO_FILE));
    }

    #[test]
    fn test_rebind_cancels_pending_sync() {
        let mut registry = BufferRegistry::new();
        let (mut view, first) = bound_view(&mut registry, "first");
        let second = registry.insert(TextBuffer::from_str("second buffer"));
        let now = Instant::now();

        view.type_text(" edited", now);
        assert_eq!(view.sync_state(), SyncState::SyncPending);

        view.set_buffer(Some((second, registry.get(second).unwrap())));
        assert_eq!(view.sync_state(), SyncState::Idle);

        let polled = view.poll(now + ms(1000), &mut registry);
        assert!(polled.sync.is_none());
        assert_eq!(registry.get(first).unwrap().content(), "first");
        assert_eq!(view.text(), "second buffer");
    }

    // =========================================================================
    // Sync
    // =========================================================================

    #[test]
    fn test_typing_syncs_after_quiet_period() {
        let mut registry = BufferRegistry::new();
        let (mut view, id) = bound_view(&mut registry, "");
        let now = Instant::now();

        view.type_text("hello", now);
        view.handle_key(&KeyEvent::new(Key::Return, Default::default()), now + ms(100));
        view.type_text("world", now + ms(200));
        assert_eq!(registry.get(id).unwrap().content(), "");

        assert!(view.poll(now + ms(499), &mut registry).sync.is_none());
        let polled = view.poll(now + ms(500), &mut registry);
        assert_eq!(polled.sync, Some(SyncOutcome::Applied { line_count: 2 }));
        assert_eq!(registry.get(id).unwrap().content(), "hello\nworld");
        assert_eq!(view.gutter().line_count, 2);
        assert_eq!(view.take_status().as_deref(), Some("Lines: 2"));
    }

    #[test]
    fn test_flush_writes_pending_immediately() {
        let mut registry = BufferRegistry::new();
        let (mut view, id) = bound_view(&mut registry, "");
        let now = Instant::now();
        view.type_text("draft", now);

        let outcome = view.flush(&mut registry, now);
        assert_eq!(outcome, Some(SyncOutcome::Applied { line_count: 1 }));
        assert_eq!(registry.get(id).unwrap().content(), "draft");
        assert!(view.next_deadline().is_none());
    }

    #[test]
    fn test_unbound_edits_update_gutter_only() {
        let mut registry = BufferRegistry::new();
        let mut view = view();
        let now = Instant::now();
        view.type_text("a\nb", now);
        assert_eq!(view.gutter().line_count, 2);
        assert_eq!(view.sync_state(), SyncState::Idle);
        assert!(view.poll(now + ms(1000), &mut registry).is_idle());
    }

    #[test]
    fn test_sync_to_closed_buffer_is_dropped() {
        let mut registry = BufferRegistry::new();
        let (mut view, id) = bound_view(&mut registry, "");
        let now = Instant::now();
        view.type_text("orphan", now);
        registry.close(id);

        let polled = view.poll(now + ms(300), &mut registry);
        assert!(polled.sync.is_none());
        assert_eq!(view.sync_state(), SyncState::Idle);
    }

    // =========================================================================
    // Cursor refresh
    // =========================================================================

    #[test]
    fn test_cursor_refresh_only_when_focused() {
        let mut registry = BufferRegistry::new();
        let (mut view, _) = bound_view(&mut registry, "abc");
        let now = Instant::now();

        view.handle_key(&KeyEvent::new(Key::End, Default::default()), now);
        assert!(!view.poll(now + ms(200), &mut registry).cursor_refreshed);

        view.set_cursor_focus(true);
        view.handle_key(&KeyEvent::new(Key::Home, Default::default()), now);
        assert!(view.poll(now + ms(200), &mut registry).cursor_refreshed);
        assert_eq!(view.cursor_label(), "Ln 1, Col 1");
    }

    // =========================================================================
    // Closing
    // =========================================================================

    #[test]
    fn test_close_returns_buffer_and_ignores_input() {
        let mut registry = BufferRegistry::new();
        let (mut view, id) = bound_view(&mut registry, "x");
        let now = Instant::now();
        view.type_text("pending", now);

        assert_eq!(view.close(), Some(id));
        assert!(view.is_closed());
        assert!(view.next_deadline().is_none());
        assert!(!view.handle_key(&KeyEvent::char('a'), now));

        view.set_buffer(None);
        assert!(view.is_closed());
    }

    #[test]
    fn test_update_from_buffer_rereads() {
        let mut registry = BufferRegistry::new();
        let (mut view, id) = bound_view(&mut registry, "old");
        registry.get_mut(id).unwrap().replace_all("new\ncontent");

        view.update_from_buffer(&registry);
        assert_eq!(view.text(), "new\ncontent");
        assert_eq!(view.gutter().line_count, 2);
    }
}

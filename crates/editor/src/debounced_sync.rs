// Chunk: docs/chunks/view_buffer_sync - Debounced view/buffer synchronization
//!
//! Debounced propagation of surface edits into the bound buffer.
//!
//! Every keystroke-level edit calls [`DebouncedSync::on_content_changed`].
//! Nothing is written synchronously: each call replaces the pending content
//! and restarts one quiet-period timer. When the timer expires the pending
//! content is compared with the buffer by fingerprint, and at most one
//! buffer rewrite happens (remove the full range, insert at the origin).
//!
//! ```text
//!            on_content_changed            timer expiry
//!   Idle ───────────────────────▶ SyncPending ───────────▶ Syncing ──▶ Idle
//!                                   │    ▲                    │
//!                                   └────┘ replace + re-arm   └ notifications ignored
//! ```
//!
//! The sync also coalesces cursor-driven refresh requests: while a refresh
//! is pending, further cursor moves are absorbed, and requests made while the
//! surface is unfocused are dropped.

use std::time::Instant;

use deskedit_buffer::TextBuffer;
use tracing::debug;

use crate::change_detector::{buffer_fingerprint, fingerprint};
use crate::deferred::{earliest, DeferredTask};

/// Default quiet period before an edit is written to the buffer.
pub const DEFAULT_SYNC_DEBOUNCE_MS: u64 = 300;

/// Default coalescing window for cursor-driven refreshes.
pub const DEFAULT_CURSOR_REFRESH_MS: u64 = 200;

/// Where the sync currently is in its cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    /// No pending content.
    Idle,
    /// Content is waiting for the quiet period to elapse.
    SyncPending,
    /// The buffer is being rewritten; change notifications are our own echo.
    Syncing,
}

/// Result of a completed quiet period.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The buffer was rewritten with the pending content.
    Applied { line_count: usize },
    /// The fingerprints matched; the buffer was left untouched.
    Unchanged,
}

/// Debounce state for one view.
#[derive(Debug)]
pub struct DebouncedSync {
    state: SyncState,
    timer: DeferredTask,
    pending: Option<String>,
    cursor_refresh: DeferredTask,
}

impl DebouncedSync {
    pub fn new(debounce_ms: u64, cursor_refresh_ms: u64) -> Self {
        Self {
            state: SyncState::Idle,
            timer: DeferredTask::from_millis(debounce_ms),
            pending: None,
            cursor_refresh: DeferredTask::from_millis(cursor_refresh_ms),
        }
    }

    pub fn state(&self) -> SyncState {
        self.state
    }

    /// The content that will be written when the timer expires.
    pub fn pending_content(&self) -> Option<&str> {
        self.pending.as_deref()
    }

    /// Records an edit and restarts the quiet period.
    ///
    /// Returns false when the notification was ignored because a sync is
    /// executing.
    pub fn on_content_changed(&mut self, content: String, now: Instant) -> bool {
        if self.state == SyncState::Syncing {
            debug!("content change during sync ignored");
            return false;
        }
        self.pending = Some(content);
        self.timer.arm(now);
        self.state = SyncState::SyncPending;
        true
    }

    /// Starts a sync if the quiet period has elapsed.
    ///
    /// Returns the content to write and moves to `Syncing`. The caller must
    /// call [`finish`](Self::finish) once the write is done.
    pub fn begin(&mut self, now: Instant) -> Option<String> {
        if self.state != SyncState::SyncPending || !self.timer.poll(now) {
            return None;
        }
        self.state = SyncState::Syncing;
        self.pending.take()
    }

    /// Starts a sync immediately if content is pending, without waiting for
    /// the quiet period. Used before a save.
    pub fn begin_now(&mut self) -> Option<String> {
        if self.state != SyncState::SyncPending {
            return None;
        }
        self.timer.cancel();
        self.state = SyncState::Syncing;
        self.pending.take()
    }

    /// Ends the sync started by [`begin`](Self::begin).
    pub fn finish(&mut self) {
        if self.state == SyncState::Syncing {
            self.state = SyncState::Idle;
        }
    }

    /// Polls the timer and, on expiry, writes the pending content into
    /// `buffer`.
    pub fn poll(&mut self, now: Instant, buffer: &mut TextBuffer) -> Option<SyncOutcome> {
        let content = self.begin(now)?;
        let outcome = apply_content(buffer, &content);
        self.finish();
        Some(outcome)
    }

    /// Drops pending content and stops both timers.
    pub fn cancel(&mut self) {
        if self.state == SyncState::SyncPending {
            debug!("pending sync cancelled");
        }
        self.timer.cancel();
        self.cursor_refresh.cancel();
        self.pending = None;
        self.state = SyncState::Idle;
    }

    /// Requests a cursor-driven refresh.
    ///
    /// Returns true if a new refresh window was opened. Requests are dropped
    /// while one is already pending or when the surface is not focused.
    pub fn on_cursor_changed(&mut self, focused: bool, now: Instant) -> bool {
        if !focused {
            return false;
        }
        self.cursor_refresh.arm_if_idle(now)
    }

    /// Returns true once when the cursor refresh window has elapsed.
    pub fn poll_cursor_refresh(&mut self, now: Instant) -> bool {
        self.cursor_refresh.poll(now)
    }

    /// The earliest instant at which `poll` or `poll_cursor_refresh` can
    /// make progress.
    pub fn next_deadline(&self) -> Option<Instant> {
        earliest([self.timer.deadline(), self.cursor_refresh.deadline()])
    }
}

impl Default for DebouncedSync {
    fn default() -> Self {
        Self::new(DEFAULT_SYNC_DEBOUNCE_MS, DEFAULT_CURSOR_REFRESH_MS)
    }
}

/// Writes `content` into `buffer` unless the fingerprints already match.
pub fn apply_content(buffer: &mut TextBuffer, content: &str) -> SyncOutcome {
    if buffer_fingerprint(buffer) == fingerprint(content) {
        debug!("fingerprints match, buffer left untouched");
        return SyncOutcome::Unchanged;
    }

    replace(buffer, content)
}

/// Writes `content` into `buffer` unless the texts are already equal.
///
/// Saves go through this instead of [`apply_content`]: a same-length edit
/// under the short threshold has the same fingerprint as the old text.
pub fn apply_content_exact(buffer: &mut TextBuffer, content: &str) -> SyncOutcome {
    if buffer.content() == content {
        debug!("buffer already matches view");
        return SyncOutcome::Unchanged;
    }
    replace(buffer, content)
}

fn replace(buffer: &mut TextBuffer, content: &str) -> SyncOutcome {
    buffer.replace_all(content);
    let line_count = buffer.lines_num();
    debug!(line_count, bytes = content.len(), "buffer synced from view");
    SyncOutcome::Applied { line_count }
}

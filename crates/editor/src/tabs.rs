// Chunk: docs/chunks/closable_tabs - Tab manager with close semantics
//!
//! An ordered, index-addressed list of closable tabs with one selection.
//!
//! The manager owns each tab's content and keeps the selection valid across
//! closes:
//!
//! - closing the selected tab selects the tab that slid into its index, or
//!   the new last tab when it was the last;
//! - closing a tab left of the selection shifts the selection left by one;
//! - closing a tab right of the selection leaves it alone;
//! - closing the only tab leaves no selection and runs the empty callback.
//!
//! The manager never fabricates content. Keeping at least one tab open is
//! the owner's job: it reacts to [`ClosedTab::now_empty`] (or the empty
//! callback) by adding a replacement.

use std::fmt;
use std::time::Instant;

use tracing::debug;

use crate::deferred::DeferredTask;

/// Default window for a double activation on empty tab-bar space.
pub const DEFAULT_DOUBLE_TAP_MS: u64 = 400;

/// Content hosted in a tab.
pub trait TabContent {
    /// Called when the tab becomes (or stops being) the visible one.
    fn set_active(&mut self, active: bool);
}

/// How a tab is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabStyle {
    Selected,
    Normal,
}

/// Hook run with the tab's content just before the tab is removed.
pub type CloseHook<C> = Box<dyn FnOnce(&mut C)>;

/// One tab: a title, the content, and an optional close hook.
pub struct TabEntry<C> {
    pub title: String,
    pub content: C,
    on_close: Option<CloseHook<C>>,
}

impl<C> TabEntry<C> {
    pub fn new(title: impl Into<String>, content: C) -> Self {
        Self {
            title: title.into(),
            content,
            on_close: None,
        }
    }

    pub fn with_close_hook(mut self, hook: impl FnOnce(&mut C) + 'static) -> Self {
        self.on_close = Some(Box::new(hook));
        self
    }

    pub fn has_close_hook(&self) -> bool {
        self.on_close.is_some()
    }
}

impl<C: fmt::Debug> fmt::Debug for TabEntry<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TabEntry")
            .field("title", &self.title)
            .field("content", &self.content)
            .field("has_close_hook", &self.on_close.is_some())
            .finish()
    }
}

/// A tab removed by [`TabManager::close_tab`].
#[derive(Debug)]
pub struct ClosedTab<C> {
    /// Index the tab had before removal.
    pub index: usize,
    pub entry: TabEntry<C>,
    pub was_selected: bool,
    /// True when no tabs remain.
    pub now_empty: bool,
}

// =============================================================================
// TabManager
// =============================================================================

pub struct TabManager<C> {
    tabs: Vec<TabEntry<C>>,
    selected: Option<usize>,
    on_tab_closed: Option<Box<dyn FnMut(usize)>>,
    on_empty: Option<Box<dyn FnMut()>>,
}

impl<C: TabContent> TabManager<C> {
    pub fn new() -> Self {
        Self {
            tabs: Vec::new(),
            selected: None,
            on_tab_closed: None,
            on_empty: None,
        }
    }

    /// Registers the callback run with the removed index after every close.
    pub fn set_on_tab_closed(&mut self, callback: impl FnMut(usize) + 'static) {
        self.on_tab_closed = Some(Box::new(callback));
    }

    /// Registers the callback run when a close leaves no tabs.
    pub fn set_on_empty(&mut self, callback: impl FnMut() + 'static) {
        self.on_empty = Some(Box::new(callback));
    }

    // ==================== Queries ====================

    pub fn tab_count(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn get(&self, index: usize) -> Option<&TabEntry<C>> {
        self.tabs.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut TabEntry<C>> {
        self.tabs.get_mut(index)
    }

    /// The visible content.
    pub fn selected(&self) -> Option<&TabEntry<C>> {
        self.selected.and_then(|i| self.tabs.get(i))
    }

    pub fn selected_mut(&mut self) -> Option<&mut TabEntry<C>> {
        let index = self.selected?;
        self.tabs.get_mut(index)
    }

    pub fn titles(&self) -> Vec<&str> {
        self.tabs.iter().map(|t| t.title.as_str()).collect()
    }

    /// Style of the tab at `index`. Exactly one tab is `Selected` whenever
    /// the manager is not empty.
    pub fn style(&self, index: usize) -> Option<TabStyle> {
        if index >= self.tabs.len() {
            return None;
        }
        Some(if self.selected == Some(index) {
            TabStyle::Selected
        } else {
            TabStyle::Normal
        })
    }

    /// Index of the first tab whose content matches.
    pub fn position(&self, mut predicate: impl FnMut(&C) -> bool) -> Option<usize> {
        self.tabs.iter().position(|t| predicate(&t.content))
    }

    pub fn iter(&self) -> impl Iterator<Item = &TabEntry<C>> {
        self.tabs.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut TabEntry<C>> {
        self.tabs.iter_mut()
    }

    // ==================== Mutations ====================

    /// Appends a tab and returns its index. The first tab added to an empty
    /// manager becomes selected.
    pub fn add_tab(&mut self, title: impl Into<String>, content: C) -> usize {
        self.add_entry(TabEntry::new(title, content))
    }

    pub fn add_entry(&mut self, entry: TabEntry<C>) -> usize {
        self.tabs.push(entry);
        let index = self.tabs.len() - 1;
        if self.selected.is_none() {
            self.select_tab(index);
        }
        index
    }

    /// Makes the tab at `index` the visible one. Out-of-range indices are
    /// ignored.
    pub fn select_tab(&mut self, index: usize) -> bool {
        if index >= self.tabs.len() {
            debug!(index, count = self.tabs.len(), "select_tab out of range");
            return false;
        }
        if self.selected == Some(index) {
            return true;
        }
        if let Some(previous) = self.selected.and_then(|i| self.tabs.get_mut(i)) {
            previous.content.set_active(false);
        }
        self.tabs[index].content.set_active(true);
        self.selected = Some(index);
        true
    }

    /// Closes the tab at `index`.
    ///
    /// Runs the tab's close hook, removes it, repairs the selection, then
    /// runs the closed callback and, if nothing is left, the empty callback.
    /// Out-of-range indices are ignored.
    pub fn close_tab(&mut self, index: usize) -> Option<ClosedTab<C>> {
        if index >= self.tabs.len() {
            debug!(index, count = self.tabs.len(), "close_tab out of range");
            return None;
        }

        if let Some(hook) = self.tabs[index].on_close.take() {
            hook(&mut self.tabs[index].content);
        }
        let mut entry = self.tabs.remove(index);
        entry.content.set_active(false);

        let was_selected = self.selected == Some(index);
        self.selected = match self.selected {
            _ if self.tabs.is_empty() => None,
            Some(s) if s == index => Some(index.min(self.tabs.len() - 1)),
            Some(s) if s > index => Some(s - 1),
            other => other,
        };
        if was_selected {
            if let Some(next) = self.selected {
                self.tabs[next].content.set_active(true);
            }
        }

        let now_empty = self.tabs.is_empty();
        debug!(index, was_selected, remaining = self.tabs.len(), "tab closed");

        if let Some(callback) = self.on_tab_closed.as_mut() {
            callback(index);
        }
        if now_empty {
            if let Some(callback) = self.on_empty.as_mut() {
                callback();
            }
        }

        Some(ClosedTab {
            index,
            entry,
            was_selected,
            now_empty,
        })
    }
}

impl<C: TabContent> Default for TabManager<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: fmt::Debug> fmt::Debug for TabManager<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TabManager")
            .field("tabs", &self.tabs)
            .field("selected", &self.selected)
            .finish()
    }
}

// =============================================================================
// Double Tap
// =============================================================================

/// Detects two activations within a short window.
///
/// The first tap arms a [`DeferredTask`]; a second tap completes the pair
/// if that task has not expired yet.
#[derive(Debug, Clone)]
pub struct DoubleTap {
    window: DeferredTask,
}

impl DoubleTap {
    pub fn new(window_ms: u64) -> Self {
        Self {
            window: DeferredTask::from_millis(window_ms),
        }
    }

    /// Records an activation. Returns true when it completes a double tap;
    /// the detector then starts over.
    pub fn tap(&mut self, now: Instant) -> bool {
        if self.window.is_armed() && !self.window.poll(now) {
            self.window.cancel();
            return true;
        }
        self.window.arm(now);
        false
    }
}

impl Default for DoubleTap {
    fn default() -> Self {
        Self::new(DEFAULT_DOUBLE_TAP_MS)
    }
}

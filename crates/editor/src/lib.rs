// Chunk: docs/chunks/main_layout - Shell layout composition
// Chunk: docs/chunks/view_buffer_sync - Debounced view/buffer synchronization
//!
//! deskedit: the core of a desktop text-editing shell.
//!
//! The shell shows open documents as closable tabs next to a collapsible,
//! resizable side bar, above a bottom panel and a status bar. Documents live
//! in a [`BufferRegistry`](deskedit_buffer::BufferRegistry); each tab holds
//! an [`EditorViewState`] that keeps its text surface and its buffer in
//! step:
//!
//! - edits reach the buffer once per burst, after a quiet period
//!   ([`DebouncedSync`]), and only when the content fingerprint changed
//!   ([`change_detector`])
//! - rebinding a view never echoes its new content back as an edit
//! - the line-number gutter is bounded for large documents
//!   ([`line_numbers`])
//!
//! [`MainLayout`] composes the regions and recomputes geometry on every
//! dimension change. [`EventDrainLoop`] owns the layout and feeds it events
//! from an [`event_channel`].

pub mod activity_bar;
pub mod bottom_panel;
pub mod change_detector;
pub mod command;
pub mod context;
pub mod debounced_sync;
pub mod deferred;
pub mod drain_loop;
pub mod editor_event;
pub mod editor_view;
pub mod event_channel;
pub mod geometry;
pub mod line_numbers;
pub mod logging;
pub mod main_layout;
pub mod resizable_panel;
pub mod settings;
pub mod status_bar;
pub mod tab_bar;
pub mod tabs;
pub mod text_surface;

pub use context::{AppContext, Theme};
pub use debounced_sync::{DebouncedSync, SyncOutcome, SyncState};
pub use drain_loop::EventDrainLoop;
pub use editor_event::{Command, EditorEvent};
pub use editor_view::{EditorViewState, ViewId};
pub use main_layout::{Frame, MainLayout, Notice};
pub use resizable_panel::{GeometryError, ResizablePanel};
pub use settings::{Settings, SettingsError};
pub use tabs::{TabContent, TabManager};

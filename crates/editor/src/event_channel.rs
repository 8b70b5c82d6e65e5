// Chunk: docs/chunks/shell_events - Event channel for unified event queue
//! Event channel for the unified event queue.
//!
//! This module provides the sender/receiver pair for the editor event queue.
//! Every event source sends through this channel, and a single drain loop
//! processes the events sequentially.
//!
//! # Design
//!
//! We use `std::sync::mpsc` because:
//! - the command reader is the only background producer
//! - `mpsc::Sender` is `Send`, so the reader thread can own a clone
//! - the receiver stays with the drain loop on the main thread
//!
//! The drain loop sleeps in [`EventReceiver::wait`] until either an event
//! arrives or the next view timer is due.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, SendError, Sender};
use std::time::Duration;

use deskedit_input::{KeyEvent, MouseEvent};

use crate::editor_event::{Command, EditorEvent};

/// Sender half of the event channel.
///
/// Cloneable and `Send`, so it can be handed to any event source thread.
#[derive(Clone)]
pub struct EventSender {
    sender: Sender<EditorEvent>,
}

/// Receiver half of the event channel, owned by the drain loop.
pub struct EventReceiver {
    receiver: Receiver<EditorEvent>,
}

/// Outcome of [`EventReceiver::wait`].
#[derive(Debug, PartialEq)]
pub enum Wait {
    Event(EditorEvent),
    /// The timeout elapsed with no event
    TimedOut,
    /// Every sender is gone
    Disconnected,
}

/// Creates a new event channel pair.
pub fn create_event_channel() -> (EventSender, EventReceiver) {
    let (sender, receiver) = mpsc::channel();
    (EventSender { sender }, EventReceiver { receiver })
}

impl EventSender {
    pub fn send(&self, event: EditorEvent) -> Result<(), SendError<EditorEvent>> {
        self.sender.send(event)
    }

    /// Sends a key event to the channel.
    pub fn send_key(&self, event: KeyEvent) -> Result<(), SendError<EditorEvent>> {
        self.send(EditorEvent::Key(event))
    }

    /// Sends a pointer event to the channel.
    pub fn send_mouse(&self, event: MouseEvent) -> Result<(), SendError<EditorEvent>> {
        self.send(EditorEvent::Mouse(event))
    }

    pub fn send_command(&self, command: Command) -> Result<(), SendError<EditorEvent>> {
        self.send(EditorEvent::Command(command))
    }

    pub fn send_quit(&self) -> Result<(), SendError<EditorEvent>> {
        self.send(EditorEvent::Quit)
    }
}

impl EventReceiver {
    /// Attempts to receive an event without blocking.
    pub fn try_recv(&self) -> Option<EditorEvent> {
        self.receiver.try_recv().ok()
    }

    /// Drains all pending events without blocking.
    pub fn drain(&self) -> impl Iterator<Item = EditorEvent> + '_ {
        std::iter::from_fn(|| self.try_recv())
    }

    /// Blocks until an event arrives, or until `timeout` elapses when one is
    /// given.
    pub fn wait(&self, timeout: Option<Duration>) -> Wait {
        let received = match timeout {
            Some(timeout) => self.receiver.recv_timeout(timeout),
            None => self
                .receiver
                .recv()
                .map_err(|_| RecvTimeoutError::Disconnected),
        };
        match received {
            Ok(event) => Wait::Event(event),
            Err(RecvTimeoutError::Timeout) => Wait::TimedOut,
            Err(RecvTimeoutError::Disconnected) => Wait::Disconnected,
        }
    }
}

// Chunk: docs/chunks/shell_events - Event drain loop (single ownership of the layout)
//! Event drain loop for processing the unified event queue.
//!
//! `EventDrainLoop` owns the [`MainLayout`] directly. All events flow through
//! the event channel and are processed sequentially here, so the layout is
//! never shared.
//!
//! # Architecture
//!
//! ```text
//! stdin reader thread ──┐
//! other producers ──────┴──→ EventSender ──→ mpsc channel
//!                                                 │
//!                                                 ▼
//!                              EventDrainLoop::run (waits until the next
//!                              event or the next view timer)
//!                                                 │
//!                                                 ▼
//!                              MainLayout (owned directly)
//! ```
//!
//! View timers never get a thread of their own: the loop sleeps on the
//! channel with a timeout equal to the earliest armed deadline, then calls
//! [`MainLayout::tick`].

use std::io::{self, Write};
use std::time::Instant;

use deskedit_input::{Key, KeyEvent};
use tracing::{debug, info};

use crate::editor_event::{Command, EditorEvent};
use crate::event_channel::{EventReceiver, Wait};
use crate::main_layout::MainLayout;

/// Owns the layout and feeds it events until quit.
pub struct EventDrainLoop<W: Write> {
    layout: MainLayout,
    receiver: EventReceiver,
    /// Where frames and notices are printed
    out: W,
    should_quit: bool,
}

impl<W: Write> EventDrainLoop<W> {
    pub fn new(layout: MainLayout, receiver: EventReceiver, out: W) -> Self {
        Self {
            layout,
            receiver,
            out,
            should_quit: false,
        }
    }

    pub fn layout(&self) -> &MainLayout {
        &self.layout
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// The writer frames and notices go to.
    pub fn writer(&self) -> &W {
        &self.out
    }

    /// Hands the layout back, for shutdown.
    pub fn into_layout(self) -> MainLayout {
        self.layout
    }

    /// Runs until a quit event arrives or every sender is gone.
    pub fn run(&mut self) -> io::Result<()> {
        while !self.should_quit {
            let timeout = self
                .layout
                .next_deadline()
                .map(|deadline| deadline.saturating_duration_since(Instant::now()));

            match self.receiver.wait(timeout) {
                Wait::Event(event) => self.handle_event(event, Instant::now())?,
                Wait::TimedOut => {}
                Wait::Disconnected => {
                    debug!("event channel closed");
                    break;
                }
            }
            self.process_pending_events(Instant::now())?;
        }
        info!("drain loop finished");
        Ok(())
    }

    /// Processes every queued event, then runs expired timers.
    ///
    /// Draining first means a burst of input reaches the views before their
    /// timers are checked.
    pub fn process_pending_events(&mut self, now: Instant) -> io::Result<()> {
        let events: Vec<EditorEvent> = self.receiver.drain().collect();
        for event in events {
            if self.should_quit {
                break;
            }
            self.handle_event(event, now)?;
        }

        self.layout.tick(now);
        self.print_notices()
    }

    fn handle_event(&mut self, event: EditorEvent, now: Instant) -> io::Result<()> {
        match event {
            EditorEvent::Key(key) => self.handle_key(key, now)?,
            EditorEvent::Mouse(mouse) => self.layout.handle_mouse(&mouse, now),
            EditorEvent::Command(command) => self.handle_command(command, now)?,
            EditorEvent::Quit => {
                debug!("quit requested");
                self.should_quit = true;
            }
        }
        Ok(())
    }

    /// Sends a key to the active view unless it is a shell shortcut.
    fn handle_key(&mut self, event: KeyEvent, now: Instant) -> io::Result<()> {
        if let Some(command) = shortcut(&event) {
            debug!(?command, "shortcut");
            return self.handle_command(command, now);
        }
        self.layout.handle_key(&event, now);
        Ok(())
    }

    fn handle_command(&mut self, command: Command, now: Instant) -> io::Result<()> {
        match command {
            Command::Type(text) => self.layout.type_text(&text, now),
            Command::Open(path) => {
                self.layout.open_file(path);
            }
            Command::NewFile => {
                self.layout.new_file();
            }
            Command::Close(index) => {
                if let Some(index) = index.or(self.layout.tabs().selected_index()) {
                    self.layout.close_tab(index);
                }
            }
            Command::Select(index) => {
                self.layout.select_tab(index);
            }
            Command::Save(None) => {
                self.layout.save_active(now);
            }
            Command::Save(Some(path)) => {
                self.layout.save_active_as(path, now);
            }
            Command::SideBar(Some(activity)) => {
                self.layout.activate(activity);
            }
            Command::SideBar(None) => {
                self.layout.toggle_side_bar();
            }
            Command::Panel(Some(tab)) => self.layout.show_panel(tab),
            Command::Panel(None) => {
                self.layout.toggle_bottom_panel();
            }
            Command::PanelWrite(tab, text) => self.layout.write_to_panel(tab, text),
            Command::ToggleTheme => {
                self.layout.toggle_theme();
            }
            Command::ResizeWindow { width, height } => self.layout.resize_window(width, height),
            Command::Show => {
                // Pending timers run first so the frame is current.
                self.layout.tick(now);
                writeln!(self.out, "{}", self.layout.content())?;
                self.out.flush()?;
            }
        }
        Ok(())
    }

    fn print_notices(&mut self) -> io::Result<()> {
        for notice in self.layout.take_notices() {
            writeln!(self.out, "! {}: {}", notice.title, notice.message)?;
        }
        self.out.flush()
    }
}

/// Maps control chords to shell commands.
fn shortcut(event: &KeyEvent) -> Option<Command> {
    if !event.modifiers.is_control_only() {
        return None;
    }
    let command = match event.key {
        Key::Char('s') => Command::Save(None),
        Key::Char('n') => Command::NewFile,
        Key::Char('w') => Command::Close(None),
        Key::Char('b') => Command::SideBar(None),
        Key::Char('j') => Command::Panel(None),
        _ => return None,
    };
    Some(command)
}

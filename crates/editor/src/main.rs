// Chunk: docs/chunks/headless_frontend - Line-command front end
//!
//! deskedit: the editing shell driven by line commands.
//!
//! The binary builds the layout from the user's settings, opens the files
//! named on the command line, then runs the drain loop. A reader thread turns
//! each stdin line into events (see [`deskedit::command`]); `show` prints the
//! current frame. The loop ends on `quit` or end of input, and settings that
//! changed are written back.
//!
//! ```text
//! $ printf 'type hello\\nworld\nshow\n' | deskedit
//! ```

use std::io::{self, BufRead};
use std::path::PathBuf;
use std::thread;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use tracing::{debug, info, warn};

use deskedit::command::parse_line;
use deskedit::event_channel::{create_event_channel, EventSender};
use deskedit::settings::settings_file_path;
use deskedit::{logging, AppContext, EventDrainLoop, MainLayout, Theme};

#[derive(Parser, Debug)]
#[command(name = "deskedit")]
#[command(about = "A text-editing shell driven by line commands on stdin")]
#[command(version)]
struct Cli {
    /// Files to open, one tab each
    files: Vec<PathBuf>,

    /// Directory holding settings.json (default: the platform config directory)
    #[arg(long, value_name = "DIR")]
    config_dir: Option<PathBuf>,

    /// Log at debug level to log.txt
    #[arg(long)]
    debug: bool,

    /// Start with the dark theme
    #[arg(long)]
    dark_theme: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.debug)?;

    let settings_path = settings_file_path(cli.config_dir.as_deref())?;
    let mut context = AppContext::init(settings_path);
    if cli.dark_theme {
        context.set_theme(Theme::Dark);
    }

    let mut layout = MainLayout::new(context).context("invalid side bar settings")?;
    for file in &cli.files {
        layout.open_file(file);
    }

    let (sender, receiver) = create_event_channel();
    spawn_stdin_reader(sender).context("failed to start the input reader")?;

    let stdout = io::stdout();
    let mut drain = EventDrainLoop::new(layout, receiver, stdout.lock());
    // Startup notices, such as files that failed to open.
    drain.process_pending_events(Instant::now())?;
    drain.run()?;

    drain
        .into_layout()
        .shutdown()
        .context("failed to save settings")?;
    info!("shutdown complete");
    Ok(())
}

/// Reads commands from stdin on a background thread. Dropping the sender at
/// end of input ends the drain loop.
fn spawn_stdin_reader(sender: EventSender) -> io::Result<thread::JoinHandle<()>> {
    thread::Builder::new()
        .name("stdin-reader".to_string())
        .spawn(move || {
            for line in io::stdin().lock().lines() {
                let line = match line {
                    Ok(line) => line,
                    Err(e) => {
                        warn!(error = %e, "stdin read failed");
                        break;
                    }
                };
                match parse_line(&line) {
                    Ok(events) => {
                        for event in events {
                            if sender.send(event).is_err() {
                                return;
                            }
                        }
                    }
                    Err(e) => eprintln!("error: {e}"),
                }
            }
            debug!("stdin closed");
        })
}

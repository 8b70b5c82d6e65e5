// Chunk: docs/chunks/headless_frontend - Logging setup for the binary
//! Logging setup.
//!
//! The filter comes from, in order:
//!
//! 1. `DESKEDIT_LOG`, applied to the deskedit crates
//! 2. `RUST_LOG`, used as is
//! 3. the default: `warn` globally, `info` for deskedit (`debug` with
//!    `--debug`)
//!
//! Logs go to stderr, or to `log.txt` in the working directory with
//! `--debug`, so they never mix with frames printed on stdout.

use std::env;
use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{fmt, EnvFilter};

/// Crates the short `DESKEDIT_LOG` form applies to.
const CRATES: [&str; 3] = ["deskedit", "deskedit_buffer", "deskedit_input"];

/// File that `--debug` logs to.
pub const DEBUG_LOG_FILE: &str = "log.txt";

/// Installs the global subscriber.
pub fn init(debug: bool) -> anyhow::Result<()> {
    let filter = create_filter(debug)?;
    if debug {
        let file = File::create(Path::new(DEBUG_LOG_FILE))?;
        fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .try_init()
            .map_err(|e| anyhow::anyhow!(e))?;
    } else {
        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init()
            .map_err(|e| anyhow::anyhow!(e))?;
    }
    Ok(())
}

fn create_filter(debug: bool) -> anyhow::Result<EnvFilter> {
    if let Ok(level) = env::var("DESKEDIT_LOG") {
        return Ok(EnvFilter::try_new(expand(&level))?);
    }
    if let Ok(rust_log) = env::var("RUST_LOG") {
        return Ok(EnvFilter::try_new(rust_log)?);
    }
    let level = if debug { "debug" } else { "info" };
    Ok(EnvFilter::try_new(format!("warn,{}", expand(level)))?)
}

/// Expands a bare level to every deskedit crate. Full directives pass
/// through untouched.
fn expand(spec: &str) -> String {
    if spec.contains('=') || spec.contains(',') {
        return spec.to_string();
    }
    CRATES
        .iter()
        .map(|name| format!("{name}={spec}"))
        .collect::<Vec<_>>()
        .join(",")
}

//! Optional file-backed debug tracing.
//!
//! The chat interface owns the terminal's alternate screen, so diagnostics
//! never go to stdout; when `--debug-log` names a file, a plain-text
//! subscriber writes there instead. This is developer tracing, not chat
//! history persistence.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

pub fn init_debug_logging(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("ponder=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}

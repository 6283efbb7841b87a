//! Tracing subscriber setup.

use std::fs::{self, File};
use std::io;
use std::sync::Mutex;

use directories::ProjectDirs;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `NODEFIELD_LOG=debug`.
pub const LOG_ENV: &str = "NODEFIELD_LOG";

fn filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Log to `nodefield.log` in the cache directory.
///
/// The terminal belongs to the UI while it runs, so nothing is written to
/// stdout or stderr. Logging is skipped if the file cannot be created.
pub fn init_file() {
    let Some(dirs) = ProjectDirs::from("", "", "nodefield") else {
        return;
    };
    let dir = dirs.cache_dir();
    if fs::create_dir_all(dir).is_err() {
        return;
    }
    let Ok(file) = File::create(dir.join("nodefield.log")) else {
        return;
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter())
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();
}

/// Log to stderr, used when no terminal UI is running.
pub fn init_stderr() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter())
        .with_writer(io::stderr)
        .try_init();
}

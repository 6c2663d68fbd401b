//! File logging.
//!
//! The terminal belongs to the game, so log records go to `dodge.log` in
//! the platform data directory. `RUST_LOG` sets the filter (default `info`).

use directories::ProjectDirs;
use env_logger::{Builder, Env, Target};
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

pub const LOG_FILE_NAME: &str = "dodge.log";

/// Where the log file lives, if the platform has a data directory.
pub fn log_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "dodge").map(|dirs| dirs.data_local_dir().join(LOG_FILE_NAME))
}

fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Install the global logger. Returns the log path on success; on failure
/// logging stays disabled and the game runs without it.
pub fn init() -> Option<PathBuf> {
    let path = log_path()?;
    let file = open_log_file(&path).ok()?;

    Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init()
        .ok()?;

    Some(path)
}

// src/history/mod.rs

pub mod state;

use chrono::{DateTime, Local};
use std::{
    cell::Cell,
    fs::OpenOptions,
    io::{self, Write},
    path::{Path, PathBuf},
};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// An append-only activity log: one `<timestamp> - <message>` line per event.
pub struct ActivityLog {
    path: PathBuf,
    last: Cell<Option<DateTime<Local>>>,
}

impl ActivityLog {
    /// The file is created on the first `record`, not here.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            last: Cell::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append `message` with the current local time.
    pub fn record(&self, message: &str) -> io::Result<()> {
        let ts = self.next_timestamp();
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{} - {}", ts.format(TIMESTAMP_FORMAT), message)
    }

    // Never hand out a timestamp earlier than the last one, even if the
    // wall clock steps backwards mid-run.
    fn next_timestamp(&self) -> DateTime<Local> {
        let now = Local::now();
        let ts = match self.last.get() {
            Some(prev) if prev > now => prev,
            _ => now,
        };
        self.last.set(Some(ts));
        ts
    }
}

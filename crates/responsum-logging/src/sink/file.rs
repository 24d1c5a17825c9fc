//! File sink
//!
//! Log calls only append to an in-memory backlog. A periodic task drains the
//! backlog into the session file with a single append per flush.

use chrono::{DateTime, SecondsFormat, Utc};
use lazy_static::lazy_static;
use parking_lot::Mutex;
use regex::Regex;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;

use super::LogSink;
use crate::event::LogEvent;
use crate::value::ErrorInfo;

lazy_static! {
    static ref UNSAFE_FILE_CHARS: Regex = Regex::new(r"[^A-Za-z0-9_-]+").unwrap();
}

/// `<base>_<ISO timestamp with separators replaced by "_">.log`
pub fn log_file_name(base_name: &str, now: DateTime<Utc>) -> String {
    let stamp = now.to_rfc3339_opts(SecondsFormat::Millis, true);
    format!("{}_{}.log", base_name, UNSAFE_FILE_CHARS.replace_all(&stamp, "_"))
}

#[derive(Debug, Clone)]
pub enum FileSinkState {
    /// No log directory configured
    Unconfigured,
    Active { path: PathBuf },
    /// The session file could not be created; behaves like `Unconfigured`
    Failed { path: PathBuf, error: ErrorInfo },
}

pub struct FileSink {
    state: FileSinkState,
    backlog: Mutex<Vec<String>>,
    /// Serializes drains so lines reach the file in enqueue order
    write_lock: tokio::sync::Mutex<()>,
}

impl FileSink {
    /// Sink that never touches the file system
    pub fn disabled() -> Self {
        Self::with_state(FileSinkState::Unconfigured)
    }

    /// Start a log session in `dir`. A missing or blank directory disables
    /// the sink; the directory itself is not created.
    pub fn open(dir: Option<&Path>, base_name: &str, now: DateTime<Utc>) -> Self {
        let dir = match dir {
            Some(dir) if !dir.as_os_str().to_string_lossy().trim().is_empty() => dir,
            _ => return Self::disabled(),
        };

        let path = dir.join(log_file_name(base_name, now));
        let banner = format!("Starting log session for {}\r\n", base_name);
        let state = match std::fs::write(&path, banner) {
            Ok(()) => FileSinkState::Active { path },
            Err(e) => FileSinkState::Failed {
                path,
                error: ErrorInfo::from_dyn("IoError", &e),
            },
        };
        Self::with_state(state)
    }

    fn with_state(state: FileSinkState) -> Self {
        Self {
            state,
            backlog: Mutex::new(Vec::new()),
            write_lock: tokio::sync::Mutex::new(()),
        }
    }

    pub fn state(&self) -> &FileSinkState {
        &self.state
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, FileSinkState::Active { .. })
    }

    pub fn path(&self) -> Option<&Path> {
        match &self.state {
            FileSinkState::Active { path } => Some(path),
            _ => None,
        }
    }

    pub fn pending_lines(&self) -> usize {
        self.backlog.lock().len()
    }

    /// `<iso> [<level>] <message>` plus compact details, CRLF terminated
    pub fn format(event: &LogEvent<'_>) -> String {
        let mut line = event.headline();
        if !event.details.is_empty() {
            line.push_str(" DD=");
            line.push_str(&event.details.to_json(false));
        }
        line.push_str("\r\n");
        line
    }

    /// Append every pending line to the file in one write and return how
    /// many were written. Drained lines are not re-queued on failure.
    pub async fn flush(&self) -> io::Result<usize> {
        let Some(path) = self.path() else {
            return Ok(0);
        };

        let _write = self.write_lock.lock().await;
        let lines = std::mem::take(&mut *self.backlog.lock());
        if lines.is_empty() {
            return Ok(0);
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .await?;
        file.write_all(lines.concat().as_bytes()).await?;
        file.flush().await?;

        Ok(lines.len())
    }
}

impl LogSink for FileSink {
    fn emit(&self, event: &LogEvent<'_>) {
        if !self.is_active() {
            return;
        }
        let line = Self::format(event);
        self.backlog.lock().push(line);
    }
}

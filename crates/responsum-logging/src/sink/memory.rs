//! In-memory log buffer served to the log viewer

use parking_lot::Mutex;

use super::LogSink;
use crate::event::LogEvent;

/// Append-only buffer of formatted lines; unbounded, cleared on request
#[derive(Default)]
pub struct MemorySink {
    entries: Mutex<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// `<HH:MM:SS.mmm> <level>:<message>` plus the pretty-printed details
    pub fn format(event: &LogEvent<'_>) -> String {
        let mut line = format!("{} {}:{}", event.local_time(), event.level, event.message);
        if !event.details.is_empty() {
            line.push(' ');
            line.push_str(&event.details.to_json(true));
        }
        line
    }

    /// Copy of the buffer
    pub fn snapshot(&self) -> Vec<String> {
        self.entries.lock().clone()
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl LogSink for MemorySink {
    fn emit(&self, event: &LogEvent<'_>) {
        let line = Self::format(event);
        self.entries.lock().push(line);
    }
}

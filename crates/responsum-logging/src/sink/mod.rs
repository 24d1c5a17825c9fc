//! Log sinks
//!
//! Each sink formats the shared [`LogEvent`] on its own. Sinks never fail
//! the log call and never call back into the logger.

mod console;
mod file;
mod memory;

pub use console::{ConsoleCapture, ConsoleSink};
pub use file::{log_file_name, FileSink, FileSinkState};
pub use memory::MemorySink;

use crate::event::LogEvent;

/// Destination of formatted log events
pub trait LogSink: Send + Sync {
    fn emit(&self, event: &LogEvent<'_>);
}

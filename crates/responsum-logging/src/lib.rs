//! # Responsum Logging
//!
//! Application logger for the Responsum API example.
//!
//! ## Modules
//!
//! - `value` - Log value model (shared references, big integers, errors)
//! - `json` - Cycle-safe JSON serialization
//! - `trace` - Normalization of log context into trace details
//! - `event` - Levels and the event handed to sinks
//! - `sink` - Console, memory and file sinks
//! - `logger` - `AppLogger`, the facade over all sinks

pub mod event;
pub mod json;
pub mod logger;
pub mod sink;
pub mod trace;
pub mod value;

pub use event::{LogEvent, LogLevel, LogOptions};
pub use json::{to_json_string, to_safe_value, Indent};
pub use logger::{AppLogger, LoggerConfig, SharedLogger};
pub use sink::{ConsoleCapture, ConsoleSink, FileSink, FileSinkState, LogSink, MemorySink};
pub use trace::{normalize, serialize_error, LogContext, LogMessage, TraceDetails};
pub use value::{ErrorInfo, Fields, LogValue, SharedValue};

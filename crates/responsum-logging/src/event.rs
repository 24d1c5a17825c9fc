//! Log levels and the canonical event handed to every sink

use chrono::{DateTime, Local, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::trace::TraceDetails;

/// Log level
///
/// Ordered by severity for display only; every level reaches every sink.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rendering hints of a log call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogOptions {
    /// Pretty-print the trace details on the console line
    pub pretty_json: bool,
}

impl LogOptions {
    pub fn pretty() -> Self {
        Self { pretty_json: true }
    }
}

/// One log call, after normalization
#[derive(Debug, Clone, Copy)]
pub struct LogEvent<'a> {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub message: &'a str,
    pub details: &'a TraceDetails,
    pub options: LogOptions,
}

impl<'a> LogEvent<'a> {
    pub fn new(level: LogLevel, message: &'a str, details: &'a TraceDetails) -> Self {
        Self {
            timestamp: Utc::now(),
            level,
            message,
            details,
            options: LogOptions::default(),
        }
    }

    pub fn with_options(mut self, options: LogOptions) -> Self {
        self.options = options;
        self
    }

    /// `2024-03-05T09:04:07.012Z`
    pub fn iso_timestamp(&self) -> String {
        self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    /// Local time of day, `09:04:07.012`
    pub fn local_time(&self) -> String {
        self.timestamp
            .with_timezone(&Local)
            .format("%H:%M:%S%.3f")
            .to_string()
    }

    /// `<iso timestamp> [<level>] <message>`
    pub fn headline(&self) -> String {
        format!("{} [{}] {}", self.iso_timestamp(), self.level, self.message)
    }
}

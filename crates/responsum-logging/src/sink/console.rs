//! Console sink: one coloured line per event

use colored::Colorize;
use parking_lot::Mutex;
use std::io::{self, IsTerminal, Write};
use std::sync::Arc;

use super::LogSink;
use crate::event::{LogEvent, LogLevel};

enum Target {
    /// debug/info to stdout, warn/error to stderr
    Stdio,
    Writer(Mutex<Box<dyn Write + Send>>),
}

pub struct ConsoleSink {
    ansi: bool,
    target: Target,
}

impl ConsoleSink {
    /// Write to the process streams, coloured when stdout is a terminal
    pub fn stdio() -> Self {
        Self {
            ansi: io::stdout().is_terminal(),
            target: Target::Stdio,
        }
    }

    /// Write every level to `writer`
    pub fn with_writer(writer: impl Write + Send + 'static, ansi: bool) -> Self {
        Self {
            ansi,
            target: Target::Writer(Mutex::new(Box::new(writer))),
        }
    }

    /// Uncoloured sink writing into a buffer readable through the returned
    /// handle
    pub fn capture() -> (Self, ConsoleCapture) {
        let capture = ConsoleCapture::default();
        (Self::with_writer(capture.clone(), false), capture)
    }

    /// `<iso> [<level>] <message>` plus ` DD=<details>` when there are any
    pub fn format(&self, event: &LogEvent<'_>) -> String {
        let mut line = format!("{} [{}] ", event.iso_timestamp(), event.level);
        if self.ansi {
            line.push_str(&colorize(event.level, event.message));
        } else {
            line.push_str(event.message);
        }

        if !event.details.is_empty() {
            let details = format!(" DD={}", event.details.to_json(event.options.pretty_json));
            if self.ansi {
                line.push_str(&details.dimmed().to_string());
            } else {
                line.push_str(&details);
            }
        }
        line
    }

    fn write_line(&self, level: LogLevel, line: &str) {
        // Console output is best-effort
        let _ = match &self.target {
            Target::Stdio if level >= LogLevel::Warn => writeln!(io::stderr().lock(), "{}", line),
            Target::Stdio => writeln!(io::stdout().lock(), "{}", line),
            Target::Writer(writer) => writeln!(writer.lock(), "{}", line),
        };
    }
}

impl LogSink for ConsoleSink {
    fn emit(&self, event: &LogEvent<'_>) {
        let line = self.format(event);
        self.write_line(event.level, &line);
    }
}

fn colorize(level: LogLevel, message: &str) -> String {
    match level {
        LogLevel::Debug => message.to_string(),
        LogLevel::Info => message.bright_white().to_string(),
        LogLevel::Warn => message.yellow().to_string(),
        LogLevel::Error => message.red().to_string(),
    }
}

/// In-memory console output
#[derive(Clone, Default)]
pub struct ConsoleCapture(Arc<Mutex<Vec<u8>>>);

impl ConsoleCapture {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock()).into_owned()
    }

    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }
}

impl Write for ConsoleCapture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

//! The application logger
//!
//! One [`AppLogger`] is built at start-up and shared as [`SharedLogger`].
//! Every call reaches the console, the file backlog and the memory buffer.

use chrono::Utc;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use responsum_core::branding::LOG_FILE_BASE;
use responsum_core::config::DEFAULT_LOG_FLUSH_INTERVAL;
use responsum_core::ExampleConfig;

use crate::event::{LogEvent, LogLevel, LogOptions};
use crate::sink::{ConsoleSink, FileSink, FileSinkState, LogSink, MemorySink};
use crate::trace::{normalize, LogContext, LogMessage};
use crate::value::{ErrorInfo, Fields};

pub type SharedLogger = Arc<AppLogger>;

/// Logger construction input
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    /// Directory of the session file; `None` or blank disables file logging
    pub log_dir: Option<PathBuf>,
    pub file_base_name: String,
    pub flush_interval: Duration,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            log_dir: None,
            file_base_name: LOG_FILE_BASE.to_string(),
            flush_interval: DEFAULT_LOG_FLUSH_INTERVAL,
        }
    }
}

impl From<&ExampleConfig> for LoggerConfig {
    fn from(config: &ExampleConfig) -> Self {
        Self {
            log_dir: config.log_dir.clone(),
            flush_interval: config.log_flush_interval,
            ..Self::default()
        }
    }
}

pub struct AppLogger {
    console: ConsoleSink,
    file: FileSink,
    memory: MemorySink,
    flush_interval: Duration,
}

impl AppLogger {
    /// Logger writing to the process console
    pub fn new(config: LoggerConfig) -> Self {
        Self::with_console(config, ConsoleSink::stdio())
    }

    pub fn with_console(config: LoggerConfig, console: ConsoleSink) -> Self {
        let file = FileSink::open(config.log_dir.as_deref(), &config.file_base_name, Utc::now());
        let logger = Self {
            console,
            file,
            memory: MemorySink::new(),
            flush_interval: config.flush_interval,
        };

        match logger.file.state() {
            FileSinkState::Active { path } => {
                logger.info(format!("Logging to file: {}", path.display()), ());
            }
            FileSinkState::Failed { path, error } => {
                logger.warn(
                    "Tried to log to file but failed",
                    Fields::new()
                        .with("error", error.clone())
                        .with("fileLogPath", path.display().to_string()),
                );
            }
            FileSinkState::Unconfigured => {}
        }
        logger
    }

    pub fn debug(&self, message: impl AsRef<str>, context: impl Into<LogContext>) {
        self.log(LogLevel::Debug, message.as_ref(), context, LogOptions::default());
    }

    pub fn info(&self, message: impl AsRef<str>, context: impl Into<LogContext>) {
        self.log(LogLevel::Info, message.as_ref(), context, LogOptions::default());
    }

    pub fn warn(&self, message: impl AsRef<str>, context: impl Into<LogContext>) {
        self.log(LogLevel::Warn, message.as_ref(), context, LogOptions::default());
    }

    /// Log an error; an error given as the message is moved into the
    /// `error` field of the context
    pub fn error(&self, message: impl Into<LogMessage>, context: impl Into<LogContext>) {
        self.log(LogLevel::Error, message, context, LogOptions::default());
    }

    pub fn log(
        &self,
        level: LogLevel,
        message: impl Into<LogMessage>,
        context: impl Into<LogContext>,
        options: LogOptions,
    ) {
        let context = context.into();
        let (text, context) = match message.into() {
            LogMessage::Text(text) => (text, context),
            LogMessage::Error(error) => (error.message.clone(), context.with_error(error)),
        };

        let details = normalize(&context);
        let event = LogEvent::new(level, &text, &details).with_options(options);
        self.console.emit(&event);
        self.file.emit(&event);
        self.memory.emit(&event);
    }

    /// Copy of the in-memory buffer
    pub fn get_log_memory(&self) -> Vec<String> {
        self.memory.snapshot()
    }

    pub fn clear_log_memory(&self) {
        self.memory.clear();
    }

    pub fn file_state(&self) -> &FileSinkState {
        self.file.state()
    }

    pub fn pending_file_lines(&self) -> usize {
        self.file.pending_lines()
    }

    /// Drain the file backlog; failures are reported on the console only
    pub async fn flush_file(&self) -> usize {
        match self.file.flush().await {
            Ok(written) => written,
            Err(e) => {
                let details = normalize(&LogContext::from(ErrorInfo::from_dyn("IoError", &e)));
                self.console.emit(&LogEvent::new(
                    LogLevel::Warn,
                    "Failed to flush log file",
                    &details,
                ));
                0
            }
        }
    }

    /// Spawn the periodic file flush. The task drains once more when
    /// `shutdown` is cancelled, then exits. `None` when file logging is off.
    pub fn spawn_file_flusher(self: &Arc<Self>, shutdown: CancellationToken) -> Option<JoinHandle<()>> {
        if !self.file.is_active() {
            return None;
        }

        let logger = Arc::clone(self);
        let period = self.flush_interval;
        Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = shutdown.cancelled() => break,
                    _ = ticker.tick() => {
                        logger.flush_file().await;
                    }
                }
            }

            let written = logger.flush_file().await;
            debug!(written, "File log flusher stopped");
        }))
    }
}

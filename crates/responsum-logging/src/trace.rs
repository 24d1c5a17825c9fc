//! Trace context normalization
//!
//! Turns the optional context of a log call into [`TraceDetails`], a flat
//! mapping that serializes safely and keeps error details visible.

use crate::json::{to_json_string, Indent};
use crate::value::{ErrorInfo, Fields, LogValue};

/// Message of a log call: plain text or an error
#[derive(Debug, Clone)]
pub enum LogMessage {
    Text(String),
    Error(ErrorInfo),
}

impl From<&str> for LogMessage {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for LogMessage {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&String> for LogMessage {
    fn from(value: &String) -> Self {
        Self::Text(value.clone())
    }
}

impl From<ErrorInfo> for LogMessage {
    fn from(value: ErrorInfo) -> Self {
        Self::Error(value)
    }
}

impl From<&anyhow::Error> for LogMessage {
    fn from(value: &anyhow::Error) -> Self {
        Self::Error(value.into())
    }
}

/// Context attached to a log call
#[derive(Debug, Clone, Default)]
pub enum LogContext {
    #[default]
    None,
    /// Logged as `{ "message": text }`
    Text(String),
    Mapping(Fields),
    Error(ErrorInfo),
}

impl LogContext {
    /// Context for an error passed as the message: the error lands in the
    /// `error` field, next to whatever the caller supplied
    pub fn with_error(self, error: ErrorInfo) -> LogContext {
        let fields = match self {
            LogContext::None => Fields::new(),
            LogContext::Text(text) => Fields::new().with("message", text),
            LogContext::Mapping(fields) => fields,
            LogContext::Error(cause) => Fields::new().with("cause", cause),
        };
        LogContext::Mapping(fields.with("error", error))
    }
}

impl From<()> for LogContext {
    fn from(_: ()) -> Self {
        Self::None
    }
}

impl From<&str> for LogContext {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for LogContext {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Fields> for LogContext {
    fn from(value: Fields) -> Self {
        Self::Mapping(value)
    }
}

impl From<ErrorInfo> for LogContext {
    fn from(value: ErrorInfo) -> Self {
        Self::Error(value)
    }
}

impl<T: Into<LogContext>> From<Option<T>> for LogContext {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or_default()
    }
}

/// Canonical, serializable form of a log context
#[derive(Debug, Clone, Default)]
pub struct TraceDetails(LogValue);

impl TraceDetails {
    pub fn new(fields: Fields) -> Self {
        Self(LogValue::Object(fields))
    }

    pub fn fields(&self) -> Option<&Fields> {
        match &self.0 {
            LogValue::Object(fields) => Some(fields),
            _ => None,
        }
    }

    pub fn get(&self, key: &str) -> Option<&LogValue> {
        self.fields().and_then(|f| f.get(key))
    }

    pub fn is_empty(&self) -> bool {
        self.fields().map_or(true, Fields::is_empty)
    }

    /// JSON text of the details; `pretty` indents with two spaces
    pub fn to_json(&self, pretty: bool) -> String {
        let indent = pretty.then_some(Indent::Spaces(2));
        to_json_string(&self.0, indent.as_ref())
            .unwrap_or_else(|e| format!(r#"{{"serializationError":{:?}}}"#, e.to_string()))
    }

    pub fn as_value(&self) -> &LogValue {
        &self.0
    }
}

/// Normalize a log context
///
/// 1. no context gives an empty mapping
/// 2. an error gives `{ error: <serialized error> }`
/// 3. a mapping whose `error` field holds an error is copied with that
///    field replaced by the serialized error
/// 4. any other mapping is copied as is
/// 5. text gives `{ message: text }`
pub fn normalize(context: &LogContext) -> TraceDetails {
    let fields = match context {
        LogContext::None => Fields::new(),
        LogContext::Error(error) => Fields::new().with("error", serialize_error(error)),
        LogContext::Mapping(fields) => {
            let mut copy = fields.clone();
            if let Some(error) = fields.get("error").and_then(LogValue::as_error) {
                copy.insert("error", serialize_error(error));
            }
            copy
        }
        LogContext::Text(text) => Fields::new().with("message", text.as_str()),
    };
    TraceDetails::new(fields)
}

/// `{ context?: <attached context>, error: { name, message, stack } }`
pub fn serialize_error(error: &ErrorInfo) -> LogValue {
    let mut details = Fields::new()
        .with("name", error.name.as_str())
        .with("message", error.message.as_str());
    if let Some(stack) = &error.stack {
        details.insert("stack", stack.as_str());
    }

    let mut serialized = Fields::new();
    if let Some(context) = &error.context {
        serialized.insert("context", context.clone());
    }
    serialized.insert("error", details);
    LogValue::Object(serialized)
}

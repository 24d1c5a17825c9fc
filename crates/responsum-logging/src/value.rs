//! Log value model
//!
//! [`LogValue`] is what callers attach to log events. Owned children are
//! always distinct; a [`SharedValue`] is a reference that may appear more
//! than once in the same tree, including inside itself.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard};

/// A value that can be attached to a log event
#[derive(Debug, Clone, Default)]
pub enum LogValue {
    #[default]
    Null,
    Bool(bool),
    Number(serde_json::Number),
    /// Integer beyond the safe JSON number range, kept as decimal digits
    BigInt(String),
    String(String),
    Array(Vec<LogValue>),
    Object(Fields),
    /// Ordered key/value entries, rendered as `[[key, value], ...]`
    Map(Vec<(LogValue, LogValue)>),
    /// Ordered elements, rendered as an array
    Set(Vec<LogValue>),
    Error(Box<ErrorInfo>),
    Shared(SharedValue),
}

impl LogValue {
    /// Big integer from anything with a decimal `Display`
    pub fn big_int(value: impl fmt::Display) -> Self {
        Self::BigInt(value.to_string())
    }

    /// Map value from key/value entries
    pub fn map<K, V, I>(entries: I) -> Self
    where
        K: Into<LogValue>,
        V: Into<LogValue>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Set value from elements
    pub fn set<T, I>(elements: I) -> Self
    where
        T: Into<LogValue>,
        I: IntoIterator<Item = T>,
    {
        Self::Set(elements.into_iter().map(Into::into).collect())
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_error(&self) -> Option<&ErrorInfo> {
        match self {
            Self::Error(e) => Some(e),
            _ => None,
        }
    }
}

// ============================================
// Fields
// ============================================

/// Ordered string-keyed fields
///
/// Inserting an existing key replaces the value in place, keeping the
/// original position.
#[derive(Debug, Clone, Default)]
pub struct Fields(Vec<(String, LogValue)>);

impl Fields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<LogValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert or replace, returning the previous value
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<LogValue>) -> Option<LogValue> {
        let key = key.into();
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.0.push((key, value));
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&LogValue> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &LogValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>, V: Into<LogValue>> FromIterator<(K, V)> for Fields {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut fields = Fields::new();
        for (k, v) in iter {
            fields.insert(k, v);
        }
        fields
    }
}

impl IntoIterator for Fields {
    type Item = (String, LogValue);
    type IntoIter = std::vec::IntoIter<(String, LogValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

// ============================================
// Shared references
// ============================================

/// A reference-counted value that can be placed in several spots of a tree
///
/// Cycles built with this type are never freed; they exist to be logged.
#[derive(Clone, Default)]
pub struct SharedValue(Arc<RwLock<LogValue>>);

impl SharedValue {
    pub fn new(value: impl Into<LogValue>) -> Self {
        Self(Arc::new(RwLock::new(value.into())))
    }

    /// Empty object, ready for [`SharedValue::insert`]
    pub fn object() -> Self {
        Self::new(LogValue::Object(Fields::new()))
    }

    /// Insert a field; turns the value into an object if it is not one
    pub fn insert(&self, key: impl Into<String>, value: impl Into<LogValue>) {
        let mut guard = self.0.write();
        if !matches!(*guard, LogValue::Object(_)) {
            *guard = LogValue::Object(Fields::new());
        }
        if let LogValue::Object(fields) = &mut *guard {
            fields.insert(key, value);
        }
    }

    /// Append to an array; turns the value into an array if it is not one
    pub fn push(&self, value: impl Into<LogValue>) {
        let mut guard = self.0.write();
        if !matches!(*guard, LogValue::Array(_)) {
            *guard = LogValue::Array(Vec::new());
        }
        if let LogValue::Array(items) = &mut *guard {
            items.push(value.into());
        }
    }

    pub fn read(&self) -> RwLockReadGuard<'_, LogValue> {
        self.0.read()
    }

    /// Identity of the referenced allocation
    pub fn id(&self) -> usize {
        Arc::as_ptr(&self.0) as *const () as usize
    }
}

impl fmt::Debug for SharedValue {
    // Never recurse: the value may contain itself.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SharedValue({:#x})", self.id())
    }
}

// ============================================
// Errors
// ============================================

/// Captured error: name, message, stack and optional structured context
#[derive(Debug, Clone)]
pub struct ErrorInfo {
    pub name: String,
    pub message: String,
    pub stack: Option<String>,
    /// Domain detail attached to the error, kept on serialization
    pub context: Option<LogValue>,
}

impl ErrorInfo {
    /// Generic error with a stack made of the header line and, when
    /// `RUST_BACKTRACE` enables it, the captured backtrace
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        let name = name.into();
        let message = message.into();
        let stack = build_stack(&name, &message, std::iter::empty());
        Self {
            name,
            message,
            stack: Some(stack),
            context: None,
        }
    }

    /// Plain error named `Error`
    pub fn msg(message: impl Into<String>) -> Self {
        Self::new("Error", message)
    }

    /// Capture a typed error; the name is the short type name and the stack
    /// lists the `source()` chain
    pub fn from_error<E: std::error::Error + 'static>(error: &E) -> Self {
        Self::from_dyn(short_type_name::<E>(), error)
    }

    /// Capture a type-erased error under an explicit name
    pub fn from_dyn(name: impl Into<String>, error: &(dyn std::error::Error + 'static)) -> Self {
        let name = name.into();
        let message = error.to_string();
        let causes = std::iter::successors(error.source(), |e| e.source()).map(|e| e.to_string());
        let stack = build_stack(&name, &message, causes);
        Self {
            name,
            message,
            stack: Some(stack),
            context: None,
        }
    }

    pub fn with_context(mut self, context: impl Into<LogValue>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_stack(mut self, stack: Option<String>) -> Self {
        self.stack = stack;
        self
    }
}

impl fmt::Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.message)
    }
}

impl From<&anyhow::Error> for ErrorInfo {
    fn from(error: &anyhow::Error) -> Self {
        let message = error.to_string();
        let causes = error.chain().skip(1).map(|e| e.to_string());
        let stack = build_stack("Error", &message, causes);
        Self {
            name: "Error".to_string(),
            message,
            stack: Some(stack),
            context: None,
        }
    }
}

impl From<anyhow::Error> for ErrorInfo {
    fn from(error: anyhow::Error) -> Self {
        Self::from(&error)
    }
}

fn build_stack(name: &str, message: &str, causes: impl Iterator<Item = String>) -> String {
    let mut stack = format!("{}: {}", name, message);
    for cause in causes {
        stack.push_str("\n    caused by: ");
        stack.push_str(&cause);
    }
    let backtrace = std::backtrace::Backtrace::capture();
    if backtrace.status() == std::backtrace::BacktraceStatus::Captured {
        stack.push('\n');
        stack.push_str(&backtrace.to_string());
    }
    stack
}

/// `my_crate::module::MyError<T>` -> `MyError`
fn short_type_name<T: ?Sized>() -> String {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base).to_string()
}

// ============================================
// Conversions
// ============================================

impl From<bool> for LogValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

macro_rules! impl_from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for LogValue {
                fn from(value: $ty) -> Self {
                    Self::Number(value.into())
                }
            }
        )*
    };
}

impl_from_integer!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl From<i128> for LogValue {
    fn from(value: i128) -> Self {
        Self::big_int(value)
    }
}

impl From<u128> for LogValue {
    fn from(value: u128) -> Self {
        Self::big_int(value)
    }
}

impl From<f64> for LogValue {
    fn from(value: f64) -> Self {
        // Integral floats print without a fraction, non-finite ones as null.
        if value.fract() == 0.0 && value.abs() < 9_007_199_254_740_992.0 {
            return Self::Number((value as i64).into());
        }
        serde_json::Number::from_f64(value)
            .map(Self::Number)
            .unwrap_or(Self::Null)
    }
}

impl From<f32> for LogValue {
    fn from(value: f32) -> Self {
        Self::from(f64::from(value))
    }
}

impl From<&str> for LogValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for LogValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&String> for LogValue {
    fn from(value: &String) -> Self {
        Self::String(value.clone())
    }
}

impl<T: Into<LogValue>> From<Option<T>> for LogValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Self::Null)
    }
}

impl<T: Into<LogValue>> From<Vec<T>> for LogValue {
    fn from(value: Vec<T>) -> Self {
        Self::Array(value.into_iter().map(Into::into).collect())
    }
}

impl<K: Into<LogValue>, V: Into<LogValue>> From<BTreeMap<K, V>> for LogValue {
    fn from(value: BTreeMap<K, V>) -> Self {
        Self::map(value)
    }
}

impl<K: Into<LogValue>, V: Into<LogValue>, S> From<HashMap<K, V, S>> for LogValue {
    fn from(value: HashMap<K, V, S>) -> Self {
        Self::map(value)
    }
}

impl<T: Into<LogValue>> From<BTreeSet<T>> for LogValue {
    fn from(value: BTreeSet<T>) -> Self {
        Self::set(value)
    }
}

impl<T: Into<LogValue>, S> From<HashSet<T, S>> for LogValue {
    fn from(value: HashSet<T, S>) -> Self {
        Self::set(value)
    }
}

impl From<Fields> for LogValue {
    fn from(value: Fields) -> Self {
        Self::Object(value)
    }
}

impl From<ErrorInfo> for LogValue {
    fn from(value: ErrorInfo) -> Self {
        Self::Error(Box::new(value))
    }
}

impl From<SharedValue> for LogValue {
    fn from(value: SharedValue) -> Self {
        Self::Shared(value)
    }
}

impl From<serde_json::Value> for LogValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => Self::Number(n),
            Value::String(s) => Self::String(s),
            Value::Array(items) => Self::Array(items.into_iter().map(Into::into).collect()),
            Value::Object(map) => Self::Object(map.into_iter().collect()),
        }
    }
}

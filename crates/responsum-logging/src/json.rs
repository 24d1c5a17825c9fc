//! Safe JSON serialization of log values
//!
//! - shared references seen earlier in the same call are dropped (object keys
//!   are omitted, array slots become `null`), so cycles terminate
//! - big integers become decimal strings
//! - maps and sets become arrays

use std::cell::RefCell;
use std::collections::HashSet;

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use serde_json::ser::PrettyFormatter;

use crate::trace::serialize_error;
use crate::value::LogValue;

/// Longest indent unit, in spaces or characters
const MAX_INDENT: usize = 10;

/// Pretty-print indentation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Indent {
    /// Number of spaces, clamped to 10
    Spaces(usize),
    /// Literal indent unit, truncated to 10 characters
    Text(String),
}

impl Indent {
    /// The indent unit, or `None` for compact output
    fn unit(&self) -> Option<String> {
        let unit = match self {
            Indent::Spaces(n) => " ".repeat((*n).min(MAX_INDENT)),
            Indent::Text(text) => text.chars().take(MAX_INDENT).collect(),
        };
        (!unit.is_empty()).then_some(unit)
    }
}

impl From<usize> for Indent {
    fn from(value: usize) -> Self {
        Indent::Spaces(value)
    }
}

impl From<&str> for Indent {
    fn from(value: &str) -> Self {
        Indent::Text(value.to_string())
    }
}

/// Serialize `value` to a JSON string, compact unless `indent` is given
pub fn to_json_string(value: &LogValue, indent: Option<&Indent>) -> serde_json::Result<String> {
    let seen = RefCell::default();
    let root = Tracked::root(value, &seen);

    match indent.and_then(Indent::unit) {
        None => serde_json::to_string(&root),
        Some(unit) => {
            let mut buf = Vec::new();
            let formatter = PrettyFormatter::with_indent(unit.as_bytes());
            let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
            root.serialize(&mut serializer)?;
            String::from_utf8(buf).map_err(<serde_json::Error as serde::ser::Error>::custom)
        }
    }
}

/// Plain-data copy of `value`, equal to parsing the output of
/// [`to_json_string`]
pub fn to_safe_value(value: &LogValue) -> serde_json::Result<serde_json::Value> {
    let seen = RefCell::default();
    serde_json::to_value(Tracked::root(value, &seen))
}

/// A value together with the shared references visited so far
struct Tracked<'a> {
    value: &'a LogValue,
    seen: &'a RefCell<HashSet<usize>>,
}

impl<'a> Tracked<'a> {
    fn root(value: &'a LogValue, seen: &'a RefCell<HashSet<usize>>) -> Self {
        let root = Self { value, seen };
        root.claim(value);
        root
    }

    fn child(&self, value: &'a LogValue) -> Tracked<'a> {
        Tracked {
            value,
            seen: self.seen,
        }
    }

    /// Record a visit; false when `value` is a shared reference already seen
    fn claim(&self, value: &LogValue) -> bool {
        match value {
            LogValue::Shared(shared) => self.seen.borrow_mut().insert(shared.id()),
            _ => true,
        }
    }

    fn serialize_elements<S, I>(&self, serializer: S, items: I) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        I: ExactSizeIterator<Item = &'a LogValue>,
    {
        let mut seq = serializer.serialize_seq(Some(items.len()))?;
        for item in items {
            if self.claim(item) {
                seq.serialize_element(&self.child(item))?;
            } else {
                seq.serialize_element(&())?;
            }
        }
        seq.end()
    }
}

impl Serialize for Tracked<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.value {
            LogValue::Null => serializer.serialize_unit(),
            LogValue::Bool(b) => serializer.serialize_bool(*b),
            LogValue::Number(n) => n.serialize(serializer),
            LogValue::BigInt(digits) => serializer.serialize_str(digits),
            LogValue::String(s) => serializer.serialize_str(s),
            LogValue::Array(items) | LogValue::Set(items) => {
                self.serialize_elements(serializer, items.iter())
            }
            LogValue::Map(entries) => {
                let mut seq = serializer.serialize_seq(Some(entries.len()))?;
                for (key, value) in entries {
                    seq.serialize_element(&MapEntry {
                        key: self.child(key),
                        value: self.child(value),
                    })?;
                }
                seq.end()
            }
            LogValue::Object(fields) => {
                let mut map = serializer.serialize_map(None)?;
                for (key, value) in fields.iter() {
                    if self.claim(value) {
                        map.serialize_entry(key, &self.child(value))?;
                    }
                }
                map.end()
            }
            LogValue::Error(info) => {
                let object = serialize_error(info);
                Tracked {
                    value: &object,
                    seen: self.seen,
                }
                .serialize(serializer)
            }
            LogValue::Shared(shared) => {
                let guard = shared.read();
                Tracked {
                    value: &*guard,
                    seen: self.seen,
                }
                .serialize(serializer)
            }
        }
    }
}

/// `[key, value]` pair of a map entry
struct MapEntry<'a> {
    key: Tracked<'a>,
    value: Tracked<'a>,
}

impl Serialize for MapEntry<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(2))?;
        for part in [&self.key, &self.value] {
            if part.claim(part.value) {
                seq.serialize_element(part)?;
            } else {
                seq.serialize_element(&())?;
            }
        }
        seq.end()
    }
}

//! Record model: one flat row of application data.

#[cfg(test)]
#[path = "record_test.rs"]
mod record_test;

use std::fmt;

use serde_json::{Map, Value};

/// One row of application data. Key order is the order seen on the wire.
pub type Record = Map<String, Value>;

/// Name of the primary identifier field carried by every record.
pub const ID_FIELD: &str = "id";

/// Primary identifier of a record, rendered the way it appears in a URL path.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RecordId(String);

impl RecordId {
    /// Build an id from its path form.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Extract the id of `record`.
    ///
    /// Numbers and strings are accepted; any other shape (or an empty string)
    /// yields `None` because it cannot address a record.
    #[must_use]
    pub fn of(record: &Record) -> Option<Self> {
        match record.get(ID_FIELD)? {
            Value::Number(n) => Some(Self(n.to_string())),
            Value::String(s) if !s.is_empty() => Some(Self(s.clone())),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Display text of a cell value.
///
/// Null renders as an empty cell; strings are shown without quotes.
#[must_use]
pub fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

/// Display text of `field` in `record`; a missing field renders empty.
#[must_use]
pub fn field_text(record: &Record, field: &str) -> String {
    record.get(field).map(cell_text).unwrap_or_default()
}

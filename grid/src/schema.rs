//! Column inference from sampled records.
//!
//! DESIGN
//! ======
//! A [`Schema`] is computed once per dataset load from the first record of
//! the batch and then threaded through the table and both form flows, so
//! the create and edit dialogs always agree on labels and input kinds.

#[cfg(test)]
#[path = "schema_test.rs"]
mod schema_test;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::record::{ID_FIELD, Record};

/// Header of the synthetic row-actions column appended after the data columns.
pub const ACTIONS_LABEL: &str = "Actions";

/// HTML input kind used for a column in the record dialog.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    #[default]
    Text,
    Number,
    Date,
    Email,
}

impl InputKind {
    /// Value for the `type` attribute of an `<input>`.
    #[must_use]
    pub fn html_type(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Date => "date",
            Self::Email => "email",
        }
    }
}

/// Infer the input kind of a field from its name and a sampled value.
///
/// Rules apply in order: a name containing `fecha` is a date, a numeric
/// sample is a number, a name containing `email` is an email, and anything
/// else is text.
#[must_use]
pub fn infer_kind(name: &str, sample: &Value) -> InputKind {
    if name.contains("fecha") {
        InputKind::Date
    } else if sample.is_number() {
        InputKind::Number
    } else if name.contains("email") {
        InputKind::Email
    } else {
        InputKind::Text
    }
}

/// Display label for a field name: first letter upper-cased, underscores as spaces.
#[must_use]
pub fn label_for(name: &str) -> String {
    let spaced = name.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Reorder discovered keys so `id` comes first; the rest keep discovery order.
///
/// `id` is inserted even when the sample lacks it, matching the table's
/// guarantee that the identifier column always leads.
#[must_use]
pub fn id_first(keys: &[String]) -> Vec<String> {
    std::iter::once(ID_FIELD.to_owned()).chain(keys.iter().filter(|k| *k != ID_FIELD).cloned()).collect()
}

/// Display and input metadata for one data column.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub label: String,
    pub kind: InputKind,
}

impl Column {
    #[must_use]
    pub fn new(name: &str, sample: &Value) -> Self {
        Self { name: name.to_owned(), label: label_for(name), kind: infer_kind(name, sample) }
    }
}

/// Ordered data columns of the current dataset. Never contains the actions column.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    columns: Vec<Column>,
}

impl Schema {
    /// Build columns for `keys`, sampling kinds from `sample` when given.
    ///
    /// An empty key list yields an empty schema (no records, no columns).
    #[must_use]
    pub fn from_keys(keys: &[String], sample: Option<&Record>) -> Self {
        if keys.is_empty() {
            return Self::default();
        }
        let columns = id_first(keys)
            .iter()
            .map(|name| Column::new(name, sample.and_then(|r| r.get(name)).unwrap_or(&Value::Null)))
            .collect();
        Self { columns }
    }

    /// Build the schema of a batch from its first record.
    #[must_use]
    pub fn from_records(records: &[Record]) -> Self {
        match records.first() {
            Some(first) => Self::from_keys(&first.keys().cloned().collect::<Vec<_>>(), Some(first)),
            None => Self::default(),
        }
    }

    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Field names in column order.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    #[must_use]
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Header labels including the trailing actions column.
    #[must_use]
    pub fn header_labels(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.label.clone()).chain(std::iter::once(ACTIONS_LABEL.to_owned())).collect()
    }
}

//! Record dialog: generated form fields and the dialog lifecycle.
//!
//! DESIGN
//! ======
//! Fields come from the dataset [`Schema`], never from the rendered table.
//! Inputs hold text while the user edits; conversion back to JSON happens
//! once, in [`RecordForm::payload`].
//!
//! Lifecycle: `Closed -> FormOpen -> Submitting -> Closed`, with a failed
//! submit falling back to `FormOpen` so the user can retry.

#[cfg(test)]
#[path = "form_test.rs"]
mod form_test;

use serde_json::{Number, Value};

use crate::record::{ID_FIELD, Record, RecordId, cell_text};
use crate::schema::{InputKind, Schema};

/// One generated input.
#[derive(Clone, Debug, PartialEq)]
pub struct FormField {
    pub name: String,
    pub label: String,
    pub kind: InputKind,
    /// Current input text.
    pub value: String,
    /// Value the edit dialog was opened with; `None` for create inputs.
    pub initial: Option<Value>,
    pub read_only: bool,
}

impl FormField {
    /// Whether the input still shows the value it was opened with.
    #[must_use]
    pub fn is_unchanged(&self) -> bool {
        self.initial.as_ref().map_or(self.value.is_empty(), |v| self.value == cell_text(v))
    }

    /// JSON value sent for this input.
    ///
    /// Untouched edit inputs send their original value. Numbers are parsed
    /// when they parse; blank numbers and dates are sent as `null`.
    #[must_use]
    pub fn to_value(&self) -> Value {
        if self.is_unchanged() {
            if let Some(initial) = &self.initial {
                return initial.clone();
            }
        }
        let trimmed = self.value.trim();
        match self.kind {
            InputKind::Number | InputKind::Date if trimmed.is_empty() => Value::Null,
            InputKind::Number => parse_number(trimmed).map_or_else(|| Value::String(self.value.clone()), Value::Number),
            _ => Value::String(self.value.clone()),
        }
    }
}

fn parse_number(raw: &str) -> Option<Number> {
    if let Ok(i) = raw.parse::<i64>() {
        return Some(Number::from(i));
    }
    raw.parse::<f64>().ok().and_then(Number::from_f64)
}

/// Whether the dialog creates a new record or edits an existing one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit { id: RecordId },
}

/// The record dialog's form.
#[derive(Clone, Debug, PartialEq)]
pub struct RecordForm {
    pub mode: FormMode,
    pub fields: Vec<FormField>,
}

impl RecordForm {
    /// Edit form: one input per column, pre-filled from `record`.
    ///
    /// Returns `None` if the record carries no usable id.
    #[must_use]
    pub fn for_edit(schema: &Schema, record: &Record) -> Option<Self> {
        let id = RecordId::of(record)?;
        let fields = schema
            .columns()
            .iter()
            .map(|c| {
                let initial = record.get(&c.name).cloned().unwrap_or(Value::Null);
                FormField {
                    name: c.name.clone(),
                    label: c.label.clone(),
                    kind: c.kind,
                    value: cell_text(&initial),
                    initial: Some(initial),
                    read_only: c.name == ID_FIELD,
                }
            })
            .collect();
        Some(Self { mode: FormMode::Edit { id }, fields })
    }

    /// Create form: every column except `id`, all blank.
    #[must_use]
    pub fn for_create(schema: &Schema) -> Self {
        let fields = schema
            .columns()
            .iter()
            .filter(|c| c.name != ID_FIELD)
            .map(|c| FormField {
                name: c.name.clone(),
                label: c.label.clone(),
                kind: c.kind,
                value: String::new(),
                initial: None,
                read_only: false,
            })
            .collect();
        Self { mode: FormMode::Create, fields }
    }

    /// Dialog heading.
    #[must_use]
    pub fn title(&self) -> &'static str {
        match self.mode {
            FormMode::Create => "New Record",
            FormMode::Edit { .. } => "Edit Record",
        }
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Replace the text of input `name`. Unknown and read-only inputs are ignored.
    pub fn set(&mut self, name: &str, value: impl Into<String>) -> bool {
        match self.fields.iter_mut().find(|f| f.name == name && !f.read_only) {
            Some(field) => {
                field.value = value.into();
                true
            }
            None => false,
        }
    }

    /// Flat field -> value mapping, in column order.
    #[must_use]
    pub fn payload(&self) -> Value {
        Value::Object(self.fields.iter().map(|f| (f.name.clone(), f.to_value())).collect())
    }
}

/// Record dialog lifecycle.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum DialogState {
    #[default]
    Closed,
    FormOpen(RecordForm),
    Submitting(RecordForm),
}

impl DialogState {
    #[must_use]
    pub fn is_open(&self) -> bool {
        !matches!(self, Self::Closed)
    }

    #[must_use]
    pub fn is_submitting(&self) -> bool {
        matches!(self, Self::Submitting(_))
    }

    #[must_use]
    pub fn form(&self) -> Option<&RecordForm> {
        match self {
            Self::Closed => None,
            Self::FormOpen(form) | Self::Submitting(form) => Some(form),
        }
    }

    /// Editable form; `None` while closed or submitting.
    pub fn form_mut(&mut self) -> Option<&mut RecordForm> {
        match self {
            Self::FormOpen(form) => Some(form),
            _ => None,
        }
    }
}

//! Grid session state and its synchronous transitions.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser client keeps a [`GridSession`] inside a reactive signal and
//! cannot hold a borrow across an await. Every flow is therefore split into
//! a `begin` step that returns a [`Mutation`] to send and a `finish` step
//! that applies the outcome.
//!
//! INVARIANT
//! =========
//! The active [`Endpoint`] and the rendered [`TableView`] are replaced
//! together by [`GridSession::apply_dataset`], so mutations always target
//! the collection that is on screen. Reloads go through
//! [`GridSession::apply_reload`], which drops rows fetched for a resource
//! that is no longer active.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use serde_json::Value;

use crate::api::{ApiError, ApiRequest};
use crate::endpoint::Endpoint;
use crate::form::{DialogState, FormMode, RecordForm};
use crate::notice::Notice;
use crate::record::{Record, RecordId};
use crate::table::{DEFAULT_PAGE_SIZE, TableView};

pub const DEFAULT_API_BASE: &str = "/api";
pub const DEFAULT_RESOURCES: [&str; 4] = ["datos", "usuarios", "empresas", "proyectos"];
pub const DELETE_CONFIRMATION: &str = "Are you sure you want to delete this record?";

// =============================================================================
// CONFIG
// =============================================================================

/// Static settings of a grid session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridConfig {
    /// Prefix of every mutation and reload URL.
    pub api_base: String,
    /// Resource shown on page load.
    pub initial_resource: String,
    /// Resources offered by the dataset switcher.
    pub resources: Vec<String>,
    pub page_size: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_owned(),
            initial_resource: DEFAULT_RESOURCES[0].to_owned(),
            resources: DEFAULT_RESOURCES.iter().map(|r| (*r).to_owned()).collect(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl GridConfig {
    /// `{api_base}/{resource}`
    #[must_use]
    pub fn resource_url(&self, resource: &str) -> String {
        format!("{}/{resource}", self.api_base.trim_end_matches('/'))
    }

    #[must_use]
    pub fn initial_url(&self) -> String {
        self.resource_url(&self.initial_resource)
    }
}

// =============================================================================
// MUTATION
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MutationKind {
    Create,
    Update,
    Delete,
}

impl MutationKind {
    #[must_use]
    pub fn success_message(self) -> &'static str {
        match self {
            Self::Create => "Record created successfully",
            Self::Update => "Record updated successfully",
            Self::Delete => "Record deleted successfully",
        }
    }

    #[must_use]
    pub fn failure_message(self) -> &'static str {
        match self {
            Self::Create => "Error creating record",
            Self::Update => "Error updating record",
            Self::Delete => "Error deleting record",
        }
    }

    /// Creates always report the generic failure; updates and deletes show
    /// the backend's `error` text when it sends one.
    #[must_use]
    pub fn surfaces_server_error(self) -> bool {
        !matches!(self, Self::Create)
    }
}

/// One write against the active resource.
#[derive(Clone, Debug, PartialEq)]
pub struct Mutation {
    pub kind: MutationKind,
    pub endpoint: Endpoint,
    pub id: Option<RecordId>,
    pub payload: Option<Value>,
}

impl Mutation {
    /// HTTP request for this mutation under `api_base`.
    #[must_use]
    pub fn request(&self, api_base: &str) -> ApiRequest {
        let url = match &self.id {
            Some(id) => self.endpoint.record_url(api_base, id),
            None => self.endpoint.collection_url(api_base),
        };
        let body = self.payload.clone().unwrap_or(Value::Null);
        match self.kind {
            MutationKind::Create => ApiRequest::post(url, body),
            MutationKind::Update => ApiRequest::put(url, body),
            MutationKind::Delete => ApiRequest::delete(url),
        }
    }

    /// Alert shown for `result`.
    #[must_use]
    pub fn notice(&self, result: &Result<(), ApiError>) -> Notice {
        match result {
            Ok(()) => Notice::success(self.kind.success_message()),
            Err(e) => match e.server_message() {
                Some(message) if self.kind.surfaces_server_error() => Notice::error(message),
                _ => Notice::error(self.kind.failure_message()),
            },
        }
    }
}

// =============================================================================
// SESSION
// =============================================================================

/// Everything the grid page shows: active resource, table, dialog and pending delete.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GridSession {
    config: GridConfig,
    endpoint: Option<Endpoint>,
    table: TableView,
    dialog: DialogState,
    pending_delete: Option<RecordId>,
}

impl GridSession {
    #[must_use]
    pub fn new(config: GridConfig) -> Self {
        Self { config, ..Self::default() }
    }

    #[must_use]
    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    #[must_use]
    pub fn endpoint(&self) -> Option<&Endpoint> {
        self.endpoint.as_ref()
    }

    /// Heading above the table; empty until a dataset is shown.
    #[must_use]
    pub fn title(&self) -> String {
        self.endpoint.as_ref().map(Endpoint::title).unwrap_or_default()
    }

    #[must_use]
    pub fn table(&self) -> &TableView {
        &self.table
    }

    pub fn table_mut(&mut self) -> &mut TableView {
        &mut self.table
    }

    #[must_use]
    pub fn dialog(&self) -> &DialogState {
        &self.dialog
    }

    #[must_use]
    pub fn pending_delete(&self) -> Option<&RecordId> {
        self.pending_delete.as_ref()
    }

    // -------------------------------------------------------------------------
    // rendering
    // -------------------------------------------------------------------------

    /// Discard the current table and build a new one from `keys` and `records`.
    fn render(&mut self, keys: &[String], records: Vec<Record>) {
        let mut table = TableView::build(keys, records);
        table.set_page_size(self.config.page_size);
        self.table = table;
        if let Some(id) = &self.pending_delete {
            if self.table.record(id).is_none() {
                self.pending_delete = None;
            }
        }
    }

    /// Show a freshly loaded dataset and make `endpoint` the active resource.
    ///
    /// Switching to another resource drops an open form and any pending
    /// delete, since both target records of the old collection.
    pub fn apply_dataset(&mut self, endpoint: Endpoint, keys: &[String], records: Vec<Record>) {
        if self.endpoint.as_ref() != Some(&endpoint) {
            self.close_dialog();
            self.pending_delete = None;
        }
        self.render(keys, records);
        self.endpoint = Some(endpoint);
    }

    /// Rebuild the table from a reload of `endpoint`.
    ///
    /// A reload that resolves after the user switched to another resource is
    /// dropped and `false` is returned; the rows on screen keep matching the
    /// active endpoint.
    pub fn apply_reload(&mut self, endpoint: &Endpoint, keys: &[String], records: Vec<Record>) -> bool {
        if self.endpoint.as_ref() != Some(endpoint) {
            log::debug!("dropping stale reload of {}", endpoint.name());
            return false;
        }
        self.render(keys, records);
        true
    }

    /// Active endpoint with its collection URL, captured before a reload.
    #[must_use]
    pub fn reload_target(&self) -> Option<(Endpoint, String)> {
        let endpoint = self.endpoint.clone()?;
        let url = endpoint.collection_url(&self.config.api_base);
        Some((endpoint, url))
    }

    // -------------------------------------------------------------------------
    // dialog
    // -------------------------------------------------------------------------

    /// Open the edit dialog for `record`. Ignored while a submit is in flight.
    pub fn open_edit(&mut self, record: &Record) -> bool {
        if self.dialog.is_submitting() {
            return false;
        }
        let Some(form) = RecordForm::for_edit(self.table.schema(), record) else {
            return false;
        };
        self.dialog = DialogState::FormOpen(form);
        true
    }

    /// Open a blank create dialog. Requires an active resource.
    pub fn open_create(&mut self) -> bool {
        if self.dialog.is_submitting() || self.endpoint.is_none() {
            return false;
        }
        self.dialog = DialogState::FormOpen(RecordForm::for_create(self.table.schema()));
        true
    }

    pub fn set_field(&mut self, name: &str, value: impl Into<String>) -> bool {
        self.dialog.form_mut().is_some_and(|form| form.set(name, value))
    }

    /// Dismiss the dialog without submitting.
    pub fn close_dialog(&mut self) {
        if !self.dialog.is_submitting() {
            self.dialog = DialogState::Closed;
        }
    }

    /// Move the open form to `Submitting` and describe the write to send.
    pub fn begin_submit(&mut self) -> Option<Mutation> {
        let endpoint = self.endpoint.clone()?;
        let DialogState::FormOpen(form) = std::mem::take(&mut self.dialog) else {
            return None;
        };
        let (kind, id) = match &form.mode {
            FormMode::Create => (MutationKind::Create, None),
            FormMode::Edit { id } => (MutationKind::Update, Some(id.clone())),
        };
        let mutation = Mutation { kind, endpoint, id, payload: Some(form.payload()) };
        self.dialog = DialogState::Submitting(form);
        Some(mutation)
    }

    // -------------------------------------------------------------------------
    // delete
    // -------------------------------------------------------------------------

    /// Ask for confirmation before deleting `record`.
    pub fn request_delete(&mut self, record: &Record) -> bool {
        if self.endpoint.is_none() {
            return false;
        }
        self.pending_delete = RecordId::of(record);
        self.pending_delete.is_some()
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Consume the pending confirmation and describe the delete to send.
    pub fn confirm_delete(&mut self) -> Option<Mutation> {
        let endpoint = self.endpoint.clone()?;
        let id = self.pending_delete.take()?;
        Some(Mutation { kind: MutationKind::Delete, endpoint, id: Some(id), payload: None })
    }

    // -------------------------------------------------------------------------
    // outcome
    // -------------------------------------------------------------------------

    /// Apply the outcome of `mutation` and return the alert to show.
    ///
    /// A successful submit closes the dialog; a failed one reopens the same
    /// form so the user can retry.
    pub fn finish(&mut self, mutation: &Mutation, result: &Result<(), ApiError>) -> Notice {
        if mutation.kind != MutationKind::Delete {
            self.dialog = match std::mem::take(&mut self.dialog) {
                DialogState::Submitting(form) if result.is_err() => DialogState::FormOpen(form),
                DialogState::Submitting(_) => DialogState::Closed,
                other => other,
            };
        }
        if let Err(e) = result {
            log::warn!("{:?} on {} failed: {e}", mutation.kind, mutation.endpoint);
        }
        mutation.notice(result)
    }
}

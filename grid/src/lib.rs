//! Grid controller core shared by the browser client and the terminal client.
//!
//! SYSTEM CONTEXT
//! ==============
//! A grid session shows one REST collection at a time. Column metadata is
//! inferred from the first record of a fetched batch, the table is rebuilt
//! wholesale on every reload, and create/update/delete go through a modal
//! form generated from that same column metadata.
//!
//! DESIGN
//! ======
//! `session` holds every state transition as plain synchronous methods so a
//! reactive UI can keep it inside a signal. `controller` composes those
//! transitions with the async [`api::RecordClient`] for callers that can
//! hold `&mut` across an await (the CLI and the tests).

pub mod api;
pub mod controller;
pub mod endpoint;
pub mod form;
pub mod notice;
pub mod record;
pub mod schema;
pub mod session;
pub mod table;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use api::{ApiError, ApiRequest, ApiResponse, Method, RecordClient, Transport, TransportError};
pub use controller::GridController;
pub use endpoint::Endpoint;
pub use form::{DialogState, FormField, FormMode, RecordForm};
pub use notice::{Notice, NoticeKind};
pub use record::{Record, RecordId};
pub use schema::{Column, InputKind, Schema};
pub use session::{GridConfig, GridSession, Mutation, MutationKind};
pub use table::{SortDirection, SortState, TableView};

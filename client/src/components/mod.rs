//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render the grid chrome and read the shared `GridSession`
//! signal from context; flows that talk to the backend are passed in as
//! callbacks by the page.

pub mod confirm_dialog;
pub mod data_table;
pub mod dataset_bar;
pub mod record_dialog;

//! Client-side UI state modules.
//!
//! DESIGN
//! ======
//! Record data, dialogs and the pending delete live in `grid::GridSession`;
//! this module only holds presentation state the session does not model.

pub mod ui;

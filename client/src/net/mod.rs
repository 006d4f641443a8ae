//! Networking for the record grid.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` adapts the browser `fetch` API to the grid's transport trait; every
//! request URL and payload is produced by the `grid` crate.

pub mod api;

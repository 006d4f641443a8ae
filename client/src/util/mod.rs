//! Browser utility helpers.

pub mod notify;

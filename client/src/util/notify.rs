//! Blocking browser alerts for write outcomes.
//!
//! TRADE-OFFS
//! ==========
//! `window.alert` blocks the page until dismissed, which keeps the user from
//! acting on a table that is still reloading. SSR paths no-op.

#[cfg(test)]
#[path = "notify_test.rs"]
mod notify_test;

use grid::Notice;

/// Show `notice` verbatim in a blocking alert.
pub fn alert(notice: &Notice) {
    #[cfg(feature = "hydrate")]
    {
        if notice.is_error() {
            log::warn!("alert: {notice}");
        }
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(&notice.message);
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = notice;
    }
}

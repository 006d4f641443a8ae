//! Page chrome state: loading indicator and the custom dataset URL input.

#[cfg(test)]
#[path = "ui_test.rs"]
mod ui_test;

/// UI state around the grid that is not part of the session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UiState {
    /// Number of dataset loads in flight.
    pub loads_in_flight: u32,
    /// Text of the "load from URL" input.
    pub dataset_url: String,
}

impl UiState {
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loads_in_flight > 0
    }

    pub fn begin_load(&mut self) {
        self.loads_in_flight += 1;
    }

    pub fn end_load(&mut self) {
        self.loads_in_flight = self.loads_in_flight.saturating_sub(1);
    }
}

//! Interactive table model: ordering, search and pagination over one batch.
//!
//! DESIGN
//! ======
//! A [`TableView`] is built from scratch on every reload and dropped with
//! the previous dataset; it is never patched in place. Row actions (edit,
//! delete) are bound to the underlying [`Record`], not to a rendered row.

#[cfg(test)]
#[path = "table_test.rs"]
mod table_test;

use std::cmp::Ordering;

use serde_json::Value;

use crate::record::{Record, RecordId, cell_text, field_text};
use crate::schema::Schema;

/// Selectable page lengths.
pub const PAGE_SIZES: [usize; 4] = [10, 25, 50, 100];

/// Page length of a freshly built table.
pub const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    #[must_use]
    pub fn flipped(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

/// Sorted column index (into the schema) and direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SortState {
    pub column: usize,
    pub direction: SortDirection,
}

/// One rendered dataset.
#[derive(Clone, Debug, PartialEq)]
pub struct TableView {
    schema: Schema,
    records: Vec<Record>,
    sort: SortState,
    search: String,
    page: usize,
    page_size: usize,
}

impl TableView {
    /// Build a table for `keys` over `records`.
    ///
    /// `id` leads the columns, the first record supplies the input kinds, and
    /// the initial order is ascending by the first column.
    #[must_use]
    pub fn build(keys: &[String], records: Vec<Record>) -> Self {
        let schema = Schema::from_keys(keys, records.first());
        Self::with_schema(schema, records)
    }

    /// Build a table from an already inferred schema.
    #[must_use]
    pub fn with_schema(schema: Schema, records: Vec<Record>) -> Self {
        Self { schema, records, sort: SortState::default(), search: String::new(), page: 0, page_size: DEFAULT_PAGE_SIZE }
    }

    #[must_use]
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// All records in load order, ignoring search and sort.
    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    #[must_use]
    pub fn sort(&self) -> SortState {
        self.sort
    }

    #[must_use]
    pub fn search(&self) -> &str {
        &self.search
    }

    #[must_use]
    pub fn page(&self) -> usize {
        self.page
    }

    #[must_use]
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Find the record with `id`.
    #[must_use]
    pub fn record(&self, id: &RecordId) -> Option<&Record> {
        self.records.iter().find(|r| RecordId::of(r).as_ref() == Some(id))
    }

    /// Ids of every loaded record, in load order.
    #[must_use]
    pub fn ids(&self) -> Vec<RecordId> {
        self.records.iter().filter_map(RecordId::of).collect()
    }

    // -------------------------------------------------------------------------
    // interaction
    // -------------------------------------------------------------------------

    /// Sort by `column`; selecting the sorted column again flips its direction.
    pub fn sort_by(&mut self, column: usize) {
        if column >= self.schema.len() {
            return;
        }
        self.sort = if self.sort.column == column {
            SortState { column, direction: self.sort.direction.flipped() }
        } else {
            SortState { column, direction: SortDirection::Ascending }
        };
        self.page = 0;
    }

    /// Filter rows by a case-insensitive substring; resets to the first page.
    pub fn set_search(&mut self, query: &str) {
        self.search = query.to_owned();
        self.page = 0;
    }

    /// Change the page length, keeping the first visible row on screen.
    pub fn set_page_size(&mut self, size: usize) {
        if size == 0 {
            return;
        }
        let first_row = self.page * self.page_size;
        self.page_size = size;
        self.page = first_row / size;
        self.clamp_page();
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page;
        self.clamp_page();
    }

    pub fn next_page(&mut self) {
        self.set_page(self.page + 1);
    }

    pub fn prev_page(&mut self) {
        self.set_page(self.page.saturating_sub(1));
    }

    fn clamp_page(&mut self) {
        self.page = self.page.min(self.page_count() - 1);
    }

    // -------------------------------------------------------------------------
    // derived rows
    // -------------------------------------------------------------------------

    fn matches(&self, record: &Record, needle: &str) -> bool {
        self.schema.columns().iter().any(|c| {
            record.get(&c.name).map(cell_text).is_some_and(|text| text.to_lowercase().contains(needle))
        })
    }

    /// Records passing the search filter, in sorted order.
    #[must_use]
    pub fn filtered_rows(&self) -> Vec<&Record> {
        let needle = self.search.trim().to_lowercase();
        let mut rows: Vec<&Record> =
            self.records.iter().filter(|r| needle.is_empty() || self.matches(r, &needle)).collect();
        if let Some(column) = self.schema.columns().get(self.sort.column) {
            let name = column.name.as_str();
            rows.sort_by(|a, b| {
                let ord = compare_values(a.get(name).unwrap_or(&Value::Null), b.get(name).unwrap_or(&Value::Null));
                match self.sort.direction {
                    SortDirection::Ascending => ord,
                    SortDirection::Descending => ord.reverse(),
                }
            });
        }
        rows
    }

    #[must_use]
    pub fn filtered_len(&self) -> usize {
        self.filtered_rows().len()
    }

    /// Number of pages; an empty table still has one (empty) page.
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.filtered_len().div_ceil(self.page_size).max(1)
    }

    /// Rows on the current page.
    #[must_use]
    pub fn visible_rows(&self) -> Vec<&Record> {
        self.filtered_rows().into_iter().skip(self.page * self.page_size).take(self.page_size).collect()
    }

    /// Cell texts of `record` in column order (without the actions column).
    #[must_use]
    pub fn row_cells(&self, record: &Record) -> Vec<String> {
        self.schema.columns().iter().map(|c| field_text(record, &c.name)).collect()
    }

    /// Footer text: `Showing 1 to 10 of 57 entries`.
    #[must_use]
    pub fn summary(&self) -> String {
        let filtered = self.filtered_len();
        let mut text = if filtered == 0 {
            "Showing 0 to 0 of 0 entries".to_owned()
        } else {
            let from = self.page * self.page_size + 1;
            let to = (from + self.page_size - 1).min(filtered);
            format!("Showing {from} to {to} of {filtered} entries")
        };
        if !self.search.trim().is_empty() {
            text.push_str(&format!(" (filtered from {} total entries)", self.records.len()));
        }
        text
    }
}

impl Default for TableView {
    fn default() -> Self {
        Self::with_schema(Schema::default(), Vec::new())
    }
}

fn sort_rank(value: &Value) -> (u8, Option<f64>) {
    match value {
        Value::Null => (0, None),
        Value::Number(n) => (1, n.as_f64()),
        Value::String(s) => match s.trim().parse::<f64>() {
            Ok(n) if n.is_finite() => (1, Some(n)),
            _ => (3, None),
        },
        Value::Bool(_) => (2, None),
        _ => (4, None),
    }
}

/// Ordering used by column sorting.
///
/// Nulls sort first, then numbers (numeric strings included), booleans,
/// strings (case-insensitive) and finally nested values.
#[must_use]
pub fn compare_values(a: &Value, b: &Value) -> Ordering {
    let (rank_a, num_a) = sort_rank(a);
    let (rank_b, num_b) = sort_rank(b);
    rank_a.cmp(&rank_b).then_with(|| match (num_a, num_b) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        _ => {
            let (ta, tb) = (cell_text(a), cell_text(b));
            ta.to_lowercase().cmp(&tb.to_lowercase()).then_with(|| ta.cmp(&tb))
        }
    })
}

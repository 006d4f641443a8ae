//! Plain-text rendering of grid state and `--set` argument parsing.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, ContentArrangement, Table};
use grid::schema::ACTIONS_LABEL;
use grid::table::PAGE_SIZES;
use grid::{Schema, TableView};

/// Parse a `field=value` assignment; the value may be empty or contain `=`.
///
/// # Errors
///
/// Returns a message when there is no `=` or the field name is blank.
pub fn parse_assignment(raw: &str) -> Result<(String, String), String> {
    let Some((field, value)) = raw.split_once('=') else {
        return Err(format!("expected field=value, got `{raw}`"));
    };
    let field = field.trim();
    if field.is_empty() {
        return Err(format!("missing field name in `{raw}`"));
    }
    Ok((field.to_owned(), value.to_owned()))
}

/// Parse `--page-size`; only the page lengths the grid offers are accepted.
///
/// # Errors
///
/// Returns a message listing the allowed sizes.
pub fn parse_page_size(raw: &str) -> Result<usize, String> {
    raw.trim().parse::<usize>().ok().filter(|size| PAGE_SIZES.contains(size)).ok_or_else(|| {
        let allowed: Vec<String> = PAGE_SIZES.iter().map(ToString::to_string).collect();
        format!("page size must be one of {}, got `{raw}`", allowed.join(", "))
    })
}

/// One line per column: name, label and input kind.
#[must_use]
pub fn render_columns(schema: &Schema) -> String {
    let width = schema.columns().iter().map(|c| c.name.chars().count()).max().unwrap_or(0);
    schema
        .columns()
        .iter()
        .map(|c| format!("{:<width$}  {} ({})\n", c.name, c.label, c.kind.html_type()))
        .collect()
}

/// Current page of `table` as a text table followed by the summary line.
///
/// The actions column has no meaning in a terminal and is left out.
#[must_use]
pub fn render_table(table: &TableView) -> String {
    let headers: Vec<String> =
        table.schema().header_labels().into_iter().filter(|label| label != ACTIONS_LABEL).collect();

    let mut out = String::new();
    if !headers.is_empty() {
        let mut text = Table::new();
        text.load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Disabled)
            .set_header(headers.into_iter().map(Cell::new).collect::<Vec<_>>());
        for record in table.visible_rows() {
            text.add_row(table.row_cells(record).into_iter().map(Cell::new).collect::<Vec<_>>());
        }
        out.push_str(&text.to_string());
        out.push('\n');
    }
    out.push_str(&table.summary());
    out.push('\n');
    out
}

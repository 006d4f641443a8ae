//! Grid commands run against a [`GridController`].
//!
//! Each command loads the resource first, exactly as the browser does on a
//! dataset switch, then drives the same session transitions the dialogs use.
//! Commands return the text to print so they can run against any transport.

#[cfg(test)]
#[path = "commands_test.rs"]
mod commands_test;

use grid::session::DELETE_CONFIRMATION;
use grid::{GridController, Notice, Record, RecordId, SortDirection, Transport};

use crate::CliError;
use crate::render::{render_columns, render_table};

/// Options of `list`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListOptions {
    pub sort: Option<String>,
    pub descending: bool,
    pub search: Option<String>,
    /// One-based page number.
    pub page: usize,
    pub page_size: Option<usize>,
}

async fn open<T: Transport>(controller: &mut GridController<T>, resource: &str) -> Result<(), CliError> {
    let url = controller.session().config().resource_url(resource);
    if controller.switch_dataset(&url).await {
        Ok(())
    } else {
        Err(CliError::NoResource(resource.to_owned()))
    }
}

fn find_record<T: Transport>(controller: &GridController<T>, id: &str) -> Result<Record, CliError> {
    controller
        .session()
        .table()
        .record(&RecordId::new(id))
        .cloned()
        .ok_or_else(|| CliError::RecordNotFound(id.to_owned()))
}

fn apply_assignments<T: Transport>(
    controller: &mut GridController<T>,
    assignments: &[(String, String)],
) -> Result<(), CliError> {
    for (field, value) in assignments {
        if !controller.session_mut().set_field(field, value.clone()) {
            return Err(CliError::UnknownField(field.clone()));
        }
    }
    Ok(())
}

fn outcome(notice: Notice) -> Result<String, CliError> {
    if notice.is_error() { Err(CliError::Rejected(notice.message)) } else { Ok(notice.message) }
}

// =============================================================================
// READ
// =============================================================================

/// Field names discovered for `resource`, `id` first.
///
/// # Errors
///
/// Returns [`CliError::NoResource`] for a name that is not a path segment.
pub async fn keys<T: Transport>(controller: &mut GridController<T>, resource: &str) -> Result<String, CliError> {
    open(controller, resource).await?;
    Ok(render_columns(controller.session().table().schema()))
}

/// One page of `resource` as a text table.
///
/// # Errors
///
/// Unknown resource or sort field.
pub async fn list<T: Transport>(
    controller: &mut GridController<T>,
    resource: &str,
    options: &ListOptions,
) -> Result<String, CliError> {
    open(controller, resource).await?;
    let table = controller.session_mut().table_mut();

    if let Some(field) = &options.sort {
        let column = table
            .schema()
            .columns()
            .iter()
            .position(|c| &c.name == field)
            .ok_or_else(|| CliError::UnknownField(field.clone()))?;
        table.sort_by(column);
    }
    if options.descending && table.sort().direction == SortDirection::Ascending {
        let column = table.sort().column;
        table.sort_by(column);
    }
    if let Some(query) = &options.search {
        table.set_search(query);
    }
    if let Some(size) = options.page_size {
        table.set_page_size(size);
    }
    table.set_page(options.page.saturating_sub(1));

    Ok(render_table(table))
}

// =============================================================================
// WRITE
// =============================================================================

/// Create a record in `resource` from `field=value` assignments.
///
/// # Errors
///
/// Unknown resource or field, or the backend rejected the record.
pub async fn create<T: Transport>(
    controller: &mut GridController<T>,
    resource: &str,
    assignments: &[(String, String)],
) -> Result<String, CliError> {
    open(controller, resource).await?;
    controller.session_mut().open_create();
    apply_assignments(controller, assignments)?;
    match controller.submit().await {
        Some(notice) => outcome(notice),
        None => Err(CliError::NoResource(resource.to_owned())),
    }
}

/// Update record `id`; fields not assigned keep their current values.
///
/// # Errors
///
/// Unknown resource, record or field, or the backend rejected the change.
pub async fn update<T: Transport>(
    controller: &mut GridController<T>,
    resource: &str,
    id: &str,
    assignments: &[(String, String)],
) -> Result<String, CliError> {
    open(controller, resource).await?;
    let record = find_record(controller, id)?;
    controller.session_mut().open_edit(&record);
    apply_assignments(controller, assignments)?;
    match controller.submit().await {
        Some(notice) => outcome(notice),
        None => Err(CliError::RecordNotFound(id.to_owned())),
    }
}

/// Delete record `id` once `confirm` agrees.
///
/// `confirm` receives the confirmation question; answering no issues no request.
///
/// # Errors
///
/// Unknown resource or record, failure reading the answer, or the backend
/// rejected the delete.
pub async fn delete<T: Transport>(
    controller: &mut GridController<T>,
    resource: &str,
    id: &str,
    confirm: impl FnOnce(&str) -> std::io::Result<bool>,
) -> Result<String, CliError> {
    open(controller, resource).await?;
    let record = find_record(controller, id)?;
    controller.session_mut().request_delete(&record);
    if !confirm(DELETE_CONFIRMATION)? {
        controller.session_mut().cancel_delete();
        return Ok("Cancelled".to_owned());
    }
    match controller.confirm_delete().await {
        Some(notice) => outcome(notice),
        None => Err(CliError::RecordNotFound(id.to_owned())),
    }
}

//! Grid page: one REST collection as an editable table.
//!
//! SYSTEM CONTEXT
//! ==============
//! This is the only route. On mount it loads the configured initial
//! resource; afterwards the dataset bar switches collections and the table
//! and dialogs drive create, edit and delete.
//!
//! DESIGN
//! ======
//! Every flow takes a synchronous step on the `GridSession` signal, awaits
//! the request without holding the signal, then applies the outcome in a
//! second synchronous step. Alerts are shown after the table reloads.

#[cfg(test)]
#[path = "grid_test.rs"]
mod grid_test;

use grid::session::DELETE_CONFIRMATION;
use grid::{Endpoint, GridConfig, GridSession, Record};
use leptos::prelude::*;

use crate::components::confirm_dialog::ConfirmDialog;
use crate::components::data_table::DataTable;
use crate::components::dataset_bar::DatasetBar;
use crate::components::record_dialog::RecordDialog;
use crate::state::ui::UiState;

/// URL to load for the dataset bar input: bare resource names resolve under
/// the API base, anything containing a `/` is used as typed.
fn dataset_target(input: &str, config: &GridConfig) -> Option<String> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    if input.contains('/') {
        return Some(input.to_owned());
    }
    Some(config.resource_url(input))
}

/// Heading above the table.
fn page_heading(session: &GridSession, loading: bool) -> String {
    let title = session.title();
    if !title.is_empty() {
        title
    } else if loading {
        "Loading...".to_owned()
    } else {
        "No dataset".to_owned()
    }
}

/// Grid page component.
#[component]
pub fn GridPage() -> impl IntoView {
    let session = expect_context::<RwSignal<GridSession>>();
    let ui = expect_context::<RwSignal<UiState>>();

    Effect::new(move || {
        let url = session.with_untracked(|s| s.config().initial_url());
        switch_dataset(session, ui, url);
    });

    let on_load = Callback::new(move |input: String| {
        let target = session.with_untracked(|s| dataset_target(&input, s.config()));
        if let Some(url) = target {
            switch_dataset(session, ui, url);
        }
    });
    let on_create = Callback::new(move |_| {
        session.update(|s| {
            s.open_create();
        });
    });
    let on_edit = Callback::new(move |record: Record| {
        session.update(|s| {
            s.open_edit(&record);
        });
    });
    let on_delete_request = Callback::new(move |record: Record| {
        session.update(|s| {
            s.request_delete(&record);
        });
    });
    let on_dialog_cancel = Callback::new(move |_| session.update(GridSession::close_dialog));
    let on_dialog_submit = Callback::new(move |_| submit_dialog(session, ui));
    let on_delete_cancel = Callback::new(move |_| session.update(GridSession::cancel_delete));
    let on_delete_confirm = Callback::new(move |_| confirm_delete(session, ui));

    let heading = move || session.with(|s| page_heading(s, ui.with(UiState::is_loading)));

    view! {
        <div class="grid-page">
            <header class="grid-page__header toolbar">
                <h1 class="grid-page__title">{heading}</h1>
                <span class="toolbar__spacer"></span>
                <DatasetBar on_load=on_load on_create=on_create/>
            </header>

            <main class="grid-page__body">
                <Show when=move || ui.with(UiState::is_loading)>
                    <p class="grid-page__loading">"Loading..."</p>
                </Show>
                <DataTable on_edit=on_edit on_delete=on_delete_request/>
            </main>

            <Show when=move || session.with(|s| s.dialog().is_open())>
                <RecordDialog on_cancel=on_dialog_cancel on_submit=on_dialog_submit/>
            </Show>
            <Show when=move || session.with(|s| s.pending_delete().is_some())>
                <ConfirmDialog
                    message=DELETE_CONFIRMATION
                    on_cancel=on_delete_cancel
                    on_confirm=on_delete_confirm
                />
            </Show>
        </div>
    }
}

// =============================================================================
// FLOWS
// =============================================================================

/// Load `url` and make its last path segment the active resource.
fn switch_dataset(session: RwSignal<GridSession>, ui: RwSignal<UiState>, url: String) {
    let Some(endpoint) = Endpoint::from_url(&url) else {
        #[cfg(feature = "hydrate")]
        log::warn!("cannot derive a resource from {url}");
        return;
    };
    #[cfg(feature = "hydrate")]
    {
        ui.update(UiState::begin_load);
        leptos::task::spawn_local(async move {
            let client = grid::RecordClient::new(crate::net::api::BrowserTransport);
            let (keys, records) = grid::controller::load_dataset(&client, &url).await;
            session.update(|s| s.apply_dataset(endpoint, &keys, records));
            ui.update(UiState::end_load);
        });
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (session, ui, endpoint);
    }
}

/// Send the open form and apply the outcome.
fn submit_dialog(session: RwSignal<GridSession>, ui: RwSignal<UiState>) {
    let Some(mutation) = session.try_update(GridSession::begin_submit).flatten() else {
        return;
    };
    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(complete(session, ui, mutation));
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (ui, mutation);
    }
}

/// Delete the record awaiting confirmation.
fn confirm_delete(session: RwSignal<GridSession>, ui: RwSignal<UiState>) {
    let Some(mutation) = session.try_update(GridSession::confirm_delete).flatten() else {
        return;
    };
    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(complete(session, ui, mutation));
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (ui, mutation);
    }
}

#[cfg(feature = "hydrate")]
async fn complete(session: RwSignal<GridSession>, ui: RwSignal<UiState>, mutation: grid::Mutation) {
    let client = grid::RecordClient::new(crate::net::api::BrowserTransport);
    let api_base = session.with_untracked(|s| s.config().api_base.clone());
    let result = grid::controller::send_mutation(&client, &api_base, &mutation).await;
    let Some(notice) = session.try_update(|s| s.finish(&mutation, &result)) else {
        return;
    };
    if result.is_ok() {
        if let Some((endpoint, url)) = session.with_untracked(GridSession::reload_target) {
            ui.update(UiState::begin_load);
            let (keys, records) = grid::controller::load_dataset(&client, &url).await;
            session.update(|s| {
                s.apply_reload(&endpoint, &keys, records);
            });
            ui.update(UiState::end_load);
        }
    }
    crate::util::notify::alert(&notice);
}

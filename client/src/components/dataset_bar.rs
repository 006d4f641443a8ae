//! Dataset switcher: configured resource tabs, a free URL input and the
//! create button.

#[cfg(test)]
#[path = "dataset_bar_test.rs"]
mod dataset_bar_test;

use grid::GridSession;
use leptos::prelude::*;

use crate::state::ui::UiState;

fn resource_tab_class(active: bool) -> &'static str {
    if active { "btn dataset-bar__tab dataset-bar__tab--active" } else { "btn dataset-bar__tab" }
}

fn is_active(session: &GridSession, resource: &str) -> bool {
    session.endpoint().is_some_and(|e| e.name() == resource)
}

/// Toolbar above the table.
///
/// `on_load` receives either a resource name or a URL typed by the user.
#[component]
pub fn DatasetBar(on_load: Callback<String>, on_create: Callback<()>) -> impl IntoView {
    let session = expect_context::<RwSignal<GridSession>>();
    let ui = expect_context::<RwSignal<UiState>>();

    let resources = session.with_untracked(|s| s.config().resources.clone());
    let load_typed = move || {
        let input = ui.with_untracked(|u| u.dataset_url.clone());
        on_load.run(input);
    };

    view! {
        <nav class="dataset-bar">
            {resources
                .into_iter()
                .map(|resource| {
                    let name = resource.clone();
                    let class = move || session.with(|s| resource_tab_class(is_active(s, &name)));
                    let target = resource.clone();
                    view! {
                        <button class=class on:click=move |_| on_load.run(target.clone())>
                            {resource}
                        </button>
                    }
                })
                .collect::<Vec<_>>()}
            <span class="toolbar__divider" aria-hidden="true"></span>
            <input
                class="dataset-bar__url"
                type="text"
                placeholder="/api/resource"
                prop:value=move || ui.with(|u| u.dataset_url.clone())
                on:input=move |ev| ui.update(|u| u.dataset_url = event_target_value(&ev))
                on:keydown=move |ev: leptos::ev::KeyboardEvent| {
                    if ev.key() == "Enter" {
                        ev.prevent_default();
                        load_typed();
                    }
                }
            />
            <button class="btn" on:click=move |_| load_typed()>
                "Load"
            </button>
            <span class="toolbar__divider" aria-hidden="true"></span>
            <button
                class="btn btn--primary"
                disabled=move || session.with(|s| s.endpoint().is_none())
                on:click=move |_| on_create.run(())
            >
                "+ New Record"
            </button>
        </nav>
    }
}

//! Modal create/edit form generated from the dataset columns.

#[cfg(test)]
#[path = "record_dialog_test.rs"]
mod record_dialog_test;

use grid::{FormField, GridSession};
use leptos::prelude::*;

/// Current text of input `name`, or empty once the form is gone.
fn field_value(session: &GridSession, name: &str) -> String {
    session.dialog().form().and_then(|f| f.field(name)).map(|f| f.value.clone()).unwrap_or_default()
}

fn submit_label(submitting: bool) -> &'static str {
    if submitting { "Saving..." } else { "Save" }
}

/// Dialog for the form currently held by the session.
///
/// Inputs are laid out once when the dialog mounts; their values track the
/// session so a failed submit keeps what the user typed.
#[component]
pub fn RecordDialog(on_cancel: Callback<()>, on_submit: Callback<()>) -> impl IntoView {
    let session = expect_context::<RwSignal<GridSession>>();

    let (title, fields): (&'static str, Vec<FormField>) = session.with_untracked(|s| {
        s.dialog().form().map(|f| (f.title(), f.fields.clone())).unwrap_or(("", Vec::new()))
    });
    let submitting = move || session.with(|s| s.dialog().is_submitting());

    let inputs = fields
        .into_iter()
        .map(|field| {
            let name = field.name.clone();
            let value = move || session.with(|s| field_value(s, &name));
            let target = field.name.clone();
            let on_input = move |ev: leptos::ev::Event| {
                let text = event_target_value(&ev);
                session.update(|s| {
                    s.set_field(&target, text);
                });
            };
            view! {
                <label class="dialog__label">
                    {field.label}
                    <input
                        class="dialog__input"
                        type=field.kind.html_type()
                        name=field.name
                        step="any"
                        readonly=field.read_only
                        prop:value=value
                        on:input=on_input
                    />
                </label>
            }
        })
        .collect::<Vec<_>>();

    view! {
        <div class="dialog-backdrop" on:click=move |_| on_cancel.run(())>
            <form
                class="dialog dialog--record"
                on:click=move |ev| ev.stop_propagation()
                on:submit=move |ev| {
                    ev.prevent_default();
                    on_submit.run(());
                }
            >
                <h2>{title}</h2>
                {inputs}
                <div class="dialog__actions">
                    <button type="button" class="btn" disabled=submitting on:click=move |_| on_cancel.run(())>
                        "Cancel"
                    </button>
                    <button type="submit" class="btn btn--primary" disabled=submitting>
                        {move || submit_label(submitting())}
                    </button>
                </div>
            </form>
        </div>
    }
}

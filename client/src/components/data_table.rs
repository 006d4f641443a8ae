//! Record table with sortable headers, search, paging and row actions.
//!
//! SYSTEM CONTEXT
//! ==============
//! Renders whatever `TableView` the session currently holds. The view is
//! replaced wholesale on every reload, so this component keeps no row state
//! of its own; edit and delete callbacks receive the row's record.

#[cfg(test)]
#[path = "data_table_test.rs"]
mod data_table_test;

use grid::schema::ACTIONS_LABEL;
use grid::table::PAGE_SIZES;
use grid::{GridSession, Record, SortDirection, SortState};
use leptos::prelude::*;

/// Arrow appended to the header of the sorted column.
fn sort_indicator(sort: SortState, column: usize) -> &'static str {
    match (sort.column == column, sort.direction) {
        (false, _) => "",
        (true, SortDirection::Ascending) => " ▲",
        (true, SortDirection::Descending) => " ▼",
    }
}

/// `aria-sort` value for a header cell.
fn aria_sort(sort: SortState, column: usize) -> &'static str {
    match (sort.column == column, sort.direction) {
        (false, _) => "none",
        (true, SortDirection::Ascending) => "ascending",
        (true, SortDirection::Descending) => "descending",
    }
}

fn page_label(page: usize, page_count: usize) -> String {
    format!("Page {} of {page_count}", page + 1)
}

/// The record table for the active dataset.
#[component]
pub fn DataTable(on_edit: Callback<Record>, on_delete: Callback<Record>) -> impl IntoView {
    let session = expect_context::<RwSignal<GridSession>>();

    let on_search = move |ev: leptos::ev::Event| {
        let query = event_target_value(&ev);
        session.update(|s| s.table_mut().set_search(&query));
    };
    let on_page_size = move |ev: leptos::ev::Event| {
        if let Ok(size) = event_target_value(&ev).parse::<usize>() {
            session.update(|s| s.table_mut().set_page_size(size));
        }
    };

    let headers = move || {
        session.with(|s| {
            let table = s.table();
            let sort = table.sort();
            table
                .schema()
                .columns()
                .iter()
                .enumerate()
                .map(|(index, column)| {
                    let label = format!("{}{}", column.label, sort_indicator(sort, index));
                    view! {
                        <th
                            class="data-table__header data-table__header--sortable"
                            aria-sort=aria_sort(sort, index)
                            on:click=move |_| session.update(|s| s.table_mut().sort_by(index))
                        >
                            {label}
                        </th>
                    }
                })
                .collect::<Vec<_>>()
        })
    };

    let rows = move || {
        let visible: Vec<(Record, Vec<String>)> = session.with(|s| {
            let table = s.table();
            table.visible_rows().into_iter().map(|r| (r.clone(), table.row_cells(r))).collect()
        });
        visible
            .into_iter()
            .map(|(record, cells)| {
                let edit_target = record.clone();
                let delete_target = record;
                view! {
                    <tr class="data-table__row">
                        {cells.into_iter().map(|cell| view! { <td>{cell}</td> }).collect::<Vec<_>>()}
                        <td class="data-table__actions">
                            <button class="btn btn--small" on:click=move |_| on_edit.run(edit_target.clone())>
                                "Edit"
                            </button>
                            <button
                                class="btn btn--small btn--danger"
                                on:click=move |_| on_delete.run(delete_target.clone())
                            >
                                "Delete"
                            </button>
                        </td>
                    </tr>
                }
            })
            .collect::<Vec<_>>()
    };

    let has_columns = move || session.with(|s| !s.table().schema().is_empty());
    let summary = move || session.with(|s| s.table().summary());
    let page_text = move || session.with(|s| page_label(s.table().page(), s.table().page_count()));
    let at_first_page = move || session.with(|s| s.table().page() == 0);
    let at_last_page = move || session.with(|s| s.table().page() + 1 >= s.table().page_count());

    view! {
        <section class="data-table">
            <div class="data-table__controls">
                <label class="data-table__length">
                    "Show "
                    <select on:change=on_page_size>
                        {PAGE_SIZES
                            .into_iter()
                            .map(|size| {
                                let selected = move || session.with(|s| s.table().page_size() == size);
                                view! { <option value=size.to_string() selected=selected>{size.to_string()}</option> }
                            })
                            .collect::<Vec<_>>()}
                    </select>
                    " entries"
                </label>
                <label class="data-table__search">
                    "Search: "
                    <input
                        type="search"
                        prop:value=move || session.with(|s| s.table().search().to_owned())
                        on:input=on_search
                    />
                </label>
            </div>

            <Show
                when=has_columns
                fallback=|| view! { <p class="data-table__empty">"No data available"</p> }
            >
                <table class="data-table__table">
                    <thead>
                        <tr>
                            {headers}
                            <th class="data-table__header">{ACTIONS_LABEL}</th>
                        </tr>
                    </thead>
                    <tbody>{rows}</tbody>
                </table>
            </Show>

            <div class="data-table__footer">
                <span class="data-table__summary">{summary}</span>
                <span class="toolbar__spacer"></span>
                <button
                    class="btn"
                    disabled=at_first_page
                    on:click=move |_| session.update(|s| s.table_mut().prev_page())
                >
                    "Previous"
                </button>
                <span class="data-table__page">{page_text}</span>
                <button
                    class="btn"
                    disabled=at_last_page
                    on:click=move |_| session.update(|s| s.table_mut().next_page())
                >
                    "Next"
                </button>
            </div>
        </section>
    }
}

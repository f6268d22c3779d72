//! Read-only grid for a `Table`.

use leptos::prelude::*;

use crate::table::Table;

#[component]
pub fn DataTable(table: Table) -> impl IntoView {
    let header = table
        .columns()
        .iter()
        .cloned()
        .map(|column| view! { <th>{column}</th> })
        .collect_view();
    let body = table
        .rows()
        .iter()
        .cloned()
        .map(|row| {
            let cells = row.into_iter().map(|cell| view! { <td>{cell}</td> }).collect_view();
            view! { <tr>{cells}</tr> }
        })
        .collect_view();

    view! {
        <div class="table-wrap">
            <table class="data-table">
                <thead>
                    <tr>{header}</tr>
                </thead>
                <tbody>{body}</tbody>
            </table>
        </div>
    }
}

//! Process List
//!
//! Community, Roads, Public Health and Environment records.

use leptos::*;

use localgov::portal::details::ProcessRow;

#[component]
pub fn ProcessList(rows: Vec<ProcessRow>) -> impl IntoView {
    view! {
        <ul class="process-list">
            {rows.into_iter().map(|row| view! {
                <li class="process-item">
                    <strong>{row.title}</strong>
                    <span class="status">{row.status}</span>
                    {row.submitted.map(|d| view! { <span class="muted">{format!("Submitted: {}", d)}</span> })}
                    {row.updated.map(|d| view! { <span class="muted">{format!("Updated: {}", d)}</span> })}
                    {row.form_data.map(|form| view! { <pre class="form-data">{form}</pre> })}
                </li>
            }).collect_view()}
        </ul>
    }
}

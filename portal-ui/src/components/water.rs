//! Water Details
//!
//! Quarterly consumption against allocation, newest first.

use leptos::*;

use localgov::portal::details::{self, QuarterRow, WaterCard};

use super::CardHeaderView;

#[component]
pub fn WaterDetails(cards: Vec<WaterCard>) -> impl IntoView {
    if cards.is_empty() {
        return view! { <p class="empty">{details::NO_WATER_PROPERTIES}</p> }.into_view();
    }

    cards
        .into_iter()
        .map(|card| {
            view! {
                <article class="record-card water-card">
                    <CardHeaderView header=card.header />
                    <div class="pills">
                        {card.property_type.map(|t| view! { <span class="pill">{format!("Type: {}", t)}</span> })}
                        {card.land_size.map(|s| view! { <span class="pill">{format!("Land Size: {}", s)}</span> })}
                    </div>
                    <h4>"Water Consumption History"</h4>
                    {if card.quarters.is_empty() {
                        view! { <p class="muted">{details::NO_WATER_QUARTERS}</p> }.into_view()
                    } else {
                        card.quarters
                            .into_iter()
                            .map(|row| view! { <Quarter row=row /> })
                            .collect_view()
                    }}
                </article>
            }
        })
        .collect_view()
}

#[component]
fn Quarter(row: QuarterRow) -> impl IntoView {
    let bar_style = format!(
        "width:{:.1}%;background-color:{}",
        row.bar_width(),
        row.bar_colour()
    );
    let status = row.status();
    let percent = row.percent_text();
    let status_class = if row.over_allocation {
        "status over"
    } else {
        "status within"
    };

    view! {
        <div class="quarter">
            <div class="quarter-head">
                <strong>{row.label}</strong>
                {row.due.map(|due| view! { <span class="muted">{format!("Due: {}", due)}</span> })}
            </div>
            <div class="usage-bar">
                <div class="usage-fill" style=bar_style />
            </div>
            <div class="quarter-figures">
                <span>{format!("Consumed: {}", row.consumed)}</span>
                <span>{format!("Allocation: {}", row.allocated)}</span>
                <span>{percent}</span>
                <span class=status_class>{status}</span>
            </div>
            {row.amount_owing.map(|owing| view! {
                <p class="owing">{format!("Amount Owing: {}", owing)}</p>
            })}
        </div>
    }
}

//! Rates Details
//!
//! One card per property: facts, account summary and the parcel map.

use leptos::*;

use localgov::portal::details::{self, AccountPanel, PropertyCard};

use super::{CardHeaderView, MiniMap};

#[component]
pub fn RatesDetails(cards: Vec<PropertyCard>) -> impl IntoView {
    if cards.is_empty() {
        return view! { <p class="empty">{details::NO_PROPERTIES}</p> }.into_view();
    }

    cards
        .into_iter()
        .map(|card| {
            view! {
                <article class="record-card property-card">
                    <CardHeaderView header=card.header />
                    <div class="pills">
                        {card.pills.into_iter().map(|pill| view! {
                            <span class="pill">{pill}</span>
                        }).collect_view()}
                    </div>
                    <dl class="facts">
                        {card.extras.into_iter().map(|(label, value)| view! {
                            <dt>{label}</dt>
                            <dd>{value}</dd>
                        }).collect_view()}
                    </dl>
                    {card.account.map(|account| view! { <Account account=account /> })}
                    <MiniMap plan=card.map />
                </article>
            }
        })
        .collect_view()
}

#[component]
fn Account(account: AccountPanel) -> impl IntoView {
    let on_off = |flag: bool| if flag { "On" } else { "Off" };

    view! {
        <section class="account">
            <div class="account-summary">
                <div>
                    <span class="label">"Current Balance"</span>
                    <strong>{account.balance}</strong>
                </div>
                <div>
                    <span class="label">"Next Due"</span>
                    <strong>{account.next_due}</strong>
                </div>
                <div class="flags">
                    {format!(
                        "Direct Debit {} · eNotice {}",
                        on_off(account.direct_debit),
                        on_off(account.e_notice)
                    )}
                </div>
            </div>

            <h4>"Instalments"</h4>
            <Lines items=account.instalments empty=details::NO_INSTALMENTS />

            <h4>"Last Bill"</h4>
            {match account.last_bill {
                Some(bill) => view! {
                    <dl class="facts">
                        <dt>"Period"</dt><dd>{bill.period}</dd>
                        <dt>"Amount"</dt><dd>{bill.amount}</dd>
                        <dt>"Status"</dt><dd>{bill.status}</dd>
                        <dt>"Method"</dt><dd>{bill.method}</dd>
                    </dl>
                }.into_view(),
                None => view! { <p class="muted">{details::NO_BILL}</p> }.into_view(),
            }}

            <h4>"Recent Bills"</h4>
            <Lines items=account.recent_bills empty=details::NO_HISTORY />

            <h4>"Valuation History"</h4>
            <Lines items=account.valuations empty=details::NO_VALUATIONS />

            <h4>"Waste & Overlays"</h4>
            {match account.entitlements {
                Some(rows) => view! {
                    <dl class="facts">
                        {rows.into_iter().map(|(label, value)| view! {
                            <dt>{label}</dt>
                            <dd>{value}</dd>
                        }).collect_view()}
                    </dl>
                }.into_view(),
                None => view! { <p class="muted">{details::NO_ENTITLEMENTS}</p> }.into_view(),
            }}
            <div class="pills">
                {account.overlays.into_iter().map(|overlay| view! {
                    <span class="pill overlay">{overlay}</span>
                }).collect_view()}
            </div>
        </section>
    }
}

#[component]
fn Lines(items: Vec<String>, empty: &'static str) -> impl IntoView {
    if items.is_empty() {
        return view! { <p class="muted">{empty}</p> }.into_view();
    }
    view! {
        <ul class="lines">
            {items.into_iter().map(|item| view! { <li>{item}</li> }).collect_view()}
        </ul>
    }
    .into_view()
}

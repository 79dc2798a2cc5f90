//! Dashboard Page
//!
//! Header, the nine category tiles and the details of the selected one.

use leptos::*;
use leptos_router::*;

use localgov::auth::{self, LOGIN_ROUTE};
use localgov::dashboard::{Dashboard, DashboardLoader, DashboardState, SESSION_EXPIRED};
use localgov::geo::MapSettings;
use localgov::portal::details;
use localgov::portal::{Category, CategoryView};

use crate::api::GlooClient;
use crate::components::{
    AnimalDetails, CategoryTiles, DevelopmentDetails, ErrorView, Loading, PortalHeader,
    ProcessList, RatesDetails, WasteDetails, WaterDetails,
};
use crate::state::{GlobalState, LocalStorageStore};

#[component]
pub fn DashboardPage() -> impl IntoView {
    let state = expect_context::<GlobalState>();
    let navigate = use_navigate();

    // Show whatever the last visit cached while the profile loads
    let cached = DashboardLoader::new(&GlooClient::from_storage(), &LocalStorageStore).cached_header();
    let header = create_rw_signal(cached);
    let (selected, set_selected) = create_signal(None::<Category>);

    let load = create_local_resource(
        || (),
        |_| async move {
            let api = GlooClient::from_storage();
            let store = LocalStorageStore;
            DashboardLoader::new(&api, &store).load().await
        },
    );

    let go_to_login = navigate.clone();
    create_effect(move |_| match load.get() {
        Some(DashboardState::Loaded(dashboard)) => header.set(dashboard.header),
        Some(DashboardState::SessionExpired) => {
            state.show_error(SESSION_EXPIRED);
            go_to_login(LOGIN_ROUTE, Default::default());
        }
        Some(DashboardState::SignedOut) => go_to_login(LOGIN_ROUTE, Default::default()),
        Some(DashboardState::Failed(_)) | None => {}
    });

    let on_logout = Callback::new(move |_| {
        if let Err(e) = auth::logout(&LocalStorageStore) {
            web_sys::console::error_1(&format!("Logout failed: {}", e).into());
        }
        navigate(LOGIN_ROUTE, Default::default());
    });

    view! {
        <div class="dashboard">
            <PortalHeader header=header on_logout=on_logout />

            {move || match load.get() {
                None => view! { <Loading message="Loading dashboard..." /> }.into_view(),
                Some(DashboardState::Loaded(dashboard)) => view! {
                    <DashboardBody dashboard=dashboard selected=selected set_selected=set_selected />
                }.into_view(),
                Some(DashboardState::Failed(message)) => view! {
                    <ErrorView
                        message=message
                        on_retry=Callback::new(move |_| load.refetch())
                        on_relogin=on_logout
                    />
                }.into_view(),
                Some(_) => view! { <Loading message="Redirecting to login..." /> }.into_view(),
            }}
        </div>
    }
}

#[component]
fn DashboardBody(
    dashboard: Dashboard,
    selected: ReadSignal<Option<Category>>,
    set_selected: WriteSignal<Option<Category>>,
) -> impl IntoView {
    let dashboard = store_value(dashboard);
    let tiles = Signal::derive(move || dashboard.with_value(|d| d.tiles(selected.get())));

    view! {
        <CategoryTiles
            tiles=tiles
            on_select=Callback::new(move |category| set_selected.set(Some(category)))
        />

        {move || selected.get().map(|category| view! {
            <section class="details">
                <h2>{format!("Details for {}", category)}</h2>
                {dashboard.with_value(|d| category_details(d.view(category)))}
            </section>
        })}
    }
}

fn category_details(view: CategoryView) -> View {
    match view {
        CategoryView::Empty(category) => view! {
            <p class="empty">{CategoryView::empty_message(category)}</p>
        }
        .into_view(),
        CategoryView::Rates(properties) => view! {
            <RatesDetails cards=details::rates_cards(&properties, &MapSettings::mini()) />
        }
        .into_view(),
        CategoryView::Water(properties) => view! {
            <WaterDetails cards=details::water_cards(&properties) />
        }
        .into_view(),
        CategoryView::Animals(animals) => view! { <AnimalDetails animals=animals /> }.into_view(),
        CategoryView::Waste(schedule) => view! { <WasteDetails schedule=schedule /> }.into_view(),
        CategoryView::Development(apps) => view! {
            <DevelopmentDetails cards=details::application_cards(&apps, &MapSettings::mini()) />
        }
        .into_view(),
        CategoryView::Processes(_, records) => view! {
            <ProcessList rows=details::process_rows(&records) />
        }
        .into_view(),
    }
}

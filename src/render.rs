//! Terminal rendering
//!
//! Plain-text layouts of the dashboard for the `localgov` command. Every
//! function returns a `String` so the output can be tested.

use serde_json::{json, Value};

use crate::dashboard::{Header, Tile};
use crate::geo::{feature_collection, tile_url, LatLng, MapPlan, MapSettings, TILE_SIZE};
use crate::portal::details::{
    self, AccountPanel, AnimalPanel, ApplicationCard, ProcessRow, PropertyCard, WastePanel,
    WaterCard,
};
use crate::portal::{AnimalAction, Category, CategoryView, WasteKind};

const RULE_WIDTH: usize = 60;

/// Sub-selections inside the Animals and Waste views, plus the card map
/// used for Rates and Development
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ViewOptions {
    pub animal_action: Option<AnimalAction>,
    /// Garbage when unset
    pub waste_kind: Option<WasteKind>,
    pub map: MapSettings,
}

fn rule() -> String {
    "-".repeat(RULE_WIDTH)
}

pub fn render_header(header: &Header) -> String {
    let mut lines = vec![header.welcome()];
    if let Some(council) = &header.council_name {
        lines.push(council.clone());
    }
    lines.join("\n")
}

pub fn render_tiles(tiles: &[Tile]) -> String {
    let mut lines = vec![
        format!("{:<3} {:<16} {:>8}", "", "Category", "Records"),
        rule(),
    ];
    for tile in tiles {
        let marker = if tile.selected { ">" } else { "" };
        lines.push(format!(
            "{:<3} {:<16} {:>8}",
            marker,
            tile.category.name(),
            tile.count
        ));
    }
    lines.join("\n")
}

/// Details section for the selected category
pub fn render_view(category: Category, view: &CategoryView, options: ViewOptions) -> String {
    let body = match view {
        CategoryView::Empty(category) => CategoryView::empty_message(*category),
        CategoryView::Rates(properties) => render_rates(&details::rates_cards(properties, &options.map)),
        CategoryView::Water(properties) => render_water(&details::water_cards(properties)),
        CategoryView::Animals(animals) => {
            render_animals(&details::animal_panel(animals, options.animal_action))
        }
        CategoryView::Waste(schedule) => render_waste(&details::waste_panel(
            schedule,
            options.waste_kind.unwrap_or(WasteKind::Garbage),
        )),
        CategoryView::Development(apps) => render_development(&details::application_cards(apps, &options.map)),
        CategoryView::Processes(_, records) => render_processes(&details::process_rows(records)),
    };
    format!("Details for {}\n{}\n{}", category, rule(), body)
}

pub fn render_rates(cards: &[PropertyCard]) -> String {
    if cards.is_empty() {
        return details::NO_PROPERTIES.to_string();
    }

    let mut lines = Vec::new();
    for card in cards {
        lines.push(card.header.title.clone());
        if let Some(council) = &card.header.council {
            lines.push(format!("  {}", council));
        }
        if !card.pills.is_empty() {
            lines.push(format!("  {}", card.pills.join(" | ")));
        }
        for (label, value) in &card.extras {
            lines.push(format!("  {:<20} {}", label, value));
        }
        if let Some(account) = &card.account {
            lines.extend(account_lines(account));
        }
        lines.push(format!("  Map: {}", map_line(&card.map)));
        lines.push(String::new());
    }
    trim_trailing(lines)
}

fn account_lines(account: &AccountPanel) -> Vec<String> {
    let on_off = |flag: bool| if flag { "On" } else { "Off" };
    let mut lines = vec![
        "  Account Summary".to_string(),
        format!("    {:<18} {}", "Current Balance", account.balance),
        format!("    {:<18} {}", "Next Due", account.next_due),
        format!(
            "    Direct Debit {} · eNotice {}",
            on_off(account.direct_debit),
            on_off(account.e_notice)
        ),
    ];

    lines.push("  Instalments".to_string());
    lines.extend(list_or(&account.instalments, details::NO_INSTALMENTS));

    lines.push("  Last Bill".to_string());
    match &account.last_bill {
        Some(bill) => {
            lines.push(format!("    {:<18} {}", "Period", bill.period));
            lines.push(format!("    {:<18} {}", "Amount", bill.amount));
            lines.push(format!("    {:<18} {}", "Status", bill.status));
            lines.push(format!("    {:<18} {}", "Method", bill.method));
        }
        None => lines.push(format!("    {}", details::NO_BILL)),
    }

    lines.push("  Recent Bills".to_string());
    lines.extend(list_or(&account.recent_bills, details::NO_HISTORY));

    lines.push("  Valuation History".to_string());
    lines.extend(list_or(&account.valuations, details::NO_VALUATIONS));

    lines.push("  Waste & Overlays".to_string());
    match &account.entitlements {
        Some(rows) => {
            for (label, value) in rows {
                lines.push(format!("    {:<18} {}", label, value));
            }
        }
        None => lines.push(format!("    {}", details::NO_ENTITLEMENTS)),
    }
    if !account.overlays.is_empty() {
        lines.push(format!("    [{}]", account.overlays.join("] [")));
    }
    lines
}

fn list_or(items: &[String], empty: &str) -> Vec<String> {
    if items.is_empty() {
        vec![format!("    {}", empty)]
    } else {
        items.iter().map(|item| format!("    {}", item)).collect()
    }
}

fn map_line(plan: &MapPlan) -> String {
    if plan.has_geometry() {
        format!("{} (zoom {})", plan.view.center, plan.view.zoom)
    } else {
        format!(
            "no location, default view {} (zoom {})",
            plan.view.center, plan.view.zoom
        )
    }
}

pub fn render_water(cards: &[WaterCard]) -> String {
    if cards.is_empty() {
        return details::NO_WATER_PROPERTIES.to_string();
    }

    let mut lines = Vec::new();
    for card in cards {
        lines.push(card.header.title.clone());
        if let Some(council) = &card.header.council {
            lines.push(format!("  Council: {}", council));
        }
        if let Some(kind) = &card.property_type {
            lines.push(format!("  Type: {}", kind));
        }
        if let Some(size) = &card.land_size {
            lines.push(format!("  Land Size: {}", size));
        }

        lines.push("  Water Consumption History".to_string());
        if card.quarters.is_empty() {
            lines.push(format!("    {}", details::NO_WATER_QUARTERS));
        } else {
            lines.push(format!(
                "    {:<16} {:>12} {:>12} {:>8}  {}",
                "Quarter", "Consumed", "Allocation", "Used", "Status"
            ));
            for q in &card.quarters {
                lines.push(format!(
                    "    {:<16} {:>12} {:>12} {:>8}  {}",
                    q.label,
                    q.consumed,
                    q.allocated,
                    q.percent_text(),
                    q.status()
                ));
                if let Some(due) = &q.due {
                    lines.push(format!("      Due: {}", due));
                }
                if let Some(owing) = &q.amount_owing {
                    lines.push(format!("      Amount Owing: {}", owing));
                }
            }
        }
        lines.push(String::new());
    }
    trim_trailing(lines)
}

pub fn render_animals(panel: &AnimalPanel) -> String {
    let mut lines = vec!["Animal Services".to_string()];
    for action in AnimalAction::all() {
        let marker = if panel.selected == Some(*action) { ">" } else { " " };
        lines.push(format!("{} {} {}", marker, action.icon(), action.label()));
    }

    if panel.selected.is_none() {
        lines.push(String::new());
        lines.push("Choose a service with --animal-action adopt|surrender|lost|support".to_string());
    }

    if !panel.listing.is_empty() {
        lines.push(String::new());
        lines.push("Animals Available for Adoption".to_string());
        for animal in &panel.listing {
            lines.push(format!("  {}", animal.name));
            for line in &animal.lines {
                lines.push(format!("    {}", line));
            }
            if let Some(temperament) = &animal.temperament {
                lines.push(format!("    {}", temperament));
            }
        }
    }
    if let Some(message) = &panel.message {
        lines.push(String::new());
        lines.push(message.clone());
    }
    lines.join("\n")
}

pub fn render_waste(panel: &WastePanel) -> String {
    let mut lines = vec!["Waste Services".to_string()];
    for kind in WasteKind::all() {
        let marker = if panel.selected == *kind { ">" } else { " " };
        lines.push(format!("{} {} {}", marker, kind.icon(), kind.label()));
    }
    lines.push(String::new());
    lines.push(panel.heading.to_string());

    if let Some(collection) = &panel.collection {
        lines.push(collection.next_collection.clone());
        if let Some(notes) = &collection.notes {
            lines.push(notes.clone());
        }
        if let Some(route) = &collection.route {
            lines.push(format!("Route map: {}", map_line(route)));
        }
        if let Some(hint) = collection.hint {
            lines.push(hint.to_string());
        }
    }
    if let Some(message) = &panel.empty_message {
        lines.push(message.clone());
    }
    lines.join("\n")
}

pub fn render_development(cards: &[ApplicationCard]) -> String {
    if cards.is_empty() {
        return details::NO_APPLICATIONS.to_string();
    }

    let mut lines = Vec::new();
    for card in cards {
        lines.push(card.header.title.clone());
        if let Some(property) = &card.property {
            lines.push(format!("  Property: {}", property));
        }
        if let Some(council) = &card.header.council {
            lines.push(format!("  Council: {}", council));
        }
        lines.push(format!("  Status: {}", card.status));
        if let Some(submitted) = &card.submitted {
            lines.push(format!("  Submitted: {}", submitted));
        }
        if let Some(approved) = &card.approved {
            lines.push(format!("  Approved: {}", approved));
        }
        if let Some(cost) = &card.estimated_cost {
            lines.push(format!("  Estimated Cost: {}", cost));
        }
        if let Some(description) = &card.description {
            lines.push(format!("  Description: {}", description));
        }
        if !card.documents.is_empty() {
            lines.push("  Documents:".to_string());
            for (label, url) in &card.documents {
                lines.push(format!("    {}: {}", label, url));
            }
        }
        lines.push(format!("  Map: {}", map_line(&card.map)));
        lines.push(String::new());
    }
    trim_trailing(lines)
}

pub fn render_processes(rows: &[ProcessRow]) -> String {
    let mut lines = Vec::new();
    for row in rows {
        lines.push(row.title.clone());
        lines.push(format!("  Status: {}", row.status));
        if let Some(submitted) = &row.submitted {
            lines.push(format!("  Submitted: {}", submitted));
        }
        if let Some(updated) = &row.updated {
            lines.push(format!("  Updated: {}", updated));
        }
        if let Some(form) = &row.form_data {
            lines.push(format!("  Form Data: {}", form));
        }
    }
    lines.join("\n")
}

/// A located record and the tile under it
#[derive(Debug, Clone, PartialEq)]
pub struct MapMarker {
    pub title: String,
    pub position: LatLng,
    pub zoom: u8,
    pub tile: Option<String>,
}

/// Pins for every located record of a category, each at its own card's view
pub fn map_markers(
    view: &CategoryView,
    tile_template: &str,
    settings: &MapSettings,
) -> Vec<MapMarker> {
    let plans: Vec<(String, MapPlan)> = match view {
        CategoryView::Rates(properties) => details::rates_cards(properties, settings)
            .into_iter()
            .map(|card| (card.header.title, card.map))
            .collect(),
        CategoryView::Development(apps) => details::application_cards(apps, settings)
            .into_iter()
            .map(|card| (card.property.unwrap_or(card.header.title), card.map))
            .collect(),
        _ => Vec::new(),
    };

    plans
        .iter()
        .flat_map(|(title, plan)| {
            plan.markers.iter().map(move |p| MapMarker {
                title: title.clone(),
                position: *p,
                zoom: plan.view.zoom,
                tile: marker_tile(plan, *p, tile_template),
            })
        })
        .collect()
}

fn marker_tile(plan: &MapPlan, p: LatLng, template: &str) -> Option<String> {
    let viewport = plan.viewport();
    let (x, y) = viewport.to_pixel(p);
    viewport
        .tiles()
        .into_iter()
        .find(|t| x >= t.left && x < t.left + TILE_SIZE && y >= t.top && y < t.top + TILE_SIZE)
        .map(|t| tile_url(template, &t))
}

pub fn markers_geojson(markers: &[MapMarker]) -> Value {
    feature_collection(markers.iter().map(|m| {
        (
            m.position,
            json!({ "title": m.title, "zoom": m.zoom, "tile": m.tile }),
        )
    }))
}

pub fn render_markers(markers: &[MapMarker]) -> String {
    if markers.is_empty() {
        return "No located records.".to_string();
    }
    let mut lines = vec![
        format!("{:<30} {:<22} {}", "Title", "Location", "Tile"),
        rule(),
    ];
    for m in markers {
        lines.push(format!(
            "{:<30} {:<22} {}",
            m.title,
            m.position.to_string(),
            m.tile.as_deref().unwrap_or("-")
        ));
    }
    lines.join("\n")
}

fn trim_trailing(mut lines: Vec<String>) -> String {
    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::portal::DashboardData;
    use serde_json::json;

    fn data() -> DashboardData {
        serde_json::from_value(json!({
            "Rates": [{"address": "12 River Rd", "zone": "R2"}],
            "Waste": [{"collection_type": "Recycling", "next_collection_date": "2024-08-06",
                       "collection_day": "Tuesday", "collection_frequency": "Fortnightly"}],
            "Roads": ["Pothole on Main St"]
        }))
        .unwrap()
    }

    #[test]
    fn test_header() {
        let header = Header {
            name: "Jo".to_string(),
            council_name: Some("Riverside Council".to_string()),
            council_logo_url: None,
        };
        assert_eq!(render_header(&header), "Welcome, Jo\nRiverside Council");
    }

    #[test]
    fn test_tiles_mark_selection() {
        let tiles = vec![
            Tile {
                category: Category::Rates,
                selected: true,
                count: 2,
            },
            Tile {
                category: Category::PublicHealth,
                selected: false,
                count: 0,
            },
        ];
        let out = render_tiles(&tiles);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[2].starts_with(">   Rates"));
        assert!(lines[2].ends_with('2'));
        assert!(lines[3].contains("Public Health"));
    }

    #[test]
    fn test_empty_category() {
        let data = data();
        let out = render_view(
            Category::Environment,
            &data.view(Category::Environment),
            ViewOptions::default(),
        );
        assert!(out.starts_with("Details for Environment\n"));
        assert!(out.ends_with("No entries found for Environment."));
    }

    #[test]
    fn test_rates_view() {
        let data = data();
        let out = render_view(Category::Rates, &data.view(Category::Rates), ViewOptions::default());
        assert!(out.contains("12 River Rd"));
        assert!(out.contains("Zone R2"));
        assert!(out.contains("Map: no location"));
        assert_eq!(render_rates(&[]), details::NO_PROPERTIES);
    }

    #[test]
    fn test_unlocated_card_uses_configured_view() {
        let data = data();
        let options = ViewOptions {
            map: MapSettings::mini().with_center(LatLng::new(-42.88, 147.33), 10),
            ..Default::default()
        };
        let out = render_view(Category::Rates, &data.view(Category::Rates), options);
        assert!(out.contains("Map: no location, default view -42.88000, 147.33000 (zoom 10)"));
    }

    #[test]
    fn test_waste_view_kinds() {
        let data = data();
        let view = data.view(Category::Waste);

        let garbage = render_view(Category::Waste, &view, ViewOptions::default());
        assert!(garbage.contains("> 🗑️ Garbage"));
        assert!(garbage.contains("No garbage collection information available for your area."));

        let recycling = render_view(
            Category::Waste,
            &view,
            ViewOptions {
                waste_kind: Some(WasteKind::Recycling),
                ..Default::default()
            },
        );
        assert!(recycling.contains("Next Collection: 06/08/2024 (Tuesday, Fortnightly)"));
    }

    #[test]
    fn test_animals_without_records() {
        let data = data();
        let view = data.view(Category::Animals);
        let out = render_view(
            Category::Animals,
            &view,
            ViewOptions {
                animal_action: Some(AnimalAction::Adopt),
                ..Default::default()
            },
        );
        assert!(out.contains("> 🐾 Adopt An Animal"));
        assert!(out.ends_with(details::NO_ANIMALS));
    }

    #[test]
    fn test_map_markers() {
        let data: DashboardData = serde_json::from_value(json!({
            "Rates": [
                {"address": "1 Harbour St", "gps_coordinates": {"lat": -33.87, "lng": 151.21}},
                {"address": "2 Nowhere Ln"}
            ]
        }))
        .unwrap();
        let markers = map_markers(
            &data.view(Category::Rates),
            crate::geo::OSM_TILE_URL,
            &MapSettings::mini(),
        );
        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].title, "1 Harbour St");
        let tile = markers[0].tile.as_deref().unwrap();
        assert!(tile.starts_with("https://"));
        assert!(tile.contains(&format!("/{}/", markers[0].zoom)));

        let geojson = markers_geojson(&markers);
        assert_eq!(geojson["type"], "FeatureCollection");
        assert_eq!(geojson["features"][0]["geometry"]["coordinates"][0], 151.21);

        assert!(map_markers(&data.view(Category::Roads), "", &MapSettings::mini()).is_empty());
        assert_eq!(render_markers(&[]), "No located records.");
    }

    #[test]
    fn test_process_titles() {
        let data = data();
        let out = render_view(Category::Roads, &data.view(Category::Roads), ViewOptions::default());
        assert!(out.contains("Pothole on Main St\n  Status: "));
    }
}

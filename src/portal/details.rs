//! Category details
//!
//! Turns decoded records into display-ready cards. Everything here is
//! plain strings and flags; the terminal renderer and the web components
//! only lay them out.

use serde_json::Value;

use super::data::{AnimalAction, WasteSchedule};
use super::format::{
    display_date, litres, money, or_missing, status_slug, title_case, whole_money, MISSING,
};
use super::types::{
    AdoptableAnimal, Bill, DevelopmentApplication, ProcessRecord, PropertyRecord, RatesAccount,
    WasteKind, WaterConsumption, WaterProperty,
};
use crate::geo::{MapPlan, MapSettings};

pub const NO_PROPERTIES: &str = "No properties found for this user.";
pub const NO_WATER_PROPERTIES: &str =
    "No properties found with water consumption data for this user.";
pub const NO_WATER_QUARTERS: &str = "No water consumption data available for this property.";
pub const NO_ANIMALS: &str = "No animals currently available for adoption.";
pub const NO_APPLICATIONS: &str = "No development applications found for this user.";
pub const NO_INSTALMENTS: &str = "No instalments.";
pub const NO_BILL: &str = "No bill yet.";
pub const NO_HISTORY: &str = "No history.";
pub const NO_VALUATIONS: &str = "No valuations.";
pub const NO_ENTITLEMENTS: &str = "No waste entitlements.";
pub const REPURPOSE_HINT: &str =
    "For more details on repurposing, visit your council's website or contact them directly.";

/// Colour of a water usage bar within allocation
pub const WITHIN_COLOUR: &str = "#28a745";
/// Colour of a water usage bar over allocation
pub const OVER_COLOUR: &str = "#dc3545";

/// Fields of a property that already have a dedicated place on the card
const EXCLUDED_FACTS: &[&str] = &[
    "id",
    "address",
    "council_name",
    "council_logo_url",
    "gps_coordinates",
    "shape_file_data",
    "property_type",
    "land_size_sqm",
    "property_value",
    "land_value",
    "zone",
    "created_at",
    "updated_at",
    "submitted_at",
    "rates",
];

/// Council branding and the card title
#[derive(Debug, Clone, PartialEq)]
pub struct CardHeader {
    pub logo_url: Option<String>,
    pub logo_alt: String,
    pub council: Option<String>,
    pub title: String,
}

impl CardHeader {
    fn new(logo_url: Option<&str>, council: Option<&str>, title: String) -> Self {
        Self {
            logo_url: logo_url.map(str::to_string),
            logo_alt: format!("{} logo", council.unwrap_or("Council")),
            council: council.map(str::to_string),
            title,
        }
    }
}

/// Numbers without a trailing `.0`
fn plain_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

// ============ Rates ============

#[derive(Debug, Clone, PartialEq)]
pub struct PropertyCard {
    pub header: CardHeader,
    /// Short pills under the address
    pub pills: Vec<String>,
    /// Remaining scalar fields as `(label, value)`
    pub extras: Vec<(String, String)>,
    pub account: Option<AccountPanel>,
    pub map: MapPlan,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AccountPanel {
    pub balance: String,
    pub next_due: String,
    pub direct_debit: bool,
    pub e_notice: bool,
    pub instalments: Vec<String>,
    pub last_bill: Option<BillSummary>,
    pub recent_bills: Vec<String>,
    pub valuations: Vec<String>,
    pub entitlements: Option<Vec<(String, String)>>,
    pub overlays: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BillSummary {
    pub period: String,
    pub amount: String,
    pub status: String,
    pub method: String,
}

/// One card per property, in API order. Unlocated properties get the
/// default view of `map`.
pub fn rates_cards(properties: &[PropertyRecord], map: &MapSettings) -> Vec<PropertyCard> {
    properties.iter().map(|item| property_card(item, map)).collect()
}

pub fn property_card(item: &PropertyRecord, map: &MapSettings) -> PropertyCard {
    let header = CardHeader::new(
        item.council_logo_url.as_deref(),
        item.council_name.as_deref(),
        or_missing(item.address.as_deref()),
    );

    let mut pills = Vec::new();
    if let Some(kind) = &item.property_type {
        pills.push(title_case(kind));
    }
    if let Some(zone) = &item.zone {
        pills.push(format!("Zone {}", zone));
    }
    if let Some(size) = item.land_size_sqm {
        pills.push(format!("{} m²", plain_number(size)));
    }
    if item.land_value.is_some() {
        pills.push(format!("LV {}", money(item.land_value)));
    }
    if item.property_value.is_some() {
        pills.push(format!("PV {}", money(item.property_value)));
    }

    PropertyCard {
        header,
        pills,
        extras: extra_facts(item),
        account: item.rates.as_ref().map(account_panel),
        map: MapPlan::for_property(
            item.gps_coordinates.and_then(|g| g.lat_lng()),
            item.shape_file_data.as_ref(),
            map,
        ),
    }
}

/// Scalar fields without a dedicated slot, labelled in title case
pub fn extra_facts(item: &PropertyRecord) -> Vec<(String, String)> {
    item.extra
        .iter()
        .filter(|(key, _)| !EXCLUDED_FACTS.contains(&key.as_str()))
        .filter_map(|(key, value)| {
            let text = match value {
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                _ => return None,
            };
            Some((title_case(key), text))
        })
        .collect()
}

pub fn account_panel(rates: &RatesAccount) -> AccountPanel {
    let instalments = rates
        .instalment_schedule
        .iter()
        .map(|it| {
            format!(
                "#{} · {} · {}",
                it.seq.map(|s| s.to_string()).unwrap_or_default(),
                display_date(it.due_date.as_deref()),
                money(it.amount)
            )
        })
        .collect();

    let recent_bills = rates
        .recent_invoices
        .iter()
        .map(|b| {
            let when = b.period_end.as_deref().or(b.period_start.as_deref());
            format!(
                "{} · {} · {}",
                display_date(when),
                money(b.amount),
                title_case(b.status.as_deref().unwrap_or_default())
            )
        })
        .collect();

    let mut history = rates.valuation_history.clone();
    history.sort_by_key(|v| v.year.unwrap_or(0));
    let valuations = history
        .iter()
        .map(|v| {
            let mut line = format!(
                "{} · CV {} · LV {}",
                v.year.map(|y| y.to_string()).unwrap_or_default(),
                money(v.capital_value),
                money(v.land_value)
            );
            if let Some(pct) = v.percent_change {
                line.push_str(&format!(" ({}%)", plain_number(pct)));
            }
            line
        })
        .collect();

    let entitlements = rates.waste_entitlements.as_ref().map(|w| {
        let mut rows = vec![
            (
                "Bin Size".to_string(),
                match w.bin_size_l {
                    Some(size) if size != 0.0 => format!("{}L", plain_number(size)),
                    _ => MISSING.to_string(),
                },
            ),
            (
                "Extra Bins".to_string(),
                w.extra_bins
                    .map(|n| n.to_string())
                    .unwrap_or_else(|| MISSING.to_string()),
            ),
        ];
        if let Some(day) = &w.collection_day {
            rows.push(("Collection Day".to_string(), day.clone()));
        }
        rows
    });

    AccountPanel {
        balance: money(rates.balance),
        next_due: display_date(rates.next_due_date.as_deref()),
        direct_debit: rates.dd_active,
        e_notice: rates.ebill_active,
        instalments,
        last_bill: rates.last_bill.as_ref().map(bill_summary),
        recent_bills,
        valuations,
        entitlements,
        overlays: rates.overlays.iter().map(|o| title_case(o)).collect(),
    }
}

fn bill_summary(bill: &Bill) -> BillSummary {
    BillSummary {
        period: format!(
            "{} – {}",
            display_date(bill.period_start.as_deref()),
            display_date(bill.period_end.as_deref())
        ),
        amount: money(bill.amount),
        status: title_case(bill.status.as_deref().unwrap_or(MISSING)),
        method: or_missing(bill.method.as_deref()),
    }
}

// ============ Water ============

#[derive(Debug, Clone, PartialEq)]
pub struct WaterCard {
    pub header: CardHeader,
    pub property_type: Option<String>,
    pub land_size: Option<String>,
    /// Most recent quarter first
    pub quarters: Vec<QuarterRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuarterRow {
    pub label: String,
    pub due: Option<String>,
    pub consumed: String,
    pub allocated: String,
    pub over_allocation: bool,
    pub amount_owing: Option<String>,
    pub percent: f64,
}

impl QuarterRow {
    pub fn status(&self) -> &'static str {
        if self.over_allocation {
            "Over Allocation"
        } else {
            "Within Allocation"
        }
    }

    /// Bar width in percent, never past the end of the track
    pub fn bar_width(&self) -> f64 {
        self.percent.min(100.0)
    }

    pub fn bar_colour(&self) -> &'static str {
        if self.over_allocation {
            OVER_COLOUR
        } else {
            WITHIN_COLOUR
        }
    }

    pub fn percent_text(&self) -> String {
        format!("{:.1}%", self.percent)
    }
}

pub fn water_cards(properties: &[WaterProperty]) -> Vec<WaterCard> {
    properties
        .iter()
        .map(|p| {
            let mut readings: Vec<&WaterConsumption> = p.water_consumptions.iter().collect();
            // Undated readings sort last
            readings.sort_by_key(|wc| {
                std::cmp::Reverse(
                    wc.quarter_start_date
                        .as_deref()
                        .and_then(super::format::parse_date),
                )
            });

            WaterCard {
                header: CardHeader::new(
                    p.council_logo_url.as_deref(),
                    p.council_name.as_deref(),
                    format!("Address: {}", or_missing(p.address.as_deref())),
                ),
                property_type: p.property_type.as_deref().map(capitalise),
                land_size: p
                    .land_size_sqm
                    .filter(|size| *size != 0.0)
                    .map(|size| format!("{} m²", plain_number(size))),
                quarters: readings.into_iter().map(quarter_row).collect(),
            }
        })
        .collect()
}

pub fn quarter_row(wc: &WaterConsumption) -> QuarterRow {
    use chrono::Datelike;

    let label = match wc
        .quarter_start_date
        .as_deref()
        .and_then(super::format::parse_date)
    {
        Some(date) => format!("Quarter {} {}", date.month0() / 3 + 1, date.year()),
        None => "Quarter unknown".to_string(),
    };

    let percent = if wc.allocated_litres > 0.0 {
        wc.consumed_litres / wc.allocated_litres * 100.0
    } else {
        0.0
    };

    QuarterRow {
        label,
        due: wc
            .bill_due_date
            .as_deref()
            .map(|d| display_date(Some(d))),
        consumed: litres(wc.consumed_litres),
        allocated: litres(wc.allocated_litres),
        over_allocation: wc.consumed_litres > wc.allocated_litres,
        amount_owing: wc.amount_owing.map(|a| money(Some(a))),
        percent,
    }
}

fn capitalise(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

// ============ Animals ============

#[derive(Debug, Clone, PartialEq)]
pub struct AnimalPanel {
    pub selected: Option<AnimalAction>,
    /// Filled for Adopt
    pub listing: Vec<AnimalCard>,
    /// Shown instead of the listing
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnimalCard {
    pub name: String,
    pub photo: Option<String>,
    pub gallery: Vec<String>,
    pub lines: Vec<String>,
    pub temperament: Option<String>,
}

pub fn animal_panel(animals: &[AdoptableAnimal], selected: Option<AnimalAction>) -> AnimalPanel {
    let mut panel = AnimalPanel {
        selected,
        listing: Vec::new(),
        message: None,
    };

    match selected {
        None => {}
        Some(AnimalAction::Adopt) => {
            if animals.is_empty() {
                panel.message = Some(NO_ANIMALS.to_string());
            } else {
                panel.listing = animals.iter().map(animal_card).collect();
            }
        }
        Some(action) => panel.message = action.info().map(str::to_string),
    }
    panel
}

fn animal_card(animal: &AdoptableAnimal) -> AnimalCard {
    let field = |v: &Option<String>| v.clone().unwrap_or_default();
    let breed = if animal.mixed {
        format!("Breed: {} (Mixed)", field(&animal.breed))
    } else {
        format!("Breed: {}", field(&animal.breed))
    };

    AnimalCard {
        name: field(&animal.name),
        photo: animal.main_photo.clone(),
        gallery: animal.gallery.clone(),
        lines: vec![
            format!("Type: {}", field(&animal.animal_type)),
            breed,
            format!("Sex: {}", field(&animal.sex)),
            format!("Age: {}", field(&animal.age)),
        ],
        temperament: animal.temperament.clone(),
    }
}

// ============ Waste ============

#[derive(Debug, Clone, PartialEq)]
pub struct WastePanel {
    pub selected: WasteKind,
    pub heading: &'static str,
    pub collection: Option<CollectionSummary>,
    /// Set when the resident has no collection of this kind
    pub empty_message: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CollectionSummary {
    pub next_collection: String,
    pub notes: Option<String>,
    /// Garbage only
    pub route: Option<MapPlan>,
    /// Repurpose only
    pub hint: Option<&'static str>,
}

pub fn waste_panel(schedule: &WasteSchedule, selected: WasteKind) -> WastePanel {
    let collection = schedule.for_kind(selected).map(|c| CollectionSummary {
        next_collection: format!(
            "Next Collection: {} ({}, {})",
            display_date(c.next_collection_date.as_deref()),
            c.collection_day.as_deref().unwrap_or_default(),
            c.collection_frequency.as_deref().unwrap_or_default()
        ),
        notes: c.notes.as_ref().map(|n| format!("Notes: {}", n)),
        route: (selected == WasteKind::Garbage)
            .then(|| MapPlan::for_route(c.route_geojson.as_ref())),
        hint: (selected == WasteKind::Repurpose).then_some(REPURPOSE_HINT),
    });

    WastePanel {
        selected,
        heading: selected.heading(),
        empty_message: collection.is_none().then(|| selected.empty_message()),
        collection,
    }
}

// ============ Development ============

#[derive(Debug, Clone, PartialEq)]
pub struct ApplicationCard {
    pub header: CardHeader,
    pub property: Option<String>,
    pub status: String,
    /// CSS class, `status-under-review`
    pub status_class: String,
    pub submitted: Option<String>,
    pub approved: Option<String>,
    pub estimated_cost: Option<String>,
    pub description: Option<String>,
    /// `(label, url)` pairs, `Document 1`, `Document 2`, ...
    pub documents: Vec<(String, String)>,
    pub map: MapPlan,
}

pub fn application_cards(
    applications: &[DevelopmentApplication],
    map: &MapSettings,
) -> Vec<ApplicationCard> {
    applications
        .iter()
        .map(|app| application_card(app, map))
        .collect()
}

pub fn application_card(app: &DevelopmentApplication, map: &MapSettings) -> ApplicationCard {
    let status = app.status.clone().unwrap_or_default();

    ApplicationCard {
        header: CardHeader::new(
            app.council_logo_url.as_deref(),
            app.council_name.as_deref(),
            format!(
                "{} Application",
                app.application_type.as_deref().unwrap_or_default()
            )
            .trim()
            .to_string(),
        ),
        property: app.property_address.clone(),
        status_class: format!("status-{}", status_slug(&status)),
        status,
        submitted: app
            .submission_date
            .as_deref()
            .map(|d| display_date(Some(d))),
        approved: app.approval_date.as_deref().map(|d| display_date(Some(d))),
        estimated_cost: app.estimated_cost.map(whole_money),
        description: app.description.clone(),
        documents: app
            .documents_url
            .iter()
            .enumerate()
            .map(|(i, url)| (format!("Document {}", i + 1), url.clone()))
            .collect(),
        map: MapPlan::for_application(app.gps_coordinates.and_then(|g| g.lat_lng()), map),
    }
}

// ============ Everything else ============

#[derive(Debug, Clone, PartialEq)]
pub struct ProcessRow {
    pub title: String,
    pub status: String,
    pub submitted: Option<String>,
    pub updated: Option<String>,
    /// Compact JSON of a non-empty `form_data`
    pub form_data: Option<String>,
}

pub fn process_rows(records: &[ProcessRecord]) -> Vec<ProcessRow> {
    records
        .iter()
        .map(|r| ProcessRow {
            title: r.title.clone().unwrap_or_default(),
            status: r.status.clone().unwrap_or_default(),
            submitted: r.submitted_at.as_deref().map(|d| display_date(Some(d))),
            updated: r.updated_at.as_deref().map(|d| display_date(Some(d))),
            form_data: r.form_data.as_ref().and_then(non_empty_json),
        })
        .collect()
}

fn non_empty_json(value: &Value) -> Option<String> {
    let has_entries = match value {
        Value::Object(map) => !map.is_empty(),
        Value::Array(list) => !list.is_empty(),
        Value::String(s) => !s.is_empty(),
        Value::Null | Value::Bool(_) | Value::Number(_) => false,
    };
    has_entries.then(|| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::portal::types::{Valuation, WasteCollection};
    use serde_json::json;

    fn property() -> PropertyRecord {
        serde_json::from_value(json!({
            "id": 1,
            "address": "12 River Rd",
            "council_name": "Riverside Council",
            "council_logo_url": "https://example.org/logo.png",
            "property_type": "single_dwelling",
            "zone": "R2",
            "land_size_sqm": 650,
            "land_value": 420000,
            "gps_coordinates": {"lat": -33.87, "lon": 151.21},
            "lot_number": "DP1234",
            "heritage_listed": false,
            "owners": ["A", "B"],
            "created_at": "2024-01-01",
            "rates": {
                "balance": 812.4,
                "next_due_date": "2024-09-30",
                "dd_active": true,
                "instalment_schedule": [{"seq": 1, "due_date": "2024-08-31", "amount": 400}],
                "valuation_history": [
                    {"year": 2023, "capital_value": 900000, "land_value": 420000, "percent_change": 2.5},
                    {"year": 2021, "capital_value": 850000, "land_value": 400000}
                ],
                "recent_invoices": [{"id": 9, "period_start": "2024-01-01", "amount": 400, "status": "part_paid"}],
                "waste_entitlements": {"bin_size_l": 240, "collection_day": "Monday"},
                "overlays": ["flood_zone"]
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_property_card_header_and_pills() {
        let card = property_card(&property(), &MapSettings::mini());
        assert_eq!(card.header.title, "12 River Rd");
        assert_eq!(card.header.logo_alt, "Riverside Council logo");
        assert_eq!(
            card.pills,
            vec!["Single Dwelling", "Zone R2", "650 m²", "LV $420,000.00"]
        );
        assert!(card.map.has_geometry());
    }

    #[test]
    fn test_property_extras_skip_known_and_nested() {
        let card = property_card(&property(), &MapSettings::mini());
        assert_eq!(
            card.extras,
            vec![
                ("Heritage Listed".to_string(), "false".to_string()),
                ("Lot Number".to_string(), "DP1234".to_string()),
            ]
        );
    }

    #[test]
    fn test_property_without_address() {
        let card = property_card(&PropertyRecord::default(), &MapSettings::mini());
        assert_eq!(card.header.title, "—");
        assert_eq!(card.header.logo_alt, "Council logo");
        assert!(card.account.is_none());
        assert!(!card.map.has_geometry());
    }

    #[test]
    fn test_account_panel() {
        let card = property_card(&property(), &MapSettings::mini());
        let account = card.account.unwrap();
        assert_eq!(account.balance, "$812.40");
        assert_eq!(account.next_due, "30/09/2024");
        assert!(account.direct_debit);
        assert!(!account.e_notice);
        assert_eq!(account.instalments, vec!["#1 · 31/08/2024 · $400.00"]);
        assert!(account.last_bill.is_none());
        assert_eq!(account.recent_bills, vec!["01/01/2024 · $400.00 · Part Paid"]);
        assert_eq!(
            account.valuations,
            vec![
                "2021 · CV $850,000.00 · LV $400,000.00",
                "2023 · CV $900,000.00 · LV $420,000.00 (2.5%)",
            ]
        );
        assert_eq!(
            account.entitlements.unwrap(),
            vec![
                ("Bin Size".to_string(), "240L".to_string()),
                ("Extra Bins".to_string(), "—".to_string()),
                ("Collection Day".to_string(), "Monday".to_string()),
            ]
        );
        assert_eq!(account.overlays, vec!["Flood Zone"]);
    }

    #[test]
    fn test_valuations_missing_year_sort_first() {
        let rates = RatesAccount {
            valuation_history: vec![
                Valuation {
                    year: Some(2020),
                    ..Default::default()
                },
                Valuation::default(),
            ],
            ..Default::default()
        };
        let panel = account_panel(&rates);
        assert!(panel.valuations[0].starts_with(" · CV"));
        assert_eq!(panel.balance, "—");
    }

    #[test]
    fn test_water_quarters_sorted_and_labelled() {
        let properties: Vec<WaterProperty> = serde_json::from_value(json!([{
            "id": 1,
            "address": "3 Lake St",
            "property_type": "residential",
            "water_consumptions": [
                {"quarter_start_date": "2024-01-01", "consumed_litres": 50000, "allocated_litres": 40000},
                {"quarter_start_date": "2024-07-01", "consumed_litres": 12500, "allocated_litres": 50000,
                 "bill_due_date": "2024-10-15", "amount_owing": 85.5},
                {"quarter_start_date": "2024-04-01", "consumed_litres": 10, "allocated_litres": 0}
            ]
        }]))
        .unwrap();

        let cards = water_cards(&properties);
        let card = &cards[0];
        assert_eq!(card.header.title, "Address: 3 Lake St");
        assert_eq!(card.property_type.as_deref(), Some("Residential"));

        let labels: Vec<&str> = card.quarters.iter().map(|q| q.label.as_str()).collect();
        assert_eq!(labels, vec!["Quarter 3 2024", "Quarter 2 2024", "Quarter 1 2024"]);

        let latest = &card.quarters[0];
        assert_eq!(latest.consumed, "12,500 L");
        assert_eq!(latest.percent_text(), "25.0%");
        assert_eq!(latest.status(), "Within Allocation");
        assert_eq!(latest.bar_colour(), WITHIN_COLOUR);
        assert_eq!(latest.due.as_deref(), Some("15/10/2024"));
        assert_eq!(latest.amount_owing.as_deref(), Some("$85.50"));

        // Zero allocation reads as 0% but still counts as over
        let zero = &card.quarters[1];
        assert_eq!(zero.percent, 0.0);
        assert!(zero.over_allocation);

        let over = &card.quarters[2];
        assert_eq!(over.percent_text(), "125.0%");
        assert_eq!(over.bar_width(), 100.0);
        assert_eq!(over.bar_colour(), OVER_COLOUR);
    }

    #[test]
    fn test_undated_water_quarters_last() {
        let properties: Vec<WaterProperty> = serde_json::from_value(json!([{
            "address": "8 Dry Creek Rd",
            "water_consumptions": [
                {"consumed_litres": 100, "allocated_litres": 1000},
                {"quarter_start_date": "2023-10-01", "consumed_litres": 200, "allocated_litres": 1000},
                {"quarter_start_date": "sometime", "consumed_litres": 300, "allocated_litres": 1000},
                {"quarter_start_date": "2024-04-01", "consumed_litres": 400, "allocated_litres": 1000}
            ]
        }]))
        .unwrap();

        let cards = water_cards(&properties);
        let labels: Vec<&str> = cards[0].quarters.iter().map(|q| q.label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["Quarter 2 2024", "Quarter 4 2023", "Quarter unknown", "Quarter unknown"]
        );
        // Stable among the undated ones
        assert_eq!(cards[0].quarters[2].consumed, "100 L");
        assert_eq!(cards[0].quarters[3].consumed, "300 L");
    }

    #[test]
    fn test_animal_panel_actions() {
        let animals = vec![AdoptableAnimal {
            name: Some("Whiskers".to_string()),
            breed: Some("Siamese".to_string()),
            mixed: true,
            ..Default::default()
        }];

        let panel = animal_panel(&animals, None);
        assert!(panel.listing.is_empty() && panel.message.is_none());

        let panel = animal_panel(&animals, Some(AnimalAction::Adopt));
        assert_eq!(panel.listing[0].name, "Whiskers");
        assert_eq!(panel.listing[0].lines[1], "Breed: Siamese (Mixed)");

        let panel = animal_panel(&[], Some(AnimalAction::Adopt));
        assert_eq!(panel.message.as_deref(), Some(NO_ANIMALS));

        let panel = animal_panel(&animals, Some(AnimalAction::Surrender));
        assert!(panel.listing.is_empty());
        assert!(panel.message.unwrap().starts_with("Information on surrendering"));
    }

    #[test]
    fn test_waste_panel() {
        let schedule = WasteSchedule::new(vec![
            WasteCollection {
                collection_type: Some("Garbage".to_string()),
                next_collection_date: Some("2024-08-05".to_string()),
                collection_day: Some("Monday".to_string()),
                collection_frequency: Some("Weekly".to_string()),
                notes: Some("Bins out by 6am".to_string()),
                ..Default::default()
            },
            WasteCollection {
                collection_type: Some("Repurpose".to_string()),
                ..Default::default()
            },
        ]);

        let garbage = waste_panel(&schedule, WasteKind::Garbage);
        let summary = garbage.collection.unwrap();
        assert_eq!(summary.next_collection, "Next Collection: 05/08/2024 (Monday, Weekly)");
        assert_eq!(summary.notes.as_deref(), Some("Notes: Bins out by 6am"));
        assert_eq!(summary.route.unwrap().view.zoom, 13);
        assert!(summary.hint.is_none());

        let repurpose = waste_panel(&schedule, WasteKind::Repurpose);
        assert_eq!(repurpose.heading, "Repurpose & Special Waste");
        let summary = repurpose.collection.unwrap();
        assert_eq!(summary.hint, Some(REPURPOSE_HINT));
        assert!(summary.route.is_none());

        let greenwaste = waste_panel(&schedule, WasteKind::Greenwaste);
        assert!(greenwaste.collection.is_none());
        assert_eq!(
            greenwaste.empty_message.as_deref(),
            Some("No greenwaste collection information available for your area.")
        );
    }

    #[test]
    fn test_application_card() {
        let app: DevelopmentApplication = serde_json::from_value(json!({
            "id": 4,
            "application_type": "Residential Extension",
            "property_address": "8 Hill Ave",
            "status": "Under Review",
            "submission_date": "2024-03-02",
            "estimated_cost": 185000,
            "documents_url": ["https://example.org/a.pdf", "https://example.org/b.pdf"]
        }))
        .unwrap();

        let card = application_card(&app, &MapSettings::mini());
        assert_eq!(card.header.title, "Residential Extension Application");
        assert_eq!(card.status_class, "status-under-review");
        assert_eq!(card.submitted.as_deref(), Some("02/03/2024"));
        assert!(card.approved.is_none());
        assert_eq!(card.estimated_cost.as_deref(), Some("$185,000"));
        assert_eq!(card.documents[1].0, "Document 2");
        assert_eq!(card.map.view.zoom, 12);
    }

    #[test]
    fn test_process_rows() {
        let records = vec![
            ProcessRecord {
                title: Some("Tree removal".to_string()),
                status: Some("Pending".to_string()),
                submitted_at: Some("2024-05-01T10:00:00".to_string()),
                form_data: Some(json!({"species": "Gum"})),
                ..Default::default()
            },
            ProcessRecord {
                title: Some("Street light".to_string()),
                form_data: Some(json!({})),
                ..Default::default()
            },
        ];

        let rows = process_rows(&records);
        assert_eq!(rows[0].submitted.as_deref(), Some("01/05/2024"));
        assert_eq!(rows[0].form_data.as_deref(), Some(r#"{"species":"Gum"}"#));
        assert!(rows[1].form_data.is_none());
        assert!(rows[1].updated.is_none());
    }
}

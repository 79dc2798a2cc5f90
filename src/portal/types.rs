//! Portal data types
//!
//! The JSON shapes returned by the council API, decoded leniently:
//! - `Category`: the nine fixed dashboard tiles
//! - `UserProfile`: the signed-in resident
//! - one record type per category with a dedicated details view

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::str::FromStr;
use thiserror::Error;

use super::lenient;
use crate::geo::LatLng;

/// Dashboard category, in tile order
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Rates,
    Water,
    Development,
    Community,
    Roads,
    Waste,
    Animals,
    #[serde(rename = "Public Health")]
    PublicHealth,
    Environment,
}

impl Category {
    /// All categories in tile order
    pub fn all() -> &'static [Category] {
        &[
            Category::Rates,
            Category::Water,
            Category::Development,
            Category::Community,
            Category::Roads,
            Category::Waste,
            Category::Animals,
            Category::PublicHealth,
            Category::Environment,
        ]
    }

    /// Name as used by the API and on the tile
    pub fn name(&self) -> &'static str {
        match self {
            Category::Rates => "Rates",
            Category::Water => "Water",
            Category::Development => "Development",
            Category::Community => "Community",
            Category::Roads => "Roads",
            Category::Waste => "Waste",
            Category::Animals => "Animals",
            Category::PublicHealth => "Public Health",
            Category::Environment => "Environment",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Category::Rates => "🏠",
            Category::Water => "💧",
            Category::Development => "🏗️",
            Category::Community => "👥",
            Category::Roads => "🛣️",
            Category::Waste => "🗑️",
            Category::Animals => "🐾",
            Category::PublicHealth => "⚕️",
            Category::Environment => "🌿",
        }
    }

    /// Animals and Waste offer services even with no records
    pub fn always_has_details(&self) -> bool {
        matches!(self, Category::Animals | Category::Waste)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Unknown category name
#[derive(Error, Debug, PartialEq)]
#[error("Unknown category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect::<String>()
            .to_ascii_lowercase();

        Category::all()
            .iter()
            .copied()
            .find(|c| c.name().replace(' ', "").to_ascii_lowercase() == wanted)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// Record identifier, numeric or textual depending on the table
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum RecordId {
    Number(i64),
    Text(String),
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordId::Number(n) => write!(f, "{}", n),
            RecordId::Text(s) => f.write_str(s),
        }
    }
}

/// The signed-in resident
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    #[serde(default)]
    pub id: Option<RecordId>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub council_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub council_logo_url: Option<String>,
}

/// `{lat, lon}` pair attached to properties and applications
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct GpsCoordinates {
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub lat: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_f64", alias = "lng")]
    pub lon: Option<f64>,
}

impl GpsCoordinates {
    /// Both halves present
    pub fn lat_lng(&self) -> Option<LatLng> {
        Some(LatLng::new(self.lat?, self.lon?))
    }
}

// ============ Rates ============

/// A rateable property (Rates category)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PropertyRecord {
    #[serde(default)]
    pub id: Option<RecordId>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub council_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub council_logo_url: Option<String>,
    #[serde(default)]
    pub gps_coordinates: Option<GpsCoordinates>,
    /// Parcel boundary as GeoJSON (object or encoded string)
    #[serde(default)]
    pub shape_file_data: Option<Value>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub property_type: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub land_size_sqm: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub property_value: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub land_value: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub zone: Option<String>,
    #[serde(default)]
    pub rates: Option<RatesAccount>,
    /// Any other fields the API sends
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Rates account attached to a property
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RatesAccount {
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub balance: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub next_due_date: Option<String>,
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub instalment_schedule: Vec<Instalment>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub dd_active: bool,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub ebill_active: bool,
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub valuation_history: Vec<Valuation>,
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub recent_invoices: Vec<Bill>,
    #[serde(default)]
    pub waste_entitlements: Option<WasteEntitlements>,
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub overlays: Vec<String>,
    #[serde(default)]
    pub last_bill: Option<Bill>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Instalment {
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub seq: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub due_date: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub amount: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Valuation {
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub year: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub capital_value: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub land_value: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub percent_change: Option<f64>,
}

/// A rates notice
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Bill {
    #[serde(default)]
    pub id: Option<RecordId>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub period_start: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub period_end: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub amount: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub method: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct WasteEntitlements {
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub bin_size_l: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub extra_bins: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub collection_day: Option<String>,
}

// ============ Water ============

/// A property with metered water usage (Water category)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct WaterProperty {
    #[serde(default)]
    pub id: Option<RecordId>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub council_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub council_logo_url: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub property_type: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub land_size_sqm: Option<f64>,
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub water_consumptions: Vec<WaterConsumption>,
}

/// One billing quarter of water usage
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct WaterConsumption {
    #[serde(default)]
    pub id: Option<RecordId>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub quarter_start_date: Option<String>,
    #[serde(default, deserialize_with = "lenient::f64_or_zero")]
    pub consumed_litres: f64,
    #[serde(default, deserialize_with = "lenient::f64_or_zero")]
    pub allocated_litres: f64,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub bill_due_date: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub amount_owing: Option<f64>,
}

// ============ Animals ============

/// An animal listed for adoption (Animals category)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AdoptableAnimal {
    #[serde(default)]
    pub id: Option<RecordId>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub name: Option<String>,
    #[serde(default, alias = "mainPhoto", deserialize_with = "lenient::opt_string")]
    pub main_photo: Option<String>,
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub gallery: Vec<String>,
    #[serde(default, rename = "type", deserialize_with = "lenient::opt_string")]
    pub animal_type: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub breed: Option<String>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub mixed: bool,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub sex: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub age: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub temperament: Option<String>,
}

// ============ Waste ============

/// Kind of kerbside collection
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum WasteKind {
    Garbage,
    Recycling,
    Greenwaste,
    Repurpose,
}

impl WasteKind {
    pub fn all() -> &'static [WasteKind] {
        &[
            WasteKind::Garbage,
            WasteKind::Recycling,
            WasteKind::Greenwaste,
            WasteKind::Repurpose,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            WasteKind::Garbage => "Garbage",
            WasteKind::Recycling => "Recycling",
            WasteKind::Greenwaste => "Greenwaste",
            WasteKind::Repurpose => "Repurpose",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            WasteKind::Garbage => "🗑️",
            WasteKind::Recycling => "♻️",
            WasteKind::Greenwaste => "🌿",
            WasteKind::Repurpose => "🔄",
        }
    }

    /// Heading above the collection details
    pub fn heading(&self) -> &'static str {
        match self {
            WasteKind::Garbage => "Garbage Collection",
            WasteKind::Recycling => "Recycling Collection",
            WasteKind::Greenwaste => "Greenwaste Collection",
            WasteKind::Repurpose => "Repurpose & Special Waste",
        }
    }

    /// Shown when the resident has no collection of this kind
    pub fn empty_message(&self) -> String {
        format!(
            "No {} collection information available for your area.",
            self.label().to_lowercase()
        )
    }
}

impl std::fmt::Display for WasteKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for WasteKind {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace(['-', '_', ' '], "").to_ascii_lowercase();
        WasteKind::all()
            .iter()
            .copied()
            .find(|k| k.label().to_ascii_lowercase() == wanted)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// A kerbside collection service (Waste category)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct WasteCollection {
    #[serde(default)]
    pub id: Option<RecordId>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub collection_type: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub next_collection_date: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub collection_day: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub collection_frequency: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub notes: Option<String>,
    /// Truck route as GeoJSON
    #[serde(default)]
    pub route_geojson: Option<Value>,
}

impl WasteCollection {
    pub fn kind(&self) -> Option<WasteKind> {
        self.collection_type.as_deref()?.parse().ok()
    }
}

// ============ Development ============

/// A development application lodged by the resident
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DevelopmentApplication {
    #[serde(default)]
    pub id: Option<RecordId>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub application_type: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub property_address: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub council_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub council_logo_url: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub submission_date: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub approval_date: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub estimated_cost: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub documents_url: Vec<String>,
    #[serde(default)]
    pub gps_coordinates: Option<GpsCoordinates>,
}

// ============ Other categories ============

/// A council process the resident is involved in
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ProcessItem {
    /// Older dashboard payloads only list titles
    Title(String),
    Record(ProcessRecord),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ProcessRecord {
    #[serde(default)]
    pub id: Option<RecordId>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub submitted_at: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub form_data: Option<Value>,
}

impl ProcessItem {
    /// Normalise both shapes to a record
    pub fn into_record(self) -> ProcessRecord {
        match self {
            ProcessItem::Title(title) => ProcessRecord {
                title: Some(title),
                ..Default::default()
            },
            ProcessItem::Record(record) => record,
        }
    }
}

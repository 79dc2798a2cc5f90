//! Dashboard payload
//!
//! `/dashboard/` returns an object keyed by category name, each holding a
//! list of records. Records stay raw until a category is opened so that one
//! malformed entry only hides itself.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use super::types::{
    AdoptableAnimal, Category, DevelopmentApplication, ProcessItem, ProcessRecord,
    PropertyRecord, WasteCollection, WasteKind, WaterProperty,
};

/// Records grouped by category name
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(from = "Value", into = "Value")]
pub struct DashboardData {
    categories: BTreeMap<String, Vec<Value>>,
}

impl From<Value> for DashboardData {
    fn from(value: Value) -> Self {
        let mut categories = BTreeMap::new();
        match value {
            Value::Object(map) => {
                for (name, records) in map {
                    match records {
                        Value::Array(list) => {
                            categories.insert(name, list);
                        }
                        Value::Null => {}
                        other => {
                            tracing::warn!(category = %name, "Expected a list, got {}", other);
                        }
                    }
                }
            }
            Value::Null => {}
            _ => tracing::warn!("Dashboard payload is not an object, treating as empty"),
        }
        Self { categories }
    }
}

impl From<DashboardData> for Value {
    fn from(data: DashboardData) -> Self {
        Value::Object(
            data.categories
                .into_iter()
                .map(|(k, v)| (k, Value::Array(v)))
                .collect(),
        )
    }
}

impl DashboardData {
    /// Raw records for `category`, empty when the API omitted it
    pub fn items(&self, category: Category) -> &[Value] {
        self.categories
            .get(category.name())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Record count per category, in tile order
    pub fn counts(&self) -> Vec<(Category, usize)> {
        Category::all()
            .iter()
            .map(|c| (*c, self.items(*c).len()))
            .collect()
    }

    /// Decode the records of `category` into its details view
    pub fn view(&self, category: Category) -> CategoryView {
        let items = self.items(category);
        if items.is_empty() && !category.always_has_details() {
            return CategoryView::Empty(category);
        }

        match category {
            Category::Rates => CategoryView::Rates(decode_all(category, items)),
            Category::Water => CategoryView::Water(decode_all(category, items)),
            Category::Animals => CategoryView::Animals(decode_all(category, items)),
            Category::Waste => CategoryView::Waste(WasteSchedule::new(decode_all(category, items))),
            Category::Development => CategoryView::Development(decode_all(category, items)),
            _ => CategoryView::Processes(
                category,
                decode_all::<ProcessItem>(category, items)
                    .into_iter()
                    .map(ProcessItem::into_record)
                    .collect(),
            ),
        }
    }
}

fn decode_all<T: DeserializeOwned>(category: Category, items: &[Value]) -> Vec<T> {
    items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| match T::deserialize(item) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!(category = %category, index, error = %e, "Skipping unreadable record");
                None
            }
        })
        .collect()
}

/// The decoded contents of one category
#[derive(Debug, Clone, PartialEq)]
pub enum CategoryView {
    /// No records and no standing services
    Empty(Category),
    Rates(Vec<PropertyRecord>),
    Water(Vec<WaterProperty>),
    Animals(Vec<AdoptableAnimal>),
    Waste(WasteSchedule),
    Development(Vec<DevelopmentApplication>),
    /// Community, Roads, Public Health, Environment
    Processes(Category, Vec<ProcessRecord>),
}

impl CategoryView {
    /// Message shown for an empty category
    pub fn empty_message(category: Category) -> String {
        format!("No entries found for {}.", category)
    }
}

/// Waste collections grouped by kind
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WasteSchedule {
    collections: Vec<WasteCollection>,
}

impl WasteSchedule {
    pub fn new(collections: Vec<WasteCollection>) -> Self {
        Self { collections }
    }

    /// First collection of `kind`, if the resident has one
    pub fn for_kind(&self, kind: WasteKind) -> Option<&WasteCollection> {
        self.collections.iter().find(|c| c.kind() == Some(kind))
    }

    pub fn is_empty(&self) -> bool {
        self.collections.is_empty()
    }
}

/// Animal service the resident picked
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum AnimalAction {
    Adopt,
    Surrender,
    Lost,
    Support,
}

impl AnimalAction {
    pub fn all() -> &'static [AnimalAction] {
        &[
            AnimalAction::Adopt,
            AnimalAction::Surrender,
            AnimalAction::Lost,
            AnimalAction::Support,
        ]
    }

    /// Button caption
    pub fn label(&self) -> &'static str {
        match self {
            AnimalAction::Adopt => "Adopt An Animal",
            AnimalAction::Surrender => "Surrender An Animal",
            AnimalAction::Lost => "Report Lost",
            AnimalAction::Support => "Animal Care & Support Services",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            AnimalAction::Adopt => "🐾",
            AnimalAction::Surrender => "🏡",
            AnimalAction::Lost => "🔍",
            AnimalAction::Support => "❤️",
        }
    }

    /// Fixed text for actions that do not list animals
    pub fn info(&self) -> Option<&'static str> {
        match self {
            AnimalAction::Adopt => None,
            AnimalAction::Surrender => {
                Some("Information on surrendering an animal. Please contact us for details.")
            }
            AnimalAction::Lost => Some(
                "Information on reporting a lost animal. Provide details and contact information.",
            ),
            AnimalAction::Support => {
                Some("Details about animal care and support services available in your area.")
            }
        }
    }
}

impl std::str::FromStr for AnimalAction {
    type Err = super::types::UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "adopt" => Ok(AnimalAction::Adopt),
            "surrender" => Ok(AnimalAction::Surrender),
            "lost" | "report-lost" => Ok(AnimalAction::Lost),
            "support" | "care" => Ok(AnimalAction::Support),
            _ => Err(super::types::UnknownCategory(s.to_string())),
        }
    }
}

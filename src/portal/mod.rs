//! Portal Data
//!
//! What the council API returns and how it is shown:
//! - `types`: records per category
//! - `data`: the dashboard payload and per-category views
//! - `details`: display-ready cards
//! - `format`: money, dates and labels

pub mod data;
pub mod details;
pub mod format;
pub mod lenient;
pub mod types;

pub use data::{AnimalAction, CategoryView, DashboardData, WasteSchedule};
pub use types::{
    AdoptableAnimal, Category, DevelopmentApplication, GpsCoordinates, ProcessItem,
    ProcessRecord, PropertyRecord, RatesAccount, RecordId, UnknownCategory, UserProfile,
    WasteCollection, WasteKind, WaterConsumption, WaterProperty,
};

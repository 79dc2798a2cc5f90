//! UI Components
//!
//! Reusable Leptos components for the portal pages.

pub mod animals;
pub mod card_header;
pub mod development;
pub mod header;
pub mod loading;
pub mod mini_map;
pub mod processes;
pub mod protected_route;
pub mod rates;
pub mod tiles;
pub mod toast;
pub mod waste;
pub mod water;

pub use animals::AnimalDetails;
pub use card_header::CardHeaderView;
pub use development::DevelopmentDetails;
pub use header::PortalHeader;
pub use loading::{ErrorView, Loading};
pub use mini_map::MiniMap;
pub use processes::ProcessList;
pub use protected_route::ProtectedRoute;
pub use rates::RatesDetails;
pub use tiles::CategoryTiles;
pub use toast::Toast;
pub use waste::WasteDetails;
pub use water::WaterDetails;

//! # LocalGov
//!
//! Resident portal client for council records: property rates, water
//! usage, development applications, waste collection, animal services and
//! the other council processes a resident has open.
//!
//! ## Modules
//!
//! - [`portal`]: API data model, category views and display formatting
//! - [`geo`]: Web Mercator maths, GeoJSON overlays and tile layout
//! - [`auth`]: token decoding, the stored session, route guard and login flows
//! - [`client`]: the portal API trait and its reqwest implementation
//! - [`dashboard`]: loads the profile and category data for the dashboard
//! - [`render`]: plain-text layouts used by the `localgov` command
//!
//! Everything outside the `native` feature also builds for WASM, where
//! `portal-ui` supplies its own API client and session store.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use localgov::auth::{login, FileSessionStore};
//! use localgov::client::{ClientConfig, HttpClient};
//! use localgov::dashboard::{DashboardLoader, DashboardState};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let api = HttpClient::new(ClientConfig::default())?;
//!     let store = FileSessionStore::new("session.json");
//!
//!     login(&api, &store, "resident@example.org", "secret").await?;
//!
//!     if let DashboardState::Loaded(dashboard) = DashboardLoader::new(&api, &store).load().await {
//!         println!("{}", dashboard.header.welcome());
//!     }
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod client;
#[cfg(feature = "native")]
pub mod config;
pub mod dashboard;
pub mod geo;
pub mod portal;
pub mod render;

pub use auth::{
    Access, AuthError, AuthResult, DenyReason, MemorySessionStore, RouteGuard, Session,
    SessionError, SessionStore, TokenClaims, TokenError, TokenStatus,
};
#[cfg(feature = "native")]
pub use auth::FileSessionStore;

pub use client::{ClientError, ClientResult, PortalApi};
#[cfg(feature = "native")]
pub use client::{ClientConfig, HttpClient};

#[cfg(feature = "native")]
pub use config::{Config, ConfigError, ConfigResult};

pub use dashboard::{Dashboard, DashboardLoader, DashboardState, Header, Tile};

pub use geo::{GeoError, LatLng, MapPlan, MapView, Viewport};

pub use portal::{Category, CategoryView, DashboardData, UserProfile};

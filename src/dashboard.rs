//! Dashboard loading
//!
//! One load is at most two sequential requests: the profile for the
//! header, then the category data. 401/403 on either ends the session.
//! There are no retries; the resident reloads to try again.

use crate::auth::session::{Session, SessionStore};
use crate::client::{ClientError, PortalApi};
use crate::portal::{Category, CategoryView, DashboardData, UserProfile};

/// Greeting name when the profile has none
pub const FALLBACK_NAME: &str = "Resident";
pub const SESSION_EXPIRED: &str = "Your session has expired or is invalid. Please log in again.";
pub const LOAD_FAILED: &str = "Failed to load dashboard data.";

/// Welcome line and council branding
#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    pub name: String,
    pub council_name: Option<String>,
    pub council_logo_url: Option<String>,
}

impl Header {
    /// Whatever the last visit cached
    pub fn from_session(session: &Session) -> Self {
        Self {
            name: session
                .user_name
                .clone()
                .unwrap_or_else(|| FALLBACK_NAME.to_string()),
            council_name: session.council_name.clone(),
            council_logo_url: session.council_logo_url.clone(),
        }
    }

    /// Fresh values from the profile; missing council fields are dropped
    pub fn from_profile(profile: &UserProfile) -> Self {
        Self {
            name: profile
                .name
                .clone()
                .unwrap_or_else(|| FALLBACK_NAME.to_string()),
            council_name: profile.council_name.clone(),
            council_logo_url: profile.council_logo_url.clone(),
        }
    }

    pub fn welcome(&self) -> String {
        format!("Welcome, {}", self.name)
    }

    pub fn logo_alt(&self) -> String {
        format!("{} Logo", self.council_name.as_deref().unwrap_or("Council"))
    }
}

/// One category tile
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tile {
    pub category: Category,
    pub selected: bool,
    pub count: usize,
}

/// A loaded dashboard
#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    pub header: Header,
    pub data: DashboardData,
}

impl Dashboard {
    /// All nine tiles in order, marking `selected`
    pub fn tiles(&self, selected: Option<Category>) -> Vec<Tile> {
        self.data
            .counts()
            .into_iter()
            .map(|(category, count)| Tile {
                category,
                selected: selected == Some(category),
                count,
            })
            .collect()
    }

    pub fn view(&self, category: Category) -> CategoryView {
        self.data.view(category)
    }
}

/// Result of a load
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardState {
    /// No token stored; go to the login page
    SignedOut,
    /// The API rejected the token and the session was cleared
    SessionExpired,
    /// Anything else; the message is ready to show
    Failed(String),
    Loaded(Dashboard),
}

impl DashboardState {
    pub fn message(&self) -> Option<&str> {
        match self {
            DashboardState::SessionExpired => Some(SESSION_EXPIRED),
            DashboardState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Resource {
    Profile,
    Dashboard,
}

impl Resource {
    fn label(&self) -> &'static str {
        match self {
            Resource::Profile => "user profile",
            Resource::Dashboard => "dashboard data",
        }
    }
}

pub struct DashboardLoader<'a> {
    api: &'a dyn PortalApi,
    store: &'a dyn SessionStore,
}

impl<'a> DashboardLoader<'a> {
    pub fn new(api: &'a dyn PortalApi, store: &'a dyn SessionStore) -> Self {
        Self { api, store }
    }

    /// Header as cached by the last visit, shown while loading
    pub fn cached_header(&self) -> Header {
        let session = self.store.load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Session store unreadable");
            Session::default()
        });
        Header::from_session(&session)
    }

    pub async fn load(&self) -> DashboardState {
        let session = match self.store.load() {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!(error = %e, "Session store unreadable");
                return DashboardState::SignedOut;
            }
        };
        let Some(token) = session.token.clone().filter(|t| !t.is_empty()) else {
            tracing::info!("No token found, redirecting to login");
            return DashboardState::SignedOut;
        };

        let profile = match self.api.profile(&token).await {
            Ok(profile) => profile,
            Err(e) => return self.fail(e, Resource::Profile),
        };
        if profile.name.is_none() {
            tracing::warn!("Profile has no name, using fallback");
        }
        let header = Header::from_profile(&profile);
        self.cache_header(session, &header);

        let data = match self.api.dashboard(&token).await {
            Ok(data) => data,
            Err(e) => return self.fail(e, Resource::Dashboard),
        };
        tracing::info!(
            categories = data.counts().iter().filter(|(_, n)| *n > 0).count(),
            "Dashboard loaded"
        );

        DashboardState::Loaded(Dashboard { header, data })
    }

    /// Remember the header for the next visit. Absent fields keep their
    /// previous cached value.
    fn cache_header(&self, mut session: Session, header: &Header) {
        if header.name != FALLBACK_NAME {
            session.user_name = Some(header.name.clone());
        }
        if let Some(council) = &header.council_name {
            session.council_name = Some(council.clone());
        }
        if let Some(logo) = &header.council_logo_url {
            session.council_logo_url = Some(logo.clone());
        }
        if let Err(e) = self.store.save(&session) {
            tracing::warn!(error = %e, "Could not cache profile");
        }
    }

    fn fail(&self, err: ClientError, resource: Resource) -> DashboardState {
        tracing::error!(resource = resource.label(), error = %err, "Dashboard fetch failed");

        if err.is_auth_failure() {
            if let Err(e) = self.store.clear() {
                tracing::warn!(error = %e, "Failed to clear session");
            }
            return DashboardState::SessionExpired;
        }

        let reason = match err {
            ClientError::Api { status, message } => {
                let fallback = format!(
                    "Server responded with status: {} for {}",
                    status,
                    resource.label()
                );
                match resource {
                    Resource::Profile => fallback,
                    Resource::Dashboard => message.unwrap_or(fallback),
                }
            }
            other => other.to_string(),
        };
        DashboardState::Failed(format!("{} {}", LOAD_FAILED, reason))
    }
}

//! Pages
//!
//! Route-level components.

pub mod dashboard;
pub mod login;
pub mod signup;

pub use dashboard::DashboardPage;
pub use login::LoginPage;
pub use signup::SignupPage;

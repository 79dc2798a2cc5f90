//! API Client
//!
//! Browser implementation of the portal API.

pub mod client;

pub use client::{get_api_base, GlooClient};

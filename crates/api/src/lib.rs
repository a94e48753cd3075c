//! Lensfolio API Library
//!
//! This crate contains the API server components for Lensfolio.

pub mod auth;
pub mod config;
pub mod error;
pub mod profiles;
pub mod routes;
pub mod routing;
pub mod state;

pub use config::Config;
pub use error::{ApiError, ApiResult};
pub use routing::{RoutingCache, RoutingConfig, TenantResolver, TenantRoutingFlags};
pub use state::AppState;

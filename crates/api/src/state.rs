//! Shared application state

use std::sync::Arc;
use std::time::Duration;

use sqlx::PgPool;

use crate::auth::SessionLookup;
use crate::config::Config;
use crate::profiles::ProfileStore;
use crate::routing::{RouterState, RoutingCache, RoutingConfig, TenantResolver};

/// State shared by all request handlers
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub profiles: Arc<dyn ProfileStore>,
    pub cache: Arc<RoutingCache>,
    router_state: RouterState,
}

impl AppState {
    pub fn new(
        config: &Config,
        pool: PgPool,
        profiles: Arc<dyn ProfileStore>,
        sessions: Arc<dyn SessionLookup>,
    ) -> Self {
        let routing = Arc::new(RoutingConfig::from_config(config));
        let cache = Arc::new(RoutingCache::new(routing.dev_mode));
        let resolver = TenantResolver::new(
            profiles.clone(),
            cache.clone(),
            Duration::from_millis(config.profile_lookup_timeout_ms),
        );

        Self {
            pool,
            profiles,
            cache,
            router_state: RouterState {
                config: routing,
                resolver,
                sessions,
            },
        }
    }

    /// State for the routing middleware layer
    pub fn router_state(&self) -> RouterState {
        self.router_state.clone()
    }
}

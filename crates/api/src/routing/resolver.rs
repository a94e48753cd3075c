//! Tenant resolution with caching
//!
//! Resolves a candidate username to its routing flags: reserved-word check,
//! then cache, then the profile store under a bounded timeout. Any store
//! error or timeout degrades to "not found" so routing fails closed; negative
//! results are never cached so a freshly created tenant resolves on the very
//! next request.

use std::sync::Arc;
use std::time::Duration;

use crate::profiles::ProfileStore;
use crate::routing::cache::{RoutingCache, TenantRoutingFlags};
use crate::routing::is_reserved;

/// Tenant resolver with caching
#[derive(Clone)]
pub struct TenantResolver {
    store: Arc<dyn ProfileStore>,
    cache: Arc<RoutingCache>,
    lookup_timeout: Duration,
}

impl TenantResolver {
    pub fn new(store: Arc<dyn ProfileStore>, cache: Arc<RoutingCache>, lookup_timeout: Duration) -> Self {
        Self {
            store,
            cache,
            lookup_timeout,
        }
    }

    /// Resolve a username to its routing flags.
    ///
    /// Returns None for reserved words, unknown tenants, store errors, and
    /// timeouts alike; callers cannot distinguish them and must treat all of
    /// them as a routing miss.
    pub async fn resolve(&self, identifier: &str) -> Option<TenantRoutingFlags> {
        let identifier = identifier.to_lowercase();

        // Reserved paths take precedence unconditionally
        if is_reserved(&identifier) {
            return None;
        }

        if let Some(flags) = self.cache.get(&identifier) {
            return Some(flags);
        }

        let lookup = self.store.find_by_username(&identifier);
        match tokio::time::timeout(self.lookup_timeout, lookup).await {
            Ok(Ok(Some(profile))) => {
                let flags = TenantRoutingFlags {
                    username: profile.username,
                    subdomain_enabled: profile.subdomain_enabled,
                };
                self.cache.put(flags.clone());
                Some(flags)
            }
            Ok(Ok(None)) => {
                tracing::debug!(tenant = %identifier, "no tenant for identifier");
                None
            }
            Ok(Err(err)) => {
                tracing::warn!(tenant = %identifier, error = %err, "profile lookup failed, failing closed");
                None
            }
            Err(_) => {
                tracing::warn!(tenant = %identifier, "profile lookup timed out, failing closed");
                None
            }
        }
    }
}

//! Host-based tenant routing
//!
//! This module decides, for every inbound request, whether to:
//! - redirect a base-domain path (`lensfolio.com/alice/...`) to the tenant's
//!   subdomain (`alice.lensfolio.com/...`) when the tenant has opted in,
//! - rewrite a tenant-subdomain request to an internal path,
//! - reject a subdomain whose tenant is unknown or has not opted in (404),
//! - or gate an operator-facing path behind session authentication.
//!
//! Tenant routing flags are cached in-process with a TTL to avoid a profile
//! lookup on every request.

mod cache;
mod middleware;
mod parser;
mod resolver;

pub use cache::{CacheStats, RoutingCache, TenantRoutingFlags};
pub use middleware::{routing_middleware, RouterState};
pub use parser::{classify, RequestDescriptor};
pub use resolver::TenantResolver;

use crate::config::Config;

/// Path segments that can never be interpreted as a tenant username.
/// Dashboard-area entry points and infrastructure prefixes take precedence
/// over tenant resolution unconditionally.
pub const RESERVED_PATHS: &[&str] = &[
    "api",
    "www",
    "static",
    "assets",
    "dashboard",
    "account",
    "login",
    "signup",
    "pricing",
    "support",
    "terms",
    "privacy",
    "subdomain",
    "404",
];

/// Path prefixes gated behind session authentication
pub const PROTECTED_PREFIXES: &[&str] = &["/dashboard", "/account"];

/// Routing configuration, fixed at process start.
///
/// Decision functions take this value rather than reading environment state,
/// so they stay pure and unit-testable.
#[derive(Debug, Clone)]
pub struct RoutingConfig {
    /// Base domain, optionally carrying a port (e.g. "localhost:3000")
    pub base_domain: String,
    /// Development mode: bypass the routing cache and mark rewritten
    /// responses uncacheable
    pub dev_mode: bool,
    /// Where unauthenticated protected-prefix requests are sent
    pub landing_path: String,
    /// Internal path serving the 404 page for rejected subdomains
    pub not_found_path: String,
}

impl RoutingConfig {
    pub fn from_config(config: &Config) -> Self {
        Self {
            base_domain: config.base_domain.clone(),
            dev_mode: config.environment.is_development(),
            landing_path: "/".to_string(),
            not_found_path: "/404".to_string(),
        }
    }

    /// Base domain with any port suffix removed, for host comparisons
    pub fn base_host(&self) -> &str {
        self.base_domain
            .split(':')
            .next()
            .unwrap_or(&self.base_domain)
    }
}

/// Whether a path segment is reserved and must never resolve as a tenant
pub fn is_reserved(segment: &str) -> bool {
    RESERVED_PATHS.contains(&segment.to_lowercase().as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserved_paths() {
        assert!(is_reserved("dashboard"));
        assert!(is_reserved("API"));
        assert!(is_reserved("www"));
        assert!(!is_reserved("alice"));
        assert!(!is_reserved("studio-north"));
    }

    #[test]
    fn test_base_host_strips_port() {
        let config = RoutingConfig {
            base_domain: "localhost:3000".to_string(),
            dev_mode: true,
            landing_path: "/".to_string(),
            not_found_path: "/404".to_string(),
        };
        assert_eq!(config.base_host(), "localhost");

        let config = RoutingConfig {
            base_domain: "lensfolio.com".to_string(),
            dev_mode: false,
            landing_path: "/".to_string(),
            not_found_path: "/404".to_string(),
        };
        assert_eq!(config.base_host(), "lensfolio.com");
    }
}

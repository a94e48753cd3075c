//! In-memory tenant routing cache with TTL
//!
//! Caches username-to-routing-flag lookups to avoid a profile store query on
//! every request. Entries are replaced wholesale and never partially mutated,
//! so concurrent readers and writers may race freely; last put wins. Each
//! serving process owns an independent cache, which bounds staleness at the
//! TTL rather than requiring coordination.

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

/// Default cache TTL (10 minutes)
const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(600);

/// Routing flags for one tenant, as cached by the router.
/// The profile store is authoritative; the router never writes these back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TenantRoutingFlags {
    pub username: String,
    pub subdomain_enabled: bool,
}

/// Cache entry with creation time
#[derive(Clone)]
struct CacheEntry {
    flags: TenantRoutingFlags,
    created_at: Instant,
}

impl CacheEntry {
    fn new(flags: TenantRoutingFlags) -> Self {
        Self {
            flags,
            created_at: Instant::now(),
        }
    }

    fn is_expired(&self, ttl: Duration) -> bool {
        self.created_at.elapsed() > ttl
    }
}

/// Thread-safe in-memory routing flag cache
///
/// In bypass mode (local development) `get` always misses and `put` is a
/// no-op, so every request sees the latest profile store state.
pub struct RoutingCache {
    /// Maps lower-cased username -> routing flags
    entries: RwLock<HashMap<String, CacheEntry>>,
    ttl: Duration,
    bypass: bool,
}

impl RoutingCache {
    /// Create a new cache with the default TTL
    pub fn new(bypass: bool) -> Self {
        Self::with_ttl(DEFAULT_CACHE_TTL, bypass)
    }

    /// Create a new cache with a custom TTL
    pub fn with_ttl(ttl: Duration, bypass: bool) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
            bypass,
        }
    }

    /// Get cached routing flags for a username.
    /// Returns None when absent, expired, or in bypass mode. Expired entries
    /// are left in place; a fresh put supersedes them.
    pub fn get(&self, username: &str) -> Option<TenantRoutingFlags> {
        if self.bypass {
            return None;
        }

        let entries = self.entries.read().ok()?;
        let entry = entries.get(&username.to_lowercase())?;

        if entry.is_expired(self.ttl) {
            None
        } else {
            Some(entry.flags.clone())
        }
    }

    /// Cache routing flags for a tenant, superseding any existing entry
    pub fn put(&self, flags: TenantRoutingFlags) {
        if self.bypass {
            return;
        }

        if let Ok(mut entries) = self.entries.write() {
            let key = flags.username.to_lowercase();
            entries.insert(key, CacheEntry::new(flags));
        }
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        if let Ok(entries) = self.entries.read() {
            let total = entries.len();
            let expired = entries.values().filter(|e| e.is_expired(self.ttl)).count();
            CacheStats {
                total_entries: total,
                expired_entries: expired,
                active_entries: total - expired,
            }
        } else {
            CacheStats::default()
        }
    }
}

/// Cache statistics
#[derive(Default, Debug, serde::Serialize)]
pub struct CacheStats {
    pub total_entries: usize,
    pub expired_entries: usize,
    pub active_entries: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    fn flags(username: &str, enabled: bool) -> TenantRoutingFlags {
        TenantRoutingFlags {
            username: username.to_string(),
            subdomain_enabled: enabled,
        }
    }

    #[test]
    fn test_cache_get_put() {
        let cache = RoutingCache::new(false);

        // Initially empty
        assert!(cache.get("alice").is_none());

        cache.put(flags("alice", true));
        assert_eq!(cache.get("alice"), Some(flags("alice", true)));
    }

    #[test]
    fn test_cache_key_is_case_insensitive() {
        let cache = RoutingCache::new(false);

        cache.put(flags("Alice", true));
        assert_eq!(cache.get("alice"), Some(flags("Alice", true)));
        assert_eq!(cache.get("ALICE"), Some(flags("Alice", true)));
    }

    #[test]
    fn test_cache_expiration() {
        let cache = RoutingCache::with_ttl(Duration::from_millis(50), false);

        cache.put(flags("alice", true));
        assert!(cache.get("alice").is_some());

        // Wait for expiration
        sleep(Duration::from_millis(60));
        assert!(cache.get("alice").is_none());
    }

    #[test]
    fn test_put_supersedes_in_place() {
        let cache = RoutingCache::new(false);

        cache.put(flags("alice", true));
        cache.put(flags("alice", false));
        assert_eq!(cache.get("alice"), Some(flags("alice", false)));
        assert_eq!(cache.stats().total_entries, 1);
    }

    #[test]
    fn test_bypass_mode() {
        let cache = RoutingCache::new(true);

        cache.put(flags("alice", true));
        assert!(cache.get("alice").is_none());
        assert_eq!(cache.stats().total_entries, 0);
    }

    #[test]
    fn test_stats_counts_expired() {
        let cache = RoutingCache::with_ttl(Duration::from_millis(20), false);

        cache.put(flags("alice", true));
        cache.put(flags("bob", false));
        sleep(Duration::from_millis(30));
        cache.put(flags("carol", true));

        let stats = cache.stats();
        assert_eq!(stats.total_entries, 3);
        assert_eq!(stats.expired_entries, 2);
        assert_eq!(stats.active_entries, 1);
    }
}

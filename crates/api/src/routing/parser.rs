//! Host and path classification
//!
//! Pure functions over the raw Host header and request path. No I/O, no
//! side effects; everything downstream keys off the resulting descriptor.

/// Per-request view of the host and path, derived once and discarded after
/// the routing decision
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDescriptor {
    /// Static-asset or API request; bypasses all routing logic
    pub is_static_or_api: bool,
    /// Host header with any `:port` suffix removed, lower-cased
    pub host_without_port: String,
    /// Non-empty path segments, in order
    pub path_segments: Vec<String>,
    /// Host equals the configured base domain exactly
    pub is_base_domain: bool,
    /// Host is `{label}.{base_domain}` with a non-`www` label
    pub is_subdomain: bool,
    /// The subdomain label when `is_subdomain` holds
    pub subdomain_label: Option<String>,
}

/// Classify a request's host header and path against the base domain.
///
/// `base_host` must already have its port stripped. A host that matches
/// neither the base domain nor a subdomain of it (including a malformed
/// header) classifies as a base-domain request and falls through to
/// ordinary handling.
pub fn classify(host: &str, path: &str, base_host: &str) -> RequestDescriptor {
    let host_without_port = normalize_host(host);

    let path_segments: Vec<String> = path
        .split('/')
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();

    let is_static_or_api = match path_segments.first().map(String::as_str) {
        Some("static") | Some("api") => true,
        _ => path_segments.last().is_some_and(|s| s.contains('.')),
    };

    let base_suffix = format!(".{base_host}");
    let subdomain_label = host_without_port
        .strip_suffix(&base_suffix)
        .filter(|label| !label.is_empty() && *label != "www")
        .map(str::to_string);

    RequestDescriptor {
        is_static_or_api,
        is_base_domain: host_without_port == base_host,
        is_subdomain: subdomain_label.is_some(),
        subdomain_label,
        host_without_port,
        path_segments,
    }
}

/// Normalize a host header value: strip the port, lowercase
pub fn normalize_host(host: &str) -> String {
    let host = host.split(':').next().unwrap_or(host);
    host.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "lensfolio.com";

    #[test]
    fn test_normalize_host() {
        assert_eq!(normalize_host("Lensfolio.COM"), "lensfolio.com");
        assert_eq!(normalize_host("lensfolio.com:8080"), "lensfolio.com");
        assert_eq!(normalize_host("ALICE.LENSFOLIO.COM:443"), "alice.lensfolio.com");
    }

    #[test]
    fn test_base_domain_request() {
        let desc = classify("lensfolio.com", "/alice/gallery", BASE);
        assert!(desc.is_base_domain);
        assert!(!desc.is_subdomain);
        assert_eq!(desc.subdomain_label, None);
        assert_eq!(desc.path_segments, vec!["alice", "gallery"]);
    }

    #[test]
    fn test_base_domain_with_port() {
        let desc = classify("lensfolio.com:3000", "/", BASE);
        assert!(desc.is_base_domain);
        assert!(desc.path_segments.is_empty());
    }

    #[test]
    fn test_subdomain_request() {
        let desc = classify("alice.lensfolio.com", "/2025/wedding", BASE);
        assert!(desc.is_subdomain);
        assert!(!desc.is_base_domain);
        assert_eq!(desc.subdomain_label.as_deref(), Some("alice"));
        assert_eq!(desc.path_segments, vec!["2025", "wedding"]);
    }

    #[test]
    fn test_www_is_not_a_tenant_subdomain() {
        let desc = classify("www.lensfolio.com", "/", BASE);
        assert!(!desc.is_subdomain);
        assert!(!desc.is_base_domain);
        assert_eq!(desc.subdomain_label, None);
    }

    #[test]
    fn test_nested_label_still_classifies_as_subdomain() {
        // "a.b" can never resolve as a tenant, so this ends in a 404 rewrite
        // downstream rather than falling through open
        let desc = classify("a.b.lensfolio.com", "/", BASE);
        assert!(desc.is_subdomain);
        assert_eq!(desc.subdomain_label.as_deref(), Some("a.b"));
    }

    #[test]
    fn test_foreign_host_falls_through() {
        let desc = classify("evil.example.com", "/alice", BASE);
        assert!(!desc.is_base_domain);
        assert!(!desc.is_subdomain);
        assert_eq!(desc.host_without_port, "evil.example.com");
    }

    #[test]
    fn test_malformed_host_does_not_panic() {
        let desc = classify("", "/", BASE);
        assert!(!desc.is_base_domain);
        assert!(!desc.is_subdomain);

        let desc = classify(":::", "/x", BASE);
        assert!(!desc.is_subdomain);
    }

    #[test]
    fn test_static_and_api_prefixes() {
        assert!(classify(BASE, "/static/logo.css", BASE).is_static_or_api);
        assert!(classify(BASE, "/api/leads", BASE).is_static_or_api);
        assert!(!classify(BASE, "/alice", BASE).is_static_or_api);
    }

    #[test]
    fn test_file_extension_short_circuits() {
        assert!(classify(BASE, "/favicon.ico", BASE).is_static_or_api);
        assert!(classify(BASE, "/alice/cover.webp", BASE).is_static_or_api);
        assert!(!classify(BASE, "/alice/gallery", BASE).is_static_or_api);
    }
}

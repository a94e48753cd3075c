//! The per-request routing decision
//!
//! One axum middleware layer wrapped around the whole router. Evaluation
//! order, terminal in one step: static/API pass-through, base-domain
//! redirect, subdomain rewrite, protected-prefix auth guard, pass-through.
//! Rewrites mutate the request URI before the inner router matches, so the
//! rest of the routing tree never needs to be subdomain-aware.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderValue, Request, Uri},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::auth::SessionLookup;
use crate::routing::parser::classify;
use crate::routing::resolver::TenantResolver;
use crate::routing::{is_reserved, RoutingConfig, PROTECTED_PREFIXES};

/// State shared by every routing decision
#[derive(Clone)]
pub struct RouterState {
    pub config: Arc<RoutingConfig>,
    pub resolver: TenantResolver,
    pub sessions: Arc<dyn SessionLookup>,
}

/// Decide redirect vs. rewrite vs. reject vs. pass-through for one request
pub async fn routing_middleware(
    State(state): State<RouterState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let config = &state.config;

    let host = request
        .headers()
        .get(header::HOST)
        .and_then(|h| h.to_str().ok())
        .unwrap_or_default()
        .to_string();
    let path = request.uri().path().to_string();
    let query = request.uri().query().map(str::to_string);

    let desc = classify(&host, &path, config.base_host());

    // Static assets and API calls bypass tenant routing entirely
    if desc.is_static_or_api {
        return next.run(request).await;
    }

    // Base domain: canonicalize opted-in tenants onto their subdomain
    if desc.is_base_domain {
        if let Some(first) = desc.path_segments.first() {
            if !is_reserved(first) {
                if let Some(flags) = state.resolver.resolve(first).await {
                    if flags.subdomain_enabled {
                        let target = subdomain_redirect_target(
                            &flags.username,
                            config,
                            &host,
                            &desc.path_segments[1..],
                            query.as_deref(),
                            request.headers().get("x-forwarded-proto"),
                        );
                        tracing::debug!(tenant = %flags.username, %target, "canonicalizing to subdomain");
                        return Redirect::permanent(&target).into_response();
                    }
                }
                // Not redirected: the tenant is served under its base-domain
                // path prefix below
            }
        }
    }

    // Tenant subdomain: rewrite to the internal path, or reject
    if desc.is_subdomain {
        let label = desc.subdomain_label.as_deref().unwrap_or_default();
        let internal = match state.resolver.resolve(label).await {
            Some(flags) if flags.subdomain_enabled => {
                if path == "/" {
                    format!("/{}", flags.username)
                } else {
                    format!("/subdomain/{}{}", flags.username, path)
                }
            }
            // Unknown or not opted in: a 404 that doesn't leak whether the
            // identifier ever existed
            _ => config.not_found_path.clone(),
        };

        tracing::debug!(%host, from = %path, to = %internal, "rewriting subdomain request");
        set_request_path(&mut request, &internal, query.as_deref(), &config.not_found_path);
        let mut response = next.run(request).await;

        if config.dev_mode {
            // Every request is freshly resolved in dev; don't let the
            // browser cache hide that
            response
                .headers_mut()
                .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
        }
        return response;
    }

    // Operator-facing dashboard area requires a session
    if is_protected(&path) {
        let cookies = request
            .headers()
            .get(header::COOKIE)
            .and_then(|h| h.to_str().ok())
            .unwrap_or_default();

        let user = match state.sessions.session_user(cookies).await {
            Ok(user) => user,
            Err(err) => {
                tracing::warn!(error = %err, "session lookup failed, treating as unauthenticated");
                None
            }
        };

        if user.is_none() {
            return Redirect::temporary(&config.landing_path).into_response();
        }
    }

    next.run(request).await
}

/// Whether a path falls under an auth-gated prefix
fn is_protected(path: &str) -> bool {
    PROTECTED_PREFIXES
        .iter()
        .any(|prefix| path == *prefix || path.starts_with(&format!("{prefix}/")))
}

/// Build the canonical subdomain URL for a base-domain tenant request
fn subdomain_redirect_target(
    username: &str,
    config: &RoutingConfig,
    original_host: &str,
    remaining_segments: &[String],
    query: Option<&str>,
    forwarded_proto: Option<&HeaderValue>,
) -> String {
    let scheme = forwarded_proto
        .and_then(|h| h.to_str().ok())
        .unwrap_or(if config.dev_mode { "http" } else { "https" });

    let mut host = format!("{}.{}", username.to_lowercase(), config.base_host());
    if let Some((_, port)) = original_host.split_once(':') {
        host = format!("{host}:{port}");
    }

    let mut path = format!("/{}", remaining_segments.join("/"));
    if path.len() > 1 && path.ends_with('/') {
        path.pop();
    }

    match query {
        Some(q) => format!("{scheme}://{host}{path}?{q}"),
        None => format!("{scheme}://{host}{path}"),
    }
}

/// Swap the request URI for an internal path, keeping the query string
fn set_request_path(request: &mut Request<Body>, path: &str, query: Option<&str>, fallback: &str) {
    let path_and_query = match query {
        Some(q) => format!("{path}?{q}"),
        None => path.to_string(),
    };

    let uri = path_and_query
        .parse::<Uri>()
        .or_else(|_| fallback.parse::<Uri>());
    if let Ok(uri) = uri {
        *request.uri_mut() = uri;
    }
}

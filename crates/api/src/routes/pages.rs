//! Serving surface the routing layer targets
//!
//! The gallery UI itself lives in a separate frontend; these handlers are the
//! internal endpoints that redirects and rewrites resolve to.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Public landing page; also the target of unauthenticated dashboard redirects
pub async fn landing() -> Json<Value> {
    Json(json!({ "page": "landing" }))
}

/// Internal not-found page rejected subdomains rewrite to
pub async fn not_found() -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": { "code": "NOT_FOUND", "message": "Page not found" } })),
    )
}

/// Operator dashboard entry point (session-gated by the routing layer)
pub async fn dashboard() -> Json<Value> {
    Json(json!({ "page": "dashboard" }))
}

/// A tenant's public profile page, served for both `lensfolio.com/{username}`
/// and the rewritten root of `{username}.lensfolio.com`
pub async fn tenant_profile(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> ApiResult<Json<Value>> {
    let profile = state
        .profiles
        .find_by_username(&username)
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(json!({
        "page": "profile",
        "username": profile.username,
        "subdomain_enabled": profile.subdomain_enabled,
    })))
}

/// A tenant-scoped sub-resource (e.g. a named gallery) under the internal
/// subdomain namespace
pub async fn tenant_resource(
    State(state): State<AppState>,
    Path((username, resource)): Path<(String, String)>,
) -> ApiResult<Json<Value>> {
    let profile = state
        .profiles
        .find_by_username(&username)
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(json!({
        "page": "gallery",
        "username": profile.username,
        "resource": resource,
    })))
}

//! Tenant profile lookups
//!
//! The router's single dependency on the profile store: resolve a username
//! to its routing flags. The store is behind a trait so routing logic can be
//! exercised without a database.

use async_trait::async_trait;
use sqlx::PgPool;

/// A tenant profile row, as the router sees it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TenantProfile {
    pub username: String,
    pub subdomain_enabled: bool,
}

/// Errors from the profile store collaborator
#[derive(Debug, thiserror::Error)]
pub enum ProfileStoreError {
    #[error("Database error: {0}")]
    Database(String),
}

/// Collaborator that resolves a username to a tenant profile
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Look up a tenant by username (case-insensitive).
    /// Returns Ok(None) when no such tenant exists.
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<TenantProfile>, ProfileStoreError>;
}

/// Postgres-backed profile store
pub struct PgProfileStore {
    pool: PgPool,
}

impl PgProfileStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileStore for PgProfileStore {
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<TenantProfile>, ProfileStoreError> {
        #[derive(sqlx::FromRow)]
        struct ProfileRow {
            username: String,
            subdomain_enabled: bool,
        }

        let result: Option<ProfileRow> = sqlx::query_as(
            "SELECT username, subdomain_enabled FROM profiles WHERE lower(username) = $1",
        )
        .bind(username.to_lowercase())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ProfileStoreError::Database(e.to_string()))?;

        Ok(result.map(|row| TenantProfile {
            username: row.username,
            subdomain_enabled: row.subdomain_enabled,
        }))
    }
}

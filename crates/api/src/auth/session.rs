//! Session verification against the hosted auth provider
//!
//! The dashboard area is gated on a session cookie issued by the hosted auth
//! provider. The router only needs one capability from it: "whose session is
//! this cookie, if anyone's" — so that is the whole trait.

use async_trait::async_trait;
use lensfolio_shared::UserId;
use serde::Deserialize;

/// Errors from the auth provider collaborator.
/// The auth guard treats any of these as "no session" (fail closed).
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Auth provider request failed: {0}")]
    Http(String),

    #[error("Auth provider returned status {0}")]
    Provider(u16),
}

/// Collaborator that maps a request's cookies to a session user
#[async_trait]
pub trait SessionLookup: Send + Sync {
    /// Returns Ok(None) when the cookie is absent, expired, or rejected by
    /// the provider.
    async fn session_user(&self, cookie_header: &str) -> Result<Option<UserId>, SessionError>;
}

/// Session client for the hosted auth provider
pub struct AuthClient {
    http: reqwest::Client,
    base_url: String,
    anon_key: String,
    cookie_name: String,
}

#[derive(Deserialize)]
struct ProviderUser {
    id: UserId,
}

impl AuthClient {
    pub fn new(base_url: String, anon_key: String, cookie_name: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
            anon_key,
            cookie_name,
        }
    }
}

#[async_trait]
impl SessionLookup for AuthClient {
    async fn session_user(&self, cookie_header: &str) -> Result<Option<UserId>, SessionError> {
        let Some(token) = cookie_value(cookie_header, &self.cookie_name) else {
            return Ok(None);
        };

        let response = self
            .http
            .get(format!("{}/auth/v1/user", self.base_url))
            .header("Authorization", format!("Bearer {token}"))
            .header("apikey", &self.anon_key)
            .send()
            .await
            .map_err(|e| SessionError::Http(e.to_string()))?;

        match response.status().as_u16() {
            200 => {
                let user: ProviderUser = response
                    .json()
                    .await
                    .map_err(|e| SessionError::Http(e.to_string()))?;
                Ok(Some(user.id))
            }
            401 | 403 => Ok(None),
            status => Err(SessionError::Provider(status)),
        }
    }
}

/// Extract a cookie value by name from a raw Cookie header
fn cookie_value<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key == name && !value.is_empty()).then_some(value)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_cookie_value() {
        assert_eq!(
            cookie_value("lf-session=abc123; theme=dark", "lf-session"),
            Some("abc123")
        );
        assert_eq!(
            cookie_value("theme=dark;lf-session=abc123", "lf-session"),
            Some("abc123")
        );
        assert_eq!(cookie_value("theme=dark", "lf-session"), None);
        assert_eq!(cookie_value("", "lf-session"), None);
        assert_eq!(cookie_value("lf-session=", "lf-session"), None);
        // Name must match exactly, not as a suffix
        assert_eq!(cookie_value("xlf-session=abc", "lf-session"), None);
    }

    #[tokio::test]
    async fn test_session_user_accepts_valid_session() {
        let mut server = mockito::Server::new_async().await;
        let user_id = Uuid::new_v4();
        let mock = server
            .mock("GET", "/auth/v1/user")
            .match_header("authorization", "Bearer tok123")
            .match_header("apikey", "anon-key")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(format!(r#"{{"id":"{user_id}"}}"#))
            .create_async()
            .await;

        let client = AuthClient::new(server.url(), "anon-key".to_string(), "lf-session".to_string());
        let user = client
            .session_user("lf-session=tok123; theme=dark")
            .await
            .unwrap();

        assert_eq!(user, Some(UserId(user_id)));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_session_user_rejected_token_is_none() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/auth/v1/user")
            .with_status(401)
            .create_async()
            .await;

        let client = AuthClient::new(server.url(), "anon-key".to_string(), "lf-session".to_string());
        let user = client.session_user("lf-session=expired").await.unwrap();
        assert_eq!(user, None);
    }

    #[tokio::test]
    async fn test_missing_cookie_skips_provider_call() {
        // No mock registered: a provider call would fail the request
        let client = AuthClient::new(
            "http://127.0.0.1:1".to_string(),
            "anon-key".to_string(),
            "lf-session".to_string(),
        );
        let user = client.session_user("theme=dark").await.unwrap();
        assert_eq!(user, None);
    }

    #[tokio::test]
    async fn test_provider_error_surfaces() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/auth/v1/user")
            .with_status(500)
            .create_async()
            .await;

        let client = AuthClient::new(server.url(), "anon-key".to_string(), "lf-session".to_string());
        let result = client.session_user("lf-session=tok").await;
        assert!(matches!(result, Err(SessionError::Provider(500))));
    }
}

//! Hosted backend HTTP client.

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, header};
use tokio::sync::RwLock;
use tracing::warn;

use super::dto::ErrorResponse;
use crate::domain::entities::Session;
use crate::domain::errors::{AuthError, StoreError};

const USER_AGENT: &str = concat!("foodorder/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const RATE_LIMIT_RETRY_MS: u64 = 5000;

/// Client for the authentication and row store endpoints of one project.
///
/// Holds the active session; row requests are authorised with its access
/// token, or with the anonymous key before sign-in.
pub struct BackendClient {
    pub(super) client: Client,
    base_url: String,
    anon_key: String,
    pub(super) session: RwLock<Option<Session>>,
}

impl BackendClient {
    /// Creates client for a project.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn new(base_url: impl Into<String>, anon_key: impl Into<String>) -> Result<Self, AuthError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| AuthError::unexpected(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            anon_key: anon_key.into(),
            session: RwLock::new(None),
        })
    }

    pub(super) fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{path}", self.base_url)
    }

    pub(super) fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{table}", self.base_url)
    }

    /// Request carrying the project key only.
    pub(super) fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.client
            .request(method, url)
            .header("apikey", &self.anon_key)
    }

    /// Request authorised with the session token, or the project key without one.
    pub(super) async fn authorised(&self, method: Method, url: &str) -> RequestBuilder {
        let bearer = self
            .session
            .read()
            .await
            .as_ref()
            .map_or_else(|| self.anon_key.clone(), |s| s.access_token.as_str().to_string());

        self.request(method, url)
            .header(header::AUTHORIZATION, format!("Bearer {bearer}"))
    }
}

pub(super) fn transport_message(e: &reqwest::Error) -> String {
    warn!(error = %e, "Failed to reach backend");
    if e.is_timeout() {
        "request timed out".to_string()
    } else if e.is_connect() {
        "failed to connect to backend".to_string()
    } else {
        e.to_string()
    }
}

/// Extracts the error message from a failed response body.
pub(super) async fn error_message(status: StatusCode, response: Response) -> String {
    response
        .json::<ErrorResponse>()
        .await
        .ok()
        .and_then(ErrorResponse::into_message)
        .unwrap_or_else(|| format!("HTTP {status}"))
}

pub(super) fn auth_error(status: StatusCode, message: String) -> AuthError {
    match status {
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            AuthError::invalid_credentials(message)
        }
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => AuthError::rejected(message),
        StatusCode::TOO_MANY_REQUESTS => AuthError::RateLimited {
            retry_after_ms: RATE_LIMIT_RETRY_MS,
        },
        s if s.is_server_error() => AuthError::network(format!("backend unavailable: {message}")),
        _ => AuthError::unexpected(format!("unexpected response: {status} - {message}")),
    }
}

pub(super) fn store_error(status: StatusCode, message: String, table: &str) -> StoreError {
    match status {
        StatusCode::NOT_ACCEPTABLE => StoreError::not_found(table),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => StoreError::rejected(message),
        StatusCode::TOO_MANY_REQUESTS => StoreError::RateLimited {
            retry_after_ms: RATE_LIMIT_RETRY_MS,
        },
        s if s.is_server_error() => StoreError::network(format!("backend unavailable: {message}")),
        _ => StoreError::api(status.as_u16(), message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_client_creation() {
        let client = BackendClient::new("https://example.supabase.co/", "anon");
        assert!(client.is_ok());
    }

    #[test]
    fn test_urls_strip_trailing_slash() {
        let client = BackendClient::new("https://example.supabase.co/", "anon").unwrap();

        assert_eq!(
            client.rest_url("food_items"),
            "https://example.supabase.co/rest/v1/food_items"
        );
        assert_eq!(
            client.auth_url("logout"),
            "https://example.supabase.co/auth/v1/logout"
        );
    }

    #[test_case(StatusCode::BAD_REQUEST ; "bad request")]
    #[test_case(StatusCode::UNPROCESSABLE_ENTITY ; "unprocessable")]
    fn test_auth_credential_errors(status: StatusCode) {
        assert!(matches!(
            auth_error(status, "Invalid login credentials".into()),
            AuthError::InvalidCredentials { .. }
        ));
    }

    #[test]
    fn test_auth_server_error_is_network() {
        assert!(auth_error(StatusCode::BAD_GATEWAY, "down".into()).is_network_error());
    }

    #[test_case(StatusCode::NOT_ACCEPTABLE, "NotFound" ; "single row missing")]
    #[test_case(StatusCode::FORBIDDEN, "Rejected" ; "row level security")]
    #[test_case(StatusCode::TOO_MANY_REQUESTS, "RateLimited" ; "rate limited")]
    #[test_case(StatusCode::SERVICE_UNAVAILABLE, "Network" ; "unavailable")]
    #[test_case(StatusCode::CONFLICT, "Api" ; "conflict")]
    fn test_store_error_mapping(status: StatusCode, expected: &str) {
        let error = store_error(status, "message".into(), "profiles");
        let variant = match error {
            StoreError::NotFound { .. } => "NotFound",
            StoreError::Rejected { .. } => "Rejected",
            StoreError::RateLimited { .. } => "RateLimited",
            StoreError::Network { .. } => "Network",
            StoreError::Api { .. } => "Api",
            StoreError::Decode { .. } | StoreError::Unexpected { .. } => "Other",
        };
        assert_eq!(variant, expected);
    }
}

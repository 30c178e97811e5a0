use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::{ProfileId, SecretToken, Session, SessionUser};

/// Password grant request body.
#[derive(Serialize)]
pub struct PasswordCredentials<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Refresh grant request body.
#[derive(Serialize)]
pub struct RefreshRequest<'a> {
    pub refresh_token: &'a str,
}

/// Account as returned by the authentication service.
#[derive(Debug, Deserialize)]
pub struct UserResponse {
    pub id: ProfileId,
    #[serde(default)]
    pub email: Option<String>,
}

impl From<UserResponse> for SessionUser {
    fn from(user: UserResponse) -> Self {
        Self {
            id: user.id,
            email: user.email,
        }
    }
}

/// Token grant response.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Lifetime in seconds.
    pub expires_in: i64,
    /// Absolute expiry as a unix timestamp, when provided.
    #[serde(default)]
    pub expires_at: Option<i64>,
    pub user: UserResponse,
}

impl TokenResponse {
    pub fn into_session(self, now: DateTime<Utc>) -> Session {
        let expires_at = self
            .expires_at
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
            .unwrap_or_else(|| now + Duration::seconds(self.expires_in));

        Session {
            access_token: SecretToken::new(self.access_token),
            refresh_token: SecretToken::new(self.refresh_token),
            expires_at,
            user: self.user.into(),
        }
    }
}

/// Sign-up returns a session when confirmation is disabled, otherwise the bare account.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum SignUpResponse {
    Session(TokenResponse),
    User(UserResponse),
}

/// Error body; the services disagree on the field name.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub error_description: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorResponse {
    pub fn into_message(self) -> Option<String> {
        self.message
            .or(self.msg)
            .or(self.error_description)
            .or(self.error)
            .filter(|m| !m.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_session_uses_absolute_expiry() {
        let response: TokenResponse = serde_json::from_value(json!({
            "access_token": "a",
            "refresh_token": "r",
            "expires_in": 3600,
            "expires_at": 1_700_000_000,
            "user": { "id": "7f1d2c34-8a7b-4c1e-9d7a-0b4f6a1c2d3e" }
        }))
        .unwrap();

        let session = response.into_session(Utc::now());

        assert_eq!(session.expires_at.timestamp(), 1_700_000_000);
    }

    #[test]
    fn test_session_falls_back_to_lifetime() {
        let response: TokenResponse = serde_json::from_value(json!({
            "access_token": "a",
            "refresh_token": "r",
            "expires_in": 60,
            "user": { "id": "7f1d2c34-8a7b-4c1e-9d7a-0b4f6a1c2d3e", "email": "a@b.c" }
        }))
        .unwrap();
        let now = Utc::now();

        let session = response.into_session(now);

        assert_eq!(session.expires_at, now + Duration::seconds(60));
        assert_eq!(session.user.email.as_deref(), Some("a@b.c"));
    }

    #[test]
    fn test_sign_up_without_session() {
        let response: SignUpResponse = serde_json::from_value(json!({
            "id": "7f1d2c34-8a7b-4c1e-9d7a-0b4f6a1c2d3e",
            "email": "a@b.c",
            "confirmation_sent_at": "2024-01-01T00:00:00Z"
        }))
        .unwrap();

        assert!(matches!(response, SignUpResponse::User(_)));
    }

    #[test]
    fn test_error_message_field_precedence() {
        let body: ErrorResponse =
            serde_json::from_value(json!({ "error": "invalid_grant", "error_description": "Invalid login credentials" }))
                .unwrap();

        assert_eq!(body.into_message().as_deref(), Some("Invalid login credentials"));
    }
}

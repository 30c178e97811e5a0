//! Authenticated session value object.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::profile::ProfileId;

/// Bearer token with masking in debug and display output.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SecretToken {
    value: String,
}

impl SecretToken {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    /// Returns token as string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Returns masked token for display.
    #[must_use]
    pub fn masked(&self) -> String {
        if self.value.len() <= 10 || !self.value.is_ascii() {
            return "*".repeat(self.value.chars().count());
        }

        let visible_prefix = &self.value[..4];
        let visible_suffix = &self.value[self.value.len() - 4..];
        format!("{visible_prefix}...{visible_suffix}")
    }
}

impl fmt::Debug for SecretToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretToken")
            .field("value", &self.masked())
            .finish()
    }
}

impl fmt::Display for SecretToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.masked())
    }
}

/// Account the session belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: ProfileId,
    #[serde(default)]
    pub email: Option<String>,
}

/// Signed-in session issued by the authentication service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: SecretToken,
    pub refresh_token: SecretToken,
    pub expires_at: DateTime<Utc>,
    pub user: SessionUser,
}

impl Session {
    /// Tokens are treated as expired this long before their real expiry.
    pub const EXPIRY_LEEWAY_SECS: i64 = 60;

    #[must_use]
    pub fn user_id(&self) -> ProfileId {
        self.user.id
    }

    /// Whether the access token must be refreshed before use.
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now + Duration::seconds(Self::EXPIRY_LEEWAY_SECS) >= self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn make_session(expires_at: DateTime<Utc>) -> Session {
        Session {
            access_token: SecretToken::new("eyJhbGciOiJIUzI1NiJ9.payload.signature"),
            refresh_token: SecretToken::new("refresh-token-value"),
            expires_at,
            user: SessionUser {
                id: ProfileId(Uuid::nil()),
                email: Some("a@example.com".to_string()),
            },
        }
    }

    #[test]
    fn test_token_masking() {
        let token = SecretToken::new("eyJhbGciOiJIUzI1NiJ9.payload.signature");
        let masked = token.masked();

        assert_eq!(masked, "eyJh...ture");
        assert!(!format!("{token:?}").contains("payload"));
    }

    #[test]
    fn test_short_token_fully_masked() {
        assert_eq!(SecretToken::new("abc").masked(), "***");
    }

    #[test]
    fn test_expiry_with_leeway() {
        let now = Utc::now();

        assert!(make_session(now - Duration::seconds(1)).is_expired(now));
        assert!(make_session(now + Duration::seconds(30)).is_expired(now));
        assert!(!make_session(now + Duration::hours(1)).is_expired(now));
    }

    #[test]
    fn test_session_debug_does_not_leak_tokens() {
        let session = make_session(Utc::now());
        let debug_output = format!("{session:?}");

        assert!(!debug_output.contains("refresh-token-value"));
    }
}

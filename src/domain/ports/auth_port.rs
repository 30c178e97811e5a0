//! Authentication port definition.

use async_trait::async_trait;

use crate::domain::entities::{SecretToken, Session, SessionUser};
use crate::domain::errors::AuthError;

/// Result of creating an account.
#[derive(Debug, Clone)]
pub struct SignUpOutcome {
    /// Created account.
    pub user: SessionUser,
    /// Present when the backend signs the account in immediately.
    pub session: Option<Session>,
}

/// Port for the hosted authentication service.
///
/// Implementations keep the active session and authorise subsequent row store
/// calls with it.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthPort: Send + Sync {
    /// Signs in with e-mail and password and activates the session.
    async fn sign_in_with_password(&self, email: &str, password: &str)
    -> Result<Session, AuthError>;

    /// Creates an account.
    async fn sign_up(&self, email: &str, password: &str) -> Result<SignUpOutcome, AuthError>;

    /// Revokes the active session and deactivates it locally.
    async fn sign_out(&self) -> Result<(), AuthError>;

    /// Exchanges a refresh token for a new session and activates it.
    async fn refresh_session(&self, refresh_token: &SecretToken) -> Result<Session, AuthError>;

    /// Activates a previously issued session.
    async fn set_session(&self, session: Session);

    /// Returns the active session, if any.
    async fn current_session(&self) -> Option<Session>;

    /// Fetches the account behind the active session.
    async fn get_user(&self) -> Result<SessionUser, AuthError>;
}

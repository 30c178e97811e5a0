//! Session storage port definition.

use async_trait::async_trait;

use crate::domain::entities::Session;
use crate::domain::errors::AuthError;

/// Port for session persistence between runs.
#[async_trait]
pub trait SessionStoragePort: Send + Sync {
    /// Retrieves stored session.
    async fn load_session(&self) -> Result<Option<Session>, AuthError>;

    /// Stores session securely.
    async fn store_session(&self, session: &Session) -> Result<(), AuthError>;

    /// Deletes stored session.
    async fn clear_session(&self) -> Result<(), AuthError>;

    /// Checks if a session exists.
    async fn has_session(&self) -> Result<bool, AuthError> {
        Ok(self.load_session().await?.is_some())
    }
}

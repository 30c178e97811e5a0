//! Session resolution use case.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::domain::entities::Session;
use crate::domain::errors::AuthError;
use crate::domain::ports::{AuthPort, SessionStoragePort};

/// Restores the persisted session and activates it on the backend client.
pub struct ResolveSessionUseCase {
    auth_port: Arc<dyn AuthPort>,
    storage_port: Arc<dyn SessionStoragePort>,
}

impl ResolveSessionUseCase {
    /// Creates new use case.
    #[must_use]
    pub const fn new(
        auth_port: Arc<dyn AuthPort>,
        storage_port: Arc<dyn SessionStoragePort>,
    ) -> Self {
        Self {
            auth_port,
            storage_port,
        }
    }

    /// Loads the stored session, refreshing it first when it has expired.
    ///
    /// A session that can no longer be refreshed is deleted from storage.
    ///
    /// # Errors
    /// Returns error only if deleting a stale session fails.
    pub async fn execute(&self) -> Result<Option<Session>, AuthError> {
        debug!("Checking keyring for stored session");
        let stored = match self.storage_port.load_session().await {
            Ok(Some(session)) => session,
            Ok(None) => {
                debug!("No session found in keyring");
                return Ok(None);
            }
            Err(e) => {
                warn!(error = %e, "Failed to read session from keyring");
                return Ok(None);
            }
        };

        if !stored.is_expired(Utc::now()) {
            info!(user_id = %stored.user_id(), "Using session from system keyring");
            self.auth_port.set_session(stored.clone()).await;
            return Ok(Some(stored));
        }

        debug!(expires_at = %stored.expires_at, "Stored session expired, refreshing");
        match self.auth_port.refresh_session(&stored.refresh_token).await {
            Ok(session) => {
                info!(user_id = %session.user_id(), "Session refreshed");
                if let Err(e) = self.storage_port.store_session(&session).await {
                    tracing::error!(error = %e, "Failed to persist refreshed session");
                }
                Ok(Some(session))
            }
            Err(e) => {
                warn!(error = %e, "Session refresh failed, discarding stored session");
                self.storage_port.clear_session().await?;
                Ok(None)
            }
        }
    }

    /// Like [`Self::execute`] but fails when nobody is signed in.
    ///
    /// # Errors
    /// Returns [`AuthError::NoSession`] if no usable session exists.
    pub async fn require(&self) -> Result<Session, AuthError> {
        self.execute().await?.ok_or(AuthError::NoSession)
    }
}

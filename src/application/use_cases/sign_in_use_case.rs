//! Sign-in use case implementation.

use std::sync::Arc;

use chrono::Utc;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::application::AppError;
use crate::application::dto::{Destination, SignInRequest, SignInResponse};
use crate::domain::entities::{Role, Session};
use crate::domain::errors::{AuthError, ValidationError};
use crate::domain::ports::{AuthPort, RowStorePort, SessionStoragePort, decode};
use crate::domain::query::{RowQuery, Tables};

#[derive(Deserialize)]
struct RoleRow {
    #[serde(default)]
    role: Role,
}

/// Handles the sign-in workflow and routes the account by role.
#[derive(Clone)]
pub struct SignInUseCase {
    auth_port: Arc<dyn AuthPort>,
    store: Arc<dyn RowStorePort>,
    storage_port: Arc<dyn SessionStoragePort>,
    tables: Tables,
}

impl SignInUseCase {
    /// Creates new sign-in use case.
    #[must_use]
    pub const fn new(
        auth_port: Arc<dyn AuthPort>,
        store: Arc<dyn RowStorePort>,
        storage_port: Arc<dyn SessionStoragePort>,
        tables: Tables,
    ) -> Self {
        Self {
            auth_port,
            store,
            storage_port,
            tables,
        }
    }

    /// Executes sign-in with provided request.
    ///
    /// # Errors
    /// Returns error if input is blank, credentials are rejected, the profile
    /// lookup fails or the account is banned.
    pub async fn execute(&self, request: SignInRequest) -> Result<SignInResponse, AppError> {
        ValidationError::require("email", &request.email)?;
        ValidationError::require("password", &request.password)?;

        debug!(email = %request.email, "Attempting sign-in");

        let session = self
            .auth_port
            .sign_in_with_password(request.email.trim(), &request.password)
            .await
            .inspect_err(|e| warn!(error = %e, "Sign-in failed"))?;

        let role = self.role_of(&session).await?;

        if role.is_banned() {
            warn!(user_id = %session.user_id(), "Banned account attempted sign-in");
            if let Err(e) = self.auth_port.sign_out().await {
                debug!(error = %e, "Failed to revoke banned session");
            }
            return Err(AuthError::Banned.into());
        }

        let destination = Destination::for_role(role);
        info!(
            user_id = %session.user_id(),
            role = %role,
            destination = %destination,
            "Successfully signed in"
        );

        let session_persisted = if request.persist_session {
            match self.storage_port.store_session(&session).await {
                Ok(()) => {
                    info!("Session persisted to secure storage");
                    true
                }
                Err(e) => {
                    tracing::error!(error = %e, "Failed to persist session to secure storage");
                    false
                }
            }
        } else {
            debug!("Session persistence disabled, skipping storage");
            false
        };

        Ok(SignInResponse {
            user: session.user,
            role,
            destination,
            session_persisted,
        })
    }

    /// Signs out remotely and deletes the stored session.
    ///
    /// A fresh process has no active session, so the stored one is activated
    /// first to be revoked. The stored session is removed even when the
    /// remote call fails.
    ///
    /// # Errors
    /// Returns error if either step fails.
    pub async fn sign_out(&self) -> Result<(), AppError> {
        debug!("Signing out");
        self.activate_stored_session().await;
        let remote = self.auth_port.sign_out().await;

        match self.storage_port.clear_session().await {
            Ok(()) => info!("Session deleted from secure storage"),
            Err(e) => {
                tracing::error!(error = %e, "Failed to delete session from secure storage");
                return Err(e.into());
            }
        }

        remote.map_err(Into::into)
    }

    async fn activate_stored_session(&self) {
        if self.auth_port.current_session().await.is_some() {
            return;
        }

        match self.storage_port.load_session().await {
            Ok(Some(session)) if session.is_expired(Utc::now()) => {
                debug!(user_id = %session.user_id(), "Stored session expired, skipping remote sign-out");
            }
            Ok(Some(session)) => {
                debug!(user_id = %session.user_id(), "Activating stored session for sign-out");
                self.auth_port.set_session(session).await;
            }
            Ok(None) => debug!("No stored session to revoke"),
            Err(e) => warn!(error = %e, "Failed to read stored session before sign-out"),
        }
    }

    async fn role_of(&self, session: &Session) -> Result<Role, AppError> {
        let query = RowQuery::from(&self.tables.profiles)
            .select("role")
            .eq("id", session.user_id());

        match self.store.select_single(&query).await {
            Ok(row) => Ok(decode::<RoleRow>(&self.tables.profiles, row)?.role),
            Err(e) if e.is_not_found() => {
                debug!(user_id = %session.user_id(), "No profile row, treating as customer");
                Ok(Role::User)
            }
            Err(e) => Err(e.into()),
        }
    }
}

//! Account creation use case.

use std::sync::Arc;

use chrono::Utc;
use serde_json::json;
use tracing::{debug, info, warn};

use crate::application::AppError;
use crate::application::dto::{ProfileChanges, SignUpRequest, SignUpResponse};
use crate::domain::entities::Role;
use crate::domain::errors::ValidationError;
use crate::domain::ports::{AuthPort, RowStorePort, SessionStoragePort};
use crate::domain::query::Tables;

/// Creates an account and its profile row.
#[derive(Clone)]
pub struct SignUpUseCase {
    auth_port: Arc<dyn AuthPort>,
    store: Arc<dyn RowStorePort>,
    storage_port: Arc<dyn SessionStoragePort>,
    tables: Tables,
}

impl SignUpUseCase {
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

    /// Signs up and writes the profile when the backend returns a session.
    ///
    /// Backends that require e-mail confirmation return no session; the
    /// profile is then written on first sign-in through the account screen.
    ///
    /// # Errors
    /// Returns error if input is incomplete or the backend rejects the account.
    pub async fn execute(&self, request: SignUpRequest) -> Result<SignUpResponse, AppError> {
        ValidationError::require("email", &request.email)?;
        ValidationError::require("password", &request.password)?;

        let mut profile =
            ProfileChanges::new(&request.full_name, &request.phone_number, &request.address);
        if let Some(username) = &request.username {
            profile = profile.with_username(username);
        }
        profile.validate()?;

        debug!(email = %request.email, "Creating account");
        let outcome = self
            .auth_port
            .sign_up(request.email.trim(), &request.password)
            .await
            .inspect_err(|e| warn!(error = %e, "Sign-up failed"))?;

        info!(user_id = %outcome.user.id, "Account created");

        let Some(session) = outcome.session else {
            info!("No session returned, e-mail confirmation pending");
            return Ok(SignUpResponse {
                user: outcome.user,
                signed_in: false,
                profile_created: false,
            });
        };

        if let Err(e) = self.storage_port.store_session(&session).await {
            tracing::error!(error = %e, "Failed to persist session to secure storage");
        }

        let mut row = profile.to_patch();
        if let Some(object) = row.as_object_mut() {
            object.insert("id".into(), json!(outcome.user.id));
            object.insert("role".into(), json!(Role::User));
            object.insert("updated_at".into(), json!(Utc::now()));
            if let Some(email) = &outcome.user.email {
                object.insert("email".into(), json!(email));
            }
        }

        self.store.upsert(&self.tables.profiles, row).await?;
        info!(user_id = %outcome.user.id, "Profile created");

        Ok(SignUpResponse {
            user: outcome.user,
            signed_in: true,
            profile_created: true,
        })
    }
}

//! Profile viewing and editing by the account owner.

use std::sync::Arc;

use chrono::Utc;
use serde_json::json;
use tracing::{debug, info};

use crate::application::AppError;
use crate::application::dto::ProfileChanges;
use crate::domain::entities::{Profile, ProfileId, Role};
use crate::domain::errors::AuthError;
use crate::domain::ports::{RowStorePort, decode};
use crate::domain::query::{RowQuery, Tables};

/// Reads and updates the signed-in account's profile.
#[derive(Clone)]
pub struct AccountUseCase {
    store: Arc<dyn RowStorePort>,
    tables: Tables,
}

impl AccountUseCase {
    #[must_use]
    pub const fn new(store: Arc<dyn RowStorePort>, tables: Tables) -> Self {
        Self { store, tables }
    }

    /// Profile row of `user`.
    ///
    /// # Errors
    /// Returns error if the row is missing or the select fails.
    pub async fn load(&self, user: ProfileId) -> Result<Profile, AppError> {
        let table = &self.tables.profiles;
        let row = self
            .store
            .select_single(&RowQuery::from(table).eq("id", user))
            .await?;
        Ok(decode(table, row)?)
    }

    /// Role of `user`; a missing profile is a regular customer.
    ///
    /// # Errors
    /// Returns error if the lookup fails for another reason.
    pub async fn role(&self, user: ProfileId) -> Result<Role, AppError> {
        match self.load(user).await {
            Ok(profile) => Ok(profile.role),
            Err(e) if e.is_not_found() => Ok(Role::User),
            Err(e) => Err(e),
        }
    }

    /// Fails unless `user` is an administrator.
    ///
    /// # Errors
    /// Returns [`AuthError::NotAdmin`] for any other role.
    pub async fn require_admin(&self, user: ProfileId) -> Result<(), AppError> {
        let role = self.role(user).await?;
        if role.is_admin() {
            Ok(())
        } else {
            debug!(user_id = %user, role = %role, "Administrator access denied");
            Err(AuthError::NotAdmin.into())
        }
    }

    /// Upserts the edited fields and stamps `updated_at`.
    ///
    /// # Errors
    /// Returns error if a field is blank or the upsert fails.
    pub async fn update(&self, user: ProfileId, changes: ProfileChanges) -> Result<Profile, AppError> {
        changes.validate()?;

        let table = &self.tables.profiles;
        let mut row = changes.to_patch();
        if let Some(object) = row.as_object_mut() {
            object.insert("id".into(), json!(user));
            object.insert("updated_at".into(), json!(Utc::now()));
        }

        let mut stored = self.store.upsert(table, row).await?;
        info!(user_id = %user, "Profile updated");

        if stored.is_empty() {
            return self.load(user).await;
        }
        Ok(decode(table, stored.remove(0))?)
    }
}

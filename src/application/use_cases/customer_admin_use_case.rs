//! Customer account administration.

use std::sync::Arc;

use serde_json::{Value, json};
use tracing::info;

use crate::application::AppError;
use crate::application::dto::ProfileChanges;
use crate::domain::entities::{Profile, ProfileId, Role};
use crate::domain::errors::StoreError;
use crate::domain::ports::{RowStorePort, decode, decode_all};
use crate::domain::query::{Filter, RowQuery, Tables};

const LISTED_COLUMNS: &str = "id, full_name, address, phoneNumber, role";

/// Lists, edits, bans and unbans non-administrator accounts.
#[derive(Clone)]
pub struct CustomerAdminUseCase {
    store: Arc<dyn RowStorePort>,
    tables: Tables,
}

impl CustomerAdminUseCase {
    #[must_use]
    pub const fn new(store: Arc<dyn RowStorePort>, tables: Tables) -> Self {
        Self { store, tables }
    }

    /// Every profile whose role is not `admin`, banned accounts included.
    ///
    /// # Errors
    /// Returns error if the select fails or a row does not decode.
    pub async fn list_customers(&self) -> Result<Vec<Profile>, AppError> {
        let table = &self.tables.profiles;
        let query = RowQuery::from(table)
            .select(LISTED_COLUMNS)
            .neq("role", Role::Admin);
        let rows = self.store.select(&query).await?;
        Ok(decode_all(table, rows)?)
    }

    /// Overwrites a customer's name, phone number and address.
    ///
    /// # Errors
    /// Returns error if a field is blank or no profile has this id.
    pub async fn edit(&self, id: ProfileId, changes: ProfileChanges) -> Result<Profile, AppError> {
        changes.validate()?;
        let profile = self.patch(id, changes.to_patch()).await?;
        info!(user_id = %id, "Customer profile edited");
        Ok(profile)
    }

    /// # Errors
    /// Returns error if no profile has this id.
    pub async fn ban(&self, id: ProfileId) -> Result<Profile, AppError> {
        self.set_role(id, Role::Banned).await
    }

    /// # Errors
    /// Returns error if no profile has this id.
    pub async fn unban(&self, id: ProfileId) -> Result<Profile, AppError> {
        self.set_role(id, Role::User).await
    }

    async fn set_role(&self, id: ProfileId, role: Role) -> Result<Profile, AppError> {
        let profile = self.patch(id, json!({ "role": role })).await?;
        info!(user_id = %id, role = %role, "Customer role changed");
        Ok(profile)
    }

    async fn patch(&self, id: ProfileId, patch: Value) -> Result<Profile, AppError> {
        let table = &self.tables.profiles;
        let mut updated = self
            .store
            .update(table, patch, &[Filter::eq("id", id)])
            .await?;
        if updated.is_empty() {
            return Err(StoreError::not_found(table.as_str()).into());
        }
        Ok(decode(table, updated.remove(0))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::sign_in_use_case::test_support::{USER_ID, user_id};
    use crate::domain::errors::ValidationError;
    use crate::domain::ports::mocks::InMemoryRowStore;

    const ADMIN_ID: &str = "aaaaaaaa-bbbb-cccc-dddd-eeeeeeeeeeee";
    const BANNED_ID: &str = "99999999-8888-7777-6666-555555555555";

    async fn store() -> Arc<InMemoryRowStore> {
        Arc::new(
            InMemoryRowStore::new()
                .with_rows(
                    "profiles",
                    vec![
                        json!({ "id": USER_ID, "full_name": "An", "phoneNumber": "0901", "address": "12 Le Loi", "role": "user", "email": "an@example.com" }),
                        json!({ "id": ADMIN_ID, "full_name": "Boss", "role": "admin" }),
                        json!({ "id": BANNED_ID, "full_name": "Troll", "role": "banned" }),
                    ],
                )
                .await,
        )
    }

    #[tokio::test]
    async fn test_list_excludes_admins() {
        let use_case = CustomerAdminUseCase::new(store().await, Tables::default());

        let customers = use_case.list_customers().await.unwrap();

        assert_eq!(customers.len(), 2);
        assert!(customers.iter().all(|p| !p.role.is_admin()));
        assert!(customers.iter().all(|p| p.email.is_none()));
    }

    #[tokio::test]
    async fn test_ban_and_unban() {
        let store = store().await;
        let use_case = CustomerAdminUseCase::new(store.clone(), Tables::default());

        let profile = use_case.ban(user_id()).await.unwrap();
        assert_eq!(profile.role, Role::Banned);
        assert_eq!(store.rows("profiles").await[0]["role"], "banned");

        let profile = use_case.unban(user_id()).await.unwrap();
        assert_eq!(profile.role, Role::User);
    }

    #[tokio::test]
    async fn test_edit_requires_every_field() {
        let use_case = CustomerAdminUseCase::new(store().await, Tables::default());

        let result = use_case
            .edit(user_id(), ProfileChanges::new("An", "0901", ""))
            .await;

        assert!(matches!(
            result,
            Err(AppError::Validation(ValidationError::Required { field: "address" }))
        ));
    }

    #[tokio::test]
    async fn test_edit_customer() {
        let use_case = CustomerAdminUseCase::new(store().await, Tables::default());

        let profile = use_case
            .edit(user_id(), ProfileChanges::new("An Tran", "0999", "1 Nguyen Hue"))
            .await
            .unwrap();

        assert_eq!(profile.full_name.as_deref(), Some("An Tran"));
        assert_eq!(profile.phone_number.as_deref(), Some("0999"));
    }

    #[tokio::test]
    async fn test_ban_unknown_profile() {
        let use_case = CustomerAdminUseCase::new(store().await, Tables::default());
        let unknown: ProfileId = "00000000-0000-0000-0000-000000000001".parse().unwrap();

        let result = use_case.ban(unknown).await;

        assert!(matches!(result, Err(AppError::Store(StoreError::NotFound { .. }))));
    }
}

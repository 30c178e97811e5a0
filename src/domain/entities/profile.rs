//! Customer and administrator profile entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Account identifier issued by the authentication service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileId(pub Uuid);

impl ProfileId {
    #[must_use]
    pub const fn as_uuid(self) -> Uuid {
        self.0
    }
}

impl std::fmt::Display for ProfileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for ProfileId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl std::str::FromStr for ProfileId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}

/// Account role stored on the profile row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Regular customer.
    #[default]
    User,
    /// Menu and customer administrator.
    Admin,
    /// Customer barred from using the application.
    Banned,
}

impl Role {
    /// Column value for this role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
            Self::Banned => "banned",
        }
    }

    /// Parses a column value; anything unrecognised is a regular user.
    #[must_use]
    pub fn from_column(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "admin" => Self::Admin,
            "banned" => Self::Banned,
            _ => Self::User,
        }
    }

    #[must_use]
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }

    #[must_use]
    pub const fn is_banned(self) -> bool {
        matches!(self, Self::Banned)
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().map_or(Self::User, Self::from_column))
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Profile row linked one-to-one with an authenticated account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: ProfileId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default, rename = "phoneNumber")]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default)]
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Profile {
    /// Creates an empty profile for an account.
    #[must_use]
    pub const fn new(id: ProfileId) -> Self {
        Self {
            id,
            email: None,
            full_name: None,
            phone_number: None,
            address: None,
            username: None,
            role: Role::User,
            updated_at: None,
        }
    }

    /// Name shown in listings, falling back to "Unknown".
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or("Unknown")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_role_parsing() {
        assert_eq!(Role::from_column("admin"), Role::Admin);
        assert_eq!(Role::from_column("BANNED"), Role::Banned);
        assert_eq!(Role::from_column("user"), Role::User);
        assert_eq!(Role::from_column("something-else"), Role::User);
    }

    #[test]
    fn test_profile_from_row() {
        let row = json!({
            "id": "7f1d2c34-8a7b-4c1e-9d7a-0b4f6a1c2d3e",
            "full_name": "Nguyen Van A",
            "phoneNumber": "0901234567",
            "address": "12 Le Loi",
            "role": "banned"
        });

        let profile: Profile = serde_json::from_value(row).unwrap();

        assert_eq!(profile.phone_number.as_deref(), Some("0901234567"));
        assert_eq!(profile.role, Role::Banned);
        assert_eq!(profile.display_name(), "Nguyen Van A");
    }

    #[test]
    fn test_null_role_is_user() {
        let row = json!({
            "id": "7f1d2c34-8a7b-4c1e-9d7a-0b4f6a1c2d3e",
            "role": null
        });

        let profile: Profile = serde_json::from_value(row).unwrap();
        assert_eq!(profile.role, Role::User);
        assert_eq!(profile.display_name(), "Unknown");
    }

    #[test]
    fn test_profile_id_parse() {
        let id: ProfileId = " 7f1d2c34-8a7b-4c1e-9d7a-0b4f6a1c2d3e ".parse().unwrap();
        assert_eq!(id.to_string(), "7f1d2c34-8a7b-4c1e-9d7a-0b4f6a1c2d3e");
        assert!("not-a-uuid".parse::<ProfileId>().is_err());
    }
}

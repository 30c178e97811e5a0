//! Authentication DTOs.

use zeroize::Zeroizing;

use crate::domain::entities::{Role, SessionUser};

/// Home screen a signed-in account is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    /// Menu, cart and history.
    CustomerHome,
    /// Inventory, customers and sales.
    AdminHome,
}

impl Destination {
    #[must_use]
    pub const fn for_role(role: Role) -> Self {
        if role.is_admin() {
            Self::AdminHome
        } else {
            Self::CustomerHome
        }
    }

    /// Returns human-readable description.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::CustomerHome => "customer home",
            Self::AdminHome => "admin home",
        }
    }
}

impl std::fmt::Display for Destination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// Sign-in request data.
#[derive(Clone)]
pub struct SignInRequest {
    /// Account e-mail.
    pub email: String,
    /// Password, wiped from memory on drop.
    pub password: Zeroizing<String>,
    /// Whether to persist the session.
    pub persist_session: bool,
}

impl SignInRequest {
    /// Creates new sign-in request.
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: Zeroizing::new(password.into()),
            persist_session: true,
        }
    }

    /// Disables session persistence.
    #[must_use]
    pub fn without_persistence(mut self) -> Self {
        self.persist_session = false;
        self
    }
}

impl std::fmt::Debug for SignInRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignInRequest")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("persist_session", &self.persist_session)
            .finish()
    }
}

/// Sign-in response data.
#[derive(Debug, Clone)]
pub struct SignInResponse {
    /// Signed-in account.
    pub user: SessionUser,
    /// Role read from the profile.
    pub role: Role,
    /// Where the account lands.
    pub destination: Destination,
    /// Whether the session was persisted.
    pub session_persisted: bool,
}

/// Outcome of account creation.
#[derive(Debug, Clone)]
pub struct SignUpResponse {
    /// Created account.
    pub user: SessionUser,
    /// Whether the backend signed the account in immediately.
    pub signed_in: bool,
    /// Whether the profile row was written.
    pub profile_created: bool,
}

/// Account creation data, including the profile fields collected on sign-up.
#[derive(Clone)]
pub struct SignUpRequest {
    pub email: String,
    pub password: Zeroizing<String>,
    pub full_name: String,
    pub phone_number: String,
    pub address: String,
    pub username: Option<String>,
}

impl SignUpRequest {
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: Zeroizing::new(password.into()),
            full_name: String::new(),
            phone_number: String::new(),
            address: String::new(),
            username: None,
        }
    }

    #[must_use]
    pub fn with_contact(
        mut self,
        full_name: impl Into<String>,
        phone_number: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        self.full_name = full_name.into();
        self.phone_number = phone_number.into();
        self.address = address.into();
        self
    }

    #[must_use]
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }
}

impl std::fmt::Debug for SignUpRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignUpRequest")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("full_name", &self.full_name)
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_destination_for_role() {
        assert_eq!(Destination::for_role(Role::Admin), Destination::AdminHome);
        assert_eq!(Destination::for_role(Role::User), Destination::CustomerHome);
    }

    #[test]
    fn test_request_defaults_to_persistence() {
        let request = SignInRequest::new("a@example.com", "secret");
        assert!(request.persist_session);
        assert!(!request.without_persistence().persist_session);
    }

    #[test]
    fn test_debug_redacts_password() {
        let request = SignInRequest::new("a@example.com", "hunter2-secret");
        assert!(!format!("{request:?}").contains("hunter2"));

        let signup = SignUpRequest::new("a@example.com", "hunter2-secret");
        assert!(!format!("{signup:?}").contains("hunter2"));
    }
}

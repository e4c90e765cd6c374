use serde::{Deserialize, Serialize};

/// Role claim carried by administrator accounts.
pub const ADMIN_ROLE: &str = "admin";

/// Administrator identity resolved from a bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminIdentity {
    admin_id: i64,
    username: String,
    role: String,
}

impl AdminIdentity {
    /// Creates an identity from the stored admin account.
    #[must_use]
    pub fn new(admin_id: i64, username: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            admin_id,
            username: username.into(),
            role: role.into(),
        }
    }

    /// Returns the stored admin account identifier.
    #[must_use]
    pub fn admin_id(&self) -> i64 {
        self.admin_id
    }

    /// Returns the admin username used as display name.
    #[must_use]
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Returns the role claim.
    #[must_use]
    pub fn role(&self) -> &str {
        self.role.as_str()
    }

    /// Returns whether the role claim grants administrative access.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == ADMIN_ROLE
    }
}

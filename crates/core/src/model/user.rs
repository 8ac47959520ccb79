use thiserror::Error;

use crate::model::ids::UserId;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum UserError {
    #[error("user name cannot be empty")]
    EmptyName,
}

//
// ─── ROLE ──────────────────────────────────────────────────────────────────────
//

/// Access level granted by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UserRole {
    #[default]
    Reader,
    Admin,
}

impl UserRole {
    /// Parses the wire role string, treating anything unknown as a
    /// plain reader.
    #[must_use]
    pub fn from_wire(role: &str) -> Self {
        match role {
            "admin" => Self::Admin,
            _ => Self::Reader,
        }
    }

    #[must_use]
    pub fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

//
// ─── PROFILE ───────────────────────────────────────────────────────────────────
//

/// The signed-in reader as reported by the identity endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct UserProfile {
    id: UserId,
    name: String,
    email: String,
    role: UserRole,
}

impl UserProfile {
    /// Creates a new UserProfile.
    ///
    /// # Errors
    ///
    /// Returns `UserError::EmptyName` if the name is blank.
    pub fn new(
        id: UserId,
        name: impl Into<String>,
        email: impl Into<String>,
        role: UserRole,
    ) -> Result<Self, UserError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(UserError::EmptyName);
        }

        Ok(Self {
            id,
            name: name.trim().to_owned(),
            email: email.into().trim().to_owned(),
            role,
        })
    }

    // Accessors
    #[must_use]
    pub fn id(&self) -> &UserId {
        &self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub fn role(&self) -> UserRole {
        self.role
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

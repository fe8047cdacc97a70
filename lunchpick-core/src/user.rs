//! People taking part in the daily lunch decision.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors returned while building users.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserError {
    /// First or last name was blank after trimming.
    #[error("first and last name are both required")]
    MissingName,
    /// The user is not registered.
    #[error("user '{id}' is not registered")]
    UnknownUser {
        /// Requested identifier.
        id: UserId,
    },
    /// The acting user lacks the admin role.
    #[error("user '{id}' is not an administrator")]
    NotAdmin {
        /// Acting user.
        id: UserId,
    },
}

/// Stable user identifier derived from the trimmed name pair.
///
/// # Examples
/// ```
/// use lunchpick_core::UserId;
///
/// # fn main() -> Result<(), lunchpick_core::UserError> {
/// let id = UserId::from_names("  Ada ", "Lovelace")?;
/// assert_eq!(id.as_str(), "Ada Lovelace");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Derive an identifier from a first and last name.
    pub fn from_names(first_name: &str, last_name: &str) -> Result<Self, UserError> {
        let first = first_name.trim();
        let last = last_name.trim();
        if first.is_empty() || last.is_empty() {
            return Err(UserError::MissingName);
        }
        Ok(Self(format!("{first} {last}")))
    }

    /// Wrap an already-derived identifier, e.g. one read back from storage.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Borrow the identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// What a user is allowed to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Ranks, swipes and submits daily tops.
    #[default]
    Member,
    /// May additionally read statistics, delete users and clear swipes.
    Admin,
}

/// A registered participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Identifier derived from the name pair.
    pub id: UserId,
    /// Trimmed first name.
    pub first_name: String,
    /// Trimmed last name.
    pub last_name: String,
    /// Optional free-text description of the user's tastes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Permissions.
    #[serde(default)]
    pub role: Role,
}

impl User {
    /// Build a member from a name pair.
    pub fn member(first_name: &str, last_name: &str) -> Result<Self, UserError> {
        let id = UserId::from_names(first_name, last_name)?;
        Ok(Self {
            id,
            first_name: first_name.trim().to_owned(),
            last_name: last_name.trim().to_owned(),
            description: None,
            role: Role::Member,
        })
    }

    /// Attach a description while returning `self` for chaining.
    ///
    /// Blank descriptions are dropped.
    #[must_use]
    pub fn with_description(mut self, description: &str) -> Self {
        let trimmed = description.trim();
        self.description = (!trimmed.is_empty()).then(|| trimmed.to_owned());
        self
    }

    /// Set the role while returning `self` for chaining.
    #[must_use]
    pub const fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    /// Name shown to other users in match notifications.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Report whether the user holds the admin role.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "Lovelace")]
    #[case("Ada", "   ")]
    fn blank_names_are_rejected(#[case] first: &str, #[case] last: &str) {
        assert_eq!(User::member(first, last), Err(UserError::MissingName));
    }

    #[rstest]
    fn member_trims_names_and_defaults_role() {
        let user = User::member(" Grace ", " Hopper ")
            .unwrap_or_else(|err| panic!("valid names: {err}"))
            .with_description("  ");
        assert_eq!(user.display_name(), "Grace Hopper");
        assert_eq!(user.id.as_str(), "Grace Hopper");
        assert!(user.description.is_none());
        assert!(!user.is_admin());
    }

    #[rstest]
    fn role_deserialises_with_member_default() {
        let user: User = serde_json::from_str(
            r#"{"id":"Ada Lovelace","first_name":"Ada","last_name":"Lovelace"}"#,
        )
        .unwrap_or_else(|err| panic!("user should parse: {err}"));
        assert_eq!(user.role, Role::Member);
    }
}

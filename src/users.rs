//! Users
//!
//! Accounts are a closed set of two variants selected by the `roleId`
//! discriminant the user file carries. A user is built once, through
//! [`User::from_role`], and never mutated afterwards.

use std::fmt::{self, Debug, Display, Formatter};

use zeroize::Zeroize;

/// User identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct UserId(i64);

impl UserId {
    /// Whether this id refers to a persisted account.
    #[must_use]
    pub const fn is_assigned(self) -> bool {
        self.0 > 0
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl From<i64> for UserId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<UserId> for i64 {
    fn from(value: UserId) -> Self {
        value.0
    }
}

/// Role classification of an account.
///
/// The set is closed: an account is an administrator when its role id is
/// [`Role::ADMIN_ROLE_ID`], and normal otherwise. `Normal` is the complement
/// of `Admin`, not a positive membership test, so any role id a future data
/// file might introduce classifies as normal here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Moderation rights: force-delete, ban, and unban any listing.
    Admin,
    /// A regular account: may publish listings and manage its own.
    Normal,
}

impl Role {
    /// The role id marking an administrator in the user file.
    pub const ADMIN_ROLE_ID: i64 = 1;

    /// Classify a raw role discriminant.
    #[must_use]
    pub const fn from_role_id(role_id: i64) -> Self {
        if role_id == Self::ADMIN_ROLE_ID {
            Self::Admin
        } else {
            Self::Normal
        }
    }
}

/// A plain-text login credential.
///
/// The user file stores passwords in the clear and credential checks compare
/// them exactly, so the wrapped text is the whole secret. The newtype keeps
/// it out of `Debug` output and zeroes the buffer on drop; it cannot fix the
/// file format.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    /// Wrap a plain-text password.
    #[must_use]
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// The stored plain text, for exact comparison and serialization.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl Debug for Password {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("Password(**redacted**)")
    }
}

impl Drop for Password {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

/// Account fields shared by every role.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    /// Account identifier.
    pub id: UserId,

    /// Raw role discriminant from the user file, preserved verbatim so a
    /// round trip re-serializes the same number the file carried.
    pub role_id: i64,

    /// Login name.
    pub username: String,

    /// Login credential.
    pub password: Password,
}

/// A marketplace account.
///
/// The variant follows the role discriminant at construction and never
/// changes; accounts are created, looked up, and replaced wholesale, not
/// edited.
#[derive(Debug, Clone, PartialEq)]
pub enum User {
    /// An administrator (`roleId == 1`).
    Admin(Profile),
    /// Any other role id.
    Normal(Profile),
}

impl User {
    /// Build the variant selected by `role_id`: `1` is an administrator,
    /// everything else a normal account.
    #[must_use]
    pub fn from_role(
        id: UserId,
        role_id: i64,
        username: impl Into<String>,
        password: Password,
    ) -> Self {
        let profile = Profile {
            id,
            role_id,
            username: username.into(),
            password,
        };

        match Role::from_role_id(role_id) {
            Role::Admin => Self::Admin(profile),
            Role::Normal => Self::Normal(profile),
        }
    }

    fn profile(&self) -> &Profile {
        let (Self::Admin(profile) | Self::Normal(profile)) = self;

        profile
    }

    /// Account identifier.
    #[must_use]
    pub fn id(&self) -> UserId {
        self.profile().id
    }

    /// Raw role discriminant as loaded from the user file.
    #[must_use]
    pub fn role_id(&self) -> i64 {
        self.profile().role_id
    }

    /// Role classification of this account.
    #[must_use]
    pub fn role(&self) -> Role {
        Role::from_role_id(self.profile().role_id)
    }

    /// Login name.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.profile().username
    }

    /// Login credential.
    #[must_use]
    pub fn password(&self) -> &Password {
        &self.profile().password
    }

    /// Whether this account is an administrator.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin(_))
    }
}

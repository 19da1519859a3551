//! User wire record.

use serde::{Deserialize, Serialize};

use crate::users::{Password, User, UserId};

/// One element of the users file's JSON array.
///
/// The password travels in the clear because that is the file format; the
/// record is a transient carrier and the domain type wraps the secret as
/// soon as the conversion runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserRecord {
    /// `userId`
    pub user_id: i64,

    /// `roleId`, the variant discriminant: `1` is an administrator
    pub role_id: i64,

    /// `username`
    pub username: String,

    /// `password`, plain text
    pub password: String,
}

impl From<&User> for UserRecord {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id().into(),
            role_id: user.role_id(),
            username: user.username().to_owned(),
            password: user.password().expose().to_owned(),
        }
    }
}

impl From<UserRecord> for User {
    fn from(record: UserRecord) -> Self {
        Self::from_role(
            UserId::from(record.user_id),
            record.role_id,
            record.username,
            Password::new(record.password),
        )
    }
}

//! User repository

use std::path::PathBuf;

use rustc_hash::FxHashMap;
use tracing::{debug, warn};

use crate::{
    records::users::UserRecord,
    store::{StoreError, read_records, write_records},
    users::{Password, Role, User, UserId},
};

/// How [`UserRepository::open`] seeds a store that loads empty.
///
/// The application-facing default matches the shipped data files: a first
/// run with no user file creates one administrator and one normal account
/// and persists them immediately. A store that loads any account is never
/// reseeded.
#[derive(Debug, Clone, Default)]
pub enum Bootstrap {
    /// Seed the stock `admin`/`user1` pair.
    #[default]
    Defaults,

    /// Seed the given accounts.
    Accounts(Vec<User>),

    /// Leave the store empty.
    Empty,
}

impl Bootstrap {
    fn accounts(self) -> Vec<User> {
        match self {
            Self::Defaults => vec![
                User::from_role(
                    UserId::from(1),
                    Role::ADMIN_ROLE_ID,
                    "admin",
                    Password::new("admin123"),
                ),
                User::from_role(UserId::from(2), 2, "user1", Password::new("user123")),
            ],
            Self::Accounts(users) => users,
            Self::Empty => Vec::new(),
        }
    }
}

/// Keyed store of accounts backed by one JSON file.
///
/// Accounts are inserted and replaced wholesale; nothing in the core ever
/// deletes one.
#[derive(Debug)]
pub struct UserRepository {
    path: PathBuf,
    users: FxHashMap<UserId, User>,
}

impl UserRepository {
    /// Open the repository at `path`.
    ///
    /// Load tolerance matches the product store: a missing file is empty,
    /// undecodable entries are skipped with a warning, and entries without a
    /// positive id are dropped. If nothing survives the load, `bootstrap`
    /// decides what to seed; seeded accounts are persisted straight away.
    ///
    /// # Errors
    ///
    /// [`StoreError::Io`] if the file exists but cannot be read, or
    /// [`StoreError::Parse`] if its contents are not a JSON array. Also
    /// [`StoreError::Io`] if persisting freshly seeded accounts fails.
    pub fn open(path: impl Into<PathBuf>, bootstrap: Bootstrap) -> Result<Self, StoreError> {
        let path = path.into();
        let records: Vec<UserRecord> = read_records(&path)?;

        let mut users = FxHashMap::default();

        for record in records {
            let user = User::from(record);

            if !user.id().is_assigned() {
                warn!(path = %path.display(), id = %user.id(), "skipping account without a positive id");
                continue;
            }

            users.insert(user.id(), user);
        }

        let mut repository = Self { path, users };

        if repository.users.is_empty() {
            let seeded = bootstrap.accounts();

            if !seeded.is_empty() {
                debug!(path = %repository.path.display(), count = seeded.len(), "seeding empty user store");

                for user in seeded {
                    repository.users.insert(user.id(), user);
                }

                repository.persist()?;
            }
        }

        Ok(repository)
    }

    /// Look up an account by id.
    #[must_use]
    pub fn find(&self, id: UserId) -> Option<&User> {
        self.users.get(&id)
    }

    /// Whether the account at `id` holds `role`.
    ///
    /// [`Role::Normal`] is the complement of [`Role::Admin`]: any role id
    /// other than `1` counts as normal, so an unknown future role id lands
    /// here as normal too. A missing account holds no role at all.
    #[must_use]
    pub fn has_role(&self, id: UserId, role: Role) -> bool {
        self.find(id).is_some_and(|user| user.role() == role)
    }

    /// Insert `user` under its id, replacing any account already there, and
    /// rewrite the store file.
    ///
    /// # Errors
    ///
    /// [`StoreError::Io`] if the rewritten file cannot be persisted.
    pub fn add_user(&mut self, user: User) -> Result<(), StoreError> {
        self.users.insert(user.id(), user);
        self.persist()
    }

    /// Find the first account matching `username` and `password` exactly.
    ///
    /// A linear scan with plain-text comparison, as simple as the file
    /// format it sits on.
    #[must_use]
    pub fn validate_credentials(&self, username: &str, password: &str) -> Option<&User> {
        self.users
            .values()
            .find(|user| user.username() == username && user.password().expose() == password)
    }

    /// Iterate over every account, in no particular order.
    pub fn all(&self) -> impl Iterator<Item = &User> {
        self.users.values()
    }

    /// Number of stored accounts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Whether the store holds no accounts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    fn persist(&self) -> Result<(), StoreError> {
        let mut records: Vec<UserRecord> = self.users.values().map(UserRecord::from).collect();

        records.sort_by_key(|record| record.user_id);

        write_records(&self.path, &records)
    }
}

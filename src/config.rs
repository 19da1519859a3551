//! Storage locations
//!
//! Path resolution belongs to the embedding application: the core is handed
//! two resolved file paths and never creates directories or guesses
//! locations itself.

use std::path::{Path, PathBuf};

const PRODUCTS_FILE: &str = "products.json";
const USERS_FILE: &str = "users.json";

/// Resolved locations of the two store files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoragePaths {
    /// The products file.
    pub products: PathBuf,

    /// The users file.
    pub users: PathBuf,
}

impl StoragePaths {
    /// The conventional file names, side by side under one data directory.
    ///
    /// The directory is taken as-is; creating it is the caller's job.
    #[must_use]
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();

        Self {
            products: dir.join(PRODUCTS_FILE),
            users: dir.join(USERS_FILE),
        }
    }
}

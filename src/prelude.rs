//! Bazaar prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    config::StoragePaths,
    listings::{ListingError, ListingService},
    products::{Product, ProductId, status},
    records::{products::ProductRecord, users::UserRecord},
    store::{
        StoreError,
        products::ProductRepository,
        users::{Bootstrap, UserRepository},
    },
    users::{Password, Profile, Role, User, UserId},
};

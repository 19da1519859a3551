//! Bazaar
//!
//! Bazaar is the persistence and authorization core of a second-hand marketplace: keyed stores for listings and accounts, whole-file JSON persistence, and the ownership and role rules that gate every listing operation.

pub mod config;
pub mod listings;
pub mod prelude;
pub mod products;
pub mod records;
pub mod store;
pub mod users;

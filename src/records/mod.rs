//! Wire records
//!
//! The JSON shapes of the two persisted documents: one serde struct per
//! array element, with conversions to and from the domain entities. The
//! field names here are the on-disk names; nothing else in the crate spells
//! them.

pub mod products;
pub mod users;

//! Products

use std::fmt::{self, Display, Formatter};

use jiff::Timestamp;
use rust_decimal::Decimal;
use smallvec::SmallVec;

use crate::users::UserId;

/// Well-known values of [`Product::status`].
///
/// The status field is free-form text; these are the values the listing
/// workflows read and write.
pub mod status {
    /// Listed and purchasable.
    pub const ON_SALE: &str = "on sale";

    /// Sold to a buyer.
    pub const SOLD: &str = "sold";

    /// Taken off the market by its seller or a moderator.
    pub const DELISTED: &str = "delisted";
}

/// Product identifier.
///
/// [`ProductId::UNASSIGNED`] marks a product that has not been stored yet;
/// the repository allocates a real id the first time such a product is saved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ProductId(i64);

impl ProductId {
    /// Id of a product that has not been stored yet.
    pub const UNASSIGNED: Self = Self(0);

    /// Whether a repository has assigned this id.
    #[must_use]
    pub const fn is_assigned(self) -> bool {
        self.0 > 0
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl From<i64> for ProductId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<ProductId> for i64 {
    fn from(value: ProductId) -> Self {
        value.0
    }
}

/// A marketplace listing.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Product {
    /// Repository-assigned identifier; [`ProductId::UNASSIGNED`] until the
    /// product is first saved.
    pub id: ProductId,

    /// Listing title.
    pub title: String,

    /// Category the listing is filed under.
    pub category_id: i64,

    /// Free-form description.
    pub description: String,

    /// Asking price. Non-negative by convention; validating user input is the
    /// presentation layer's job, not the core's.
    pub price: Decimal,

    /// The seller's account id. Stamped by the listing service at publish
    /// time and preserved by every edit afterwards.
    pub seller_id: UserId,

    /// Where the item is offered.
    pub location: String,

    /// Tags in the order the seller entered them; the order survives
    /// round trips through the store file.
    pub tags: SmallVec<[String; 4]>,

    /// When the listing went public; `None` for a listing without a
    /// publication time.
    pub published_at: Option<Timestamp>,

    /// Listing status; see [`status`] for the well-known values.
    pub status: String,
}

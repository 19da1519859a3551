//! Product wire record.

use jiff::{Timestamp, civil, tz::TimeZone};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::warn;

use crate::{
    products::{Product, ProductId},
    users::UserId,
};

/// One element of the products file's JSON array.
///
/// Every field is optional on decode, so a sparse object loads with
/// zero-valued fields rather than failing the whole file. `publicTime` is
/// kept as the raw string because the empty string is the on-disk spelling
/// of "never published".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProductRecord {
    /// `productId`
    pub product_id: i64,

    /// `title`
    pub title: String,

    /// `categoryId`
    pub category_id: i64,

    /// `description`
    pub description: String,

    /// `price`, a JSON number
    pub price: Decimal,

    /// `sellerId`
    pub seller_id: i64,

    /// `location`
    pub location: String,

    /// `tags`, order-preserving
    pub tags: SmallVec<[String; 4]>,

    /// `publicTime`: an ISO 8601 instant, or empty when unset
    pub public_time: String,

    /// `status`
    pub status: String,
}

impl From<&Product> for ProductRecord {
    fn from(product: &Product) -> Self {
        Self {
            product_id: product.id.into(),
            title: product.title.clone(),
            category_id: product.category_id,
            description: product.description.clone(),
            price: product.price,
            seller_id: product.seller_id.into(),
            location: product.location.clone(),
            tags: product.tags.clone(),
            public_time: product
                .published_at
                .as_ref()
                .map_or_else(String::new, ToString::to_string),
            status: product.status.clone(),
        }
    }
}

impl From<ProductRecord> for Product {
    fn from(record: ProductRecord) -> Self {
        let published_at = parse_public_time(&record.public_time);

        Self {
            id: ProductId::from(record.product_id),
            title: record.title,
            category_id: record.category_id,
            description: record.description,
            price: record.price,
            seller_id: UserId::from(record.seller_id),
            location: record.location,
            tags: record.tags,
            published_at,
            status: record.status,
        }
    }
}

/// Decode a `publicTime` string.
///
/// The empty string means the listing was never published. Files written by
/// the old desktop client carry local datetimes with no UTC offset; those
/// are read as UTC. Anything else unparseable is treated as unset, with a
/// warning, rather than poisoning the record.
fn parse_public_time(raw: &str) -> Option<Timestamp> {
    if raw.is_empty() {
        return None;
    }

    if let Ok(timestamp) = raw.parse::<Timestamp>() {
        return Some(timestamp);
    }

    if let Ok(datetime) = raw.parse::<civil::DateTime>()
        && let Ok(zoned) = datetime.to_zoned(TimeZone::UTC)
    {
        return Some(zoned.timestamp());
    }

    warn!(value = raw, "unparseable publicTime, treating listing as unpublished");

    None
}

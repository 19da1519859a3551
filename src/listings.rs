//! Listing workflows
//!
//! The policy layer above both stores: who may publish, edit, delete, or
//! moderate a listing. Every rule reduces to the ownership relation (the
//! stored seller id equals the acting user's id) plus the admin role for
//! the moderation paths.

use thiserror::Error;
use tracing::debug;

use crate::{
    products::{Product, ProductId, status},
    store::{StoreError, products::ProductRepository, users::UserRepository},
    users::{Role, UserId},
};

/// Errors from the listing workflows.
#[derive(Debug, Error)]
pub enum ListingError {
    /// No listing under the requested id.
    #[error("no listing with id {0}")]
    NotFound(ProductId),

    /// The acting user id does not belong to any known account.
    #[error("unknown user {0}")]
    UnknownUser(UserId),

    /// The acting user may not perform this operation on this listing.
    #[error("user {user} may not modify listing {listing}")]
    Forbidden {
        /// The acting user.
        user: UserId,
        /// The target listing.
        listing: ProductId,
    },

    /// The underlying store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Authorization and lifecycle rules for listings.
///
/// Borrows both repositories from a longer-lived owner: products are
/// mutated, users only consulted. The service owns neither.
#[derive(Debug)]
pub struct ListingService<'a> {
    products: &'a mut ProductRepository,
    users: &'a UserRepository,
}

impl<'a> ListingService<'a> {
    /// Wire the service to its repositories.
    #[must_use]
    pub fn new(products: &'a mut ProductRepository, users: &'a UserRepository) -> Self {
        Self { products, users }
    }

    /// Put a listing on the market for `seller`.
    ///
    /// Any known account may publish, admin or not. The stored copy carries
    /// `seller` as its seller id regardless of what the input says:
    /// ownership is established here, once, and edits preserve it.
    ///
    /// # Errors
    ///
    /// [`ListingError::UnknownUser`] if `seller` is not a known account;
    /// [`ListingError::Store`] if persisting the store fails.
    pub fn publish(
        &mut self,
        mut product: Product,
        seller: UserId,
    ) -> Result<ProductId, ListingError> {
        if !self.may_publish(seller) {
            return Err(ListingError::UnknownUser(seller));
        }

        product.seller_id = seller;

        let id = self.products.save(product)?;

        debug!(listing = %id, seller = %seller, "published listing");

        Ok(id)
    }

    /// Replace the fields of listing `id` with those of `product`.
    ///
    /// Only the owner may edit; administrators get no override here, unlike
    /// [`Self::delete`]. The stored seller id and the target id survive no
    /// matter what the replacement value carries.
    ///
    /// # Errors
    ///
    /// [`ListingError::NotFound`] if no such listing exists;
    /// [`ListingError::Forbidden`] if `acting` is not the owner;
    /// [`ListingError::Store`] if persisting the store fails.
    pub fn edit(
        &mut self,
        id: ProductId,
        mut product: Product,
        acting: UserId,
    ) -> Result<(), ListingError> {
        let existing = self.products.find(id).ok_or(ListingError::NotFound(id))?;

        if existing.seller_id != acting {
            return Err(ListingError::Forbidden { user: acting, listing: id });
        }

        product.id = id;
        product.seller_id = existing.seller_id;

        self.products.update(product)?;

        debug!(listing = %id, editor = %acting, "edited listing");

        Ok(())
    }

    /// Take listing `id` off the market entirely.
    ///
    /// The owner may delete their own listing; administrators may delete
    /// anyone's.
    ///
    /// # Errors
    ///
    /// [`ListingError::NotFound`] if no such listing exists;
    /// [`ListingError::Forbidden`] if `acting` neither owns the listing nor
    /// holds the admin role; [`ListingError::Store`] if persisting the
    /// store fails.
    pub fn delete(&mut self, id: ProductId, acting: UserId) -> Result<(), ListingError> {
        let existing = self.products.find(id).ok_or(ListingError::NotFound(id))?;

        if existing.seller_id != acting && !self.users.has_role(acting, Role::Admin) {
            return Err(ListingError::Forbidden { user: acting, listing: id });
        }

        self.products.remove(id)?;

        debug!(listing = %id, actor = %acting, "deleted listing");

        Ok(())
    }

    /// Pull listing `id` from sale.
    ///
    /// Moderation: admin-only, rewrites the status to "delisted" and
    /// touches nothing else.
    ///
    /// # Errors
    ///
    /// [`ListingError::Forbidden`] if `acting` is not an administrator;
    /// [`ListingError::NotFound`] if no such listing exists;
    /// [`ListingError::Store`] if persisting the store fails.
    pub fn ban(&mut self, id: ProductId, acting: UserId) -> Result<(), ListingError> {
        self.moderate_status(id, acting, status::DELISTED)
    }

    /// Put a banned listing back on sale.
    ///
    /// Moderation: admin-only, the counterpart of [`Self::ban`].
    ///
    /// # Errors
    ///
    /// Same cases as [`Self::ban`].
    pub fn unban(&mut self, id: ProductId, acting: UserId) -> Result<(), ListingError> {
        self.moderate_status(id, acting, status::ON_SALE)
    }

    fn moderate_status(
        &mut self,
        id: ProductId,
        acting: UserId,
        status: &str,
    ) -> Result<(), ListingError> {
        if !self.users.has_role(acting, Role::Admin) {
            return Err(ListingError::Forbidden { user: acting, listing: id });
        }

        let mut product = self
            .products
            .find(id)
            .cloned()
            .ok_or(ListingError::NotFound(id))?;

        product.status = status.to_owned();

        self.products.update(product)?;

        debug!(listing = %id, moderator = %acting, status, "moderated listing status");

        Ok(())
    }

    /// Look up one listing.
    #[must_use]
    pub fn product(&self, id: ProductId) -> Option<&Product> {
        self.products.find(id)
    }

    /// Every listing on the market, in no particular order.
    pub fn products(&self) -> impl Iterator<Item = &Product> {
        self.products.all()
    }

    /// Whether `user` owns listing `id`. A missing listing is owned by
    /// no one.
    #[must_use]
    pub fn is_owner(&self, id: ProductId, user: UserId) -> bool {
        self.products
            .find(id)
            .is_some_and(|product| product.seller_id == user)
    }

    /// Whether `user` may publish at all: true for every known account,
    /// whatever its role.
    #[must_use]
    pub fn may_publish(&self, user: UserId) -> bool {
        self.users.find(user).is_some()
    }
}

//! Product repository

use std::path::PathBuf;

use rustc_hash::FxHashMap;
use tracing::{debug, warn};

use crate::{
    products::{Product, ProductId},
    records::products::ProductRecord,
    store::{StoreError, read_records, write_records},
    users::UserId,
};

/// Keyed store of products backed by one JSON file.
///
/// Ids come from a counter that always exceeds the highest id ever stored,
/// so a persisted id is never handed to a different product for as long as
/// the repository lives. Every mutation rewrites the whole file before
/// returning.
#[derive(Debug)]
pub struct ProductRepository {
    path: PathBuf,
    products: FxHashMap<ProductId, Product>,
    next_id: i64,
}

impl ProductRepository {
    /// Open the repository at `path`, loading whatever the file holds.
    ///
    /// A missing file is an empty store (the first run has nothing to load).
    /// Entries without a positive id are dropped with a warning: an
    /// unassigned id on disk could only shadow the ids the counter hands
    /// out. The counter itself seeds to one past the highest loaded id.
    ///
    /// # Errors
    ///
    /// [`StoreError::Io`] if the file exists but cannot be read, or
    /// [`StoreError::Parse`] if its contents are not a JSON array.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let records: Vec<ProductRecord> = read_records(&path)?;

        let mut products = FxHashMap::default();
        let mut next_id = 1;

        for record in records {
            let product = Product::from(record);

            if !product.id.is_assigned() {
                warn!(path = %path.display(), id = %product.id, "skipping product without a positive id");
                continue;
            }

            next_id = next_id.max(i64::from(product.id) + 1);
            products.insert(product.id, product);
        }

        debug!(path = %path.display(), count = products.len(), "opened product store");

        Ok(Self { path, products, next_id })
    }

    /// Store `product`, allocating the next id when it carries
    /// [`ProductId::UNASSIGNED`], and rewrite the store file.
    ///
    /// A product arriving with an assigned id replaces whatever entry held
    /// that id, and the counter advances past it. Creation and replacement
    /// are deliberately the same call: callers signal "new" by passing an
    /// unassigned id. Returns the id the product was stored under.
    ///
    /// # Errors
    ///
    /// [`StoreError::Io`] if the rewritten file cannot be persisted.
    pub fn save(&mut self, mut product: Product) -> Result<ProductId, StoreError> {
        if product.id.is_assigned() {
            self.next_id = self.next_id.max(i64::from(product.id) + 1);
        } else {
            product.id = ProductId::from(self.next_id);
            self.next_id += 1;
        }

        let id = product.id;

        self.products.insert(id, product);
        self.persist()?;

        Ok(id)
    }

    /// Look up a product by id.
    #[must_use]
    pub fn find(&self, id: ProductId) -> Option<&Product> {
        self.products.get(&id)
    }

    /// Replace the entry carrying `product.id`, rewriting the store file.
    ///
    /// Unlike [`Self::save`] this never creates: an unassigned id, or an id
    /// with no stored entry, is [`StoreError::NotFound`] and the file is not
    /// touched.
    ///
    /// # Errors
    ///
    /// [`StoreError::NotFound`] if no entry holds that id;
    /// [`StoreError::Io`] if the rewritten file cannot be persisted.
    pub fn update(&mut self, product: Product) -> Result<(), StoreError> {
        if !product.id.is_assigned() || !self.products.contains_key(&product.id) {
            return Err(StoreError::NotFound(product.id.into()));
        }

        self.products.insert(product.id, product);
        self.persist()
    }

    /// Remove and return the entry at `id`, rewriting the store file.
    ///
    /// # Errors
    ///
    /// [`StoreError::NotFound`] if nothing was stored under `id` (the file
    /// is left untouched); [`StoreError::Io`] if the rewritten file cannot
    /// be persisted.
    pub fn remove(&mut self, id: ProductId) -> Result<Product, StoreError> {
        let product = self
            .products
            .remove(&id)
            .ok_or(StoreError::NotFound(id.into()))?;

        self.persist()?;

        Ok(product)
    }

    /// All products offered by `seller`, in no particular order.
    #[must_use]
    pub fn by_seller(&self, seller: UserId) -> Vec<&Product> {
        self.products
            .values()
            .filter(|product| product.seller_id == seller)
            .collect()
    }

    /// Iterate over every stored product, in no particular order.
    pub fn all(&self) -> impl Iterator<Item = &Product> {
        self.products.values()
    }

    /// Number of stored products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the store holds no products.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    fn persist(&self) -> Result<(), StoreError> {
        let mut records: Vec<ProductRecord> =
            self.products.values().map(ProductRecord::from).collect();

        records.sort_by_key(|record| record.product_id);

        write_records(&self.path, &records)
    }
}

//! Wishlist
//!
//! An ordered set of liked product ids, mirrored into storage and
//! broadcasting [`Signal::WishlistChanged`] after every mutation so
//! badge counts on other surfaces can re-read it.

use std::rc::Rc;

use tracing::debug;

use crate::events::{EventBus, Signal};
use crate::products::ProductId;
use crate::storage::{self, Storage, StorageError, keys};

/// Wishlist store.
#[derive(Debug)]
pub struct WishlistStore {
    storage: Rc<dyn Storage>,
    bus: Rc<EventBus>,
    liked: Vec<ProductId>,
}

impl WishlistStore {
    /// Build the store, loading any liked ids persisted by a previous
    /// session.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the persisted list cannot be decoded.
    pub fn new(storage: Rc<dyn Storage>, bus: Rc<EventBus>) -> Result<Self, StorageError> {
        let liked = storage::read_json(storage.as_ref(), keys::LIKED_PRODUCTS)?.unwrap_or_default();

        Ok(WishlistStore {
            storage,
            bus,
            liked,
        })
    }

    /// Like or unlike a product; returns whether it is now liked.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if persisting the updated list fails.
    pub fn toggle(&mut self, id: &ProductId) -> Result<bool, StorageError> {
        let liked = if self.contains(id) {
            self.liked.retain(|liked| liked != id);
            false
        } else {
            self.liked.push(id.clone());
            true
        };

        debug!(product = %id, liked, "toggled wishlist entry");
        self.persist()?;

        Ok(liked)
    }

    /// Whether the product is currently liked.
    #[must_use]
    pub fn contains(&self, id: &ProductId) -> bool {
        self.liked.iter().any(|liked| liked == id)
    }

    /// Liked product ids, oldest first.
    #[must_use]
    pub fn ids(&self) -> &[ProductId] {
        &self.liked
    }

    /// Number of liked products (the badge value).
    #[must_use]
    pub fn len(&self) -> usize {
        self.liked.len()
    }

    /// Check if nothing is liked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.liked.is_empty()
    }

    /// Drop every liked product; used on logout.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if persisting fails.
    pub fn clear(&mut self) -> Result<(), StorageError> {
        self.liked.clear();
        debug!("cleared wishlist");
        self.persist()
    }

    fn persist(&self) -> Result<(), StorageError> {
        storage::write_json(self.storage.as_ref(), keys::LIKED_PRODUCTS, &self.liked)?;
        self.bus.emit(Signal::WishlistChanged);

        Ok(())
    }
}

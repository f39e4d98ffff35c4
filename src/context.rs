//! App Context
//!
//! The top-level owner of every store. Cart, auth, wishlist, orders and
//! notifications are explicit fields passed by reference to whatever
//! needs them; there is no ambient global state anywhere in the crate.

use std::rc::Rc;

use rusty_money::iso::{self, Currency};
use thiserror::Error;

use crate::auth::{AuthError, AuthStore};
use crate::cart::Cart;
use crate::catalog::Catalog;
use crate::events::EventBus;
use crate::fixtures::{self, FixtureError};
use crate::notifications::NotificationStore;
use crate::orders::OrderStore;
use crate::storage::{Storage, StorageError};
use crate::wishlist::WishlistStore;

/// Display currency of the storefront.
#[must_use]
pub fn store_currency() -> &'static Currency {
    iso::INR
}

/// Errors while building the application context.
#[derive(Debug, Error)]
pub enum AppInitError {
    /// The embedded catalog could not be parsed.
    #[error(transparent)]
    Fixture(#[from] FixtureError),

    /// Persisted state could not be restored.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The persisted session could not be restored.
    #[error(transparent)]
    Auth(#[from] AuthError),
}

/// Application context owning the catalog, the signal bus and all
/// session stores.
#[derive(Debug)]
pub struct AppContext {
    /// Product catalog.
    pub catalog: Catalog,

    /// Signal bus shared across surfaces.
    pub bus: Rc<EventBus>,

    /// Cart ledger for the active session.
    pub cart: Cart,

    /// Mock session store.
    pub auth: AuthStore,

    /// Liked products.
    pub wishlist: WishlistStore,

    /// Order history.
    pub orders: OrderStore,

    /// Notification feed.
    pub notifications: NotificationStore,
}

impl AppContext {
    /// Build the context over a storage handle, with the embedded demo
    /// catalog.
    ///
    /// # Errors
    ///
    /// Returns an [`AppInitError`] if the catalog or any persisted state
    /// cannot be loaded.
    pub fn new(storage: Rc<dyn Storage>) -> Result<Self, AppInitError> {
        Self::with_catalog(storage, fixtures::default_catalog()?)
    }

    /// Build the context over a storage handle and an explicit catalog.
    ///
    /// # Errors
    ///
    /// Returns an [`AppInitError`] if persisted state cannot be restored.
    pub fn with_catalog(storage: Rc<dyn Storage>, catalog: Catalog) -> Result<Self, AppInitError> {
        let bus = Rc::new(EventBus::new());

        Ok(AppContext {
            catalog,
            cart: Cart::new(store_currency()),
            auth: AuthStore::new(Rc::clone(&storage))?,
            wishlist: WishlistStore::new(Rc::clone(&storage), Rc::clone(&bus))?,
            orders: OrderStore::new(Rc::clone(&storage))?,
            notifications: NotificationStore::new(storage)?,
            bus,
        })
    }
}

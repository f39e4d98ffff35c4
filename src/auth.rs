//! Auth
//!
//! Mock session management. There is no credential checking: `login`
//! and `register` install a synthetic user and mirror it into storage,
//! which is exactly what the storefront simulates. Logout also clears
//! the wishlist, since liked products belong to the session.

use std::rc::Rc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::storage::{self, Storage, StorageError, keys};
use crate::wishlist::WishlistStore;

/// Avatar handed to every mock session user.
const MOCK_AVATAR: &str = "https://images.pexels.com/photos/1102341/pexels-photo-1102341.jpeg";

/// Errors related to session management.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Failure persisting or loading the session record.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Session user record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Synthetic user id.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Email address the user signed in with.
    pub email: String,

    /// Optional avatar image reference.
    pub avatar: Option<String>,
}

/// Auth store.
#[derive(Debug)]
pub struct AuthStore {
    storage: Rc<dyn Storage>,
    user: Option<User>,
}

impl AuthStore {
    /// Build the store, restoring any session persisted by a previous
    /// visit.
    ///
    /// # Errors
    ///
    /// Returns an [`AuthError`] if the persisted record cannot be decoded.
    pub fn new(storage: Rc<dyn Storage>) -> Result<Self, AuthError> {
        let user = storage::read_json(storage.as_ref(), keys::USER)?;

        Ok(AuthStore { storage, user })
    }

    /// Sign in with an email address, installing the mock user.
    ///
    /// # Errors
    ///
    /// Returns an [`AuthError`] if persisting the session fails.
    pub fn login(&mut self, email: impl Into<String>) -> Result<&User, AuthError> {
        self.install(User {
            id: "1".to_owned(),
            name: "John Doe".to_owned(),
            email: email.into(),
            avatar: Some(MOCK_AVATAR.to_owned()),
        })
    }

    /// Register a new account, installing a mock user with the given name.
    ///
    /// # Errors
    ///
    /// Returns an [`AuthError`] if persisting the session fails.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> Result<&User, AuthError> {
        self.install(User {
            id: "1".to_owned(),
            name: name.into(),
            email: email.into(),
            avatar: Some(MOCK_AVATAR.to_owned()),
        })
    }

    /// End the session and clear the session-scoped wishlist.
    ///
    /// # Errors
    ///
    /// Returns an [`AuthError`] if clearing the persisted wishlist fails.
    pub fn logout(&mut self, wishlist: &mut WishlistStore) -> Result<(), AuthError> {
        self.user = None;
        self.storage.remove(keys::USER);
        wishlist.clear()?;
        info!("logged out");

        Ok(())
    }

    /// The signed-in user, if any.
    #[must_use]
    pub fn current_user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Whether a session is active.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    fn install(&mut self, user: User) -> Result<&User, AuthError> {
        storage::write_json(self.storage.as_ref(), keys::USER, &user)?;
        debug!(user = %user.email, "installed mock session");

        Ok(self.user.insert(user))
    }
}

//! Notifications
//!
//! Mock notification feed, mirrored into storage. A fresh session is
//! seeded with two welcome promotions, matching the storefront's
//! behavior for new users.

use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::storage::{self, Storage, StorageError, keys};

/// Kind of notification, used to pick an icon on the UI side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    /// Order status updates.
    Order,

    /// Promotional offers.
    Promotion,

    /// Wishlist activity.
    Wishlist,

    /// Account and system messages.
    System,
}

/// One entry in the notification feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Feed-local identifier.
    pub id: String,

    /// Notification kind.
    pub kind: NotificationKind,

    /// Short title.
    pub title: String,

    /// Body text.
    pub message: String,

    /// Human-readable timestamp label ("Just now", "1 day ago").
    pub time: String,

    /// Whether the user has read the notification.
    pub read: bool,
}

/// Notification store.
#[derive(Debug)]
pub struct NotificationStore {
    storage: Rc<dyn Storage>,
    notifications: Vec<Notification>,
}

impl NotificationStore {
    /// Build the store, loading the persisted feed or seeding the
    /// defaults for a fresh session.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if a persisted feed cannot be decoded.
    pub fn new(storage: Rc<dyn Storage>) -> Result<Self, StorageError> {
        let notifications = match storage::read_json(storage.as_ref(), keys::NOTIFICATIONS)? {
            Some(saved) => saved,
            None => {
                let seeded = default_notifications();
                storage::write_json(storage.as_ref(), keys::NOTIFICATIONS, &seeded)?;
                seeded
            }
        };

        Ok(NotificationStore {
            storage,
            notifications,
        })
    }

    /// Mark one notification as read; no-op for unknown ids.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if persisting fails.
    pub fn mark_read(&mut self, id: &str) -> Result<(), StorageError> {
        if let Some(notification) = self
            .notifications
            .iter_mut()
            .find(|notification| notification.id == id)
        {
            notification.read = true;
        }

        self.persist()
    }

    /// Mark the whole feed as read.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if persisting fails.
    pub fn mark_all_read(&mut self) -> Result<(), StorageError> {
        for notification in &mut self.notifications {
            notification.read = true;
        }

        self.persist()
    }

    /// Delete one notification; no-op for unknown ids.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if persisting fails.
    pub fn remove(&mut self, id: &str) -> Result<(), StorageError> {
        self.notifications
            .retain(|notification| notification.id != id);

        self.persist()
    }

    /// Number of unread notifications (the badge value).
    #[must_use]
    pub fn unread_count(&self) -> usize {
        self.notifications
            .iter()
            .filter(|notification| !notification.read)
            .count()
    }

    /// Iterate over the feed, newest first.
    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.notifications.iter()
    }

    /// Number of notifications in the feed.
    #[must_use]
    pub fn len(&self) -> usize {
        self.notifications.len()
    }

    /// Check if the feed is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.notifications.is_empty()
    }

    fn persist(&self) -> Result<(), StorageError> {
        debug!(count = self.notifications.len(), "persisted notifications");
        storage::write_json(self.storage.as_ref(), keys::NOTIFICATIONS, &self.notifications)
    }
}

/// Feed seeded for users with no persisted notifications.
fn default_notifications() -> Vec<Notification> {
    vec![
        Notification {
            id: "1".to_owned(),
            kind: NotificationKind::Promotion,
            title: "Welcome to StyleHub!".to_owned(),
            message: "Get 20% off on your first purchase. Use code: WELCOME20".to_owned(),
            time: "Just now".to_owned(),
            read: false,
        },
        Notification {
            id: "2".to_owned(),
            kind: NotificationKind::Promotion,
            title: "Flash Sale Alert".to_owned(),
            message: "Up to 70% off on selected items. Limited time offer!".to_owned(),
            time: "1 day ago".to_owned(),
            read: false,
        },
    ]
}

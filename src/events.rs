//! Events
//!
//! An in-process signal bus replacing ad-hoc string-named broadcast
//! events. Signal kinds are a closed enum, so listeners are statically
//! known and a typo cannot silently subscribe to nothing.

use std::cell::RefCell;
use std::fmt;

/// Zero-payload signals broadcast across view boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// The wishlist changed; badge counts should be re-read.
    WishlistChanged,

    /// Open the order history surface.
    OpenOrderHistory,

    /// Open the profile settings surface.
    OpenProfileSettings,

    /// Open the wishlist surface.
    OpenWishlist,

    /// Open the notifications surface.
    OpenNotifications,
}

type Listener = Box<dyn Fn(Signal)>;

/// Synchronous, single-threaded signal bus.
///
/// Listeners are registered up front and stay for the lifetime of the
/// bus; a listener must not subscribe further listeners while a signal
/// is being delivered.
#[derive(Default)]
pub struct EventBus {
    listeners: RefCell<Vec<Listener>>,
}

impl EventBus {
    /// Create a bus with no listeners.
    #[must_use]
    pub fn new() -> Self {
        EventBus::default()
    }

    /// Register a listener for all signals.
    pub fn subscribe(&self, listener: impl Fn(Signal) + 'static) {
        self.listeners.borrow_mut().push(Box::new(listener));
    }

    /// Deliver a signal to every listener, in subscription order.
    pub fn emit(&self, signal: Signal) {
        for listener in self.listeners.borrow().iter() {
            listener(signal);
        }
    }

    /// Number of registered listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

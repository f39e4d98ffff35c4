//! StyleHub prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    auth::{AuthError, AuthStore, User},
    cart::{Cart, CartError, CartLine, LineKey},
    catalog::{Catalog, ProductQuery, SortKey},
    checkout::{
        BuyNowRequest, CheckoutError, CheckoutOutcome, GatewayError, MERCHANT_NAME,
        PaymentGateway, PaymentOutcome, PaymentPrefill, PaymentRequest, ShippingContact, buy_now,
        checkout_cart,
    },
    context::{AppContext, AppInitError, store_currency},
    events::{EventBus, Signal},
    fixtures::{FixtureError, default_catalog},
    notifications::{Notification, NotificationKind, NotificationStore},
    orders::{Order, OrderLine, OrderStatus, OrderStore, ShippingAddress},
    pricing::{CheckoutTotals, PricingError, gst_rate},
    products::{Product, ProductId},
    storage::{MemoryStorage, Storage, StorageError},
    wishlist::WishlistStore,
};

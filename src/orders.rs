//! Orders
//!
//! Synthetic order records written after a confirmed payment. The store
//! is append-at-front (newest first) and mirrored into storage; amounts
//! are persisted in minor currency units.

use std::rc::Rc;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::cart::CartLine;
use crate::products::ProductId;
use crate::storage::{self, Storage, StorageError, keys};

/// Order lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Payment confirmed; the terminal state this mock ever records.
    Confirmed,

    /// Being prepared.
    Processing,

    /// Handed to the carrier.
    Shipped,

    /// Delivered to the shipping address.
    Delivered,
}

/// Shipping address captured from the checkout form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingAddress {
    /// Recipient full name.
    pub name: String,

    /// Street address.
    pub address: String,

    /// City.
    pub city: String,

    /// State or region.
    pub state: String,

    /// Postal code.
    pub zip_code: String,
}

/// Snapshot of one cart line at the moment of purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    /// Catalog id of the purchased product.
    pub product: ProductId,

    /// Product name at purchase time.
    pub name: String,

    /// Brand at purchase time.
    pub brand: String,

    /// First product image, when one existed.
    pub image: Option<String>,

    /// Unit price in minor currency units.
    pub price_minor: i64,

    /// Purchased quantity.
    pub quantity: u32,

    /// Chosen size label.
    pub size: String,

    /// Chosen colour label.
    pub color: String,
}

impl From<&CartLine> for OrderLine {
    fn from(line: &CartLine) -> Self {
        let product = line.product();

        OrderLine {
            product: product.id.clone(),
            name: product.name.clone(),
            brand: product.brand.clone(),
            image: product.primary_image().map(str::to_owned),
            price_minor: product.price.to_minor_units(),
            quantity: line.quantity(),
            size: line.size().to_owned(),
            color: line.color().to_owned(),
        }
    }
}

/// One recorded order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Record id, the millisecond timestamp as a string.
    pub id: String,

    /// Customer-facing order number.
    pub order_number: String,

    /// When the order was placed; serialized as an ISO 8601 timestamp.
    pub date: Timestamp,

    /// Lifecycle status.
    pub status: OrderStatus,

    /// Payable total in minor currency units, tax included.
    pub total_minor: i64,

    /// Purchased line snapshots.
    pub items: Vec<OrderLine>,

    /// Where the order ships to.
    pub shipping: ShippingAddress,
}

impl Order {
    /// Build a confirmed order placed at the given instant.
    #[must_use]
    pub fn confirmed(
        placed_at: Timestamp,
        total_minor: i64,
        items: Vec<OrderLine>,
        shipping: ShippingAddress,
    ) -> Self {
        let millis = placed_at.as_millisecond();

        Order {
            id: millis.to_string(),
            order_number: order_number_for(placed_at),
            date: placed_at,
            status: OrderStatus::Confirmed,
            total_minor,
            items,
            shipping,
        }
    }
}

/// Derive the customer-facing order number from the placement instant:
/// a fixed prefix plus the last eight digits of the millisecond
/// timestamp.
#[must_use]
pub fn order_number_for(placed_at: Timestamp) -> String {
    format!(
        "SH{:08}",
        placed_at.as_millisecond().rem_euclid(100_000_000)
    )
}

/// Order store.
#[derive(Debug)]
pub struct OrderStore {
    storage: Rc<dyn Storage>,
    orders: Vec<Order>,
}

impl OrderStore {
    /// Build the store, loading any orders persisted by a previous
    /// session.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the persisted list cannot be decoded.
    pub fn new(storage: Rc<dyn Storage>) -> Result<Self, StorageError> {
        let orders = storage::read_json(storage.as_ref(), keys::ORDERS)?.unwrap_or_default();

        Ok(OrderStore { storage, orders })
    }

    /// Record an order at the front of the history.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if persisting the history fails.
    pub fn record(&mut self, order: Order) -> Result<(), StorageError> {
        info!(order = %order.order_number, total_minor = order.total_minor, "recorded order");
        self.orders.insert(0, order);

        storage::write_json(self.storage.as_ref(), keys::ORDERS, &self.orders)
    }

    /// Recorded orders, newest first.
    #[must_use]
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// Number of recorded orders.
    #[must_use]
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    /// Check if no orders have been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::storage::MemoryStorage;

    use super::*;

    fn shipping() -> ShippingAddress {
        ShippingAddress {
            name: "Jane Doe".to_owned(),
            address: "1 High Street".to_owned(),
            city: "Mumbai".to_owned(),
            state: "MH".to_owned(),
            zip_code: "400001".to_owned(),
        }
    }

    #[test]
    fn order_number_uses_last_eight_digits_of_millis() -> TestResult {
        let placed_at: Timestamp = "2026-08-30T12:00:00Z".parse()?;
        let millis = placed_at.as_millisecond();

        let number = order_number_for(placed_at);

        assert_eq!(number, format!("SH{:08}", millis % 100_000_000));
        assert_eq!(number.len(), 10);

        Ok(())
    }

    #[test]
    fn confirmed_order_carries_the_placement_instant() -> TestResult {
        let placed_at: Timestamp = "2026-08-30T12:00:00Z".parse()?;

        let order = Order::confirmed(placed_at, 118_000, Vec::new(), shipping());

        assert_eq!(order.status, OrderStatus::Confirmed);
        assert_eq!(order.date, placed_at);
        assert_eq!(order.id, placed_at.as_millisecond().to_string());

        Ok(())
    }

    #[test]
    fn record_puts_newest_orders_first() -> TestResult {
        let mut store = OrderStore::new(Rc::new(MemoryStorage::new()))?;

        let first: Timestamp = "2026-08-30T12:00:00Z".parse()?;
        let second: Timestamp = "2026-08-30T13:00:00Z".parse()?;

        store.record(Order::confirmed(first, 100, Vec::new(), shipping()))?;
        store.record(Order::confirmed(second, 200, Vec::new(), shipping()))?;

        let totals: Vec<i64> = store.orders().iter().map(|order| order.total_minor).collect();
        assert_eq!(totals, vec![200, 100]);

        Ok(())
    }

    #[test]
    fn history_survives_a_rebuild_over_the_same_storage() -> TestResult {
        let storage: Rc<dyn Storage> = Rc::new(MemoryStorage::new());
        let placed_at: Timestamp = "2026-08-30T12:00:00Z".parse()?;

        let mut store = OrderStore::new(Rc::clone(&storage))?;
        store.record(Order::confirmed(placed_at, 118_000, Vec::new(), shipping()))?;

        let restored = OrderStore::new(storage)?;

        assert_eq!(restored.len(), 1);
        assert_eq!(
            restored.orders().first().map(|order| order.total_minor),
            Some(118_000)
        );

        Ok(())
    }
}

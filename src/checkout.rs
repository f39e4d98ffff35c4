//! Checkout
//!
//! Both purchase flows: the full-cart checkout and the single-item
//! "buy now" flow. Each validates the shipping form, prices the goods
//! through [`CheckoutTotals`], hands the payable amount to the hosted
//! payment gateway, and on completion records a synthetic order. Only
//! the full-cart flow clears the session cart afterwards. A gateway
//! failure aborts the attempt; nothing is retried.

use jiff::Timestamp;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::cart::{Cart, CartError};
use crate::orders::{Order, OrderLine, OrderStore, ShippingAddress};
use crate::pricing::{CheckoutTotals, PricingError};
use crate::products::Product;
use crate::storage::StorageError;

/// Merchant name shown in the payment widget.
pub const MERCHANT_NAME: &str = "StyleHub";

/// Order description shown in the payment widget.
const PURCHASE_DESCRIPTION: &str = "Fashion Purchase";

/// Errors from the opaque hosted payment widget.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The widget script failed to load; the flow aborts.
    #[error("payment widget failed to load: {0}")]
    WidgetUnavailable(String),
}

/// Errors that abort a checkout attempt.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// A required shipping form field is empty.
    #[error("required field {0} is missing")]
    MissingField(&'static str),

    /// The cart has no lines to check out.
    #[error("cannot check out an empty cart")]
    EmptyCart,

    /// The buy-now line could not be constructed.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// Totals could not be computed.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// The payment widget failed.
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// The order history could not be persisted.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Shipping contact captured by the checkout form.
#[derive(Debug, Clone, Default)]
pub struct ShippingContact {
    /// First name.
    pub first_name: String,

    /// Last name.
    pub last_name: String,

    /// Email address.
    pub email: String,

    /// Phone number.
    pub phone: String,

    /// Street address.
    pub address: String,

    /// City.
    pub city: String,

    /// State or region.
    pub state: String,

    /// Postal code.
    pub zip_code: String,
}

impl ShippingContact {
    /// Check every required field is filled, reporting the first one
    /// that is not.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::MissingField`] naming the empty field.
    pub fn validate(&self) -> Result<(), CheckoutError> {
        let fields = [
            ("first name", &self.first_name),
            ("last name", &self.last_name),
            ("email", &self.email),
            ("address", &self.address),
            ("city", &self.city),
            ("state", &self.state),
            ("zip code", &self.zip_code),
            ("phone", &self.phone),
        ];

        for (name, value) in fields {
            if value.trim().is_empty() {
                return Err(CheckoutError::MissingField(name));
            }
        }

        Ok(())
    }

    /// Recipient full name.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Single-line address note for the payment widget.
    #[must_use]
    pub fn address_note(&self) -> String {
        format!(
            "{}, {}, {} - {}",
            self.address, self.city, self.state, self.zip_code
        )
    }

    /// The shipping address recorded on the order.
    #[must_use]
    pub fn shipping_address(&self) -> ShippingAddress {
        ShippingAddress {
            name: self.full_name(),
            address: self.address.clone(),
            city: self.city.clone(),
            state: self.state.clone(),
            zip_code: self.zip_code.clone(),
        }
    }
}

/// Contact fields prefilled into the payment widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentPrefill {
    /// Recipient full name.
    pub name: String,

    /// Email address.
    pub email: String,

    /// Phone number.
    pub contact: String,
}

/// Everything the hosted payment widget is invoked with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentRequest {
    /// Payable amount in minor currency units, tax included.
    pub amount_minor: i64,

    /// ISO alpha currency code.
    pub currency: &'static str,

    /// Merchant display name.
    pub merchant: &'static str,

    /// Order description.
    pub description: String,

    /// Prefilled contact fields.
    pub prefill: PaymentPrefill,

    /// Single-line shipping address note.
    pub address_note: String,
}

impl PaymentRequest {
    fn new(totals: &CheckoutTotals, contact: &ShippingContact) -> Self {
        PaymentRequest {
            amount_minor: totals.amount_minor(),
            currency: totals.total().currency().iso_alpha_code,
            merchant: MERCHANT_NAME,
            description: PURCHASE_DESCRIPTION.to_owned(),
            prefill: PaymentPrefill {
                name: contact.full_name(),
                email: contact.email.clone(),
                contact: contact.phone.clone(),
            },
            address_note: contact.address_note(),
        }
    }
}

/// How the payment widget concluded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentOutcome {
    /// The user paid; the gateway reports its payment id.
    Completed {
        /// Gateway-side payment identifier.
        payment_id: String,
    },

    /// The user dismissed the widget without paying.
    Dismissed,
}

/// The hosted payment widget, treated as an opaque collaborator.
pub trait PaymentGateway {
    /// Open the widget with a payment request and block until it
    /// concludes.
    ///
    /// # Errors
    ///
    /// Returns a [`GatewayError`] when the widget cannot be loaded.
    fn open(&mut self, request: &PaymentRequest) -> Result<PaymentOutcome, GatewayError>;
}

/// Result of a completed checkout attempt.
#[derive(Debug, Clone)]
pub enum CheckoutOutcome {
    /// Payment went through and an order was recorded.
    Confirmed(Order),

    /// The widget was dismissed; nothing was recorded or cleared.
    Dismissed,
}

impl CheckoutOutcome {
    /// The recorded order, when the payment completed.
    #[must_use]
    pub fn order(&self) -> Option<&Order> {
        match self {
            CheckoutOutcome::Confirmed(order) => Some(order),
            CheckoutOutcome::Dismissed => None,
        }
    }
}

/// A single-item purchase bypassing the session cart.
#[derive(Debug, Clone, Copy)]
pub struct BuyNowRequest<'a> {
    /// Product being bought.
    pub product: &'a Product,

    /// Chosen size; defaults to the product's first listed size.
    pub size: Option<&'a str>,

    /// Chosen colour; defaults to the product's first listed colour.
    pub color: Option<&'a str>,

    /// Quantity, at least 1.
    pub quantity: u32,
}

/// Check out the whole cart.
///
/// On a completed payment the order is recorded and the cart cleared;
/// on dismissal both are left untouched.
///
/// # Errors
///
/// - [`CheckoutError::MissingField`]: the shipping form is incomplete.
/// - [`CheckoutError::EmptyCart`]: there is nothing to check out.
/// - [`CheckoutError::Gateway`]: the payment widget failed to load.
/// - [`CheckoutError::Pricing`] / [`CheckoutError::Storage`]: totals or
///   persistence failed.
pub fn checkout_cart(
    cart: &mut Cart,
    orders: &mut OrderStore,
    contact: &ShippingContact,
    gateway: &mut dyn PaymentGateway,
) -> Result<CheckoutOutcome, CheckoutError> {
    contact.validate()?;

    if cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    let outcome = settle(cart, orders, contact, gateway)?;

    if matches!(outcome, CheckoutOutcome::Confirmed(_)) {
        cart.clear();
    }

    Ok(outcome)
}

/// Buy a single product variant immediately.
///
/// The line is synthesized through a scratch ledger so variant
/// validation and pricing match the cart flow exactly; the session cart
/// is never touched.
///
/// # Errors
///
/// As [`checkout_cart`], plus [`CheckoutError::Cart`] when the variant
/// is invalid or the quantity is 0.
pub fn buy_now(
    request: &BuyNowRequest<'_>,
    orders: &mut OrderStore,
    contact: &ShippingContact,
    gateway: &mut dyn PaymentGateway,
) -> Result<CheckoutOutcome, CheckoutError> {
    contact.validate()?;

    let mut scratch = Cart::new(request.product.price.currency());
    scratch.add_item(request.product, request.size, request.color, request.quantity)?;

    settle(&scratch, orders, contact, gateway)
}

/// Price the lines, open the gateway, and record an order on completion.
fn settle(
    cart: &Cart,
    orders: &mut OrderStore,
    contact: &ShippingContact,
    gateway: &mut dyn PaymentGateway,
) -> Result<CheckoutOutcome, CheckoutError> {
    let totals = CheckoutTotals::from_subtotal(cart.subtotal())?;
    let request = PaymentRequest::new(&totals, contact);

    match gateway.open(&request) {
        Ok(PaymentOutcome::Completed { payment_id }) => {
            let items: Vec<OrderLine> = cart.iter().map(OrderLine::from).collect();
            let order = Order::confirmed(
                Timestamp::now(),
                totals.amount_minor(),
                items,
                contact.shipping_address(),
            );

            info!(order = %order.order_number, payment = %payment_id, "payment completed");
            orders.record(order.clone())?;

            Ok(CheckoutOutcome::Confirmed(order))
        }
        Ok(PaymentOutcome::Dismissed) => {
            debug!("payment widget dismissed");
            Ok(CheckoutOutcome::Dismissed)
        }
        Err(err) => {
            warn!(error = %err, "payment widget failed to open");
            Err(err.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use rust_decimal::Decimal;
    use rusty_money::Money;
    use rusty_money::iso::INR;
    use smallvec::smallvec;
    use testresult::TestResult;

    use crate::products::ProductId;
    use crate::storage::MemoryStorage;

    use super::*;

    /// Scripted gateway capturing the request it was opened with.
    struct FakeGateway {
        script: Result<PaymentOutcome, GatewayError>,
        last_request: Option<PaymentRequest>,
    }

    impl FakeGateway {
        fn completing() -> Self {
            FakeGateway {
                script: Ok(PaymentOutcome::Completed {
                    payment_id: "pay_123".to_owned(),
                }),
                last_request: None,
            }
        }

        fn dismissing() -> Self {
            FakeGateway {
                script: Ok(PaymentOutcome::Dismissed),
                last_request: None,
            }
        }

        fn failing() -> Self {
            FakeGateway {
                script: Err(GatewayError::WidgetUnavailable("offline".to_owned())),
                last_request: None,
            }
        }
    }

    impl PaymentGateway for FakeGateway {
        fn open(&mut self, request: &PaymentRequest) -> Result<PaymentOutcome, GatewayError> {
            self.last_request = Some(request.clone());

            match &self.script {
                Ok(outcome) => Ok(outcome.clone()),
                Err(GatewayError::WidgetUnavailable(reason)) => {
                    Err(GatewayError::WidgetUnavailable(reason.clone()))
                }
            }
        }
    }

    fn product(id: &str, price_minor: i64) -> Product {
        Product {
            id: ProductId::from(id),
            name: format!("Product {id}"),
            brand: "EcoWear".to_owned(),
            category: "men".to_owned(),
            price: Money::from_minor(price_minor, INR),
            original_price: None,
            sizes: smallvec!["M".to_owned()],
            colors: smallvec!["Black".to_owned()],
            images: smallvec!["front.jpg".to_owned()],
            rating: Decimal::new(45, 1),
            reviews: 1,
            in_stock: true,
            featured: false,
        }
    }

    fn contact() -> ShippingContact {
        ShippingContact {
            first_name: "Jane".to_owned(),
            last_name: "Doe".to_owned(),
            email: "jane@example.com".to_owned(),
            phone: "9999999999".to_owned(),
            address: "1 High Street".to_owned(),
            city: "Mumbai".to_owned(),
            state: "MH".to_owned(),
            zip_code: "400001".to_owned(),
        }
    }

    #[test]
    fn missing_field_aborts_before_the_gateway() -> TestResult {
        let mut cart = Cart::new(INR);
        cart.add_item(&product("1", 100_000), None, None, 1)?;
        let mut orders = OrderStore::new(Rc::new(MemoryStorage::new()))?;
        let mut gateway = FakeGateway::completing();

        let incomplete = ShippingContact {
            city: String::new(),
            ..contact()
        };

        let err = checkout_cart(&mut cart, &mut orders, &incomplete, &mut gateway);

        assert!(matches!(err, Err(CheckoutError::MissingField("city"))));
        assert!(gateway.last_request.is_none());
        assert!(!cart.is_empty());

        Ok(())
    }

    #[test]
    fn empty_cart_cannot_be_checked_out() -> TestResult {
        let mut cart = Cart::new(INR);
        let mut orders = OrderStore::new(Rc::new(MemoryStorage::new()))?;
        let mut gateway = FakeGateway::completing();

        let err = checkout_cart(&mut cart, &mut orders, &contact(), &mut gateway);

        assert!(matches!(err, Err(CheckoutError::EmptyCart)));

        Ok(())
    }

    #[test]
    fn completed_payment_records_an_order_and_clears_the_cart() -> TestResult {
        let mut cart = Cart::new(INR);
        cart.add_item(&product("1", 100_000), None, None, 2)?;
        let mut orders = OrderStore::new(Rc::new(MemoryStorage::new()))?;
        let mut gateway = FakeGateway::completing();

        let outcome = checkout_cart(&mut cart, &mut orders, &contact(), &mut gateway)?;

        let order = outcome.order().ok_or("expected a confirmed order")?;
        assert_eq!(order.total_minor, 236_000);
        assert_eq!(order.items.len(), 1);
        assert_eq!(order.shipping.name, "Jane Doe");

        assert!(cart.is_empty());
        assert_eq!(orders.len(), 1);

        Ok(())
    }

    #[test]
    fn dismissal_keeps_the_cart_and_records_nothing() -> TestResult {
        let mut cart = Cart::new(INR);
        cart.add_item(&product("1", 100_000), None, None, 1)?;
        let mut orders = OrderStore::new(Rc::new(MemoryStorage::new()))?;
        let mut gateway = FakeGateway::dismissing();

        let outcome = checkout_cart(&mut cart, &mut orders, &contact(), &mut gateway)?;

        assert!(outcome.order().is_none());
        assert!(!cart.is_empty());
        assert!(orders.is_empty());

        Ok(())
    }

    #[test]
    fn widget_failure_aborts_with_everything_untouched() -> TestResult {
        let mut cart = Cart::new(INR);
        cart.add_item(&product("1", 100_000), None, None, 1)?;
        let mut orders = OrderStore::new(Rc::new(MemoryStorage::new()))?;
        let mut gateway = FakeGateway::failing();

        let err = checkout_cart(&mut cart, &mut orders, &contact(), &mut gateway);

        assert!(matches!(err, Err(CheckoutError::Gateway(_))));
        assert!(!cart.is_empty());
        assert!(orders.is_empty());

        Ok(())
    }

    #[test]
    fn gateway_receives_the_taxed_amount_in_minor_units() -> TestResult {
        let mut cart = Cart::new(INR);
        cart.add_item(&product("1", 100_000), None, None, 1)?;
        let mut orders = OrderStore::new(Rc::new(MemoryStorage::new()))?;
        let mut gateway = FakeGateway::completing();

        checkout_cart(&mut cart, &mut orders, &contact(), &mut gateway)?;

        let request = gateway.last_request.ok_or("gateway was not opened")?;
        assert_eq!(request.amount_minor, 118_000);
        assert_eq!(request.currency, "INR");
        assert_eq!(request.merchant, MERCHANT_NAME);
        assert_eq!(request.prefill.name, "Jane Doe");
        assert_eq!(request.address_note, "1 High Street, Mumbai, MH - 400001");

        Ok(())
    }

    #[test]
    fn buy_now_never_touches_the_session_cart() -> TestResult {
        let shirt = product("1", 100_000);
        let mut orders = OrderStore::new(Rc::new(MemoryStorage::new()))?;
        let mut gateway = FakeGateway::completing();

        let request = BuyNowRequest {
            product: &shirt,
            size: None,
            color: None,
            quantity: 3,
        };

        let outcome = buy_now(&request, &mut orders, &contact(), &mut gateway)?;

        let order = outcome.order().ok_or("expected a confirmed order")?;
        assert_eq!(order.total_minor, 354_000);
        assert_eq!(orders.len(), 1);

        Ok(())
    }

    #[test]
    fn buy_now_rejects_invalid_variants() -> TestResult {
        let shirt = product("1", 100_000);
        let mut orders = OrderStore::new(Rc::new(MemoryStorage::new()))?;
        let mut gateway = FakeGateway::completing();

        let request = BuyNowRequest {
            product: &shirt,
            size: Some("XXL"),
            color: None,
            quantity: 1,
        };

        let err = buy_now(&request, &mut orders, &contact(), &mut gateway);

        assert!(matches!(
            err,
            Err(CheckoutError::Cart(CartError::UnknownSize { .. }))
        ));
        assert!(orders.is_empty());

        Ok(())
    }

    #[test]
    fn both_flows_price_the_same_goods_identically() -> TestResult {
        let shirt = product("1", 249_900);
        let mut orders = OrderStore::new(Rc::new(MemoryStorage::new()))?;

        let mut cart_gateway = FakeGateway::completing();
        let mut cart = Cart::new(INR);
        cart.add_item(&shirt, None, None, 2)?;
        checkout_cart(&mut cart, &mut orders, &contact(), &mut cart_gateway)?;

        let mut buy_now_gateway = FakeGateway::completing();
        let request = BuyNowRequest {
            product: &shirt,
            size: None,
            color: None,
            quantity: 2,
        };
        buy_now(&request, &mut orders, &contact(), &mut buy_now_gateway)?;

        let cart_amount = cart_gateway
            .last_request
            .map(|request| request.amount_minor);
        let buy_now_amount = buy_now_gateway
            .last_request
            .map(|request| request.amount_minor);

        assert_eq!(cart_amount, buy_now_amount);

        Ok(())
    }
}

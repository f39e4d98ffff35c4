//! Cart Ledger
//!
//! The cart owns the ordered collection of line items for the active
//! session. Lines are keyed by product variant, so adding the same
//! (product, size, colour) twice merges by summing quantity rather than
//! creating a duplicate line.

use std::fmt;

use rusty_money::{Money, iso::Currency};
use thiserror::Error;
use tracing::{debug, warn};

use crate::products::{Product, ProductId};

/// Errors related to cart mutation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    /// An addition was requested with a quantity of zero.
    #[error("quantity must be at least 1")]
    ZeroQuantity,

    /// The requested size is not one the product declares.
    #[error("product {product} does not offer size {size:?}")]
    UnknownSize {
        /// Product that was being added
        product: ProductId,
        /// The rejected size label
        size: String,
    },

    /// The requested colour is not one the product declares.
    #[error("product {product} does not offer colour {color:?}")]
    UnknownColor {
        /// Product that was being added
        product: ProductId,
        /// The rejected colour label
        color: String,
    },

    /// No size or colour was supplied and the product declares none to
    /// default to.
    #[error("product {0} declares no variants to default to")]
    NoDeclaredVariants(ProductId),

    /// A product's currency differs from the cart currency.
    #[error("product {product} is priced in {item}, but the cart uses {cart}")]
    CurrencyMismatch {
        /// Product that was being added
        product: ProductId,
        /// ISO code of the product's currency
        item: &'static str,
        /// ISO code of the cart's currency
        cart: &'static str,
    },

    /// No line with the given key exists in the cart.
    #[error("no cart line with key {0}")]
    LineNotFound(LineKey),
}

/// Composite key identifying a cart line.
///
/// Deterministically derived from (product id, size, colour), joined with
/// a separator not expected inside ids or variant labels. The key is both
/// the merge key for additions and the lookup key for quantity updates
/// and removal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LineKey(String);

/// Separator between the key's components.
const KEY_SEPARATOR: &str = "::";

impl LineKey {
    /// Build the key for a (product, size, colour) variant.
    #[must_use]
    pub fn new(product: &ProductId, size: &str, color: &str) -> Self {
        LineKey(format!("{product}{KEY_SEPARATOR}{size}{KEY_SEPARATOR}{color}"))
    }

    /// The key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LineKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One (product, size, colour, quantity) entry in the cart.
#[derive(Debug, Clone)]
pub struct CartLine {
    key: LineKey,
    product: Product,
    size: String,
    color: String,
    quantity: u32,
}

impl CartLine {
    /// The line's composite key.
    pub fn key(&self) -> &LineKey {
        &self.key
    }

    /// Snapshot of the product the line was created from.
    pub fn product(&self) -> &Product {
        &self.product
    }

    /// The chosen size label.
    pub fn size(&self) -> &str {
        &self.size
    }

    /// The chosen colour label.
    pub fn color(&self) -> &str {
        &self.color
    }

    /// The line quantity; always at least 1 while the line exists.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Money<'static, Currency> {
        let minor = self.product.price.to_minor_units() * i64::from(self.quantity);

        Money::from_minor(minor, self.product.price.currency())
    }
}

/// Cart
#[derive(Debug)]
pub struct Cart {
    lines: Vec<CartLine>,
    currency: &'static Currency,
}

impl Cart {
    /// Create an empty cart for the given currency.
    #[must_use]
    pub fn new(currency: &'static Currency) -> Self {
        Cart {
            lines: Vec::new(),
            currency,
        }
    }

    /// Add a product variant to the cart.
    ///
    /// Unspecified size or colour defaults to the product's first listed
    /// value. If a line with the same (product, size, colour) key already
    /// exists, its quantity is incremented by `quantity`; otherwise a new
    /// line is appended at the end, preserving insertion order.
    ///
    /// # Errors
    ///
    /// - [`CartError::ZeroQuantity`] if `quantity` is 0.
    /// - [`CartError::UnknownSize`] / [`CartError::UnknownColor`] if the
    ///   variant is not one the product declares.
    /// - [`CartError::NoDeclaredVariants`] if a default was needed but the
    ///   product lists no sizes or colours.
    /// - [`CartError::CurrencyMismatch`] if the product is priced in a
    ///   different currency than the cart.
    pub fn add_item(
        &mut self,
        product: &Product,
        size: Option<&str>,
        color: Option<&str>,
        quantity: u32,
    ) -> Result<LineKey, CartError> {
        if quantity == 0 {
            return Err(CartError::ZeroQuantity);
        }

        let size = match size {
            Some(size) => size.to_owned(),
            None => product
                .sizes
                .first()
                .cloned()
                .ok_or_else(|| CartError::NoDeclaredVariants(product.id.clone()))?,
        };

        let color = match color {
            Some(color) => color.to_owned(),
            None => product
                .colors
                .first()
                .cloned()
                .ok_or_else(|| CartError::NoDeclaredVariants(product.id.clone()))?,
        };

        if !product.has_size(&size) {
            return Err(CartError::UnknownSize {
                product: product.id.clone(),
                size,
            });
        }

        if !product.has_color(&color) {
            return Err(CartError::UnknownColor {
                product: product.id.clone(),
                color,
            });
        }

        let item_currency = product.price.currency();

        if item_currency != self.currency {
            return Err(CartError::CurrencyMismatch {
                product: product.id.clone(),
                item: item_currency.iso_alpha_code,
                cart: self.currency.iso_alpha_code,
            });
        }

        let key = LineKey::new(&product.id, &size, &color);

        if let Some(line) = self.lines.iter_mut().find(|line| line.key == key) {
            line.quantity += quantity;
            debug!(line = %key, quantity = line.quantity, "merged into existing cart line");
        } else {
            self.lines.push(CartLine {
                key: key.clone(),
                product: product.clone(),
                size,
                color,
                quantity,
            });
            debug!(line = %key, quantity, "appended new cart line");
        }

        Ok(key)
    }

    /// Set a line's quantity; a quantity of 0 removes the line entirely.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::LineNotFound`] if no line has the given key.
    pub fn update_quantity(&mut self, key: &LineKey, quantity: u32) -> Result<(), CartError> {
        if quantity == 0 {
            let before = self.lines.len();
            self.lines.retain(|line| &line.key != key);

            if self.lines.len() == before {
                return Err(CartError::LineNotFound(key.clone()));
            }

            debug!(line = %key, "removed cart line via zero quantity");
            return Ok(());
        }

        match self.lines.iter_mut().find(|line| &line.key == key) {
            Some(line) => {
                line.quantity = quantity;
                debug!(line = %key, quantity, "updated cart line quantity");
                Ok(())
            }
            None => Err(CartError::LineNotFound(key.clone())),
        }
    }

    /// Delete the line with the given key; no-op when absent.
    pub fn remove_item(&mut self, key: &LineKey) {
        let before = self.lines.len();
        self.lines.retain(|line| &line.key != key);

        if self.lines.len() == before {
            warn!(line = %key, "remove_item ignored; no such line");
        } else {
            debug!(line = %key, "removed cart line");
        }
    }

    /// Empty the cart; used after a confirmed checkout.
    pub fn clear(&mut self) {
        debug!(lines = self.lines.len(), "cleared cart");
        self.lines.clear();
    }

    /// Sum of quantities over all lines (the badge value).
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(CartLine::quantity).sum()
    }

    /// Sum of `price * quantity` over all lines.
    ///
    /// All lines share the cart currency (enforced on add), so the sum is
    /// computed in minor units and cannot mismatch.
    #[must_use]
    pub fn subtotal(&self) -> Money<'static, Currency> {
        let minor: i64 = self
            .lines
            .iter()
            .map(|line| line.line_total().to_minor_units())
            .sum();

        Money::from_minor(minor, self.currency)
    }

    /// Get a line by its key.
    #[must_use]
    pub fn get_line(&self, key: &LineKey) -> Option<&CartLine> {
        self.lines.iter().find(|line| &line.key == key)
    }

    /// Iterate over the lines in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &CartLine> {
        self.lines.iter()
    }

    /// Number of distinct lines (not the quantity sum).
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Get the currency of the cart.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }
}

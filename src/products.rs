//! Products

use std::fmt;

use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Stable catalog identifier for a product.
///
/// Wishlist entries and order line snapshots persist these, so they must
/// survive across sessions unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Create a product id from any string-like value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        ProductId(id.into())
    }

    /// The id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        ProductId(id.to_owned())
    }
}

/// Product
#[derive(Debug, Clone)]
pub struct Product {
    /// Catalog identifier
    pub id: ProductId,

    /// Product name
    pub name: String,

    /// Brand name
    pub brand: String,

    /// Top-level category (`"men"`, `"women"`, ...)
    pub category: String,

    /// Current price
    pub price: Money<'static, Currency>,

    /// Pre-discount price, when the product is on offer
    pub original_price: Option<Money<'static, Currency>>,

    /// Size labels offered for this product, in display order
    pub sizes: SmallVec<[String; 6]>,

    /// Colour labels offered for this product, in display order
    pub colors: SmallVec<[String; 6]>,

    /// Image references
    pub images: SmallVec<[String; 2]>,

    /// Average review rating
    pub rating: Decimal,

    /// Number of reviews behind the rating
    pub reviews: u32,

    /// Whether the product is in stock
    pub in_stock: bool,

    /// Whether the product is featured on the home view
    pub featured: bool,
}

impl Product {
    /// Whether the given size label is one the product declares.
    #[must_use]
    pub fn has_size(&self, size: &str) -> bool {
        self.sizes.iter().any(|s| s == size)
    }

    /// Whether the given colour label is one the product declares.
    #[must_use]
    pub fn has_color(&self, color: &str) -> bool {
        self.colors.iter().any(|c| c == color)
    }

    /// First listed image, used for line snapshots.
    #[must_use]
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}

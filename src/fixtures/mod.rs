//! Fixtures
//!
//! The demo catalog, defined in YAML and parsed into [`Product`]s.
//! Prices are written as `"AMOUNT CURRENCY"` strings in major units.

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::{
    Money,
    iso::{Currency, GBP, INR, USD},
};
use serde::Deserialize;
use smallvec::SmallVec;
use thiserror::Error;

use crate::catalog::Catalog;
use crate::products::{Product, ProductId};

/// Embedded demo catalog document.
const DEFAULT_CATALOG: &str = include_str!("catalog.yaml");

/// Fixture parsing errors.
#[derive(Debug, Error)]
pub enum FixtureError {
    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),
}

/// Wrapper for products in YAML, in catalog order.
#[derive(Debug, Deserialize)]
pub struct CatalogFixture {
    /// Ordered product fixtures
    pub products: Vec<ProductFixture>,
}

/// Product Fixture
#[derive(Debug, Deserialize)]
pub struct ProductFixture {
    /// Stable catalog id
    pub id: String,

    /// Product name
    pub name: String,

    /// Brand name
    pub brand: String,

    /// Category label
    pub category: String,

    /// Product price (e.g., "2499 INR")
    pub price: String,

    /// Pre-discount price, when on offer
    #[serde(default)]
    pub original_price: Option<String>,

    /// Size labels
    pub sizes: Vec<String>,

    /// Colour labels
    pub colors: Vec<String>,

    /// Image references
    #[serde(default)]
    pub images: Vec<String>,

    /// Average rating
    pub rating: Decimal,

    /// Review count
    pub reviews: u32,

    /// In-stock flag
    pub in_stock: bool,

    /// Featured flag
    pub featured: bool,
}

impl TryFrom<ProductFixture> for Product {
    type Error = FixtureError;

    fn try_from(fixture: ProductFixture) -> Result<Self, Self::Error> {
        let (minor_units, currency) = parse_price(&fixture.price)?;
        let price = Money::from_minor(minor_units, currency);

        let original_price = fixture
            .original_price
            .as_deref()
            .map(parse_price)
            .transpose()?
            .map(|(minor, currency)| Money::from_minor(minor, currency));

        Ok(Product {
            id: ProductId::new(fixture.id),
            name: fixture.name,
            brand: fixture.brand,
            category: fixture.category,
            price,
            original_price,
            sizes: SmallVec::from_vec(fixture.sizes),
            colors: SmallVec::from_vec(fixture.colors),
            images: SmallVec::from_vec(fixture.images),
            rating: fixture.rating,
            reviews: fixture.reviews,
            in_stock: fixture.in_stock,
            featured: fixture.featured,
        })
    }
}

/// Parse a price string (e.g., "2499 INR") into minor units and currency.
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY",
/// if the amount cannot be parsed as a decimal, or if the currency code
/// is not recognized.
pub fn parse_price(s: &str) -> Result<(i64, &'static Currency), FixtureError> {
    let parts: Vec<&str> = s.split_whitespace().collect();

    if parts.len() != 2 {
        return Err(FixtureError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    }

    let amount = parts
        .first()
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidPrice(s.to_string()))?;

    let minor_units = amount
        .checked_mul(Decimal::new(100, 0))
        .and_then(|value| value.round_dp(0).to_i64())
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?;

    let currency_code = parts
        .get(1)
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?;

    let currency = match *currency_code {
        "INR" => INR,
        "USD" => USD,
        "GBP" => GBP,
        other => return Err(FixtureError::UnknownCurrency(other.to_string())),
    };

    Ok((minor_units, currency))
}

/// Build a catalog from a YAML document.
///
/// # Errors
///
/// Returns a [`FixtureError`] if the document cannot be parsed or a
/// product's prices are invalid.
pub fn catalog_from_str(yaml: &str) -> Result<Catalog, FixtureError> {
    let fixture: CatalogFixture = serde_norway::from_str(yaml)?;

    let products = fixture
        .products
        .into_iter()
        .map(Product::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Catalog::new(products))
}

/// The embedded demo catalog.
///
/// # Errors
///
/// Returns a [`FixtureError`] if the embedded document is invalid.
pub fn default_catalog() -> Result<Catalog, FixtureError> {
    catalog_from_str(DEFAULT_CATALOG)
}

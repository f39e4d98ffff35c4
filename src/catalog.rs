//! Catalog
//!
//! The catalog owns the ordered product list for the storefront and the
//! filter/sort pipeline over it. Searching is a pure function of the
//! catalog and a [`ProductQuery`]; ties are broken by catalog order.

use std::cmp::Reverse;

use rust_decimal::Decimal;
use rustc_hash::FxHashSet;
use rusty_money::{Money, iso::Currency};

use crate::products::{Product, ProductId};

/// Sort order for catalog search results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Featured products first, catalog order otherwise.
    #[default]
    Featured,

    /// Price ascending.
    PriceLowToHigh,

    /// Price descending.
    PriceHighToLow,

    /// Rating descending.
    RatingHighToLow,

    /// Newest first, by id descending.
    Newest,
}

/// Filter and sort criteria for a catalog search.
#[derive(Debug, Clone, Default)]
pub struct ProductQuery {
    /// Keep only products in this category; `None` means all categories.
    pub category: Option<String>,

    /// Case-insensitive substring match over name, brand and category.
    pub text: Option<String>,

    /// Keep only products priced at or below this ceiling.
    pub max_price: Option<Money<'static, Currency>>,

    /// Keep only these brands; empty means all brands.
    pub brands: Vec<String>,

    /// Keep only products rated at or above this value.
    pub min_rating: Option<Decimal>,

    /// Keep only featured products (the home view).
    pub featured_only: bool,

    /// Result ordering.
    pub sort: SortKey,
}

impl ProductQuery {
    /// Whether a product passes every filter in the query.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(category) = &self.category
            && product.category != *category
        {
            return false;
        }

        if let Some(text) = &self.text {
            let needle = text.to_lowercase();
            let hit = product.name.to_lowercase().contains(&needle)
                || product.brand.to_lowercase().contains(&needle)
                || product.category.to_lowercase().contains(&needle);

            if !hit {
                return false;
            }
        }

        if let Some(ceiling) = &self.max_price
            && product.price.to_minor_units() > ceiling.to_minor_units()
        {
            return false;
        }

        if !self.brands.is_empty() && !self.brands.iter().any(|brand| *brand == product.brand) {
            return false;
        }

        if let Some(min_rating) = self.min_rating
            && product.rating < min_rating
        {
            return false;
        }

        if self.featured_only && !product.featured {
            return false;
        }

        true
    }
}

/// Catalog
#[derive(Debug)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Create a catalog from an ordered product list.
    #[must_use]
    pub fn new(products: Vec<Product>) -> Self {
        Catalog { products }
    }

    /// Look up a product by id.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|product| product.id == *id)
    }

    /// All products in catalog order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Distinct brand names, in order of first appearance.
    #[must_use]
    pub fn brands(&self) -> Vec<&str> {
        let mut seen = FxHashSet::default();

        self.products
            .iter()
            .map(|product| product.brand.as_str())
            .filter(|brand| seen.insert(*brand))
            .collect()
    }

    /// Filter and sort the catalog against a query.
    ///
    /// The sort is stable, so products equal under the sort key keep
    /// their relative catalog order.
    #[must_use]
    pub fn search(&self, query: &ProductQuery) -> Vec<&Product> {
        let mut results: Vec<&Product> = self
            .products
            .iter()
            .filter(|product| query.matches(product))
            .collect();

        match query.sort {
            SortKey::Featured => results.sort_by_key(|product| !product.featured),
            SortKey::PriceLowToHigh => {
                results.sort_by_key(|product| product.price.to_minor_units());
            }
            SortKey::PriceHighToLow => {
                results.sort_by_key(|product| Reverse(product.price.to_minor_units()));
            }
            SortKey::RatingHighToLow => results.sort_by_key(|product| Reverse(product.rating)),
            SortKey::Newest => results.sort_by(|a, b| b.id.as_str().cmp(a.id.as_str())),
        }

        results
    }

    /// Number of products in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

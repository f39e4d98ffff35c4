//! Pricing
//!
//! One tax convention for every checkout surface: subtotal in the display
//! currency, a flat 18% GST on top, no further multipliers. Both the
//! full-cart flow and the buy-now flow price through [`CheckoutTotals`],
//! so they cannot drift apart.

use decimal_percentage::Percentage;
use rust_decimal::{
    Decimal, RoundingStrategy,
    prelude::{FromPrimitive, ToPrimitive},
};
use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

/// Errors that can occur while computing checkout totals.
#[derive(Debug, Error, PartialEq)]
pub enum PricingError {
    /// The tax calculation overflowed or could not be safely represented.
    #[error("tax conversion overflowed or was not finite")]
    TaxConversion,

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Goods-and-services tax applied at checkout.
#[must_use]
pub fn gst_rate() -> Percentage {
    Percentage::from(0.18)
}

/// Subtotal, tax and payable total for one checkout attempt.
#[derive(Debug, Clone, Copy)]
pub struct CheckoutTotals {
    subtotal: Money<'static, Currency>,
    tax: Money<'static, Currency>,
    total: Money<'static, Currency>,
}

impl CheckoutTotals {
    /// Price a subtotal by applying GST on top.
    ///
    /// # Errors
    ///
    /// - [`PricingError::TaxConversion`]: the tax amount could not be
    ///   represented in minor units.
    /// - [`PricingError::Money`]: money arithmetic failed.
    pub fn from_subtotal(subtotal: Money<'static, Currency>) -> Result<Self, PricingError> {
        let tax_minor = percent_of_minor(&gst_rate(), subtotal.to_minor_units())?;
        let tax = Money::from_minor(tax_minor, subtotal.currency());
        let total = subtotal.add(tax)?;

        Ok(CheckoutTotals {
            subtotal,
            tax,
            total,
        })
    }

    /// Total cost of the goods before tax.
    #[must_use]
    pub fn subtotal(&self) -> Money<'static, Currency> {
        self.subtotal
    }

    /// GST amount applied on the subtotal.
    #[must_use]
    pub fn tax(&self) -> Money<'static, Currency> {
        self.tax
    }

    /// Payable amount: subtotal plus tax.
    #[must_use]
    pub fn total(&self) -> Money<'static, Currency> {
        self.total
    }

    /// Payable amount in minor currency units, as the payment gateway
    /// expects it.
    #[must_use]
    pub fn amount_minor(&self) -> i64 {
        self.total.to_minor_units()
    }
}

/// Calculate a percentage of a minor-unit amount, rounding half away
/// from zero.
fn percent_of_minor(percent: &Percentage, minor: i64) -> Result<i64, PricingError> {
    let minor = Decimal::from_i64(minor).ok_or(PricingError::TaxConversion)?;

    ((*percent) * Decimal::ONE)
        .checked_mul(minor)
        .ok_or(PricingError::TaxConversion)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or(PricingError::TaxConversion)
}

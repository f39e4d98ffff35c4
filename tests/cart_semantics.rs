//! Integration tests for the cart ledger over the demo catalog.
//!
//! Exercises the merge-by-variant invariant and the derived aggregates
//! with real catalog products: the t-shirt (₹2499) and the silk blouse
//! (₹6599).

use anyhow::Context;
use rusty_money::Money;
use rusty_money::iso::INR;
use testresult::TestResult;

use stylehub::cart::Cart;
use stylehub::fixtures::default_catalog;
use stylehub::products::ProductId;

#[test]
fn merge_and_totals_over_demo_products() -> TestResult {
    let catalog = default_catalog()?;
    let shirt = catalog
        .get(&ProductId::from("1"))
        .context("t-shirt missing from demo catalog")?;
    let blouse = catalog
        .get(&ProductId::from("2"))
        .context("blouse missing from demo catalog")?;

    let mut cart = Cart::new(INR);

    // Same variant twice: one line, quantities summed.
    cart.add_item(shirt, Some("M"), Some("Black"), 1)?;
    cart.add_item(shirt, Some("M"), Some("Black"), 1)?;
    cart.add_item(blouse, Some("S"), Some("Ivory"), 1)?;

    assert_eq!(cart.len(), 2);

    // 2499 * 2 + 6599 * 1 = 11597 rupees.
    assert_eq!(cart.subtotal(), Money::from_minor(1_159_700, INR));
    assert_eq!(cart.item_count(), 3);

    Ok(())
}

#[test]
fn variants_of_one_product_stay_distinct_lines() -> TestResult {
    let catalog = default_catalog()?;
    let shirt = catalog
        .get(&ProductId::from("1"))
        .context("t-shirt missing from demo catalog")?;

    let mut cart = Cart::new(INR);

    let black = cart.add_item(shirt, Some("M"), Some("Black"), 1)?;
    let white = cart.add_item(shirt, Some("M"), Some("White"), 1)?;
    let large = cart.add_item(shirt, Some("L"), Some("Black"), 1)?;

    assert_ne!(black, white);
    assert_ne!(black, large);
    assert_eq!(cart.len(), 3);
    assert_eq!(cart.item_count(), 3);

    Ok(())
}

#[test]
fn driving_a_quantity_to_zero_destroys_the_line() -> TestResult {
    let catalog = default_catalog()?;
    let shirt = catalog
        .get(&ProductId::from("1"))
        .context("t-shirt missing from demo catalog")?;
    let blouse = catalog
        .get(&ProductId::from("2"))
        .context("blouse missing from demo catalog")?;

    let mut cart = Cart::new(INR);
    let shirt_key = cart.add_item(shirt, Some("M"), Some("Black"), 2)?;
    cart.add_item(blouse, Some("S"), Some("Ivory"), 1)?;

    cart.update_quantity(&shirt_key, 0)?;

    assert_eq!(cart.len(), 1);
    assert_eq!(cart.item_count(), 1);
    assert_eq!(cart.subtotal(), Money::from_minor(659_900, INR));
    assert!(cart.get_line(&shirt_key).is_none());

    Ok(())
}

#[test]
fn clear_resets_every_aggregate() -> TestResult {
    let catalog = default_catalog()?;
    let shirt = catalog
        .get(&ProductId::from("1"))
        .context("t-shirt missing from demo catalog")?;

    let mut cart = Cart::new(INR);
    cart.add_item(shirt, None, None, 4)?;

    cart.clear();

    assert!(cart.is_empty());
    assert_eq!(cart.item_count(), 0);
    assert_eq!(cart.subtotal(), Money::from_minor(0, INR));

    Ok(())
}

//! StyleHub
//!
//! StyleHub is the client-side core of a fashion storefront: a product
//! catalog with a filter/sort pipeline, a cart ledger with
//! merge-by-variant semantics, wishlist and notification stores, mock
//! authentication, and two checkout flows that hand a computed payable
//! amount to a hosted payment gateway. All state lives in memory and is
//! mirrored into a pluggable key-value store standing in for browser
//! local storage.

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod context;
pub mod events;
pub mod fixtures;
pub mod notifications;
pub mod orders;
pub mod prelude;
pub mod pricing;
pub mod products;
pub mod storage;
pub mod wishlist;

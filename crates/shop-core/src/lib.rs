//! Core types and logic for the Provizyon storefront.
//!
//! This crate provides the shared pieces every other crate builds on:
//!
//! - [`Product`] / [`CartItem`] / [`Message`] - Domain types
//! - [`Cart`] - Quantity-merging cart aggregator
//! - [`Catalog`] / [`CatalogSource`] - Product catalog and its loader
//! - [`IntentResolver`] - Trait for natural-language intent resolution
//! - [`AiResponse`] / [`Intent`] - The structured result of a resolution
//! - [`ConversationLog`] - Append-only chat history
//!
//! # Example
//!
//! ```rust
//! use shop_core::{demo_catalog, Cart, Catalog};
//!
//! let catalog = Catalog::new(demo_catalog());
//! let mut cart = Cart::new();
//!
//! let rice = catalog.find_by_code("RIZ-001").unwrap().clone();
//! cart.add(rice, 2);
//! assert_eq!(cart.total(), 7000);
//! ```

mod cart;
mod catalog;
mod conversation;
mod error;
mod trait_def;
mod types;

pub use cart::Cart;
pub use catalog::{demo_catalog, Catalog, CatalogSource, StaticCatalog};
pub use conversation::ConversationLog;
pub use error::{CatalogError, ResolveError};
pub use trait_def::IntentResolver;
pub use types::{
    AiResponse, CartItem, Intent, Message, Product, RequestedItem, Role, SPECIAL_REQUEST_CATEGORY,
    SPECIAL_REQUEST_CODE,
};

// Re-export async_trait for convenience
pub use async_trait::async_trait;

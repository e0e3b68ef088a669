//! Error types for storefront operations.

use shop_core::CatalogError;
use thiserror::Error;

/// Errors that can occur while driving the storefront.
#[derive(Debug, Error)]
pub enum StorefrontError {
    /// A resolve call is already outstanding; re-submission is blocked
    /// until it completes or fails.
    #[error("a request is already being processed")]
    Busy,

    /// Input was intentionally skipped (e.g., blank message).
    #[error("input skipped: {0}")]
    Skipped(String),

    /// The catalog could not be loaded. The caller owns the retry.
    #[error("catalog load failed: {0}")]
    CatalogLoad(#[from] CatalogError),

    /// Checkout was requested on an empty cart.
    #[error("cannot check out an empty cart")]
    EmptyCart,

    /// Confirm was called with no checkout pending.
    #[error("no order is pending confirmation")]
    NoPendingOrder,

    /// The order hand-off failed.
    #[error("order send failed: {0}")]
    SendFailed(String),
}

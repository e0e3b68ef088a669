//! Error types for resolution and catalog loading.

use thiserror::Error;

/// Errors that can occur while resolving a user message into an intent.
///
/// Callers treat every variant the same way: fall back to local substring
/// search. The variants exist for logging, not for branching.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The resolver is misconfigured (missing key, bad URL, ...).
    #[error("resolver configuration error: {0}")]
    Configuration(String),

    /// The request to the language-understanding service failed.
    #[error("network error: {0}")]
    Network(String),

    /// The service answered, but the body was empty, malformed, or violated
    /// the response schema.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// The call did not complete within the bounded wait.
    #[error("resolution timed out")]
    Timeout,
}

/// Errors that can occur while loading the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The source resolved but yielded no products.
    #[error("catalog source returned no products")]
    Empty,

    /// The fetch itself failed.
    #[error("catalog fetch failed: {0}")]
    Fetch(String),
}

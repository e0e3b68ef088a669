//! The intent-resolution capability trait.

use async_trait::async_trait;

use crate::catalog::Catalog;
use crate::error::ResolveError;
use crate::types::AiResponse;

/// Resolves free user text into a structured [`AiResponse`].
///
/// Implementations send the text plus catalog context to a
/// language-understanding service. Any failure (network, malformed body,
/// schema violation) is reported as a [`ResolveError`], and the caller's
/// only recourse is the local search fallback; no retries are attempted
/// here.
#[async_trait]
pub trait IntentResolver: Send + Sync {
    /// Resolve one user message against the current catalog.
    async fn resolve(&self, text: &str, catalog: &Catalog) -> Result<AiResponse, ResolveError>;

    /// Human-readable name, used in logs.
    fn name(&self) -> &str;
}

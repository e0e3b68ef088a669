//! Failing resolver implementation - always reports a resolution failure.

use async_trait::async_trait;
use shop_core::{AiResponse, Catalog, IntentResolver, ResolveError};

/// A resolver that fails every call, for exercising the local search
/// fallback without network access.
#[derive(Debug, Clone, Default)]
pub struct FailingResolver;

impl FailingResolver {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl IntentResolver for FailingResolver {
    async fn resolve(&self, _text: &str, _catalog: &Catalog) -> Result<AiResponse, ResolveError> {
        Err(ResolveError::Network("resolver offline".to_string()))
    }

    fn name(&self) -> &str {
        "FailingResolver"
    }
}

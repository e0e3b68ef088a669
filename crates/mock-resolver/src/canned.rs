//! Canned resolver implementation - always returns a fixed response.

use async_trait::async_trait;
use shop_core::{AiResponse, Catalog, Intent, IntentResolver, RequestedItem, ResolveError};

/// A resolver that returns the same [`AiResponse`] for every call.
///
/// Useful for driving the storefront's success path without network access.
#[derive(Debug, Clone)]
pub struct CannedResolver {
    response: AiResponse,
}

impl CannedResolver {
    /// Create a resolver that always returns `response`.
    pub fn new(response: AiResponse) -> Self {
        Self { response }
    }

    /// A resolver that reports an `ADD_TO_CART` intent for one item.
    pub fn add_to_cart(
        product_code: impl Into<String>,
        quantity: u32,
        message: impl Into<String>,
    ) -> Self {
        Self::new(AiResponse {
            intent: Intent::AddToCart,
            items: vec![RequestedItem {
                product_code: product_code.into(),
                quantity: Some(quantity),
            }],
            message: Some(message.into()),
        })
    }

    /// A resolver that reports a `SPECIAL_REQUEST` intent for one item.
    pub fn special_request(requested_name: impl Into<String>, quantity: u32) -> Self {
        Self::new(AiResponse {
            intent: Intent::SpecialRequest,
            items: vec![RequestedItem {
                product_code: requested_name.into(),
                quantity: Some(quantity),
            }],
            message: Some("Je l'ajoute en commande spéciale.".to_string()),
        })
    }

    /// A resolver that reports a `GREETING` intent with no items.
    pub fn greeting(message: impl Into<String>) -> Self {
        Self::new(AiResponse {
            intent: Intent::Greeting,
            items: Vec::new(),
            message: Some(message.into()),
        })
    }
}

#[async_trait]
impl IntentResolver for CannedResolver {
    async fn resolve(&self, _text: &str, _catalog: &Catalog) -> Result<AiResponse, ResolveError> {
        Ok(self.response.clone())
    }

    fn name(&self) -> &str {
        "CannedResolver"
    }
}

//! Domain types shared across the storefront.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Product code used for all synthesized special-request products.
pub const SPECIAL_REQUEST_CODE: &str = "SPEC";

/// Category assigned to all synthesized special-request products.
pub const SPECIAL_REQUEST_CATEGORY: &str = "Sur Commande";

/// A purchasable product.
///
/// Immutable once loaded from the catalog source. Prices are whole HTG
/// units; a price of `0` means "quote on request" (Sur Devis).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Stable, process-unique identity.
    pub id: String,
    /// Human-facing SKU, used for matching.
    pub code: String,
    /// Product name.
    pub description: String,
    /// Price in whole HTG. `0` means "quote on request".
    pub price: u64,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Details (weight, brand, usage).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl Product {
    /// Synthesize a special-request product for an item not in the catalog.
    ///
    /// The caller supplies a deterministic id (the storefront uses a
    /// monotonic counter). The product is zero-priced pending manual
    /// quotation.
    pub fn special_request(id: impl Into<String>, requested_name: &str) -> Self {
        Self {
            id: id.into(),
            code: SPECIAL_REQUEST_CODE.to_string(),
            description: format!("Commande Spéciale: {}", requested_name),
            price: 0,
            category: SPECIAL_REQUEST_CATEGORY.to_string(),
            image_url: None,
            summary: None,
        }
    }
}

/// A product in the cart with its accumulated quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub product: Product,
    /// Always >= 1 while the item is in the cart.
    pub quantity: u32,
}

impl CartItem {
    /// Line subtotal: price times quantity.
    pub fn subtotal(&self) -> u64 {
        self.product.price * u64::from(self.quantity)
    }
}

/// Role of a conversation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
}

/// A single turn in the conversation log.
///
/// Append-only; never mutated after creation. `related_products` is a
/// snapshot copy, so later catalog or cart changes never retroactively
/// alter chat history. The timestamp is informational only and is not
/// used for ordering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_products: Option<Vec<Product>>,
}

impl Message {
    /// Create a user message.
    pub fn user(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            role: Role::User,
            content: content.into(),
            timestamp: Utc::now(),
            related_products: None,
        }
    }

    /// Create an assistant message, optionally carrying product snapshots.
    pub fn assistant(
        id: impl Into<String>,
        content: impl Into<String>,
        related_products: Option<Vec<Product>>,
    ) -> Self {
        Self {
            id: id.into(),
            role: Role::Assistant,
            content: content.into(),
            timestamp: Utc::now(),
            related_products,
        }
    }
}

/// Classified purpose of a user utterance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Intent {
    AddToCart,
    Search,
    Greeting,
    SpecialRequest,
    Unknown,
}

/// One item requested by the user, as reported by the resolution service.
///
/// For `SPECIAL_REQUEST` intents, `product_code` carries free text naming
/// an unavailable product rather than a catalog code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestedItem {
    pub product_code: String,
    /// Quantity requested; the service may omit it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
}

impl RequestedItem {
    /// Effective quantity, floored at 1.
    ///
    /// The service is not trusted to supply a sane quantity; a missing or
    /// zero value must never produce a zero-quantity cart insertion.
    pub fn effective_quantity(&self) -> u32 {
        self.quantity.unwrap_or(1).max(1)
    }
}

/// Structured result of resolving a user message.
///
/// Transient value object: consumed once per user turn, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiResponse {
    pub intent: Intent,
    #[serde(default)]
    pub items: Vec<RequestedItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl AiResponse {
    /// The reply to show the user, falling back when the service sent
    /// nothing usable.
    pub fn reply_text(&self) -> &str {
        match self.message.as_deref() {
            Some(text) if !text.trim().is_empty() => text,
            _ => "Compris.",
        }
    }
}

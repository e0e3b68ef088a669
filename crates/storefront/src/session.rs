//! Persistence glue between the storefront and the session store.
//!
//! Writes happen after every mutation and must never fail the caller:
//! persistence errors are logged and swallowed. Reads degrade to empty
//! state on missing keys and on corrupt blobs.

use session_store::{blob, Database};
use shop_core::{Cart, CartItem, ConversationLog, Message};
use tracing::warn;

/// Blob key for the cart snapshot.
pub const CART_KEY: &str = "proviz_cart";

/// Blob key for the conversation log.
pub const CHAT_KEY: &str = "proviz_chat";

/// Persist the full cart snapshot. Errors are logged, never propagated.
pub async fn persist_cart(db: &Database, cart: &Cart) {
    match serde_json::to_string(&cart.snapshot()) {
        Ok(json) => {
            if let Err(e) = blob::save_blob(db.pool(), CART_KEY, &json).await {
                warn!("Failed to persist cart: {}", e);
            }
        }
        Err(e) => warn!("Failed to serialize cart: {}", e),
    }
}

/// Persist the full conversation log. Errors are logged, never propagated.
pub async fn persist_conversation(db: &Database, log: &ConversationLog) {
    match serde_json::to_string(log.messages()) {
        Ok(json) => {
            if let Err(e) = blob::save_blob(db.pool(), CHAT_KEY, &json).await {
                warn!("Failed to persist conversation: {}", e);
            }
        }
        Err(e) => warn!("Failed to serialize conversation: {}", e),
    }
}

/// Load the persisted cart. Missing key or corrupt content reads as empty.
pub async fn load_cart(db: &Database) -> Cart {
    match blob::load_blob(db.pool(), CART_KEY).await {
        Ok(Some(json)) => match serde_json::from_str::<Vec<CartItem>>(&json) {
            Ok(items) => Cart::from_snapshot(items),
            Err(e) => {
                warn!("Corrupt cart snapshot, starting empty: {}", e);
                Cart::new()
            }
        },
        Ok(None) => Cart::new(),
        Err(e) => {
            warn!("Failed to load cart, starting empty: {}", e);
            Cart::new()
        }
    }
}

/// Load the persisted conversation log. Missing key or corrupt content
/// reads as empty.
pub async fn load_conversation(db: &Database) -> ConversationLog {
    match blob::load_blob(db.pool(), CHAT_KEY).await {
        Ok(Some(json)) => match serde_json::from_str::<Vec<Message>>(&json) {
            Ok(messages) => ConversationLog::from_snapshot(messages),
            Err(e) => {
                warn!("Corrupt conversation snapshot, starting empty: {}", e);
                ConversationLog::new()
            }
        },
        Ok(None) => ConversationLog::new(),
        Err(e) => {
            warn!("Failed to load conversation, starting empty: {}", e);
            ConversationLog::new()
        }
    }
}

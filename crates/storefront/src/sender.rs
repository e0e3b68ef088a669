//! Order sender trait and implementations.

use async_trait::async_trait;

use crate::error::StorefrontError;

/// Trait for handing a formatted order off to an external channel.
///
/// Abstracted to support different transports (WhatsApp deep link, tests).
/// The hand-off is fire-and-forget: no delivery confirmation is awaited,
/// and the system never learns whether the order was received.
#[async_trait]
pub trait OrderSender: Send + Sync {
    /// Hand off a formatted order message.
    async fn send_order(&self, order_text: &str) -> Result<(), StorefrontError>;
}

/// A no-op order sender for testing that discards all orders.
#[derive(Debug, Clone, Default)]
pub struct NoOpSender;

#[async_trait]
impl OrderSender for NoOpSender {
    async fn send_order(&self, _order_text: &str) -> Result<(), StorefrontError> {
        Ok(())
    }
}

/// Hands orders off as a WhatsApp `wa.me` deep link.
///
/// Building the link is the whole delivery mechanism: the URL is emitted
/// for the surrounding UI (or operator) to open, and delivery confirmation
/// stays with the human on the other end.
#[derive(Debug, Clone)]
pub struct WhatsAppSender {
    phone_number: String,
}

impl WhatsAppSender {
    /// Create a sender targeting the given phone number (digits only, with
    /// country code, no leading `+`).
    pub fn new(phone_number: impl Into<String>) -> Self {
        Self {
            phone_number: phone_number.into(),
        }
    }

    /// The deep link that opens WhatsApp with the order text prefilled.
    pub fn order_url(&self, order_text: &str) -> String {
        format!(
            "https://wa.me/{}?text={}",
            self.phone_number,
            urlencoding::encode(order_text)
        )
    }
}

#[async_trait]
impl OrderSender for WhatsAppSender {
    async fn send_order(&self, order_text: &str) -> Result<(), StorefrontError> {
        let url = self.order_url(order_text);
        tracing::info!("Order ready for WhatsApp hand-off: {}", url);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_noop_sender() {
        let sender = NoOpSender;
        sender.send_order("test").await.unwrap();
    }

    #[test]
    fn test_whatsapp_order_url_encoding() {
        let sender = WhatsAppSender::new("50936620118");
        let url = sender.order_url("2x Sac Riz & Huile\nTOTAL: 8200 HTG");

        assert!(url.starts_with("https://wa.me/50936620118?text="));
        // Spaces, ampersands, and newlines are percent-encoded
        assert!(url.contains("%20"));
        assert!(url.contains("%26"));
        assert!(url.contains("%0A"));
        assert!(!url.contains(' '));
    }

    #[tokio::test]
    async fn test_whatsapp_send_is_fire_and_forget() {
        let sender = WhatsAppSender::new("50936620118");
        sender.send_order("commande").await.unwrap();
    }
}

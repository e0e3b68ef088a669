//! View controller for the Provizyon storefront.
//!
//! The [`Storefront`] owns the catalog, cart, conversation log, and view
//! state, and wires user input through intent resolution (with a local
//! search fallback), cart mutation, session persistence, and the WhatsApp
//! checkout hand-off. All state is accessed through one owner; mutations
//! happen one at a time.

mod checkout;
mod error;
mod sender;
mod session;
mod storefront;

pub use checkout::format_order;
pub use error::StorefrontError;
pub use sender::{NoOpSender, OrderSender, WhatsAppSender};
pub use session::{CART_KEY, CHAT_KEY};
pub use storefront::{AppView, Storefront, StorefrontConfig, FALLBACK_DISPLAY_LIMIT};

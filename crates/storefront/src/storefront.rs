//! The storefront view controller.

use std::time::Duration;

use session_store::Database;
use shop_core::{
    AiResponse, Cart, CartItem, Catalog, CatalogSource, ConversationLog, Intent, IntentResolver,
    Message, Product, ResolveError, SPECIAL_REQUEST_CODE,
};
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::checkout::format_order;
use crate::error::StorefrontError;
use crate::sender::OrderSender;
use crate::session;

/// How many fallback search matches are attached to the assistant reply.
pub const FALLBACK_DISPLAY_LIMIT: usize = 3;

/// Default bounded wait for a resolve call. The service has no native
/// timeout; an unbounded hang would block the single input queue.
const DEFAULT_RESOLVER_TIMEOUT: Duration = Duration::from_secs(30);

/// Which pane the interface is showing. No transition history is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppView {
    Catalog,
    #[default]
    Chat,
}

/// Configuration for the storefront.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Bounded wait for intent resolution. Exceeding it is treated as a
    /// resolution failure and falls back to local search.
    pub resolver_timeout: Duration,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            resolver_timeout: DEFAULT_RESOLVER_TIMEOUT,
        }
    }
}

/// Top-level coordinator wiring user input to the catalog, cart,
/// conversation log, and checkout hand-off.
///
/// The storefront:
/// - Resolves each user message through the injected [`IntentResolver`]
/// - Falls back to local substring search when resolution fails
/// - Merges resolved items into the cart (special requests are minted as
///   zero-priced placeholder products)
/// - Appends exactly one user and one assistant message per turn
/// - Persists the cart and conversation after every mutation
/// - Gates checkout behind an explicit confirmation step
///
/// All state is owned here and accessed through `&mut self`, so mutations
/// are strictly one at a time.
pub struct Storefront<R: IntentResolver, S: OrderSender> {
    catalog: Catalog,
    cart: Cart,
    conversation: ConversationLog,
    resolver: R,
    sender: S,
    db: Database,
    config: StorefrontConfig,
    view: AppView,
    search_query: String,
    selected_category: Option<String>,
    checkout_pending: bool,
    busy: bool,
    message_seq: u64,
    special_seq: u64,
}

impl<R: IntentResolver, S: OrderSender> Storefront<R, S> {
    /// Create a new storefront with the given components.
    pub fn new(catalog: Catalog, resolver: R, sender: S, db: Database) -> Self {
        Self::with_config(catalog, resolver, sender, db, StorefrontConfig::default())
    }

    /// Create a new storefront with a custom configuration.
    pub fn with_config(
        catalog: Catalog,
        resolver: R,
        sender: S,
        db: Database,
        config: StorefrontConfig,
    ) -> Self {
        Self {
            catalog,
            cart: Cart::new(),
            conversation: ConversationLog::new(),
            resolver,
            sender,
            db,
            config,
            view: AppView::default(),
            search_query: String::new(),
            selected_category: None,
            checkout_pending: false,
            busy: false,
            message_seq: 0,
            special_seq: 0,
        }
    }

    /// Rehydrate cart and conversation from the session store.
    ///
    /// Missing or corrupt persisted state degrades to empty; this never
    /// fails.
    pub async fn restore(&mut self) {
        self.cart = session::load_cart(&self.db).await;
        self.conversation = session::load_conversation(&self.db).await;
        self.message_seq = self.conversation.len() as u64;
        self.special_seq = highest_special_seq(&self.cart);

        info!(
            "Session restored: {} cart line(s), {} message(s)",
            self.cart.len(),
            self.conversation.len()
        );
    }

    /// Replace the catalog from a source.
    ///
    /// Load failure is surfaced so the caller can offer a retry; the
    /// previous catalog (possibly empty) stays in place on error.
    pub async fn load_catalog(
        &mut self,
        source: &dyn CatalogSource,
    ) -> Result<(), StorefrontError> {
        let products = source.fetch().await?;
        info!("Catalog loaded: {} product(s)", products.len());
        self.catalog = Catalog::new(products);
        Ok(())
    }

    /// Process one user chat message end-to-end and return the assistant
    /// reply that was appended to the log.
    ///
    /// Blank input is rejected with [`StorefrontError::Skipped`].
    ///
    /// `&mut self` already serializes turns, so the [`StorefrontError::Busy`]
    /// branch cannot trigger from straight-line callers; it guards the seam
    /// for a front end that re-enters through shared mutability (an
    /// event-loop UI polling [`is_busy`](Self::is_busy) between frames) and
    /// keeps the one-turn-at-a-time contract explicit.
    pub async fn handle_message(&mut self, text: &str) -> Result<Message, StorefrontError> {
        if self.busy {
            return Err(StorefrontError::Busy);
        }
        let text = text.trim();
        if text.is_empty() {
            return Err(StorefrontError::Skipped("empty message".to_string()));
        }

        self.busy = true;
        let result = self.run_turn(text).await;
        self.busy = false;
        result
    }

    async fn run_turn(&mut self, text: &str) -> Result<Message, StorefrontError> {
        let user_message = Message::user(self.next_message_id(), text);
        self.conversation.push(user_message);
        session::persist_conversation(&self.db, &self.conversation).await;

        let resolved = match timeout(
            self.config.resolver_timeout,
            self.resolver.resolve(text, &self.catalog),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => Err(ResolveError::Timeout),
        };

        let assistant = match resolved {
            Ok(response) => {
                debug!(
                    "{} resolved intent {:?} with {} item(s)",
                    self.resolver.name(),
                    response.intent,
                    response.items.len()
                );
                self.apply_response(response).await
            }
            Err(e) => {
                warn!(
                    "{} failed ({}), falling back to local search",
                    self.resolver.name(),
                    e
                );
                self.fallback_reply(text)
            }
        };

        self.conversation.push(assistant.clone());
        session::persist_conversation(&self.db, &self.conversation).await;

        Ok(assistant)
    }

    /// Apply a successful resolution: mutate the cart and build the
    /// assistant reply with product snapshots attached.
    async fn apply_response(&mut self, response: AiResponse) -> Message {
        let mut related: Vec<Product> = Vec::new();
        let mut cart_changed = false;

        for item in &response.items {
            let quantity = item.effective_quantity();

            if response.intent == Intent::SpecialRequest {
                // Free text naming an unavailable product: mint a
                // zero-priced placeholder instead of a catalog lookup.
                let product = Product::special_request(self.next_special_id(), &item.product_code);
                self.cart.add(product.clone(), quantity);
                related.push(product);
                cart_changed = true;
            } else {
                match self.catalog.find_by_code(&item.product_code).cloned() {
                    Some(product) => {
                        self.cart.add(product.clone(), quantity);
                        related.push(product);
                        cart_changed = true;
                    }
                    None => {
                        debug!("Dropping unmatched product code: {}", item.product_code);
                    }
                }
            }
        }

        if cart_changed {
            session::persist_cart(&self.db, &self.cart).await;
        }

        let reply = response.reply_text().to_string();
        let related = if related.is_empty() {
            None
        } else {
            Some(related)
        };
        Message::assistant(self.next_message_id(), reply, related)
    }

    /// Build the fallback reply from local substring search. Never mutates
    /// the cart.
    fn fallback_reply(&mut self, query: &str) -> Message {
        let matches: Vec<Product> = self.catalog.search(query).into_iter().cloned().collect();

        if matches.is_empty() {
            Message::assistant(
                self.next_message_id(),
                "Désolé, je ne trouve pas ce produit.",
                None,
            )
        } else {
            let count = matches.len();
            let shown: Vec<Product> = matches.into_iter().take(FALLBACK_DISPLAY_LIMIT).collect();
            Message::assistant(
                self.next_message_id(),
                format!("J'ai trouvé {} produits.", count),
                Some(shown),
            )
        }
    }

    /// Add a product to the cart (the catalog pane's "add" button) and
    /// persist the new snapshot.
    pub async fn add_to_cart(&mut self, product: Product, quantity: u32) {
        if self.cart.add(product, quantity) {
            session::persist_cart(&self.db, &self.cart).await;
        } else {
            debug!("Ignoring add with zero quantity");
        }
    }

    /// Adjust a line item's quantity (clamped at 1) and persist.
    pub async fn update_quantity(&mut self, id: &str, delta: i64) {
        if self.cart.update_quantity(id, delta) {
            session::persist_cart(&self.db, &self.cart).await;
        } else {
            debug!("Ignoring quantity update for unknown cart id: {}", id);
        }
    }

    /// Remove a line item and persist.
    pub async fn remove_from_cart(&mut self, id: &str) -> Option<CartItem> {
        let removed = self.cart.remove(id);
        if removed.is_some() {
            session::persist_cart(&self.db, &self.cart).await;
        }
        removed
    }

    /// Start the checkout confirmation gate and return an order preview.
    ///
    /// Errors on an empty cart. Nothing is sent until
    /// [`confirm_checkout`](Self::confirm_checkout).
    pub fn begin_checkout(&mut self) -> Result<String, StorefrontError> {
        if self.cart.is_empty() {
            return Err(StorefrontError::EmptyCart);
        }
        self.checkout_pending = true;
        Ok(format_order(&self.cart))
    }

    /// Confirm the pending checkout: format the order from the current
    /// cart (total computed now, not cached) and hand it off.
    pub async fn confirm_checkout(&mut self) -> Result<(), StorefrontError> {
        if !self.checkout_pending {
            return Err(StorefrontError::NoPendingOrder);
        }
        if self.cart.is_empty() {
            self.checkout_pending = false;
            return Err(StorefrontError::EmptyCart);
        }

        let order_text = format_order(&self.cart);
        self.sender.send_order(&order_text).await?;
        self.checkout_pending = false;

        info!("Order handed off ({} line(s))", self.cart.len());
        Ok(())
    }

    /// Cancel a pending checkout. No-op if none is pending.
    pub fn cancel_checkout(&mut self) {
        self.checkout_pending = false;
    }

    pub fn checkout_pending(&self) -> bool {
        self.checkout_pending
    }

    /// Whether a resolve call is outstanding; the interface should block
    /// re-submission while this is set.
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn view(&self) -> AppView {
        self.view
    }

    pub fn set_view(&mut self, view: AppView) {
        self.view = view;
    }

    pub fn toggle_view(&mut self) {
        self.view = match self.view {
            AppView::Catalog => AppView::Chat,
            AppView::Chat => AppView::Catalog,
        };
    }

    /// Set the catalog pane's search query.
    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }

    /// Set the catalog pane's category filter; `None` shows everything.
    pub fn set_category(&mut self, category: Option<String>) {
        self.selected_category = category;
    }

    /// Products visible in the catalog pane under the current query and
    /// category filter.
    pub fn visible_products(&self) -> Vec<&Product> {
        self.catalog
            .filtered(&self.search_query, self.selected_category.as_deref())
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Current cart total; always recomputed.
    pub fn cart_total(&self) -> u64 {
        self.cart.total()
    }

    pub fn conversation(&self) -> &ConversationLog {
        &self.conversation
    }

    fn next_message_id(&mut self) -> String {
        self.message_seq += 1;
        format!("m-{}", self.message_seq)
    }

    fn next_special_id(&mut self) -> String {
        self.special_seq += 1;
        format!("sp-{}", self.special_seq)
    }
}

/// Highest `sp-N` counter present in a restored cart, so newly minted
/// special-request ids never collide after a restart.
fn highest_special_seq(cart: &Cart) -> u64 {
    cart.items()
        .filter(|item| item.product.code == SPECIAL_REQUEST_CODE)
        .filter_map(|item| item.product.id.strip_prefix("sp-"))
        .filter_map(|n| n.parse::<u64>().ok())
        .max()
        .unwrap_or(0)
}

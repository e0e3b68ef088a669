//! End-to-end flows through the storefront: chat turns, fallback search,
//! persistence across restarts, and checkout hand-off.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use mock_resolver::{CannedResolver, FailingResolver};
use session_store::{blob, Database};
use shop_core::{
    async_trait, demo_catalog, AiResponse, Catalog, Intent, IntentResolver, Product, ResolveError,
    Role, SPECIAL_REQUEST_CATEGORY, SPECIAL_REQUEST_CODE,
};
use storefront::{OrderSender, Storefront, StorefrontConfig, StorefrontError, CART_KEY};

async fn memory_db() -> Database {
    let db = Database::connect_with_pool_size("sqlite::memory:", 1)
        .await
        .unwrap();
    db.migrate().await.unwrap();
    db
}

fn storefront_with<R: IntentResolver>(
    resolver: R,
    db: Database,
) -> Storefront<R, storefront::NoOpSender> {
    Storefront::new(
        Catalog::new(demo_catalog()),
        resolver,
        storefront::NoOpSender,
        db,
    )
}

/// Sender that records every order text it is asked to deliver. Clones
/// share the same buffer so a test can keep a handle after moving one
/// into the storefront.
#[derive(Clone, Default)]
struct CapturingSender {
    orders: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl OrderSender for CapturingSender {
    async fn send_order(&self, order_text: &str) -> Result<(), StorefrontError> {
        self.orders.lock().unwrap().push(order_text.to_string());
        Ok(())
    }
}

#[tokio::test]
async fn test_add_to_cart_turn_appends_two_messages_and_mutates_cart() {
    let db = memory_db().await;
    let mut front = storefront_with(
        CannedResolver::add_to_cart("RIZ-001", 2, "J'ai ajouté le riz."),
        db,
    );

    let reply = front.handle_message("mwen vle 2 sak riz").await.unwrap();

    assert_eq!(reply.role, Role::Assistant);
    assert_eq!(reply.content, "J'ai ajouté le riz.");
    assert_eq!(reply.related_products.as_ref().unwrap().len(), 1);

    let log = front.conversation();
    assert_eq!(log.len(), 2);
    assert_eq!(log.messages()[0].role, Role::User);
    assert_eq!(log.messages()[0].content, "mwen vle 2 sak riz");

    assert_eq!(front.cart().len(), 1);
    let item = front.cart().get("p1").unwrap();
    assert_eq!(item.quantity, 2);
    assert_eq!(front.cart_total(), 7000);
}

#[tokio::test]
async fn test_session_survives_restart() {
    let db = memory_db().await;

    {
        let mut front = storefront_with(
            CannedResolver::add_to_cart("RIZ-001", 2, "J'ai ajouté le riz."),
            db.clone(),
        );
        front.handle_message("2 sak riz svp").await.unwrap();
    }

    // Second storefront over the same database stands in for a fresh
    // process start.
    let mut front = storefront_with(CannedResolver::greeting("Bonjou!"), db);
    front.restore().await;

    assert_eq!(front.cart().len(), 1);
    assert_eq!(front.cart().get("p1").unwrap().quantity, 2);
    assert_eq!(front.conversation().len(), 2);

    // New messages continue the id sequence instead of reusing m-1.
    let reply = front.handle_message("bonjou").await.unwrap();
    assert_eq!(reply.id, "m-4");
}

#[tokio::test]
async fn test_special_request_mints_placeholder_product() {
    let db = memory_db().await;
    let mut front = storefront_with(CannedResolver::special_request("Avocat", 2), db);

    front.handle_message("ou gen avoka?").await.unwrap();

    assert_eq!(front.cart().len(), 1);
    let item = front.cart().items().next().unwrap();
    assert_eq!(item.product.code, SPECIAL_REQUEST_CODE);
    assert_eq!(item.product.category, SPECIAL_REQUEST_CATEGORY);
    assert_eq!(item.product.price, 0);
    assert!(item.product.description.contains("Avocat"));
    assert_eq!(item.quantity, 2);

    // Placeholders contribute nothing to the total.
    assert_eq!(front.cart_total(), 0);
}

#[tokio::test]
async fn test_resolver_failure_falls_back_to_local_search() {
    let db = memory_db().await;
    let mut front = storefront_with(FailingResolver::new(), db);

    let reply = front.handle_message("riz").await.unwrap();

    assert_eq!(reply.content, "J'ai trouvé 1 produits.");
    let attached = reply.related_products.unwrap();
    assert_eq!(attached.len(), 1);
    assert_eq!(attached[0].code, "RIZ-001");

    // Fallback never touches the cart.
    assert!(front.cart().is_empty());
    assert_eq!(front.conversation().len(), 2);
}

/// Resolver that stalls far past any reasonable budget.
struct StallingResolver;

#[async_trait]
impl IntentResolver for StallingResolver {
    async fn resolve(&self, _text: &str, _catalog: &Catalog) -> Result<AiResponse, ResolveError> {
        tokio::time::sleep(Duration::from_secs(60)).await;
        Ok(AiResponse {
            intent: Intent::Greeting,
            items: Vec::new(),
            message: None,
        })
    }

    fn name(&self) -> &str {
        "StallingResolver"
    }
}

#[tokio::test]
async fn test_over_budget_resolver_falls_back_to_local_search() {
    let db = memory_db().await;
    let mut front = Storefront::with_config(
        Catalog::new(demo_catalog()),
        StallingResolver,
        storefront::NoOpSender,
        db,
        StorefrontConfig {
            resolver_timeout: Duration::from_millis(20),
        },
    );

    let reply = front.handle_message("riz").await.unwrap();

    assert_eq!(reply.content, "J'ai trouvé 1 produits.");
    assert!(front.cart().is_empty());
    assert_eq!(front.conversation().len(), 2);
}

#[tokio::test]
async fn test_fallback_with_no_matches() {
    let db = memory_db().await;
    let mut front = storefront_with(FailingResolver::new(), db);

    let reply = front.handle_message("xyzzy").await.unwrap();

    assert_eq!(reply.content, "Désolé, je ne trouve pas ce produit.");
    assert!(reply.related_products.is_none());
}

#[tokio::test]
async fn test_fallback_attaches_at_most_three_in_catalog_order() {
    let db = memory_db().await;
    let products: Vec<Product> = (1..=5)
        .map(|n| Product {
            id: format!("p{}", n),
            code: format!("RIZ-{:03}", n),
            description: format!("Riz Varyete {}", n),
            price: 100 * n,
            category: "Céréales & Grains".to_string(),
            image_url: None,
            summary: None,
        })
        .collect();

    let mut front = Storefront::new(
        Catalog::new(products),
        FailingResolver::new(),
        storefront::NoOpSender,
        db,
    );

    let reply = front.handle_message("riz").await.unwrap();

    assert_eq!(reply.content, "J'ai trouvé 5 produits.");
    let attached = reply.related_products.unwrap();
    let ids: Vec<&str> = attached.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["p1", "p2", "p3"]);
}

#[tokio::test]
async fn test_unmatched_product_code_is_dropped() {
    let db = memory_db().await;
    let mut front = storefront_with(
        CannedResolver::add_to_cart("NOPE-999", 1, "J'ai ajouté ça."),
        db,
    );

    let reply = front.handle_message("ajoute nope").await.unwrap();

    // The reply still lands in the log but the cart stays untouched.
    assert!(front.cart().is_empty());
    assert_eq!(front.conversation().len(), 2);
    assert!(reply.related_products.is_none());
}

#[tokio::test]
async fn test_zero_quantity_from_resolver_lands_as_one() {
    let db = memory_db().await;
    let mut front = storefront_with(CannedResolver::add_to_cart("HUI-001", 0, "D'accord."), db);

    front.handle_message("lwil").await.unwrap();

    assert_eq!(front.cart().get("p2").unwrap().quantity, 1);
}

#[tokio::test]
async fn test_repeated_adds_merge_into_one_line() {
    let db = memory_db().await;
    let mut front = storefront_with(
        CannedResolver::add_to_cart("PAS-001", 3, "Spaghetti ajouté."),
        db,
    );

    front.handle_message("3 pat").await.unwrap();
    front.handle_message("3 pat anko").await.unwrap();

    assert_eq!(front.cart().len(), 1);
    assert_eq!(front.cart().get("p3").unwrap().quantity, 6);
    assert_eq!(front.cart_total(), 6 * 85);
}

#[tokio::test]
async fn test_checkout_sends_formatted_order_and_resets_gate() {
    let db = memory_db().await;
    let sender = CapturingSender::default();
    let mut front = Storefront::new(
        Catalog::new(demo_catalog()),
        CannedResolver::greeting("Bonjou!"),
        sender.clone(),
        db,
    );

    front.add_to_cart(demo_catalog()[0].clone(), 2).await;
    front.add_to_cart(demo_catalog()[1].clone(), 1).await;

    front.begin_checkout().unwrap();
    front.confirm_checkout().await.unwrap();
    assert!(!front.checkout_pending());

    // Re-confirm without a fresh begin is rejected and sends nothing.
    assert!(matches!(
        front.confirm_checkout().await,
        Err(StorefrontError::NoPendingOrder)
    ));

    let orders = sender.orders.lock().unwrap();
    assert_eq!(orders.len(), 1);
    let text = &orders[0];
    assert!(text.contains("*🛒 COMMANDE DE PROVISIONS - PROVIZ-YON*"));
    assert!(text.contains("▪️ 2x Sac Riz Mega (25kg)"));
    assert!(text.contains("▪️ 1x Huile Gourmet (1 Gallon)"));
    assert!(text.contains("*TOTAL ESTIMÉ: 8\u{202F}200 HTG*"));
    assert!(text.contains("_Merci de confirmer la disponibilité et la livraison._"));
}

#[tokio::test]
async fn test_corrupt_persisted_state_degrades_to_empty() {
    let db = memory_db().await;
    blob::save_blob(db.pool(), CART_KEY, "{not json").await.unwrap();

    let mut front = storefront_with(CannedResolver::greeting("Bonjou!"), db);
    front.restore().await;

    assert!(front.cart().is_empty());
    assert!(front.conversation().is_empty());
}

#[tokio::test]
async fn test_special_request_ids_do_not_collide_after_restore() {
    let db = memory_db().await;

    {
        let mut front = storefront_with(CannedResolver::special_request("Avocat", 1), db.clone());
        front.handle_message("avoka svp").await.unwrap();
    }

    let mut front = storefront_with(CannedResolver::special_request("Mangue", 1), db);
    front.restore().await;
    front.handle_message("mango svp").await.unwrap();

    // Two distinct special lines, not one merged by a reused id.
    assert_eq!(front.cart().len(), 2);
    let ids: Vec<&str> = front.cart().items().map(|i| i.product.id.as_str()).collect();
    assert_eq!(ids, vec!["sp-1", "sp-2"]);
}

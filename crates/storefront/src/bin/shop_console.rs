use std::env;

use gemini_resolver::GeminiResolver;
use session_store::Database;
use shop_core::{Catalog, StaticCatalog};
use storefront::{Storefront, WhatsAppSender};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

/// Default on-disk session database.
const DEFAULT_DATABASE_URL: &str = "sqlite:provizyon.db?mode=rwc";

/// Vendor number orders are handed off to when WHATSAPP_NUMBER is unset.
const DEFAULT_WHATSAPP_NUMBER: &str = "50936620118";

fn print_help() {
    println!("Commands:");
    println!("  /catalog           list products (current filter applied)");
    println!("  /search QUERY      filter the catalog");
    println!("  /cart              show the cart");
    println!("  /add CODE [QTY]    add a catalog product by code");
    println!("  /qty ID DELTA      adjust a line item's quantity");
    println!("  /rm ID             remove a line item");
    println!("  /checkout          preview the order");
    println!("  /confirm           send the pending order via WhatsApp");
    println!("  /cancel            discard the pending order");
    println!("  /quit              exit");
    println!("Anything else is sent to the shop assistant.");
}

fn print_cart<R, S>(front: &Storefront<R, S>)
where
    R: shop_core::IntentResolver,
    S: storefront::OrderSender,
{
    if front.cart().is_empty() {
        println!("(cart is empty)");
        return;
    }
    for item in front.cart().items() {
        println!(
            "  [{}] {}x {} - {} G",
            item.product.id,
            item.quantity,
            item.product.description,
            item.subtotal()
        );
    }
    println!("  Total: {} G", front.cart_total());
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("storefront=info".parse()?)
                .add_directive("gemini_resolver=info".parse()?),
        )
        .init();

    let database_url =
        env::var("SHOP_DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());
    let phone = env::var("WHATSAPP_NUMBER").unwrap_or_else(|_| DEFAULT_WHATSAPP_NUMBER.to_string());

    let db = Database::connect(&database_url).await?;
    db.migrate().await?;

    let resolver = GeminiResolver::from_env()?;
    let sender = WhatsAppSender::new(&phone);

    let mut front = Storefront::new(Catalog::new(Vec::new()), resolver, sender, db);
    front.load_catalog(&StaticCatalog::demo()).await?;
    front.restore().await;

    info!(
        "Provizyon console ready: {} product(s), orders go to +{}",
        front.catalog().len(),
        phone
    );
    println!("Bonjou! Type /help for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim().to_string();
        if line.is_empty() {
            continue;
        }

        if let Some(command) = line.strip_prefix('/') {
            let mut parts = command.split_whitespace();
            match parts.next() {
                Some("help") => print_help(),
                Some("catalog") => {
                    for p in front.visible_products() {
                        println!("  {} - {} ({} G)", p.code, p.description, p.price);
                    }
                }
                Some("search") => {
                    let query = parts.collect::<Vec<_>>().join(" ");
                    front.set_search_query(query);
                    for p in front.visible_products() {
                        println!("  {} - {} ({} G)", p.code, p.description, p.price);
                    }
                }
                Some("cart") => print_cart(&front),
                Some("add") => {
                    let code = parts.next().unwrap_or_default();
                    let quantity: u32 = parts.next().and_then(|q| q.parse().ok()).unwrap_or(1);
                    match front.catalog().find_by_code(code).cloned() {
                        Some(product) => {
                            front.add_to_cart(product, quantity).await;
                            print_cart(&front);
                        }
                        None => println!("Unknown product code: {}", code),
                    }
                }
                Some("qty") => {
                    let id = parts.next().unwrap_or_default().to_string();
                    let delta: i64 = parts.next().and_then(|d| d.parse().ok()).unwrap_or(0);
                    front.update_quantity(&id, delta).await;
                    print_cart(&front);
                }
                Some("rm") => {
                    let id = parts.next().unwrap_or_default().to_string();
                    match front.remove_from_cart(&id).await {
                        Some(item) => println!("Removed {}", item.product.description),
                        None => println!("No cart line with id {}", id),
                    }
                }
                Some("checkout") => match front.begin_checkout() {
                    Ok(preview) => {
                        println!("{}", preview);
                        println!("(/confirm to send, /cancel to discard)");
                    }
                    Err(e) => println!("{}", e),
                },
                Some("confirm") => match front.confirm_checkout().await {
                    Ok(()) => println!("Order sent. Open the wa.me link above to finish."),
                    Err(e) => println!("{}", e),
                },
                Some("cancel") => {
                    front.cancel_checkout();
                    println!("Checkout cancelled.");
                }
                Some("quit") | Some("exit") => break,
                _ => println!("Unknown command, try /help"),
            }
            continue;
        }

        match front.handle_message(&line).await {
            Ok(reply) => {
                println!("{}", reply.content);
                if let Some(products) = &reply.related_products {
                    for p in products {
                        println!("  {} - {} ({} G)", p.code, p.description, p.price);
                    }
                }
            }
            Err(e) => println!("{}", e),
        }
    }

    println!("Orevwa!");
    Ok(())
}

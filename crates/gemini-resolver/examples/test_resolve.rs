//! Simple live test for GeminiResolver intent resolution.
//!
//! Run with: cargo run -p gemini-resolver --example test_resolve
//! Or with a custom message: cargo run -p gemini-resolver --example test_resolve -- "mwen vle 2 sak riz"
//!
//! Make sure to set environment variables in .env:
//!   GEMINI_API_KEY - Google AI Studio API key

use gemini_resolver::{GeminiResolver, IntentResolver};
use shop_core::{demo_catalog, Catalog};
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let args: Vec<String> = env::args().collect();
    let message = if args.len() > 1 {
        args[1..].join(" ")
    } else {
        "Bonjour, je voudrais 2 sacs de riz".to_string()
    };

    let resolver = GeminiResolver::from_env()?;
    println!("Resolver initialized: {}", resolver.name());
    println!("API URL: {}", resolver.config().api_url);
    println!("Model: {}", resolver.config().model);
    println!();

    let catalog = Catalog::new(demo_catalog());

    println!("Resolving: \"{}\"", message);
    let response = resolver.resolve(&message, &catalog).await?;

    println!("=== Response ===");
    println!("Intent: {:?}", response.intent);
    for item in &response.items {
        println!(
            "Item: {} x{}",
            item.product_code,
            item.effective_quantity()
        );
    }
    println!("Message: {}", response.reply_text());
    println!("================");

    Ok(())
}

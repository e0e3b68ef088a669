//! Mock implementations of the `IntentResolver` trait for testing:
//!
//! - `CannedResolver` - Always returns a fixed response
//! - `FailingResolver` - Always fails, for exercising the fallback path
//!
//! For production resolution, use the `gemini-resolver` crate instead.
//!
//! # Example
//!
//! ```rust
//! use mock_resolver::{CannedResolver, IntentResolver};
//! use shop_core::{demo_catalog, AiResponse, Catalog, Intent};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let resolver = CannedResolver::greeting("Bonjou!");
//!     let catalog = Catalog::new(demo_catalog());
//!
//!     let response = resolver.resolve("Bonjour", &catalog).await.unwrap();
//!     assert_eq!(response.intent, Intent::Greeting);
//! }
//! ```

mod canned;
mod failing;

// Re-export shop-core types for convenience
pub use shop_core::{async_trait, AiResponse, Catalog, Intent, IntentResolver, ResolveError};

pub use canned::CannedResolver;
pub use failing::FailingResolver;

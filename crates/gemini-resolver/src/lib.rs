//! Gemini-based implementation of the [`IntentResolver`] trait.
//!
//! Sends the user's free text plus a catalog context block to a Gemini
//! `generateContent` endpoint with a strict JSON response schema, and parses
//! the structured [`shop_core::AiResponse`] back out. Every failure mode -
//! network error, non-2xx status, empty body, malformed JSON, schema
//! violation - is reported as a [`shop_core::ResolveError`] so the caller
//! can fall back to local search.

mod api_types;
mod config;
mod resolver;

pub use config::{GeminiResolverConfig, GeminiResolverConfigBuilder};
pub use resolver::GeminiResolver;

pub use shop_core::IntentResolver;

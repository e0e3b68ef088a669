//! GeminiResolver implementation.

use async_trait::async_trait;
use reqwest::Client;
use sha2::{Digest, Sha256};
use shop_core::{AiResponse, Catalog, IntentResolver, Product, ResolveError};
use tracing::{debug, info, warn};

use crate::api_types::{
    response_schema, ApiError, Content, GenerateContentRequest, GenerateContentResponse,
    GenerationConfig,
};
use crate::config::GeminiResolverConfig;

/// An intent resolver backed by a Gemini `generateContent` endpoint.
///
/// Stateless between calls: every turn sends the full catalog context and
/// the user text, and expects a single JSON object matching the response
/// schema back.
pub struct GeminiResolver {
    client: Client,
    config: GeminiResolverConfig,
}

impl GeminiResolver {
    /// Create a new resolver with the given configuration.
    pub fn new(config: GeminiResolverConfig) -> Result<Self, ResolveError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                ResolveError::Configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        info!(
            "GeminiResolver initialized with model: {}, timeout: {:?}",
            config.model, config.timeout
        );

        Ok(Self { client, config })
    }

    /// Create a resolver from environment variables.
    ///
    /// See [`GeminiResolverConfig::from_env`] for the variables involved.
    pub fn from_env() -> Result<Self, ResolveError> {
        let config = GeminiResolverConfig::from_env()?;
        Self::new(config)
    }

    /// Get the configuration.
    pub fn config(&self) -> &GeminiResolverConfig {
        &self.config
    }

    async fn generate(&self, request: &GenerateContentRequest) -> Result<String, ResolveError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.api_url, self.config.model
        );

        debug!("Sending request to Gemini API: {:?}", request);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ResolveError::Timeout
                } else {
                    ResolveError::Network(format!("Failed to send request: {}", e))
                }
            })?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();

            // Try to parse as a structured API error
            if let Ok(api_error) = serde_json::from_str::<ApiError>(&error_text) {
                return Err(ResolveError::InvalidResponse(format!(
                    "API error ({}): {}",
                    status.as_u16(),
                    api_error.error.message
                )));
            }

            return Err(ResolveError::InvalidResponse(format!(
                "API error ({}): {}",
                status.as_u16(),
                error_text
            )));
        }

        let completion: GenerateContentResponse = response.json().await.map_err(|e| {
            ResolveError::InvalidResponse(format!("Failed to parse response: {}", e))
        })?;

        if let Some(usage) = &completion.usage_metadata {
            debug!(
                "Token usage - prompt: {}, candidates: {}, total: {}",
                usage.prompt_token_count, usage.candidates_token_count, usage.total_token_count
            );
        }

        match completion.first_text() {
            Some(text) if !text.trim().is_empty() => Ok(text.to_string()),
            _ => {
                warn!("Empty response body from Gemini API");
                Err(ResolveError::InvalidResponse(
                    "empty response body".to_string(),
                ))
            }
        }
    }
}

#[async_trait]
impl IntentResolver for GeminiResolver {
    async fn resolve(&self, text: &str, catalog: &Catalog) -> Result<AiResponse, ResolveError> {
        let system_instruction = build_system_instruction(catalog.products());
        debug!(
            "Resolving with system instruction fingerprint {}",
            instruction_fingerprint(&system_instruction)
        );

        let request = GenerateContentRequest {
            contents: vec![Content::user(text)],
            system_instruction: Content::system(system_instruction),
            generation_config: GenerationConfig {
                temperature: self.config.temperature,
                max_output_tokens: self.config.max_output_tokens,
                response_mime_type: "application/json".to_string(),
                response_schema: response_schema(),
            },
        };

        let body = self.generate(&request).await?;

        let response: AiResponse = serde_json::from_str(&body).map_err(|e| {
            ResolveError::InvalidResponse(format!("Schema violation in response: {}", e))
        })?;

        debug!(
            "Resolved intent {:?} with {} item(s)",
            response.intent,
            response.items.len()
        );

        Ok(response)
    }

    fn name(&self) -> &str {
        "GeminiResolver"
    }
}

/// Short SHA-256 fingerprint of the system instruction, for correlating
/// log lines with the catalog revision that produced them.
fn instruction_fingerprint(instruction: &str) -> String {
    let digest = Sha256::digest(instruction.as_bytes());
    digest.iter().take(6).map(|b| format!("{:02x}", b)).collect()
}

/// Enumerate the catalog as one context line per product.
fn build_catalog_context(products: &[Product]) -> String {
    products
        .iter()
        .map(|p| {
            format!(
                "[{}] {} ({}) - {}",
                p.code,
                p.description,
                p.category,
                p.summary.as_deref().unwrap_or("")
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// The grocery-assistant system instruction with the catalog embedded.
fn build_system_instruction(products: &[Product]) -> String {
    format!(
        r#"You are PROVIZ-YON, a helpful grocery shop assistant (Commerçant).

Your goal is to help users find FOOD PRODUCTS and PROVISIONS in the catalog.

CATALOG:
---
{}
---

RULES:
1. Match user requests (e.g., "riz", "huile", "lait") to catalog items.
2. If user asks for a recipe (e.g. "Spaghetti"), suggest the ingredients available (Spaghetti, Huile, Sauce Tomate, etc.).
3. If item is FOUND: Intent 'ADD_TO_CART', return CODE.
4. If item is NOT FOUND (e.g. "Avocat", "Viande"): Intent 'SPECIAL_REQUEST', return the item name.
5. Be polite, concise, and helpful. Language: French / Creole friendly."#,
        build_catalog_context(products)
    )
}

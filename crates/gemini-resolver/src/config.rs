//! Configuration for GeminiResolver.

use std::env;
use std::time::Duration;

use shop_core::ResolveError;

/// Default request timeout for calls to the service.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Configuration for GeminiResolver.
#[derive(Debug, Clone)]
pub struct GeminiResolverConfig {
    /// Service base URL.
    pub api_url: String,

    /// API key for authentication.
    pub api_key: String,

    /// Model name to use.
    pub model: String,

    /// Temperature for generation (0.0 - 2.0).
    pub temperature: Option<f32>,

    /// Maximum tokens for the response.
    pub max_output_tokens: Option<u32>,

    /// HTTP request timeout. A call that exceeds this is reported as a
    /// resolution failure; there is no retry.
    pub timeout: Duration,
}

impl Default for GeminiResolverConfig {
    fn default() -> Self {
        Self {
            api_url: "https://generativelanguage.googleapis.com".to_string(),
            api_key: String::new(),
            model: "gemini-2.5-flash".to_string(),
            temperature: Some(0.2),
            max_output_tokens: Some(512),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl GeminiResolverConfig {
    /// Create configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `GEMINI_API_KEY` - API key for authentication
    ///
    /// Optional environment variables:
    /// - `GEMINI_API_URL` - Base URL (default: https://generativelanguage.googleapis.com)
    /// - `GEMINI_MODEL` - Model name (default: gemini-2.5-flash)
    /// - `GEMINI_TEMPERATURE` - Temperature (default: 0.2)
    /// - `GEMINI_MAX_OUTPUT_TOKENS` - Max output tokens (default: 512)
    /// - `GEMINI_TIMEOUT_SECS` - Request timeout in seconds (default: 15)
    pub fn from_env() -> Result<Self, ResolveError> {
        let api_key = env::var("GEMINI_API_KEY")
            .map_err(|_| ResolveError::Configuration("GEMINI_API_KEY not set".to_string()))?;

        let api_url = env::var("GEMINI_API_URL")
            .unwrap_or_else(|_| "https://generativelanguage.googleapis.com".to_string());

        let model = env::var("GEMINI_MODEL").unwrap_or_else(|_| "gemini-2.5-flash".to_string());

        let temperature = env::var("GEMINI_TEMPERATURE")
            .ok()
            .and_then(|v| v.parse().ok())
            .or(Some(0.2));

        let max_output_tokens = env::var("GEMINI_MAX_OUTPUT_TOKENS")
            .ok()
            .and_then(|v| v.parse().ok())
            .or(Some(512));

        let timeout = env::var("GEMINI_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT);

        Ok(Self {
            api_url,
            api_key,
            model,
            temperature,
            max_output_tokens,
            timeout,
        })
    }

    /// Create a new config builder.
    pub fn builder() -> GeminiResolverConfigBuilder {
        GeminiResolverConfigBuilder::default()
    }
}

/// Builder for GeminiResolverConfig.
#[derive(Debug, Default)]
pub struct GeminiResolverConfigBuilder {
    config: GeminiResolverConfig,
}

impl GeminiResolverConfigBuilder {
    /// Set the API key.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = key.into();
        self
    }

    /// Set the base URL.
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.config.api_url = url.into();
        self
    }

    /// Set the model name.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    /// Set the temperature.
    pub fn temperature(mut self, temp: f32) -> Self {
        self.config.temperature = Some(temp);
        self
    }

    /// Set the max output tokens.
    pub fn max_output_tokens(mut self, tokens: u32) -> Self {
        self.config.max_output_tokens = Some(tokens);
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> GeminiResolverConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GeminiResolverConfig::default();

        assert_eq!(config.api_url, "https://generativelanguage.googleapis.com");
        assert!(config.api_key.is_empty());
        assert_eq!(config.model, "gemini-2.5-flash");
        assert_eq!(config.temperature, Some(0.2));
        assert_eq!(config.max_output_tokens, Some(512));
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn test_builder_all_options() {
        let config = GeminiResolverConfig::builder()
            .api_key("my-key")
            .api_url("https://custom.api.com")
            .model("gemini-2.0-flash")
            .temperature(0.7)
            .max_output_tokens(1024)
            .timeout(Duration::from_secs(5))
            .build();

        assert_eq!(config.api_key, "my-key");
        assert_eq!(config.api_url, "https://custom.api.com");
        assert_eq!(config.model, "gemini-2.0-flash");
        assert_eq!(config.temperature, Some(0.7));
        assert_eq!(config.max_output_tokens, Some(1024));
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    // Environment-based tests are combined into a single test to avoid
    // race conditions when tests run in parallel (env vars are process-global).
    #[test]
    fn test_from_env_scenarios() {
        use std::sync::Mutex;
        static ENV_LOCK: Mutex<()> = Mutex::new(());
        let _guard = ENV_LOCK.lock().unwrap();

        fn clear_all_gemini_vars() {
            std::env::remove_var("GEMINI_API_KEY");
            std::env::remove_var("GEMINI_API_URL");
            std::env::remove_var("GEMINI_MODEL");
            std::env::remove_var("GEMINI_TEMPERATURE");
            std::env::remove_var("GEMINI_MAX_OUTPUT_TOKENS");
            std::env::remove_var("GEMINI_TIMEOUT_SECS");
        }

        // Scenario 1: Missing API key should error
        clear_all_gemini_vars();
        let result = GeminiResolverConfig::from_env();
        match result {
            Err(ResolveError::Configuration(msg)) => {
                assert!(msg.contains("GEMINI_API_KEY"));
            }
            other => panic!("Expected Configuration error, got {:?}", other),
        }

        // Scenario 2: Only API key set, defaults used
        clear_all_gemini_vars();
        std::env::set_var("GEMINI_API_KEY", "test-env-key");

        let config = GeminiResolverConfig::from_env().unwrap();
        assert_eq!(config.api_key, "test-env-key");
        assert_eq!(config.api_url, "https://generativelanguage.googleapis.com");
        assert_eq!(config.model, "gemini-2.5-flash");
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);

        // Scenario 3: All vars set
        clear_all_gemini_vars();
        std::env::set_var("GEMINI_API_KEY", "full-test-key");
        std::env::set_var("GEMINI_API_URL", "https://test.api.com");
        std::env::set_var("GEMINI_MODEL", "gemini-2.0-flash");
        std::env::set_var("GEMINI_TEMPERATURE", "0.9");
        std::env::set_var("GEMINI_MAX_OUTPUT_TOKENS", "256");
        std::env::set_var("GEMINI_TIMEOUT_SECS", "30");

        let config = GeminiResolverConfig::from_env().unwrap();
        assert_eq!(config.api_key, "full-test-key");
        assert_eq!(config.api_url, "https://test.api.com");
        assert_eq!(config.model, "gemini-2.0-flash");
        assert_eq!(config.temperature, Some(0.9));
        assert_eq!(config.max_output_tokens, Some(256));
        assert_eq!(config.timeout, Duration::from_secs(30));

        // Cleanup
        clear_all_gemini_vars();
    }
}

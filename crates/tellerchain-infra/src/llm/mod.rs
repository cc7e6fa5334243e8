//! Completion gateway implementations.
//!
//! Contains concrete implementations of the `CompletionGateway` trait
//! defined in `tellerchain-core`, currently just Google Gemini, plus a
//! factory ([`create_gateway`]) that builds one from a resolved
//! [`ServiceConfig`].

pub mod gemini;

pub use gemini::GeminiClient;

use crate::config::ServiceConfig;

/// Build the production gateway from configuration.
///
/// Applies the configured timeout and, when present, the base URL
/// override.
pub fn create_gateway(config: ServiceConfig) -> GeminiClient {
    let mut client =
        GeminiClient::new(config.api_key, config.model).with_timeout(config.timeout);
    if let Some(base_url) = config.base_url {
        client = client.with_base_url(base_url);
    }
    client
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use secrecy::SecretString;
    use tellerchain_core::gateway::CompletionGateway;

    use super::*;

    #[test]
    fn test_create_gateway_applies_overrides() {
        let config = ServiceConfig {
            api_key: SecretString::from("test-key"),
            model: "gemini-2.5-pro".to_string(),
            base_url: Some("http://localhost:4010".to_string()),
            timeout: Duration::from_secs(5),
        };

        let gateway = create_gateway(config);
        assert_eq!(gateway.name(), "gemini");
        assert_eq!(gateway.model(), "gemini-2.5-pro");
    }

    #[test]
    fn test_create_gateway_defaults() {
        let config = ServiceConfig {
            api_key: SecretString::from("test-key"),
            model: "gemini-2.5-flash-lite".to_string(),
            base_url: None,
            timeout: Duration::from_secs(120),
        };

        let gateway = create_gateway(config);
        assert_eq!(gateway.model(), "gemini-2.5-flash-lite");
    }
}

//! Service configuration from the environment.
//!
//! Everything the gateway needs is read from environment variables at
//! startup; nothing touches the filesystem. `GEMINI_API_KEY` is the one
//! hard requirement and startup fails without it. The rest fall back to
//! defaults.

use std::time::Duration;

use secrecy::SecretString;

use tellerchain_types::error::ConfigError;

/// Model used when `TELLERCHAIN_MODEL` is not set.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-lite";

/// Per-request timeout used when `TELLERCHAIN_TIMEOUT_SECS` is not set.
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Resolved gateway configuration.
///
/// The API key is wrapped in [`SecretString`] so it never shows up in
/// logs or debug output.
pub struct ServiceConfig {
    pub api_key: SecretString,
    pub model: String,
    /// Override for the Gemini endpoint, for tests and proxies.
    pub base_url: Option<String>,
    pub timeout: Duration,
}

impl ServiceConfig {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    ///
    /// [`ConfigError::MissingApiKey`] when `GEMINI_API_KEY` is absent or
    /// empty; [`ConfigError::Invalid`] when an override does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        // NotUnicode values are treated as absent; secrets and
        // overrides must be valid strings anyway.
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_key = lookup("GEMINI_API_KEY")
            .filter(|v| !v.is_empty())
            .map(SecretString::from)
            .ok_or(ConfigError::MissingApiKey)?;

        let model = lookup("TELLERCHAIN_MODEL")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let base_url = lookup("TELLERCHAIN_GEMINI_BASE_URL").filter(|v| !v.is_empty());

        let timeout = match lookup("TELLERCHAIN_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw.parse().map_err(|_| ConfigError::Invalid {
                    name: "TELLERCHAIN_TIMEOUT_SECS".to_string(),
                    message: format!("expected whole seconds, got {raw:?}"),
                })?;
                if secs == 0 {
                    return Err(ConfigError::Invalid {
                        name: "TELLERCHAIN_TIMEOUT_SECS".to_string(),
                        message: "must be at least 1".to_string(),
                    });
                }
                Duration::from_secs(secs)
            }
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        Ok(Self {
            api_key,
            model,
            base_url,
            timeout,
        })
    }
}

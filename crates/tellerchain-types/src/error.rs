use thiserror::Error;

/// Errors from completion gateway calls.
///
/// The orchestrator converts these into a diagnostic reply for the turn;
/// a failed call never populates a cached stage field.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("request timed out")]
    Timeout,

    #[error("authentication failed")]
    AuthenticationFailed,

    #[error("rate limited")]
    RateLimited,

    #[error("upstream error (status {status}): {message}")]
    UpstreamStatus { status: u16, message: String },

    #[error("deserialization error: {0}")]
    Deserialization(String),

    #[error("completion contained no text")]
    Empty,
}

/// Errors from service configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("GEMINI_API_KEY is not set")]
    MissingApiKey,

    #[error("invalid {name}: {message}")]
    Invalid { name: String, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gateway_error_display() {
        let err = GatewayError::UpstreamStatus {
            status: 503,
            message: "service unavailable".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "upstream error (status 503): service unavailable"
        );
    }

    #[test]
    fn test_timeout_display() {
        assert_eq!(GatewayError::Timeout.to_string(), "request timed out");
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Invalid {
            name: "GEMINI_TIMEOUT_SECS".to_string(),
            message: "not a number".to_string(),
        };
        assert_eq!(err.to_string(), "invalid GEMINI_TIMEOUT_SECS: not a number");
    }
}

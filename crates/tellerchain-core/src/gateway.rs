//! Completion backend abstraction.
//!
//! The orchestrator and stage runners only ever see this trait.
//! Production wires in the Gemini client from `tellerchain-infra`;
//! tests substitute scripted doubles.

use tellerchain_types::error::GatewayError;

/// A backend that turns one prompt into one completion.
///
/// Implementations must be cheap to share across tasks (`Send + Sync`).
/// One call corresponds to one upstream request; retry policy, if any,
/// belongs to the implementation, not the callers.
pub trait CompletionGateway: Send + Sync {
    /// Short backend name used in log fields and trace attributes
    /// (e.g. `"gemini"`).
    fn name(&self) -> &str;

    /// Send `prompt` and return the completion text.
    ///
    /// Returns the raw text as produced by the backend; callers are
    /// responsible for trimming or parsing it.
    fn complete(
        &self,
        prompt: &str,
    ) -> impl std::future::Future<Output = Result<String, GatewayError>> + Send;
}

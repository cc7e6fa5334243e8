//! Application state wiring the chain to the HTTP layer.
//!
//! The orchestrator is generic over its gateway; AppState pins it to the
//! production Gemini client. Handlers that only touch session metadata
//! go through the registry directly and never wake the gateway.

use std::sync::Arc;

use tellerchain_core::orchestrator::ChainOrchestrator;
use tellerchain_core::registry::SessionRegistry;
use tellerchain_infra::llm::GeminiClient;

/// Orchestrator pinned to the production gateway.
pub type ConcreteOrchestrator = ChainOrchestrator<GeminiClient>;

/// Shared application state for all HTTP handlers.
///
/// Cloning is cheap; the registry clone shares the orchestrator's
/// session map.
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<ConcreteOrchestrator>,
    pub registry: SessionRegistry,
}

impl AppState {
    /// Wrap an orchestrator and the registry it was built around.
    pub fn new(orchestrator: ConcreteOrchestrator, registry: SessionRegistry) -> Self {
        Self {
            orchestrator: Arc::new(orchestrator),
            registry,
        }
    }
}

//! Chat HTTP handler.
//!
//! POST /api/chat - run one prompt-chain turn against a session.

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use tellerchain_types::chain::StageSnapshots;

use crate::state::AppState;

/// Longest extraction snapshot echoed to clients, in characters.
const EXTRACTION_PREVIEW_CHARS: usize = 200;

/// Body of POST /api/chat.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    /// Omitted on the first message; the service mints an id and the
    /// client echoes it back on later turns.
    #[serde(default)]
    pub session_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub session_id: String,
    pub response: String,
    pub timestamp: String,
    pub intermediate_outputs: IntermediateOutputs,
}

/// Stage outputs from this turn. A stage served from the session cache
/// (or never reached) reports `null`.
#[derive(Debug, Serialize)]
pub struct IntermediateOutputs {
    pub intent: Option<String>,
    pub categories: Option<String>,
    pub selected_category: Option<String>,
    pub extraction: Option<String>,
}

impl From<StageSnapshots> for IntermediateOutputs {
    fn from(stages: StageSnapshots) -> Self {
        Self {
            intent: stages.intent,
            categories: stages.categories,
            selected_category: stages.selected_category,
            extraction: stages
                .extraction
                .map(|raw| truncate_chars(&raw, EXTRACTION_PREVIEW_CHARS)),
        }
    }
}

/// POST /api/chat - Run one turn of the prompt chain.
///
/// An unknown or missing `session_id` starts a fresh session; the
/// response always carries the id the turn actually ran under. This
/// handler is infallible: backend trouble surfaces as a normal reply.
pub async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Json<ChatResponse> {
    tracing::info!(
        message_preview = %truncate_chars(&request.message, 50),
        "received chat request"
    );

    let session_id = request
        .session_id
        .unwrap_or_else(|| Uuid::now_v7().to_string());

    let outcome = state.orchestrator.process(&session_id, &request.message).await;

    Json(ChatResponse {
        session_id,
        response: outcome.reply,
        timestamp: Utc::now().to_rfc3339(),
        intermediate_outputs: outcome.stages.into(),
    })
}

/// First `max_chars` characters of `text`; never splits a code point.
fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

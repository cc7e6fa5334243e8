//! Turn orchestration for the five-stage banking chain.
//!
//! One call to [`ChainOrchestrator::process`] runs one customer turn:
//! it locks the session, replays the cached early stages, runs whatever
//! still needs the backend, and hands back the reply plus snapshots of
//! the stages that actually ran this turn.
//!
//! Failure policy: a turn never errors out. Backend failures and
//! unusable stage output become an `Error: ...` reply recorded on the
//! transcript like any other, and nothing from the failed call is
//! cached, so the next turn retries from the first missing stage.

use tellerchain_types::chain::{ExtractionReport, ExtractionStatus, StageSnapshots, TurnOutcome};
use tellerchain_types::error::GatewayError;
use tellerchain_types::session::SessionState;

use crate::extract;
use crate::gateway::CompletionGateway;
use crate::registry::SessionRegistry;
use crate::stage;

const ERR_EMPTY_INPUT: &str = "Error: Empty input";
const ERR_SELECT_CATEGORY: &str = "Error: Failed to select category";
const ERR_PROCESS_REQUEST: &str = "Error: Failed to process request";

const FALLBACK_NEEDS_INFO: &str = "Could you provide more details?";
const FALLBACK_RESOLVED: &str = "Your request has been processed.";

/// Drives the prompt chain for every session against one gateway.
///
/// Cheap to share behind an `Arc`; all mutable state lives in the
/// registry's sessions.
pub struct ChainOrchestrator<G> {
    gateway: G,
    registry: SessionRegistry,
}

impl<G: CompletionGateway> ChainOrchestrator<G> {
    pub fn new(gateway: G, registry: SessionRegistry) -> Self {
        Self { gateway, registry }
    }

    /// Run one customer turn against the session with `session_id`,
    /// creating the session if the id is unknown.
    ///
    /// Holds the session lock for the whole turn, so concurrent turns
    /// on one session serialize in arrival order.
    #[tracing::instrument(name = "chain.turn", skip(self, message), fields(session_id = %session_id))]
    pub async fn process(&self, session_id: &str, message: &str) -> TurnOutcome {
        let session = self.registry.get_or_create(session_id);
        let mut session = session.lock().await;
        self.run_turn(&mut session, message).await
    }

    async fn run_turn(&self, session: &mut SessionState, message: &str) -> TurnOutcome {
        session.push_user(message);

        let mut stages = StageSnapshots::default();

        let input = message.trim();
        if input.is_empty() {
            return finish(session, ERR_EMPTY_INPUT.to_string(), stages);
        }

        // Customer turns accumulate even when a later stage fails, so a
        // retried turn still sees everything said so far.
        session.turn_history.push(input.to_string());
        let history = session.turn_history.join("\n");

        // Stage one: interpret intent, once per session.
        let interpreted = match session.interpreted_intent.clone() {
            Some(cached) => cached,
            None => match stage::interpret_intent(&self.gateway, input).await {
                Ok(text) => {
                    session.interpreted_intent = Some(text.clone());
                    stages.intent = Some(text.clone());
                    text
                }
                Err(err) => return gateway_failure(session, "interpret_intent", err, stages),
            },
        };

        // Stage two: suggest categories, once per session.
        let suggested = match session.suggested_categories.clone() {
            Some(cached) => cached,
            None => match stage::suggest_categories(&self.gateway, &interpreted).await {
                Ok(text) => {
                    session.suggested_categories = Some(text.clone());
                    stages.categories = Some(text.clone());
                    text
                }
                Err(err) => return gateway_failure(session, "suggest_categories", err, stages),
            },
        };

        // Stage three: lock a category, once per session. An empty
        // answer is unusable and must not be cached.
        let category = match session.selected_category.clone() {
            Some(cached) => cached,
            None => match stage::select_category(&self.gateway, &interpreted, &suggested).await {
                Ok(text) if text.is_empty() => {
                    return finish(session, ERR_SELECT_CATEGORY.to_string(), stages);
                }
                Ok(text) => {
                    session.selected_category = Some(text.clone());
                    stages.selected_category = Some(text.clone());
                    text
                }
                Err(err) => return gateway_failure(session, "select_category", err, stages),
            },
        };

        // Stage four: extract details, every turn.
        let raw = match stage::extract_details(
            &self.gateway,
            &interpreted,
            &history,
            &category,
            &session.context_data,
        )
        .await
        {
            Ok(text) if text.is_empty() => {
                return finish(session, ERR_PROCESS_REQUEST.to_string(), stages);
            }
            Ok(text) => text,
            Err(err) => return gateway_failure(session, "extract_details", err, stages),
        };
        stages.extraction = Some(raw.clone());

        let Some(report) = extract::decode_extraction(&raw) else {
            // No decodable JSON anywhere in the reply. Relay the text
            // as-is; it is usually a plain-prose follow-up question.
            tracing::warn!(
                content_preview = preview(&raw, 200),
                "extraction reply carried no decodable JSON, relaying verbatim"
            );
            return finish(session, raw, stages);
        };

        let ExtractionReport {
            status,
            extracted_data,
            response_to_user,
            ..
        } = report;

        for (key, value) in extracted_data {
            session.context_data.insert(key, value);
        }

        let reply = match status {
            ExtractionStatus::ReadyToResolve => {
                session.resolved = true;
                let resolution =
                    match stage::generate_resolution(&self.gateway, &category, &session.context_data)
                        .await
                    {
                        Ok(text) if !text.is_empty() => Some(text),
                        Ok(_) => {
                            tracing::warn!("resolution stage returned no text, using extraction reply");
                            None
                        }
                        Err(err) => {
                            tracing::warn!(error = %err, "resolution stage failed, using extraction reply");
                            None
                        }
                    };
                resolution.unwrap_or_else(|| {
                    response_to_user.unwrap_or_else(|| FALLBACK_RESOLVED.to_string())
                })
            }
            ExtractionStatus::NeedsInfo => {
                response_to_user.unwrap_or_else(|| FALLBACK_NEEDS_INFO.to_string())
            }
        };

        finish(session, reply, stages)
    }
}

// ---------------------------------------------------------------------------
// Turn finalization
// ---------------------------------------------------------------------------

/// Record a backend failure as the turn's reply. Nothing is cached, so
/// the next turn retries the failed stage.
fn gateway_failure(
    session: &mut SessionState,
    stage: &str,
    err: GatewayError,
    stages: StageSnapshots,
) -> TurnOutcome {
    tracing::warn!(error = %err, stage, "completion backend failed, surfacing error to customer");
    finish(session, format!("Error: {err}"), stages)
}

/// Append the assistant reply to the transcript and build the outcome.
fn finish(session: &mut SessionState, reply: String, stages: StageSnapshots) -> TurnOutcome {
    session.push_assistant(reply.as_str());
    tracing::debug!(
        phase = %session.phase(),
        reply_preview = preview(&reply, 80),
        "turn complete"
    );
    TurnOutcome { reply, stages }
}

/// First `max_chars` characters of `s`, safe on multibyte boundaries.
fn preview(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

//! Stage output types for the banking prompt chain.
//!
//! Stage 4 replies with a JSON object embedded in free text; these types
//! model its decoded shape plus the per-turn outputs surfaced to clients.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use std::fmt;

/// Whether extraction judged the request ready for resolution.
///
/// Decoding is deliberately lenient: a missing or unrecognized status
/// falls back to `NeedsInfo`, keeping the turn on the follow-up path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionStatus {
    ReadyToResolve,
    // The catch-all variant must be declared last for serde.
    #[serde(other)]
    NeedsInfo,
}

impl fmt::Display for ExtractionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractionStatus::NeedsInfo => write!(f, "needs_info"),
            ExtractionStatus::ReadyToResolve => write!(f, "ready_to_resolve"),
        }
    }
}

impl Default for ExtractionStatus {
    fn default() -> Self {
        ExtractionStatus::NeedsInfo
    }
}

/// Decoded form of the Stage-4 JSON object.
///
/// Every field may be absent and unknown extra fields are ignored; the
/// model does not always follow the requested format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionReport {
    #[serde(default)]
    pub status: ExtractionStatus,
    #[serde(default)]
    pub extracted_data: Map<String, Value>,
    #[serde(default)]
    pub follow_up_question: Option<String>,
    #[serde(default)]
    pub response_to_user: Option<String>,
}

/// Raw stage outputs produced while handling one turn.
///
/// A stage that did not run this turn (output already cached, or never
/// reached) reports `None`. The transport layer truncates `extraction`
/// before exposing it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageSnapshots {
    pub intent: Option<String>,
    pub categories: Option<String>,
    pub selected_category: Option<String>,
    pub extraction: Option<String>,
}

/// The orchestrator's result for one processed turn.
#[derive(Debug, Clone)]
pub struct TurnOutcome {
    /// The single user-facing reply, already appended to the transcript.
    pub reply: String,
    pub stages: StageSnapshots,
}

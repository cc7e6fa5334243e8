//! Prompt builders and stage runners for the banking chain.
//!
//! Each turn walks up to five completion stages: interpret the intent,
//! suggest matching categories, lock one category, extract details, and
//! (once the extraction says so) generate the final resolution. The
//! first three run once per session; the orchestrator caches their
//! results on the session and skips them on later turns.
//!
//! Builders are plain functions returning the exact prompt text, kept
//! separate from the runners so tests can pin the wording without a
//! backend in the loop. The wording is deliberate; treat changes to it
//! as behavior changes, not copy edits.

use serde_json::{Map, Value};
use tellerchain_types::category::CATEGORY_BLOCK;
use tellerchain_types::error::GatewayError;
use tracing::Instrument;

use crate::gateway::CompletionGateway;

/// JSON contract the extraction stage asks the model to honor. Kept as
/// one literal so the braces never fight `format!`.
const EXTRACTION_FORMAT: &str = r#"Return your response in this JSON format:
{
    "status": "needs_info" or "ready_to_resolve",
    "extracted_data": {"key": "value"},
    "follow_up_question": "your question here" or null,
    "response_to_user": "friendly message to the customer"
}"#;

// ---------------------------------------------------------------------------
// Prompt builders
// ---------------------------------------------------------------------------

/// Stage one: restate the customer's message as a clear intent.
pub fn interpret_prompt(user_input: &str) -> String {
    format!(
        "You are a Bank Assistant. Interpret the customer's intent clearly and concisely.\n\
         Customer message: {user_input}\n\
         Provide a clear interpretation of what the customer wants or needs. Be specific and professional."
    )
}

/// Stage two: map the interpreted intent onto the known categories.
pub fn categories_prompt(interpreted: &str) -> String {
    format!(
        "Map the query to one or more possible categories that may apply.\n\
         Available Categories:\n\
         {CATEGORY_BLOCK}\n\
         \n\
         Interpreted customer request: \n\
         {interpreted}\n\
         \n\
         Return the suggested categories (one or more) that best match this request. Format: list the category names."
    )
}

/// Stage three: pick the single best category from the suggestions.
pub fn select_prompt(interpreted: &str, suggested: &str) -> String {
    format!(
        "Select the MOST appropriate single category from the suggestions.\n\
         \n\
         Suggested Categories:\n\
         {suggested}\n\
         \n\
         Interpreted customer request:\n\
         {interpreted}\n\
         \n\
         Return ONLY the single most appropriate category name, nothing else."
    )
}

/// Stage four: decide what is still needed and pull new details out of
/// the conversation.
///
/// `history` is every customer message so far, joined with newlines, so
/// the model can mine earlier turns for details it skipped. An empty
/// context renders as `None yet` rather than `{}`.
pub fn extract_prompt(
    interpreted: &str,
    history: &str,
    category: &str,
    context: &Map<String, Value>,
) -> String {
    let collected = if context.is_empty() {
        "None yet".to_string()
    } else {
        serde_json::to_string_pretty(context).unwrap_or_default()
    };
    format!(
        "You are handling a banking request. Based on the category and information collected so far, determine what's needed next.\n\
         \n\
         Selected Category: {category}\n\
         \n\
         Customer's original message: {history}\n\
         \n\
         Interpreted intent: {interpreted}\n\
         \n\
         Information already collected: \n\
         {collected}\n\
         \n\
         Task: \n\
         1. If you need more information to process this request, ask ONE specific follow-up question\n\
         2. If you have enough information, acknowledge this and prepare to resolve the request\n\
         3. Extract any new details from the customer's message\n\
         \n\
         {EXTRACTION_FORMAT}"
    )
}

/// Stage five: produce the final customer-facing resolution.
pub fn resolve_prompt(category: &str, context: &Map<String, Value>) -> String {
    let collected = serde_json::to_string_pretty(context).unwrap_or_default();
    format!(
        "You are a professional banking assistant. Generate a helpful, friendly response to satisfy the customer.\n\
         \n\
         Request Category: {category}\n\
         \n\
         Collected Information:\n\
         {collected}\n\
         \n\
         Generate a concise, professional response that:\n\
         1. Confirms what action you're taking or what information you're providing\n\
         2. Addresses the customer's needs based on the category\n\
         3. Is warm and reassuring\n\
         4. Ends with an offer to help further if needed\n\
         \n\
         Keep it short and natural."
    )
}

// ---------------------------------------------------------------------------
// Stage runners
// ---------------------------------------------------------------------------

/// Run stage one against the gateway.
pub async fn interpret_intent<G: CompletionGateway>(
    gateway: &G,
    user_input: &str,
) -> Result<String, GatewayError> {
    run(gateway, "interpret_intent", &interpret_prompt(user_input)).await
}

/// Run stage two against the gateway.
pub async fn suggest_categories<G: CompletionGateway>(
    gateway: &G,
    interpreted: &str,
) -> Result<String, GatewayError> {
    run(gateway, "suggest_categories", &categories_prompt(interpreted)).await
}

/// Run stage three against the gateway.
pub async fn select_category<G: CompletionGateway>(
    gateway: &G,
    interpreted: &str,
    suggested: &str,
) -> Result<String, GatewayError> {
    run(gateway, "select_category", &select_prompt(interpreted, suggested)).await
}

/// Run stage four against the gateway.
pub async fn extract_details<G: CompletionGateway>(
    gateway: &G,
    interpreted: &str,
    history: &str,
    category: &str,
    context: &Map<String, Value>,
) -> Result<String, GatewayError> {
    let prompt = extract_prompt(interpreted, history, category, context);
    run(gateway, "extract_details", &prompt).await
}

/// Run stage five against the gateway.
pub async fn generate_resolution<G: CompletionGateway>(
    gateway: &G,
    category: &str,
    context: &Map<String, Value>,
) -> Result<String, GatewayError> {
    run(gateway, "generate_resolution", &resolve_prompt(category, context)).await
}

/// Shared completion path: every stage call goes out under a
/// `gen_ai.complete` span and comes back whitespace-trimmed.
async fn run<G: CompletionGateway>(
    gateway: &G,
    stage: &'static str,
    prompt: &str,
) -> Result<String, GatewayError> {
    let span = tracing::info_span!(
        "gen_ai.complete",
        gen_ai.system = gateway.name(),
        gen_ai.operation.name = stage,
    );
    let text = gateway.complete(prompt).instrument(span).await?;
    Ok(text.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tellerchain_types::category::CATEGORIES;

    struct FixedGateway(&'static str);

    impl CompletionGateway for FixedGateway {
        fn name(&self) -> &str {
            "fixed"
        }

        async fn complete(&self, _prompt: &str) -> Result<String, GatewayError> {
            Ok(self.0.to_string())
        }
    }

    #[test]
    fn test_interpret_prompt_embeds_message() {
        let prompt = interpret_prompt("I lost my card");
        assert!(prompt.starts_with("You are a Bank Assistant."));
        assert!(prompt.contains("Customer message: I lost my card\n"));
        assert!(prompt.ends_with("Be specific and professional."));
    }

    #[test]
    fn test_categories_prompt_lists_every_category() {
        let prompt = categories_prompt("Customer wants to open an account");
        for name in CATEGORIES {
            assert!(prompt.contains(&format!("- {name}\n")), "missing {name}");
        }
        assert!(prompt.contains("Interpreted customer request: \n"));
        assert!(prompt.contains("Customer wants to open an account"));
    }

    #[test]
    fn test_select_prompt_carries_suggestions_and_intent() {
        let prompt = select_prompt("Needs a statement", "- Account Statement\n- Billing Issue");
        assert!(prompt.contains("Suggested Categories:\n- Account Statement\n- Billing Issue\n"));
        // No trailing space on this label, unlike the stage-two prompt.
        assert!(prompt.contains("Interpreted customer request:\nNeeds a statement"));
        assert!(prompt.ends_with("nothing else."));
    }

    #[test]
    fn test_extract_prompt_empty_context_reads_none_yet() {
        let prompt = extract_prompt("intent", "hello", "Card Services", &Map::new());
        assert!(prompt.contains("Information already collected: \nNone yet\n"));
        assert!(prompt.contains("Selected Category: Card Services\n"));
        assert!(prompt.contains("\"status\": \"needs_info\" or \"ready_to_resolve\""));
    }

    #[test]
    fn test_extract_prompt_renders_context_as_pretty_json() {
        let mut context = Map::new();
        context.insert("account_type".to_string(), Value::String("checking".into()));
        let prompt = extract_prompt("intent", "hello", "Account Opening", &context);
        assert!(prompt.contains("{\n  \"account_type\": \"checking\"\n}"));
    }

    #[test]
    fn test_extract_prompt_history_keeps_turn_boundaries() {
        let history = "I want a loan\nA car loan, about 20k";
        let prompt = extract_prompt("intent", history, "Loan Inquiry", &Map::new());
        assert!(prompt.contains("Customer's original message: I want a loan\nA car loan, about 20k\n"));
    }

    #[test]
    fn test_resolve_prompt_serializes_even_empty_context() {
        let prompt = resolve_prompt("General Information", &Map::new());
        assert!(prompt.contains("Collected Information:\n{}\n"));
        assert!(prompt.contains("Request Category: General Information\n"));
        assert!(prompt.ends_with("Keep it short and natural."));
    }

    #[tokio::test]
    async fn test_runner_trims_completion_text() {
        let gateway = FixedGateway("  The customer wants a new card.\n\n");
        let text = interpret_intent(&gateway, "card please").await.unwrap();
        assert_eq!(text, "The customer wants a new card.");
    }
}

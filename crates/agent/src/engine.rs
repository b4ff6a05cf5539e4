use std::sync::Arc;

use serde_json::Value;
use smartshop_core::{
    normalize, score_fallback, RecommendationResult, Role, SnapshotEntry, Turn,
    DEFAULT_FOLLOW_UP_QUESTION,
};
use tracing::debug;

use crate::llm::GenerativeBackend;

const PROMPT_INSTRUCTIONS: &str = "You are an e-commerce recommendation assistant. \
Given INVENTORY (JSON array) + USER_PREFERENCE choose up to 3 items. \
Return ONLY JSON: {\"recommendations\":[{\"item_id\":\"...\",\"reason\":\"...\",\"match_score\":0-100}],\
\"follow_up_question\":\"...\"}. If nothing matches, recommendations=[] and ask clarifying follow_up_question.";

/// Tagged outcome of the backend stage. The fallback scorer runs only on
/// `Failed`, which keeps the decision point testable in isolation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BackendOutcome {
    Parsed(Value),
    Failed(String),
}

/// Produces ranked, bounded recommendations from conversation history plus a
/// fresh inventory snapshot, delegating to the generative backend and
/// degrading to the deterministic keyword scorer on any failure.
pub struct RecommendationEngine {
    backend: Arc<dyn GenerativeBackend>,
    model: String,
}

impl RecommendationEngine {
    pub fn new(backend: Arc<dyn GenerativeBackend>, model: impl Into<String>) -> Self {
        Self { backend, model: model.into() }
    }

    pub async fn recommend(
        &self,
        history: &[Turn],
        snapshot: &[SnapshotEntry],
    ) -> RecommendationResult {
        let preference = latest_preference(history);

        // Nothing to recommend from; skip the backend entirely.
        if snapshot.is_empty() {
            return RecommendationResult::empty(DEFAULT_FOLLOW_UP_QUESTION);
        }

        match self.query_backend(preference, snapshot).await {
            BackendOutcome::Parsed(parsed) => {
                let mut result = normalize::sanitize(&parsed);
                result
                    .recommendations
                    .retain(|candidate| snapshot.iter().any(|entry| entry.item_id == candidate.item_id));
                result
            }
            BackendOutcome::Failed(reason) => {
                debug!(%reason, "backend unusable, engaging keyword fallback");
                score_fallback(preference, snapshot)
            }
        }
    }

    /// Backend stage: prompt assembly, single attempt, JSON object location,
    /// parse. Any miss is reported as `Failed` with the reason.
    pub async fn query_backend(
        &self,
        preference: &str,
        snapshot: &[SnapshotEntry],
    ) -> BackendOutcome {
        let prompt = build_prompt(preference, snapshot);

        let raw = match self.backend.generate(&self.model, &prompt).await {
            Ok(text) => text,
            Err(error) => return BackendOutcome::Failed(format!("backend call failed: {error}")),
        };
        if raw.trim().is_empty() {
            return BackendOutcome::Failed("backend returned empty text".to_string());
        }

        let Some(candidate_json) = normalize::locate_json_object(&raw) else {
            return BackendOutcome::Failed("no JSON object in backend text".to_string());
        };
        match serde_json::from_str(candidate_json) {
            Ok(parsed) => BackendOutcome::Parsed(parsed),
            Err(error) => BackendOutcome::Failed(format!("JSON parse failed: {error}")),
        }
    }
}

/// Most recent user-authored message, or empty when there is none.
fn latest_preference(history: &[Turn]) -> &str {
    history
        .iter()
        .rev()
        .find(|turn| turn.role == Role::User)
        .map(|turn| turn.content.as_str())
        .unwrap_or("")
}

fn build_prompt(preference: &str, snapshot: &[SnapshotEntry]) -> String {
    let inventory = serde_json::to_string(snapshot).unwrap_or_else(|_| "[]".to_string());
    format!(
        "{PROMPT_INSTRUCTIONS}\nINVENTORY:\n{inventory}\nUSER_PREFERENCE:\n{preference}\nRespond ONLY with JSON:"
    )
}

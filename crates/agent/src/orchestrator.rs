use std::sync::Arc;

use serde::Serialize;
use smartshop_core::{
    build_snapshot, is_off_topic, AssistantConfig, ChatError, Item, ItemId, RecommendationResult,
    RetailerId, SnapshotEntry, Turn,
};
use tracing::warn;

use crate::engine::RecommendationEngine;
use crate::llm::GenerativeBackend;
use crate::session::SessionStore;

/// Follow-up used when the classifier short-circuits an off-topic message.
const OFF_TOPIC_FOLLOW_UP: &str =
    "I can help with products in our store. What kind of item are you looking for?";

/// Canned reply when the stateful chat backend fails.
const CHAT_APOLOGY: &str =
    "Sorry, I'm having a little trouble thinking right now. Please try again in a moment.";

/// Fallback context when no catalog item matches the user's words.
const NO_MATCH_CONTEXT: &str = "No specific products found for that query. You can ask the user \
for more details, like their budget or preferred features.";

/// Items rendered into the context block for the stateful chat mode.
const MAX_CONTEXT_ITEMS: usize = 5;

/// Context words at or below this length are ignored.
const MIN_CONTEXT_WORD_CHARS: usize = 2;

/// Read-mostly view of the item catalog. The core never creates, updates, or
/// deletes items through this interface.
pub trait CatalogProvider: Send + Sync {
    fn list_items(&self) -> Vec<Item>;
    fn get_item(&self, retailer: &RetailerId, item_id: &ItemId) -> Option<Item>;
}

/// Builds stable external product references for display enrichment.
pub trait LinkResolver: Send + Sync {
    fn product_link(&self, retailer: &RetailerId, item_id: &ItemId) -> String;
}

/// A candidate enriched for display. Fields resolved from the catalog are
/// optional: a lookup miss omits them rather than failing the response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EnrichedCandidate {
    pub item_id: String,
    pub retailer: Option<String>,
    pub name: Option<String>,
    pub link: Option<String>,
    pub reason: String,
    pub match_score: u8,
}

/// What a chat request resolves to: the (possibly fresh) session id plus the
/// enriched structured result.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChatOutcome {
    pub session_id: String,
    pub recommendations: Vec<EnrichedCandidate>,
    pub follow_up_question: String,
}

/// Per-request wiring: session resolution, classification, recommendation,
/// enrichment, and history bookkeeping.
pub struct ChatOrchestrator {
    sessions: Arc<SessionStore>,
    backend: Arc<dyn GenerativeBackend>,
    catalog: Arc<dyn CatalogProvider>,
    links: Arc<dyn LinkResolver>,
    engine: RecommendationEngine,
    chat_model: String,
}

impl ChatOrchestrator {
    pub fn new(
        config: &AssistantConfig,
        backend: Arc<dyn GenerativeBackend>,
        sessions: Arc<SessionStore>,
        catalog: Arc<dyn CatalogProvider>,
        links: Arc<dyn LinkResolver>,
    ) -> Self {
        let engine = RecommendationEngine::new(Arc::clone(&backend), &config.llm.recommend_model);
        Self { sessions, backend, catalog, links, engine, chat_model: config.llm.chat_model.clone() }
    }

    /// Structured recommendation mode.
    ///
    /// Empty messages are the only hard error; backend and catalog problems
    /// all degrade to a well-formed result.
    pub async fn handle_message(
        &self,
        session_id: Option<&str>,
        message: &str,
    ) -> Result<ChatOutcome, ChatError> {
        let message = message.trim();
        if message.is_empty() {
            return Err(ChatError::EmptyMessage);
        }

        let (session_id, _) = self.sessions.resolve_or_create(session_id);

        if is_off_topic(message) {
            let result = RecommendationResult::empty(OFF_TOPIC_FOLLOW_UP);
            self.sessions.append_turn(&session_id, Turn::user(message));
            self.append_result_turn(&session_id, &result);
            return Ok(ChatOutcome {
                session_id,
                recommendations: Vec::new(),
                follow_up_question: result.follow_up_question,
            });
        }

        self.sessions.append_turn(&session_id, Turn::user(message));
        let history =
            self.sessions.get(&session_id).map(|conversation| conversation.turns).unwrap_or_default();

        // Always a fresh projection, so recommendations see the live catalog.
        let snapshot = build_snapshot(&self.catalog.list_items());
        let result = self.engine.recommend(&history, &snapshot).await;
        self.append_result_turn(&session_id, &result);

        let recommendations =
            enrich_candidates(self.catalog.as_ref(), self.links.as_ref(), &snapshot, &result);
        Ok(ChatOutcome { session_id, recommendations, follow_up_question: result.follow_up_question })
    }

    /// Stateful free-text mode: forwards the full history plus a freshly
    /// computed product context and returns plain text.
    pub async fn converse(
        &self,
        session_id: Option<&str>,
        message: &str,
    ) -> Result<(String, String), ChatError> {
        let message = message.trim();
        if message.is_empty() {
            return Err(ChatError::EmptyMessage);
        }

        let (session_id, conversation) = self.sessions.resolve_or_create(session_id);
        let context = build_product_context(message, &self.catalog.list_items());
        let prompt = frame_context_prompt(message, &context);

        let reply = match self
            .backend
            .continue_chat(&self.chat_model, &conversation.turns, &prompt)
            .await
        {
            Ok(text) => text,
            Err(error) => {
                warn!(%error, "stateful chat backend failed");
                CHAT_APOLOGY.to_string()
            }
        };

        self.sessions.append_turn(&session_id, Turn::user(message));
        self.sessions.append_turn(&session_id, Turn::model(reply.clone()));
        Ok((session_id, reply))
    }

    fn append_result_turn(&self, session_id: &str, result: &RecommendationResult) {
        let serialized = serde_json::to_string(result).unwrap_or_else(|_| "{}".to_string());
        self.sessions.append_turn(session_id, Turn::model(serialized));
    }
}

/// Resolves display name and deep link for each candidate. The snapshot
/// provides the owning retailer; the live catalog is consulted for the
/// current display name, falling back to the snapshot's copy. An id missing
/// from the snapshot leaves the enrichment fields unset.
pub(crate) fn enrich_candidates(
    catalog: &dyn CatalogProvider,
    links: &dyn LinkResolver,
    snapshot: &[SnapshotEntry],
    result: &RecommendationResult,
) -> Vec<EnrichedCandidate> {
    result
        .recommendations
        .iter()
        .map(|candidate| {
            let entry = snapshot.iter().find(|entry| entry.item_id == candidate.item_id);
            let (retailer, name, link) = match entry {
                Some(entry) => {
                    let retailer_id = RetailerId(entry.retailer.clone());
                    let item_id = ItemId(candidate.item_id.clone());
                    let name = catalog
                        .get_item(&retailer_id, &item_id)
                        .map(|item| item.name)
                        .unwrap_or_else(|| entry.name.clone());
                    let link = links.product_link(&retailer_id, &item_id);
                    (Some(entry.retailer.clone()), Some(name), Some(link))
                }
                None => (None, None, None),
            };

            EnrichedCandidate {
                item_id: candidate.item_id.clone(),
                retailer,
                name,
                link,
                reason: candidate.reason.clone(),
                match_score: candidate.match_score,
            }
        })
        .collect()
}

/// Builds the textual product context for the stateful chat mode: lowercase
/// words of the message longer than two characters are substring-matched
/// against each item's name, category, full description, and tags; up to
/// five matches are serialized as short bullet entries.
pub fn build_product_context(message: &str, items: &[Item]) -> String {
    let message = message.to_lowercase();
    let words: Vec<&str> = message
        .split_whitespace()
        .filter(|word| word.chars().count() > MIN_CONTEXT_WORD_CHARS)
        .collect();

    let mut matched = Vec::new();
    if !words.is_empty() {
        for item in items {
            let blob = format!(
                "{} {} {} {}",
                item.name,
                item.category,
                item.description_full,
                item.tags.join(" ")
            )
            .to_lowercase();
            if words.iter().any(|word| blob.contains(word)) {
                matched.push(item);
            }
        }
    }

    if matched.is_empty() {
        return NO_MATCH_CONTEXT.to_string();
    }

    let mut context = String::from("Here are some relevant products from the store:\n\n");
    for item in matched.into_iter().take(MAX_CONTEXT_ITEMS) {
        context.push_str(&format!(
            "- Name: {}\n  Price: ${:.2}\n  Description: {}\n\n",
            item.name, item.price, item.description_short
        ));
    }
    context
}

fn frame_context_prompt(message: &str, context: &str) -> String {
    format!(
        "Based ONLY on the CONTEXT below and our conversation history, provide a conversational \
answer to my latest message.\nDo not mention products that are not in the context. If no products \
match, say so politely.\n\nCONTEXT FROM STORE INVENTORY:\n---\n{context}\n---\n\nMy latest message \
is: \"{message}\""
    )
}

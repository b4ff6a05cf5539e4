use std::sync::Arc;

use tracing::debug;

use crate::llm::GenerativeBackend;

const FAQ_SCOPE: &str = "You are a concise FAQ assistant for an e-commerce site (accounts, \
product listing, browsing, AI recommendations, purchase flow). If out of scope respond exactly: \
'I can help only with platform usage, accounts, products, and purchase requests.' Max 120 words.";

const OUT_OF_SCOPE_REPLY: &str =
    "I can help only with platform usage, accounts, products, and purchase requests.";

const MAX_ANSWER_CHARS: usize = 600;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FaqEntry {
    pub question: String,
    pub answer: String,
}

impl FaqEntry {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self { question: question.into(), answer: answer.into() }
    }
}

/// Answers platform-usage questions against a static reference list, with
/// the generative backend providing phrasing and a substring lookup as the
/// offline fallback.
pub struct FaqAssistant {
    backend: Arc<dyn GenerativeBackend>,
    model: String,
}

impl FaqAssistant {
    pub fn new(backend: Arc<dyn GenerativeBackend>, model: impl Into<String>) -> Self {
        Self { backend, model: model.into() }
    }

    /// The seed reference list shipped with the platform.
    pub fn default_entries() -> Vec<FaqEntry> {
        vec![
            FaqEntry::new("How do I register?", "Use Register and choose a role."),
            FaqEntry::new(
                "How do I upload a product?",
                "Retailers upload from the store panel.",
            ),
            FaqEntry::new(
                "How does AI recommend items?",
                "It matches your stated preferences to item metadata.",
            ),
            FaqEntry::new(
                "How do I request a purchase?",
                "Open a product and click Buy Now.",
            ),
            FaqEntry::new(
                "Can I rate recommendations?",
                "Yes, via the popup after each recommendation response.",
            ),
        ]
    }

    /// Answers a question, truncated to 600 characters. Backend failure or
    /// an empty reply degrades to [`static_answer`].
    pub async fn answer(&self, question: &str, reference: &[FaqEntry]) -> String {
        let prompt = build_faq_prompt(question, reference);
        match self.backend.generate(&self.model, &prompt).await {
            Ok(raw) if !raw.trim().is_empty() => raw.trim().chars().take(MAX_ANSWER_CHARS).collect(),
            Ok(_) => static_answer(question, reference),
            Err(error) => {
                debug!(%error, "faq backend failed, using static reference");
                static_answer(question, reference)
            }
        }
    }
}

fn build_faq_prompt(question: &str, reference: &[FaqEntry]) -> String {
    let reference_block = reference
        .iter()
        .map(|entry| format!("Q:{}\nA:{}", entry.question, entry.answer))
        .collect::<Vec<_>>()
        .join("\n");
    format!("{FAQ_SCOPE}\nREFERENCE FAQ:\n{reference_block}\nUSER QUESTION:\n{question}\nAnswer:")
}

/// Offline lookup: the first reference question contained (case-insensitive)
/// in the user text wins; otherwise the canned out-of-scope line.
pub fn static_answer(question: &str, reference: &[FaqEntry]) -> String {
    let question = question.to_lowercase();
    reference
        .iter()
        .find(|entry| question.contains(&entry.question.to_lowercase()))
        .map(|entry| entry.answer.clone())
        .unwrap_or_else(|| OUT_OF_SCOPE_REPLY.to_string())
}

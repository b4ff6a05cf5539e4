//! SmartShop Agent - conversational recommendation runtime
//!
//! This crate ties the deterministic core to the generative backend:
//! - `GenerativeBackend` - pluggable trait for the text-generation service
//! - `GeminiClient` - HTTP implementation over the Gemini REST API
//! - `RecommendationEngine` - prompt assembly, response repair, keyword fallback
//! - `SessionStore` - lock-guarded in-memory conversation state
//! - `ChatOrchestrator` - per-request wiring of the above
//! - `FaqAssistant` - scoped FAQ answers with a static fallback
//!
//! # Degradation principle
//!
//! The backend is strictly optional. Every failure mode (missing key,
//! timeout, non-success status, malformed payload) is recovered locally, so
//! callers always receive a well-formed reply.

pub mod engine;
pub mod faq;
pub mod gemini;
pub mod llm;
pub mod orchestrator;
pub mod session;

pub use engine::{BackendOutcome, RecommendationEngine};
pub use faq::{FaqAssistant, FaqEntry};
pub use gemini::GeminiClient;
pub use llm::GenerativeBackend;
pub use orchestrator::{
    build_product_context, CatalogProvider, ChatOrchestrator, ChatOutcome, EnrichedCandidate,
    LinkResolver,
};
pub use session::SessionStore;

//! SmartShop Core - marketplace domain logic
//!
//! This crate holds the deterministic heart of the SmartShop assistant:
//! - Catalog domain types (items, conversations, recommendations)
//! - Inventory snapshot projection for prompting
//! - Off-topic query classification
//! - Keyword fallback scoring used when the generative backend is unavailable
//! - Response normalization for untrusted backend output
//!
//! Everything here is pure and synchronous. Network access, session state,
//! and orchestration live in the `smartshop-agent` crate.

pub mod classifier;
pub mod config;
pub mod domain;
pub mod errors;
pub mod normalize;
pub mod scoring;
pub mod snapshot;

pub use classifier::is_off_topic;
pub use config::{AssistantConfig, ConfigError, LlmConfig};
pub use domain::conversation::{Conversation, Role, Turn};
pub use domain::item::{Item, ItemId, RetailerId};
pub use domain::recommendation::{
    Candidate, RecommendationResult, DEFAULT_FOLLOW_UP_QUESTION, DEFAULT_REASON,
    FALLBACK_FOLLOW_UP_QUESTION, MAX_CANDIDATES, MAX_REASON_CHARS,
};
pub use errors::ChatError;
pub use normalize::sanitize;
pub use scoring::score_fallback;
pub use snapshot::{build_snapshot, SnapshotEntry};

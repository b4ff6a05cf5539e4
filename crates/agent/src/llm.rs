use anyhow::Result;
use async_trait::async_trait;
use smartshop_core::Turn;

/// Pluggable interface to the external text-generation service.
///
/// Implementations own their timeout; the runtime makes a single attempt per
/// user-facing call and treats every `Err` uniformly as a recoverable
/// failure, with no differentiated retry per error class.
#[async_trait]
pub trait GenerativeBackend: Send + Sync {
    /// One-shot generation for a fully assembled prompt.
    async fn generate(&self, model: &str, prompt: &str) -> Result<String>;

    /// Stateful chat: the ordered turn history plus a new message.
    async fn continue_chat(&self, model: &str, history: &[Turn], message: &str) -> Result<String>;
}

use thiserror::Error;

/// Errors surfaced at the chat orchestrator boundary.
///
/// Backend failures and malformed payloads are deliberately absent: they are
/// recovered internally (fallback scorer, response normalizer, canned
/// replies) and callers always receive a well-formed result.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ChatError {
    #[error("message cannot be empty")]
    EmptyMessage,
}

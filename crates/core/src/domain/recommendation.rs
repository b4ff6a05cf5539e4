use serde::{Deserialize, Serialize};

/// Upper bound on candidates returned per recommendation.
pub const MAX_CANDIDATES: usize = 3;

/// Upper bound on the length of a candidate's reason text.
pub const MAX_REASON_CHARS: usize = 300;

/// Reason substituted when the backend gives none.
pub const DEFAULT_REASON: &str = "Relevant match";

/// Follow-up substituted when the backend omits one or sends a non-string.
pub const DEFAULT_FOLLOW_UP_QUESTION: &str =
    "Would you like more details or a different type of item?";

/// Follow-up used by the deterministic keyword fallback.
pub const FALLBACK_FOLLOW_UP_QUESTION: &str =
    "Would you like something different or more details?";

/// One recommended item with its justification and score.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub item_id: String,
    pub reason: String,
    pub match_score: u8,
}

/// The structured payload the assistant returns for product queries.
/// At most [`MAX_CANDIDATES`] entries; every `match_score` is in 0..=100.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationResult {
    pub recommendations: Vec<Candidate>,
    pub follow_up_question: String,
}

impl RecommendationResult {
    /// An empty result carrying the given follow-up question.
    pub fn empty(follow_up_question: impl Into<String>) -> Self {
        Self { recommendations: Vec::new(), follow_up_question: follow_up_question.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::{Candidate, RecommendationResult};

    #[test]
    fn empty_result_keeps_follow_up() {
        let result = RecommendationResult::empty("What are you shopping for?");
        assert!(result.recommendations.is_empty());
        assert_eq!(result.follow_up_question, "What are you shopping for?");
    }

    #[test]
    fn result_round_trips_through_json() {
        let result = RecommendationResult {
            recommendations: vec![Candidate {
                item_id: "a".to_string(),
                reason: "Keyword relevance".to_string(),
                match_score: 40,
            }],
            follow_up_question: "Anything else?".to_string(),
        };

        let serialized = serde_json::to_string(&result).expect("serialize");
        let parsed: RecommendationResult = serde_json::from_str(&serialized).expect("parse");
        assert_eq!(parsed, result);
    }
}

use serde_json::Value;

use crate::domain::recommendation::{
    Candidate, RecommendationResult, DEFAULT_FOLLOW_UP_QUESTION, DEFAULT_REASON, MAX_CANDIDATES,
    MAX_REASON_CHARS,
};

/// Locates the JSON object inside raw backend text.
///
/// Prefers the case where the trimmed text is itself exactly one object;
/// otherwise takes the span from the first `{` to the last `}`. Returns
/// `None` when no such span exists. Parsing is left to the caller.
pub fn locate_json_object(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    if trimmed.starts_with('{') && trimmed.ends_with('}') {
        return Some(trimmed);
    }
    let start = trimmed.find('{')?;
    let end = trimmed.rfind('}')?;
    if end > start {
        Some(&trimmed[start..=end])
    } else {
        None
    }
}

/// Validates and repairs parsed backend output into a well-formed result.
///
/// Total over arbitrary JSON shapes: missing keys, wrong types, oversized
/// lists, and out-of-range scores all normalize cleanly. The first
/// [`MAX_CANDIDATES`] entries are considered (preserving relative order),
/// then entries without a usable item id are dropped and repeated item ids
/// are removed keeping the first occurrence.
pub fn sanitize(parsed: &Value) -> RecommendationResult {
    let mut recommendations: Vec<Candidate> = Vec::new();

    if let Some(entries) = parsed.get("recommendations").and_then(Value::as_array) {
        for entry in entries.iter().take(MAX_CANDIDATES) {
            let Some(candidate) = sanitize_entry(entry) else { continue };
            if recommendations.iter().any(|existing| existing.item_id == candidate.item_id) {
                continue;
            }
            recommendations.push(candidate);
        }
    }

    let follow_up_question = parsed
        .get("follow_up_question")
        .and_then(Value::as_str)
        .unwrap_or(DEFAULT_FOLLOW_UP_QUESTION)
        .to_string();

    RecommendationResult { recommendations, follow_up_question }
}

fn sanitize_entry(entry: &Value) -> Option<Candidate> {
    let object = entry.as_object()?;

    let item_id = object.get("item_id").and_then(Value::as_str)?.to_string();
    if item_id.is_empty() {
        return None;
    }

    let reason: String = object
        .get("reason")
        .and_then(Value::as_str)
        .unwrap_or("")
        .trim()
        .chars()
        .take(MAX_REASON_CHARS)
        .collect();
    let reason = if reason.is_empty() { DEFAULT_REASON.to_string() } else { reason };

    Some(Candidate { item_id, reason, match_score: coerce_score(object.get("match_score")) })
}

/// Integers, truncated floats, and numeric strings all count; anything else
/// is 0. The final value is clamped to 0..=100.
fn coerce_score(raw: Option<&Value>) -> u8 {
    let score = match raw {
        Some(Value::Number(number)) => {
            number.as_i64().or_else(|| number.as_f64().map(|float| float as i64)).unwrap_or(0)
        }
        Some(Value::String(text)) => text.trim().parse::<i64>().unwrap_or(0),
        _ => 0,
    };
    score.clamp(0, 100) as u8
}

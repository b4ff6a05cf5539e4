/// Chit-chat phrases that signal a non-product query.
const NON_PRODUCT_PATTERNS: &[&str] = &[
    "what's my name",
    "whats my name",
    "who am i",
    "how are you",
    "tell me a joke",
    "my name",
    "who are you",
];

/// Product-domain keywords that override a chit-chat match.
const PRODUCT_KEYWORDS: &[&str] = &[
    "tech", "clothing", "furniture", "item", "product", "buy", "price", "laptop", "shirt",
    "table", "phone", "keyboard",
];

/// Two-list heuristic: a message is off-topic only when it matches a
/// chit-chat pattern and contains no product keyword. Not NLP; false
/// positives and negatives are acceptable.
pub fn is_off_topic(message: &str) -> bool {
    let normalized = message.to_lowercase();
    let normalized = normalized.trim();

    NON_PRODUCT_PATTERNS.iter().any(|pattern| normalized.contains(pattern))
        && !PRODUCT_KEYWORDS.iter().any(|keyword| normalized.contains(keyword))
}

use crate::domain::recommendation::{
    Candidate, RecommendationResult, FALLBACK_FOLLOW_UP_QUESTION, MAX_CANDIDATES,
};
use crate::snapshot::SnapshotEntry;

/// Points awarded per keyword occurrence.
const OCCURRENCE_WEIGHT: usize = 10;

/// Preference words at or below this length are ignored.
const MIN_KEYWORD_CHARS: usize = 3;

/// Deterministic keyword scorer used whenever the generative backend yields
/// no usable structured result.
///
/// Keywords are the lowercase whitespace-separated words of the preference
/// text longer than three characters. Each entry is scored 10x the total
/// occurrence count of those keywords in its name, category, tags, and short
/// description. Ties keep snapshot order; at most three entries are returned
/// with scores clamped to 100.
pub fn score_fallback(preference: &str, snapshot: &[SnapshotEntry]) -> RecommendationResult {
    let preference = preference.to_lowercase();
    let keywords: Vec<&str> =
        preference.split_whitespace().filter(|word| word.chars().count() > MIN_KEYWORD_CHARS).collect();

    let mut scored: Vec<(usize, &SnapshotEntry)> = snapshot
        .iter()
        .map(|entry| (keyword_score(&keywords, entry), entry))
        .collect();
    scored.sort_by(|a, b| b.0.cmp(&a.0));

    let recommendations = scored
        .into_iter()
        .take(MAX_CANDIDATES)
        .map(|(score, entry)| Candidate {
            item_id: entry.item_id.clone(),
            reason: if score > 0 { "Keyword relevance" } else { "General fit" }.to_string(),
            match_score: score.min(100) as u8,
        })
        .collect();

    RecommendationResult {
        recommendations,
        follow_up_question: FALLBACK_FOLLOW_UP_QUESTION.to_string(),
    }
}

fn keyword_score(keywords: &[&str], entry: &SnapshotEntry) -> usize {
    let blob = format!(
        "{} {} {} {}",
        entry.name,
        entry.category,
        entry.tags.join(" "),
        entry.desc
    )
    .to_lowercase();

    keywords.iter().map(|keyword| blob.matches(keyword).count()).sum::<usize>() * OCCURRENCE_WEIGHT
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use crate::snapshot::SnapshotEntry;

    use super::score_fallback;

    fn entry(item_id: &str, name: &str, tags: &[&str], desc: &str) -> SnapshotEntry {
        SnapshotEntry {
            item_id: item_id.to_string(),
            name: name.to_string(),
            category: "tech".to_string(),
            price: Decimal::new(99_900, 2),
            tags: tags.iter().map(|tag| tag.to_string()).collect(),
            desc: desc.to_string(),
            retailer: "acme".to_string(),
        }
    }

    #[test]
    fn empty_preference_scores_everything_as_general_fit() {
        let snapshot = vec![
            entry("a", "Laptop X", &["laptop"], "A fast laptop"),
            entry("b", "Desk", &["wood"], "Solid desk"),
            entry("c", "Phone Y", &["phone"], "A phone"),
            entry("d", "Chair", &[], "A chair"),
        ];

        let result = score_fallback("", &snapshot);
        assert_eq!(result.recommendations.len(), 3);
        for candidate in &result.recommendations {
            assert_eq!(candidate.match_score, 0);
            assert_eq!(candidate.reason, "General fit");
        }
    }

    #[test]
    fn matching_keywords_rank_and_label_by_relevance() {
        let snapshot = vec![
            entry("desk", "Desk", &["wood"], "Solid desk"),
            entry("a", "Laptop X", &["laptop", "fast"], "A fast laptop"),
        ];

        let result = score_fallback("I want a fast laptop under 1000", &snapshot);
        let top = &result.recommendations[0];
        assert_eq!(top.item_id, "a");
        assert_eq!(top.reason, "Keyword relevance");
        assert!(top.match_score > 0);
    }

    #[test]
    fn short_words_are_not_keywords() {
        let snapshot = vec![entry("a", "Fan", &["fan"], "A fan")];
        // Every word is three chars or fewer, so no keywords survive.
        let result = score_fallback("fan top big", &snapshot);
        assert_eq!(result.recommendations[0].match_score, 0);
        assert_eq!(result.recommendations[0].reason, "General fit");
    }

    #[test]
    fn ties_preserve_snapshot_order() {
        let snapshot = vec![
            entry("first", "Laptop A", &[], "laptop"),
            entry("second", "Laptop B", &[], "laptop"),
            entry("third", "Laptop C", &[], "laptop"),
        ];

        let result = score_fallback("laptop", &snapshot);
        let ids: Vec<_> =
            result.recommendations.iter().map(|candidate| candidate.item_id.as_str()).collect();
        assert_eq!(ids, vec!["first", "second", "third"]);
    }

    #[test]
    fn scores_are_clamped_to_one_hundred() {
        let repeated = "laptop ".repeat(20);
        let snapshot = vec![entry("a", &repeated, &["laptop"], &repeated)];
        let result = score_fallback("laptop", &snapshot);
        assert_eq!(result.recommendations[0].match_score, 100);
    }

    #[test]
    fn empty_snapshot_returns_no_candidates() {
        let result = score_fallback("laptop", &[]);
        assert!(result.recommendations.is_empty());
        assert_eq!(
            result.follow_up_question,
            "Would you like something different or more details?"
        );
    }
}

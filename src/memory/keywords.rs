//! Keyword extraction and keyword-Jaccard similarity.
//!
//! Stands in for semantic similarity: records carry no embeddings, so relatedness
//! is measured by overlap of significant terms.

use std::collections::HashSet;

/// Function words dropped during extraction.
const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "is", "are", "was", "were", "be", "been", "being", "have", "has", "had",
    "do", "does", "did", "will", "would", "could", "should", "may", "might", "must", "shall",
    "can", "need", "dare", "ought", "used", "to", "of", "in", "for", "on", "with", "at", "by",
    "from", "as", "into", "through", "during", "before", "after", "above", "below", "between",
    "under", "again", "further", "then", "once", "and", "but", "or", "nor", "so", "yet", "both",
    "either", "neither", "not", "only", "own", "same", "than", "too", "very", "just", "also",
];

/// Lowercase, split on non-alphanumerics, drop short tokens and stop words.
pub fn extract_keywords(text: &str) -> HashSet<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|token| token.chars().count() > 2)
        .filter(|token| !STOP_WORDS.contains(token))
        .map(str::to_string)
        .collect()
}

/// `|a ∩ b| / |a ∪ b|`, or 0 when both sets are empty.
pub fn jaccard(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }
    a.intersection(b).count() as f64 / union as f64
}

/// Keyword-Jaccard similarity between two texts.
pub fn similarity(a: &str, b: &str) -> f64 {
    jaccard(&extract_keywords(a), &extract_keywords(b))
}

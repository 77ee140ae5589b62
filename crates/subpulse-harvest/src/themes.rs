//! Recurring-theme extraction over a community batch's combined text.

use std::collections::HashMap;

use subpulse_core::Theme;

use crate::clean::clean_text;

/// Themes returned per batch.
const TOP_N: usize = 10;

/// Minimum token length considered a theme candidate.
const MIN_TOKEN_LEN: usize = 4;

/// Common English stopwords plus Reddit/finance filler the original
/// pipeline excluded.
const STOPWORDS: &[&str] = &[
    // General English
    "about", "above", "after", "again", "against", "because", "been", "before", "being", "below",
    "between", "both", "cannot", "could", "does", "doing", "down", "during", "each", "from",
    "further", "have", "having", "here", "into", "itself", "more", "most", "once", "only", "other",
    "over", "same", "should", "some", "such", "than", "that", "their", "theirs", "them", "then",
    "there", "these", "they", "this", "those", "through", "under", "until", "very", "were", "what",
    "when", "where", "which", "while", "whom", "with", "your", "yours", "yourself",
    // Reddit/finance filler
    "like", "just", "going", "make", "will", "know", "think", "post", "reddit", "edit", "comment",
    "deleted", "removed", "thank", "thanks", "good", "really", "time", "want", "need", "well",
    "would",
];

/// Extract the batch's most frequent content words as themes.
///
/// Cleans and lowercases all texts, drops stopwords and tokens shorter than
/// four characters or containing non-alphabetic characters, counts the rest,
/// and returns the `TOP_N` most frequent terms (first-seen order on ties).
/// The caller copies the returned list onto every record of the batch.
#[must_use]
pub fn extract_themes(texts: &[String]) -> Vec<Theme> {
    if texts.is_empty() {
        return Vec::new();
    }

    let mut counts: HashMap<String, i64> = HashMap::new();
    let mut order: Vec<String> = Vec::new();

    for text in texts {
        let cleaned = clean_text(text).to_lowercase();
        for token in cleaned.split_whitespace() {
            let token = token.trim_matches(|c: char| !c.is_alphabetic());
            if token.len() < MIN_TOKEN_LEN
                || !token.chars().all(char::is_alphabetic)
                || STOPWORDS.contains(&token)
            {
                continue;
            }
            let entry = counts.entry(token.to_string()).or_insert(0);
            if *entry == 0 {
                order.push(token.to_string());
            }
            *entry += 1;
        }
    }

    let mut themes: Vec<Theme> = order
        .into_iter()
        .map(|term| {
            let frequency = counts.get(&term).copied().unwrap_or(0);
            Theme { term, frequency }
        })
        .collect();

    themes.sort_by(|a, b| b.frequency.cmp(&a.frequency));
    themes.truncate(TOP_N);
    themes
}

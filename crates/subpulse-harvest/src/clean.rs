//! Text normalization applied before scoring and theme extraction.

use std::sync::LazyLock;

use regex::Regex;

static URL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"http\S+").expect("valid regex"));
static SPECIAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s.,!?']").expect("valid regex"));
static SPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Strip URLs and special characters, collapse whitespace.
///
/// Keeps word characters, spaces, and basic sentence punctuation so the
/// scorer still sees sentence structure.
pub(crate) fn clean_text(text: &str) -> String {
    let without_urls = URL_RE.replace_all(text, "");
    let without_special = SPECIAL_RE.replace_all(&without_urls, "");
    SPACE_RE.replace_all(&without_special, " ").trim().to_string()
}

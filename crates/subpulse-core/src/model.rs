//! Core data types shared across the harvest, aggregation, and storage crates.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Categorical sentiment emitted by the upstream classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    /// Parse a classifier label string, case-insensitively.
    ///
    /// Returns `None` for labels outside the three known categories; such
    /// records are kept but excluded from distribution counts.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.to_ascii_uppercase().as_str() {
            "POSITIVE" => Some(Self::Positive),
            "NEGATIVE" => Some(Self::Negative),
            "NEUTRAL" => Some(Self::Neutral),
            _ => None,
        }
    }
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SentimentLabel::Positive => write!(f, "POSITIVE"),
            SentimentLabel::Negative => write!(f, "NEGATIVE"),
            SentimentLabel::Neutral => write!(f, "NEUTRAL"),
        }
    }
}

/// Engagement metrics carried on each post.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Engagement {
    /// Fraction of votes that were upvotes, in [0, 1].
    pub upvote_ratio: f64,
    /// Net vote score of the post.
    pub score: f64,
    /// Number of comments on the post.
    pub comment_count: i64,
}

/// A recurring term and its summed frequency.
///
/// Serializes as a `[term, frequency]` pair to match the storage format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub term: String,
    pub frequency: i64,
}

impl Serialize for Theme {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (&self.term, self.frequency).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Theme {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let (term, frequency) = <(String, i64)>::deserialize(deserializer)?;
        Ok(Theme { term, frequency })
    }
}

/// One scored post, the input unit of aggregation.
///
/// Produced by the harvest pipeline and consumed within a single run.
/// `themes` is batch-shared: the theme list is extracted once per community
/// batch and copied onto every record of that batch, so the aggregator's
/// frequency summation intentionally multiplies by the record count.
#[derive(Debug, Clone)]
pub struct SentimentRecord {
    /// Community the post came from. Records with an empty community are
    /// dropped by the aggregator.
    pub community: String,
    /// Continuous sentiment score, conventionally in [-1, 1].
    pub sentiment_score: f64,
    /// Categorical label; `None` when the classifier emitted an
    /// unrecognized label.
    pub category_label: Option<SentimentLabel>,
    /// Classifier confidence in [0, 1].
    pub category_confidence: f64,
    /// Mean sentiment of the post's comments, 0 if it has none.
    pub comment_sentiment_avg: f64,
    pub engagement: Engagement,
    pub themes: Vec<Theme>,
}

/// Percentage split of recognized sentiment labels within a community's day.
///
/// Percentages are taken over records with a *recognized* label, so the
/// three fields sum to 100 whenever at least one label was recognized and
/// are all 0 otherwise.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryDistribution {
    pub positive_pct: f64,
    pub negative_pct: f64,
    pub neutral_pct: f64,
}

/// Per-community, per-day aggregate persisted to storage.
///
/// `(community, date)` is the natural key: upserting the same pair twice
/// overwrites the stored row rather than duplicating it.
#[derive(Debug, Clone, PartialEq)]
pub struct CommunitySummary {
    pub community: String,
    pub date: NaiveDate,
    /// Mean `sentiment_score` across the day's records.
    pub sentiment_avg: f64,
    pub category_distribution: CategoryDistribution,
    /// Number of contributing records, including unrecognized-label ones.
    pub post_count: i64,
    /// Sum of `engagement.comment_count` over contributing records.
    pub comment_count: i64,
    pub avg_upvote_ratio: f64,
    pub avg_score: f64,
    /// At most 10 themes, descending by summed frequency.
    pub top_themes: Vec<Theme>,
    /// Signed day-over-day sentiment delta. 0.0 until reconciled against
    /// history, and 0.0 when no prior data exists.
    pub sentiment_trend: f64,
}

/// Externally observable result of one pipeline run.
#[derive(Debug, Clone, Serialize)]
pub struct RunStats {
    /// Communities that contributed records without a fetch/scoring failure.
    pub communities_processed: usize,
    /// Total records fed into aggregation.
    pub posts_analyzed: usize,
    /// Per-community failures plus sink write failures.
    pub errors: usize,
    pub duration_seconds: f64,
    pub finished_at: DateTime<Utc>,
}

//! Per-community daily aggregation of sentiment records.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use subpulse_core::{CategoryDistribution, CommunitySummary, SentimentLabel, SentimentRecord, Theme};

/// Maximum number of themes carried on a summary.
const TOP_THEMES_LIMIT: usize = 10;

/// Running per-community accumulator folded over the record stream.
#[derive(Debug, Default)]
struct CommunityAccumulator {
    sentiment_sum: f64,
    upvote_ratio_sum: f64,
    score_sum: f64,
    post_count: i64,
    comment_count: i64,
    positive: i64,
    negative: i64,
    neutral: i64,
    /// Themes in first-seen order; `theme_index` maps term to position.
    themes: Vec<Theme>,
    theme_index: HashMap<String, usize>,
}

impl CommunityAccumulator {
    fn fold(&mut self, record: &SentimentRecord) {
        self.sentiment_sum += record.sentiment_score;
        self.upvote_ratio_sum += record.engagement.upvote_ratio;
        self.score_sum += record.engagement.score;
        self.post_count += 1;
        self.comment_count += record.engagement.comment_count;

        // Unrecognized labels still count toward post_count but stay out of
        // the distribution buckets.
        match record.category_label {
            Some(SentimentLabel::Positive) => self.positive += 1,
            Some(SentimentLabel::Negative) => self.negative += 1,
            Some(SentimentLabel::Neutral) => self.neutral += 1,
            None => {}
        }

        // Themes are batch-shared across records, so identical terms recur
        // once per record; summing their frequencies here is intentional.
        for theme in &record.themes {
            if let Some(&idx) = self.theme_index.get(&theme.term) {
                self.themes[idx].frequency += theme.frequency;
            } else {
                self.theme_index
                    .insert(theme.term.clone(), self.themes.len());
                self.themes.push(theme.clone());
            }
        }
    }

    fn into_summary(self, community: String, date: NaiveDate) -> CommunitySummary {
        let recognized = self.positive + self.negative + self.neutral;
        #[allow(clippy::cast_precision_loss)]
        let category_distribution = if recognized > 0 {
            let denom = recognized as f64;
            CategoryDistribution {
                positive_pct: self.positive as f64 / denom * 100.0,
                negative_pct: self.negative as f64 / denom * 100.0,
                neutral_pct: self.neutral as f64 / denom * 100.0,
            }
        } else {
            CategoryDistribution::default()
        };

        // Stable sort keeps first-seen order for equal frequencies.
        let mut top_themes = self.themes;
        top_themes.sort_by(|a, b| b.frequency.cmp(&a.frequency));
        top_themes.truncate(TOP_THEMES_LIMIT);

        CommunitySummary {
            community,
            date,
            sentiment_avg: mean(self.sentiment_sum, self.post_count),
            category_distribution,
            post_count: self.post_count,
            comment_count: self.comment_count,
            avg_upvote_ratio: mean(self.upvote_ratio_sum, self.post_count),
            avg_score: mean(self.score_sum, self.post_count),
            top_themes,
            // Set by the trend reconciler once history is available.
            sentiment_trend: 0.0,
        }
    }
}

fn mean(sum: f64, count: i64) -> f64 {
    if count == 0 {
        0.0
    } else {
        #[allow(clippy::cast_precision_loss)]
        let denom = count as f64;
        sum / denom
    }
}

/// Fold a run's records into one [`CommunitySummary`] per community.
///
/// Records are grouped by `community`; a community absent from the input
/// produces no summary, and a record with an empty community is skipped
/// entirely. All averages are sum/count with a zero count yielding 0.0.
/// Category percentages are taken over records whose label matched one of
/// the three known categories; `post_count` counts every record regardless.
///
/// The returned map never contains a summary with `post_count == 0`, and
/// `sentiment_trend` is always 0.0 here — reconciliation against history is
/// a separate step (see [`crate::trend::reconcile`]).
#[must_use]
pub fn aggregate(
    records: &[SentimentRecord],
    as_of: NaiveDate,
) -> BTreeMap<String, CommunitySummary> {
    let mut groups: BTreeMap<String, CommunityAccumulator> = BTreeMap::new();

    for record in records {
        if record.community.is_empty() {
            tracing::debug!("skipping record with missing community");
            continue;
        }
        groups
            .entry(record.community.clone())
            .or_default()
            .fold(record);
    }

    groups
        .into_iter()
        .map(|(community, acc)| {
            let summary = acc.into_summary(community.clone(), as_of);
            (community, summary)
        })
        .collect()
}

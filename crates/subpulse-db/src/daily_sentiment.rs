//! Database operations for the `subreddit_daily_sentiment` table.

use chrono::{DateTime, Days, NaiveDate, Utc};
use sqlx::PgPool;
use subpulse_core::CommunitySummary;

use crate::DbError;

/// Days of prior summaries considered when computing a trend.
const HISTORY_WINDOW_DAYS: u64 = 30;

// ---------------------------------------------------------------------------
// Row type
// ---------------------------------------------------------------------------

/// A row from the `subreddit_daily_sentiment` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct DailySentimentRow {
    pub id: i64,
    pub subreddit_name: String,
    pub timestamp: NaiveDate,
    pub vader_avg: f64,
    pub roberta_positive_pct: f64,
    pub roberta_negative_pct: f64,
    pub roberta_neutral_pct: f64,
    pub post_count: i32,
    pub comment_count: i32,
    pub avg_upvote_ratio: f64,
    pub avg_score: f64,
    /// JSON array of `[term, frequency]` pairs, stored as text.
    pub top_themes: String,
    pub sentiment_trend: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// Upsert one community's daily summary, keyed by `(subreddit_name, timestamp)`.
///
/// Re-running the pipeline for the same day overwrites the existing row in
/// place, so repeated runs never duplicate or double-count.
///
/// # Errors
///
/// Returns [`DbError::ThemeJson`] if the theme list cannot be serialized, or
/// [`DbError::Sqlx`] if the upsert fails.
pub async fn upsert_daily_sentiment(
    pool: &PgPool,
    summary: &CommunitySummary,
) -> Result<(), DbError> {
    let top_themes = serde_json::to_string(&summary.top_themes)?;

    sqlx::query(
        "INSERT INTO subreddit_daily_sentiment \
             (subreddit_name, timestamp, vader_avg, \
              roberta_positive_pct, roberta_negative_pct, roberta_neutral_pct, \
              post_count, comment_count, avg_upvote_ratio, avg_score, \
              top_themes, sentiment_trend) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) \
         ON CONFLICT (subreddit_name, timestamp) DO UPDATE SET \
             vader_avg = EXCLUDED.vader_avg, \
             roberta_positive_pct = EXCLUDED.roberta_positive_pct, \
             roberta_negative_pct = EXCLUDED.roberta_negative_pct, \
             roberta_neutral_pct = EXCLUDED.roberta_neutral_pct, \
             post_count = EXCLUDED.post_count, \
             comment_count = EXCLUDED.comment_count, \
             avg_upvote_ratio = EXCLUDED.avg_upvote_ratio, \
             avg_score = EXCLUDED.avg_score, \
             top_themes = EXCLUDED.top_themes, \
             sentiment_trend = EXCLUDED.sentiment_trend, \
             updated_at = NOW()",
    )
    .bind(&summary.community)
    .bind(summary.date)
    .bind(summary.sentiment_avg)
    .bind(summary.category_distribution.positive_pct)
    .bind(summary.category_distribution.negative_pct)
    .bind(summary.category_distribution.neutral_pct)
    .bind(i32::try_from(summary.post_count).unwrap_or(i32::MAX))
    .bind(i32::try_from(summary.comment_count).unwrap_or(i32::MAX))
    .bind(summary.avg_upvote_ratio)
    .bind(summary.avg_score)
    .bind(top_themes)
    .bind(summary.sentiment_trend)
    .execute(pool)
    .await?;

    Ok(())
}

/// Fetch a community's stored daily averages from the trailing 30-day window.
///
/// Returns `(date, sentiment_avg)` pairs with `date < today`, newest first —
/// the history input to trend reconciliation. Rows stored for `today` itself
/// are excluded so a rerun never compares against its own output.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn fetch_sentiment_history(
    pool: &PgPool,
    community: &str,
    today: NaiveDate,
) -> Result<Vec<(NaiveDate, f64)>, DbError> {
    let window_start = today
        .checked_sub_days(Days::new(HISTORY_WINDOW_DAYS))
        .unwrap_or(today);

    let rows = sqlx::query_as::<_, (NaiveDate, f64)>(
        "SELECT timestamp, vader_avg \
         FROM subreddit_daily_sentiment \
         WHERE subreddit_name = $1 \
           AND timestamp < $2 \
           AND timestamp >= $3 \
         ORDER BY timestamp DESC",
    )
    .bind(community)
    .bind(today)
    .bind(window_start)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// List recent daily summaries, optionally filtered by community.
///
/// Results are ordered by `timestamp DESC` then `subreddit_name`.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_daily_sentiment(
    pool: &PgPool,
    community: Option<&str>,
    limit: i64,
) -> Result<Vec<DailySentimentRow>, DbError> {
    let rows = match community {
        Some(name) => {
            sqlx::query_as::<_, DailySentimentRow>(
                "SELECT id, subreddit_name, timestamp, vader_avg, \
                        roberta_positive_pct, roberta_negative_pct, roberta_neutral_pct, \
                        post_count, comment_count, avg_upvote_ratio, avg_score, \
                        top_themes, sentiment_trend, created_at, updated_at \
                 FROM subreddit_daily_sentiment \
                 WHERE subreddit_name = $1 \
                 ORDER BY timestamp DESC, subreddit_name \
                 LIMIT $2",
            )
            .bind(name)
            .bind(limit)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, DailySentimentRow>(
                "SELECT id, subreddit_name, timestamp, vader_avg, \
                        roberta_positive_pct, roberta_negative_pct, roberta_neutral_pct, \
                        post_count, comment_count, avg_upvote_ratio, avg_score, \
                        top_themes, sentiment_trend, created_at, updated_at \
                 FROM subreddit_daily_sentiment \
                 ORDER BY timestamp DESC, subreddit_name \
                 LIMIT $1",
            )
            .bind(limit)
            .fetch_all(pool)
            .await?
        }
    };

    Ok(rows)
}

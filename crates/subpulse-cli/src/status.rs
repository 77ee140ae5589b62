//! The `status` command: print recently stored daily summaries.

use sqlx::PgPool;

/// Print recent rows from the daily sentiment table, newest first.
///
/// # Errors
///
/// Returns an error if the listing query fails.
pub(crate) async fn run_status(
    pool: &PgPool,
    community: Option<&str>,
    limit: i64,
) -> anyhow::Result<()> {
    let rows = subpulse_db::list_daily_sentiment(pool, community, limit).await?;

    if rows.is_empty() {
        println!("no stored summaries");
        return Ok(());
    }

    println!(
        "{:<12} {:<20} {:>9} {:>7} {:>6} {:>9}",
        "date", "community", "sentiment", "trend", "posts", "comments"
    );
    for row in rows {
        println!(
            "{:<12} {:<20} {:>9.3} {:>+7.3} {:>6} {:>9}",
            row.timestamp, row.subreddit_name, row.vader_avg, row.sentiment_trend, row.post_count,
            row.comment_count
        );
    }

    Ok(())
}

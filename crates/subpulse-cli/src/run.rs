//! The `run` command: harvest, aggregate, reconcile, upsert.

use std::time::Instant;

use chrono::Utc;
use subpulse_core::{AppConfig, RedditConfig, RunStats};
use subpulse_db::PoolConfig;
use subpulse_harvest::RedditClient;

/// Execute one full pipeline run over all configured communities.
///
/// Every failure mode is contained: a community whose fetch or scoring
/// fails contributes zero records and bumps the error count; a history or
/// upsert failure is logged and counted as an upload failure. The function
/// always returns a [`RunStats`] and never propagates an error to the
/// caller.
pub(crate) async fn run_pipeline(
    config: &AppConfig,
    reddit: &RedditConfig,
    dry_run: bool,
) -> RunStats {
    let started = Instant::now();
    let mut errors = 0_usize;
    let mut communities_processed = 0_usize;
    let mut all_records = Vec::new();

    match RedditClient::new(reddit, config.harvest_request_timeout_secs).await {
        Ok(client) => {
            for community in &config.communities {
                match subpulse_harvest::harvest_community(&client, config, community).await {
                    Ok(records) => {
                        tracing::info!(community = %community, posts = records.len(), "harvested community");
                        communities_processed += 1;
                        all_records.extend(records);
                    }
                    Err(e) => {
                        tracing::warn!(community = %community, error = %e, "community harvest failed");
                        errors += 1;
                    }
                }
            }
        }
        Err(e) => {
            // Without a client no community can be fetched; count each as failed.
            tracing::error!(error = %e, "Reddit client setup failed");
            errors += config.communities.len();
        }
    }

    let today = Utc::now().date_naive();
    let posts_analyzed = all_records.len();
    let summaries = subpulse_aggregate::aggregate(&all_records, today);

    if summaries.is_empty() {
        tracing::info!("no records harvested; skipping database writes");
    } else if dry_run {
        for (community, summary) in &summaries {
            tracing::info!(
                community = %community,
                posts = summary.post_count,
                sentiment_avg = summary.sentiment_avg,
                "dry-run: would upsert summary"
            );
        }
    } else {
        errors += persist_summaries(config, summaries, today).await;
    }

    RunStats {
        communities_processed,
        posts_analyzed,
        errors,
        duration_seconds: started.elapsed().as_secs_f64(),
        finished_at: Utc::now(),
    }
}

/// Reconcile each summary against its stored history and upsert it.
///
/// History reads run concurrently per community (read-only, no ordering
/// dependency between communities); each summary is finalized and written
/// once its own history arrives. Returns the number of failed writes.
async fn persist_summaries(
    config: &AppConfig,
    summaries: std::collections::BTreeMap<String, subpulse_core::CommunitySummary>,
    today: chrono::NaiveDate,
) -> usize {
    let Some(database_url) = config.database_url.as_deref() else {
        tracing::error!("DATABASE_URL is not set; upload skipped");
        return summaries.len();
    };

    let pool = match subpulse_db::connect_pool(database_url, PoolConfig::from_app_config(config))
        .await
    {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!(error = %e, "database connection failed; upload skipped");
            return summaries.len();
        }
    };

    let tasks = summaries.into_values().map(|summary| {
        let pool = pool.clone();
        async move {
            let community = summary.community.clone();
            let history =
                match subpulse_db::fetch_sentiment_history(&pool, &community, today).await {
                    Ok(history) => history,
                    Err(e) => {
                        tracing::warn!(
                            community = %community,
                            error = %e,
                            "history fetch failed; treating as no prior data"
                        );
                        Vec::new()
                    }
                };

            let summary = subpulse_aggregate::reconcile(summary, &history);

            if let Err(e) = subpulse_db::upsert_daily_sentiment(&pool, &summary).await {
                tracing::warn!(community = %community, error = %e, "summary upload failed");
                return 1_usize;
            }
            tracing::info!(
                community = %community,
                sentiment_trend = summary.sentiment_trend,
                "upserted daily summary"
            );
            0_usize
        }
    });

    futures::future::join_all(tasks).await.into_iter().sum()
}

//! Offline unit tests for subpulse-db pool configuration and row types.
//! These tests do not require a live database connection.

use chrono::{NaiveDate, Utc};
use subpulse_core::{AppConfig, RedditConfig, Theme};
use subpulse_db::{DailySentimentRow, PoolConfig};

#[test]
fn pool_config_from_app_config_uses_core_values() {
    let app_config = AppConfig {
        database_url: Some("postgres://example".to_string()),
        communities: vec!["wallstreetbets".to_string()],
        reddit: Some(RedditConfig {
            client_id: "id".to_string(),
            client_secret: "secret".to_string(),
            user_agent: "ua".to_string(),
        }),
        log_level: "info".to_string(),
        db_max_connections: 42,
        db_min_connections: 7,
        db_acquire_timeout_secs: 9,
        harvest_request_timeout_secs: 30,
        harvest_post_limit: 25,
        harvest_comment_limit: 10,
    };

    let pool_config = PoolConfig::from_app_config(&app_config);
    assert_eq!(pool_config.max_connections, 42);
    assert_eq!(pool_config.min_connections, 7);
    assert_eq!(pool_config.acquire_timeout_secs, 9);
}

/// Compile-time smoke test: confirm that [`DailySentimentRow`] has all
/// expected fields with the correct types. No database required.
#[test]
fn daily_sentiment_row_has_expected_fields() {
    let row = DailySentimentRow {
        id: 1_i64,
        subreddit_name: "wallstreetbets".to_string(),
        timestamp: NaiveDate::from_ymd_opt(2026, 8, 27).unwrap(),
        vader_avg: 0.1_f64,
        roberta_positive_pct: 50.0_f64,
        roberta_negative_pct: 50.0_f64,
        roberta_neutral_pct: 0.0_f64,
        post_count: 2_i32,
        comment_count: 7_i32,
        avg_upvote_ratio: 0.85_f64,
        avg_score: 75.0_f64,
        top_themes: r#"[["stock",5],["market",1]]"#.to_string(),
        sentiment_trend: 0.2_f64,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    };

    assert_eq!(row.subreddit_name, "wallstreetbets");
    assert_eq!(row.post_count, 2);

    // The stored text round-trips back into the theme pair shape.
    let themes: Vec<Theme> = serde_json::from_str(&row.top_themes).expect("parse themes");
    assert_eq!(themes.len(), 2);
    assert_eq!(themes[0].term, "stock");
    assert_eq!(themes[0].frequency, 5);
}

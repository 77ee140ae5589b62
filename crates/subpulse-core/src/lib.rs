//! Shared data model and configuration for subpulse.
//!
//! Defines the per-post [`SentimentRecord`] shape produced by the harvest
//! pipeline, the per-community daily [`CommunitySummary`] aggregate, and the
//! [`AppConfig`] loaded from environment variables.

pub mod config;
pub mod model;

pub use config::{load_app_config, load_app_config_from_env, AppConfig, ConfigError, RedditConfig};
pub use model::{
    CategoryDistribution, CommunitySummary, Engagement, RunStats, SentimentLabel, SentimentRecord,
    Theme,
};

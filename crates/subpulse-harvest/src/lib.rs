//! Harvest pipeline for subpulse.
//!
//! Fetches the last day's top posts and comments per subreddit, cleans the
//! text, scores each post with a valence lexicon and a categorical
//! classifier, extracts the batch's recurring themes, and emits one
//! [`SentimentRecord`] per post for the aggregation engine.
//!
//! [`SentimentRecord`]: subpulse_core::SentimentRecord

pub mod error;
pub mod pipeline;
pub mod reddit;
pub mod scorer;
pub mod themes;

mod clean;

pub use error::HarvestError;
pub use pipeline::harvest_community;
pub use reddit::{HarvestedPost, RedditClient};
pub use scorer::{classify, compound_score};
pub use themes::extract_themes;

//! Aggregation and trend pipeline for subpulse.
//!
//! Converts the run's per-post [`SentimentRecord`] stream into per-community
//! daily [`CommunitySummary`] values, and reconciles each summary against its
//! persisted history to produce a day-over-day sentiment trend.
//!
//! [`SentimentRecord`]: subpulse_core::SentimentRecord
//! [`CommunitySummary`]: subpulse_core::CommunitySummary

pub mod aggregator;
pub mod trend;

pub use aggregator::aggregate;
pub use trend::reconcile;

//! Harvest orchestration: posts in, scored sentiment records out.

use subpulse_core::{AppConfig, Engagement, SentimentRecord};

use crate::clean::clean_text;
use crate::error::HarvestError;
use crate::reddit::{HarvestedPost, RedditClient};
use crate::scorer::{classify, compound_score};
use crate::themes::extract_themes;

/// Harvest one community: fetch its recent posts and score them.
///
/// Produces one [`SentimentRecord`] per post. The batch's theme list is
/// extracted once over all post and comment text and copied onto every
/// record (batch-sharing — downstream aggregation relies on this). An empty
/// fetch yields an empty vector, not an error.
///
/// # Errors
///
/// Returns [`HarvestError`] if the post listing cannot be fetched.
pub async fn harvest_community(
    client: &RedditClient,
    config: &AppConfig,
    community: &str,
) -> Result<Vec<SentimentRecord>, HarvestError> {
    let posts = client
        .fetch_recent_posts(
            community,
            config.harvest_post_limit,
            config.harvest_comment_limit,
        )
        .await?;

    if posts.is_empty() {
        tracing::info!(community, "no recent posts found");
        return Ok(Vec::new());
    }

    Ok(records_from_posts(community, &posts))
}

/// Score a batch of posts into sentiment records.
///
/// Pure with respect to its inputs; split out of [`harvest_community`] so
/// the record assembly can be tested without a live client.
#[must_use]
pub fn records_from_posts(community: &str, posts: &[HarvestedPost]) -> Vec<SentimentRecord> {
    let mut records = Vec::with_capacity(posts.len());
    let mut all_texts: Vec<String> = Vec::new();

    for post in posts {
        let post_text = format!("{} {}", post.title, post.selftext);
        all_texts.push(post_text.clone());
        all_texts.extend(post.comments.iter().cloned());

        let sentiment_score = compound_score(&clean_text(&post_text));
        let (label, confidence) = classify(sentiment_score);

        let comment_scores: Vec<f64> = post
            .comments
            .iter()
            .filter(|c| !c.is_empty())
            .map(|c| compound_score(&clean_text(c)))
            .collect();
        let comment_sentiment_avg = if comment_scores.is_empty() {
            0.0
        } else {
            #[allow(clippy::cast_precision_loss)]
            let denom = comment_scores.len() as f64;
            comment_scores.iter().sum::<f64>() / denom
        };

        records.push(SentimentRecord {
            community: community.to_string(),
            sentiment_score,
            category_label: Some(label),
            category_confidence: confidence,
            comment_sentiment_avg,
            engagement: Engagement {
                upvote_ratio: post.upvote_ratio,
                score: post.score,
                comment_count: post.num_comments,
            },
            themes: Vec::new(),
        });
    }

    // Themes are computed once over the whole batch and shared by every
    // record produced from it.
    let themes = extract_themes(&all_texts);
    for record in &mut records {
        record.themes = themes.clone();
    }

    records
}

//! Reddit API client (client-credentials OAuth).

use chrono::{DateTime, TimeZone, Utc};
use serde::Deserialize;
use subpulse_core::RedditConfig;

use crate::error::HarvestError;

const AUTH_BASE_URL: &str = "https://www.reddit.com";
const API_BASE_URL: &str = "https://oauth.reddit.com";

/// Posts older than this are dropped even when the listing returns them.
const MAX_POST_AGE_HOURS: i64 = 24;

/// Reddit OAuth token response.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Reddit listing wrapper.
#[derive(Debug, Deserialize)]
struct Listing {
    data: ListingData,
}

#[derive(Debug, Deserialize)]
struct ListingData {
    #[serde(default)]
    children: Vec<Child>,
}

#[derive(Debug, Deserialize)]
struct Child {
    #[serde(default)]
    data: ChildData,
}

/// Post or comment payload. Every field is optional: missing numerics
/// default to 0 downstream rather than failing the batch.
#[derive(Debug, Default, Deserialize)]
struct ChildData {
    title: Option<String>,
    selftext: Option<String>,
    body: Option<String>,
    upvote_ratio: Option<f64>,
    score: Option<f64>,
    num_comments: Option<i64>,
    created_utc: Option<f64>,
    permalink: Option<String>,
}

/// One fetched post with its top comment bodies.
#[derive(Debug, Clone)]
pub struct HarvestedPost {
    pub title: String,
    pub selftext: String,
    pub upvote_ratio: f64,
    pub score: f64,
    pub num_comments: i64,
    pub comments: Vec<String>,
}

/// Reddit API client holding a valid access token.
pub struct RedditClient {
    client: reqwest::Client,
    token: String,
    user_agent: String,
    api_base: String,
}

impl RedditClient {
    /// Create a client by exchanging client credentials for a token.
    ///
    /// # Errors
    ///
    /// Returns [`HarvestError::Reddit`] if token exchange fails.
    pub async fn new(reddit: &RedditConfig, timeout_secs: u64) -> Result<Self, HarvestError> {
        Self::with_base_urls(reddit, timeout_secs, AUTH_BASE_URL, API_BASE_URL).await
    }

    /// Like [`RedditClient::new`] but with injectable endpoints, so tests
    /// can point at a mock server.
    ///
    /// # Errors
    ///
    /// Returns [`HarvestError::Reddit`] if token exchange fails.
    pub async fn with_base_urls(
        reddit: &RedditConfig,
        timeout_secs: u64,
        auth_base: &str,
        api_base: &str,
    ) -> Result<Self, HarvestError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| HarvestError::Reddit(format!("failed to build HTTP client: {e}")))?;

        let token = Self::fetch_token(&client, reddit, auth_base).await?;

        Ok(Self {
            client,
            token,
            user_agent: reddit.user_agent.clone(),
            api_base: api_base.to_string(),
        })
    }

    async fn fetch_token(
        client: &reqwest::Client,
        reddit: &RedditConfig,
        auth_base: &str,
    ) -> Result<String, HarvestError> {
        let response = client
            .post(format!("{auth_base}/api/v1/access_token"))
            .header("User-Agent", &reddit.user_agent)
            .basic_auth(&reddit.client_id, Some(&reddit.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(HarvestError::Reddit(format!(
                "token exchange failed with status {}",
                response.status()
            )));
        }

        let token_resp: TokenResponse = response
            .json()
            .await
            .map_err(|e| HarvestError::Reddit(format!("token parse error: {e}")))?;

        Ok(token_resp.access_token)
    }

    /// Fetch the community's top posts from the last 24 hours, each with up
    /// to `comment_limit` top-level comment bodies.
    ///
    /// The listing endpoint already filters to the top of the day; posts
    /// whose `created_utc` falls outside the trailing 24 hours are dropped
    /// on top of that. Per-post comment fetch failures are logged and leave
    /// that post with no comments rather than failing the batch.
    ///
    /// # Errors
    ///
    /// Returns [`HarvestError`] if the listing request itself fails.
    pub async fn fetch_recent_posts(
        &self,
        community: &str,
        post_limit: u32,
        comment_limit: usize,
    ) -> Result<Vec<HarvestedPost>, HarvestError> {
        let url = format!(
            "{}/r/{community}/top?t=day&limit={post_limit}&raw_json=1",
            self.api_base
        );
        let listing: Listing = self.get_json(&url).await?;

        let now = Utc::now();
        let mut posts = Vec::new();

        for child in listing.data.children {
            let data = child.data;
            if !is_recent(data.created_utc, now) {
                continue;
            }

            let comments = match data.permalink.as_deref() {
                Some(permalink) => match self.fetch_comments(permalink, comment_limit).await {
                    Ok(comments) => comments,
                    Err(e) => {
                        tracing::warn!(
                            community,
                            permalink,
                            error = %e,
                            "comment fetch failed; keeping post without comments"
                        );
                        Vec::new()
                    }
                },
                None => Vec::new(),
            };

            posts.push(HarvestedPost {
                title: data.title.unwrap_or_default(),
                selftext: data.selftext.unwrap_or_default(),
                upvote_ratio: data.upvote_ratio.unwrap_or(0.0),
                score: data.score.unwrap_or(0.0),
                num_comments: data.num_comments.unwrap_or(0),
                comments,
            });
        }

        tracing::debug!(community, count = posts.len(), "fetched recent posts");
        Ok(posts)
    }

    /// Fetch up to `limit` top-level comment bodies for a post.
    ///
    /// The comments endpoint returns a two-element array: the post listing
    /// followed by the comment listing.
    async fn fetch_comments(
        &self,
        permalink: &str,
        limit: usize,
    ) -> Result<Vec<String>, HarvestError> {
        let url = format!(
            "{}{}.json?limit={limit}&depth=1&raw_json=1",
            self.api_base,
            permalink.trim_end_matches('/')
        );
        let listings: Vec<Listing> = self.get_json(&url).await?;

        let comments = listings
            .into_iter()
            .nth(1)
            .map(|listing| {
                listing
                    .data
                    .children
                    .into_iter()
                    .filter_map(|c| c.data.body)
                    .filter(|body| !body.is_empty())
                    .take(limit)
                    .collect()
            })
            .unwrap_or_default();

        Ok(comments)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, HarvestError> {
        let response = self
            .client
            .get(url)
            .header("User-Agent", &self.user_agent)
            .bearer_auth(&self.token)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(HarvestError::Reddit(format!(
                "request to {url} failed with status {}",
                response.status()
            )));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| HarvestError::Reddit(format!("response parse error: {e}")))
    }
}

/// Whether a post's creation time falls within the trailing 24 hours.
///
/// Posts with a missing or unrepresentable `created_utc` are treated as
/// stale and dropped.
fn is_recent(created_utc: Option<f64>, now: DateTime<Utc>) -> bool {
    #[allow(clippy::cast_possible_truncation)]
    let Some(created) = created_utc
        .map(|secs| secs as i64)
        .and_then(|secs| Utc.timestamp_opt(secs, 0).single())
    else {
        return false;
    };
    now.signed_duration_since(created) <= chrono::Duration::hours(MAX_POST_AGE_HOURS)
}

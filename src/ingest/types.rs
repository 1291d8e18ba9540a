// src/ingest/types.rs

use chrono::{DateTime, Utc};

/// One article as produced by a source client. Immutable after creation;
/// lives for a single cycle.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct NewsItem {
    pub title: String,
    /// Dedup identifier. May be empty when the upstream payload lacks it;
    /// empty-url items never survive the merge pipeline.
    pub url: String,
    pub published_at: DateTime<Utc>,
    pub source: String,
    pub summary: Option<String>,
}

/// Fetch failures, split into recoverable (absorbed as an empty result for
/// the source) and fatal (aborts the whole cycle).
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("rate limited by upstream")]
    RateLimited,

    #[error("unexpected status {0}")]
    Status(reqwest::StatusCode),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
}

impl FetchError {
    pub fn is_recoverable(&self) -> bool {
        matches!(self, FetchError::RateLimited)
    }
}

#[async_trait::async_trait]
pub trait NewsSource: Send + Sync {
    async fn fetch(&self) -> Result<Vec<NewsItem>, FetchError>;
    fn name(&self) -> &'static str;
}

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::time::Duration;

use crate::ingest::types::{FetchError, NewsItem, NewsSource};

const TOP_HEADLINES_URL: &str = "https://newsapi.org/v2/top-headlines";

#[derive(Debug, Deserialize)]
struct Payload {
    #[serde(default)]
    articles: Vec<Article>,
}

#[derive(Debug, Deserialize)]
struct Article {
    title: Option<String>,
    url: Option<String>,
    #[serde(rename = "publishedAt")]
    published_at: Option<String>,
    #[serde(default)]
    source: ArticleSource,
    description: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ArticleSource {
    name: Option<String>,
}

/// Top-headlines client for the finance category (business, English).
pub struct NewsApiSource {
    client: reqwest::Client,
    api_key: String,
    sources: Vec<String>,
    limit: usize,
}

impl NewsApiSource {
    pub fn new(api_key: impl Into<String>, sources: Vec<String>, limit: usize) -> Self {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(4))
            .timeout(Duration::from_secs(10))
            .build()
            .expect("reqwest client");
        Self {
            client,
            api_key: api_key.into(),
            sources,
            limit,
        }
    }

    /// Map one raw article into the item shape, substituting safe defaults
    /// for missing or unparseable fields.
    fn map_article(article: Article) -> NewsItem {
        let published_at = article
            .published_at
            .as_deref()
            .and_then(|ts| DateTime::parse_from_rfc3339(ts).ok())
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(Utc::now);

        NewsItem {
            title: article.title.unwrap_or_else(|| "(no title)".to_string()),
            url: article.url.unwrap_or_default(),
            published_at,
            source: article.source.name.unwrap_or_else(|| "Unknown".to_string()),
            summary: article.description,
        }
    }
}

#[async_trait]
impl NewsSource for NewsApiSource {
    async fn fetch(&self) -> Result<Vec<NewsItem>, FetchError> {
        let mut params = vec![
            ("category", "business".to_string()),
            ("language", "en".to_string()),
            ("pageSize", self.limit.to_string()),
        ];
        if !self.sources.is_empty() {
            params.push(("sources", self.sources.join(",")));
        }

        let resp = self
            .client
            .get(TOP_HEADLINES_URL)
            .query(&params)
            .header("X-Api-Key", &self.api_key)
            .send()
            .await?;

        let status = resp.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(FetchError::RateLimited);
        }
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let payload: Payload = resp.json().await?;
        Ok(payload.articles.into_iter().map(Self::map_article).collect())
    }

    fn name(&self) -> &'static str {
        "NewsAPI"
    }
}

//! Print the exact prompt the summarizer would send, without calling the
//! chat-completion API. Falls back to dummy sample items when no news key is
//! configured or the fetch comes back empty.

use chrono::{Duration, Utc};
use finance_news_digest::ingest::providers::newsapi::NewsApiSource;
use finance_news_digest::ingest::{self, types::NewsSource};
use finance_news_digest::summarize::{build_content, SUMMARY_PROMPT};
use finance_news_digest::{config::Settings, init_tracing, NewsItem};

fn dummy_items() -> Vec<NewsItem> {
    let now = Utc::now();
    vec![
        NewsItem {
            title: "Fed signals no rate cuts until inflation cools further".to_string(),
            url: "https://example.com/fed".to_string(),
            published_at: now,
            source: "ExampleWire".to_string(),
            summary: Some("Policy makers cautious despite cooling CPI data.".to_string()),
        },
        NewsItem {
            title: "BTC breaks above $70k on ETF inflows".to_string(),
            url: "https://example.com/btc".to_string(),
            published_at: now - Duration::minutes(10),
            source: "CryptoDesk".to_string(),
            summary: Some("Analysts cite strong spot ETF demand from US institutions.".to_string()),
        },
        NewsItem {
            title: "Tech mega-cap earnings beat forecasts".to_string(),
            url: "https://example.com/earnings".to_string(),
            published_at: now - Duration::minutes(20),
            source: "MarketBeat".to_string(),
            summary: Some("Cloud and AI segments drive revenue surprise.".to_string()),
        },
    ]
}

async fn fetch_or_dummy(settings: &Settings) -> Vec<NewsItem> {
    let Some(key) = &settings.news_api_key else {
        tracing::info!("NEWS_API_KEY missing; using dummy news items");
        return dummy_items();
    };

    let sources: Vec<Box<dyn NewsSource>> = vec![Box::new(NewsApiSource::new(
        key.clone(),
        settings.sources.clone(),
        5,
    ))];

    tracing::info!("fetching sample news items");
    match ingest::collect(&sources).await {
        Ok(items) if !items.is_empty() => items,
        Ok(_) => {
            tracing::warn!("no news items retrieved; using dummy samples instead");
            dummy_items()
        }
        Err(e) => {
            tracing::warn!(error = ?e, "fetch failed; using dummy samples instead");
            dummy_items()
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    let settings = Settings::from_env()?;
    init_tracing(&settings.log_level);

    let items = fetch_or_dummy(&settings).await;
    let content = build_content(&items[..items.len().min(5)]);

    println!("\n=== SYSTEM PROMPT ===\n");
    println!("{}", SUMMARY_PROMPT.trim());
    println!("\n=== USER CONTENT ===\n");
    println!("{content}");
    Ok(())
}

// src/notify/mod.rs
pub mod telegram;

pub use telegram::TelegramNotifier;

use crate::ingest::types::NewsItem;
use crate::summarize::SummaryResult;

/// Fixed render order for the sentiment block.
pub const SENTIMENT_KEYS: [&str; 3] = ["btc", "eth", "broad_market"];

/// Render the digest: title line, highlight bullets, fixed-order sentiment
/// block, and source links. Missing asset keys read as Neutral; confidence
/// appears only when the model supplied one.
pub fn format_digest(summary: &SummaryResult, items: &[NewsItem]) -> String {
    let mut lines: Vec<String> = vec!["*Finance News Digest*".to_string()];

    if !summary.highlights.is_empty() {
        lines.push(String::new());
        let bullets: Vec<String> = summary
            .highlights
            .iter()
            .map(|h| format!("- {h}"))
            .collect();
        lines.push(bullets.join("\n\n"));
    }

    if !summary.market_sentiment.is_empty() {
        lines.push(String::new());
        lines.push("*Market Sentiment*".to_string());
        let mut rows: Vec<String> = Vec::with_capacity(SENTIMENT_KEYS.len());
        for key in SENTIMENT_KEYS {
            let data = summary.market_sentiment.get(key);
            let stance = data.map(|d| d.stance).unwrap_or_default();
            let row = match data.and_then(|d| d.confidence) {
                Some(confidence) => format!(
                    "- {}: {} ({:.0}%)",
                    key.to_uppercase(),
                    stance.label(),
                    confidence
                ),
                None => format!("- {}: {}", key.to_uppercase(), stance.label()),
            };
            rows.push(row);
        }
        lines.push(rows.join("\n"));
    }

    let source_block: Vec<String> = items
        .iter()
        .map(|item| format!("- [{}]({}) - {}", item.source, item.url, item.title))
        .collect();
    lines.push(String::new());
    lines.push("*Sources*".to_string());
    lines.push(source_block.join("\n\n"));

    lines.join("\n")
}

// src/ingest/mod.rs
pub mod providers;
pub mod types;

use crate::ingest::types::{NewsItem, NewsSource};
use anyhow::{Context, Result};
use futures::future::try_join_all;
use metrics::{counter, describe_counter, describe_gauge, gauge};
use once_cell::sync::OnceCell;
use std::collections::HashSet;

/// One-time metrics registration.
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("ingest_items_total", "Items parsed from source payloads.");
        describe_counter!("ingest_kept_total", "Items kept after merge + dedup.");
        describe_counter!(
            "ingest_dedup_total",
            "Items dropped for empty or already-seen urls."
        );
        describe_counter!(
            "ingest_rate_limited_total",
            "Source fetches absorbed as empty due to rate limiting."
        );
        describe_gauge!(
            "ingest_last_run_ts",
            "Unix ts when the ingest pipeline last ran."
        );
    });
}

/// Merge per-source results already flattened into one sequence: stable-sort
/// by published time descending, then keep the first item per non-empty url.
///
/// Items with an empty url are always dropped. Re-running this on its own
/// output yields the same sequence.
pub fn merge_dedup(mut combined: Vec<NewsItem>) -> Vec<NewsItem> {
    combined.sort_by(|a, b| b.published_at.cmp(&a.published_at));

    let mut seen: HashSet<String> = HashSet::new();
    let mut unique = Vec::with_capacity(combined.len());
    for item in combined {
        if item.url.is_empty() || !seen.insert(item.url.clone()) {
            continue;
        }
        unique.push(item);
    }
    unique
}

/// Run every source fetch concurrently and merge the results.
///
/// All-or-nothing join: a rate-limited source contributes zero items, but any
/// other fetch error fails the whole gather and the caller aborts the cycle.
pub async fn collect(sources: &[Box<dyn NewsSource>]) -> Result<Vec<NewsItem>> {
    ensure_metrics_described();

    let fetches = sources.iter().map(|source| async move {
        match source.fetch().await {
            Ok(items) => {
                counter!("ingest_items_total").increment(items.len() as u64);
                Ok(items)
            }
            Err(e) if e.is_recoverable() => {
                tracing::warn!(source = source.name(), error = %e, "source skipped for this cycle");
                counter!("ingest_rate_limited_total").increment(1);
                Ok(Vec::new())
            }
            Err(e) => {
                Err(anyhow::Error::new(e).context(format!("fetching from {}", source.name())))
            }
        }
    });

    let results: Vec<Vec<NewsItem>> = try_join_all(fetches).await.context("gathering sources")?;
    let combined: Vec<NewsItem> = results.into_iter().flatten().collect();
    let total = combined.len();

    let merged = merge_dedup(combined);

    counter!("ingest_kept_total").increment(merged.len() as u64);
    counter!("ingest_dedup_total").increment((total - merged.len()) as u64);
    gauge!("ingest_last_run_ts").set(chrono::Utc::now().timestamp() as f64);

    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn item(url: &str, minutes_ago: i64) -> NewsItem {
        NewsItem {
            title: format!("headline {url}"),
            url: url.to_string(),
            published_at: Utc::now() - Duration::minutes(minutes_ago),
            source: "Test".to_string(),
            summary: None,
        }
    }

    #[test]
    fn duplicates_keep_first_after_sort() {
        let mut older = item("https://a", 10);
        older.title = "older".to_string();
        let mut newer = item("https://a", 0);
        newer.title = "newer".to_string();

        let merged = merge_dedup(vec![older, newer]);
        assert_eq!(merged.len(), 1);
        // the newer duplicate sorts first and wins
        assert_eq!(merged[0].title, "newer");
    }

    #[test]
    fn empty_url_is_always_dropped() {
        let merged = merge_dedup(vec![item("", 0)]);
        assert!(merged.is_empty());
    }

    #[test]
    fn output_is_time_ordered_desc() {
        let merged = merge_dedup(vec![item("https://b", 10), item("https://c", 20), item("https://a", 0)]);
        let urls: Vec<&str> = merged.iter().map(|i| i.url.as_str()).collect();
        assert_eq!(urls, vec!["https://a", "https://b", "https://c"]);
    }
}

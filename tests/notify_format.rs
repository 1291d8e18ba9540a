// tests/notify_format.rs
use chrono::{TimeZone, Utc};
use finance_news_digest::summarize::parse_summary;
use finance_news_digest::{format_digest, NewsItem, SummaryResult};

fn items() -> Vec<NewsItem> {
    let ts = Utc.with_ymd_and_hms(2026, 8, 29, 9, 30, 0).unwrap();
    vec![
        NewsItem {
            title: "Fed holds rates".to_string(),
            url: "https://example.com/fed".to_string(),
            published_at: ts,
            source: "ExampleWire".to_string(),
            summary: None,
        },
        NewsItem {
            title: "BTC above 70k".to_string(),
            url: "https://example.com/btc".to_string(),
            published_at: ts,
            source: "CryptoDesk".to_string(),
            summary: None,
        },
    ]
}

#[test]
fn full_digest_renders_all_sections_in_order() {
    let summary = parse_summary(
        r#"{
            "highlights": ["Fed stays put", "ETF inflows continue"],
            "market_sentiment": {
                "btc": {"stance": "bullish", "confidence": 70},
                "eth": {"stance": "neutral"},
                "broad_market": {"stance": "bearish", "confidence": 60}
            }
        }"#,
    )
    .unwrap();

    let text = format_digest(&summary, &items());

    assert!(text.starts_with("*Finance News Digest*"));
    assert!(text.contains("- Fed stays put"));
    assert!(text.contains("*Market Sentiment*"));
    assert!(text.contains("- BTC: Bullish (70%)"));
    assert!(text.contains("- ETH: Neutral"));
    assert!(text.contains("- BROAD_MARKET: Bearish (60%)"));
    assert!(text.contains("*Sources*"));
    assert!(text.contains("- [ExampleWire](https://example.com/fed) - Fed holds rates"));

    // fixed asset order regardless of map order
    let btc = text.find("- BTC:").unwrap();
    let eth = text.find("- ETH:").unwrap();
    let broad = text.find("- BROAD_MARKET:").unwrap();
    assert!(btc < eth && eth < broad);

    // sentiment block comes after highlights, sources last
    assert!(text.find("*Market Sentiment*").unwrap() < text.find("*Sources*").unwrap());
}

#[test]
fn missing_asset_key_defaults_to_neutral_without_confidence() {
    let summary = parse_summary(r#"{"market_sentiment": {"btc": {"stance": "bullish"}}}"#).unwrap();
    let text = format_digest(&summary, &items());
    assert!(text.contains("- BTC: Bullish"));
    assert!(!text.contains("- BTC: Bullish ("));
    assert!(text.contains("- ETH: Neutral"));
    assert!(text.contains("- BROAD_MARKET: Neutral"));
}

#[test]
fn empty_summary_still_lists_sources() {
    let text = format_digest(&SummaryResult::default(), &items());
    assert!(text.starts_with("*Finance News Digest*"));
    assert!(!text.contains("*Market Sentiment*"));
    assert!(text.contains("*Sources*"));
    assert!(text.contains("- [CryptoDesk](https://example.com/btc) - BTC above 70k"));
}

// tests/summarize_parse.rs
use chrono::{TimeZone, Utc};
use finance_news_digest::summarize::{build_content, parse_summary, Stance};
use finance_news_digest::NewsItem;

#[test]
fn full_reply_parses() {
    let raw = r#"{
        "highlights": ["Fed holds rates", "ETF inflows lift BTC"],
        "market_sentiment": {
            "btc": {"stance": "bullish", "confidence": 72},
            "eth": {"stance": "neutral"},
            "broad_market": {"stance": "bearish", "confidence": 55}
        }
    }"#;
    let summary = parse_summary(raw).unwrap();
    assert_eq!(summary.highlights.len(), 2);
    assert_eq!(summary.market_sentiment["btc"].stance, Stance::Bullish);
    assert_eq!(summary.market_sentiment["btc"].confidence, Some(72.0));
    assert_eq!(summary.market_sentiment["eth"].confidence, None);
    assert_eq!(
        summary.market_sentiment["broad_market"].stance,
        Stance::Bearish
    );
}

#[test]
fn absent_fields_default_to_empty() {
    let summary = parse_summary("{}").unwrap();
    assert!(summary.highlights.is_empty());
    assert!(summary.market_sentiment.is_empty());
}

#[test]
fn unknown_stance_reads_as_neutral() {
    let raw = r#"{"market_sentiment": {"btc": {"stance": "moonish"}}}"#;
    let summary = parse_summary(raw).unwrap();
    assert_eq!(summary.market_sentiment["btc"].stance, Stance::Neutral);
}

#[test]
fn empty_reply_is_fatal() {
    assert!(parse_summary("").is_err());
    assert!(parse_summary("   \n").is_err());
}

#[test]
fn non_json_reply_is_fatal() {
    assert!(parse_summary("sorry, I can't do that").is_err());
    assert!(parse_summary("[1, 2, 3]").is_err());
}

#[test]
fn content_block_lists_every_field() {
    let ts = Utc.with_ymd_and_hms(2026, 8, 29, 9, 30, 0).unwrap();
    let items = vec![
        NewsItem {
            title: "Fed holds rates".to_string(),
            url: "https://example.com/fed".to_string(),
            published_at: ts,
            source: "ExampleWire".to_string(),
            summary: Some("Cautious tone.".to_string()),
        },
        NewsItem {
            title: "No description here".to_string(),
            url: "https://example.com/x".to_string(),
            published_at: ts,
            source: "Other".to_string(),
            summary: None,
        },
    ];
    let content = build_content(&items);
    assert!(content.contains("- Fed holds rates | ExampleWire (2026-08-29T09:30:00+00:00)"));
    assert!(content.contains("  URL: https://example.com/fed"));
    assert!(content.contains("  Summary: Cautious tone."));
    // item without a summary gets no Summary line
    assert_eq!(content.matches("  Summary:").count(), 1);
}

// src/summarize.rs
// Chat-completion client that turns a bounded batch of news items into
// highlights plus per-asset market sentiment.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

use crate::config::Settings;
use crate::ingest::types::NewsItem;

const CHAT_COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";

pub const SUMMARY_PROMPT: &str = r#"You are an assistant that condenses finance and markets news into a concise bulletin.

For each article provided, output bullet points summarizing the key development and its likely market impact.
Then output an overall sentiment classification for BTC, ETH, and broad market (one of: bullish, neutral, bearish) with optional confidence 0-100.

Return the result strictly in JSON with:
{
  "highlights": ["- bullet", ...],
  "market_sentiment": {
     "btc": {"stance": "bullish|neutral|bearish", "confidence": 0-100},
     "eth": {...},
     "broad_market": {...}
  }
}
"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stance {
    Bullish,
    #[default]
    Neutral,
    Bearish,
}

impl Stance {
    pub fn label(self) -> &'static str {
        match self {
            Stance::Bullish => "Bullish",
            Stance::Neutral => "Neutral",
            Stance::Bearish => "Bearish",
        }
    }
}

// Unknown stance strings read as neutral rather than failing the digest.
impl<'de> Deserialize<'de> for Stance {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(match raw.trim().to_ascii_lowercase().as_str() {
            "bullish" => Stance::Bullish,
            "bearish" => Stance::Bearish,
            _ => Stance::Neutral,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetSentiment {
    #[serde(default)]
    pub stance: Stance,
    #[serde(default)]
    pub confidence: Option<f32>,
}

/// Parsed summarizer reply. Produced once per cycle, consumed once by the
/// notifier, never persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryResult {
    #[serde(default)]
    pub highlights: Vec<String>,
    #[serde(default)]
    pub market_sentiment: BTreeMap<String, AssetSentiment>,
}

/// Decode the model's JSON reply. Absent fields default to empty; anything
/// that is not a JSON object of the expected outer shape is a fatal error.
pub fn parse_summary(raw: &str) -> Result<SummaryResult> {
    if raw.trim().is_empty() {
        bail!("empty response from summarizer");
    }
    serde_json::from_str(raw).context("decoding summarizer reply")
}

/// Render the user content block: one entry per item with title, source,
/// timestamp, url, and the optional source-provided summary.
pub fn build_content(items: &[NewsItem]) -> String {
    let mut lines: Vec<String> = Vec::with_capacity(items.len() * 2);
    for item in items {
        lines.push(format!(
            "- {} | {} ({})\n  URL: {}",
            item.title,
            item.source,
            item.published_at.to_rfc3339(),
            item.url
        ));
        if let Some(summary) = &item.summary {
            lines.push(format!("  Summary: {summary}"));
        }
    }
    lines.join("\n")
}

pub struct Summarizer {
    http: reqwest::Client,
    api_key: String,
    model: String,
    show_prompt: bool,
}

#[derive(Serialize)]
struct Msg<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ResponseFormat<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Msg<'a>>,
    response_format: ResponseFormat<'a>,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMsg,
}

#[derive(Deserialize)]
struct ChoiceMsg {
    // null and absent both read as empty, so either lands on the
    // empty-response error rather than a decode failure
    #[serde(default)]
    content: Option<String>,
}

fn reply_content(resp: ChatResponse) -> String {
    resp.choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .unwrap_or_default()
}

impl Summarizer {
    pub fn new(settings: &Settings) -> Self {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(4))
            .timeout(Duration::from_secs(30))
            .build()
            .expect("reqwest client");
        Self {
            http,
            api_key: settings.openai_api_key.clone(),
            model: settings.summarize_model.clone(),
            show_prompt: settings.summarizer_show_prompt,
        }
    }

    /// Summarize a bounded batch of items. The caller truncates before
    /// calling; this sends one request and fails fatally on an empty or
    /// undecodable reply.
    pub async fn summarize(&self, items: &[NewsItem]) -> Result<SummaryResult> {
        let content = build_content(items);
        if self.show_prompt {
            let head: String = content.chars().take(2000).collect();
            tracing::info!("summarizer prompt:\n{SUMMARY_PROMPT}\n{head}");
        }

        let req = ChatRequest {
            model: &self.model,
            messages: vec![
                Msg {
                    role: "system",
                    content: SUMMARY_PROMPT,
                },
                Msg {
                    role: "user",
                    content: &content,
                },
            ],
            response_format: ResponseFormat { kind: "json_object" },
        };

        let resp: ChatResponse = self
            .http
            .post(CHAT_COMPLETIONS_URL)
            .bearer_auth(&self.api_key)
            .json(&req)
            .send()
            .await
            .context("summarizer request")?
            .error_for_status()
            .context("summarizer non-2xx")?
            .json()
            .await
            .context("summarizer response body")?;

        parse_summary(&reply_content(resp))
    }
}

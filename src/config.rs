// src/config.rs
// Environment-backed settings, read once at startup and passed explicitly
// to each component constructor.

use anyhow::{anyhow, Result};
use std::env;

pub const DEFAULT_CRON: &str = "*/30 * * * *";
pub const DEFAULT_MODEL: &str = "gpt-5-mini";

#[derive(Debug, Clone)]
pub struct Settings {
    pub openai_api_key: String,
    pub telegram_bot_token: String,
    pub telegram_chat_id: String,
    pub news_api_key: Option<String>,
    pub schedule_cron: String,
    pub log_level: String,
    pub sources: Vec<String>,
    pub summarize_model: String,
    pub summarizer_show_prompt: bool,
}

impl Settings {
    /// Load settings from the process environment. Missing required keys
    /// fail here, before any cycle runs.
    pub fn from_env() -> Result<Self> {
        let openai_api_key = require("OPENAI_API_KEY")?;
        let telegram_bot_token = require("TELEGRAM_BOT_TOKEN")?;
        let telegram_chat_id = require("TELEGRAM_CHAT_ID")?;

        Ok(Self {
            openai_api_key,
            telegram_bot_token,
            telegram_chat_id,
            news_api_key: env_str("NEWS_API_KEY"),
            schedule_cron: env_str("SCHEDULE_CRON").unwrap_or_else(|| DEFAULT_CRON.to_string()),
            log_level: env_str("LOG_LEVEL")
                .unwrap_or_else(|| "info".to_string())
                .to_lowercase(),
            sources: parse_list(env_str("NEWS_SOURCES").as_deref()),
            summarize_model: env_str("OPENAI_SUMMARIZE_MODEL")
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            summarizer_show_prompt: parse_bool(env_str("SUMMARIZER_SHOW_PROMPT").as_deref(), false),
        })
    }
}

fn require(key: &str) -> Result<String> {
    env_str(key).ok_or_else(|| anyhow!("{key} is required"))
}

/// Read an env var, trimming whitespace; empty values count as unset.
fn env_str(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Comma-separated list: trimmed, empties dropped.
pub fn parse_list(value: Option<&str>) -> Vec<String> {
    let Some(value) = value else {
        return Vec::new();
    };
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Lenient boolean: 1/true/yes/on and 0/false/no/off; anything else keeps
/// the default.
pub fn parse_bool(value: Option<&str>, default: bool) -> bool {
    let Some(raw) = value else {
        return default;
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => true,
        "0" | "false" | "no" | "off" => false,
        _ => default,
    }
}

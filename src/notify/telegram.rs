use anyhow::{Context, Result};
use reqwest::Client;
use std::time::Duration;

use crate::config::Settings;

/// Sends the assembled digest to one configured chat via the bot API.
pub struct TelegramNotifier {
    client: Client,
    token: String,
    chat_id: String,
}

impl TelegramNotifier {
    pub fn new(settings: &Settings) -> Self {
        Self::from_parts(
            settings.telegram_bot_token.clone(),
            settings.telegram_chat_id.clone(),
        )
    }

    pub fn from_parts(token: String, chat_id: String) -> Self {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(4))
            .timeout(Duration::from_secs(10))
            .build()
            .expect("reqwest client");
        Self {
            client,
            token,
            chat_id,
        }
    }

    fn endpoint(&self) -> String {
        format!("https://api.telegram.org/bot{}/sendMessage", self.token)
    }

    /// One sendMessage call, plain text (no parse mode, so unescaped
    /// characters in titles cannot break the send). No retry, no chunking.
    pub async fn send(&self, text: &str) -> Result<()> {
        tracing::info!(chars = text.len(), "sending telegram digest");

        let body = serde_json::json!({
            "chat_id": self.chat_id,
            "text": text,
        });

        self.client
            .post(self.endpoint())
            .json(&body)
            .send()
            .await
            .context("telegram post")?
            .error_for_status()
            .context("telegram non-2xx")?;
        Ok(())
    }
}

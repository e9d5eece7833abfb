//! Telegram Bot API notification client

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::Config;
use crate::io::HttpClient;
use crate::notifier::Notifier;

/// Envelope returned by every Bot API method
#[derive(Debug, Deserialize)]
struct TelegramReply {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

/// Telegram bot message sender
pub struct TelegramNotifier {
    api_url: String,
    bot_token: Option<String>,
    http: Arc<dyn HttpClient>,
}

impl std::fmt::Debug for TelegramNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramNotifier")
            .field("api_url", &self.api_url)
            .finish()
    }
}

impl TelegramNotifier {
    pub fn new(config: &Config, http: Arc<dyn HttpClient>) -> Self {
        let api_url = config.telegram_api_url.trim_end_matches('/').to_string();
        tracing::debug!("Created TelegramNotifier for {}", api_url);

        Self {
            api_url,
            bot_token: config.telegram_token.clone(),
            http,
        }
    }

    fn send_message_url(&self, token: &str) -> String {
        format!("{}/bot{}/sendMessage", self.api_url, token)
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    fn type_name(&self) -> &str {
        "telegram"
    }

    async fn send_message(&self, chat_id: &str, text: &str) -> crate::Result<()> {
        let token = self
            .bot_token
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                crate::HomeworkBotError::Config("telegram bot token is not set".to_string())
            })?;

        let params = [("chat_id", chat_id), ("text", text)];
        tracing::debug!("Sending Telegram message to chat {}", chat_id);

        let response = self
            .http
            .post_form(&self.send_message_url(token), &params)
            .await
            .map_err(|e| crate::HomeworkBotError::Notifier(e.to_string()))?;

        let reply = serde_json::from_str::<TelegramReply>(&response.body).ok();
        let accepted = reply.as_ref().is_some_and(|r| r.ok);

        if response.status != 200 || !accepted {
            let detail = reply
                .and_then(|r| r.description)
                .unwrap_or(response.body);
            return Err(crate::HomeworkBotError::Notifier(format!(
                "Telegram API returned status {}: {}",
                response.status, detail
            )));
        }

        tracing::debug!("Telegram message sent successfully");
        Ok(())
    }
}

//! Configuration types for the homework bot

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const PRACTICUM_TOKEN_VAR: &str = "PRACTICUM_TOKEN";
pub const TELEGRAM_TOKEN_VAR: &str = "TELEGRAM_TOKEN";
pub const TELEGRAM_CHAT_ID_VAR: &str = "TELEGRAM_CHAT_ID";

/// Main configuration structure
#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_telegram_api_url")]
    pub telegram_api_url: String,
    #[serde(default = "default_retry_interval")]
    pub retry_interval_seconds: u64,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
    #[serde(default)]
    pub practicum_token: Option<String>,
    #[serde(default)]
    pub telegram_token: Option<String>,
    #[serde(default)]
    pub telegram_chat_id: Option<String>,
}

/// The three credentials a cycle needs, borrowed from a [`Config`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Credentials<'a> {
    pub practicum_token: &'a str,
    /// Only checked for presence; `TelegramNotifier` holds its own copy
    pub telegram_token: &'a str,
    pub telegram_chat_id: &'a str,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            telegram_api_url: default_telegram_api_url(),
            retry_interval_seconds: default_retry_interval(),
            request_timeout_seconds: default_request_timeout(),
            practicum_token: None,
            telegram_token: None,
            telegram_chat_id: None,
        }
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fn redact(secret: &Option<String>) -> &'static str {
            match secret {
                Some(_) => "<set>",
                None => "<unset>",
            }
        }

        f.debug_struct("Config")
            .field("endpoint", &self.endpoint)
            .field("telegram_api_url", &self.telegram_api_url)
            .field("retry_interval_seconds", &self.retry_interval_seconds)
            .field("request_timeout_seconds", &self.request_timeout_seconds)
            .field("practicum_token", &redact(&self.practicum_token))
            .field("telegram_token", &redact(&self.telegram_token))
            .field("telegram_chat_id", &self.telegram_chat_id)
            .finish()
    }
}

impl Config {
    pub fn retry_interval(&self) -> Duration {
        Duration::from_secs(self.retry_interval_seconds)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    /// Fill credentials from the process environment.
    ///
    /// Environment values take precedence over values from the config file.
    pub fn resolve_secrets(&mut self) {
        self.resolve_secrets_with(|name| std::env::var(name).ok());
    }

    /// Fill credentials using `lookup` as the environment
    pub fn resolve_secrets_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let slots = [
            (PRACTICUM_TOKEN_VAR, &mut self.practicum_token),
            (TELEGRAM_TOKEN_VAR, &mut self.telegram_token),
            (TELEGRAM_CHAT_ID_VAR, &mut self.telegram_chat_id),
        ];
        for (name, slot) in slots {
            if let Some(value) = lookup(name) {
                tracing::debug!("Using {} from environment", name);
                *slot = Some(value);
            }
        }
    }

    /// Check that every credential is present and non-empty
    pub fn check_credentials(&self) -> crate::Result<Credentials<'_>> {
        fn required<'a>(value: &'a Option<String>, name: &str) -> crate::Result<&'a str> {
            match value.as_deref() {
                Some(v) if !v.trim().is_empty() => Ok(v),
                _ => Err(crate::HomeworkBotError::Config(format!(
                    "missing required credential {}",
                    name
                ))),
            }
        }

        Ok(Credentials {
            practicum_token: required(&self.practicum_token, PRACTICUM_TOKEN_VAR)?,
            telegram_token: required(&self.telegram_token, TELEGRAM_TOKEN_VAR)?,
            telegram_chat_id: required(&self.telegram_chat_id, TELEGRAM_CHAT_ID_VAR)?,
        })
    }

    /// Reject settings the poller cannot run with
    pub fn validate(&self) -> crate::Result<()> {
        if self.retry_interval_seconds == 0 {
            return Err(crate::HomeworkBotError::Config(
                "retry_interval_seconds must be greater than zero".to_string(),
            ));
        }
        if self.request_timeout_seconds == 0 {
            return Err(crate::HomeworkBotError::Config(
                "request_timeout_seconds must be greater than zero".to_string(),
            ));
        }
        for (field, url) in [
            ("endpoint", &self.endpoint),
            ("telegram_api_url", &self.telegram_api_url),
        ] {
            let parsed = reqwest::Url::parse(url).map_err(|e| {
                crate::HomeworkBotError::Config(format!("{} is not a valid URL: {}", field, e))
            })?;
            if parsed.scheme() != "http" && parsed.scheme() != "https" {
                return Err(crate::HomeworkBotError::Config(format!(
                    "{} must use http or https",
                    field
                )));
            }
        }
        Ok(())
    }
}

fn default_endpoint() -> String {
    "https://practicum.yandex.ru/api/user_api/homework_statuses/".to_string()
}

fn default_telegram_api_url() -> String {
    "https://api.telegram.org".to_string()
}

fn default_retry_interval() -> u64 {
    600
}

fn default_request_timeout() -> u64 {
    30
}

/// Load configuration from a JSON file
pub fn load_config(path: &Path) -> crate::Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        crate::HomeworkBotError::Config(format!("Failed to read config file {:?}: {}", path, e))
    })?;
    let config: Config = serde_json::from_str(&content)?;
    Ok(config)
}

//! BDD test world for the homework bot

use std::sync::Arc;

use async_trait::async_trait;
use cucumber::World;
use serde_json::Value;
use tokio::sync::RwLock;

use homework_bot::io::{HttpClient, HttpResponse};
use homework_bot::notifier::Notifier;
use homework_bot::poller::{CycleOutcome, Poller};
use homework_bot::{Config, HomeworkBotError};

#[derive(Debug, Default, World)]
pub struct HomeworkBotWorld {
    // Validation and translation
    pub response: Option<Value>,
    pub validation_result: Option<homework_bot::Result<Vec<Value>>>,
    pub homework: Option<Value>,
    pub translation_result: Option<homework_bot::Result<String>>,

    // Polling
    pub config: Option<Config>,
    pub api_client: Option<Arc<ScriptedClient>>,
    pub recorder: Option<Arc<RecordingNotifier>>,
    pub poller: Option<Poller>,
    pub cursor_before: Option<u64>,
    pub outcomes: Vec<CycleOutcome>,

    // Notification
    pub notifier: Option<Box<dyn Notifier>>,
    pub notification_result: Option<homework_bot::Result<()>>,
}

/// HTTP client that answers every request with the same canned result
#[derive(Debug, Clone)]
pub struct ScriptedClient {
    pub answer: Result<HttpResponse, String>,
}

impl ScriptedClient {
    pub fn ok(status: u16, body: &str) -> Self {
        Self {
            answer: Ok(HttpResponse {
                status,
                body: body.to_string(),
            }),
        }
    }

    pub fn unreachable() -> Self {
        Self {
            answer: Err("connection refused".to_string()),
        }
    }

    fn reply(&self) -> homework_bot::Result<HttpResponse> {
        self.answer.clone().map_err(HomeworkBotError::Fetch)
    }
}

#[async_trait]
impl HttpClient for ScriptedClient {
    async fn get(
        &self,
        _url: &str,
        _headers: &[(&str, &str)],
        _query: &[(&str, &str)],
    ) -> homework_bot::Result<HttpResponse> {
        self.reply()
    }

    async fn post_form(
        &self,
        _url: &str,
        _params: &[(&str, &str)],
    ) -> homework_bot::Result<HttpResponse> {
        self.reply()
    }
}

/// Notifier that records every attempted message
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    pub fail: bool,
    pub sent: RwLock<Vec<String>>,
}

impl RecordingNotifier {
    pub async fn messages(&self) -> Vec<String> {
        self.sent.read().await.clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    fn type_name(&self) -> &str {
        "recording"
    }

    async fn send_message(&self, _chat_id: &str, text: &str) -> homework_bot::Result<()> {
        self.sent.write().await.push(text.to_string());
        if self.fail {
            Err(HomeworkBotError::Notifier("bot was blocked".to_string()))
        } else {
            Ok(())
        }
    }
}

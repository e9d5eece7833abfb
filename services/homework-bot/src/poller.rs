//! Poller: fetches homework statuses on a fixed interval and relays them

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::notifier::{notify, Notifier};
use crate::practicum::PracticumClient;
use crate::response::check_response;
use crate::status::parse_status;

/// Prefix of the message sent when a cycle fails
pub const FAILURE_PREFIX: &str = "Сбой в работе программы";

/// Telegram rejects `sendMessage` text longer than this many characters
pub const MAX_MESSAGE_CHARS: usize = 4096;

/// What a single poll cycle did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// A status message was produced and handed to the notifier
    Notified,
    /// The response held no homeworks
    NoUpdates,
    /// The cycle failed; the failure message was handed to the notifier
    Failed(String),
}

/// Owns the cursor and runs fetch, validate, translate and notify cycles
pub struct Poller {
    config: Config,
    api: PracticumClient,
    notifier: Arc<dyn Notifier>,
    interval: Duration,
    cursor: u64,
}

impl std::fmt::Debug for Poller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Poller")
            .field("interval", &self.interval)
            .field("cursor", &self.cursor)
            .field("notifier", &self.notifier.type_name())
            .finish()
    }
}

impl Poller {
    /// Create a poller whose cursor starts at the current time
    pub fn new(config: Config, api: PracticumClient, notifier: Arc<dyn Notifier>) -> Self {
        let interval = config.retry_interval();
        Self {
            config,
            api,
            notifier,
            interval,
            cursor: crate::now_epoch_seconds(),
        }
    }

    /// Override the sleep between cycles
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Override the starting cursor
    pub fn with_cursor(mut self, cursor: u64) -> Self {
        self.cursor = cursor;
        self
    }

    /// Epoch second the next fetch starts from
    pub fn cursor(&self) -> u64 {
        self.cursor
    }

    /// Run one cycle. Every error is reported through the notifier and the
    /// cursor only advances when the cycle succeeds.
    pub async fn run_cycle(&mut self) -> CycleOutcome {
        match self.poll_once().await {
            Ok(outcome) => {
                self.cursor = crate::now_epoch_seconds();
                tracing::debug!("Cursor advanced to {}", self.cursor);
                outcome
            }
            Err(e) => {
                tracing::error!("Poll cycle failed: {}", e);
                let message =
                    crate::truncate_chars(&format!("{}: {}", FAILURE_PREFIX, e), MAX_MESSAGE_CHARS);
                if let Some(chat_id) = self.chat_id() {
                    notify(self.notifier.as_ref(), chat_id, &message).await;
                } else {
                    tracing::error!("No chat id configured, failure not reported");
                }
                CycleOutcome::Failed(message)
            }
        }
    }

    /// Run cycles until `cancel` fires, sleeping the fixed interval after each
    pub async fn run(&mut self, cancel: CancellationToken) {
        tracing::info!(
            "Polling every {:?} starting from {}",
            self.interval,
            self.cursor
        );

        loop {
            if cancel.is_cancelled() {
                break;
            }

            let outcome = self.run_cycle().await;
            tracing::debug!("Cycle finished: {:?}", outcome);

            tokio::select! {
                _ = tokio::time::sleep(self.interval) => {}
                _ = cancel.cancelled() => {
                    tracing::debug!("Polling loop cancelled");
                    break;
                }
            }
        }
    }

    async fn poll_once(&self) -> crate::Result<CycleOutcome> {
        let credentials = self.config.check_credentials()?;

        let answer = self
            .api
            .get_api_answer(credentials.practicum_token, self.cursor)
            .await?;
        let homeworks = check_response(&answer)?;

        let Some(latest) = homeworks.first() else {
            tracing::debug!("No homework updates since {}", self.cursor);
            return Ok(CycleOutcome::NoUpdates);
        };

        let message = parse_status(latest)?;
        if notify(
            self.notifier.as_ref(),
            credentials.telegram_chat_id,
            &message,
        )
        .await
        {
            tracing::info!("Status message sent");
        }
        Ok(CycleOutcome::Notified)
    }

    fn chat_id(&self) -> Option<&str> {
        self.config
            .telegram_chat_id
            .as_deref()
            .filter(|id| !id.trim().is_empty())
    }
}

//! Homework bot - Practicum review status notifications
//!
//! Polls the homework-status API on a fixed interval and relays the latest
//! review verdict to a Telegram chat.

pub mod config;
pub mod error;
pub mod io;
pub mod notifier;
pub mod poller;
pub mod practicum;
pub mod response;
pub mod status;
pub mod telegram;

pub use config::{load_config, Config};
pub use error::{HomeworkBotError, Result};

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use tokio_util::sync::CancellationToken;

use crate::io::ReqwestHttpClient;
use crate::notifier::Notifier;
use crate::poller::Poller;
use crate::practicum::PracticumClient;
use crate::telegram::TelegramNotifier;

/// Run the bot with the given configuration until Ctrl-C
pub async fn run(config: Config) -> Result<()> {
    config.validate()?;

    let http: Arc<dyn io::HttpClient> =
        Arc::new(ReqwestHttpClient::with_timeout(config.request_timeout())?);
    let api = PracticumClient::new(config.endpoint.clone(), Arc::clone(&http));
    let notifier: Arc<dyn Notifier> = Arc::new(TelegramNotifier::new(&config, Arc::clone(&http)));

    if let Err(e) = config.check_credentials() {
        tracing::warn!("{}; every cycle will fail until it is provided", e);
    }

    let cancel = CancellationToken::new();
    let cancel_for_signal = cancel.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                tracing::info!("Shutdown signal received");
                cancel_for_signal.cancel();
            }
            Err(e) => tracing::error!("Failed to listen for ctrl-c: {}", e),
        }
    });

    let mut poller = Poller::new(config, api, notifier);
    tracing::info!("Homework bot started");

    poller.run(cancel).await;

    tracing::info!("Homework bot stopped");
    Ok(())
}

/// Shorten `text` to at most `max_chars` characters, marking the cut with `…`
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let kept: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{}…", kept)
}

/// Current time as whole seconds since the Unix epoch
pub fn now_epoch_seconds() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

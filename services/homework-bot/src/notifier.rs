//! Notifier trait for relaying messages

use async_trait::async_trait;

/// Trait for sending text messages to a chat
#[async_trait]
pub trait Notifier: Send + Sync + std::fmt::Debug {
    /// Get the notifier type name (e.g. "telegram")
    fn type_name(&self) -> &str;

    /// Send `text` to `chat_id`, reporting delivery failures
    async fn send_message(&self, chat_id: &str, text: &str) -> crate::Result<()>;
}

/// Send a message and swallow delivery failures.
///
/// Failures are logged and never returned, so reporting an error cannot
/// itself abort the polling loop. Returns whether the message was delivered.
pub async fn notify(notifier: &dyn Notifier, chat_id: &str, message: &str) -> bool {
    match notifier.send_message(chat_id, message).await {
        Ok(()) => {
            tracing::debug!("Delivered message via '{}'", notifier.type_name());
            true
        }
        Err(e) => {
            tracing::error!(
                "Failed to deliver message via '{}': {}",
                notifier.type_name(),
                e
            );
            false
        }
    }
}

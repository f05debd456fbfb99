use async_trait::async_trait;

use crate::{domain::StatusPage, Result};

/// Homework-review API port. The reqwest adapter lives in `hwbot-practicum`.
#[async_trait]
pub trait ReviewApi: Send + Sync {
    /// Fetch homework records updated since `from_date` (unix seconds).
    async fn homework_statuses(&self, from_date: i64) -> Result<StatusPage>;
}

/// Outbound chat port. The teloxide adapter lives in `hwbot-telegram`.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Send a plain-text message to the configured chat.
    async fn send(&self, text: &str) -> Result<()>;
}

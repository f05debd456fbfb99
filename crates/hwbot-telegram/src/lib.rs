//! Telegram adapter (teloxide).
//!
//! This crate implements the `hwbot-core` Notifier port over the Telegram Bot
//! API, sending every message to the single configured chat.

use async_trait::async_trait;
use teloxide::prelude::*;
use tokio::time::sleep;
use tracing::info;

use hwbot_core::{domain::ChatId, errors::Error, ports::Notifier, Result};

#[derive(Clone)]
pub struct TelegramNotifier {
    bot: Bot,
    chat_id: ChatId,
}

impl TelegramNotifier {
    pub fn new(token: &str, chat_id: ChatId) -> Self {
        Self {
            bot: Bot::new(token),
            chat_id,
        }
    }

    fn tg_chat(&self) -> teloxide::types::ChatId {
        teloxide::types::ChatId(self.chat_id.0)
    }

    fn map_err(e: teloxide::RequestError) -> Error {
        Error::Delivery(format!("telegram error: {e}"))
    }

    async fn with_retry<T, Fut>(&self, mut op: impl FnMut() -> Fut) -> Result<T>
    where
        Fut: std::future::IntoFuture<Output = std::result::Result<T, teloxide::RequestError>>,
        Fut::IntoFuture: Send,
    {
        const MAX_RETRIES: usize = 1;
        let mut attempts = 0usize;
        loop {
            match op().await {
                Ok(v) => return Ok(v),
                Err(e) => match e {
                    teloxide::RequestError::RetryAfter(d) if attempts < MAX_RETRIES => {
                        attempts += 1;
                        sleep(d).await;
                        continue;
                    }
                    other => return Err(Self::map_err(other)),
                },
            }
        }
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn send(&self, text: &str) -> Result<()> {
        self.with_retry(|| self.bot.send_message(self.tg_chat(), text.to_string()))
            .await?;
        info!(chat_id = self.chat_id.0, "message delivered to chat");
        Ok(())
    }
}

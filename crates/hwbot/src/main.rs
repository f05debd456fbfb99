use std::sync::Arc;

use tracing::error;

use hwbot_core::{
    config::Config,
    poller::{PollState, Poller},
};
use hwbot_practicum::PracticumClient;
use hwbot_telegram::TelegramNotifier;

#[tokio::main]
async fn main() -> Result<(), hwbot_core::Error> {
    hwbot_core::logging::init("hwbot")?;

    // The one fatal failure: a missing credential at startup.
    let cfg = match Config::load() {
        Ok(cfg) => Arc::new(cfg),
        Err(e) => {
            error!(error = %e, "startup configuration invalid");
            return Err(e);
        }
    };

    let api = Arc::new(PracticumClient::new(
        cfg.endpoint.clone(),
        cfg.practicum_token.clone(),
        cfg.request_timeout,
    )?);
    let notifier = Arc::new(TelegramNotifier::new(
        &cfg.telegram_token,
        cfg.telegram_chat_id,
    ));

    Poller::new(cfg, api, notifier)
        .run(PollState::starting_now())
        .await;

    Ok(())
}

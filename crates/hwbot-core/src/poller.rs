//! The polling loop: fetch → detect → notify → advance cursor → sleep.

use std::sync::Arc;

use tokio::time::sleep;
use tracing::{error, info, warn};

use crate::{
    config::Config,
    detector::detect_change,
    domain::Verdict,
    ports::{Notifier, ReviewApi},
    Error,
};

/// Loop-owned state threaded through each iteration.
///
/// Lives only for the process lifetime; there is no cross-restart
/// deduplication.
#[derive(Clone, Debug, Default)]
pub struct PollState {
    /// `from_date` for the next query. Advances to the server-reported
    /// `current_date` after each successful poll.
    pub cursor: i64,
    /// Verdict of the most recent record seen since startup.
    pub last_verdict: Option<Verdict>,
    /// Error text already forwarded to the chat, so the same failure is not
    /// repeated every tick.
    last_error_notice: Option<String>,
}

impl PollState {
    /// Start polling from the current wall clock, as the original bot does.
    pub fn starting_now() -> Self {
        Self {
            cursor: chrono::Utc::now().timestamp(),
            ..Self::default()
        }
    }
}

pub struct Poller {
    cfg: Arc<Config>,
    api: Arc<dyn ReviewApi>,
    notifier: Arc<dyn Notifier>,
}

impl Poller {
    pub fn new(cfg: Arc<Config>, api: Arc<dyn ReviewApi>, notifier: Arc<dyn Notifier>) -> Self {
        Self { cfg, api, notifier }
    }

    /// Run until externally killed. Every error inside an iteration is logged
    /// and absorbed; the polling interval is the only retry backoff.
    pub async fn run(&self, mut state: PollState) {
        info!(
            cursor = state.cursor,
            interval_secs = self.cfg.poll_interval.as_secs(),
            "poller started"
        );
        loop {
            self.run_once(&mut state).await;
            sleep(self.cfg.poll_interval).await;
        }
    }

    /// One iteration against the current state.
    pub async fn run_once(&self, state: &mut PollState) {
        match self.poll(state).await {
            Ok(()) => {
                state.last_error_notice = None;
            }
            Err(e) => {
                error!(error = %e, cursor = state.cursor, "poll iteration failed");
                self.notify_error(state, &e).await;
            }
        }
    }

    async fn poll(&self, state: &mut PollState) -> crate::Result<()> {
        let page = self.api.homework_statuses(state.cursor).await?;
        info!(
            cursor = state.cursor,
            homeworks = page.homeworks.len(),
            current_date = page.current_date,
            "fetched homework statuses"
        );

        match detect_change(&page.homeworks, state.last_verdict) {
            Ok(Some(change)) => {
                // Delivery failure is logged but does not block progress.
                match self.notifier.send(&change.message).await {
                    Ok(()) => {
                        info!(verdict = change.verdict.as_code(), "status change delivered")
                    }
                    Err(e) => error!(error = %e, "failed to deliver status change"),
                }
                state.last_verdict = Some(change.verdict);
            }
            Ok(None) => {}
            // The cursor still advances past a record we cannot render, so the
            // loop does not refetch it forever.
            Err(e) => warn!(error = %e, "skipping notification for unrecognized verdict"),
        }

        state.cursor = page.current_date;
        Ok(())
    }

    /// Forward a fetch/parse failure to the chat, once per distinct error.
    async fn notify_error(&self, state: &mut PollState, e: &Error) {
        if !self.cfg.notify_on_error {
            return;
        }

        let notice = format!("Сбой в работе программы: {e}");
        if state.last_error_notice.as_deref() == Some(notice.as_str()) {
            return;
        }

        match self.notifier.send(&notice).await {
            Ok(()) => state.last_error_notice = Some(notice),
            Err(send_err) => error!(error = %send_err, "failed to deliver error notice"),
        }
    }
}

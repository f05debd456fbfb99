/// Core error type for the bot.
///
/// Adapter crates map their transport errors into this type so the polling
/// loop can decide log-and-continue vs fail-fast in one place.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("network error requesting {url}: {reason}")]
    Network { url: String, reason: String },

    #[error("unexpected HTTP status {status} from {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("unexpected response shape: {0}")]
    UnexpectedResponse(String),

    #[error("unknown homework verdict: {0:?}")]
    UnknownVerdict(String),

    #[error("notification delivery failed: {0}")]
    Delivery(String),
}

impl Error {
    /// Only configuration failures may terminate the process. Everything else
    /// is caught at the loop boundary and retried on the next tick.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::Config(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;

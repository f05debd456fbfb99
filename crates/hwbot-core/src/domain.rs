use crate::errors::Error;

/// Telegram chat id (numeric).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ChatId(pub i64);

/// Review verdict of a homework submission.
///
/// The wire format carries the verdict as a raw string; conversion happens at
/// the point a notification is about to be produced, so an unrecognized code
/// surfaces as [`Error::UnknownVerdict`] instead of a parse failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    Approved,
    Reviewing,
    Rejected,
}

impl Verdict {
    pub fn as_code(&self) -> &'static str {
        match self {
            Verdict::Approved => "approved",
            Verdict::Reviewing => "reviewing",
            Verdict::Rejected => "rejected",
        }
    }

    /// User-facing text appended to the notification for this verdict.
    pub fn describe(&self) -> &'static str {
        match self {
            Verdict::Approved => "Работа проверена: ревьюеру всё понравилось. Ура!",
            Verdict::Reviewing => "Работа взята на проверку ревьюером.",
            Verdict::Rejected => "Работа проверена: у ревьюера есть замечания.",
        }
    }
}

impl TryFrom<&str> for Verdict {
    type Error = Error;

    fn try_from(code: &str) -> Result<Self, Error> {
        match code {
            "approved" => Ok(Verdict::Approved),
            "reviewing" => Ok(Verdict::Reviewing),
            "rejected" => Ok(Verdict::Rejected),
            other => Err(Error::UnknownVerdict(other.to_string())),
        }
    }
}

/// One homework submission as delivered by the review API.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Homework {
    pub name: String,
    /// Raw verdict code off the wire (see [`Verdict`]).
    pub status: String,
    /// Unix seconds of the last status update, when the API sends it.
    pub date_updated: Option<i64>,
}

/// One page of the review API response: homeworks in API order (most recent
/// last) plus the server-reported timestamp used as the next polling cursor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusPage {
    pub homeworks: Vec<Homework>,
    pub current_date: i64,
}

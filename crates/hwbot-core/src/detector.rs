//! Status-change detection over the most recent homework record.

use crate::{
    domain::{Homework, Verdict},
    formatting::status_message,
    Result,
};

/// A notification the poller should deliver.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusChange {
    pub verdict: Verdict,
    pub message: String,
}

/// Compare the newest record (last in API order) against the verdict last
/// seen by this process.
///
/// Empty page or unchanged verdict means no action. An unknown verdict code
/// is an error; the caller skips the notification and keeps its previous
/// state.
pub fn detect_change(
    homeworks: &[Homework],
    last: Option<Verdict>,
) -> Result<Option<StatusChange>> {
    let Some(newest) = homeworks.last() else {
        return Ok(None);
    };

    let verdict = Verdict::try_from(newest.status.as_str())?;
    if last == Some(verdict) {
        return Ok(None);
    }

    let message = status_message(newest)?;
    Ok(Some(StatusChange { verdict, message }))
}

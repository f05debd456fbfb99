//! Verdict → user-facing message templates.

use crate::{
    domain::{Homework, Verdict},
    Result,
};

/// Render the notification text for a homework record.
///
/// The verdict code comes off the wire as a raw string; an unrecognized code
/// is an [`crate::Error::UnknownVerdict`] here rather than a blank message.
pub fn status_message(homework: &Homework) -> Result<String> {
    let verdict = Verdict::try_from(homework.status.as_str())?;
    Ok(format!(
        "Изменился статус проверки работы \"{}\". {}",
        homework.name,
        verdict.describe()
    ))
}

use super::History;
use serde::de::DeserializeOwned;
use serde_json::Value;

const LOG_TARGET: &str = "   locator";

/// The raw payload a provider stored in the most recent run, if any.
#[must_use]
pub fn locate_raw<'a>(history: &'a History, identifier: &str) -> Option<&'a Value> {
    history.latest()?.payload(identifier)
}

/// Find and decode the data a provider produced in the most recent run.
///
/// Returns `None` when there is no history, when the most recent run has no entry for
/// `identifier`, or when the stored payload no longer decodes into `T`. None of these are
/// errors: a first run has nothing to compare with, and a changed data shape simply means the
/// comparison starts over.
#[must_use]
pub fn locate<T: DeserializeOwned>(history: &History, identifier: &str) -> Option<T> {
    let Some(raw) = locate_raw(history, identifier) else {
        log::debug!(target: LOG_TARGET, "{identifier}: no previous data");
        return None;
    };

    match T::deserialize(raw) {
        Ok(data) => Some(data),
        Err(e) => {
            log::warn!(target: LOG_TARGET, "{identifier}: ignoring previous data that no longer decodes: {e}");
            None
        }
    }
}

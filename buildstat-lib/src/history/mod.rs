//! Persisted run history
//!
//! Every `collect` run appends one [`HistoryRecord`] to the front of a JSON history file.
//! A record maps provider identifiers to the raw payload each provider produced on that run,
//! alongside a little run metadata (description and timestamp) stored under reserved keys.
//!
//! The [`locate`] function is how the pipeline reads prior data back: it only ever consults the
//! most recent record, and it turns both "never recorded" and "recorded in a shape we no longer
//! understand" into `None` so that schema drift between versions never breaks a run.

mod history_file;
mod history_record;
mod locator;

pub use history_file::HistoryFile;
pub use history_record::{DESCRIPTION_KEY, History, HistoryRecord, TIMESTAMP_KEY};
pub use locator::{locate, locate_raw};

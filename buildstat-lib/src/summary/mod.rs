//! Comparison of two snapshots of the same metric
//!
//! A [`Summary`] is what a provider produces when it compares its freshly extracted data with the
//! data it produced on the previous run. Providers decide *which* fields to compare; the helpers
//! here decide *how*:
//!
//! - [`Summary::numeric`] reports absolute and relative change of a single number, and says
//!   "no change" rather than nothing when the values are equal.
//! - [`Summary::collection`] diffs two lists by a stable identity key, so reordering alone is
//!   never reported, and lists additions, removals, and changed items as separate groups.
//! - [`Summary::merge`] combines several per-field summaries into one provider summary.
//!
//! When there is no previous data, every helper yields a [`Status::New`] summary.

mod change_summary;
mod collection;
mod numeric;

pub use change_summary::{Status, Summary, Tone};
pub use collection::CollectionDiff;
pub use numeric::{Direction, Unit};

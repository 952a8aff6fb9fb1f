use super::{Direction, Status, Summary, Tone};
use core::fmt::Display;
use std::collections::BTreeMap;

/// Maximum number of items listed per group before the rest is elided.
const MAX_LISTED_ITEMS: usize = 20;

/// Differences between two versions of a list, matched by identity key.
///
/// Items are matched by key rather than position, so reordering a list never shows up as a
/// difference. Keys are expected to be unique within a list; duplicates collapse to the last item.
#[derive(Debug, PartialEq)]
pub struct CollectionDiff<'a, T> {
    /// Items whose key is new in the current list, ordered by key.
    pub added: Vec<&'a T>,

    /// Items whose key disappeared from the current list, ordered by key.
    pub removed: Vec<&'a T>,

    /// `(previous, current)` pairs whose key persists but whose value changed, ordered by key.
    pub changed: Vec<(&'a T, &'a T)>,
}

impl<'a, T: PartialEq> CollectionDiff<'a, T> {
    pub fn compute<K: Ord>(current: &'a [T], previous: &'a [T], key: impl Fn(&T) -> K) -> Self {
        let current_by_key: BTreeMap<K, &T> = current.iter().map(|item| (key(item), item)).collect();
        let previous_by_key: BTreeMap<K, &T> = previous.iter().map(|item| (key(item), item)).collect();

        let added = current_by_key
            .iter()
            .filter(|(k, _)| !previous_by_key.contains_key(*k))
            .map(|(_, item)| *item)
            .collect();

        let removed = previous_by_key
            .iter()
            .filter(|(k, _)| !current_by_key.contains_key(*k))
            .map(|(_, item)| *item)
            .collect();

        let changed = current_by_key
            .iter()
            .filter_map(|(k, cur)| previous_by_key.get(k).filter(|prev| **prev != *cur).map(|prev| (*prev, *cur)))
            .collect();

        Self { added, removed, changed }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.changed.is_empty()
    }
}

impl Summary {
    /// Compare two versions of a list-valued metric.
    ///
    /// `key` extracts the identity of an item. `direction` says whether a growing list is good
    /// or bad news; it only affects the tone, based on the change in item count.
    #[must_use]
    pub fn collection<T, K>(
        title: impl Into<String>,
        current: &[T],
        previous: Option<&[T]>,
        key: impl Fn(&T) -> K,
        direction: Direction,
    ) -> Self
    where
        T: PartialEq + Display,
        K: Ord,
    {
        let title = title.into();
        let count = count_as_f64(current.len());

        let Some(previous) = previous else {
            return Self::new_metric(title, items_text(current.len())).with_numeric_value(count);
        };

        let diff = CollectionDiff::compute(current, previous, key);
        if diff.is_empty() {
            let line = format!("{title}: no change ({})", items_text(current.len()));
            return Self::new(title, Status::Unchanged, Tone::Neutral, vec![line]).with_numeric_value(count);
        }

        let mut counts = Vec::with_capacity(3);
        if !diff.added.is_empty() {
            counts.push(format!("{} added", diff.added.len()));
        }
        if !diff.removed.is_empty() {
            counts.push(format!("{} removed", diff.removed.len()));
        }
        if !diff.changed.is_empty() {
            counts.push(format!("{} changed", diff.changed.len()));
        }

        let mut lines = vec![format!("{title}: {} (now {})", counts.join(", "), items_text(current.len()))];
        push_group(&mut lines, diff.added.iter().map(|item| format!("  + {item}")));
        push_group(&mut lines, diff.removed.iter().map(|item| format!("  - {item}")));
        push_group(&mut lines, diff.changed.iter().map(|(prev, cur)| format!("  ~ {prev} -> {cur}")));

        let tone = direction.tone_for(count - count_as_f64(previous.len()));
        Self::new(title, Status::Changed, tone, lines).with_numeric_value(count)
    }
}

fn push_group(lines: &mut Vec<String>, group: impl ExactSizeIterator<Item = String>) {
    let total = group.len();
    lines.extend(group.take(MAX_LISTED_ITEMS));
    if total > MAX_LISTED_ITEMS {
        lines.push(format!("  ... and {} more", total - MAX_LISTED_ITEMS));
    }
}

fn items_text(count: usize) -> String {
    if count == 1 { "1 item".to_string() } else { format!("{count} items") }
}

#[expect(clippy::cast_precision_loss, reason = "list lengths are far below 2^52")]
fn count_as_f64(count: usize) -> f64 {
    count as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_reordering_is_not_a_change() {
        let previous = strings(&["A", "B", "C"]);
        let current = strings(&["C", "A", "B"]);

        let diff = CollectionDiff::compute(&current, &previous, Clone::clone);
        assert!(diff.added.is_empty());
        assert!(diff.removed.is_empty());
        assert!(diff.changed.is_empty());

        let summary = Summary::collection("Warnings", &current, Some(&previous[..]), Clone::clone, Direction::LowerIsBetter);
        assert_eq!(summary.status(), Status::Unchanged);
        assert_eq!(summary.text(), "Warnings: no change (3 items)");
    }

    #[test]
    fn test_added_and_removed_groups() {
        let previous = strings(&["A", "B"]);
        let current = strings(&["B", "C"]);

        let summary = Summary::collection("Warnings", &current, Some(&previous[..]), Clone::clone, Direction::LowerIsBetter);
        assert_eq!(summary.status(), Status::Changed);
        assert_eq!(summary.tone(), Tone::Neutral);
        assert_eq!(
            summary.lines(),
            ["Warnings: 1 added, 1 removed (now 2 items)", "  + C", "  - A"]
        );
        assert!(!summary.text().contains('B'));
    }

    #[test]
    fn test_changed_items_by_key() {
        #[derive(Debug, PartialEq)]
        struct Pkg(&'static str, &'static str);

        impl Display for Pkg {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{} {}", self.0, self.1)
            }
        }

        let previous = [Pkg("serde", "1.0.1"), Pkg("log", "0.4.0")];
        let current = [Pkg("log", "0.4.0"), Pkg("serde", "1.0.2")];

        let diff = CollectionDiff::compute(&current, &previous, |p| p.0);
        assert_eq!(diff.changed, vec![(&previous[0], &current[1])]);

        let summary = Summary::collection("Dependencies", &current, Some(&previous[..]), |p| p.0, Direction::Neutral);
        assert_eq!(summary.lines(), ["Dependencies: 1 changed (now 2 items)", "  ~ serde 1.0.1 -> serde 1.0.2"]);
    }

    #[test]
    fn test_growth_tone_follows_direction() {
        let previous = strings(&["A"]);
        let current = strings(&["A", "B"]);

        let summary = Summary::collection("Warnings", &current, Some(&previous[..]), Clone::clone, Direction::LowerIsBetter);
        assert_eq!(summary.tone(), Tone::Negative);

        let summary = Summary::collection("Tests", &current, Some(&previous[..]), Clone::clone, Direction::HigherIsBetter);
        assert_eq!(summary.tone(), Tone::Positive);
    }

    #[test]
    fn test_new_collection() {
        let current = strings(&["A"]);
        let summary = Summary::collection("Warnings", &current, None, Clone::clone, Direction::LowerIsBetter);
        assert_eq!(summary.status(), Status::New);
        assert_eq!(summary.text(), "Warnings: new metric, no prior data (now 1 item)");
    }

    #[test]
    fn test_long_groups_are_elided() {
        let current: Vec<String> = (0..25).map(|i| format!("w{i:02}")).collect();
        let summary = Summary::collection("Warnings", &current, Some(&[] as &[String]), Clone::clone, Direction::LowerIsBetter);

        assert_eq!(summary.lines().len(), 1 + MAX_LISTED_ITEMS + 1);
        assert_eq!(summary.lines().last().map(String::as_str), Some("  ... and 5 more"));
    }
}

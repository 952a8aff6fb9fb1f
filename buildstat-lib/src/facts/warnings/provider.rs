use super::WarningsData;
use crate::Result;
use crate::facts::{self, RunContext};
use crate::summary::{Direction, Summary};
use camino::Utf8PathBuf;
use ohno::IntoAppError;
use regex::Regex;
use core::fmt::{Display, Formatter};
use std::fs;
use std::sync::LazyLock;

pub const DEFAULT_IDENTIFIER: &str = "Warnings";

const LOG_TARGET: &str = "  warnings";

static WARNING_LINE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^warning: (.+)$").expect("invalid regex"));
static LOCATION_LINE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*--> (.+)$").expect("invalid regex"));
static SUMMARY_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(generated \d+ warnings?( \(.*\))?|^\d+ warnings? emitted)$").expect("invalid regex")
});
static LOCATED_ITEM: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(.+) \((.+):\d+:\d+\)$").expect("invalid regex"));

/// Collects compiler warnings from a captured build log.
#[derive(Debug, Clone)]
pub struct WarningsProvider {
    identifier: String,
    log_file: Utf8PathBuf,
}

impl WarningsProvider {
    #[must_use]
    pub fn new(identifier: impl Into<String>, log_file: impl Into<Utf8PathBuf>) -> Self {
        Self {
            identifier: identifier.into(),
            log_file: log_file.into(),
        }
    }
}

impl facts::Provider for WarningsProvider {
    type Data = WarningsData;

    fn identifier(&self) -> &str {
        &self.identifier
    }

    fn extract(&self, context: &RunContext) -> Result<WarningsData> {
        let path = context.resolve(&self.log_file);
        let text = fs::read_to_string(&path).into_app_err_with(|| format!("unable to read build log '{path}'"))?;

        let items = parse_warnings(&text);
        log::debug!(target: LOG_TARGET, "Found {} distinct warning(s) in '{path}'", items.len());

        Ok(WarningsData { items })
    }

    fn summarize(&self, current: &WarningsData, previous: Option<&WarningsData>) -> Summary {
        let current = tracked(&current.items);
        let previous = previous.map(|p| tracked(&p.items));

        Summary::collection(
            "Warnings",
            &current,
            previous.as_deref(),
            |warning| warning.identity,
            Direction::LowerIsBetter,
        )
    }
}

/// A warning as it is matched against the previous run.
///
/// Line and column shift whenever unrelated code is edited, so they are shown but not compared.
/// Identical warnings in the same file are told apart by their rank among each other.
#[derive(Debug, Clone, Copy)]
struct TrackedWarning<'a> {
    identity: (&'a str, Option<&'a str>, usize),
    text: &'a str,
}

impl PartialEq for TrackedWarning<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.identity == other.identity
    }
}

impl Display for TrackedWarning<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.text)
    }
}

fn tracked(items: &[String]) -> Vec<TrackedWarning<'_>> {
    let mut result: Vec<TrackedWarning<'_>> = Vec::with_capacity(items.len());

    for item in items {
        let (message, file) = match LOCATED_ITEM.captures(item) {
            Some(caps) => match (caps.get(1), caps.get(2)) {
                (Some(message), Some(file)) => (message.as_str(), Some(file.as_str())),
                _ => (item.as_str(), None),
            },
            None => (item.as_str(), None),
        };

        let rank = result
            .iter()
            .filter(|w| w.identity.0 == message && w.identity.1 == file)
            .count();

        result.push(TrackedWarning {
            identity: (message, file, rank),
            text: item,
        });
    }

    result
}

/// Extract the distinct warnings from rustc-style output.
///
/// A warning's first source location, when present, is appended so that the same message at
/// two places counts as two warnings.
fn parse_warnings(text: &str) -> Vec<String> {
    let mut items = Vec::new();
    let mut lines = text.lines().peekable();

    while let Some(line) = lines.next() {
        let Some(caps) = WARNING_LINE.captures(line) else {
            continue;
        };

        let message = caps[1].trim();
        if SUMMARY_LINE.is_match(message) {
            continue;
        }

        let location = lines
            .peek()
            .and_then(|next| LOCATION_LINE.captures(next))
            .map(|loc| loc[1].trim().to_string());

        items.push(match location {
            Some(location) => format!("{message} ({location})"),
            None => message.to_string(),
        });
    }

    items.sort();
    items.dedup();
    items
}

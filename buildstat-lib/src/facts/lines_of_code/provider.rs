use super::LinesOfCodeData;
use crate::Result;
use crate::facts::{self, RunContext};
use crate::summary::{Direction, Summary, Unit};
use camino::Utf8PathBuf;
use ohno::{IntoAppError, bail};
use std::fs;
use walkdir::{DirEntry, WalkDir};

pub const DEFAULT_IDENTIFIER: &str = "LinesOfCode";

const LOG_TARGET: &str = "       loc";
const MAX_DEPTH: usize = 50;

/// Counts source files and their lines under a directory.
///
/// Hidden directories and `target` are skipped. Lines are counted as written, blank lines
/// included.
#[derive(Debug, Clone)]
pub struct LinesOfCodeProvider {
    identifier: String,
    directory: Utf8PathBuf,
    extensions: Vec<String>,
}

impl LinesOfCodeProvider {
    #[must_use]
    pub fn new(identifier: impl Into<String>, directory: impl Into<Utf8PathBuf>, extensions: Vec<String>) -> Self {
        Self {
            identifier: identifier.into(),
            directory: directory.into(),
            extensions,
        }
    }

    fn matches_extension(&self, entry: &DirEntry) -> bool {
        entry
            .path()
            .extension()
            .and_then(|s| s.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e.trim_start_matches('.') == ext))
    }
}

impl facts::Provider for LinesOfCodeProvider {
    type Data = LinesOfCodeData;

    fn identifier(&self) -> &str {
        &self.identifier
    }

    fn extract(&self, context: &RunContext) -> Result<LinesOfCodeData> {
        let dir = context.resolve(&self.directory);
        if !dir.is_dir() {
            bail!("source directory '{dir}' does not exist");
        }

        let mut data = LinesOfCodeData { files: 0, lines: 0 };

        let walker = WalkDir::new(&dir)
            .follow_links(false)
            .max_depth(MAX_DEPTH)
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_skipped_dir(e));

        for entry_result in walker {
            let entry = entry_result.into_app_err_with(|| format!("could not walk directory '{dir}'"))?;

            if entry.file_type().is_dir() || !self.matches_extension(&entry) {
                continue;
            }

            let bytes = fs::read(entry.path()).into_app_err_with(|| format!("could not read '{}'", entry.path().display()))?;
            let text = String::from_utf8_lossy(&bytes);

            data.files += 1;
            data.lines += text.lines().count() as u64;
        }

        log::debug!(target: LOG_TARGET, "Counted {} line(s) in {} file(s) under '{dir}'", data.lines, data.files);
        Ok(data)
    }

    #[expect(clippy::cast_precision_loss, reason = "line counts are far below 2^52")]
    fn summarize(&self, current: &LinesOfCodeData, previous: Option<&LinesOfCodeData>) -> Summary {
        let lines = Summary::numeric(
            "Lines of code",
            current.lines as f64,
            previous.map(|p| p.lines as f64),
            Unit::Count,
            Direction::Neutral,
        );
        let files = Summary::numeric(
            "Source files",
            current.files as f64,
            previous.map(|p| p.files as f64),
            Unit::Count,
            Direction::Neutral,
        );

        Summary::merge("Lines of code", [lines, files])
    }
}

fn is_skipped_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.starts_with('.') || name == "target")
}

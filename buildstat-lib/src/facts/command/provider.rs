use super::CommandData;
use crate::Result;
use crate::facts::{self, RunContext};
use crate::summary::{Direction, Summary, Unit};
use ohno::app_err;
use regex::Regex;
use std::sync::LazyLock;

static NUMBER_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-?\d+(?:\.\d+)?").expect("invalid regex"));

/// Runs a shell command and records the first number it prints.
///
/// This covers any metric a script can produce, e.g. a test count or a benchmark time.
#[derive(Debug, Clone)]
pub struct CommandProvider {
    identifier: String,
    title: String,
    command: String,
    unit: Unit,
    direction: Direction,
}

impl CommandProvider {
    #[must_use]
    pub fn new(identifier: impl Into<String>, command: impl Into<String>, unit: Unit, direction: Direction) -> Self {
        let identifier = identifier.into();
        Self {
            title: identifier.clone(),
            identifier,
            command: command.into(),
            unit,
            direction,
        }
    }

    /// Use `title` instead of the identifier when reporting.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }
}

impl facts::Provider for CommandProvider {
    type Data = CommandData;

    fn identifier(&self) -> &str {
        &self.identifier
    }

    fn extract(&self, context: &RunContext) -> Result<CommandData> {
        let stdout = context.shell().run(&self.command)?;
        let value = parse_first_number(&stdout)
            .ok_or_else(|| app_err!("'{}' did not print a number (output: '{}')", self.command, stdout.trim()))?;

        Ok(CommandData { value })
    }

    fn summarize(&self, current: &CommandData, previous: Option<&CommandData>) -> Summary {
        Summary::numeric(&self.title, current.value, previous.map(|p| p.value), self.unit, self.direction)
    }
}

fn parse_first_number(text: &str) -> Option<f64> {
    NUMBER_REGEX.find(text)?.as_str().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facts::{ProjectInfo, Provider};
    use crate::summary::{Status, Tone};
    use camino::Utf8PathBuf;

    #[test]
    fn test_parse_first_number() {
        assert_eq!(parse_first_number("42"), Some(42.0));
        assert_eq!(parse_first_number("test result: ok. 17 passed; 0 failed"), Some(17.0));
        assert_eq!(parse_first_number("took 1.25s"), Some(1.25));
        assert_eq!(parse_first_number("delta -3"), Some(-3.0));
        assert_eq!(parse_first_number("nothing here"), None);
    }

    #[test]
    #[cfg(unix)]
    fn test_extract_runs_command() {
        let dir = tempfile::tempdir().unwrap();
        let root = Utf8PathBuf::try_from(dir.path().to_path_buf()).unwrap();
        let context = RunContext::new(ProjectInfo::new("demo", ""), root);

        let provider = CommandProvider::new("Tests", "echo 'passed: 128'", Unit::Count, Direction::HigherIsBetter);
        assert_eq!(provider.extract(&context).unwrap(), CommandData { value: 128.0 });
    }

    #[test]
    #[cfg(unix)]
    fn test_extract_non_numeric_output() {
        let dir = tempfile::tempdir().unwrap();
        let root = Utf8PathBuf::try_from(dir.path().to_path_buf()).unwrap();
        let context = RunContext::new(ProjectInfo::new("demo", ""), root);

        let provider = CommandProvider::new("Tests", "echo none", Unit::Count, Direction::HigherIsBetter);
        let err = provider.extract(&context).unwrap_err();
        assert!(err.to_string().contains("did not print a number"));
    }

    #[test]
    #[cfg(unix)]
    fn test_extract_failing_command() {
        let dir = tempfile::tempdir().unwrap();
        let root = Utf8PathBuf::try_from(dir.path().to_path_buf()).unwrap();
        let context = RunContext::new(ProjectInfo::new("demo", ""), root);

        let provider = CommandProvider::new("Tests", "exit 1", Unit::Count, Direction::HigherIsBetter);
        let _ = provider.extract(&context).unwrap_err();
    }

    #[test]
    fn test_summarize_uses_title_and_direction() {
        let provider =
            CommandProvider::new("Tests", "true", Unit::Count, Direction::HigherIsBetter).with_title("Passing tests");
        let summary = provider.summarize(&CommandData { value: 130.0 }, Some(&CommandData { value: 128.0 }));

        assert_eq!(summary.title(), "Passing tests");
        assert_eq!(summary.status(), Status::Changed);
        assert_eq!(summary.tone(), Tone::Positive);
    }
}

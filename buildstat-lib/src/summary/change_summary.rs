use core::fmt::{Display, Formatter};

/// Whether a metric changed since the previous run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// There was no usable previous data.
    New,

    /// The metric is identical to the previous run.
    Unchanged,

    /// The metric differs from the previous run.
    Changed,
}

/// How a change should be perceived, used to color reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tone {
    Positive,
    Negative,
    Neutral,
}

/// The outcome of comparing one provider's data with its previous data.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    title: String,
    status: Status,
    tone: Tone,
    lines: Vec<String>,
    numeric_value: Option<f64>,
}

impl Summary {
    /// Create a summary from already rendered lines.
    #[must_use]
    pub fn new(title: impl Into<String>, status: Status, tone: Tone, lines: Vec<String>) -> Self {
        Self {
            title: title.into(),
            status,
            tone,
            lines,
            numeric_value: None,
        }
    }

    /// A summary for a metric that has no previous data to compare with.
    #[must_use]
    pub fn new_metric(title: impl Into<String>, current: impl Display) -> Self {
        let title = title.into();
        let line = format!("{title}: new metric, no prior data (now {current})");
        Self::new(title, Status::New, Tone::Neutral, vec![line])
    }

    /// Attach the headline number of the metric, if it has one.
    #[must_use]
    pub const fn with_numeric_value(mut self, value: f64) -> Self {
        self.numeric_value = Some(value);
        self
    }

    /// Combine per-field summaries into a single summary for a provider.
    ///
    /// The merged summary is `New` only if every part is new, `Unchanged` only if every part is
    /// unchanged, and `Changed` otherwise. Any negative part makes the whole negative; otherwise
    /// any positive part makes it positive. The headline number is taken from the first part
    /// that has one.
    #[must_use]
    pub fn merge(title: impl Into<String>, parts: impl IntoIterator<Item = Self>) -> Self {
        let parts: Vec<_> = parts.into_iter().collect();

        let status = if !parts.is_empty() && parts.iter().all(|p| p.status == Status::New) {
            Status::New
        } else if parts.iter().all(|p| p.status == Status::Unchanged) {
            Status::Unchanged
        } else {
            Status::Changed
        };

        let tone = if parts.iter().any(|p| p.tone == Tone::Negative) {
            Tone::Negative
        } else if parts.iter().any(|p| p.tone == Tone::Positive) {
            Tone::Positive
        } else {
            Tone::Neutral
        };

        let numeric_value = parts.iter().find_map(|p| p.numeric_value);
        let lines = parts.into_iter().flat_map(|p| p.lines).collect();

        Self {
            title: title.into(),
            status,
            tone,
            lines,
            numeric_value,
        }
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub const fn status(&self) -> Status {
        self.status
    }

    #[must_use]
    pub const fn tone(&self) -> Tone {
        self.tone
    }

    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    #[must_use]
    pub const fn numeric_value(&self) -> Option<f64> {
        self.numeric_value
    }

    /// Render the summary as plain text, one line per entry.
    #[must_use]
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

impl Display for Summary {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.text())
    }
}

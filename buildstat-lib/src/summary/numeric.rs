use super::{Status, Summary, Tone};
use serde::{Deserialize, Serialize};

const KIB: f64 = 1024.0;
const MIB: f64 = KIB * 1024.0;
const GIB: f64 = MIB * 1024.0;

/// Which way a metric should move to count as an improvement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Smaller is better, e.g. binary size or warning count.
    LowerIsBetter,

    /// Larger is better, e.g. test count or coverage.
    HigherIsBetter,

    /// Changes are informational only.
    #[default]
    Neutral,
}

impl Direction {
    /// The tone of a change whose sign is given by `delta`.
    #[must_use]
    pub fn tone_for(self, delta: f64) -> Tone {
        match self {
            _ if delta.abs() < f64::EPSILON => Tone::Neutral,
            Self::Neutral => Tone::Neutral,
            Self::LowerIsBetter if delta < 0.0 => Tone::Positive,
            Self::HigherIsBetter if delta > 0.0 => Tone::Positive,
            Self::LowerIsBetter | Self::HigherIsBetter => Tone::Negative,
        }
    }
}

/// How to render the values of a numeric metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    #[default]
    Count,
    Bytes,
    Percent,
    Seconds,
}

impl Unit {
    /// Render a non-negative magnitude in this unit.
    #[must_use]
    pub fn format(self, value: f64) -> String {
        match self {
            Self::Count if value.fract() == 0.0 => format!("{value:.0}"),
            Self::Count => format!("{value:.2}"),
            Self::Bytes if value.abs() < KIB => format!("{value:.0} bytes"),
            Self::Bytes if value.abs() < MIB => format!("{:.1} KiB", value / KIB),
            Self::Bytes if value.abs() < GIB => format!("{:.1} MiB", value / MIB),
            Self::Bytes => format!("{:.2} GiB", value / GIB),
            Self::Percent => format!("{value:.1}%"),
            Self::Seconds => format!("{value:.1}s"),
        }
    }
}

impl Summary {
    /// Compare a single number with its previous value.
    ///
    /// Equal values produce an `Unchanged` summary with a "no change" line. Otherwise the line
    /// reports the absolute delta, the relative change (omitted when the previous value is zero),
    /// and both values.
    #[must_use]
    pub fn numeric(title: impl Into<String>, current: f64, previous: Option<f64>, unit: Unit, direction: Direction) -> Self {
        let title = title.into();

        let Some(previous) = previous else {
            return Self::new_metric(title, unit.format(current)).with_numeric_value(current);
        };

        let delta = current - previous;
        if delta.abs() < f64::EPSILON {
            let line = format!("{title}: no change ({})", unit.format(current));
            return Self::new(title, Status::Unchanged, Tone::Neutral, vec![line]).with_numeric_value(current);
        }

        let verb = if delta > 0.0 { "increased" } else { "decreased" };
        let relative = if previous.abs() < f64::EPSILON {
            String::new()
        } else {
            format!(" ({:+.1}%)", delta / previous.abs() * 100.0)
        };

        let line = format!(
            "{title}: {verb} by {}{relative}, from {} to {}",
            unit.format(delta.abs()),
            unit.format(previous),
            unit.format(current)
        );

        Self::new(title, Status::Changed, direction.tone_for(delta), vec![line]).with_numeric_value(current)
    }
}

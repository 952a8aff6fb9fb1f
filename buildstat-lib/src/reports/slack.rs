use crate::facts::{ProjectInfo, RunOutput};
use crate::summary::Tone;
use serde_json::{Value, json};

const POSITIVE_COLOR: &str = "#36a64f";
const NEGATIVE_COLOR: &str = "#d50000";
const NEUTRAL_COLOR: &str = "#cccccc";

/// Renders a run as a Slack incoming-webhook message.
#[derive(Debug, Clone, Copy, Default)]
pub struct SlackFormatter;

impl SlackFormatter {
    #[must_use]
    pub fn format(output: &RunOutput, project: &ProjectInfo) -> Value {
        let header = if project.description().is_empty() {
            format!("*{}* build metrics", project.name())
        } else {
            format!("*{}* build metrics for {}", project.name(), project.description())
        };

        let attachments: Vec<Value> = output
            .records()
            .iter()
            .map(|record| {
                let summary = record.summary();
                let mut attachment = json!({
                    "color": tone_color(summary.tone()),
                    "title": summary.title(),
                    "text": summary.text(),
                    "fallback": summary.text(),
                });

                if let Some(value) = summary.numeric_value() {
                    attachment["fields"] = json!([{
                        "title": "Value",
                        "value": value.to_string(),
                        "short": true,
                    }]);
                }

                attachment
            })
            .collect();

        json!({
            "text": header,
            "attachments": attachments,
        })
    }
}

const fn tone_color(tone: Tone) -> &'static str {
    match tone {
        Tone::Positive => POSITIVE_COLOR,
        Tone::Negative => NEGATIVE_COLOR,
        Tone::Neutral => NEUTRAL_COLOR,
    }
}

use crate::Result;
use crate::facts::RunOutput;
use crate::summary::{Status, Tone};
use core::fmt::Write;
use owo_colors::OwoColorize;

pub fn generate<W: Write>(output: &RunOutput, use_colors: bool, writer: &mut W) -> Result<()> {
    for (index, record) in output.records().iter().enumerate() {
        if index > 0 {
            writeln!(writer)?;
        }

        let summary = record.summary();
        let marker = status_marker(summary.status());

        if use_colors {
            writeln!(writer, "{} {}", marker.bold(), record.identifier().bold())?;
        } else {
            writeln!(writer, "{marker} {}", record.identifier())?;
        }

        for line in summary.lines() {
            if use_colors {
                match summary.tone() {
                    Tone::Positive => writeln!(writer, "  {}", line.green())?,
                    Tone::Negative => writeln!(writer, "  {}", line.red())?,
                    Tone::Neutral => writeln!(writer, "  {line}")?,
                }
            } else {
                writeln!(writer, "  {line}")?;
            }
        }
    }

    Ok(())
}

const fn status_marker(status: Status) -> &'static str {
    match status {
        Status::New => "[new]",
        Status::Unchanged => "[ = ]",
        Status::Changed => "[ ~ ]",
    }
}

//! Rendering and delivery of run results
//!
//! # Implementation Model
//!
//! Two renderings are provided, both operating on a completed [`RunOutput`](crate::facts::RunOutput):
//! - **Console**: one block per metric, colored by tone when the terminal supports it
//! - **Slack**: a webhook message with one color-coded attachment per metric
//!
//! Delivery is behind the [`Notifier`] trait so the command layer can be tested without a
//! network. [`WebhookNotifier`] posts the message with a blocking HTTP client.

mod console;
mod slack;
mod webhook;

pub use console::generate as generate_console;
pub use slack::SlackFormatter;
pub use webhook::{Notifier, WebhookNotifier};

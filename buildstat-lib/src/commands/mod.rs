//! Command-line interface and orchestration for buildstat
//!
//! This module implements the CLI commands and ties the providers, history, and reports
//! together into end-to-end workflows.
//!
//! # Implementation Model
//!
//! ## Commands
//!
//! - **collect**: Run every configured provider, compare with the previous run, print a
//!   report, append the run to the history file, and post a summary to a webhook
//! - **init**: Generate a default configuration file
//! - **validate**: Check a configuration file
//! - **history**: Show the data recorded by the most recent run
//!
//! ## Execution Flow
//!
//! The `run` function parses command-line arguments using clap and routes to the appropriate
//! command handler. All output goes through a [`Host`] so commands can be exercised in tests
//! without touching the real process streams.
//!
//! Configuration is a TOML file (`buildstat.toml` by default) naming the project and listing
//! the providers to run. Paths in it are relative to the file's own directory.

mod collect;
mod common;
mod config;
mod history;
mod host;
mod init;
mod run;
mod validate;

pub use collect::{CollectArgs, collect_metrics, collect_metrics_with};
pub use common::{ColorMode, LogLevel};
pub use config::{Config, ProjectConfig, ProviderConfig};
pub use history::{HistoryArgs, show_history};
pub use host::Host;
pub use init::{InitArgs, init_config};
pub use run::run;
pub use validate::{ValidateArgs, validate_config};

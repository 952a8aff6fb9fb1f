//! Command dispatch logic for buildstat

use super::{CollectArgs, HistoryArgs, InitArgs, ValidateArgs, collect_metrics, init_config, show_history, validate_config};
use crate::{Host, Result};
use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use clap::{Parser, Subcommand};
use std::io::Write;

const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "buildstat", author, version, long_about = None)]
#[command(about = "Track project metrics across builds and report what changed")]
#[command(styles = CLAP_STYLES)]
struct Cli {
    #[command(subcommand)]
    command: BuildstatSubcommand,
}

#[derive(Subcommand, Debug)]
enum BuildstatSubcommand {
    /// Extract metrics, compare them with the previous run, record and report the result
    Collect(Box<CollectArgs>),
    /// Generate a default configuration file
    Init(InitArgs),
    /// Validate a configuration file
    Validate(ValidateArgs),
    /// Show what the most recent run recorded
    History(HistoryArgs),
}

/// Dispatch command-line arguments to the appropriate handler
///
/// This function parses the command-line arguments and executes the corresponding
/// subcommand. It's designed to be called from main.rs with the program arguments.
///
/// # Arguments
///
/// * `args` - An iterator of command-line arguments (typically from `std::env::args()`)
///
/// A failing command is reported once on the host's error stream as `Fatal error: ...`
/// before its error is returned.
///
/// # Errors
///
/// Returns an error if command parsing fails or if the executed command fails
pub fn run<I, T, H>(host: &mut H, args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
    H: Host,
{
    let result = match &Cli::parse_from(args).command {
        BuildstatSubcommand::Collect(collect_args) => collect_metrics(host, collect_args),
        BuildstatSubcommand::Init(init_args) => init_config(host, init_args),
        BuildstatSubcommand::Validate(validate_args) => validate_config(host, validate_args),
        BuildstatSubcommand::History(history_args) => show_history(host, history_args),
    };

    if let Err(e) = &result {
        let _ = writeln!(host.error(), "Fatal error: {e:#}");
    }

    result
}

use super::Host;
use super::config::Config;
use crate::Result;
use crate::history::{HistoryFile, HistoryRecord, locate_raw};
use camino::Utf8PathBuf;
use clap::Parser;
use ohno::{IntoAppError, bail};
use std::io::Write;

#[derive(Parser, Debug)]
pub struct HistoryArgs {
    /// Path to configuration file (default is `buildstat.toml`)
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,

    /// Only show the data recorded by this provider
    #[arg(long, short = 'p', value_name = "IDENTIFIER")]
    pub provider: Option<String>,

    /// List every recorded run instead of showing the most recent one
    #[arg(long, conflicts_with = "provider")]
    pub list: bool,
}

/// Print what the most recent run recorded
///
/// # Errors
///
/// Returns an error if the configuration or history cannot be loaded, or the requested provider
/// has no data in the most recent run
pub fn show_history<H: Host>(host: &mut H, args: &HistoryArgs) -> Result<()> {
    let root = Utf8PathBuf::from(".");
    let config_path = Config::path(&root, args.config.as_ref());
    let config = Config::load(&root, args.config.as_ref())?;
    let history_file = HistoryFile::new(Config::project_root(&config_path).join(&config.history_file));
    let history = history_file.load()?;

    let Some(latest) = history.latest() else {
        let _ = writeln!(host.output(), "No runs recorded in '{}'", history_file.path());
        return Ok(());
    };

    if args.list {
        for (index, record) in history.records().iter().enumerate() {
            let _ = writeln!(host.output(), "{}", run_heading(index, record));
        }

        return Ok(());
    }

    let _ = writeln!(host.output(), "{}", run_heading(0, latest));

    if let Some(identifier) = &args.provider {
        let Some(payload) = locate_raw(&history, identifier) else {
            bail!("the most recent run has no data for provider '{identifier}'");
        };

        let text = serde_json::to_string_pretty(payload).into_app_err("formatting provider data")?;
        let _ = writeln!(host.output(), "{text}");
        return Ok(());
    }

    for identifier in latest.identifiers() {
        if let Some(payload) = latest.payload(identifier) {
            let text = serde_json::to_string_pretty(payload).into_app_err("formatting provider data")?;
            let _ = writeln!(host.output(), "{identifier}: {text}");
        }
    }

    Ok(())
}

fn run_heading(index: usize, record: &HistoryRecord) -> String {
    let timestamp = record
        .timestamp()
        .map_or_else(|| "unknown time".to_string(), |ts| ts.format("%Y-%m-%d %H:%M:%S UTC").to_string());

    match record.description() {
        Some(description) => format!("#{index} {timestamp} ({description})"),
        None => format!("#{index} {timestamp}"),
    }
}

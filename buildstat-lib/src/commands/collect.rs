use super::Host;
use super::common::{ColorMode, LogLevel, init_logging};
use super::config::Config;
use crate::Result;
use crate::facts::{Collector, RunContext, RunOutput};
use crate::history::HistoryFile;
use crate::reports::{Notifier, SlackFormatter, WebhookNotifier, generate_console};
use camino::Utf8PathBuf;
use chrono::Utc;
use clap::Parser;
use std::io::Write;

const LOG_TARGET: &str = "   collect";

#[derive(Parser, Debug)]
pub struct CollectArgs {
    /// Path to configuration file (default is `buildstat.toml`)
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,

    /// Description of this run, e.g. a branch or build number (overrides the configuration)
    #[arg(long, value_name = "TEXT")]
    pub description: Option<String>,

    /// Incoming webhook that receives the run summary (overrides the configuration)
    #[arg(long, value_name = "URL", env = "BUILDSTAT_WEBHOOK_URL")]
    pub webhook_url: Option<String>,

    /// Extract and compare, but neither record the run nor send a notification
    #[arg(long)]
    pub dry_run: bool,

    /// Record the run without sending a notification
    #[arg(long)]
    pub no_notify: bool,

    /// Control when to use colored output
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    pub color: ColorMode,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "none")]
    pub log_level: LogLevel,
}

pub fn collect_metrics<H: Host>(host: &mut H, args: &CollectArgs) -> Result<()> {
    collect_metrics_with(host, args, &WebhookNotifier::new())
}

/// Run every configured provider, record the run, and notify
///
/// An extraction failure is fatal: nothing is recorded and no notification is sent. A failed
/// notification is reported but does not fail the run, since the run was already recorded.
///
/// # Errors
///
/// Returns an error if the configuration or history cannot be loaded, a provider fails, or the
/// history cannot be saved
pub fn collect_metrics_with<H: Host, N: Notifier>(host: &mut H, args: &CollectArgs, notifier: &N) -> Result<()> {
    init_logging(args.log_level);

    let root = Utf8PathBuf::from(".");
    let config_path = Config::path(&root, args.config.as_ref());
    let config = Config::load(&root, args.config.as_ref())?;
    let project_root = Config::project_root(&config_path);

    let registry = config.build_registry()?;
    let history_file = HistoryFile::new(project_root.join(&config.history_file));
    let mut history = history_file.load()?;

    let project = config.project_info(args.description.as_deref());
    let context = RunContext::new(project, project_root);

    let output = Collector::new(&context, &history).run_all(&registry)?;
    if !output.has_changes() {
        log::info!(target: LOG_TARGET, "No metric changed since the previous run");
    }

    write_console_report(host, &output, args.color.use_colors());

    if args.dry_run {
        let _ = writeln!(host.output(), "Dry run: history not updated, no notification sent");
        return Ok(());
    }

    history.prepend(output.to_raw_mapping(context.project().description(), Utc::now()));
    history_file.save(&history)?;
    log::info!(target: LOG_TARGET, "Recorded run #{} in '{}'", history.len(), history_file.path());

    if args.no_notify {
        return Ok(());
    }

    let Some(url) = args.webhook_url.as_deref().or(config.webhook_url.as_deref()) else {
        log::debug!(target: LOG_TARGET, "No webhook configured, skipping notification");
        return Ok(());
    };

    let message = SlackFormatter::format(&output, context.project());
    if let Err(e) = notifier.post(url, &message) {
        let _ = writeln!(host.error(), "Warning: unable to send notification: {e}");
    }

    Ok(())
}

fn write_console_report<H: Host>(host: &mut H, output: &RunOutput, use_colors: bool) {
    let mut text = String::new();
    if generate_console(output, use_colors, &mut text).is_ok() {
        let _ = write!(host.output(), "{text}");
    }
}

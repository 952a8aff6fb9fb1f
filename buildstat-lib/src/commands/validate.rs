use super::Host;
use super::config::Config;
use crate::Result;
use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use std::io::Write;

#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to configuration file (default is `buildstat.toml`)
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,
}

/// Validates a configuration file by loading it and instantiating its providers
///
/// # Errors
///
/// Returns an error if the config file cannot be loaded or parsed, or if its providers are inconsistent
fn validate_config_inner(root: &Utf8Path, config_path: Option<&Utf8PathBuf>) -> Result<Config> {
    let config = Config::load(root, config_path)?;
    let _ = config.build_registry()?;
    Ok(config)
}

pub fn validate_config<H: Host>(host: &mut H, args: &ValidateArgs) -> Result<()> {
    let root = Utf8PathBuf::from(".");
    let config_path = args.config.as_ref();

    match validate_config_inner(&root, config_path) {
        Ok(config) => {
            let _ = writeln!(host.output(), "Configuration file is valid");
            let _ = writeln!(host.output(), "Config file: {}", Config::path(&root, config_path));
            let _ = writeln!(host.output(), "Providers: {}", config.providers.len());
            Ok(())
        }
        Err(e) => {
            let _ = writeln!(host.error(), "❌ Configuration validation failed: {e}");
            host.exit(1);
            Err(e)
        }
    }
}

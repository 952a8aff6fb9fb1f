use crate::Result;
use crate::facts::binary_size::{self, BinarySizeProvider};
use crate::facts::command::CommandProvider;
use crate::facts::dependencies::{self, DependenciesProvider};
use crate::facts::lines_of_code::{self, LinesOfCodeProvider};
use crate::facts::warnings::{self, WarningsProvider};
use crate::facts::{DynProvider, ProjectInfo, ProviderRegistry};
use crate::history::HistoryRecord;
use crate::summary::{Direction, Unit};
use camino::{Utf8Path, Utf8PathBuf};
use ohno::{IntoAppError, app_err, bail};
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::io;

/// The default configuration TOML content, embedded from `default_config.toml`
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../../default_config.toml");

/// File name looked up in the working directory when no `--config` is given
pub const CONFIG_FILE_NAME: &str = "buildstat.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub project: ProjectConfig,

    /// History file location, relative to the configuration file
    #[serde(default = "default_history_file")]
    pub history_file: Utf8PathBuf,

    /// Incoming webhook that receives run summaries
    #[serde(default)]
    pub webhook_url: Option<String>,

    /// Metric sources, in the order they run
    #[serde(default, rename = "provider")]
    pub providers: Vec<ProviderConfig>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    pub name: String,

    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", deny_unknown_fields)]
pub enum ProviderConfig {
    BinarySize {
        #[serde(default = "default_binary_size_identifier")]
        identifier: String,
        path: Utf8PathBuf,
    },

    Warnings {
        #[serde(default = "default_warnings_identifier")]
        identifier: String,
        log_file: Utf8PathBuf,
    },

    Dependencies {
        #[serde(default = "default_dependencies_identifier")]
        identifier: String,
        #[serde(default = "default_lock_file")]
        lock_file: Utf8PathBuf,
    },

    LinesOfCode {
        #[serde(default = "default_lines_of_code_identifier")]
        identifier: String,
        #[serde(default = "default_source_directory")]
        directory: Utf8PathBuf,
        #[serde(default = "default_extensions")]
        extensions: Vec<String>,
    },

    Command {
        identifier: String,
        #[serde(default)]
        title: Option<String>,
        command: String,
        #[serde(default)]
        unit: Unit,
        #[serde(default)]
        direction: Direction,
    },
}

fn default_history_file() -> Utf8PathBuf {
    Utf8PathBuf::from("buildstat/history.json")
}

fn default_binary_size_identifier() -> String {
    binary_size::DEFAULT_IDENTIFIER.to_string()
}

fn default_warnings_identifier() -> String {
    warnings::DEFAULT_IDENTIFIER.to_string()
}

fn default_dependencies_identifier() -> String {
    dependencies::DEFAULT_IDENTIFIER.to_string()
}

fn default_lines_of_code_identifier() -> String {
    lines_of_code::DEFAULT_IDENTIFIER.to_string()
}

fn default_lock_file() -> Utf8PathBuf {
    Utf8PathBuf::from("Cargo.lock")
}

fn default_source_directory() -> Utf8PathBuf {
    Utf8PathBuf::from("src")
}

fn default_extensions() -> Vec<String> {
    vec!["rs".to_string()]
}

impl ProviderConfig {
    #[must_use]
    pub fn identifier(&self) -> &str {
        match self {
            Self::BinarySize { identifier, .. }
            | Self::Warnings { identifier, .. }
            | Self::Dependencies { identifier, .. }
            | Self::LinesOfCode { identifier, .. }
            | Self::Command { identifier, .. } => identifier,
        }
    }

    fn build(&self) -> Box<dyn DynProvider> {
        match self {
            Self::BinarySize { identifier, path } => Box::new(BinarySizeProvider::new(identifier, path.clone())),
            Self::Warnings { identifier, log_file } => Box::new(WarningsProvider::new(identifier, log_file.clone())),
            Self::Dependencies { identifier, lock_file } => Box::new(DependenciesProvider::new(identifier, lock_file.clone())),
            Self::LinesOfCode {
                identifier,
                directory,
                extensions,
            } => Box::new(LinesOfCodeProvider::new(identifier, directory.clone(), extensions.clone())),
            Self::Command {
                identifier,
                title,
                command,
                unit,
                direction,
            } => {
                let provider = CommandProvider::new(identifier, command, *unit, *direction);
                Box::new(match title {
                    Some(title) => provider.with_title(title),
                    None => provider,
                })
            }
        }
    }
}

impl Config {
    /// Load and validate the configuration file
    ///
    /// Without an explicit path, `buildstat.toml` in `root` is used.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, cannot be read or parsed, or fails validation
    pub fn load(root: &Utf8Path, config_path: Option<&Utf8PathBuf>) -> Result<Self> {
        let path = Self::path(root, config_path);

        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                bail!("configuration file '{path}' not found; run `buildstat init` to create one");
            }
            Err(e) => return Err(e).into_app_err_with(|| format!("reading buildstat configuration file '{path}'")),
        };

        let config: Self = toml::from_str(&text).into_app_err_with(|| format!("parsing configuration file '{path}'"))?;
        config.validate()?;

        Ok(config)
    }

    /// The configuration file that [`load`](Self::load) reads
    #[must_use]
    pub fn path(root: &Utf8Path, config_path: Option<&Utf8PathBuf>) -> Utf8PathBuf {
        config_path.cloned().unwrap_or_else(|| root.join(CONFIG_FILE_NAME))
    }

    /// The directory relative paths in the configuration are resolved against
    #[must_use]
    pub fn project_root(config_file: &Utf8Path) -> Utf8PathBuf {
        match config_file.parent() {
            Some(parent) if !parent.as_str().is_empty() => parent.to_path_buf(),
            _ => Utf8PathBuf::from("."),
        }
    }

    /// Save the default configuration to a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written
    pub fn save_default(output_path: &Utf8Path) -> Result<()> {
        fs::write(output_path, DEFAULT_CONFIG_TOML).into_app_err_with(|| format!("writing default configuration to {output_path}"))?;
        Ok(())
    }

    #[must_use]
    pub fn project_info(&self, description_override: Option<&str>) -> ProjectInfo {
        ProjectInfo::new(
            self.project.name.clone(),
            description_override.unwrap_or(&self.project.description),
        )
    }

    /// Instantiate the configured providers, in configuration order
    ///
    /// # Errors
    ///
    /// Returns an error if two providers share an identifier
    pub fn build_registry(&self) -> Result<ProviderRegistry> {
        let mut registry = ProviderRegistry::new();
        for provider in &self.providers {
            registry.register(provider.build())?;
        }

        Ok(registry)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error if a name or command is empty, or if provider identifiers clash
    fn validate(&self) -> Result<()> {
        if self.project.name.trim().is_empty() {
            bail!("project.name must not be empty");
        }

        if self.history_file.as_str().is_empty() {
            bail!("history_file must not be empty");
        }

        let mut seen = HashSet::new();
        for provider in &self.providers {
            let identifier = provider.identifier();

            if identifier.trim().is_empty() {
                bail!("provider identifiers must not be empty");
            }

            if HistoryRecord::is_reserved_key(identifier) {
                return Err(app_err!("provider identifier '{identifier}' is reserved"));
            }

            if !seen.insert(identifier) {
                return Err(app_err!("provider identifier '{identifier}' is used more than once"));
            }

            if let ProviderConfig::Command { command, .. } = provider
                && command.trim().is_empty()
            {
                return Err(app_err!("command for provider '{identifier}' must not be empty"));
            }
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG_TOML).expect("default_config.toml should be valid TOML that deserializes to Config")
    }
}

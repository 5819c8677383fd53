//! Layered CLI configuration.
//!
//! Sources, lowest precedence first: built-in defaults, `cascade.toml` in the
//! working directory (or the file given with `--config`), `CASCADE_*`
//! environment variables, command-line flags.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use cascade_validator::metadata::SynthOptions;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Config file read when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "cascade.toml";

/// Prefix of configuration environment variables.
pub const ENV_PREFIX: &str = "CASCADE_";

/// How violations are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One `path: message` line per violation.
    #[default]
    Text,
    /// A JSON array of `{path, message}` objects.
    Json,
}

/// Effective configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Report absent non-nullable members.
    pub strict_presence: bool,
    /// Stop at the first violation.
    pub fail_fast: bool,
    /// `tracing` filter directive; `RUST_LOG` applies when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
    /// Output format of `check`.
    pub format: OutputFormat,
}

/// Values given on the command line. Unset flags leave lower layers alone.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Overrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strict_presence: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fail_fast: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<OutputFormat>,
}

impl Config {
    /// The layered figment, without command-line overrides.
    pub fn figment(file: Option<&Path>) -> Figment {
        let file = file.map_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE), Path::to_path_buf);
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(file))
            .merge(Env::prefixed(ENV_PREFIX))
    }

    /// Loads the configuration.
    ///
    /// # Errors
    ///
    /// Fails when an explicitly given config file does not exist, or when a
    /// source holds a value of the wrong type.
    pub fn load(file: Option<&Path>, overrides: &Overrides) -> Result<Self> {
        if let Some(path) = file
            && !path.is_file()
        {
            bail!("config file `{}` not found", path.display());
        }

        Self::figment(file)
            .merge(Serialized::defaults(overrides))
            .extract()
            .context("invalid configuration")
    }

    /// Library options derived from this configuration.
    pub fn synth_options(&self) -> SynthOptions {
        SynthOptions {
            strict_presence: self.strict_presence,
        }
    }
}

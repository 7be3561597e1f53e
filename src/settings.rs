//! Layered runtime settings.
//!
//! Precedence, lowest first: built-in defaults, an optional TOML file,
//! `DROWSY_DASH_*` environment variables, then command-line flags.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

use crate::data::duration::parse_duration;

/// Environment variable prefix, e.g. `DROWSY_DASH_CONNECT=localhost:5000`.
pub const ENV_PREFIX: &str = "DROWSY_DASH";

/// Default file polled when no connection is given.
pub const DEFAULT_FILE: &str = "dashboard.json";

/// Light/dark theme selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ThemeChoice {
    /// Detect from the terminal background.
    #[default]
    Auto,
    Dark,
    Light,
}

impl ThemeChoice {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeChoice::Auto => "auto",
            ThemeChoice::Dark => "dark",
            ThemeChoice::Light => "light",
        }
    }
}

/// Values given on the command line. `None` leaves the lower layers alone.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub connect: Option<String>,
    pub file: Option<PathBuf>,
    pub refresh: Option<String>,
    pub stale_after: Option<String>,
    pub log_file: Option<PathBuf>,
    pub theme: Option<ThemeChoice>,
}

#[derive(Debug, Deserialize)]
struct RawSettings {
    connect: Option<String>,
    file: PathBuf,
    refresh: String,
    stale_after: String,
    log_file: Option<PathBuf>,
    theme: ThemeChoice,
}

/// Resolved settings for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// TCP endpoint (`host:port`) to read the push stream from.
    pub connect: Option<String>,
    /// Frame file polled when `connect` is unset.
    pub file: PathBuf,
    /// How often the UI polls its source and redraws.
    pub refresh: Duration,
    /// Age after which a connected source is shown as stale.
    pub stale_after: Duration,
    /// Where tracing output goes. Unset disables logging.
    pub log_file: Option<PathBuf>,
    pub theme: ThemeChoice,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            connect: None,
            file: PathBuf::from(DEFAULT_FILE),
            refresh: Duration::from_millis(100),
            stale_after: Duration::from_secs(2),
            log_file: None,
            theme: ThemeChoice::Auto,
        }
    }
}

fn path_value(path: &Option<PathBuf>) -> Option<String> {
    path.as_ref().map(|p| p.display().to_string())
}

impl Settings {
    /// Load settings from all layers.
    pub fn load(config_path: Option<&Path>, overrides: &Overrides) -> Result<Self> {
        let mut builder = Config::builder()
            .set_default("file", DEFAULT_FILE)?
            .set_default("refresh", "100ms")?
            .set_default("stale_after", "2s")?
            .set_default("theme", ThemeChoice::Auto.as_str())?;

        if let Some(path) = config_path {
            builder = builder.add_source(File::from(path));
        }

        let raw: RawSettings = builder
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .set_override_option("connect", overrides.connect.clone())?
            .set_override_option("file", path_value(&overrides.file))?
            .set_override_option("refresh", overrides.refresh.clone())?
            .set_override_option("stale_after", overrides.stale_after.clone())?
            .set_override_option("log_file", path_value(&overrides.log_file))?
            .set_override_option("theme", overrides.theme.map(|t| t.as_str()))?
            .build()
            .context("Failed to load settings")?
            .try_deserialize()
            .context("Invalid settings")?;

        Ok(Self {
            connect: raw.connect.filter(|c| !c.trim().is_empty()),
            file: raw.file,
            refresh: parse_duration(&raw.refresh)
                .with_context(|| format!("Invalid refresh interval: {}", raw.refresh))?,
            stale_after: parse_duration(&raw.stale_after)
                .with_context(|| format!("Invalid stale-after duration: {}", raw.stale_after))?,
            log_file: raw.log_file,
            theme: raw.theme,
        })
    }
}

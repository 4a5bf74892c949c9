// src/config.rs
use crate::application::PipelineConfig;
use crate::domain::operation::{
    LanguageCode, DEFAULT_BROWSER, DEFAULT_SOURCE_LANG, DEFAULT_TARGET_LANG,
};
use crate::domain::services::clipboard::Encoding;
use crate::domain::url_builder::{DEFAULT_SEARCH_URL, DEFAULT_TRANSLATE_URL};
use crate::infrastructure::clipboard::{DEFAULT_CLIPBOARD_ARGS, DEFAULT_CLIPBOARD_PROGRAM};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, instrument, trace};

pub const DEFAULT_TIMEOUT_MS: u64 = 1000;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot read config file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },

    #[error("Invalid config value: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ClipboardOpts {
    /// Clipboard utility to run (default: "xclip")
    #[serde(default = "default_clipboard_program")]
    pub program: String,

    /// Arguments putting the utility in output mode (default: ["-o"])
    #[serde(default = "default_clipboard_args")]
    pub args: Vec<String>,
}

fn default_clipboard_program() -> String {
    DEFAULT_CLIPBOARD_PROGRAM.to_string()
}

fn default_clipboard_args() -> Vec<String> {
    DEFAULT_CLIPBOARD_ARGS.iter().map(|s| s.to_string()).collect()
}

impl Default for ClipboardOpts {
    fn default() -> Self {
        Self {
            program: default_clipboard_program(),
            args: default_clipboard_args(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ProviderOpts {
    #[serde(default = "default_search_url")]
    pub search_url: String,

    #[serde(default = "default_translate_url")]
    pub translate_url: String,
}

fn default_search_url() -> String {
    DEFAULT_SEARCH_URL.to_string()
}

fn default_translate_url() -> String {
    DEFAULT_TRANSLATE_URL.to_string()
}

impl Default for ProviderOpts {
    fn default() -> Self {
        Self {
            search_url: default_search_url(),
            translate_url: default_translate_url(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TranslateOpts {
    #[serde(default = "default_source")]
    pub source: String,

    #[serde(default = "default_target")]
    pub target: String,
}

fn default_source() -> String {
    DEFAULT_SOURCE_LANG.to_string()
}

fn default_target() -> String {
    DEFAULT_TARGET_LANG.to_string()
}

impl Default for TranslateOpts {
    fn default() -> Self {
        Self {
            source: default_source(),
            target: default_target(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Settings {
    /// Bound on every external program run, in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Encoding of the clipboard bytes
    #[serde(default)]
    pub encoding: Encoding,

    /// Browser used when none is given on the command line
    #[serde(default = "default_browser")]
    pub default_browser: String,

    #[serde(default)]
    pub clipboard: ClipboardOpts,

    #[serde(default)]
    pub providers: ProviderOpts,

    #[serde(default)]
    pub translate: TranslateOpts,
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

fn default_browser() -> String {
    DEFAULT_BROWSER.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            encoding: Encoding::default(),
            default_browser: default_browser(),
            clipboard: ClipboardOpts::default(),
            providers: ProviderOpts::default(),
            translate: TranslateOpts::default(),
        }
    }
}

impl Settings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Validated pipeline configuration.
    pub fn pipeline_config(&self) -> ConfigResult<PipelineConfig> {
        let lang = |code: &str| {
            LanguageCode::new(code).map_err(|e| ConfigError::Invalid(e.to_string()))
        };
        if self.clipboard.program.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "clipboard.program must not be empty".to_string(),
            ));
        }
        Ok(PipelineConfig {
            search_url: self.providers.search_url.clone(),
            translate_url: self.providers.translate_url.clone(),
            default_browser: self.default_browser.clone(),
            default_source: lang(&self.translate.source)?,
            default_target: lang(&self.translate.target)?,
        })
    }
}

/// Defaults, overlaid by `config_path` when given. No other file or
/// environment variable is consulted.
#[instrument(level = "debug")]
pub fn load_settings(config_path: Option<&Path>) -> ConfigResult<Settings> {
    let Some(path) = config_path else {
        trace!("No config file given, using defaults");
        return Ok(Settings::default());
    };

    let display = path.to_string_lossy().to_string();
    let expanded = shellexpand::tilde(&display).to_string();
    debug!("Loading config from: {}", expanded);

    let text = std::fs::read_to_string(&expanded).map_err(|source| ConfigError::Read {
        path: expanded.clone(),
        source,
    })?;
    let settings: Settings = toml::from_str(&text).map_err(|source| ConfigError::Parse {
        path: expanded.clone(),
        source,
    })?;

    trace!("Settings loaded: {:?}", settings);
    Ok(settings)
}

pub fn generate_default_config() -> String {
    toml::to_string_pretty(&Settings::default())
        .unwrap_or_else(|_| "# Error generating default configuration".to_string())
}

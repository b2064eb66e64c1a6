//! Run configuration.
//!
//! A [`BundleConfig`] is resolved once per invocation from command-line values,
//! falling back to an optional TOML defaults file:
//!
//! ```toml
//! [defaults]
//! sort = "type"
//! note = true
//! remove_empty_lines = false
//! author = "Jane"
//! ```
//!
//! `language` and `output` are only ever taken from the command line.

use crate::error::{BundleError, BundleResult};
use crate::language::LanguageFilter;
use crate::orderer::SortMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the per-directory defaults file.
pub const LOCAL_CONFIG_FILE: &str = ".srcbundle.toml";

/// Errors that can occur while loading the defaults file.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// Configuration file not found at the specified path.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// Invalid TOML syntax or structure.
    #[error("Invalid configuration: {0}")]
    Invalid(String),
    /// IO error while reading configuration.
    #[error("IO error reading configuration: {0}")]
    Io(String),
}

/// Contents of a defaults file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultsFile {
    #[serde(default)]
    pub defaults: Defaults,
}

/// Option values used when the command line leaves them unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Defaults {
    #[serde(default)]
    pub sort: Option<String>,
    #[serde(default)]
    pub note: bool,
    #[serde(default)]
    pub remove_empty_lines: bool,
    #[serde(default)]
    pub author: Option<String>,
}

impl DefaultsFile {
    /// Load defaults, with fallback to built-in values.
    ///
    /// Lookup order:
    /// 1. `config_path`, if given (it must exist)
    /// 2. `.srcbundle.toml` in `root`
    /// 3. `<home>/.config/srcbundle/config.toml`, where `home` falls back to `$HOME`
    /// 4. Built-in defaults
    pub fn load(
        root: &Path,
        config_path: Option<&Path>,
        home: Option<&Path>,
    ) -> Result<Self, ConfigError> {
        if let Some(path) = config_path {
            return Self::load_from_file(path);
        }

        let local_config = root.join(LOCAL_CONFIG_FILE);
        if local_config.exists() {
            return Self::load_from_file(&local_config);
        }

        if let Some(user_config) = user_config_path(home)
            && user_config.exists()
        {
            return Self::load_from_file(&user_config);
        }

        Ok(Self::default())
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        tracing::debug!(path = %path.display(), "loaded defaults file");

        toml::from_str(&content).map_err(|e| ConfigError::Invalid(e.to_string()))
    }
}

/// Location of the user-level defaults file under `home`, or under `$HOME` when unset.
pub fn user_config_path(home: Option<&Path>) -> Option<PathBuf> {
    let home = match home {
        Some(home) => home.to_path_buf(),
        None => PathBuf::from(std::env::var_os("HOME")?),
    };
    Some(home.join(".config").join("srcbundle").join("config.toml"))
}

/// Values supplied on the command line for a bundle run.
///
/// `None` leaves the choice to the defaults file.
#[derive(Debug, Clone, Default)]
pub struct BundleOptions {
    pub language: Option<String>,
    pub output: Option<PathBuf>,
    pub note: Option<bool>,
    pub sort: Option<String>,
    pub remove_empty_lines: Option<bool>,
    pub author: Option<String>,
}

/// Validated parameters of one bundle run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleConfig {
    pub language: LanguageFilter,
    pub output: PathBuf,
    pub note: bool,
    pub sort: SortMode,
    pub remove_empty_lines: bool,
    /// Empty means no header.
    pub author: String,
}

impl BundleConfig {
    /// Validates command-line options, filling gaps from `defaults`.
    ///
    /// # Errors
    ///
    /// Returns [`BundleError::MissingOption`] if `--language` or `--output` is absent and
    /// [`BundleError::UnsupportedLanguage`] if the language token is unknown.
    pub fn resolve(options: BundleOptions, defaults: &Defaults) -> BundleResult<Self> {
        let token = options
            .language
            .filter(|token| !token.trim().is_empty())
            .ok_or(BundleError::MissingOption("language"))?;
        let output = options
            .output
            .filter(|path| !path.as_os_str().is_empty())
            .ok_or(BundleError::MissingOption("output"))?;
        let language = LanguageFilter::parse(&token)?;

        let sort = options
            .sort
            .as_deref()
            .or(defaults.sort.as_deref())
            .map(SortMode::from_token)
            .unwrap_or_default();
        let author = options
            .author
            .or_else(|| defaults.author.clone())
            .unwrap_or_default();

        Ok(Self {
            language,
            output,
            note: options.note.unwrap_or(defaults.note),
            sort,
            remove_empty_lines: options
                .remove_empty_lines
                .unwrap_or(defaults.remove_empty_lines),
            author,
        })
    }
}

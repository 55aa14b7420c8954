use std::ffi::OsString;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::normalize::amount::DEFAULT_CURRENCY_MARKER;
use crate::{ClientError, ClientResult};

pub const HOME_ENV_VAR: &str = "TIDYLEDGER_HOME";
pub const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    merchant: MerchantSection,
    amount: AmountSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct MerchantSection {
    max_edit_distance: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct AmountSection {
    currency_marker: Option<String>,
}

/// Effective settings for a cleaning run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CleanerConfig {
    /// `None` keeps the edit-distance fallback total.
    pub max_edit_distance: Option<usize>,
    pub currency_marker: String,
    /// The file the settings came from, when one existed.
    pub config_path: Option<String>,
}

impl Default for CleanerConfig {
    fn default() -> Self {
        Self {
            max_edit_distance: None,
            currency_marker: DEFAULT_CURRENCY_MARKER.to_string(),
            config_path: None,
        }
    }
}

impl CleanerConfig {
    /// Command-line values win over the file.
    pub fn with_overrides(mut self, max_edit_distance: Option<usize>) -> Self {
        if max_edit_distance.is_some() {
            self.max_edit_distance = max_edit_distance;
        }
        self
    }
}

pub fn resolve_home(home_override: Option<&Path>) -> ClientResult<PathBuf> {
    let candidate = match home_override {
        Some(path) => path.to_path_buf(),
        None => match candidate_home(std::env::var_os(HOME_ENV_VAR), home::home_dir()) {
            Some(path) => path,
            None => {
                return Err(ClientError::config_home_unresolved(
                    "no home directory is available for this user",
                ));
            }
        },
    };

    absolutize(&candidate)
}

fn candidate_home(env_home: Option<OsString>, user_home: Option<PathBuf>) -> Option<PathBuf> {
    env_home
        .map(PathBuf::from)
        .or_else(|| user_home.map(|path| path.join(".tidyledger")))
}

pub fn config_path(home: &Path) -> PathBuf {
    home.join(CONFIG_FILE_NAME)
}

/// Without any resolvable home there is no file to read, so defaults apply.
pub fn load_config(home_override: Option<&Path>) -> ClientResult<CleanerConfig> {
    load_config_for_home(resolve_home(home_override))
}

fn load_config_for_home(home: ClientResult<PathBuf>) -> ClientResult<CleanerConfig> {
    match home {
        Ok(home) => load_config_from(&config_path(&home)),
        Err(error) if error.code == "config_home_unresolved" => {
            tracing::warn!(reason = %error.message, "no tidyledger home; using default settings");
            Ok(CleanerConfig::default())
        }
        Err(error) => Err(error),
    }
}

/// A missing file yields defaults; an unreadable or malformed one is an error.
pub fn load_config_from(path: &Path) -> ClientResult<CleanerConfig> {
    let body = match fs::read_to_string(path) {
        Ok(body) => body,
        Err(error) if error.kind() == ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no config file; using defaults");
            return Ok(CleanerConfig::default());
        }
        Err(error) => return Err(ClientError::config_invalid(path, &error.to_string())),
    };

    let parsed = toml::from_str::<ConfigFile>(&body)
        .map_err(|error| ClientError::config_invalid(path, error.message()))?;

    let currency_marker = parsed
        .amount
        .currency_marker
        .unwrap_or_else(|| DEFAULT_CURRENCY_MARKER.to_string());

    tracing::debug!(path = %path.display(), "loaded config file");
    Ok(CleanerConfig {
        max_edit_distance: parsed.merchant.max_edit_distance,
        currency_marker,
        config_path: Some(path.display().to_string()),
    })
}

fn absolutize(path: &Path) -> ClientResult<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }

    std::env::current_dir()
        .map(|cwd| cwd.join(path))
        .map_err(|error| ClientError::config_home_unresolved(&error.to_string()))
}

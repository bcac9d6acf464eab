// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Swarg Store contributors

//! User configuration loaded from `settings.toml` in the platform config directory.
//!
//! Resolution order for the file location:
//! 1. `SWARG_CONFIG_DIR` environment variable
//! 2. `dirs::config_dir()/SwargStore`
//!
//! `SWARG_API_URL` overrides the backend base URL from the file.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::models::media::{AcceptList, DEFAULT_ACCEPTED_TYPES, DEFAULT_MAX_FILES};

const APP_DIR: &str = "SwargStore";
const CONFIG_FILE: &str = "settings.toml";

pub const ENV_CONFIG_DIR: &str = "SWARG_CONFIG_DIR";
pub const ENV_API_URL: &str = "SWARG_API_URL";

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    pub api_base_url: String,
    pub max_files: usize,
    pub accepted_types: String,
    pub request_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            max_files: DEFAULT_MAX_FILES,
            accepted_types: DEFAULT_ACCEPTED_TYPES.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl AppConfig {
    /// Reject values the rest of the app cannot work with.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first invalid setting.
    pub fn validate(&self) -> Result<()> {
        if self.max_files == 0 {
            bail!("max_files must be at least 1");
        }
        if AcceptList::parse(&self.accepted_types).is_none() {
            bail!("accepted_types must list at least one MIME pattern");
        }
        if self.request_timeout_secs == 0 {
            bail!("request_timeout_secs must be at least 1");
        }
        let url = Url::parse(&self.api_base_url)
            .with_context(|| format!("api_base_url is not a URL: {}", self.api_base_url))?;
        if !matches!(url.scheme(), "http" | "https") {
            bail!("api_base_url must use http or https");
        }
        Ok(())
    }

    pub fn accept_list(&self) -> AcceptList {
        AcceptList::parse(&self.accepted_types).unwrap_or_default()
    }
}

/// Platform location of `settings.toml`, honoring `SWARG_CONFIG_DIR`.
pub fn config_path() -> Option<PathBuf> {
    if let Some(dir) = std::env::var_os(ENV_CONFIG_DIR).filter(|v| !v.is_empty()) {
        return Some(PathBuf::from(dir).join(CONFIG_FILE));
    }
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
}

/// Load the configuration, falling back to defaults.
///
/// The second element carries a warning for the status bar when the file
/// existed but could not be used.
pub fn load() -> (AppConfig, Option<String>) {
    let (config, warning) = match config_path() {
        Some(path) if path.exists() => match load_from_path(&path) {
            Ok(config) => (config, None),
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %format!("{err:#}"), "ignoring invalid configuration");
                (
                    AppConfig::default(),
                    Some(format!("Configuration ignored: {err:#}")),
                )
            }
        },
        _ => (AppConfig::default(), None),
    };
    (apply_env_overrides(config, std::env::var(ENV_API_URL).ok()), warning)
}

/// Read and validate a configuration file.
///
/// # Errors
///
/// Returns an error when the file cannot be read, parsed, or validated.
pub fn load_from_path(path: &Path) -> Result<AppConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config: AppConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
    config.validate()?;
    Ok(config)
}

/// Apply `SWARG_API_URL` when it holds a usable URL.
fn apply_env_overrides(mut config: AppConfig, api_url: Option<String>) -> AppConfig {
    let Some(raw) = api_url.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) else {
        return config;
    };
    let candidate = AppConfig {
        api_base_url: raw.clone(),
        ..config.clone()
    };
    match candidate.validate() {
        Ok(()) => config.api_base_url = raw,
        Err(err) => tracing::warn!(value = %raw, error = %err, "ignoring {ENV_API_URL}"),
    }
    config
}

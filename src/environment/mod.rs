//! # Harness Configuration
//!
//! Resolves the backend base URL once at startup and freezes it, together
//! with the request timeout and CORS probe origin, into a [`HarnessConfig`].
//!
//! Resolution order for the base URL:
//! 1. explicit override (`--base-url`)
//! 2. `REACT_APP_BACKEND_URL` in the process environment
//! 3. `REACT_APP_BACKEND_URL` in a dotenv-style file (`--env-file`)

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::ConfigError;

pub const BACKEND_URL_VAR: &str = "REACT_APP_BACKEND_URL";
pub const API_PREFIX: &str = "/api";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_ORIGIN: &str = "http://localhost:3000";

/// Immutable settings shared read-only by every case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarnessConfig {
    pub base_url: String,
    pub api_prefix: String,
    pub timeout: Duration,
    pub origin: String,
}

impl HarnessConfig {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            api_prefix: API_PREFIX.to_string(),
            timeout: DEFAULT_TIMEOUT,
            origin: DEFAULT_ORIGIN.to_string(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = origin.into();
        self
    }

    pub fn api_base_url(&self) -> String {
        format!("{}{}", self.base_url, self.api_prefix)
    }
}

/// Where the base URL may come from, highest priority first.
#[derive(Debug, Clone, Default)]
pub struct ConfigSources {
    pub base_url_override: Option<String>,
    pub process_env: Option<String>,
    pub env_file: Option<PathBuf>,
}

impl ConfigSources {
    pub fn from_process(base_url_override: Option<String>, env_file: Option<PathBuf>) -> Self {
        Self {
            base_url_override,
            process_env: std::env::var(BACKEND_URL_VAR).ok(),
            env_file,
        }
    }
}

pub fn resolve_base_url(sources: &ConfigSources) -> Result<String, ConfigError> {
    let non_empty = |value: &Option<String>| {
        value
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    };

    let explicit =
        non_empty(&sources.base_url_override).or_else(|| non_empty(&sources.process_env));
    // The env file is only consulted when nothing above it is set.
    let raw = match (explicit, &sources.env_file) {
        (Some(raw), _) => raw,
        (None, Some(path)) => non_empty(&load_env_file(path)?.remove(BACKEND_URL_VAR))
            .ok_or(ConfigError::MissingBaseUrl)?,
        (None, None) => return Err(ConfigError::MissingBaseUrl),
    };

    normalize_base_url(&raw)
}

fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim_end_matches('/');
    let url = reqwest::Url::parse(trimmed).map_err(|err| ConfigError::InvalidBaseUrl {
        url: raw.to_string(),
        reason: err.to_string(),
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidBaseUrl {
            url: raw.to_string(),
            reason: format!("unsupported scheme `{}`", url.scheme()),
        });
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(ConfigError::InvalidBaseUrl {
            url: raw.to_string(),
            reason: "query and fragment are not allowed".into(),
        });
    }

    Ok(trimmed.to_string())
}

pub fn load_env_file(path: &Path) -> Result<HashMap<String, String>, ConfigError> {
    let content = fs::read_to_string(path).map_err(|err| ConfigError::EnvFile {
        path: path.to_path_buf(),
        reason: err.to_string(),
    })?;

    parse_env_lines(&content).map_err(|reason| ConfigError::EnvFile {
        path: path.to_path_buf(),
        reason,
    })
}

fn parse_env_lines(input: &str) -> Result<HashMap<String, String>, String> {
    let mut pairs = HashMap::new();

    for line in input.lines() {
        let raw = line.trim();
        if raw.is_empty() || raw.starts_with('#') {
            continue;
        }

        let raw = raw.strip_prefix("export ").unwrap_or(raw);
        let (key, value) = raw
            .split_once('=')
            .ok_or_else(|| format!("invalid KEY=VALUE line: `{raw}`"))?;
        let key = key.trim();
        if key.is_empty() {
            return Err(format!("key cannot be empty: `{raw}`"));
        }

        pairs.insert(key.to_string(), unquote(value.trim()).to_string());
    }

    Ok(pairs)
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    value
}

//! # Command-line Arguments
//!
//! Exit codes: `0` when every check passed, `1` when any check failed or the
//! configuration could not be resolved.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::environment::{ConfigSources, DEFAULT_ORIGIN, HarnessConfig, resolve_base_url};
use crate::error::ConfigError;

/// Check the portfolio backend's contact-form API
#[derive(Debug, Parser)]
#[command(name = "contact-api-check", version)]
pub struct CliArgs {
    /// Backend base URL, without the `/api` prefix. Overrides REACT_APP_BACKEND_URL.
    #[arg(long)]
    pub base_url: Option<String>,

    /// dotenv-style file consulted for REACT_APP_BACKEND_URL
    #[arg(long)]
    pub env_file: Option<PathBuf>,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 10)]
    pub timeout_secs: u64,

    /// Origin sent by the CORS check
    #[arg(long, default_value = DEFAULT_ORIGIN)]
    pub origin: String,

    /// Report format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl CliArgs {
    pub fn harness_config(&self, sources: &ConfigSources) -> Result<HarnessConfig, ConfigError> {
        if self.timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        let base_url = resolve_base_url(sources)?;
        Ok(HarnessConfig::new(base_url)
            .with_timeout(Duration::from_secs(self.timeout_secs))
            .with_origin(self.origin.clone()))
    }

    pub fn config_sources(&self) -> ConfigSources {
        ConfigSources::from_process(self.base_url.clone(), self.env_file.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = CliArgs::parse_from(["contact-api-check"]);
        assert_eq!(args.timeout_secs, 10);
        assert_eq!(args.origin, "http://localhost:3000");
        assert_eq!(args.format, OutputFormat::Text);
        assert!(args.base_url.is_none());
        assert!(!args.verbose);
    }

    #[test]
    fn builds_config_from_flags() {
        let args = CliArgs::parse_from([
            "contact-api-check",
            "--base-url",
            "http://localhost:8001/",
            "--timeout-secs",
            "3",
            "--origin",
            "https://portfolio.example.com",
            "--format",
            "json",
        ]);
        let sources = ConfigSources {
            base_url_override: args.base_url.clone(),
            ..Default::default()
        };
        let config = args.harness_config(&sources).unwrap();

        assert_eq!(config.base_url, "http://localhost:8001");
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert_eq!(config.origin, "https://portfolio.example.com");
        assert_eq!(args.format, OutputFormat::Json);
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let args = CliArgs::parse_from(["contact-api-check", "--timeout-secs", "0"]);
        let sources = ConfigSources {
            base_url_override: Some("http://localhost:8001".into()),
            ..Default::default()
        };
        assert!(matches!(
            args.harness_config(&sources),
            Err(ConfigError::ZeroTimeout)
        ));
    }

    #[test]
    fn missing_url_is_reported_before_running() {
        let args = CliArgs::parse_from(["contact-api-check"]);
        assert!(matches!(
            args.harness_config(&ConfigSources::default()),
            Err(ConfigError::MissingBaseUrl)
        ));
    }
}

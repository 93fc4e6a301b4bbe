//! Immutable configuration for the compatibility layer.
//!
//! # Responsibility
//! - Carry instance identity (host, base URL) and placeholder media URLs.
//! - Validate configuration once at startup.
//!
//! # Invariants
//! - A validated config always has a non-empty host and an http(s) `url`
//!   without a trailing slash.
//! - Config is never mutated after construction; share it by `Arc`.

use crate::id::DEFAULT_NATIVE_ID_WIDTH;
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    EmptyHost,
    InvalidHost(String),
    InvalidUrl(String),
    InvalidIdWidth,
    Parse(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyHost => write!(f, "host cannot be empty"),
            Self::InvalidHost(value) => write!(f, "invalid host: `{value}`"),
            Self::InvalidUrl(value) => write!(f, "url must start with http:// or https://: `{value}`"),
            Self::InvalidIdWidth => write!(f, "native_id_width must be greater than zero"),
            Self::Parse(message) => write!(f, "invalid config document: {message}"),
        }
    }
}

impl Error for ConfigError {}

#[derive(Debug, Deserialize)]
struct RawConfig {
    host: String,
    url: Option<String>,
    avatar_placeholder_url: Option<String>,
    header_placeholder_url: Option<String>,
    log_level: Option<String>,
    native_id_width: Option<usize>,
}

/// Instance configuration consumed by converters and renderers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeConfig {
    /// Local host name, e.g. `example.social`.
    pub host: String,
    /// Base URL, e.g. `https://example.social`.
    pub url: String,
    pub avatar_placeholder_url: String,
    pub header_placeholder_url: String,
    pub log_level: String,
    /// Length of issued native ids; wire ids are decoded back to this width.
    pub native_id_width: usize,
}

impl BridgeConfig {
    /// Builds a config for `host` with every other value defaulted.
    pub fn new(host: impl Into<String>) -> Result<Self, ConfigError> {
        Self::build(host.into(), None, None, None, None, None)
    }

    /// Parses and validates a JSON config document.
    pub fn from_json_str(document: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig =
            serde_json::from_str(document).map_err(|err| ConfigError::Parse(err.to_string()))?;
        Self::build(
            raw.host,
            raw.url,
            raw.avatar_placeholder_url,
            raw.header_placeholder_url,
            raw.log_level,
            raw.native_id_width,
        )
    }

    fn build(
        host: String,
        url: Option<String>,
        avatar_placeholder_url: Option<String>,
        header_placeholder_url: Option<String>,
        log_level: Option<String>,
        native_id_width: Option<usize>,
    ) -> Result<Self, ConfigError> {
        let host = host.trim().to_ascii_lowercase();
        let url = url
            .map(|value| value.trim().trim_end_matches('/').to_string())
            .unwrap_or_else(|| format!("https://{host}"));
        let config = Self {
            avatar_placeholder_url: avatar_placeholder_url
                .unwrap_or_else(|| format!("{url}/static-assets/avatar.png")),
            header_placeholder_url: header_placeholder_url
                .unwrap_or_else(|| format!("{url}/static-assets/transparent.png")),
            log_level: log_level.unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
            native_id_width: native_id_width.unwrap_or(DEFAULT_NATIVE_ID_WIDTH),
            host,
            url,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.host.is_empty() {
            return Err(ConfigError::EmptyHost);
        }
        if !self
            .host
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | ':'))
        {
            return Err(ConfigError::InvalidHost(self.host.clone()));
        }
        if !(self.url.starts_with("https://") || self.url.starts_with("http://")) {
            return Err(ConfigError::InvalidUrl(self.url.clone()));
        }
        if self.native_id_width == 0 {
            return Err(ConfigError::InvalidIdWidth);
        }
        Ok(())
    }

    /// Canonical URL of a local note.
    pub fn note_url(&self, note_id: &str) -> String {
        format!("{}/notes/{}", self.url, note_id)
    }

    /// Profile URL for `username` on `host`.
    pub fn profile_url(host: &str, username: &str) -> String {
        format!("https://{host}/@{username}")
    }
}

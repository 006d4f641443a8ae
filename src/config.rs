//! Host configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:5000";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostConfig {
    pub port: u16,
    /// Record backend that `/api/*` is forwarded to, without trailing slash.
    pub backend_url: String,
    /// Overrides the Leptos site root that `/pkg` is served from.
    pub site_root: Option<PathBuf>,
}

impl HostConfig {
    /// Build typed host config from environment variables.
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `GRID_BACKEND_URL`: default `http://127.0.0.1:5000`
    /// - `GRID_SITE_ROOT`: Leptos site root when not the configured one
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for an unparsable port or a backend
    /// URL that is not absolute `http(s)`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`HostConfig::from_env`] with variables read through `lookup`.
    ///
    /// # Errors
    ///
    /// See [`HostConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| ConfigError::Invalid { key: "PORT", value: raw })?,
            None => DEFAULT_PORT,
        };
        let backend_url = parse_backend_url(lookup("GRID_BACKEND_URL").as_deref().unwrap_or(DEFAULT_BACKEND_URL))?;
        let site_root = lookup("GRID_SITE_ROOT").filter(|v| !v.trim().is_empty()).map(PathBuf::from);
        Ok(Self { port, backend_url, site_root })
    }
}

fn parse_backend_url(raw: &str) -> Result<String, ConfigError> {
    let invalid = || ConfigError::Invalid { key: "GRID_BACKEND_URL", value: raw.to_owned() };
    let url = reqwest::Url::parse(raw.trim()).map_err(|_| invalid())?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid());
    }
    Ok(raw.trim().trim_end_matches('/').to_owned())
}

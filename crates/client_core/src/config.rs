use std::{collections::HashMap, fs};

use thiserror::Error;
use tracing::warn;
use url::Url;

pub const CONFIG_FILE: &str = "client.toml";
pub const DEFAULT_API_HOST: &str = "localhost";
pub const DEFAULT_API_PORT: u16 = 8080;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid API base url '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        source: url::ParseError,
    },
    #[error("API base url '{url}' cannot carry a path")]
    CannotBeABase { url: String },
}

/// Location of the user service. Resolved once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiSettings {
    pub api_host: String,
    pub api_port: u16,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            api_host: DEFAULT_API_HOST.into(),
            api_port: DEFAULT_API_PORT,
        }
    }
}

impl ApiSettings {
    /// `http://{host}:{port}/api`, without a trailing slash.
    pub fn base_url(&self) -> Result<String, ConfigError> {
        let raw = format!("http://{}:{}/api", self.api_host.trim(), self.api_port);
        let url = Url::parse(&raw).map_err(|source| ConfigError::InvalidBaseUrl {
            url: raw.clone(),
            source,
        })?;
        if url.host_str().map_or(true, str::is_empty) {
            return Err(ConfigError::InvalidBaseUrl {
                url: raw,
                source: url::ParseError::EmptyHost,
            });
        }
        Ok(url.as_str().trim_end_matches('/').to_string())
    }
}

pub fn load_settings() -> ApiSettings {
    let file = fs::read_to_string(CONFIG_FILE).ok();
    settings_from_sources(file.as_deref(), |name| std::env::var(name).ok())
}

/// Defaults, then `client.toml`, then `API_HOST`/`API_PORT`, then the
/// `APP__`-prefixed variables. Later sources win.
pub fn settings_from_sources(
    file: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
) -> ApiSettings {
    let mut settings = ApiSettings::default();

    if let Some(raw) = file {
        match toml::from_str::<HashMap<String, toml::Value>>(raw) {
            Ok(file_cfg) => {
                if let Some(v) = file_cfg.get("api_host").and_then(toml::Value::as_str) {
                    settings.api_host = v.to_string();
                }
                match file_cfg.get("api_port") {
                    Some(toml::Value::Integer(port)) => match u16::try_from(*port) {
                        Ok(port) => settings.api_port = port,
                        Err(_) => warn!(port, "ignoring out-of-range api_port in {CONFIG_FILE}"),
                    },
                    Some(toml::Value::String(port)) => apply_port(&mut settings, port, CONFIG_FILE),
                    Some(other) => warn!(value = %other, "ignoring non-numeric api_port in {CONFIG_FILE}"),
                    None => {}
                }
            }
            Err(err) => warn!("ignoring unreadable {CONFIG_FILE}: {err}"),
        }
    }

    for prefix in ["", "APP__"] {
        if let Some(v) = env(&format!("{prefix}API_HOST")).filter(|v| !v.trim().is_empty()) {
            settings.api_host = v;
        }
        if let Some(v) = env(&format!("{prefix}API_PORT")) {
            apply_port(&mut settings, &v, &format!("{prefix}API_PORT"));
        }
    }

    settings
}

fn apply_port(settings: &mut ApiSettings, raw: &str, source: &str) {
    match raw.trim().parse::<u16>() {
        Ok(port) => settings.api_port = port,
        Err(err) => warn!(source, raw, "ignoring invalid api port: {err}"),
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;

//! Environment-driven configuration for the server and the agent.

use std::time::Duration;

use thiserror::Error;

/// Default base URL the agent talks to.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Default service name advertised in the discovery document.
pub const DEFAULT_SERVICE_NAME: &str = "Example Hotel";

/// Configuration errors.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid value for {var}: '{value}' ({reason})")]
    Invalid {
        var: &'static str,
        value: String,
        reason: &'static str,
    },
}

/// Publisher settings.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
    /// Fixed public base URL; when unset it is derived from each request's `Host` header.
    pub public_base_url: Option<String>,
    /// Name advertised in the root document.
    pub service_name: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            public_base_url: None,
            service_name: DEFAULT_SERVICE_NAME.to_string(),
        }
    }
}

impl ServerConfig {
    /// Load from `HOST`, `PORT`, `UAP_PUBLIC_BASE_URL` and `UAP_SERVICE_NAME`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
                var: "PORT",
                value: raw.clone(),
                reason: "expected a port number",
            })?,
            None => defaults.port,
        };

        let public_base_url = lookup("UAP_PUBLIC_BASE_URL")
            .filter(|v| !v.trim().is_empty())
            .map(|v| validate_base_url("UAP_PUBLIC_BASE_URL", &v))
            .transpose()?;

        Ok(Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port,
            public_base_url,
            service_name: lookup("UAP_SERVICE_NAME").unwrap_or(defaults.service_name),
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Agent settings.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentConfig {
    /// Service base URL; discovery starts at `<base_url>/.well-known/uap`.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Pre-approve actions marked `confirm: user`.
    pub auto_confirm: bool,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(10),
            auto_confirm: false,
        }
    }
}

impl AgentConfig {
    /// Load from `UAP_BASE_URL`, `UAP_TIMEOUT_SECS` and `UAP_AUTO_CONFIRM`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let base_url = match lookup("UAP_BASE_URL").filter(|v| !v.trim().is_empty()) {
            Some(raw) => validate_base_url("UAP_BASE_URL", &raw)?,
            None => defaults.base_url,
        };

        let timeout = match lookup("UAP_TIMEOUT_SECS") {
            Some(raw) => parse_timeout("UAP_TIMEOUT_SECS", &raw)?,
            None => defaults.timeout,
        };

        let auto_confirm = lookup("UAP_AUTO_CONFIRM")
            .map(|v| parse_flag(&v))
            .unwrap_or(defaults.auto_confirm);

        Ok(Self {
            base_url,
            timeout,
            auto_confirm,
        })
    }
}

/// Accept `http://` and `https://` URLs, trimming trailing slashes.
pub fn validate_base_url(var: &'static str, raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let has_host = trimmed
        .split_once("://")
        .map(|(scheme, rest)| (scheme == "http" || scheme == "https") && !rest.is_empty())
        .unwrap_or(false);
    if !has_host {
        return Err(ConfigError::Invalid {
            var,
            value: raw.to_string(),
            reason: "expected an http(s) URL",
        });
    }
    Ok(trimmed.to_string())
}

pub fn parse_timeout(var: &'static str, raw: &str) -> Result<Duration, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::Invalid {
            var,
            value: raw.to_string(),
            reason: "expected a positive number of seconds",
        }),
    }
}

fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_server_defaults() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.bind_addr(), "0.0.0.0:8000");
    }

    #[test]
    fn test_server_overrides() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("PORT", "9090"),
            ("HOST", "127.0.0.1"),
            ("UAP_PUBLIC_BASE_URL", "https://hotel.example.com/"),
            ("UAP_SERVICE_NAME", "Seaside Inn"),
        ]))
        .unwrap();
        assert_eq!(config.bind_addr(), "127.0.0.1:9090");
        assert_eq!(
            config.public_base_url.as_deref(),
            Some("https://hotel.example.com")
        );
        assert_eq!(config.service_name, "Seaside Inn");
    }

    #[test]
    fn test_server_rejects_bad_port() {
        let err = ServerConfig::from_lookup(lookup(&[("PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: "PORT", .. }));
    }

    #[test]
    fn test_agent_defaults() {
        let config = AgentConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert!(!config.auto_confirm);
    }

    #[test]
    fn test_agent_overrides() {
        let config = AgentConfig::from_lookup(lookup(&[
            ("UAP_BASE_URL", "http://127.0.0.1:3000/"),
            ("UAP_TIMEOUT_SECS", "3"),
            ("UAP_AUTO_CONFIRM", "Yes"),
        ]))
        .unwrap();
        assert_eq!(config.base_url, "http://127.0.0.1:3000");
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert!(config.auto_confirm);
    }

    #[test]
    fn test_agent_rejects_bad_values() {
        assert!(AgentConfig::from_lookup(lookup(&[("UAP_BASE_URL", "localhost:8000")])).is_err());
        assert!(AgentConfig::from_lookup(lookup(&[("UAP_TIMEOUT_SECS", "0")])).is_err());
        assert!(AgentConfig::from_lookup(lookup(&[("UAP_TIMEOUT_SECS", "soon")])).is_err());
    }
}

//! Server configuration read from the environment.

use std::net::SocketAddr;
use std::time::Duration;

use gleaner_core::{DEFAULT_MAX_BODY_BYTES, DEFAULT_USER_AGENT, GleanerConfig};
use thiserror::Error;

pub const ADDR_ENV: &str = "GLEANER_ADDR";
pub const TIMEOUT_ENV: &str = "GLEANER_TIMEOUT_SECS";
pub const USER_AGENT_ENV: &str = "GLEANER_USER_AGENT";
pub const MAX_BODY_ENV: &str = "GLEANER_MAX_BODY_BYTES";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Grace added on top of the fetch timeout for the whole request.
const REQUEST_GRACE: Duration = Duration::from_secs(5);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} has invalid value '{value}'")]
    Invalid { var: &'static str, value: String },
}

/// Settings for the HTTP endpoint and the pipeline behind it.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    pub gleaner: GleanerConfig,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key/value source; unset keys take defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let addr = parse_var(&lookup, ADDR_ENV)?.unwrap_or_else(default_addr);
        let timeout = parse_var(&lookup, TIMEOUT_ENV)?.unwrap_or(DEFAULT_TIMEOUT_SECS);
        let max_body_bytes = parse_var(&lookup, MAX_BODY_ENV)?.unwrap_or(DEFAULT_MAX_BODY_BYTES);
        let user_agent = lookup(USER_AGENT_ENV)
            .filter(|ua| !ua.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());

        let gleaner = GleanerConfig::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .max_body_bytes(max_body_bytes)
            .build();

        Ok(Self { addr, gleaner })
    }

    /// Upper bound for one request, slightly above the fetch timeout.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.gleaner.fetch.timeout) + REQUEST_GRACE
    }
}

fn default_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8080))
}

fn parse_var<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>, var: &'static str,
) -> Result<Option<T>, ConfigError> {
    match lookup(var) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid { var, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.addr.to_string(), "0.0.0.0:8080");
        assert_eq!(config.gleaner.fetch.timeout, DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.gleaner.fetch.user_agent, DEFAULT_USER_AGENT);
        assert_eq!(config.request_timeout(), Duration::from_secs(35));
    }

    #[test]
    fn test_overrides() {
        let config = ServerConfig::from_lookup(lookup_from(&[
            (ADDR_ENV, "127.0.0.1:9000"),
            (TIMEOUT_ENV, "10"),
            (USER_AGENT_ENV, "Probe/0.1"),
            (MAX_BODY_ENV, "2048"),
        ]))
        .unwrap();

        assert_eq!(config.addr.port(), 9000);
        assert_eq!(config.gleaner.fetch.timeout, 10);
        assert_eq!(config.gleaner.fetch.user_agent, "Probe/0.1");
        assert_eq!(config.gleaner.fetch.max_body_bytes, 2048);
    }

    #[test]
    fn test_invalid_value() {
        let err = ServerConfig::from_lookup(lookup_from(&[(TIMEOUT_ENV, "soon")])).unwrap_err();
        assert_eq!(err, ConfigError::Invalid { var: TIMEOUT_ENV, value: "soon".to_string() });
    }
}

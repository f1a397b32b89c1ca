// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::consts::DEFAULT_LOG_FILTER;
use crate::actions::ActionLogLevel;
use crate::config::{CircuitBreakerActionOptions, InMemoryCacheOptions, PayloadToBodyOptions};
use crate::domain::ClientRequest;
use crate::errors::ConfigError;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Configuration of the `fragment-tasks` binary.
///
/// Holds the ambient settings of a run (logging), the options of the bundled actions
/// wired into the demo graph and the client request the run is made for. Task graphs
/// themselves are built in code. A top-level `logLevel` applies to every action whose
/// options do not set their own.
///
/// # Example
/// ```yaml
/// logging:
///   filter: "fragment_tasks=debug"
/// logLevel: info
/// cache:
///   cache:
///     maximumSize: 100
///     ttl: 60000
///   cacheKey: "user-{param.id}"
///   payloadKey: user
///   logLevel: info
/// payload_to_body:
///   key: user
/// circuit_breaker:
///   circuitBreakerOptions:
///     maxFailures: 3
///     timeout: 500
/// request:
///   path: /users/7
///   params:
///     id: "7"
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default, rename = "logLevel")]
    pub action_log_level: Option<ActionLogLevel>,
    #[serde(default)]
    pub cache: InMemoryCacheOptions,
    #[serde(default)]
    pub payload_to_body: PayloadToBodyOptions,
    #[serde(default)]
    pub circuit_breaker: CircuitBreakerActionOptions,
    #[serde(default)]
    pub request: ClientRequest,
}

/// Logging options. `RUST_LOG` takes precedence over `filter` when set.
#[derive(Debug, Default, Deserialize)]
pub struct LoggingConfig {
    pub filter: Option<String>,
}

impl LoggingConfig {
    pub fn get_filter(&self) -> &str {
        self.filter.as_deref().unwrap_or(DEFAULT_LOG_FILTER)
    }
}

impl Config {
    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(content)?;
        Ok(config.with_inherited_log_level())
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        Ok(config.with_inherited_log_level())
    }

    /// Copy the top-level `logLevel` into every action option that has none of its own.
    pub fn with_inherited_log_level(mut self) -> Self {
        if let Some(level) = self.action_log_level {
            for log_level in [
                &mut self.cache.log_level,
                &mut self.payload_to_body.log_level,
                &mut self.circuit_breaker.log_level,
            ] {
                log_level.get_or_insert(level);
            }
        }
        self
    }
}

/// Load a config file, picking the format from its extension (`.yaml`, `.yml` or `.toml`).
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    match path.extension().and_then(|ext| ext.to_str()) {
        Some("yaml") | Some("yml") => Config::from_yaml_str(&content),
        Some("toml") => Config::from_toml_str(&content),
        _ => Err(ConfigError::UnsupportedFormat {
            path: path.to_path_buf(),
        }),
    }
}

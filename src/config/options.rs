// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::actions::ActionLogLevel;
use crate::config::consts::{
    DEFAULT_CACHE_MAXIMUM_SIZE, DEFAULT_CACHE_TTL_MS, DEFAULT_CIRCUIT_MAX_FAILURES,
    DEFAULT_CIRCUIT_MAX_RETRIES, DEFAULT_CIRCUIT_RESET_TIMEOUT_MS, DEFAULT_CIRCUIT_TIMEOUT_MS,
};
use crate::errors::ConfigError;

/// Options of the in-memory cache action.
///
/// # Example
/// ```yaml
/// cache:
///   maximumSize: 1000
///   ttl: 5000          # milliseconds
/// cacheKey: "product-{param.id}"
/// payloadKey: product
/// logLevel: info
/// ```
///
/// `cacheKey` and `payloadKey` are required; they default to blank here so that a missing
/// value is reported by the action with its alias rather than by the parser.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InMemoryCacheOptions {
    #[serde(default)]
    pub cache: CacheOptions,
    #[serde(default)]
    pub cache_key: String,
    #[serde(default)]
    pub payload_key: String,
    pub log_level: Option<ActionLogLevel>,
}

impl InMemoryCacheOptions {
    /// Parse options given as a JSON document.
    pub fn from_json(value: Value) -> Result<Self, ConfigError> {
        Ok(serde_json::from_value(value)?)
    }

    pub fn get_log_level(&self) -> ActionLogLevel {
        self.log_level.unwrap_or_default()
    }
}

/// Size and expiry limits of a cache.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheOptions {
    pub maximum_size: Option<u64>,
    /// Time-to-live in milliseconds, counted from the write.
    pub ttl: Option<u64>,
}

impl CacheOptions {
    pub fn get_maximum_size(&self) -> u64 {
        self.maximum_size.unwrap_or(DEFAULT_CACHE_MAXIMUM_SIZE)
    }

    pub fn get_ttl(&self) -> Duration {
        Duration::from_millis(self.ttl.unwrap_or(DEFAULT_CACHE_TTL_MS))
    }
}

/// Options of the payload-to-body action. Without `key` the whole payload is rendered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayloadToBodyOptions {
    pub key: Option<String>,
    pub log_level: Option<ActionLogLevel>,
}

impl PayloadToBodyOptions {
    pub fn get_log_level(&self) -> ActionLogLevel {
        self.log_level.unwrap_or_default()
    }
}

/// Options of the circuit breaker action.
///
/// # Example
/// ```yaml
/// circuitBreakerOptions:
///   maxFailures: 5
///   timeout: 10000        # milliseconds allowed per invocation
///   resetTimeout: 30000   # milliseconds the circuit stays open
///   maxRetries: 0
/// fallbackOnFailure: true
/// logLevel: info
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CircuitBreakerActionOptions {
    #[serde(default)]
    pub circuit_breaker_options: CircuitBreakerOptions,
    /// Answer `_fallback` when every attempt failed; otherwise answer `_error`.
    pub fallback_on_failure: Option<bool>,
    pub log_level: Option<ActionLogLevel>,
}

impl CircuitBreakerActionOptions {
    pub fn get_fallback_on_failure(&self) -> bool {
        self.fallback_on_failure.unwrap_or(true)
    }

    pub fn get_log_level(&self) -> ActionLogLevel {
        self.log_level.unwrap_or_default()
    }
}

/// Failure threshold and timing of a circuit breaker.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CircuitBreakerOptions {
    pub max_failures: Option<u32>,
    pub timeout: Option<u64>,
    pub reset_timeout: Option<u64>,
    pub max_retries: Option<u32>,
}

impl CircuitBreakerOptions {
    pub fn get_max_failures(&self) -> u32 {
        self.max_failures.unwrap_or(DEFAULT_CIRCUIT_MAX_FAILURES).max(1)
    }

    pub fn get_timeout(&self) -> Duration {
        Duration::from_millis(self.timeout.unwrap_or(DEFAULT_CIRCUIT_TIMEOUT_MS))
    }

    pub fn get_reset_timeout(&self) -> Duration {
        Duration::from_millis(self.reset_timeout.unwrap_or(DEFAULT_CIRCUIT_RESET_TIMEOUT_MS))
    }

    pub fn get_max_retries(&self) -> u32 {
        self.max_retries.unwrap_or(DEFAULT_CIRCUIT_MAX_RETRIES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_cache_defaults() {
        let options = InMemoryCacheOptions::from_json(json!({
            "cacheKey": "product-{param.id}",
            "payloadKey": "product"
        }))
        .unwrap();

        assert_eq!(options.cache.get_maximum_size(), 1000);
        assert_eq!(options.cache.get_ttl(), Duration::from_millis(5000));
        assert_eq!(options.log_level, None);
        assert_eq!(options.get_log_level(), ActionLogLevel::Error);
    }

    #[test]
    fn test_cache_overrides() {
        let options = InMemoryCacheOptions::from_json(json!({
            "cache": {"maximumSize": 10, "ttl": 250},
            "cacheKey": "k",
            "payloadKey": "p",
            "logLevel": "info"
        }))
        .unwrap();

        assert_eq!(options.cache.get_maximum_size(), 10);
        assert_eq!(options.cache.get_ttl(), Duration::from_millis(250));
        assert_eq!(options.get_log_level(), ActionLogLevel::Info);
    }

    #[test]
    fn test_circuit_breaker_defaults() {
        let options: CircuitBreakerActionOptions = serde_json::from_value(json!({})).unwrap();

        let breaker = &options.circuit_breaker_options;
        assert_eq!(breaker.get_max_failures(), 5);
        assert_eq!(breaker.get_timeout(), Duration::from_secs(10));
        assert_eq!(breaker.get_reset_timeout(), Duration::from_secs(30));
        assert_eq!(breaker.get_max_retries(), 0);
        assert!(options.get_fallback_on_failure());
    }

    #[test]
    fn test_circuit_breaker_overrides() {
        let options: CircuitBreakerActionOptions = serde_json::from_value(json!({
            "circuitBreakerOptions": {"maxFailures": 2, "timeout": 50, "maxRetries": 1},
            "fallbackOnFailure": false
        }))
        .unwrap();

        assert_eq!(options.circuit_breaker_options.get_max_failures(), 2);
        assert_eq!(options.circuit_breaker_options.get_timeout(), Duration::from_millis(50));
        assert_eq!(options.circuit_breaker_options.get_max_retries(), 1);
        assert!(!options.get_fallback_on_failure());
    }

    #[test]
    fn test_invalid_options_rejected() {
        let result = InMemoryCacheOptions::from_json(json!({"cache": {"ttl": "soon"}}));
        assert!(matches!(result, Err(ConfigError::Json(_))));
    }
}

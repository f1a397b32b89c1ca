// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// How much an action writes into its node log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionLogLevel {
    Info,
    #[default]
    Error,
}

/// Collects what one action invocation wants to leave in the event log.
///
/// `info` entries are kept only at [`ActionLogLevel::Info`]; `error` entries are always
/// kept. The rendered log has the shape
/// `{ "alias": ..., "logs": { ... }, "doActionLogs": [ ... ] }`.
#[derive(Debug, Clone)]
pub struct ActionLogger {
    alias: String,
    level: ActionLogLevel,
    logs: Map<String, Value>,
    do_action_logs: Vec<Value>,
}

impl ActionLogger {
    pub fn new(alias: impl Into<String>, level: ActionLogLevel) -> Self {
        Self {
            alias: alias.into(),
            level,
            logs: Map::new(),
            do_action_logs: Vec::new(),
        }
    }

    pub fn info(&mut self, key: &str, value: impl Into<Value>) {
        if self.level == ActionLogLevel::Info {
            self.logs.insert(key.to_string(), value.into());
        }
    }

    pub fn error(&mut self, key: &str, value: impl Into<Value>) {
        self.logs.insert(key.to_string(), value.into());
    }

    /// Record a call to a wrapped action: how long it took and the log it returned.
    pub fn do_action_log(&mut self, duration: Duration, node_log: Option<Value>) {
        if self.level == ActionLogLevel::Info {
            self.do_action_logs.push(json!({
                "duration": duration.as_millis() as u64,
                "actionLog": node_log.unwrap_or(Value::Null),
            }));
        }
    }

    pub fn to_log(&self) -> Value {
        json!({
            "alias": self.alias,
            "logs": self.logs,
            "doActionLogs": self.do_action_logs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_info_dropped_at_error_level() {
        let mut logger = ActionLogger::new("cache", ActionLogLevel::Error);
        logger.info("CACHE_LOOKUP", "key");
        logger.error("body", "missing");
        logger.do_action_log(Duration::from_millis(5), None);

        assert_eq!(
            logger.to_log(),
            json!({"alias": "cache", "logs": {"body": "missing"}, "doActionLogs": []})
        );
    }

    #[test]
    fn test_info_kept_at_info_level() {
        let mut logger = ActionLogger::new("cache", ActionLogLevel::Info);
        logger.info("CACHE_LOOKUP", "key");
        logger.do_action_log(Duration::from_millis(5), Some(json!({"inner": true})));

        let log = logger.to_log();
        assert_eq!(log["logs"]["CACHE_LOOKUP"], json!("key"));
        assert_eq!(log["doActionLogs"][0]["duration"], json!(5));
        assert_eq!(log["doActionLogs"][0]["actionLog"], json!({"inner": true}));
    }

    #[test]
    fn test_level_deserializes_lowercase() {
        let level: ActionLogLevel = serde_json::from_value(json!("info")).unwrap();
        assert_eq!(level, ActionLogLevel::Info);
        assert_eq!(ActionLogLevel::default(), ActionLogLevel::Error);
    }
}
